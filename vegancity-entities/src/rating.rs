use thiserror::Error;

/// A rating on a scale from 1 (poor) to 4 (excellent).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(4)
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Rating value out of range: {0}")]
pub struct RatingValueOutOfRange(pub i64);

impl TryFrom<i64> for RatingValue {
    type Error = RatingValueOutOfRange;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        let val = u8::try_from(from)
            .map(Self)
            .map_err(|_| RatingValueOutOfRange(from))?;
        if val.is_valid() {
            Ok(val)
        } else {
            Err(RatingValueOutOfRange(from))
        }
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RatingValueOutOfRange;
    fn try_from(from: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(from))
    }
}

impl From<RatingValue> for u8 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for i16 {
    fn from(from: RatingValue) -> Self {
        i16::from(from.0)
    }
}

/// Accumulates rating values and yields their floored mean.
#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: u64,
    cnt: u64,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: RatingValue) {
        debug_assert!(val.is_valid());
        self.acc += u64::from(val.0);
        self.cnt += 1;
    }

    pub const fn count(&self) -> u64 {
        self.cnt
    }

    /// The arithmetic mean using integer division, or `None`
    /// if no values have been added.
    pub fn build(self) -> Option<RatingValue> {
        if self.cnt == 0 {
            return None;
        }
        // The mean of values within [min, max] is also within [min, max]
        let avg = RatingValue((self.acc / self.cnt) as u8);
        debug_assert!(avg.is_valid());
        Some(avg)
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AvgRatings {
    pub food: Option<RatingValue>,
    pub atmosphere: Option<RatingValue>,
}

#[derive(Debug, Default, Clone)]
pub struct AvgRatingsBuilder {
    pub food: AvgRatingValueBuilder,
    pub atmosphere: AvgRatingValueBuilder,
}

impl AvgRatingsBuilder {
    pub fn add(&mut self, food: Option<RatingValue>, atmosphere: Option<RatingValue>) {
        if let Some(val) = food {
            self.food.add(val);
        }
        if let Some(val) = atmosphere {
            self.atmosphere.add(val);
        }
    }

    pub fn build(self) -> AvgRatings {
        AvgRatings {
            food: self.food.build(),
            atmosphere: self.atmosphere.build(),
        }
    }
}
