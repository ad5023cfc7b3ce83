use vegancity_entities::{rating::*, review::*, vendor::*};

pub trait Rated {
    fn avg_ratings(&self, _: &[Review]) -> AvgRatings;
}

impl Rated for Vendor {
    /// Only approved reviews are taken into account.
    fn avg_ratings(&self, reviews: &[Review]) -> AvgRatings {
        debug_assert_eq!(
            reviews.len(),
            reviews.iter().filter(|r| r.vendor_id == self.id).count()
        );
        reviews
            .iter()
            .filter(|r| r.is_approved())
            .fold(AvgRatingsBuilder::default(), |mut acc, r| {
                acc.add(r.food_rating, r.atmosphere_rating);
                acc
            })
            .build()
    }
}
