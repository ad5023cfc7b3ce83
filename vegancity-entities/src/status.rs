use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// Moderation state of a vendor or a review.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Quarantined,
}

impl ApprovalStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}
