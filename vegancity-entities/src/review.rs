use crate::{id::*, rating::*, status::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id                     : Id,
    pub vendor_id              : Id,
    pub author                 : Id,
    pub approval_status        : ApprovalStatus,
    pub title                  : Option<String>,
    pub food_rating            : Option<RatingValue>,
    pub atmosphere_rating      : Option<RatingValue>,
    pub content                : String,
    pub suggested_feature_tags : Option<String>,
    pub suggested_cuisine_tags : Option<String>,
    pub created                : Timestamp,
    pub modified               : Timestamp,
}

impl Review {
    pub fn is_approved(&self) -> bool {
        self.approval_status.is_approved()
    }
}
