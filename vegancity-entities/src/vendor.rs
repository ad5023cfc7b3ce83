use crate::{geo::*, id::*, status::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
    pub id              : Id,
    pub name            : String,
    pub address         : Option<String>,
    // Derived from the address by geocoding
    pub location        : Option<MapPoint>,
    pub neighborhood    : Option<Id>,
    pub phone           : Option<String>,
    pub website         : Option<String>,
    pub notes           : Option<String>,
    pub veg_level       : Option<Id>,
    pub approval_status : ApprovalStatus,
    pub submitted_by    : Option<Id>,
    pub created         : Timestamp,
    pub modified        : Timestamp,
    pub cuisine_tags    : Vec<Id>,
    pub feature_tags    : Vec<Id>,
}

impl Vendor {
    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .map(|addr| !addr.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status.is_approved()
    }

    pub fn has_tag(&self, tag_id: &Id) -> bool {
        self.cuisine_tags.contains(tag_id) || self.feature_tags.contains(tag_id)
    }
}
