// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use std::collections::HashMap;

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait VendorRepo {
    fn create_vendor(&self, vendor: Vendor) -> Result<()>;
    fn update_vendor(&self, vendor: &Vendor) -> Result<()>;

    fn get_vendor(&self, id: &str) -> Result<Vendor>;
    fn get_vendors(&self, ids: &[&str]) -> Result<Vec<Vendor>>;
    fn get_vendor_by_name(&self, name: &str) -> Result<Vendor>;
    fn count_vendors(&self) -> Result<usize>;
    fn all_vendors(&self) -> Result<Vec<Vendor>>;

    // Ordered by name
    fn vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>>;

    fn approved_vendors(&self) -> Result<Vec<Vendor>> {
        self.vendors_by_status(ApprovalStatus::Approved)
    }
    fn pending_vendors(&self) -> Result<Vec<Vendor>> {
        self.vendors_by_status(ApprovalStatus::Pending)
    }

    // All following queries only return approved vendors
    fn approved_vendors_by_ids(&self, ids: &[&str]) -> Result<Vec<Vendor>>;
    fn approved_vendors_by_tags(&self, tag_ids: &[&str]) -> Result<Vec<Vendor>>;
    fn approved_vendors_within(&self, center: MapPoint, distance_deg: f64)
        -> Result<Vec<Vendor>>;
}

pub trait ReviewRepo {
    fn create_review(&self, review: Review) -> Result<()>;
    fn update_review(&self, review: &Review) -> Result<()>;

    fn get_review(&self, id: &str) -> Result<Review>;
    fn get_reviews(&self, ids: &[&str]) -> Result<Vec<Review>>;
    fn all_reviews(&self) -> Result<Vec<Review>>;

    // Newest first
    fn reviews_by_status(&self, status: ApprovalStatus) -> Result<Vec<Review>>;
    fn approved_reviews_of_vendor(&self, vendor_id: &str) -> Result<Vec<Review>>;

    /// Number of approved reviews per vendor. Vendors without
    /// any approved review are missing in the result.
    fn count_approved_reviews_per_vendor(&self) -> Result<HashMap<Id, usize>>;
}

pub trait NeighborhoodRepo {
    fn create_neighborhood(&self, neighborhood: Neighborhood) -> Result<()>;
    fn get_neighborhood(&self, id: &str) -> Result<Neighborhood>;
    fn get_neighborhood_by_name(&self, name: &str) -> Result<Neighborhood>;
    // Ordered by name
    fn all_neighborhoods(&self) -> Result<Vec<Neighborhood>>;
}

pub trait TagRepo {
    fn create_tag(&self, tag: Tag) -> Result<()>;
    fn get_tag(&self, id: &str) -> Result<Tag>;
    fn get_tag_by_name(&self, kind: TagKind, name: &str) -> Result<Tag>;
    // Ordered by name
    fn all_tags(&self, kind: TagKind) -> Result<Vec<Tag>>;
}

pub trait VegLevelRepo {
    fn create_veg_level(&self, veg_level: VegLevel) -> Result<()>;
    fn get_veg_level(&self, id: &str) -> Result<VegLevel>;
    fn get_veg_level_by_name(&self, name: &str) -> Result<VegLevel>;
    fn all_veg_levels(&self) -> Result<Vec<VegLevel>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn get_user(&self, id: &str) -> Result<User>;
    fn get_user_by_username(&self, username: &str) -> Result<User>;
    fn all_users(&self) -> Result<Vec<User>>;

    fn staff_users(&self) -> Result<Vec<User>> {
        let users = self.all_users()?;
        Ok(users.into_iter().filter(|u| u.role.is_staff()).collect())
    }
}

pub trait UserProfileRepo {
    fn create_or_update_profile(&self, profile: &UserProfile) -> Result<()>;
    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;
}
