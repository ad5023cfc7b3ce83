mod create_review;
mod create_vendor;
mod error;
mod geocoding;
mod indexing;
mod moderation;
mod query_vendors;
mod search;
mod tags;
mod update_review;
mod update_vendor;
mod users;

#[cfg(test)]
pub mod tests;

pub use self::{
    create_review::*, create_vendor::*, error::Error, geocoding::*, indexing::*, moderation::*,
    query_vendors::*, search::*, tags::*, update_review::*, update_vendor::*, users::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*, RepoError};
}
