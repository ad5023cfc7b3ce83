#[macro_use]
extern crate log;

mod change_review_status;
mod change_vendor_status;
mod create_review;
mod create_tag;
mod create_vendor;
mod query_vendors;
mod reindex;
mod search;
mod update_review;
mod update_vendor;

pub mod prelude {
    pub use super::{
        change_review_status::*, change_vendor_status::*, create_review::*, create_tag::*,
        create_vendor::*, query_vendors::*, reindex::*, search::*, update_review::*,
        update_vendor::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use vegancity_core::{
    db::*,
    entities::*,
    gateways::{
        geocode::GeoCodingGateway,
        notify::{NotificationEvent, NotificationGateway},
    },
    repositories::*,
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use vegancity_db_sqlite::Connections;
}

fn reindex_vendor(indexer: &mut dyn SearchIndexer, vendor: &Vendor) {
    if let Err(err) = indexer
        .add_or_update_vendor(vendor)
        .and_then(|()| indexer.flush_index())
    {
        error!("Failed to reindex vendor {}: {}", vendor.id, err);
    }
}

fn reindex_review(indexer: &mut dyn SearchIndexer, review: &Review) {
    if let Err(err) = indexer
        .add_or_update_review(review)
        .and_then(|()| indexer.flush_index())
    {
        error!("Failed to reindex review {}: {}", review.id, err);
    }
}
