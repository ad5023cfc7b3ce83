use anyhow::Result as Fallible;

use crate::{entities::*, repositories::*};

pub trait Db:
    VendorRepo + ReviewRepo + NeighborhoodRepo + TagRepo + VegLevelRepo + UserRepo + UserProfileRepo
{
}

impl<T> Db for T where
    T: VendorRepo
        + ReviewRepo
        + NeighborhoodRepo
        + TagRepo
        + VegLevelRepo
        + UserRepo
        + UserProfileRepo
{
}

/// The kinds of documents in the full-text index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedKind {
    Vendor,
    CuisineTag,
    FeatureTag,
    Review,
}

impl IndexedKind {
    pub const ALL: [Self; 4] = [Self::Vendor, Self::CuisineTag, Self::FeatureTag, Self::Review];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::CuisineTag => "cuisine-tag",
            Self::FeatureTag => "feature-tag",
            Self::Review => "review",
        }
    }

    pub const fn of_tag(kind: TagKind) -> Self {
        match kind {
            TagKind::Cuisine => Self::CuisineTag,
            TagKind::Feature => Self::FeatureTag,
        }
    }
}

pub trait Indexer {
    fn flush_index(&mut self) -> Fallible<()>;
}

pub trait IdIndex {
    /// Ids of all documents of the given kind that match every word of `text`.
    fn query_ids(&self, kind: IndexedKind, text: &str) -> Fallible<Vec<Id>>;
}

pub trait IdIndexer: Indexer + IdIndex {
    fn remove_by_id(&self, id: &Id) -> Fallible<()>;
}

pub trait VendorIndexer: IdIndexer {
    fn add_or_update_vendor(&self, vendor: &Vendor) -> Fallible<()>;
}

pub trait TagIndexer: IdIndexer {
    fn add_or_update_tag(&self, tag: &Tag) -> Fallible<()>;
}

pub trait ReviewIndexer: IdIndexer {
    fn add_or_update_review(&self, review: &Review) -> Fallible<()>;
}

pub trait SearchIndexer: VendorIndexer + TagIndexer + ReviewIndexer {}
