use anyhow::Result as Fallible;

use super::prelude::*;

/// Rebuilds the full-text index from the repositories.
///
/// Returns the number of indexed documents.
pub fn reindex_all<R, I>(repo: &R, indexer: &mut I) -> Fallible<usize>
where
    R: VendorRepo + ReviewRepo + TagRepo,
    I: SearchIndexer + ?Sized,
{
    let mut count = 0;
    for vendor in repo.all_vendors()? {
        indexer.add_or_update_vendor(&vendor)?;
        count += 1;
    }
    for kind in [TagKind::Cuisine, TagKind::Feature] {
        for tag in repo.all_tags(kind)? {
            indexer.add_or_update_tag(&tag)?;
            count += 1;
        }
    }
    for review in repo.all_reviews()? {
        indexer.add_or_update_review(&review)?;
        count += 1;
    }
    indexer.flush_index()?;
    log::info!("Indexed {count} documents");
    Ok(count)
}
