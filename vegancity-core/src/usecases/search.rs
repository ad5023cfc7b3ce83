use std::collections::{HashMap, HashSet};

use super::prelude::*;
use crate::gateways::geocode::GeoCodingGateway;

/// Maximum distance of vendors around a geocoded search query.
pub const GEO_SEARCH_DISTANCE_DEG: f64 = 0.004;

/// Searches approved vendors by address proximity, by their own
/// text, by the text of their tags and by the text of their
/// approved reviews.
///
/// The results of all sub-searches are combined, optionally
/// restricted to `initial_candidates`, and ordered by name.
pub fn master_search<R, G, I>(
    repo: &R,
    geo: &G,
    index: &I,
    query: &str,
    initial_candidates: Option<&HashSet<Id>>,
) -> Result<Vec<Vendor>>
where
    R: VendorRepo + ReviewRepo,
    G: GeoCodingGateway + ?Sized,
    I: IdIndex + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(vec![]);
    }
    let mut results = HashMap::new();
    let sub_results = [
        vendors_near_address(repo, geo, query)?,
        vendors_by_text(repo, index, query)?,
        vendors_by_tag_text(repo, index, TagKind::Feature, query)?,
        vendors_by_tag_text(repo, index, TagKind::Cuisine, query)?,
        vendors_by_review_text(repo, index, query)?,
    ];
    for vendor in sub_results.into_iter().flatten() {
        debug_assert!(vendor.is_approved());
        results.entry(vendor.id.clone()).or_insert(vendor);
    }
    let mut vendors: Vec<_> = results
        .into_values()
        .filter(|v| initial_candidates.map_or(true, |ids| ids.contains(&v.id)))
        .collect();
    vendors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Ok(vendors)
}

pub fn vendors_near_address<R, G>(repo: &R, geo: &G, query: &str) -> Result<Vec<Vendor>>
where
    R: VendorRepo,
    G: GeoCodingGateway + ?Sized,
{
    let Some(geocoded) = geo.resolve_address(query) else {
        log::debug!("Search query '{query}' is not an address");
        return Ok(vec![]);
    };
    Ok(repo.approved_vendors_within(geocoded.pos, GEO_SEARCH_DISTANCE_DEG)?)
}

pub fn vendors_by_text<R, I>(repo: &R, index: &I, query: &str) -> Result<Vec<Vendor>>
where
    R: VendorRepo,
    I: IdIndex + ?Sized,
{
    let ids = query_index(index, IndexedKind::Vendor, query);
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<_> = ids.iter().map(Id::as_str).collect();
    Ok(repo.approved_vendors_by_ids(&ids)?)
}

pub fn vendors_by_tag_text<R, I>(
    repo: &R,
    index: &I,
    kind: TagKind,
    query: &str,
) -> Result<Vec<Vendor>>
where
    R: VendorRepo,
    I: IdIndex + ?Sized,
{
    let tag_ids = query_index(index, IndexedKind::of_tag(kind), query);
    if tag_ids.is_empty() {
        return Ok(vec![]);
    }
    let tag_ids: Vec<_> = tag_ids.iter().map(Id::as_str).collect();
    Ok(repo.approved_vendors_by_tags(&tag_ids)?)
}

pub fn vendors_by_review_text<R, I>(repo: &R, index: &I, query: &str) -> Result<Vec<Vendor>>
where
    R: VendorRepo + ReviewRepo,
    I: IdIndex + ?Sized,
{
    let review_ids = query_index(index, IndexedKind::Review, query);
    if review_ids.is_empty() {
        return Ok(vec![]);
    }
    let review_ids: Vec<_> = review_ids.iter().map(Id::as_str).collect();
    let vendor_ids: HashSet<_> = repo
        .get_reviews(&review_ids)?
        .into_iter()
        .filter(Review::is_approved)
        .map(|r| r.vendor_id)
        .collect();
    if vendor_ids.is_empty() {
        return Ok(vec![]);
    }
    let vendor_ids: Vec<_> = vendor_ids.iter().map(Id::as_str).collect();
    Ok(repo.approved_vendors_by_ids(&vendor_ids)?)
}

fn query_index<I>(index: &I, kind: IndexedKind, query: &str) -> Vec<Id>
where
    I: IdIndex + ?Sized,
{
    index.query_ids(kind, query).unwrap_or_else(|err| {
        log::warn!(
            "Failed to search {} documents for '{query}': {err}",
            kind.as_str()
        );
        vec![]
    })
}
