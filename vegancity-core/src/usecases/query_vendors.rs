use std::cmp::Reverse;

use rand::{seq::SliceRandom, Rng};

use super::prelude::*;
use crate::rating::Rated;

pub fn vendor_ratings<R>(repo: &R, vendor_id: &str) -> Result<AvgRatings>
where
    R: VendorRepo + ReviewRepo,
{
    let vendor = repo.get_vendor(vendor_id)?;
    let reviews = repo.approved_reviews_of_vendor(vendor_id)?;
    Ok(vendor.avg_ratings(&reviews))
}

pub fn food_rating<R>(repo: &R, vendor_id: &str) -> Result<Option<RatingValue>>
where
    R: VendorRepo + ReviewRepo,
{
    Ok(vendor_ratings(repo, vendor_id)?.food)
}

pub fn atmosphere_rating<R>(repo: &R, vendor_id: &str) -> Result<Option<RatingValue>>
where
    R: VendorRepo + ReviewRepo,
{
    Ok(vendor_ratings(repo, vendor_id)?.atmosphere)
}

/// Approved reviews of a vendor, newest first.
pub fn approved_reviews_of_vendor<R: ReviewRepo>(repo: &R, vendor_id: &str) -> Result<Vec<Review>> {
    Ok(repo.approved_reviews_of_vendor(vendor_id)?)
}

/// Approved vendors without any approved review, ordered by name.
pub fn vendors_without_reviews<R>(repo: &R) -> Result<Vec<Vendor>>
where
    R: VendorRepo + ReviewRepo,
{
    let review_counts = repo.count_approved_reviews_per_vendor()?;
    let vendors = repo
        .approved_vendors()?
        .into_iter()
        .filter(|v| !review_counts.contains_key(&v.id))
        .collect();
    Ok(vendors)
}

/// Approved vendors with at least one approved review and the
/// number of these reviews, most reviewed first.
pub fn vendors_with_reviews<R>(repo: &R) -> Result<Vec<(Vendor, usize)>>
where
    R: VendorRepo + ReviewRepo,
{
    let review_counts = repo.count_approved_reviews_per_vendor()?;
    let mut vendors: Vec<_> = repo
        .approved_vendors()?
        .into_iter()
        .filter_map(|v| {
            let count = review_counts.get(&v.id).copied()?;
            Some((v, count))
        })
        .collect();
    vendors.sort_by(|(v1, c1), (v2, c2)| {
        Reverse(c1)
            .cmp(&Reverse(c2))
            .then_with(|| v1.name.cmp(&v2.name))
    });
    Ok(vendors)
}

pub fn get_random_unreviewed<R, G>(repo: &R, rng: &mut G) -> Result<Option<Vendor>>
where
    R: VendorRepo + ReviewRepo,
    G: Rng + ?Sized,
{
    let vendors = vendors_without_reviews(repo)?;
    Ok(vendors.choose(rng).cloned())
}
