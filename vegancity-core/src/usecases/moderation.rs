use super::{prelude::*, update_review::*, update_vendor::*};
use crate::gateways::geocode::GeoCodingGateway;

/// Changes only the approval status of a vendor.
///
/// All other properties are passed through the regular update
/// pipeline unchanged. A stored vendor with an address but without
/// a location gets geocoded on the way.
pub fn prepare_vendor_status_change<R, G>(
    repo: &R,
    geo: &G,
    id: &str,
    status: ApprovalStatus,
) -> Result<StorableVendorUpdate>
where
    R: VendorRepo + NeighborhoodRepo + TagRepo + VegLevelRepo,
    G: GeoCodingGateway + ?Sized,
{
    let vendor = match repo.get_vendor(id) {
        Ok(vendor) => vendor,
        Err(RepoError::NotFound) => return Err(Error::VendorDoesNotExist),
        Err(err) => return Err(err.into()),
    };
    let update = UpdateVendor {
        approval_status: status,
        ..UpdateVendor::from(vendor)
    };
    prepare_updated_vendor(repo, geo, id, update)
}

pub fn prepare_review_status_change<R: ReviewRepo>(
    repo: &R,
    id: &str,
    status: ApprovalStatus,
) -> Result<StorableReviewUpdate> {
    let review = repo.get_review(id)?;
    let update = UpdateReview {
        approval_status: status,
        ..UpdateReview::from(review)
    };
    prepare_updated_review(repo, id, update)
}

pub fn pending_vendors<R: VendorRepo>(repo: &R) -> Result<Vec<Vendor>> {
    Ok(repo.pending_vendors()?)
}

pub fn pending_reviews<R: ReviewRepo>(repo: &R) -> Result<Vec<Review>> {
    Ok(repo.reviews_by_status(ApprovalStatus::Pending)?)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{FakeGeoCoder, MockDb},
        *,
    };
    use vegancity_entities::builders::*;

    #[test]
    fn approve_vendor_without_geocoding() {
        let db = MockDb::default();
        let vendor = Vendor::build()
            .id("v")
            .name("Vedge")
            .address(Some("1221 Locust St"))
            .pos(1.0, 1.0)
            .finish();
        db.vendors.borrow_mut().push(vendor.clone());
        let geo = FakeGeoCoder::default();
        let s = prepare_vendor_status_change(&db, &geo, "v", ApprovalStatus::Approved).unwrap();
        let updated = store_updated_vendor(&db, s).unwrap();
        assert!(updated.initially_approved);
        assert_eq!(0, geo.requests.get());
        let stored = db.vendors.borrow()[0].clone();
        assert_eq!(ApprovalStatus::Approved, stored.approval_status);
        assert_eq!(vendor.location, stored.location);
        assert_eq!(vendor.address, stored.address);
    }

    #[test]
    fn geocode_missing_location_on_status_change() {
        let db = MockDb::default();
        let vendor = Vendor::build()
            .id("v")
            .name("Govinda's")
            .address(Some("300 Christian St"))
            .finish();
        db.vendors.borrow_mut().push(vendor);
        let geo = FakeGeoCoder::default().with(
            "300 Christian St",
            MapPoint::from_lat_lng_deg(100.0, 100.0),
            Some("South Philly"),
        );
        let s = prepare_vendor_status_change(&db, &geo, "v", ApprovalStatus::Approved).unwrap();
        store_updated_vendor(&db, s).unwrap();
        assert_eq!(1, geo.requests.get());
        let stored = db.vendors.borrow()[0].clone();
        assert_eq!(ApprovalStatus::Approved, stored.approval_status);
        assert_eq!(
            Some(MapPoint::from_lat_lng_deg(100.0, 100.0)),
            stored.location
        );
        assert!(stored.neighborhood.is_some());
    }

    #[test]
    fn list_pending() {
        let db = MockDb::default();
        db.vendors.borrow_mut().extend([
            Vendor::build().name("B").finish(),
            Vendor::build().name("A").finish(),
            Vendor::build().name("C").approved().finish(),
        ]);
        db.reviews.borrow_mut().extend([
            Review::build().content("x").finish(),
            Review::build().content("y").approved().finish(),
        ]);
        let names: Vec<_> = pending_vendors(&db)
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(vec!["A", "B"], names);
        assert_eq!(1, pending_reviews(&db).unwrap().len());
    }
}
