use super::{geocoding::*, prelude::*};
use crate::{
    gateways::geocode::GeoCodingGateway,
    util::{text::non_blank, validate::Validate},
};

#[rustfmt::skip]
#[derive(Debug, Default, Clone)]
pub struct NewVendor {
    pub name         : String,
    pub address      : Option<String>,
    pub neighborhood : Option<String>,
    pub phone        : Option<String>,
    pub website      : Option<String>,
    pub notes        : Option<String>,
    pub veg_level    : Option<String>,
    pub cuisine_tags : Vec<String>,
    pub feature_tags : Vec<String>,
    pub submitted_by : Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorableVendor(Vendor);

impl StorableVendor {
    pub const fn vendor(&self) -> &Vendor {
        &self.0
    }
}

pub fn prepare_new_vendor<R, G>(repo: &R, geo: &G, new_vendor: NewVendor) -> Result<StorableVendor>
where
    R: VendorRepo + NeighborhoodRepo + TagRepo + VegLevelRepo + UserRepo,
    G: GeoCodingGateway + ?Sized,
{
    let NewVendor {
        name,
        address,
        neighborhood,
        phone,
        website,
        notes,
        veg_level,
        cuisine_tags,
        feature_tags,
        submitted_by,
    } = new_vendor;
    let now = Timestamp::now();
    #[rustfmt::skip]
    let mut vendor = Vendor {
        id              : Id::new(),
        name            : name.trim().to_owned(),
        address         : non_blank(address),
        location        : None,
        neighborhood    : neighborhood.map(Id::from),
        phone           : non_blank(phone),
        website         : non_blank(website),
        notes           : non_blank(notes),
        veg_level       : veg_level.map(Id::from),
        approval_status : ApprovalStatus::Pending,
        submitted_by    : submitted_by.map(Id::from),
        created         : now,
        modified        : now,
        cuisine_tags    : unique_ids(cuisine_tags),
        feature_tags    : unique_ids(feature_tags),
    };
    vendor.validate()?;
    check_unique_name(repo, &vendor)?;
    check_references(repo, &vendor)?;
    if let Some(user_id) = &vendor.submitted_by {
        match repo.get_user(user_id.as_str()) {
            Ok(_) => {}
            Err(RepoError::NotFound) => return Err(Error::UserDoesNotExist),
            Err(err) => return Err(err.into()),
        }
    }
    if needs_geocoding(&vendor, None)? {
        apply_geocoding(repo, geo, &mut vendor)?;
    }
    Ok(StorableVendor(vendor))
}

pub fn store_new_vendor<R: VendorRepo>(repo: &R, s: StorableVendor) -> Result<Vendor> {
    let StorableVendor(vendor) = s;
    log::debug!("Storing new vendor: {vendor:?}");
    repo.create_vendor(vendor.clone())?;
    log::info!("Created vendor {} ({})", vendor.id, vendor.name);
    Ok(vendor)
}

/// Sorted tag ids without repetitions.
pub(crate) fn unique_ids(ids: Vec<String>) -> Vec<Id> {
    let mut ids: Vec<Id> = ids.into_iter().map(Id::from).collect();
    ids.sort();
    ids.dedup();
    ids
}

pub(crate) fn check_unique_name<R: VendorRepo>(repo: &R, vendor: &Vendor) -> Result<()> {
    match repo.get_vendor_by_name(&vendor.name) {
        Ok(other) if other.id != vendor.id => Err(Error::VendorExists),
        Ok(_) | Err(RepoError::NotFound) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn check_references<R>(repo: &R, vendor: &Vendor) -> Result<()>
where
    R: NeighborhoodRepo + TagRepo + VegLevelRepo,
{
    let tags = vendor
        .cuisine_tags
        .iter()
        .map(|id| (TagKind::Cuisine, id))
        .chain(vendor.feature_tags.iter().map(|id| (TagKind::Feature, id)));
    for (kind, id) in tags {
        match repo.get_tag(id.as_str()) {
            Ok(tag) if tag.kind == kind => {}
            Ok(_) | Err(RepoError::NotFound) => {
                return Err(Error::TagDoesNotExist(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }
    if let Some(id) = &vendor.veg_level {
        match repo.get_veg_level(id.as_str()) {
            Ok(_) => {}
            Err(RepoError::NotFound) => return Err(Error::VegLevelDoesNotExist),
            Err(err) => return Err(err.into()),
        }
    }
    if let Some(id) = &vendor.neighborhood {
        match repo.get_neighborhood(id.as_str()) {
            Ok(_) => {}
            Err(RepoError::NotFound) => return Err(Error::NeighborhoodDoesNotExist),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{FakeGeoCoder, MockDb},
        *,
    };

    fn create_new_vendor<G: GeoCodingGateway>(
        db: &MockDb,
        geo: &G,
        v: NewVendor,
    ) -> Result<Vendor> {
        let s = prepare_new_vendor(db, geo, v)?;
        store_new_vendor(db, s)
    }

    fn christian_st() -> FakeGeoCoder {
        FakeGeoCoder::default().with(
            "300 Christian St",
            MapPoint::from_lat_lng_deg(100.0, 100.0),
            Some("South Philly"),
        )
    }

    #[test]
    fn create_pending_vendor() {
        let db = MockDb::default();
        let v = NewVendor {
            name: " Blackbird Pizzeria ".into(),
            address: Some("".into()),
            ..Default::default()
        };
        let vendor = create_new_vendor(&db, &FakeGeoCoder::default(), v).unwrap();
        assert_eq!("Blackbird Pizzeria", vendor.name);
        assert_eq!(ApprovalStatus::Pending, vendor.approval_status);
        assert!(vendor.address.is_none());
        assert!(vendor.location.is_none());
        assert_eq!(1, db.vendors.borrow().len());
    }

    #[test]
    fn geocode_new_vendor() {
        let db = MockDb::default();
        let v = NewVendor {
            name: "Govinda's".into(),
            address: Some("300 Christian St".into()),
            ..Default::default()
        };
        let vendor = create_new_vendor(&db, &christian_st(), v).unwrap();
        assert_eq!(Some(MapPoint::from_lat_lng_deg(100.0, 100.0)), vendor.location);
        let neighborhood = db.neighborhoods.borrow()[0].clone();
        assert_eq!("South Philly", neighborhood.name);
        assert_eq!(Some(neighborhood.id), vendor.neighborhood);
    }

    #[test]
    fn store_vendor_if_geocoding_fails() {
        let db = MockDb::default();
        let v = NewVendor {
            name: "Govinda's".into(),
            address: Some("300 Christian St".into()),
            ..Default::default()
        };
        let vendor = create_new_vendor(&db, &FakeGeoCoder::default(), v).unwrap();
        assert!(vendor.location.is_none());
        assert!(vendor.neighborhood.is_none());
        assert!(db.neighborhoods.borrow().is_empty());
        assert_eq!(1, db.vendors.borrow().len());
    }

    #[test]
    fn reject_duplicate_name() {
        let db = MockDb::default();
        let v = NewVendor {
            name: "Su Xing House".into(),
            ..Default::default()
        };
        create_new_vendor(&db, &FakeGeoCoder::default(), v.clone()).unwrap();
        assert!(matches!(
            create_new_vendor(&db, &FakeGeoCoder::default(), v),
            Err(Error::VendorExists)
        ));
    }

    #[test]
    fn reject_unknown_tags() {
        let db = MockDb::default();
        let v = NewVendor {
            name: "Su Xing House".into(),
            cuisine_tags: vec!["chinese".into()],
            ..Default::default()
        };
        assert!(matches!(
            create_new_vendor(&db, &FakeGeoCoder::default(), v),
            Err(Error::TagDoesNotExist(_))
        ));
        assert!(db.vendors.borrow().is_empty());
    }

    #[test]
    fn store_repeated_tags_once() {
        let db = MockDb::default();
        db.tags.borrow_mut().push(Tag {
            id: "chinese".into(),
            kind: TagKind::Cuisine,
            name: "chinese".into(),
            description: String::new(),
            created: Timestamp::now(),
        });
        let v = NewVendor {
            name: "Su Xing House".into(),
            cuisine_tags: vec!["chinese".into(), "chinese".into()],
            ..Default::default()
        };
        let vendor = create_new_vendor(&db, &FakeGeoCoder::default(), v).unwrap();
        assert_eq!(vec![Id::from("chinese")], vendor.cuisine_tags);
        assert_eq!(
            vec![Id::from("chinese")],
            db.vendors.borrow()[0].cuisine_tags
        );
    }

    #[test]
    fn reject_invalid_phone() {
        let db = MockDb::default();
        let v = NewVendor {
            name: "Su Xing House".into(),
            phone: Some("call us".into()),
            ..Default::default()
        };
        assert!(matches!(
            create_new_vendor(&db, &FakeGeoCoder::default(), v),
            Err(Error::Phone)
        ));
    }
}
