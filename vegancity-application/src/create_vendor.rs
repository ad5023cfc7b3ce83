use super::*;

pub fn create_vendor(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    geo: &dyn GeoCodingGateway,
    notify: &dyn NotificationGateway,
    new_vendor: usecases::NewVendor,
) -> Result<Vendor> {
    let vendor = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_new_vendor(conn, geo, new_vendor)?;
        usecases::store_new_vendor(conn, storable).map_err(|err| {
            warn!("Failed to store new vendor: {}", err);
            err
        })
    })?;

    reindex_vendor(indexer, &vendor);

    if let Err(err) = notify_vendor_submitted(connections, notify, &vendor) {
        error!(
            "Failed to send notifications for new vendor {}: {}",
            vendor.id, err
        );
    }

    Ok(vendor)
}

fn notify_vendor_submitted(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    vendor: &Vendor,
) -> Result<()> {
    let email_addresses = usecases::staff_email_addresses(&connections.shared()?)?;
    notify.notify(NotificationEvent::VendorSubmitted {
        vendor,
        email_addresses: &email_addresses,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn create_vendor_with_geocoded_address() {
        let fixture = BackendFixture::new();
        fixture.geo.set("300 Christian St", (100.0, 100.0), Some("South Philly"));
        let vendor = fixture
            .create_vendor(usecases::NewVendor {
                address: Some("300 Christian St".into()),
                ..new_vendor("Vedge")
            })
            .unwrap();
        assert_eq!(ApprovalStatus::Pending, vendor.approval_status);
        assert_eq!(
            Some(MapPoint::from_lat_lng_deg(100.0, 100.0)),
            vendor.location
        );
        let stored = fixture.get_vendor(vendor.id.as_str());
        assert_eq!(vendor.location, stored.location);
        let neighborhood = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_neighborhood_by_name("South Philly")
            .unwrap();
        assert_eq!(Some(neighborhood.id), stored.neighborhood);
    }

    #[test]
    fn create_vendor_if_geocoding_fails() {
        let fixture = BackendFixture::new();
        let vendor = fixture
            .create_vendor(usecases::NewVendor {
                address: Some("Nowhere".into()),
                ..new_vendor("Vedge")
            })
            .unwrap();
        let stored = fixture.get_vendor(vendor.id.as_str());
        assert_eq!(Some("Nowhere"), stored.address.as_deref());
        assert_eq!(None, stored.location);
        assert_eq!(None, stored.neighborhood);
    }

    #[test]
    fn notify_staff_about_new_vendor() {
        let fixture = BackendFixture::new();
        fixture.create_user("alice", Some("alice@example.org"), Role::User);
        fixture.create_user("bob", Some("bob@vegphilly.com"), Role::Staff);
        fixture.create_user("carol", None, Role::Admin);
        fixture.create_user("dave", Some("dave@vegphilly.com"), Role::Admin);
        let vendor = fixture.create_vendor(new_vendor("Vedge")).unwrap();
        let sent = fixture.notify.sent();
        assert_eq!(1, sent.len());
        assert_eq!(NotificationType::VendorSubmitted, sent[0].kind);
        assert_eq!(vendor.id, sent[0].vendor_id);
        assert_eq!(
            vec!["bob@vegphilly.com", "dave@vegphilly.com"],
            sent[0].recipients
        );
    }

    #[test]
    fn index_new_vendor() {
        let fixture = BackendFixture::new();
        let vendor = fixture
            .create_vendor(usecases::NewVendor {
                notes: Some("Seitan cheesesteaks".into()),
                ..new_vendor("Blackbird")
            })
            .unwrap();
        assert_eq!(
            vec![vendor.id],
            fixture.query_ids(IndexedKind::Vendor, "seitan")
        );
    }

    #[test]
    fn reject_duplicate_names_without_notification() {
        let fixture = BackendFixture::new();
        fixture.create_user("bob", Some("bob@vegphilly.com"), Role::Staff);
        fixture.create_vendor(new_vendor("Vedge")).unwrap();
        let err = fixture.create_vendor(new_vendor("Vedge")).unwrap_err();
        assert!(matches!(
            err.parameter_error(),
            Some(usecases::Error::VendorExists)
        ));
        assert_eq!(1, fixture.notify.sent().len());
        assert_eq!(1, fixture.db_connections.shared().unwrap().count_vendors().unwrap());
    }
}
