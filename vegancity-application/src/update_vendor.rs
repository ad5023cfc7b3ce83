use super::*;

pub fn update_vendor(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    geo: &dyn GeoCodingGateway,
    notify: &dyn NotificationGateway,
    id: &str,
    update: usecases::UpdateVendor,
) -> Result<Vendor> {
    let updated = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_updated_vendor(conn, geo, id, update)?;
        usecases::store_updated_vendor(conn, storable).map_err(|err| {
            warn!("Failed to store updated vendor: {}", err);
            err
        })
    })?;
    after_vendor_updated(connections, indexer, notify, updated)
}

/// Reindexes the vendor and notifies the submitter after
/// the initial approval.
pub(crate) fn after_vendor_updated(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    notify: &dyn NotificationGateway,
    updated: usecases::UpdatedVendor,
) -> Result<Vendor> {
    let usecases::UpdatedVendor {
        vendor,
        initially_approved,
    } = updated;

    reindex_vendor(indexer, &vendor);

    if initially_approved {
        if let Err(err) = notify_vendor_approved(connections, notify, &vendor) {
            error!(
                "Failed to send notification for approved vendor {}: {}",
                vendor.id, err
            );
        }
    }

    Ok(vendor)
}

fn notify_vendor_approved(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    vendor: &Vendor,
) -> Result<()> {
    let email_address = usecases::submitter_email_address(&connections.shared()?, vendor)?;
    if let Some(email_address) = email_address {
        notify.notify(NotificationEvent::VendorApproved {
            vendor,
            email_address: &email_address,
        });
    } else {
        debug!("No e-mail address of the submitter of vendor {}", vendor.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn geocode_changed_address() {
        let fixture = BackendFixture::new();
        fixture.geo.set("1221 Locust St", (39.94, -75.16), Some("Center City"));
        let vendor = fixture.create_vendor(new_vendor("Vedge")).unwrap();
        assert_eq!(None, vendor.location);
        let id = vendor.id.clone();
        let updated = fixture
            .update_vendor(
                id.as_str(),
                usecases::UpdateVendor {
                    address: Some("1221 Locust St".into()),
                    ..vendor.into()
                },
            )
            .unwrap();
        assert_eq!(
            Some(MapPoint::from_lat_lng_deg(39.94, -75.16)),
            updated.location
        );
        assert!(updated.neighborhood.is_some());
        assert_eq!(1, fixture.geo.requests());

        // Unchanged address
        let updated = fixture
            .update_vendor(
                updated.id.as_str(),
                usecases::UpdateVendor {
                    notes: Some("Upscale".into()),
                    ..updated.clone().into()
                },
            )
            .unwrap();
        assert_eq!(1, fixture.geo.requests());
        assert!(updated.location.is_some());
    }

    #[test]
    fn notify_submitter_only_once() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice", Some("alice@example.org"), Role::User);
        let vendor = fixture
            .create_vendor(usecases::NewVendor {
                submitted_by: Some(alice.id.to_string()),
                ..new_vendor("Vedge")
            })
            .unwrap();
        let id = vendor.id.as_str();
        for status in [
            ApprovalStatus::Approved,
            ApprovalStatus::Quarantined,
            ApprovalStatus::Approved,
            ApprovalStatus::Approved,
        ] {
            let vendor = fixture.get_vendor(id);
            fixture
                .update_vendor(
                    id,
                    usecases::UpdateVendor {
                        approval_status: status,
                        ..vendor.into()
                    },
                )
                .unwrap();
        }
        let approvals: Vec<_> = fixture
            .notify
            .sent()
            .into_iter()
            .filter(|n| n.kind == NotificationType::VendorApproved)
            .collect();
        assert_eq!(1, approvals.len());
        assert_eq!(vec!["alice@example.org"], approvals[0].recipients);
    }

    #[test]
    fn keep_stored_status_if_returning_to_pending() {
        let fixture = BackendFixture::new();
        let vendor = fixture.create_vendor(new_vendor("Vedge")).unwrap();
        let id = vendor.id.as_str();
        fixture
            .change_vendor_status(id, ApprovalStatus::Approved)
            .unwrap();
        let approved = fixture.get_vendor(id);
        let err = fixture
            .update_vendor(
                id,
                usecases::UpdateVendor {
                    name: "Vedge Restaurant".into(),
                    approval_status: ApprovalStatus::Pending,
                    ..approved.clone().into()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err.parameter_error(),
            Some(usecases::Error::ReturnToPending(_))
        ));
        let stored = fixture.get_vendor(id);
        assert_eq!(ApprovalStatus::Approved, stored.approval_status);
        assert_eq!("Vedge", stored.name);
    }

    #[test]
    fn update_missing_vendor() {
        let fixture = BackendFixture::new();
        let vendor = Vendor::build().name("Vedge").finish();
        let err = fixture
            .update_vendor(vendor.id.as_str(), vendor.clone().into())
            .unwrap_err();
        assert!(matches!(
            err.parameter_error(),
            Some(usecases::Error::VendorDoesNotExist)
        ));
    }
}
