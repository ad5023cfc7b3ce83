use super::*;

/// Moderates a vendor by changing only its approval status.
pub fn change_vendor_status(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    geo: &dyn GeoCodingGateway,
    notify: &dyn NotificationGateway,
    id: &str,
    status: ApprovalStatus,
) -> Result<Vendor> {
    let updated = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_vendor_status_change(conn, geo, id, status)?;
        usecases::store_updated_vendor(conn, storable)
    })?;
    update_vendor::after_vendor_updated(connections, indexer, notify, updated)
}
