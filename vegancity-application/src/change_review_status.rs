use super::*;

/// Moderates a review by changing only its approval status.
pub fn change_review_status(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    id: &str,
    status: ApprovalStatus,
) -> Result<Review> {
    let review = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_review_status_change(conn, id, status)?;
        usecases::store_updated_review(conn, storable)
    })?;
    reindex_review(indexer, &review);
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn approve_review_without_notification() {
        let fixture = BackendFixture::new();
        let alice = fixture.create_user("alice", Some("alice@example.org"), Role::User);
        let vendor = fixture.create_vendor(new_vendor("Vedge")).unwrap();
        let review = fixture
            .create_review(new_review(&vendor, &alice, "Good"))
            .unwrap();
        let approved = fixture
            .change_review_status(review.id.as_str(), ApprovalStatus::Approved)
            .unwrap();
        assert!(approved.is_approved());
        assert!(fixture
            .notify
            .sent()
            .iter()
            .all(|n| n.kind != NotificationType::VendorApproved));
    }

    #[test]
    fn moderate_missing_review() {
        let fixture = BackendFixture::new();
        assert!(fixture
            .change_review_status("unknown", ApprovalStatus::Approved)
            .is_err());
    }
}
