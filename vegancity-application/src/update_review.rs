use super::*;

pub fn update_review(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    id: &str,
    update: usecases::UpdateReview,
) -> Result<Review> {
    let review = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_updated_review(conn, id, update)?;
        usecases::store_updated_review(conn, storable).map_err(|err| {
            warn!("Failed to store updated review: {}", err);
            err
        })
    })?;
    reindex_review(indexer, &review);
    Ok(review)
}
