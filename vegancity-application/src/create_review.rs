use super::*;

pub fn create_review(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    new_review: usecases::NewReview,
) -> Result<Review> {
    let review = connections.exclusive()?.transaction(|conn| {
        let storable = usecases::prepare_new_review(conn, new_review)?;
        usecases::store_new_review(conn, storable).map_err(|err| {
            warn!("Failed to store new review: {}", err);
            err
        })
    })?;

    // Reviews are searchable only after approval but the
    // index contains all of them.
    reindex_review(indexer, &review);

    Ok(review)
}
