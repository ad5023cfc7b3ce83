use super::*;

pub fn create_tag(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
    new_tag: usecases::NewTag,
) -> Result<Tag> {
    let tag = connections
        .exclusive()?
        .transaction(|conn| usecases::create_tag(conn, new_tag))?;
    if let Err(err) = indexer
        .add_or_update_tag(&tag)
        .and_then(|()| indexer.flush_index())
    {
        error!("Failed to reindex tag {}: {}", tag.id, err);
    }
    Ok(tag)
}
