use super::*;

/// Rebuilds the full-text index from scratch.
pub fn reindex_all(
    connections: &sqlite::Connections,
    indexer: &mut dyn SearchIndexer,
) -> Result<usize> {
    let db = connections.shared()?;
    let count = usecases::reindex_all(&db, indexer)?;
    Ok(count)
}
