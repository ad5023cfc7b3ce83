use std::collections::HashSet;

use super::*;

/// Searches approved vendors by address, text, tags and reviews.
pub fn search_vendors(
    connections: &sqlite::Connections,
    geo: &dyn GeoCodingGateway,
    index: &dyn IdIndex,
    query: &str,
    initial_candidates: Option<&HashSet<Id>>,
) -> Result<Vec<Vendor>> {
    let db = connections.shared()?;
    Ok(usecases::master_search(
        &db,
        geo,
        index,
        query,
        initial_candidates,
    )?)
}
