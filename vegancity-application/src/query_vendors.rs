use rand::Rng;

use super::*;

/// Picks one of the approved vendors without approved reviews.
pub fn random_unreviewed_vendor<G>(
    connections: &sqlite::Connections,
    rng: &mut G,
) -> Result<Option<Vendor>>
where
    G: Rng + ?Sized,
{
    let db = connections.shared()?;
    Ok(usecases::get_random_unreviewed(&db, rng)?)
}

/// Vendors and reviews that await moderation.
pub fn pending_submissions(connections: &sqlite::Connections) -> Result<(Vec<Vendor>, Vec<Review>)> {
    let db = connections.shared()?;
    let vendors = usecases::pending_vendors(&db)?;
    let reviews = usecases::pending_reviews(&db)?;
    Ok((vendors, reviews))
}
