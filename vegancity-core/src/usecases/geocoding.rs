use super::prelude::*;
use crate::gateways::geocode::{GeoCodingGateway, GeocodedAddress};

/// Decides whether the address of a vendor has to be resolved
/// (again) before it is stored.
///
/// `previous` is the persisted state of the vendor or `None` if
/// the vendor has never been stored.
pub fn needs_geocoding(current: &Vendor, previous: Option<&Vendor>) -> Result<bool> {
    if !current.has_address() {
        return Ok(false);
    }
    if current.location.is_none() {
        return Ok(true);
    }
    match previous {
        Some(previous) => Ok(previous.address != current.address),
        None => Err(Error::InconsistentLocation),
    }
}

/// Resolves the address of the vendor and updates both
/// location and neighborhood.
///
/// Returns `false` if the address could not be resolved. In this
/// case the vendor is left untouched.
pub fn apply_geocoding<R, G>(repo: &R, geo: &G, vendor: &mut Vendor) -> Result<bool>
where
    R: NeighborhoodRepo,
    G: GeoCodingGateway + ?Sized,
{
    let Some(address) = vendor.address.as_deref() else {
        return Ok(false);
    };
    let Some(GeocodedAddress { pos, neighborhood }) = geo.resolve_address(address) else {
        log::warn!(
            "Geocoding of '{address}' failed. Not geocoding vendor {}!",
            vendor.name
        );
        return Ok(false);
    };
    vendor.location = Some(pos);
    if let Some(name) = neighborhood {
        let neighborhood = get_or_create_neighborhood(repo, &name)?;
        vendor.neighborhood = Some(neighborhood.id);
    }
    Ok(true)
}

pub fn get_or_create_neighborhood<R>(repo: &R, name: &str) -> Result<Neighborhood>
where
    R: NeighborhoodRepo,
{
    match repo.get_neighborhood_by_name(name) {
        Ok(neighborhood) => Ok(neighborhood),
        Err(RepoError::NotFound) => {
            let neighborhood = Neighborhood {
                id: Id::new(),
                name: name.to_owned(),
                created: Timestamp::now(),
            };
            log::info!("Creating new neighborhood '{name}'");
            repo.create_neighborhood(neighborhood.clone())?;
            Ok(neighborhood)
        }
        Err(err) => Err(err.into()),
    }
}
