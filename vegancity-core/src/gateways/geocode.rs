use vegancity_entities::geo::MapPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub pos: MapPoint,
    pub neighborhood: Option<String>,
}

pub trait GeoCodingGateway {
    /// Returns `None` if the address could not be resolved.
    fn resolve_address(&self, address: &str) -> Option<GeocodedAddress>;
}
