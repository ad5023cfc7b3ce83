use geocoding::{InputBounds, Opencage, Point};
use vegancity_core::{
    entities::*,
    gateways::geocode::{GeocodedAddress, GeoCodingGateway},
};

/// Result components that name the neighborhood, in order of preference.
const NEIGHBORHOOD_COMPONENTS: [&str; 3] = ["neighbourhood", "quarter", "suburb"];

/// Resolves addresses with the OpenCage geocoding API.
pub struct OpenCage {
    client: Opencage<'static>,
    bounds: Option<MapBbox>,
}

impl OpenCage {
    pub fn new(api_key: String, bounds: Option<MapBbox>) -> Self {
        Self {
            client: Opencage::new(api_key),
            bounds,
        }
    }
}

impl GeoCodingGateway for OpenCage {
    fn resolve_address(&self, address: &str) -> Option<GeocodedAddress> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }
        let bounds = self.bounds.as_ref().map(|bbox| {
            let sw = bbox.south_west();
            let ne = bbox.north_east();
            InputBounds::new(
                Point::new(sw.lng(), sw.lat()),
                Point::new(ne.lng(), ne.lat()),
            )
        });
        let response = match self.client.forward_full(address, bounds) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Failed to geocode address '{address}': {err}");
                return None;
            }
        };
        let Some(result) = response.results.first() else {
            log::debug!("No geocoding results for address '{address}'");
            return None;
        };
        let neighborhood = NEIGHBORHOOD_COMPONENTS
            .iter()
            .find_map(|key| result.components.get(*key).and_then(|v| v.as_str()));
        geocoded_address(
            result.geometry.get("lat").copied(),
            result.geometry.get("lng").copied(),
            neighborhood,
        )
    }
}

fn geocoded_address(
    lat: Option<f64>,
    lng: Option<f64>,
    neighborhood: Option<&str>,
) -> Option<GeocodedAddress> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        log::warn!("Ignoring incomplete geocoding result: lat = {lat:?}, lng = {lng:?}");
        return None;
    };
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng)?;
    let neighborhood = neighborhood
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned);
    Some(GeocodedAddress { pos, neighborhood })
}
