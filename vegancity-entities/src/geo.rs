//! Planar geographic points.
//!
//! Coordinates are plain degrees without range checks. Distances are
//! measured in degrees on the (lng, lat) plane, the same way a spatial
//! database compares geometries in SRID 4326 without projection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Accepts only finite coordinates.
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self::from_lat_lng_deg(lat, lng))
        } else {
            None
        }
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// The x coordinate, i.e. the longitude.
    pub const fn x(self) -> f64 {
        self.lng
    }

    /// The y coordinate, i.e. the latitude.
    pub const fn y(self) -> f64 {
        self.lat
    }

    pub fn distance_deg(self, other: Self) -> f64 {
        (self.lng - other.lng).hypot(self.lat - other.lat)
    }

    pub fn is_within(self, other: Self, distance_deg: f64) -> bool {
        self.distance_deg(other) <= distance_deg
    }

    /// The smallest bounding box that contains all points
    /// within the given distance.
    pub fn bbox_around(self, distance_deg: f64) -> MapBbox {
        debug_assert!(distance_deg >= 0.0);
        MapBbox::new(
            Self::from_lat_lng_deg(self.lat - distance_deg, self.lng - distance_deg),
            Self::from_lat_lng_deg(self.lat + distance_deg, self.lng + distance_deg),
        )
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub const fn south_west(&self) -> MapPoint {
        self.sw
    }

    pub const fn north_east(&self) -> MapPoint {
        self.ne
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        pt.lat >= self.sw.lat
            && pt.lat <= self.ne.lat
            && pt.lng >= self.sw.lng
            && pt.lng <= self.ne.lng
    }
}
