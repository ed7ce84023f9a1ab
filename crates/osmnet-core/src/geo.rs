//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` stores double-precision WGS-84 degrees.  Edge lengths are
//! accumulated into route totals and compared for exact ties in the spatial
//! index, so single precision is not enough here.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial bearing from `self` towards `other`, in degrees `[0, 360)`
    /// clockwise from north.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let x = d_lon.sin() * lat2.cos();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        (x.atan2(y).to_degrees() + 360.0) % 360.0
    }

    /// Point reached by travelling `distance_m` from `self` along the initial
    /// bearing `bearing_deg`.
    pub fn destination(self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        if distance_m == 0.0 {
            return self;
        }
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        let lon = (lon2.to_degrees() + 540.0) % 360.0 - 180.0;
        GeoPoint::new(lat2.to_degrees(), lon)
    }

    /// Unit-sphere Cartesian coordinates scaled to metres.
    ///
    /// Chord length between two such vectors is a strictly increasing
    /// function of the great-circle distance, so nearest-neighbour order in
    /// this space equals nearest-neighbour order by haversine distance.
    pub fn to_ecef(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [
            EARTH_RADIUS_M * lat.cos() * lon.cos(),
            EARTH_RADIUS_M * lat.cos() * lon.sin(),
            EARTH_RADIUS_M * lat.sin(),
        ]
    }

    /// Closest point to `self` on the segment `a`–`b`, and its distance.
    ///
    /// Uses a local equirectangular projection around `self`, which is
    /// accurate for road-segment lengths.
    pub fn project_onto_segment(self, a: GeoPoint, b: GeoPoint) -> (GeoPoint, f64) {
        let k = self.lat.to_radians().cos();
        let (ax, ay) = ((a.lon - self.lon) * k, a.lat - self.lat);
        let (bx, by) = ((b.lon - self.lon) * k, b.lat - self.lat);
        let (dx, dy) = (bx - ax, by - ay);
        let len2 = dx * dx + dy * dy;

        let t = if len2 == 0.0 {
            0.0
        } else {
            (-(ax * dx + ay * dy) / len2).clamp(0.0, 1.0)
        };
        let snapped = GeoPoint::new(a.lat + t * (b.lat - a.lat), a.lon + t * (b.lon - a.lon));
        (snapped, self.distance_m(snapped))
    }
}

/// Signed smallest difference `to - from` between two bearings, in
/// `(-180, 180]`.  Positive means a clockwise (right-hand) change.
pub fn bearing_delta(from: f64, to: f64) -> f64 {
    let mut d = (to - from) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
