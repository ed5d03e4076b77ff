use thiserror::Error;

// WGS-84 reference ellipsoid.
const SEMI_MAJOR_AXIS_KM: f64 = 6378.137;
const FLATTENING: f64 = 1.0 / 298.257_223_563;

// Mean Earth radius for the spherical fallback.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographical position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Latitude/longitude out of range")]
pub struct MapPointOutOfRange;

impl MapPoint {
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, MapPointOutOfRange> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(MapPointOutOfRange);
        }
        Ok(Self { lat, lng })
    }
}

/// Geodesic distance in kilometers on the WGS-84 ellipsoid.
///
/// Uses the Vincenty inverse formula. The iteration fails to converge for
/// nearly antipodal points; those fall back to the spherical great-circle
/// distance, which is accurate enough at that scale.
pub fn distance_km(a: MapPoint, b: MapPoint) -> f64 {
    vincenty_km(a, b).unwrap_or_else(|| haversine_km(a, b))
}

fn vincenty_km(p1: MapPoint, p2: MapPoint) -> Option<f64> {
    let a = SEMI_MAJOR_AXIS_KM;
    let f = FLATTENING;
    let b = a * (1.0 - f);

    let l = (p2.lng - p1.lng).to_radians();
    let u1 = ((1.0 - f) * p1.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * p2.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..200 {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            // both points on the equator
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let prev_lambda = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)));
        if (lambda - prev_lambda).abs() < 1e-12 {
            let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
            let coef_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let coef_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = coef_b
                * sin_sigma
                * (cos_2sigma_m
                    + coef_b / 4.0
                        * (cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)
                            - coef_b / 6.0
                                * cos_2sigma_m
                                * (4.0 * sin_sigma * sin_sigma - 3.0)
                                * (4.0 * cos_2sigma_m * cos_2sigma_m - 3.0)));
            return Some(b * coef_a * (sigma - delta_sigma));
        }
    }
    None
}

fn haversine_km(p1: MapPoint, p2: MapPoint) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let dlat = (p2.lat - p1.lat).to_radians();
    let dlng = (p2.lng - p1.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
