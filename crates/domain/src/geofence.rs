//! Location-verification gate for resolution proof submissions.
//!
//! A staff member's claimed device position is trusted only when its reported
//! horizontal accuracy is fine enough to have come from real GPS hardware.
//! Coarse network or VPN-exit positioning reports accuracy figures in the
//! thousands of meters and is rejected outright, regardless of distance.

use civicdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters used by the great-circle distance calculation.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

const DEFAULT_MAX_ACCURACY_METERS: f64 = 500.0;
const DEFAULT_MAX_RADIUS_METERS: f64 = 200.0;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a validated coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::Validation(format!(
                "latitude must be a finite value between -90 and 90, got {latitude}"
            )));
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::Validation(format!(
                "longitude must be a finite value between -180 and 180, got {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One device position reading supplied by the caller at proof submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionClaim {
    coordinates: Coordinates,
    accuracy_meters: f64,
}

impl PositionClaim {
    /// Creates a validated position claim.
    pub fn new(coordinates: Coordinates, accuracy_meters: f64) -> AppResult<Self> {
        if !accuracy_meters.is_finite() || accuracy_meters < 0.0 {
            return Err(AppError::Validation(format!(
                "accuracy must be a finite non-negative meter value, got {accuracy_meters}"
            )));
        }

        Ok(Self {
            coordinates,
            accuracy_meters,
        })
    }

    /// Returns the claimed device coordinates.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the reported horizontal accuracy in meters.
    #[must_use]
    pub fn accuracy_meters(&self) -> f64 {
        self.accuracy_meters
    }
}

/// Outcome category of a geofence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceVerdict {
    /// The claim is trustworthy and close enough to the issue location.
    Verified,
    /// The reported accuracy is too coarse to have come from device GPS.
    TooInaccurate,
    /// The claimed position is outside the allowed radius of the issue.
    TooFar,
}

impl GeofenceVerdict {
    /// Returns a stable transport value for this verdict.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::TooInaccurate => "too_inaccurate",
            Self::TooFar => "too_far",
        }
    }
}

/// Result of evaluating one position claim against a report's location.
///
/// Transient value, never persisted. The measured accuracy and distance are
/// carried so callers can render precise messages ("you are 430 m away").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheckResult {
    verdict: GeofenceVerdict,
    accuracy_meters: f64,
    distance_meters: Option<f64>,
}

impl GeofenceCheckResult {
    /// Returns the check verdict.
    #[must_use]
    pub fn verdict(&self) -> GeofenceVerdict {
        self.verdict
    }

    /// Returns the reported accuracy the check evaluated.
    #[must_use]
    pub fn accuracy_meters(&self) -> f64 {
        self.accuracy_meters
    }

    /// Returns the measured distance to the issue, when the report has
    /// target coordinates.
    #[must_use]
    pub fn distance_meters(&self) -> Option<f64> {
        self.distance_meters
    }
}

impl std::fmt::Display for GeofenceCheckResult {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.verdict, self.distance_meters) {
            (GeofenceVerdict::Verified, Some(distance)) => {
                write!(formatter, "position verified {distance:.0} m from the issue")
            }
            (GeofenceVerdict::Verified, None) => write!(formatter, "position verified"),
            (GeofenceVerdict::TooInaccurate, _) => write!(
                formatter,
                "reported accuracy of {:.0} m is too coarse to trust",
                self.accuracy_meters
            ),
            (GeofenceVerdict::TooFar, Some(distance)) => {
                write!(formatter, "claimed position is {distance:.0} m from the issue")
            }
            (GeofenceVerdict::TooFar, None) => {
                write!(formatter, "claimed position is outside the allowed radius")
            }
        }
    }
}

/// Great-circle distance in meters between two coordinate pairs (haversine).
#[must_use]
pub fn haversine_distance_meters(from: Coordinates, to: Coordinates) -> f64 {
    let from_lat = from.latitude().to_radians();
    let to_lat = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Thresholds governing when a position claim counts as verified presence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofencePolicy {
    max_accuracy_meters: f64,
    max_radius_meters: f64,
}

impl GeofencePolicy {
    /// Creates a policy with custom thresholds.
    pub fn new(max_accuracy_meters: f64, max_radius_meters: f64) -> AppResult<Self> {
        if !max_accuracy_meters.is_finite() || max_accuracy_meters <= 0.0 {
            return Err(AppError::Validation(
                "maximum accuracy threshold must be a positive meter value".to_owned(),
            ));
        }

        if !max_radius_meters.is_finite() || max_radius_meters <= 0.0 {
            return Err(AppError::Validation(
                "maximum radius threshold must be a positive meter value".to_owned(),
            ));
        }

        Ok(Self {
            max_accuracy_meters,
            max_radius_meters,
        })
    }

    /// Returns the accuracy threshold above which claims are rejected.
    #[must_use]
    pub fn max_accuracy_meters(&self) -> f64 {
        self.max_accuracy_meters
    }

    /// Returns the allowed radius around the issue location.
    #[must_use]
    pub fn max_radius_meters(&self) -> f64 {
        self.max_radius_meters
    }

    /// Evaluates one position claim against an optional target position.
    ///
    /// Fails closed on coarse accuracy before any distance math. Reports
    /// created without coordinates skip the distance check but still pass
    /// through the accuracy gate.
    #[must_use]
    pub fn evaluate(
        &self,
        claim: &PositionClaim,
        target: Option<Coordinates>,
    ) -> GeofenceCheckResult {
        let accuracy_meters = claim.accuracy_meters();

        if accuracy_meters > self.max_accuracy_meters {
            return GeofenceCheckResult {
                verdict: GeofenceVerdict::TooInaccurate,
                accuracy_meters,
                distance_meters: None,
            };
        }

        let Some(target) = target else {
            return GeofenceCheckResult {
                verdict: GeofenceVerdict::Verified,
                accuracy_meters,
                distance_meters: None,
            };
        };

        let distance_meters = haversine_distance_meters(claim.coordinates(), target);
        let verdict = if distance_meters <= self.max_radius_meters {
            GeofenceVerdict::Verified
        } else {
            GeofenceVerdict::TooFar
        };

        GeofenceCheckResult {
            verdict,
            accuracy_meters,
            distance_meters: Some(distance_meters),
        }
    }
}

impl Default for GeofencePolicy {
    fn default() -> Self {
        Self {
            max_accuracy_meters: DEFAULT_MAX_ACCURACY_METERS,
            max_radius_meters: DEFAULT_MAX_RADIUS_METERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinates, GeofencePolicy, GeofenceVerdict, PositionClaim, haversine_distance_meters};

    fn coordinates(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap_or_else(|_| unreachable!())
    }

    fn claim(latitude: f64, longitude: f64, accuracy_meters: f64) -> PositionClaim {
        PositionClaim::new(coordinates(latitude, longitude), accuracy_meters)
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn coordinates_reject_out_of_range_latitude() {
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn claim_rejects_negative_accuracy() {
        assert!(PositionClaim::new(coordinates(0.0, 0.0), -1.0).is_err());
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let distance = haversine_distance_meters(coordinates(0.0, 0.0), coordinates(0.0, 1.0));
        assert!((distance - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn coarse_accuracy_fails_closed_even_at_zero_distance() {
        let result = GeofencePolicy::default().evaluate(
            &claim(12.9716, 77.5946, 1_000.0),
            Some(coordinates(12.9716, 77.5946)),
        );

        assert_eq!(result.verdict(), GeofenceVerdict::TooInaccurate);
        assert_eq!(result.distance_meters(), None);
    }

    #[test]
    fn accuracy_at_the_threshold_still_passes() {
        let result = GeofencePolicy::default().evaluate(
            &claim(12.9716, 77.5946, 500.0),
            Some(coordinates(12.9716, 77.5946)),
        );

        assert_eq!(result.verdict(), GeofenceVerdict::Verified);
    }

    #[test]
    fn claim_150_meters_north_is_verified() {
        let result = GeofencePolicy::default().evaluate(
            &claim(12.972949, 77.5946, 20.0),
            Some(coordinates(12.9716, 77.5946)),
        );

        assert_eq!(result.verdict(), GeofenceVerdict::Verified);
        let distance = result.distance_meters().unwrap_or_default();
        assert!((distance - 150.0).abs() <= 5.0);
    }

    #[test]
    fn claim_five_kilometers_away_is_too_far() {
        let result = GeofencePolicy::default().evaluate(
            &claim(13.016566, 77.5946, 20.0),
            Some(coordinates(12.9716, 77.5946)),
        );

        assert_eq!(result.verdict(), GeofenceVerdict::TooFar);
        let distance = result.distance_meters().unwrap_or_default();
        assert!((distance - 5_000.0).abs() <= 20.0);
    }

    #[test]
    fn missing_target_skips_the_distance_check_only() {
        let policy = GeofencePolicy::default();

        let fine = policy.evaluate(&claim(12.9716, 77.5946, 35.0), None);
        assert_eq!(fine.verdict(), GeofenceVerdict::Verified);
        assert_eq!(fine.distance_meters(), None);

        let coarse = policy.evaluate(&claim(12.9716, 77.5946, 8_000.0), None);
        assert_eq!(coarse.verdict(), GeofenceVerdict::TooInaccurate);
    }

    #[test]
    fn policy_rejects_non_positive_thresholds() {
        assert!(GeofencePolicy::new(0.0, 200.0).is_err());
        assert!(GeofencePolicy::new(500.0, -10.0).is_err());
    }
}
