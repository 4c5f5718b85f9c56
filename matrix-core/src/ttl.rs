//! Adaptive time-to-live derived from response content.
//!
//! Long routes change slowly relative to how often anyone re-asks about
//! them, so they earn the longer end of the expiry band; short local hops
//! refresh sooner. The mapping is a heuristic that trades a little
//! staleness for fewer metered upstream calls.

use std::time::Duration;

use crate::domain::MatrixResponse;

pub const MIN_TTL: Duration = Duration::from_secs(5 * 60);
pub const MAX_TTL: Duration = Duration::from_secs(10 * 60);

/// Assumed average when a payload carries no successful elements, so the
/// policy stays total instead of dividing by zero.
const DEFAULT_DISTANCE_METERS: f64 = 50_000.0;

/// Computes the expiry for a payload: one millisecond per ten meters of
/// average successful-pair distance, clamped to [`MIN_TTL`, `MAX_TTL`].
/// Never fails; malformed or empty shapes fall back to the default
/// distance assumption.
pub fn compute_ttl(response: &MatrixResponse) -> Duration {
    let average = average_distance_meters(response);
    Duration::from_millis((average / 10.0) as u64).clamp(MIN_TTL, MAX_TTL)
}

fn average_distance_meters(response: &MatrixResponse) -> f64 {
    let mut total: u64 = 0;
    let mut count: u64 = 0;

    for row in &response.rows {
        for element in &row.elements {
            if !element.is_ok() {
                continue;
            }
            if let Some(distance) = &element.distance {
                total += distance.value;
                count += 1;
            }
        }
    }

    if count == 0 {
        DEFAULT_DISTANCE_METERS
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatrixElement, MatrixRow, TextValue};

    fn response_with_distances(meters: &[u64]) -> MatrixResponse {
        let elements = meters
            .iter()
            .map(|&value| MatrixElement {
                status: "OK".to_string(),
                distance: Some(TextValue {
                    text: format!("{} m", value),
                    value,
                }),
                duration: None,
            })
            .collect();

        MatrixResponse {
            status: "OK".to_string(),
            origin_addresses: vec![],
            destination_addresses: vec![],
            rows: vec![MatrixRow { elements }],
        }
    }

    fn empty_response() -> MatrixResponse {
        MatrixResponse {
            status: "OK".to_string(),
            origin_addresses: vec![],
            destination_addresses: vec![],
            rows: vec![],
        }
    }

    #[test]
    fn short_route_clamps_to_lower_bound() {
        // 200 km maps to 20 s raw, far below the floor.
        let ttl = compute_ttl(&response_with_distances(&[200_000]));
        assert_eq!(ttl, MIN_TTL);
    }

    #[test]
    fn long_route_lands_inside_the_band() {
        // 4,000,000 m maps to 400 s, between the bounds.
        let ttl = compute_ttl(&response_with_distances(&[4_000_000]));
        assert_eq!(ttl, Duration::from_secs(400));
    }

    #[test]
    fn extreme_route_clamps_to_upper_bound() {
        let ttl = compute_ttl(&response_with_distances(&[40_000_000]));
        assert_eq!(ttl, MAX_TTL);
    }

    #[test]
    fn empty_payload_uses_default_distance() {
        // 50 km default maps to 5 s raw, so the floor applies.
        assert_eq!(compute_ttl(&empty_response()), MIN_TTL);
    }

    #[test]
    fn failed_elements_do_not_skew_the_average() {
        let mut response = response_with_distances(&[4_000_000]);
        response.rows[0].elements.push(MatrixElement {
            status: "ZERO_RESULTS".to_string(),
            distance: Some(TextValue {
                text: "0 m".to_string(),
                value: 0,
            }),
            duration: None,
        });

        assert_eq!(compute_ttl(&response), Duration::from_secs(400));
    }

    #[test]
    fn ttl_always_stays_within_bounds() {
        for meters in [0, 1, 50_000, 200_000, 3_000_000, u64::from(u32::MAX)] {
            let ttl = compute_ttl(&response_with_distances(&[meters]));
            assert!((MIN_TTL..=MAX_TTL).contains(&ttl), "ttl out of band for {meters}");
        }
    }
}
