//! Canonical cache keys for matrix requests.
//!
//! Two requests over the same origin/destination sets must land on the same
//! key regardless of the order the caller listed them in, otherwise the
//! store fragments and the upstream gets called for work it already paid
//! for.

use crate::domain::MatrixRequest;

/// Joins the members of a location set. Not expected inside a location
/// string (the provider itself uses it as a list separator).
const SET_SEPARATOR: &str = "|";

/// Joins the four key segments.
const FIELD_SEPARATOR: &str = ":";

/// Builds the canonical key for a request. Pure and total: sorting is the
/// only transformation, and mode/units are enum-typed so defaults were
/// already substituted upstream of this call.
pub fn build_key(request: &MatrixRequest) -> String {
    let mut origins = request.origins.clone();
    origins.sort();
    let mut destinations = request.destinations.clone();
    destinations.sort();

    [
        origins.join(SET_SEPARATOR),
        destinations.join(SET_SEPARATOR),
        request.mode.as_str().to_string(),
        request.units.as_str().to_string(),
    ]
    .join(FIELD_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TravelMode, Units};

    #[test]
    fn key_is_invariant_under_input_order() {
        let forward = MatrixRequest::new(["A", "B", "C"], ["X", "Y"]);
        let shuffled = MatrixRequest::new(["C", "A", "B"], ["Y", "X"]);

        assert_eq!(build_key(&forward), build_key(&shuffled));
    }

    #[test]
    fn omitted_fields_match_explicit_defaults() {
        let implicit = MatrixRequest::new(["Santos, Brazil"], ["São Paulo, Brazil"]);
        let explicit = MatrixRequest::new(["Santos, Brazil"], ["São Paulo, Brazil"])
            .with_mode(TravelMode::Driving)
            .with_units(Units::Metric);

        assert_eq!(build_key(&implicit), build_key(&explicit));
    }

    #[test]
    fn mode_and_units_partition_the_key_space() {
        let driving = MatrixRequest::new(["A"], ["B"]);
        let walking = MatrixRequest::new(["A"], ["B"]).with_mode(TravelMode::Walking);
        let imperial = MatrixRequest::new(["A"], ["B"]).with_units(Units::Imperial);

        assert_ne!(build_key(&driving), build_key(&walking));
        assert_ne!(build_key(&driving), build_key(&imperial));
        assert_ne!(build_key(&walking), build_key(&imperial));
    }

    #[test]
    fn key_layout_is_stable() {
        let request = MatrixRequest::new(["B", "A"], ["C"]).with_mode(TravelMode::Transit);

        assert_eq!(build_key(&request), "A|B:C:transit:metric");
    }

    #[test]
    fn swapping_origins_and_destinations_changes_the_key() {
        let outbound = MatrixRequest::new(["A"], ["B"]);
        let inbound = MatrixRequest::new(["B"], ["A"]);

        assert_ne!(build_key(&outbound), build_key(&inbound));
    }
}
