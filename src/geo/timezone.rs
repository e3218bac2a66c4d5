//! Timezone lookup from coordinates.

use chrono_tz::Tz;
use tzf_rs::DefaultFinder;

/// IANA timezone covering the coordinates, or UTC when none is found.
///
/// Building the finder loads the bundled boundary data, so this is not cheap;
/// call it once per run.
pub fn timezone_for_coordinates(latitude: f64, longitude: f64) -> Tz {
    let finder = DefaultFinder::new();
    let name = finder.get_tz_name(longitude, latitude);
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Parse an IANA name such as `Atlantic/Reykjavik`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_reykjavik() {
        assert_eq!(
            timezone_for_coordinates(64.13, -21.82),
            chrono_tz::Atlantic::Reykjavik
        );
    }

    #[test]
    fn test_detects_berlin() {
        assert_eq!(timezone_for_coordinates(52.52, 13.40), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Lisbon"), Some(chrono_tz::Europe::Lisbon));
        assert_eq!(parse_timezone("Mars/Olympus"), None);
    }
}
