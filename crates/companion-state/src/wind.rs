//! Wind derivation for the companion's current location.
//!
//! Pure and read-only: the client polls this to animate hair and cloth.
//! A location is outdoors when it is one of the built-in outdoor slugs or
//! the world document flags it `is_outdoor`. Indoors there is no wind.

use companion_types::{LocationId, StateDocument, WindState, WorldDocument};

/// Locations that are always outdoors, whatever the world document says.
pub const OUTDOOR_LOCATIONS: [&str; 7] = [
    "balcony",
    "rooftop",
    "park",
    "beach",
    "mountain",
    "street",
    "flower_spot",
];

/// Direction of all outdoor wind.
pub const OUTDOOR_DIRECTION: [f64; 2] = [0.8, 0.2];

/// Direction reported indoors.
pub const INDOOR_DIRECTION: [f64; 2] = [1.0, 0.0];

/// Speed and gustiness for an outdoor location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindProfile {
    /// Base wind speed.
    pub speed: f64,
    /// How irregular the wind is.
    pub gustiness: f64,
}

impl WindProfile {
    /// Profile for `location`, or the default breeze for locations
    /// without a dedicated profile.
    pub fn for_location(location: &LocationId) -> Self {
        let (speed, gustiness) = match location.as_str() {
            "beach" => (0.5, 0.4),
            "mountain" => (0.7, 0.6),
            "rooftop" => (0.4, 0.3),
            "park" => (0.2, 0.2),
            _ => (0.15, 0.15),
        };
        Self { speed, gustiness }
    }
}

/// Whether `location` is exposed to the wind.
pub fn is_outdoor(location: &LocationId, world: &WorldDocument) -> bool {
    OUTDOOR_LOCATIONS.contains(&location.as_str())
        || world.location(location).is_some_and(|info| info.is_outdoor)
}

/// Wind at `location`.
pub fn wind_at(location: &LocationId, world: &WorldDocument) -> WindState {
    if !is_outdoor(location, world) {
        return WindState {
            speed: 0.0,
            direction: INDOOR_DIRECTION,
            gustiness: 0.0,
            is_outdoor: false,
            location: None,
        };
    }

    let profile = WindProfile::for_location(location);
    WindState {
        speed: profile.speed,
        direction: OUTDOOR_DIRECTION,
        gustiness: profile.gustiness,
        is_outdoor: true,
        location: Some(location.clone()),
    }
}

/// Wind at the companion's current location.
pub fn derive_wind(state: &StateDocument, world: &WorldDocument) -> WindState {
    wind_at(&state.location, world)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use companion_types::LocationInfo;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn state_at(slug: &str) -> StateDocument {
        StateDocument {
            location: LocationId::from(slug),
            ..StateDocument::default()
        }
    }

    #[test]
    fn beach_is_windy() {
        let wind = derive_wind(&state_at("beach"), &WorldDocument::default());
        assert!(close(wind.speed, 0.5));
        assert!(close(wind.gustiness, 0.4));
        assert!(wind.is_outdoor);
        assert_eq!(wind.direction, OUTDOOR_DIRECTION);
        assert_eq!(wind.location, Some(LocationId::from("beach")));
    }

    #[test]
    fn bedroom_is_still() {
        let wind = derive_wind(&state_at("bedroom"), &WorldDocument::default());
        assert!(close(wind.speed, 0.0));
        assert!(close(wind.gustiness, 0.0));
        assert!(!wind.is_outdoor);
        assert_eq!(wind.direction, INDOOR_DIRECTION);
        assert!(wind.location.is_none());
    }

    #[test]
    fn fixed_outdoor_without_profile_gets_default() {
        let wind = derive_wind(&state_at("street"), &WorldDocument::default());
        assert!(wind.is_outdoor);
        assert!(close(wind.speed, 0.15));
        assert!(close(wind.gustiness, 0.15));
    }

    #[test]
    fn world_flag_marks_location_outdoor() {
        let mut world = WorldDocument::default();
        world.locations.insert(
            LocationId::from("garden"),
            LocationInfo {
                is_outdoor: true,
                ..LocationInfo::default()
            },
        );
        world
            .locations
            .insert(LocationId::from("studio"), LocationInfo::default());

        let garden = derive_wind(&state_at("garden"), &world);
        assert!(garden.is_outdoor);
        assert!(close(garden.speed, 0.15));

        let studio = derive_wind(&state_at("studio"), &world);
        assert!(!studio.is_outdoor);
    }

    #[test]
    fn fixed_set_wins_over_world_flag() {
        let world: WorldDocument =
            serde_json::from_str(r#"{"locations":{"mountain":{"is_outdoor":false}}}"#).unwrap();
        let wind = derive_wind(&state_at("mountain"), &world);
        assert!(wind.is_outdoor);
        assert!(close(wind.speed, 0.7));
        assert!(close(wind.gustiness, 0.6));
    }

    #[test]
    fn profiles() {
        let rooftop = WindProfile::for_location(&LocationId::from("rooftop"));
        assert!(close(rooftop.speed, 0.4) && close(rooftop.gustiness, 0.3));
        let park = WindProfile::for_location(&LocationId::from("park"));
        assert!(close(park.speed, 0.2) && close(park.gustiness, 0.2));
    }
}
