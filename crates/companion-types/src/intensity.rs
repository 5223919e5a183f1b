//! Touch intensity as reported by the client.
//!
//! Clients send `1`, `2` or `3`, but older builds send floats (`3.0`) and
//! some send strings. The value is kept exactly as received so it
//! round-trips through the state document; [`Intensity::level`] reads the
//! known levels out of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw intensity value from an interaction report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(pub Value);

impl Intensity {
    /// Light touch.
    pub const GENTLE: u8 = 1;
    /// Default touch strength.
    pub const MODERATE: u8 = 2;
    /// Strong touch.
    pub const INTENSE: u8 = 3;

    /// The level this value names, if it is an integral `1`, `2` or `3`.
    /// `3` and `3.0` are the same level; `2.5`, `7` and `"high"` are none.
    pub fn level(&self) -> Option<u8> {
        [Self::GENTLE, Self::MODERATE, Self::INTENSE]
            .into_iter()
            .find(|level| self.is(*level))
    }

    fn is(&self, level: u8) -> bool {
        match &self.0 {
            Value::Number(n) => n.as_u64().map_or_else(
                || {
                    n.as_f64()
                        .is_some_and(|v| (v - f64::from(level)).abs() < f64::EPSILON)
                },
                |whole| whole == u64::from(level),
            ),
            _ => false,
        }
    }
}

impl From<i64> for Intensity {
    fn from(level: i64) -> Self {
        Self(Value::from(level))
    }
}

impl From<f64> for Intensity {
    fn from(level: f64) -> Self {
        Self(Value::from(level))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn integers_and_whole_floats_name_levels() {
        assert_eq!(Intensity::from(3).level(), Some(Intensity::INTENSE));
        assert_eq!(Intensity::from(3.0).level(), Some(Intensity::INTENSE));
        assert_eq!(Intensity::from(1.0).level(), Some(Intensity::GENTLE));
        assert_eq!(Intensity::from(2).level(), Some(Intensity::MODERATE));
    }

    #[test]
    fn other_values_have_no_level() {
        assert_eq!(Intensity::from(2.5).level(), None);
        assert_eq!(Intensity::from(7).level(), None);
        assert_eq!(Intensity::from(-3).level(), None);
        assert_eq!(Intensity(Value::from("high")).level(), None);
        assert_eq!(Intensity(Value::Bool(true)).level(), None);
    }

    #[test]
    fn value_is_kept_as_received() {
        let intensity: Intensity = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(serde_json::to_string(&intensity).unwrap(), "\"high\"");

        let intensity: Intensity = serde_json::from_str("3.0").unwrap();
        assert_eq!(serde_json::to_string(&intensity).unwrap(), "3.0");
    }
}
