//! Model invocation settings shared by every agent kernel.
//!
//! Trimmed from the original provider-agnostic settings bag down to the
//! handful of fields this engine's agents actually vary: the whole roster
//! runs at a fixed, deterministic temperature, so the main knob left is an
//! optional output cap and timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default sampling temperature: deterministic, not "low but nonzero".
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

/// Per-agent model invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Sampling temperature. Defaults to [`DEFAULT_TEMPERATURE`].
    pub temperature: f64,
    /// Maximum tokens the backend may generate in one turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Per-call timeout.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "duration_as_millis_opt"
    )]
    pub timeout: Option<Duration>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout: None,
        }
    }
}

impl ModelSettings {
    /// Settings with everything at its default except `temperature`.
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }
}

mod duration_as_millis_opt {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let millis: Option<u64> = Option::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_temperature_is_deterministic() {
        assert_eq!(ModelSettings::default().temperature, 0.0);
    }

    #[test]
    fn timeout_roundtrips_through_json_as_millis() {
        let settings = ModelSettings {
            timeout: Some(Duration::from_millis(1500)),
            ..ModelSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("1500"));
        let parsed: ModelSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timeout, Some(Duration::from_millis(1500)));
    }
}
