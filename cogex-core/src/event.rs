use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One scheduled stimulus or trial.
///
/// Onset is measured from the start of the task. The record is immutable
/// once built; generators hand ownership of the whole sequence to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    #[serde(with = "seconds")]
    onset: Duration,
    #[serde(with = "seconds")]
    duration: Duration,
    trial_type: String,
}

impl Event {
    pub fn new(onset: Duration, duration: Duration, trial_type: impl Into<String>) -> Self {
        Self {
            onset,
            duration,
            trial_type: trial_type.into(),
        }
    }

    pub fn onset(&self) -> Duration {
        self.onset
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn trial_type(&self) -> &str {
        &self.trial_type
    }

    /// Time at which the event finishes.
    pub fn end(&self) -> Duration {
        self.onset.saturating_add(self.duration)
    }
}

/// Durations are written as fractional seconds.
mod seconds {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_event_is_empty() {
        let event = Event::default();
        assert_eq!(event.onset(), Duration::ZERO);
        assert_eq!(event.duration(), Duration::ZERO);
        assert_eq!(event.trial_type(), "");
    }

    #[test]
    fn accessors_return_constructed_values() {
        let event = Event::new(Duration::from_millis(100), Duration::from_millis(200), "test");
        assert_eq!(event.onset(), Duration::from_millis(100));
        assert_eq!(event.duration(), Duration::from_millis(200));
        assert_eq!(event.trial_type(), "test");
        assert_eq!(event.end(), Duration::from_millis(300));
    }

    #[test]
    fn serializes_times_as_seconds() {
        let event = Event::new(Duration::from_millis(1500), Duration::from_millis(250), "go");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "onset": 1.5, "duration": 0.25, "trial_type": "go" })
        );

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn negative_seconds_do_not_deserialize() {
        let json = serde_json::json!({ "onset": -1.0, "duration": 0.25, "trial_type": "go" });
        assert!(serde_json::from_value::<Event>(json).is_err());
    }
}
