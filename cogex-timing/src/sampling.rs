//! Mapping event onsets onto a discretised signal timeline.
//!
//! Onsets are converted to seconds before being multiplied by a sampling
//! rate in Hz, so a 100 ms onset at 100 Hz lands on sample 10.

use cogex_core::{Event, ScheduleError, ScheduleResult};
use std::time::Duration;
use tracing::debug;

/// Samples per second of the signal the events are aligned to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingRate(f64);

impl SamplingRate {
    pub fn new(hz: f64) -> ScheduleResult<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ScheduleError::invalid(format!(
                "sampling rate must be a positive finite number of Hz, got {hz}"
            )));
        }
        Ok(Self(hz))
    }

    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Nearest sample index for a time offset, rounding halves away from zero.
    ///
    /// `None` when the index does not fit in a `u64`.
    pub fn sample_at(&self, offset: Duration) -> Option<u64> {
        let sample = (offset.as_secs_f64() * self.0).round();
        // u64::MAX as f64 rounds up to 2^64, which is already out of range
        (sample < u64::MAX as f64).then_some(sample as u64)
    }
}

/// Sample index of every event onset, in event order.
pub fn sample_onsets(events: &[Event], sampling_rate: f64) -> ScheduleResult<Vec<u64>> {
    let rate = SamplingRate::new(sampling_rate)?;
    debug!(events = events.len(), hz = rate.hz(), "converting onsets to samples");
    events
        .iter()
        .map(|e| {
            rate.sample_at(e.onset()).ok_or_else(|| {
                ScheduleError::invalid(format!(
                    "onset {:?} at {} Hz is past the last representable sample",
                    e.onset(),
                    rate.hz()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn events_at(onsets_ms: &[u64]) -> Vec<Event> {
        onsets_ms
            .iter()
            .map(|&ms| Event::new(Duration::from_millis(ms), Duration::from_millis(100), "A"))
            .collect()
    }

    #[test]
    fn converts_seconds_to_samples() {
        let events = events_at(&[100, 300, 500]);
        let samples = sample_onsets(&events, 100.0).unwrap();
        assert_eq!(samples, vec![10, 30, 50]);
    }

    #[test]
    fn rounds_to_nearest_sample() {
        let events = events_at(&[0, 1, 2, 3]);
        // 1 ms at 250 Hz is 0.25 samples, 2 ms is 0.5, 3 ms is 0.75
        let samples = sample_onsets(&events, 250.0).unwrap();
        assert_eq!(samples, vec![0, 0, 1, 1]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(sample_onsets(&[], 512.0).unwrap().is_empty());
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        let events = events_at(&[100]);
        for hz in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = sample_onsets(&events, hz).unwrap_err();
            assert!(err.is_invalid_argument(), "{hz} accepted");
        }
    }

    #[test]
    fn out_of_range_samples_are_rejected() {
        let events = vec![Event::new(Duration::from_secs(u64::MAX / 2), Duration::from_secs(1), "A")];
        let err = sample_onsets(&events, 1e6).unwrap_err();
        assert!(err.is_invalid_argument());

        let rate = SamplingRate::new(1e6).unwrap();
        assert_eq!(rate.sample_at(Duration::from_secs(2)), Some(2_000_000));
        assert_eq!(rate.sample_at(Duration::from_secs(u64::MAX / 2)), None);
    }

    proptest! {
        #[test]
        fn scaling_rate_scales_samples(
            onsets in proptest::collection::vec(0u64..600_000, 1..50),
            hz in 1u32..2_000,
            k in 1u32..8,
        ) {
            let events = events_at(&onsets);
            let base = sample_onsets(&events, hz as f64).unwrap();
            let scaled = sample_onsets(&events, (hz * k) as f64).unwrap();
            for (b, s) in base.iter().zip(&scaled) {
                let expected = b * k as u64;
                // each side rounds independently
                prop_assert!(s.abs_diff(expected) <= k as u64);
            }
        }
    }
}
