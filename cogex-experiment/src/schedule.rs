use crate::blocks::assign_trial_types;
use cogex_core::{Event, ScheduleError, ScheduleResult, validate_catalog};
use rand::Rng;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MAX_EVENTS: usize = 100_000;
pub const DEFAULT_MAX_BLOCK_REDRAWS: usize = 1_000;

/// Work bounds applied to a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    /// Largest sequence a call may allocate.
    pub max_events: usize,
    /// Reshuffles allowed per block before giving up.
    pub max_block_redraws: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
            max_block_redraws: DEFAULT_MAX_BLOCK_REDRAWS,
        }
    }
}

impl GenerationLimits {
    /// Both bounds must be at least 1.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.max_events == 0 {
            return Err(ScheduleError::invalid("max_events must be at least 1"));
        }
        if self.max_block_redraws == 0 {
            return Err(ScheduleError::invalid("max_block_redraws must be at least 1"));
        }
        Ok(())
    }
}

/// Builds ordered event sequences. Holds no state besides its limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventScheduler {
    limits: GenerationLimits,
}

impl EventScheduler {
    pub fn new(limits: GenerationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> GenerationLimits {
        self.limits
    }

    /// Back-to-back events of equal length, labelled cyclically.
    ///
    /// Any remainder of `task_duration` that cannot hold a whole event is
    /// left unscheduled.
    pub fn fixed_duration_events<S: AsRef<str>>(
        &self,
        duration: Duration,
        trial_types: &[S],
        task_duration: Duration,
    ) -> ScheduleResult<Vec<Event>> {
        self.limits.validate()?;
        if duration.is_zero() {
            return Err(ScheduleError::invalid("duration must be positive"));
        }
        validate_catalog(trial_types)?;
        let n_events = self.event_count(task_duration, duration)?;
        debug!(n_events, ?duration, ?task_duration, "generating fixed-duration events");

        let mut onset = Duration::ZERO;
        let events = trial_types
            .iter()
            .cycle()
            .take(n_events)
            .map(|trial_type| {
                let event = Event::new(onset, duration, trial_type.as_ref());
                onset += duration;
                event
            })
            .collect();
        Ok(events)
    }

    /// Back-to-back events with durations drawn uniformly from
    /// `[min_duration, max_duration]`.
    ///
    /// The sequence always holds `task_duration / min_duration` events, so
    /// its total length may run past `task_duration` when longer durations
    /// are drawn.
    pub fn variable_duration_events<R, S>(
        &self,
        rng: &mut R,
        min_duration: Duration,
        max_duration: Duration,
        trial_types: &[S],
        task_duration: Duration,
    ) -> ScheduleResult<Vec<Event>>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        self.limits.validate()?;
        if min_duration.is_zero() {
            return Err(ScheduleError::invalid("min_duration must be positive"));
        }
        if max_duration < min_duration {
            return Err(ScheduleError::invalid(format!(
                "max_duration {max_duration:?} is shorter than min_duration {min_duration:?}"
            )));
        }
        validate_catalog(trial_types)?;
        let min_ns = nanos(min_duration)?;
        let max_ns = nanos(max_duration)?;
        let n_events = self.event_count(task_duration, min_duration)?;
        debug!(
            n_events,
            ?min_duration,
            ?max_duration,
            ?task_duration,
            "generating variable-duration events"
        );

        let durations: Vec<Duration> = (0..n_events)
            .map(|_| Duration::from_nanos(rng.random_range(min_ns..=max_ns)))
            .collect();
        let labels = assign_trial_types(rng, trial_types, n_events, self.limits.max_block_redraws)?;

        let mut onset = Duration::ZERO;
        let events = durations
            .into_iter()
            .zip(labels)
            .map(|(duration, trial_type)| {
                let event = Event::new(onset, duration, trial_type);
                onset += duration;
                event
            })
            .collect();
        Ok(events)
    }

    fn event_count(&self, task_duration: Duration, unit: Duration) -> ScheduleResult<usize> {
        let count = task_duration.as_nanos() / unit.as_nanos();
        match usize::try_from(count) {
            Ok(n) if n <= self.limits.max_events => Ok(n),
            _ => Err(ScheduleError::invalid(format!(
                "{count} events requested, limit is {}",
                self.limits.max_events
            ))),
        }
    }
}

fn nanos(duration: Duration) -> ScheduleResult<u64> {
    u64::try_from(duration.as_nanos())
        .map_err(|_| ScheduleError::invalid(format!("duration {duration:?} is too long")))
}

/// Fixed-duration sequence with default limits.
pub fn generate_fixed_duration_events<S: AsRef<str>>(
    duration: Duration,
    trial_types: &[S],
    task_duration: Duration,
) -> ScheduleResult<Vec<Event>> {
    EventScheduler::default().fixed_duration_events(duration, trial_types, task_duration)
}

/// Variable-duration sequence with default limits.
pub fn generate_variable_duration_events<R, S>(
    rng: &mut R,
    min_duration: Duration,
    max_duration: Duration,
    trial_types: &[S],
    task_duration: Duration,
) -> ScheduleResult<Vec<Event>>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    EventScheduler::default().variable_duration_events(
        rng,
        min_duration,
        max_duration,
        trial_types,
        task_duration,
    )
}
