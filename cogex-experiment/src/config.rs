use cogex_core::{Event, ScheduleResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::schedule::{
    DEFAULT_MAX_BLOCK_REDRAWS, DEFAULT_MAX_EVENTS, EventScheduler, GenerationLimits,
};

/// How event durations are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleMode {
    Fixed { duration_ms: u64 },
    Variable { min_duration_ms: u64, max_duration_ms: u64 },
}

/// One task's worth of generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub trial_types: Vec<String>,
    pub task_duration_ms: u64,
    pub mode: ScheduleMode,
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    #[serde(default = "default_max_block_redraws")]
    pub max_block_redraws: usize,
}

fn default_max_events() -> usize {
    DEFAULT_MAX_EVENTS
}

fn default_max_block_redraws() -> usize {
    DEFAULT_MAX_BLOCK_REDRAWS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            trial_types: vec!["congruent".into(), "incongruent".into(), "neutral".into()],
            task_duration_ms: 60_000,
            mode: ScheduleMode::Variable {
                min_duration_ms: 500,
                max_duration_ms: 1500,
            },
            max_events: DEFAULT_MAX_EVENTS,
            max_block_redraws: DEFAULT_MAX_BLOCK_REDRAWS,
        }
    }
}

impl ScheduleConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn limits(&self) -> GenerationLimits {
        GenerationLimits {
            max_events: self.max_events,
            max_block_redraws: self.max_block_redraws,
        }
    }

    pub fn task_duration(&self) -> Duration {
        Duration::from_millis(self.task_duration_ms)
    }

    /// Generates the sequence this configuration describes.
    ///
    /// The random source is only drawn from in variable mode.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ScheduleResult<Vec<Event>> {
        let scheduler = EventScheduler::new(self.limits());
        match self.mode {
            ScheduleMode::Fixed { duration_ms } => scheduler.fixed_duration_events(
                Duration::from_millis(duration_ms),
                &self.trial_types,
                self.task_duration(),
            ),
            ScheduleMode::Variable {
                min_duration_ms,
                max_duration_ms,
            } => scheduler.variable_duration_events(
                rng,
                Duration::from_millis(min_duration_ms),
                Duration::from_millis(max_duration_ms),
                &self.trial_types,
                self.task_duration(),
            ),
        }
    }
}
