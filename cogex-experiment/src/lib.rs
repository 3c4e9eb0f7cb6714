pub mod blocks;
pub mod config;
pub mod schedule;
pub use config::{ScheduleConfig, ScheduleMode};
pub use schedule::{
    EventScheduler, GenerationLimits, generate_fixed_duration_events,
    generate_variable_duration_events,
};
