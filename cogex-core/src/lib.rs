pub mod error;
pub mod event;
pub mod trial;

pub use error::{ScheduleError, ScheduleResult};
pub use event::Event;
pub use trial::{distinct_count, validate_catalog};
