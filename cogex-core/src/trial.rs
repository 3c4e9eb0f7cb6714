use std::collections::HashSet;

use crate::error::{ScheduleError, ScheduleResult};

/// Number of distinct labels in a trial-type catalog.
pub fn distinct_count<S: AsRef<str>>(trial_types: &[S]) -> usize {
    trial_types
        .iter()
        .map(AsRef::as_ref)
        .collect::<HashSet<&str>>()
        .len()
}

/// Rejects catalogs that cannot label any event.
pub fn validate_catalog<S: AsRef<str>>(trial_types: &[S]) -> ScheduleResult<()> {
    if trial_types.is_empty() {
        return Err(ScheduleError::invalid("trial_types must not be empty"));
    }
    Ok(())
}
