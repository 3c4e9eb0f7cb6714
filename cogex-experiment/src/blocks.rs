//! Trial-type label assignment.
//!
//! Catalogs with more than two distinct labels are laid out as shuffled
//! blocks, each a permutation of the whole catalog, with no label repeated
//! across a block boundary. Smaller catalogs are repeated cyclically.

use cogex_core::{ScheduleError, ScheduleResult, distinct_count, validate_catalog};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{trace, warn};

/// Labels for `n_events` positions, routed on the number of distinct types.
pub fn assign_trial_types<R, S>(
    rng: &mut R,
    trial_types: &[S],
    n_events: usize,
    max_redraws: usize,
) -> ScheduleResult<Vec<String>>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    validate_catalog(trial_types)?;
    if distinct_count(trial_types) > 2 {
        shuffled_blocks(rng, trial_types, n_events, max_redraws)
    } else {
        Ok(cyclic_labels(trial_types, n_events))
    }
}

/// `trial_types[i % len]` for every position.
pub fn cyclic_labels<S: AsRef<str>>(trial_types: &[S], n_events: usize) -> Vec<String> {
    if trial_types.is_empty() {
        return Vec::new();
    }
    trial_types
        .iter()
        .map(|t| t.as_ref().to_owned())
        .cycle()
        .take(n_events)
        .collect()
}

/// Concatenated random permutations of the catalog, truncated to `n_events`.
///
/// A block whose first label equals the previous block's last label is
/// reshuffled, at most `max_redraws` times per block. Running out of redraws
/// fails the whole call; nothing partial is returned.
pub fn shuffled_blocks<R, S>(
    rng: &mut R,
    trial_types: &[S],
    n_events: usize,
    max_redraws: usize,
) -> ScheduleResult<Vec<String>>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    validate_catalog(trial_types)?;

    let mut block: Vec<&str> = trial_types.iter().map(AsRef::as_ref).collect();
    let mut labels: Vec<String> = Vec::with_capacity(n_events);

    while labels.len() < n_events {
        let mut redraws = 0;
        block.shuffle(rng);
        while labels.last().is_some_and(|prev| prev.as_str() == block[0]) {
            if redraws == max_redraws {
                warn!(
                    block = labels.len() / block.len(),
                    redraws, "no block found that avoids a repeated trial type"
                );
                return Err(ScheduleError::generation(format!(
                    "every reshuffle of {} trial types started with {:?} after {} redraws",
                    block.len(),
                    block[0],
                    redraws
                )));
            }
            redraws += 1;
            trace!(redraws, label = block[0], "block repeats previous trial type, redrawing");
            block.shuffle(rng);
        }

        let remaining = n_events - labels.len();
        labels.extend(block.iter().take(remaining).map(|s| (*s).to_owned()));
    }

    Ok(labels)
}
