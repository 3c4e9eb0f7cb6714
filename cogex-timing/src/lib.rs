pub mod sampling;

pub use sampling::{sample_onsets, SamplingRate};
