//! Audio handling: duration probing and chunk extraction.
//!
//! All subprocess access to the external encoder goes through the
//! [`AudioToolchain`] trait so the pipeline can run against a fake
//! toolchain in tests.

pub mod probe;
pub mod segmenter;
pub mod toolchain;

pub use probe::probe_duration;
pub use segmenter::{AudioChunk, Segmenter};
pub use toolchain::{AudioToolchain, FfmpegToolchain, MockToolchain};
