//! Public entry points for the pixel-quant crate.
//!
//! This module provides the pipeline orchestrator ([`process`] driven by
//! [`PipelineSettings`]) and the error types shared across the crate's
//! public surface.

mod error;
mod pipeline;

pub use error::{DitherError, PipelineError, UnknownMethodError};
pub use pipeline::{process, PipelineSettings, KMEANS_SAMPLE_SIZE, MAX_KMEANS_COLORS};
