//! Pixelsmith - pixel-art quantization worker
//!
//! Hosts the `pixel-quant` engine behind a JSON message protocol.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
