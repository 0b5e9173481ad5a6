pub mod config;
pub mod message;
pub mod settings;

pub use config::WorkerConfig;
pub use message::{RasterPayload, Request, Response};
pub use settings::ProcessSettings;
