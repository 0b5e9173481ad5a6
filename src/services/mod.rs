pub mod worker;

pub use worker::{handle_request, run_process, run_suggest, serve_lines, WorkerHandle};
