//! CLI command implementations.

mod doctor;
mod process;

pub use doctor::run_doctor;
pub use process::{run_process, ProcessOptions};
