mod engine;
mod error;
mod types;

pub use engine::Engine;
pub use error::{CoreError, CoreErrorCode};
pub use types::{AllocationStep, ApplyPolicy, ApplyReport, CaptureReport, StepOutcome};
