//! Business logic services.

pub mod usage;
pub mod validation;

pub use usage::{StaticUsageLookup, UsageLookup, UsageSnapshot};
pub use validation::{ValidationService, ValidationStage};
