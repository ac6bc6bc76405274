//! Household cashflow and net-worth projection for the German tax and
//! social-insurance context.
//!
//! The engine is a set of pure functions: an [`InputSnapshot`] plus a horizon
//! goes in, a month-by-month [`Projection`] comes out. Nothing here reads the
//! clock, keeps state between calls, or performs I/O.

pub mod error;
pub mod household;
pub mod real_estate;
pub mod tax;
pub mod types;

#[cfg(feature = "stress_tests")]
pub mod scenarios;

pub use error::PlannerError;
pub use household::projection::{project, Projection};
pub use household::snapshot::InputSnapshot;
pub use types::*;

/// Standard result type for all planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
