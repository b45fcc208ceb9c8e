//! Fee-plan resolution and mobile-money payment rules.

pub mod phone;
pub mod plan;

pub use plan::{PayablePlan, ResolutionError, ResolvedPlan, SchoolMonth};
