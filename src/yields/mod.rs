//! Yield engine: interest and maturity for a single deposit term

mod engine;
pub mod tiers;

pub use engine::{calculate_yield, YieldInput, YieldResult};
pub use tiers::{allocate, blended_rate, sort_tiers, TierAllocation};
