//! Deposit Yield - interest and cash-flow projection for fixed-income deposits
//!
//! This library provides:
//! - Calendar arithmetic for month stepping and day counting
//! - Per-deposit gross/net interest for simple and tiered rate schedules
//! - Deposit summaries with rolling windows for open-ended savings
//! - Month-bucketed projection of net cash receipts across a portfolio
//!
//! All calculations are pure; the current date is always passed in.

pub mod calendar;
pub mod deposit;
pub mod error;
pub mod projection;
pub mod summary;
pub mod yields;

// Re-export commonly used types
pub use deposit::{Bank, Deposit, DepositStatus, InterestTier, Portfolio};
pub use error::{DepositError, Result};
pub use projection::{CashFlowProjector, MonthlyAllowance, ProjectionConfig};
pub use summary::{build_summary, summarize_portfolio, DepositSummary, PortfolioTotals};
pub use yields::{calculate_yield, YieldInput, YieldResult};
