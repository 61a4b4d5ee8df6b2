//! Cash-flow projection of net interest receipts onto monthly buckets

mod allowance;
mod engine;
mod report;
mod schedule;

pub use allowance::{total_net, within_horizon, AllowanceEntry, MonthlyAllowance};
pub use engine::{project_monthly_allowances, CashFlowProjector, ProjectionConfig};
pub use report::write_allowances_csv;
pub use schedule::{payout_events, PayoutEvent};
