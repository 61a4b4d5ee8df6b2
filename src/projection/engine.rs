//! Cash-flow projector: folds every deposit's payouts onto one monthly timeline

use super::allowance::{AllowanceEntry, MonthlyAllowance};
use super::schedule::payout_events;
use crate::calendar::{month_key, month_label};
use crate::summary::DepositSummary;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Configuration shared by the summary builder and the projector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Rolling window for open-ended deposits: the summary term and the
    /// number of projected monthly payouts
    pub open_ended_window_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            open_ended_window_months: 12,
        }
    }
}

/// Builds month-bucketed net receipts from deposit summaries
pub struct CashFlowProjector {
    config: ProjectionConfig,
}

impl CashFlowProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project all summaries as of `now`, buckets sorted by month key
    pub fn project(&self, summaries: &[DepositSummary], now: NaiveDate) -> Vec<MonthlyAllowance> {
        let buckets = summaries
            .iter()
            .fold(BTreeMap::new(), |buckets, summary| {
                self.accumulate(buckets, summary, now)
            });

        log::info!(
            "Projected {} deposits into {} monthly buckets",
            summaries.len(),
            buckets.len()
        );

        buckets.into_values().collect()
    }

    /// Fold one summary's payout events into the bucket map
    fn accumulate(
        &self,
        mut buckets: BTreeMap<String, MonthlyAllowance>,
        summary: &DepositSummary,
        now: NaiveDate,
    ) -> BTreeMap<String, MonthlyAllowance> {
        let status = summary.status();

        for event in payout_events(summary, now, &self.config) {
            let key = month_key(event.date);
            log::trace!(
                "Payout {} on {}: net={:.2} principal={:.2}",
                summary.deposit.id,
                event.date,
                event.net,
                event.principal_returned
            );

            buckets
                .entry(key.clone())
                .or_insert_with(|| MonthlyAllowance::new(key, month_label(event.date)))
                .add_entry(AllowanceEntry {
                    deposit_id: summary.deposit.id.clone(),
                    name: summary.deposit.name.clone(),
                    bank_name: summary.bank.name.clone(),
                    payout_frequency: summary.deposit.payout_cadence(),
                    net: event.net,
                    principal_returned: event.principal_returned,
                    status,
                });
        }

        buckets
    }
}

impl Default for CashFlowProjector {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

/// Project with the default configuration
pub fn project_monthly_allowances(
    summaries: &[DepositSummary],
    now: NaiveDate,
) -> Vec<MonthlyAllowance> {
    CashFlowProjector::default().project(summaries, now)
}
