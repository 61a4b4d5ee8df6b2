//! Deposit summaries: one yield calculation per deposit, plus portfolio totals
//!
//! Open-ended deposits have no maturity; they are summarized over a rolling
//! window (12 months by default) for display only.

use crate::deposit::{Bank, Deposit, DepositStatus, InterestMode, Portfolio};
use crate::error::{DepositError, Result};
use crate::projection::ProjectionConfig;
use crate::yields::{allocate, blended_rate, calculate_yield, YieldInput};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A deposit with its bank and computed yield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositSummary {
    pub deposit: Deposit,
    pub bank: Bank,

    /// Override if present, else the bank's rate
    pub tax_rate: f64,

    pub gross_interest: f64,
    pub net_interest: f64,

    /// principal + gross_interest
    pub gross_total: f64,

    /// principal + net_interest
    pub net_total: f64,

    /// `None` for open-ended deposits
    pub maturity_date: Option<NaiveDate>,

    pub day_count: i64,

    /// True when the figures are a rolling-window projection, not a real maturity
    pub is_projection: bool,

    /// Status computed by the caller; takes precedence over the stored status
    #[serde(default)]
    pub effective_status: Option<DepositStatus>,
}

impl DepositSummary {
    /// Effective status if supplied, otherwise the deposit's stored status
    pub fn status(&self) -> DepositStatus {
        self.effective_status.unwrap_or(self.deposit.status)
    }

    pub fn with_effective_status(mut self, status: DepositStatus) -> Self {
        self.effective_status = Some(status);
        self
    }

    /// Nominal annual rate: the flat rate, or the blended tier rate
    pub fn nominal_rate(&self) -> f64 {
        match self.deposit.interest_mode {
            InterestMode::Simple => self.deposit.flat_rate.unwrap_or(0.0),
            InterestMode::Tiered => {
                blended_rate(&allocate(self.deposit.principal, &self.deposit.tiers))
            }
        }
    }
}

/// Run the yield engine for one deposit
pub fn build_summary(deposit: &Deposit, bank: &Bank, config: &ProjectionConfig) -> DepositSummary {
    let tax_rate = deposit.effective_tax_rate(bank);
    let term_months = if deposit.is_open_ended {
        f64::from(config.open_ended_window_months)
    } else {
        deposit.term()
    };

    let result = calculate_yield(&YieldInput::from_deposit(deposit, term_months, tax_rate));
    let maturity_date = (!deposit.is_open_ended).then_some(result.maturity_date);

    log::debug!(
        "Summary {}: gross={:.2} net={:.2} maturity={:?}",
        deposit.id,
        result.gross_interest,
        result.net_interest,
        maturity_date
    );

    DepositSummary {
        deposit: deposit.clone(),
        bank: bank.clone(),
        tax_rate,
        gross_interest: result.gross_interest,
        net_interest: result.net_interest,
        gross_total: deposit.principal + result.gross_interest,
        net_total: deposit.principal + result.net_interest,
        maturity_date,
        day_count: result.day_count,
        is_projection: deposit.is_open_ended,
        effective_status: None,
    }
}

/// Summarize every deposit in a portfolio, in input order
///
/// Deposits are independent, so summaries are built in parallel.
pub fn summarize_portfolio(
    portfolio: &Portfolio,
    config: &ProjectionConfig,
) -> Result<Vec<DepositSummary>> {
    log::info!("Summarizing {} deposits", portfolio.deposits.len());

    portfolio
        .deposits
        .par_iter()
        .map(|deposit| -> Result<DepositSummary> {
            let bank = portfolio
                .bank(&deposit.bank_id)
                .ok_or_else(|| DepositError::UnknownBank {
                    deposit_id: deposit.id.clone(),
                    bank_id: deposit.bank_id.clone(),
                })?;
            Ok(build_summary(deposit, bank, config))
        })
        .collect()
}

/// `MaturedUnsettled` for a fixed-term deposit still stored active on or after maturity
pub fn matured_unsettled_override(
    summary: &DepositSummary,
    now: NaiveDate,
) -> Option<DepositStatus> {
    match summary.maturity_date {
        Some(maturity) if summary.deposit.status == DepositStatus::Active && maturity <= now => {
            Some(DepositStatus::MaturedUnsettled)
        }
        _ => None,
    }
}

/// Aggregate figures across a set of summaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub deposit_count: usize,
    pub open_ended_count: usize,
    pub total_principal: f64,
    pub total_gross_interest: f64,
    pub total_net_interest: f64,

    /// Principal plus net interest
    pub total_net_value: f64,

    /// Principal-weighted nominal annual rate
    pub weighted_average_rate: f64,
}

impl PortfolioTotals {
    pub fn from_summaries(summaries: &[DepositSummary]) -> Self {
        let mut totals = summaries.iter().fold(Self::default(), |mut acc, s| {
            acc.deposit_count += 1;
            if s.is_projection {
                acc.open_ended_count += 1;
            }
            acc.total_principal += s.deposit.principal;
            acc.total_gross_interest += s.gross_interest;
            acc.total_net_interest += s.net_interest;
            acc.total_net_value += s.net_total;
            acc.weighted_average_rate += s.deposit.principal * s.nominal_rate();
            acc
        });

        totals.weighted_average_rate = if totals.total_principal > 0.0 {
            totals.weighted_average_rate / totals.total_principal
        } else {
            0.0
        };
        totals
    }
}
