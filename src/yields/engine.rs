//! Gross/net interest and maturity for a single deposit

use super::tiers::allocate;
use crate::calendar::{add_term_months, difference_in_calendar_days, sanitize_term};
use crate::deposit::{
    Compounding, DayCountConvention, Deposit, InterestMode, InterestTier, InterestTreatment,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Terms the yield engine needs for one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct YieldInput {
    pub principal: f64,
    pub start_date: NaiveDate,

    /// Term in months; non-finite or negative values are treated as 0
    pub term_months: f64,

    /// Annual rate in simple mode
    pub flat_rate: f64,

    /// Rate schedule in tiered mode
    pub tiers: Vec<InterestTier>,

    pub interest_mode: InterestMode,

    /// Only affects tiered mode
    pub interest_treatment: InterestTreatment,

    /// Only affects tiered mode
    pub compounding: Compounding,

    /// Tax withheld on interest, in [0, 1]
    pub tax_rate: f64,

    pub day_count_convention: DayCountConvention,
}

impl YieldInput {
    /// Simple-interest input with default treatment, cadence and convention
    pub fn simple(principal: f64, start_date: NaiveDate, term_months: f64, flat_rate: f64) -> Self {
        Self {
            principal,
            start_date,
            term_months,
            flat_rate,
            tiers: Vec::new(),
            interest_mode: InterestMode::Simple,
            interest_treatment: InterestTreatment::Reinvest,
            compounding: Compounding::Daily,
            tax_rate: 0.0,
            day_count_convention: DayCountConvention::Days365,
        }
    }

    /// Tiered input with default treatment, cadence and convention
    pub fn tiered(
        principal: f64,
        start_date: NaiveDate,
        term_months: f64,
        tiers: Vec<InterestTier>,
    ) -> Self {
        Self {
            flat_rate: 0.0,
            tiers,
            interest_mode: InterestMode::Tiered,
            ..Self::simple(principal, start_date, term_months, 0.0)
        }
    }

    /// Build from a deposit record, with the term and tax rate resolved by the caller
    pub fn from_deposit(deposit: &Deposit, term_months: f64, tax_rate: f64) -> Self {
        Self {
            principal: deposit.principal,
            start_date: deposit.start_date,
            term_months,
            flat_rate: deposit.flat_rate.unwrap_or(0.0),
            tiers: deposit.tiers.clone(),
            interest_mode: deposit.interest_mode,
            interest_treatment: deposit.interest_treatment,
            compounding: deposit.compounding,
            tax_rate,
            day_count_convention: deposit.day_count_convention,
        }
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn with_treatment(mut self, treatment: InterestTreatment) -> Self {
        self.interest_treatment = treatment;
        self
    }

    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    pub fn with_day_count(mut self, convention: DayCountConvention) -> Self {
        self.day_count_convention = convention;
        self
    }
}

/// Interest earned over the term and when the term ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub gross_interest: f64,
    pub net_interest: f64,
    pub maturity_date: NaiveDate,

    /// Calendar days from start to maturity, at least 1
    pub day_count: i64,
}

/// Compute gross and net interest for one deposit term
pub fn calculate_yield(input: &YieldInput) -> YieldResult {
    let term_months = sanitize_term(input.term_months);
    let maturity_date = add_term_months(input.start_date, term_months);
    let day_count = difference_in_calendar_days(&maturity_date, &input.start_date).max(1);
    let year_days = input.day_count_convention.days();

    let gross_interest = match input.interest_mode {
        InterestMode::Simple => input.principal * input.flat_rate * (day_count as f64 / year_days),
        InterestMode::Tiered => tiered_interest(input, term_months, day_count, year_days),
    };
    let net_interest = gross_interest * (1.0 - input.tax_rate);

    log::debug!(
        "Yield: principal={:.2} mode={:?} term={} days={} gross={:.6} net={:.6}",
        input.principal,
        input.interest_mode,
        term_months,
        day_count,
        gross_interest,
        net_interest
    );

    YieldResult {
        gross_interest,
        net_interest,
        maturity_date,
        day_count,
    }
}

/// Sum of per-tier interest; compounds only when interest is reinvested
fn tiered_interest(input: &YieldInput, term_months: f64, day_count: i64, year_days: f64) -> f64 {
    let (periods_per_year, periods) = match input.compounding {
        Compounding::Monthly => (12.0, term_months),
        Compounding::Daily => (year_days, day_count as f64),
    };

    allocate(input.principal, &input.tiers)
        .iter()
        .map(|allocation| {
            let period_rate = allocation.tier.rate / periods_per_year;
            match input.interest_treatment {
                InterestTreatment::Payout => allocation.portion * period_rate * periods,
                InterestTreatment::Reinvest => {
                    let grown = allocation.portion * (1.0 + period_rate).powf(periods);
                    grown - allocation.portion
                }
            }
        })
        .sum()
}
