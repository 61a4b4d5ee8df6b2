//! Deposit and bank records supplied by the surrounding application

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the annual rate is applied to the principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMode {
    /// One flat rate on the whole principal
    Simple,
    /// Principal brackets earn different rates
    Tiered,
}

/// Whether tiered interest accrues into the balance or is paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestTreatment {
    /// Interest compounds into the balance
    #[default]
    Reinvest,
    /// Interest is paid out each period without compounding
    Payout,
}

/// Accrual cadence for tiered interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    #[default]
    Daily,
    Monthly,
}

/// Days-per-year basis for converting annual rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum DayCountConvention {
    Days360,
    #[default]
    Days365,
}

impl DayCountConvention {
    /// Days in the year for this convention
    pub fn days(&self) -> f64 {
        match self {
            DayCountConvention::Days360 => 360.0,
            DayCountConvention::Days365 => 365.0,
        }
    }
}

impl TryFrom<u16> for DayCountConvention {
    type Error = String;

    fn try_from(days: u16) -> Result<Self, Self::Error> {
        match days {
            360 => Ok(DayCountConvention::Days360),
            365 => Ok(DayCountConvention::Days365),
            other => Err(format!("Unknown day count convention: {}", other)),
        }
    }
}

impl From<DayCountConvention> for u16 {
    fn from(convention: DayCountConvention) -> Self {
        match convention {
            DayCountConvention::Days360 => 360,
            DayCountConvention::Days365 => 365,
        }
    }
}

/// When net interest reaches the depositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutFrequency {
    /// Single lump sum at maturity
    #[default]
    Maturity,
    /// Equal monthly installments over the term
    Monthly,
}

impl PayoutFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutFrequency::Maturity => "maturity",
            PayoutFrequency::Monthly => "monthly",
        }
    }
}

/// Deposit lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    #[default]
    Active,
    Matured,
    Settled,
    /// Past maturity but not yet settled; only ever computed by the caller
    MaturedUnsettled,
}

impl DepositStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Active => "active",
            DepositStatus::Matured => "matured",
            DepositStatus::Settled => "settled",
            DepositStatus::MaturedUnsettled => "matured_unsettled",
        }
    }
}

/// One bracket of a tiered rate schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestTier {
    /// Upper bound of the bracket; `None` means "and above"
    #[serde(default)]
    pub up_to: Option<f64>,

    /// Annual rate for the bracket
    pub rate: f64,
}

impl InterestTier {
    pub fn new(up_to: Option<f64>, rate: f64) -> Self {
        Self { up_to, rate }
    }

    /// Bracket with no upper bound
    pub fn unbounded(rate: f64) -> Self {
        Self { up_to: None, rate }
    }
}

/// Bank holding deposits, source of the default tax rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub name: String,

    /// Withholding tax on interest, in [0, 1]
    pub tax_rate: f64,
}

impl Bank {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tax_rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tax_rate,
        }
    }
}

/// A fixed-income deposit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Unique deposit identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Owning bank id
    pub bank_id: String,

    /// Amount deposited, > 0
    pub principal: f64,

    pub start_date: NaiveDate,

    /// Term in months, possibly fractional; ignored when open-ended
    #[serde(default)]
    pub term_months: Option<f64>,

    /// No fixed maturity
    #[serde(default)]
    pub is_open_ended: bool,

    pub interest_mode: InterestMode,

    #[serde(default)]
    pub interest_treatment: InterestTreatment,

    #[serde(default)]
    pub compounding: Compounding,

    #[serde(default)]
    pub day_count_convention: DayCountConvention,

    /// Annual rate for simple mode
    #[serde(default)]
    pub flat_rate: Option<f64>,

    /// Rate schedule for tiered mode
    #[serde(default)]
    pub tiers: Vec<InterestTier>,

    /// Overrides the bank's tax rate when present
    #[serde(default)]
    pub tax_rate_override: Option<f64>,

    #[serde(default)]
    pub payout_frequency: PayoutFrequency,

    /// Stored lifecycle status
    #[serde(default)]
    pub status: DepositStatus,
}

impl Deposit {
    /// Create an active fixed-term simple-interest deposit paid at maturity
    pub fn fixed_term(
        id: impl Into<String>,
        name: impl Into<String>,
        bank_id: impl Into<String>,
        principal: f64,
        start_date: NaiveDate,
        term_months: f64,
        flat_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bank_id: bank_id.into(),
            principal,
            start_date,
            term_months: Some(term_months),
            is_open_ended: false,
            interest_mode: InterestMode::Simple,
            interest_treatment: InterestTreatment::default(),
            compounding: Compounding::default(),
            day_count_convention: DayCountConvention::default(),
            flat_rate: Some(flat_rate),
            tiers: Vec::new(),
            tax_rate_override: None,
            payout_frequency: PayoutFrequency::Maturity,
            status: DepositStatus::Active,
        }
    }

    /// Create an active open-ended simple-interest savings deposit
    pub fn open_ended(
        id: impl Into<String>,
        name: impl Into<String>,
        bank_id: impl Into<String>,
        principal: f64,
        start_date: NaiveDate,
        flat_rate: f64,
    ) -> Self {
        Self {
            term_months: None,
            is_open_ended: true,
            payout_frequency: PayoutFrequency::Monthly,
            ..Self::fixed_term(id, name, bank_id, principal, start_date, 0.0, flat_rate)
        }
    }

    /// Switch to a tiered rate schedule
    pub fn with_tiers(mut self, tiers: Vec<InterestTier>) -> Self {
        self.interest_mode = InterestMode::Tiered;
        self.flat_rate = None;
        self.tiers = tiers;
        self
    }

    pub fn with_payout_frequency(mut self, payout_frequency: PayoutFrequency) -> Self {
        self.payout_frequency = payout_frequency;
        self
    }

    pub fn with_treatment(
        mut self,
        treatment: InterestTreatment,
        compounding: Compounding,
    ) -> Self {
        self.interest_treatment = treatment;
        self.compounding = compounding;
        self
    }

    pub fn with_day_count(mut self, convention: DayCountConvention) -> Self {
        self.day_count_convention = convention;
        self
    }

    pub fn with_tax_rate_override(mut self, tax_rate: f64) -> Self {
        self.tax_rate_override = Some(tax_rate);
        self
    }

    pub fn with_status(mut self, status: DepositStatus) -> Self {
        self.status = status;
        self
    }

    /// How interest actually reaches the depositor; open-ended deposits always pay monthly
    pub fn payout_cadence(&self) -> PayoutFrequency {
        if self.is_open_ended {
            PayoutFrequency::Monthly
        } else {
            self.payout_frequency
        }
    }

    /// Stored term, 0 when absent
    pub fn term(&self) -> f64 {
        self.term_months.unwrap_or(0.0)
    }

    /// Tax rate applied to this deposit's interest
    pub fn effective_tax_rate(&self, bank: &Bank) -> f64 {
        self.tax_rate_override.unwrap_or(bank.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()
    }

    #[test]
    fn test_effective_tax_rate_prefers_override() {
        let bank = Bank::new("b1", "First Bank", 0.20);
        let deposit = Deposit::fixed_term("d1", "TD", "b1", 1000.0, start(), 6.0, 0.05);
        assert_eq!(deposit.effective_tax_rate(&bank), 0.20);

        let deposit = deposit.with_tax_rate_override(0.0);
        assert_eq!(deposit.effective_tax_rate(&bank), 0.0);
    }

    #[test]
    fn test_open_ended_defaults() {
        let deposit = Deposit::open_ended("d2", "Savings", "b1", 5000.0, start(), 0.03);
        assert!(deposit.is_open_ended);
        assert_eq!(deposit.term(), 0.0);
        assert_eq!(deposit.payout_frequency, PayoutFrequency::Monthly);
        assert_eq!(deposit.interest_mode, InterestMode::Simple);

        let stored_maturity = deposit.with_payout_frequency(PayoutFrequency::Maturity);
        assert_eq!(stored_maturity.payout_cadence(), PayoutFrequency::Monthly);
    }

    #[test]
    fn test_deposit_json_shape() {
        let json = r#"{
            "id": "d3",
            "name": "Ladder",
            "bank_id": "b1",
            "principal": 150000.0,
            "start_date": "2026-01-15",
            "term_months": 12,
            "interest_mode": "tiered",
            "interest_treatment": "payout",
            "compounding": "monthly",
            "day_count_convention": 360,
            "tiers": [{"up_to": 100000.0, "rate": 0.04}, {"rate": 0.05}]
        }"#;

        let deposit: Deposit = serde_json::from_str(json).unwrap();
        assert_eq!(deposit.interest_mode, InterestMode::Tiered);
        assert_eq!(deposit.interest_treatment, InterestTreatment::Payout);
        assert_eq!(deposit.compounding, Compounding::Monthly);
        assert_eq!(deposit.day_count_convention, DayCountConvention::Days360);
        assert_eq!(deposit.tiers[1], InterestTier::unbounded(0.05));
        assert_eq!(deposit.payout_frequency, PayoutFrequency::Maturity);
        assert_eq!(deposit.status, DepositStatus::Active);
    }

    #[test]
    fn test_unknown_day_count_rejected() {
        let result: Result<DayCountConvention, _> = serde_json::from_str("364");
        assert!(result.is_err());
    }
}
