//! Load a portfolio snapshot (banks + deposits) from JSON

use super::{Bank, Deposit, InterestMode};
use crate::calendar::MAX_TERM_MONTHS;
use crate::error::{DepositError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Banks and deposits as exported by the surrounding application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub banks: Vec<Bank>,

    #[serde(default)]
    pub deposits: Vec<Deposit>,
}

impl Portfolio {
    /// Look up a bank by id
    pub fn bank(&self, bank_id: &str) -> Option<&Bank> {
        self.banks.iter().find(|b| b.id == bank_id)
    }

    /// Check every record against the ranges the calculation core assumes
    pub fn validate(&self) -> Result<()> {
        for bank in &self.banks {
            if !(0.0..=1.0).contains(&bank.tax_rate) {
                return Err(DepositError::validation(
                    &bank.id,
                    format!("bank tax rate {} outside [0, 1]", bank.tax_rate),
                ));
            }
        }

        for deposit in &self.deposits {
            validate_deposit(deposit)?;
            if self.bank(&deposit.bank_id).is_none() {
                return Err(DepositError::UnknownBank {
                    deposit_id: deposit.id.clone(),
                    bank_id: deposit.bank_id.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Check a single deposit record
pub fn validate_deposit(deposit: &Deposit) -> Result<()> {
    let fail = |reason: String| -> Result<()> {
        Err(DepositError::validation(&deposit.id, reason))
    };

    if !(deposit.principal > 0.0) {
        return fail(format!("principal {} must be positive", deposit.principal));
    }

    if let Some(tax) = deposit.tax_rate_override {
        if !(0.0..=1.0).contains(&tax) {
            return fail(format!("tax rate override {} outside [0, 1]", tax));
        }
    }

    if !deposit.is_open_ended {
        match deposit.term_months {
            Some(term) if term.is_finite() && term > 0.0 && term <= MAX_TERM_MONTHS => {}
            Some(term) => {
                return fail(format!(
                    "term {} must be between 0 and {} months",
                    term, MAX_TERM_MONTHS
                ))
            }
            None => return fail("fixed-term deposit has no term".to_string()),
        }
    }

    match deposit.interest_mode {
        InterestMode::Simple => {
            if deposit.flat_rate.is_none() {
                return fail("simple-interest deposit has no flat rate".to_string());
            }
        }
        InterestMode::Tiered => {
            if deposit.tiers.is_empty() {
                return fail("tiered deposit has no tiers".to_string());
            }
            let unbounded = deposit.tiers.iter().filter(|t| t.up_to.is_none()).count();
            if unbounded > 1 {
                return fail(format!(
                    "{} tiers have no upper bound, at most one allowed",
                    unbounded
                ));
            }
        }
    }

    Ok(())
}

/// Load and validate a portfolio from a JSON file
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<Portfolio> {
    let file = File::open(path)?;
    load_portfolio_from_reader(BufReader::new(file))
}

/// Load and validate a portfolio from any reader (e.g., string buffer, stdin)
pub fn load_portfolio_from_reader<R: Read>(reader: R) -> Result<Portfolio> {
    let portfolio: Portfolio = serde_json::from_reader(reader)?;
    portfolio.validate()?;

    log::info!(
        "Loaded portfolio with {} banks and {} deposits",
        portfolio.banks.len(),
        portfolio.deposits.len()
    );

    Ok(portfolio)
}
