//! Deposit data structures and portfolio loading

mod data;
pub mod loader;

pub use data::{
    Bank, Compounding, DayCountConvention, Deposit, DepositStatus, InterestMode, InterestTier,
    InterestTreatment, PayoutFrequency,
};
pub use loader::{load_portfolio, load_portfolio_from_reader, validate_deposit, Portfolio};
