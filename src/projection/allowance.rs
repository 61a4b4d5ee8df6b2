//! Monthly allowance output structures

use crate::calendar::{add_months, month_key};
use crate::deposit::{DepositStatus, PayoutFrequency};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One deposit's contribution to a month bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub deposit_id: String,
    pub name: String,
    pub bank_name: String,
    pub payout_frequency: PayoutFrequency,

    /// Net interest received in this bucket
    pub net: f64,

    /// Non-zero only in a maturity lump-sum bucket
    pub principal_returned: f64,

    /// Effective status if supplied, else the stored status
    pub status: DepositStatus,
}

/// Net cash receipts attributed to one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAllowance {
    /// `YYYY-MM`
    pub month_key: String,

    /// e.g. `Mar 2026`
    pub label: String,

    /// Sum of entry nets
    pub net: f64,

    pub entries: Vec<AllowanceEntry>,
}

impl MonthlyAllowance {
    pub fn new(month_key: String, label: String) -> Self {
        Self {
            month_key,
            label,
            net: 0.0,
            entries: Vec::new(),
        }
    }

    /// Add an entry and fold its net into the bucket total
    pub fn add_entry(&mut self, entry: AllowanceEntry) {
        self.net += entry.net;
        self.entries.push(entry);
    }

    /// Principal coming back in this bucket
    pub fn principal_returned(&self) -> f64 {
        self.entries.iter().map(|e| e.principal_returned).sum()
    }
}

/// Keep the `months` buckets starting with `now`'s month
///
/// Month keys are zero-padded, so string comparison is chronological.
pub fn within_horizon(
    allowances: &[MonthlyAllowance],
    now: NaiveDate,
    months: u32,
) -> Vec<MonthlyAllowance> {
    let first = month_key(now);
    let end = month_key(add_months(now, months as i32));

    allowances
        .iter()
        .filter(|a| a.month_key >= first && a.month_key < end)
        .cloned()
        .collect()
}

/// Sum of bucket nets
pub fn total_net(allowances: &[MonthlyAllowance]) -> f64 {
    allowances.iter().map(|a| a.net).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(key: &str, net: f64) -> MonthlyAllowance {
        let mut allowance = MonthlyAllowance::new(key.to_string(), key.to_string());
        allowance.add_entry(AllowanceEntry {
            deposit_id: "d1".to_string(),
            name: "TD".to_string(),
            bank_name: "First Bank".to_string(),
            payout_frequency: PayoutFrequency::Maturity,
            net,
            principal_returned: 1_000.0,
            status: DepositStatus::Active,
        });
        allowance
    }

    #[test]
    fn test_add_entry_accumulates() {
        let mut allowance = bucket("2026-03", 100.0);
        allowance.add_entry(AllowanceEntry {
            deposit_id: "d2".to_string(),
            name: "Savings".to_string(),
            bank_name: "First Bank".to_string(),
            payout_frequency: PayoutFrequency::Monthly,
            net: 25.0,
            principal_returned: 0.0,
            status: DepositStatus::Active,
        });

        assert_eq!(allowance.net, 125.0);
        assert_eq!(allowance.entries.len(), 2);
        assert_eq!(allowance.principal_returned(), 1_000.0);
    }

    #[test]
    fn test_within_horizon() {
        let all = vec![
            bucket("2026-02", 1.0),
            bucket("2026-03", 2.0),
            bucket("2027-02", 3.0),
            bucket("2027-03", 4.0),
        ];
        let now = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let kept = within_horizon(&all, now, 12);
        let keys: Vec<&str> = kept.iter().map(|a| a.month_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-03", "2027-02"]);
        assert_eq!(total_net(&kept), 5.0);
    }
}
