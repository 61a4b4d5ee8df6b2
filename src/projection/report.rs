//! CSV report of the monthly allowance schedule

use super::allowance::MonthlyAllowance;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 10] = [
    "MonthKey",
    "Label",
    "BucketNet",
    "DepositId",
    "Name",
    "Bank",
    "PayoutFrequency",
    "Net",
    "PrincipalReturned",
    "Status",
];

/// Write one row per (bucket, entry), repeating the bucket total on each row
pub fn write_allowances_csv<W: Write>(writer: W, allowances: &[MonthlyAllowance]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for allowance in allowances {
        let bucket_net = format!("{:.2}", allowance.net);
        for entry in &allowance.entries {
            let net = format!("{:.2}", entry.net);
            let principal = format!("{:.2}", entry.principal_returned);
            csv_writer.write_record([
                allowance.month_key.as_str(),
                allowance.label.as_str(),
                bucket_net.as_str(),
                entry.deposit_id.as_str(),
                entry.name.as_str(),
                entry.bank_name.as_str(),
                entry.payout_frequency.as_str(),
                net.as_str(),
                principal.as_str(),
                entry.status.as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
