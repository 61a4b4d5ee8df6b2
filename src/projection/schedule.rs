//! Payout events for a single deposit summary
//!
//! Three shapes land on the shared monthly timeline: a maturity lump sum,
//! equal monthly installments over a fixed term, and a rolling projection for
//! open-ended deposits.

use super::engine::ProjectionConfig;
use crate::calendar::{add_months, month_index, sanitize_term};
use crate::deposit::PayoutFrequency;
use crate::summary::DepositSummary;
use chrono::NaiveDate;

/// One cash receipt attributed to a deposit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutEvent {
    pub date: NaiveDate,
    pub net: f64,

    /// Full principal on a maturity lump sum, 0 otherwise
    pub principal_returned: f64,
}

/// All payout events for a summary, in date order
pub fn payout_events(
    summary: &DepositSummary,
    now: NaiveDate,
    config: &ProjectionConfig,
) -> Vec<PayoutEvent> {
    if summary.deposit.is_open_ended {
        return open_ended_events(summary, now, config.open_ended_window_months);
    }

    match summary.deposit.payout_frequency {
        PayoutFrequency::Maturity => maturity_events(summary),
        PayoutFrequency::Monthly => monthly_events(summary),
    }
}

/// Entire net interest plus principal in the maturity month
fn maturity_events(summary: &DepositSummary) -> Vec<PayoutEvent> {
    summary
        .maturity_date
        .map(|date| PayoutEvent {
            date,
            net: summary.net_interest,
            principal_returned: summary.deposit.principal,
        })
        .into_iter()
        .collect()
}

/// One installment per whole month of the term, dated `start + (i + 1)` months,
/// plus a final installment on the maturity date for any fractional remainder
fn monthly_events(summary: &DepositSummary) -> Vec<PayoutEvent> {
    let start = summary.deposit.start_date;
    let maturity = summary.maturity_date.unwrap_or(start);
    let term = sanitize_term(summary.deposit.term());
    let whole_months = term.trunc() as u32;

    if whole_months == 0 {
        log::warn!(
            "Deposit {} term {} has no whole month; paying monthly interest at maturity",
            summary.deposit.id,
            term
        );
        return vec![PayoutEvent {
            date: maturity,
            net: summary.net_interest,
            principal_returned: 0.0,
        }];
    }

    let per_month = summary.net_interest / term;
    let mut events: Vec<PayoutEvent> = (0..whole_months)
        .map(|i| PayoutEvent {
            date: add_months(start, i as i32 + 1),
            net: per_month,
            principal_returned: 0.0,
        })
        .collect();

    let fraction = term - f64::from(whole_months);
    if fraction > 0.0 {
        events.push(PayoutEvent {
            date: maturity,
            net: per_month * fraction,
            principal_returned: 0.0,
        });
    }

    events
}

/// `window` payouts of `net / window`, on the deposit's own day of month
///
/// Occurrences are `start + k` months for `k >= 1`, so the first payout always
/// falls after the opening date. The first projected payout is the earliest
/// occurrence in or after the month containing `now`; the day of `now` plays no
/// part. Opened 2026-02-10 with `now` = 2026-03-15 → first payout 2026-03-10;
/// opened 2026-03-10 → 2026-04-10.
fn open_ended_events(summary: &DepositSummary, now: NaiveDate, window: u32) -> Vec<PayoutEvent> {
    if window == 0 {
        return Vec::new();
    }

    let start = summary.deposit.start_date;
    let first_step = (month_index(now) - month_index(start)).max(1);
    let per_month = summary.net_interest / f64::from(window);

    (0..window as i32)
        .map(|i| PayoutEvent {
            date: add_months(start, first_step + i),
            net: per_month,
            principal_returned: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::month_key;
    use crate::deposit::{Bank, Deposit};
    use crate::summary::build_summary;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summarize(deposit: Deposit) -> DepositSummary {
        build_summary(&deposit, &Bank::new("b1", "First Bank", 0.0), &ProjectionConfig::default())
    }

    fn keys(events: &[PayoutEvent]) -> Vec<String> {
        events.iter().map(|e| month_key(e.date)).collect()
    }

    #[test]
    fn test_maturity_lump_sum() {
        let summary = summarize(Deposit::fixed_term(
            "d1",
            "TD",
            "b1",
            250_000.0,
            date(2025, 8, 2),
            6.0,
            0.0525,
        ));
        let events = payout_events(&summary, date(2025, 9, 1), &ProjectionConfig::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2026, 2, 2));
        assert_eq!(events[0].net, summary.net_interest);
        assert_eq!(events[0].principal_returned, 250_000.0);
    }

    #[test]
    fn test_monthly_installments_clamp_day() {
        let summary = summarize(
            Deposit::fixed_term("d1", "TD", "b1", 10_000.0, date(2026, 1, 31), 3.0, 0.05)
                .with_payout_frequency(PayoutFrequency::Monthly),
        );
        let events = payout_events(&summary, date(2026, 1, 31), &ProjectionConfig::default());

        let dates: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2026, 2, 28), date(2026, 3, 31), date(2026, 4, 30)]);
        assert!(events.iter().all(|e| e.principal_returned == 0.0));
    }

    #[test]
    fn test_monthly_fractional_term_pays_remainder_at_maturity() {
        let summary = summarize(
            Deposit::fixed_term("d1", "TD", "b1", 10_000.0, date(2026, 1, 10), 2.5, 0.05)
                .with_payout_frequency(PayoutFrequency::Monthly),
        );
        let events = payout_events(&summary, date(2026, 1, 10), &ProjectionConfig::default());

        assert_eq!(events.len(), 3);
        assert_eq!(events[2].date, date(2026, 3, 25));
        assert_relative_eq!(events[0].net, summary.net_interest / 2.5, epsilon = 1e-12);
        assert_relative_eq!(events[2].net, summary.net_interest * 0.5 / 2.5, epsilon = 1e-12);

        let total: f64 = events.iter().map(|e| e.net).sum();
        assert_relative_eq!(total, summary.net_interest, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_sub_month_term_single_payout() {
        let summary = summarize(
            Deposit::fixed_term("d1", "Note", "b1", 10_000.0, date(2026, 2, 1), 0.5, 0.05)
                .with_payout_frequency(PayoutFrequency::Monthly),
        );
        let events = payout_events(&summary, date(2026, 2, 1), &ProjectionConfig::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2026, 2, 16));
        assert_eq!(events[0].net, summary.net_interest);
    }

    #[test]
    fn test_open_ended_anchor_previous_month() {
        let summary = summarize(Deposit::open_ended(
            "d2",
            "Savings",
            "b1",
            10_000.0,
            date(2026, 2, 10),
            0.03,
        ));
        let events = payout_events(&summary, date(2026, 3, 15), &ProjectionConfig::default());

        assert_eq!(events.len(), 12);
        assert_eq!(events[0].date, date(2026, 3, 10));
        assert_eq!(keys(&events).last().map(String::as_str), Some("2027-02"));
    }

    #[test]
    fn test_open_ended_opened_this_month_starts_next_month() {
        let summary = summarize(Deposit::open_ended(
            "d2",
            "Savings",
            "b1",
            10_000.0,
            date(2026, 3, 10),
            0.03,
        ));
        let events = payout_events(&summary, date(2026, 3, 15), &ProjectionConfig::default());

        assert_eq!(events[0].date, date(2026, 4, 10));
        assert_eq!(month_key(events[0].date), "2026-04");
    }

    #[test]
    fn test_open_ended_old_deposit_keeps_month_end_anchor() {
        let summary = summarize(Deposit::open_ended(
            "d2",
            "Savings",
            "b1",
            10_000.0,
            date(2024, 1, 31),
            0.03,
        ));
        let events = payout_events(&summary, date(2026, 3, 15), &ProjectionConfig::default());

        assert_eq!(events[0].date, date(2026, 3, 31));
        assert_eq!(events[1].date, date(2026, 4, 30));
        assert_eq!(events[11].date, date(2027, 2, 28));
    }

    #[test]
    fn test_open_ended_future_start() {
        let summary = summarize(Deposit::open_ended(
            "d2",
            "Savings",
            "b1",
            10_000.0,
            date(2026, 5, 20),
            0.03,
        ));
        let events = payout_events(&summary, date(2026, 3, 15), &ProjectionConfig::default());

        assert_eq!(events[0].date, date(2026, 6, 20));
    }
}
