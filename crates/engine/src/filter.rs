//! Time/status/search filtering over a transaction collection.
//!
//! The filter derives a narrowed view for one target currency; it never
//! reorders, so the caller's insertion order is preserved.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Currency,
    transactions::{Transaction, TransactionStatus},
};

/// Fixed relative time windows offered by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "12h")]
    H12,
    #[default]
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "48h")]
    H48,
    #[serde(rename = "3d")]
    D3,
    #[serde(rename = "1w")]
    W1,
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "1y")]
    Y1,
}

impl TimeWindow {
    /// Exact span of the window (1m = 30 days, 1y = 365 days).
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::H6 => Duration::hours(6),
            Self::H12 => Duration::hours(12),
            Self::H24 => Duration::hours(24),
            Self::H48 => Duration::hours(48),
            Self::D3 => Duration::days(3),
            Self::W1 => Duration::days(7),
            Self::M1 => Duration::days(30),
            Self::Y1 => Duration::days(365),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::H6 => "6h",
            Self::H12 => "12h",
            Self::H24 => "24h",
            Self::H48 => "48h",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::M1 => "1m",
            Self::Y1 => "1y",
        }
    }
}

/// Either a relative window back from now, or an absolute "since" instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSelector {
    Window(TimeWindow),
    Since(DateTime<Utc>),
}

impl Default for TimeSelector {
    fn default() -> Self {
        Self::Window(TimeWindow::default())
    }
}

impl TimeSelector {
    /// Oldest creation instant that survives the filter.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Window(window) => now - window.duration(),
            Self::Since(at) => at,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusSelector {
    #[default]
    All,
    Only(TransactionStatus),
}

/// One set of filter inputs, applied in fixed order: currency, status,
/// search term, time cutoff.
#[derive(Clone, Debug)]
pub struct FilterCriteria {
    pub currency: Currency,
    pub time: TimeSelector,
    pub status: StatusSelector,
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            time: TimeSelector::default(),
            status: StatusSelector::default(),
            search: None,
        }
    }
}

/// Narrows `transactions` to the view described by `criteria`.
///
/// `now` anchors the relative windows; inject a fixed instant in tests.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Transaction> {
    let cutoff = criteria.time.cutoff(now);
    let term = criteria.search.as_deref().map(str::to_lowercase);
    transactions
        .iter()
        .filter(|t| t.from_currency == criteria.currency || t.to_currency == criteria.currency)
        .filter(|t| match criteria.status {
            StatusSelector::All => true,
            StatusSelector::Only(status) => t.status == status,
        })
        .filter(|t| term.as_deref().is_none_or(|term| matches_search(t, term)))
        .filter(|t| t.created_at >= cutoff)
        .collect()
}

fn matches_search(transaction: &Transaction, lowered_term: &str) -> bool {
    transaction
        .client_name
        .to_lowercase()
        .contains(lowered_term)
        || transaction
            .client_email
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(lowered_term)
        || transaction.id.to_lowercase().contains(lowered_term)
}

/// Aggregate statistics over a filtered view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterSummary {
    pub total_volume: f64,
    pub total_fees: f64,
    pub completed: usize,
}

/// Pure reduction over a filtered result.
pub fn summarize(transactions: &[&Transaction]) -> FilterSummary {
    let mut summary = FilterSummary::default();
    for transaction in transactions {
        summary.total_volume += transaction.amount;
        summary.total_fees += transaction.fee;
        if transaction.status == TransactionStatus::Completed {
            summary.completed += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::transactions::Direction;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn tx(
        id: &str,
        name: &str,
        to: &str,
        status: TransactionStatus,
        hours_ago: i64,
    ) -> Transaction {
        let mut tx = Transaction::new(
            id.to_string(),
            name.to_string(),
            Some(format!("{}@example.com", name.to_lowercase())),
            100.0,
            Currency::usd(),
            Currency::try_from(to).unwrap(),
            0.92,
            "5551234567".to_string(),
            Direction::Send,
            "AAAAAAA".to_string(),
            "X".to_string(),
            now() - Duration::hours(hours_ago),
        )
        .unwrap();
        if status.is_terminal() {
            tx.transition(status).unwrap();
        }
        tx
    }

    fn fixture() -> Vec<Transaction> {
        vec![
            tx("TXN-1", "Jane", "EUR", TransactionStatus::Completed, 1),
            tx("TXN-2", "Kofi", "EUR", TransactionStatus::Pending, 10),
            tx("TXN-3", "Jane", "GHS", TransactionStatus::Completed, 2),
            tx("TXN-4", "Ama", "EUR", TransactionStatus::Failed, 30),
            tx("TXN-5", "Esi", "EUR", TransactionStatus::Cancelled, 5),
        ]
    }

    fn eur_criteria() -> FilterCriteria {
        let mut criteria = FilterCriteria::new(Currency::try_from("EUR").unwrap());
        criteria.time = TimeSelector::Window(TimeWindow::Y1);
        criteria
    }

    #[test]
    fn currency_filter_keeps_either_side_of_the_pair() {
        let transactions = fixture();
        let result = filter(&transactions, &eur_criteria(), now());
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TXN-1", "TXN-2", "TXN-4", "TXN-5"]);
    }

    #[test]
    fn all_statuses_is_the_union_of_each_specific_status() {
        let transactions = fixture();
        let all = filter(&transactions, &eur_criteria(), now());

        let mut union: Vec<&Transaction> = Vec::new();
        for status in TransactionStatus::ALL {
            let mut criteria = eur_criteria();
            criteria.status = StatusSelector::Only(status);
            let subset = filter(&transactions, &criteria, now());
            for t in &subset {
                assert!(all.iter().any(|a| a.id == t.id));
            }
            union.extend(subset);
        }

        assert_eq!(union.len(), all.len());
        for t in &all {
            assert!(union.iter().any(|u| u.id == t.id));
        }
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let transactions = fixture();
        let criteria = eur_criteria();
        let first = filter(&transactions, &criteria, now());
        let second = filter(&transactions, &criteria, now());
        assert_eq!(first, second);
    }

    #[test]
    fn search_matches_name_email_and_id_case_insensitively() {
        let transactions = fixture();

        let mut criteria = eur_criteria();
        criteria.search = Some("JANE".to_string());
        let by_name = filter(&transactions, &criteria, now());
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "TXN-1");

        criteria.search = Some("ama@example".to_string());
        let by_email = filter(&transactions, &criteria, now());
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, "TXN-4");

        criteria.search = Some("txn-5".to_string());
        let by_id = filter(&transactions, &criteria, now());
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "TXN-5");
    }

    #[test]
    fn relative_window_drops_older_transactions() {
        let transactions = fixture();
        let mut criteria = eur_criteria();
        criteria.time = TimeSelector::Window(TimeWindow::H24);
        let ids: Vec<&str> = filter(&transactions, &criteria, now())
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["TXN-1", "TXN-2", "TXN-5"]);
    }

    #[test]
    fn absolute_cutoff_is_inclusive() {
        let transactions = fixture();
        let mut criteria = eur_criteria();
        criteria.time = TimeSelector::Since(now() - Duration::hours(10));
        let ids: Vec<&str> = filter(&transactions, &criteria, now())
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["TXN-1", "TXN-2", "TXN-5"]);
    }

    #[test]
    fn summary_reduces_amounts_fees_and_completed_count() {
        let transactions = fixture();
        let result = filter(&transactions, &eur_criteria(), now());
        let summary = summarize(&result);
        assert!((summary.total_volume - 400.0).abs() < 1e-9);
        assert!((summary.total_fees - 10.0).abs() < 1e-9);
        assert_eq!(summary.completed, 1);
    }
}
