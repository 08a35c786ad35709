//! Exchange-rate reference data and the conversion/fee arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Currency, transactions::Transaction};

/// Flat fee schedule applied to every transaction: 2.5% of the amount.
///
/// No tiering and no minimums.
pub const FEE_RATE: f64 = 0.025;

/// Converts an amount between currencies using a quoted rate.
#[must_use]
pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Fee charged for moving `amount`.
#[must_use]
pub fn fee(amount: f64) -> f64 {
    amount * FEE_RATE
}

/// Amount the receiver gets when a transaction is paid out in the currency
/// of `country`: funds already denominated in that currency pass through
/// unconverted, everything else is converted at `rate`.
#[must_use]
pub fn receiving_amount(transaction: &Transaction, country: &CountryInfo, rate: f64) -> f64 {
    if transaction.from_currency == country.currency {
        transaction.amount
    } else {
        convert(transaction.amount, rate)
    }
}

/// Quoted conversion multiplier for one currency pair at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub pair: String,
    pub rate: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_updated: DateTime<Utc>,
}

/// Read-only reference data for one destination country.
///
/// Supplied externally and never mutated by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub flag: String,
    pub name: String,
    pub currency: Currency,
    pub rate: ExchangeRate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::Direction;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fee_is_two_and_a_half_percent() {
        assert!(close(fee(100.0), 2.5));
        assert!(close(fee(1.0), 0.025));
        assert!(close(fee(40.0), 1.0));
    }

    #[test]
    fn convert_multiplies_by_rate() {
        assert!(close(convert(100.0, 0.92), 92.0));
        assert!(close(convert(250.0, 1.0), 250.0));
    }

    #[test]
    fn receiving_amount_passes_through_same_currency() {
        let eur = Currency::try_from("EUR").unwrap();
        let country = CountryInfo {
            flag: "🇪🇺".to_string(),
            name: "Eurozone".to_string(),
            currency: eur.clone(),
            rate: ExchangeRate {
                pair: "USD/EUR".to_string(),
                rate: 0.92,
                change: 0.0,
                change_percent: 0.0,
                last_updated: Utc::now(),
            },
        };

        let from_eur = Transaction::new(
            "TXN-1".to_string(),
            "Ama".to_string(),
            None,
            100.0,
            eur.clone(),
            Currency::usd(),
            0.92,
            "5550001".to_string(),
            Direction::Receive,
            "AAAAAAA".to_string(),
            "EUR-001-0101000000-00001".to_string(),
            Utc::now(),
        )
        .unwrap();
        assert!(close(receiving_amount(&from_eur, &country, 0.92), 100.0));

        let from_usd = Transaction::new(
            "TXN-2".to_string(),
            "Ama".to_string(),
            None,
            100.0,
            Currency::usd(),
            eur,
            0.92,
            "5550001".to_string(),
            Direction::Send,
            "AAAAAAB".to_string(),
            "EUR-001-0101000000-00002".to_string(),
            Utc::now(),
        )
        .unwrap();
        assert!(close(receiving_amount(&from_usd, &country, 0.92), 92.0));
    }
}
