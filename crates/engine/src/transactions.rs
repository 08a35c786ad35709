//! Remittance transaction primitives.
//!
//! A `Transaction` is one money movement between a client and the desk. The
//! engine only ever emits new or updated values to the host application,
//! which owns the authoritative store (a mapping keyed by `id`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine, rates};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        Self::Pending,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidStatus(other.to_string())),
        }
    }
}

/// Whether the desk is sending money out or paying it in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Send,
    Receive,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount: f64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub exchange_rate: f64,
    pub fee: f64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub receipt_printed: bool,
    pub phone_number: String,
    pub direction: Direction,
    /// Random 7-character confirmation code, assigned once at creation.
    pub unique_code: String,
    /// Structured id (`{currency}-{phone suffix}-{DDMMHHMMSS}-{sequence}`),
    /// assigned once at creation.
    pub format_id: String,
}

impl Transaction {
    /// Builds a new pending transaction.
    ///
    /// The fee defaults to the flat schedule (`amount * 0.025`); use
    /// [`Transaction::with_fee`] to override it explicitly.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        client_name: String,
        client_email: Option<String>,
        amount: f64,
        from_currency: Currency,
        to_currency: Currency,
        exchange_rate: f64,
        phone_number: String,
        direction: Direction,
        unique_code: String,
        format_id: String,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be > 0, got {amount}"
            )));
        }
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(EngineError::InvalidRate(format!(
                "exchange rate must be > 0, got {exchange_rate}"
            )));
        }
        Ok(Self {
            id,
            client_name,
            client_email,
            amount,
            from_currency,
            to_currency,
            exchange_rate,
            fee: rates::fee(amount),
            status: TransactionStatus::Pending,
            created_at,
            receipt_printed: false,
            phone_number,
            direction,
            unique_code,
            format_id,
        })
    }

    /// Replaces the default fee with an explicit one.
    pub fn with_fee(mut self, fee: f64) -> ResultEngine<Self> {
        if !fee.is_finite() || fee < 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "fee must be >= 0, got {fee}"
            )));
        }
        self.fee = fee;
        Ok(self)
    }

    /// Moves the transaction to `next`.
    ///
    /// Only `pending -> {completed, failed, cancelled}` is legal; every
    /// terminal status is final.
    pub fn transition(&mut self, next: TransactionStatus) -> ResultEngine<()> {
        if self.status.is_terminal() || !next.is_terminal() {
            return Err(EngineError::InvalidTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: f64) -> ResultEngine<Transaction> {
        Transaction::new(
            "TXN-1".to_string(),
            "Jane Doe".to_string(),
            Some("jane@example.com".to_string()),
            amount,
            Currency::usd(),
            Currency::try_from("EUR").unwrap(),
            0.92,
            "5551234567".to_string(),
            Direction::Send,
            "K2P9QW1".to_string(),
            "EUR-567-0703140509-00001".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn new_computes_default_fee() {
        let tx = sample(100.0).unwrap();
        assert!((tx.fee - 2.5).abs() < 1e-9);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(!tx.receipt_printed);
    }

    #[test]
    fn new_rejects_non_positive_amounts() {
        assert!(sample(0.0).is_err());
        assert!(sample(-10.0).is_err());
        assert!(sample(f64::NAN).is_err());
    }

    #[test]
    fn with_fee_overrides_schedule() {
        let tx = sample(100.0).unwrap().with_fee(0.0).unwrap();
        assert_eq!(tx.fee, 0.0);
        assert!(sample(100.0).unwrap().with_fee(-1.0).is_err());
    }

    #[test]
    fn pending_reaches_each_terminal_status_once() {
        for terminal in [
            TransactionStatus::Completed,
            TransactionStatus::Failed,
            TransactionStatus::Cancelled,
        ] {
            let mut tx = sample(50.0).unwrap();
            tx.transition(terminal).unwrap();
            assert_eq!(tx.status, terminal);

            // Terminal once reached: no further transitions, not even back
            // to pending.
            for next in TransactionStatus::ALL {
                assert!(tx.transition(next).is_err());
            }
        }
    }

    #[test]
    fn status_parses_its_lowercase_form() {
        for status in TransactionStatus::ALL {
            assert_eq!(TransactionStatus::try_from(status.as_str()), Ok(status));
        }
        assert_eq!(
            TransactionStatus::try_from("done"),
            Err(EngineError::InvalidStatus("done".to_string()))
        );
    }

    #[test]
    fn pending_to_pending_is_not_a_transition() {
        let mut tx = sample(50.0).unwrap();
        assert_eq!(
            tx.transition(TransactionStatus::Pending),
            Err(EngineError::InvalidTransition {
                from: "pending",
                to: "pending",
            })
        );
    }
}
