use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One remittance transaction as the remote store sees it.
///
/// Status and direction travel as their lowercase string forms; the gateway
/// maps them back to the engine's enums when pulling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: f64,
    pub fee: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub receipt_printed: bool,
    pub phone_number: String,
    pub direction: String,
    pub unique_code: String,
    pub format_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub client_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub issued_at: DateTime<Utc>,
}

/// Quoted rate for one currency pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub pair: String,
    pub rate: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_record_serializes_status_as_a_plain_string() {
        let record = TransactionRecord {
            id: "TXN-1".to_string(),
            client_name: "Jane Doe".to_string(),
            client_email: None,
            amount: 100.0,
            from_currency: "USD".to_string(),
            to_currency: "EUR".to_string(),
            exchange_rate: 0.92,
            fee: 2.5,
            status: "pending".to_string(),
            created_at: Utc::now(),
            receipt_printed: false,
            phone_number: "5551234567".to_string(),
            direction: "send".to_string(),
            unique_code: "K2P9QW1".to_string(),
            format_id: "EUR-567-0703140509-00001".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["direction"], "send");
        assert_eq!(json["client_email"], serde_json::Value::Null);
    }
}
