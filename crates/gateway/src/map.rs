//! Domain-to-wire conversions.

use api_types::{ClientRecord, InvoiceRecord, RateRecord, SyncRequest, TransactionRecord};
use engine::{ExchangeRate, Transaction};

/// Flattens a domain transaction into its wire form.
pub fn transaction_record(transaction: &Transaction) -> TransactionRecord {
    TransactionRecord {
        id: transaction.id.clone(),
        client_name: transaction.client_name.clone(),
        client_email: transaction.client_email.clone(),
        amount: transaction.amount,
        from_currency: transaction.from_currency.code().to_string(),
        to_currency: transaction.to_currency.code().to_string(),
        exchange_rate: transaction.exchange_rate,
        fee: transaction.fee,
        status: transaction.status.as_str().to_string(),
        created_at: transaction.created_at,
        receipt_printed: transaction.receipt_printed,
        phone_number: transaction.phone_number.clone(),
        direction: transaction.direction.as_str().to_string(),
        unique_code: transaction.unique_code.clone(),
        format_id: transaction.format_id.clone(),
    }
}

pub fn rate_record(rate: &ExchangeRate) -> RateRecord {
    RateRecord {
        pair: rate.pair.clone(),
        rate: rate.rate,
        change: rate.change,
        change_percent: rate.change_percent,
        last_updated: rate.last_updated,
    }
}

/// Assembles one sync batch from the desk's local data.
pub fn batch(
    transactions: &[Transaction],
    clients: &[ClientRecord],
    invoices: &[InvoiceRecord],
    rates: &[ExchangeRate],
) -> SyncRequest {
    SyncRequest {
        transactions: transactions.iter().map(transaction_record).collect(),
        clients: clients.to_vec(),
        invoices: invoices.to_vec(),
        exchange_rates: rates.iter().map(rate_record).collect(),
    }
}
