//! Push/pull gateway between the local desk and a remote store.
//!
//! The desk works offline first: syncing is explicit, record-at-a-time, and
//! best effort. One failed record never aborts the batch; failures are
//! collected into the report so the operator can retry later.

use api_types::{ConnectionStatus, SyncCounts, SyncRequest};

pub use http::HttpStore;
pub use map::{batch, rate_record, transaction_record};

mod http;
mod map;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ResultGateway<T> = Result<T, GatewayError>;

/// Remote persistence surface the gateway talks to.
///
/// [`HttpStore`] is the production implementation; tests substitute fakes.
#[async_trait::async_trait]
pub trait RemoteStore {
    async fn test_connection(&self) -> ResultGateway<()>;

    async fn fetch_transactions(&self) -> ResultGateway<Vec<api_types::TransactionRecord>>;
    async fn fetch_clients(&self) -> ResultGateway<Vec<api_types::ClientRecord>>;
    async fn fetch_invoices(&self) -> ResultGateway<Vec<api_types::InvoiceRecord>>;
    async fn fetch_rates(&self) -> ResultGateway<Vec<api_types::RateRecord>>;

    async fn upsert_transaction(
        &self,
        record: &api_types::TransactionRecord,
    ) -> ResultGateway<()>;
    async fn upsert_client(&self, record: &api_types::ClientRecord) -> ResultGateway<()>;
    async fn upsert_invoice(&self, record: &api_types::InvoiceRecord) -> ResultGateway<()>;
    async fn upsert_rate(&self, record: &api_types::RateRecord) -> ResultGateway<()>;
}

/// What one sync run achieved.
#[derive(Clone, Debug, Default)]
pub struct SyncReport {
    pub counts: SyncCounts,
    pub errors: Vec<String>,
}

impl SyncReport {
    /// True when every record in the batch landed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records that made it to the remote store.
    #[must_use]
    pub fn synced(&self) -> usize {
        self.counts.total()
    }
}

/// Pushes the whole batch, one record at a time.
///
/// Categories are independent: a failure in one never stops the others, and
/// within a category the remaining records are still attempted.
pub async fn sync<S: RemoteStore + ?Sized>(store: &S, request: &SyncRequest) -> SyncReport {
    let mut report = SyncReport::default();

    for record in &request.transactions {
        match store.upsert_transaction(record).await {
            Ok(()) => report.counts.transactions += 1,
            Err(err) => report.errors.push(format!("transaction {}: {err}", record.id)),
        }
    }
    for record in &request.clients {
        match store.upsert_client(record).await {
            Ok(()) => report.counts.clients += 1,
            Err(err) => report.errors.push(format!("client {}: {err}", record.id)),
        }
    }
    for record in &request.invoices {
        match store.upsert_invoice(record).await {
            Ok(()) => report.counts.invoices += 1,
            Err(err) => report.errors.push(format!("invoice {}: {err}", record.id)),
        }
    }
    for record in &request.exchange_rates {
        match store.upsert_rate(record).await {
            Ok(()) => report.counts.exchange_rates += 1,
            Err(err) => report.errors.push(format!("rate {}: {err}", record.pair)),
        }
    }

    if report.success() {
        tracing::info!(synced = report.synced(), "sync complete");
    } else {
        tracing::warn!(
            synced = report.synced(),
            failed = report.errors.len(),
            "sync finished with failures"
        );
    }
    report
}

/// Probes the remote store, degrading any error into a failed status
/// instead of propagating it.
pub async fn test_connection<S: RemoteStore + ?Sized>(store: &S) -> ConnectionStatus {
    match store.test_connection().await {
        Ok(()) => ConnectionStatus {
            success: true,
            message: "Connection successful".to_string(),
        },
        Err(err) => ConnectionStatus {
            success: false,
            message: format!("Connection failed: {err}"),
        },
    }
}
