use serde::{Deserialize, Serialize};

use crate::records::{ClientRecord, InvoiceRecord, RateRecord, TransactionRecord};

/// Everything one sync pushes to the remote store, grouped by category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub exchange_rates: Vec<RateRecord>,
}

/// Per-category record counts for one sync run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    pub transactions: usize,
    pub clients: usize,
    pub invoices: usize,
    pub exchange_rates: usize,
}

impl SyncCounts {
    #[must_use]
    pub fn total(self) -> usize {
        self.transactions + self.clients + self.invoices + self.exchange_rates
    }
}

/// Outcome of a connectivity probe, phrased for the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}
