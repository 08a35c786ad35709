//! Wire types shared between the gateway and the remote store.
//!
//! Everything here is plain serde data: no validation and no behavior, so
//! records round-trip exactly as the remote sends them.

pub use records::{ClientRecord, InvoiceRecord, RateRecord, TransactionRecord};
pub use sync::{ConnectionStatus, SyncCounts, SyncRequest};

mod records;
mod sync;
