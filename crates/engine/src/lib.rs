pub use currency::Currency;
pub use error::EngineError;
pub use filter::{FilterCriteria, FilterSummary, StatusSelector, TimeSelector, TimeWindow};
pub use notify::{Notifier, NullNotifier};
pub use rates::{CountryInfo, ExchangeRate, FEE_RATE, convert, fee};
pub use transactions::{Direction, Transaction, TransactionStatus};
pub use wizard::{ReceiverInfo, SendForm, SubmitMode, Wizard, WizardHost, WizardStep};

mod currency;
mod error;
pub mod filter;
pub mod ident;
mod notify;
mod rates;
mod transactions;
mod wizard;

pub type ResultEngine<T> = Result<T, EngineError>;
