//! Per-country remittance session.
//!
//! A `Wizard` drives one operator session for a single destination country:
//! choose a direction, fill the client form, walk pending transactions,
//! capture receiver details and confirm. The wizard owns only a snapshot of
//! the transaction collection; every created or updated transaction is
//! handed to the [`WizardHost`], which owns the authoritative store.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{
    Currency, ResultEngine,
    filter::{self, FilterCriteria, FilterSummary, StatusSelector, TimeSelector, TimeWindow},
    ident,
    notify::Notifier,
    rates::{self, CountryInfo},
    transactions::{Direction, Transaction, TransactionStatus},
};

const SECURE_DELAY: Duration = Duration::from_millis(2000);
const SECURE_SETTLE: Duration = Duration::from_millis(500);
const PROCESS_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Overview,
    SendForm,
    PendingList,
    ReceiverInfo,
    Preview,
}

/// How a filled send form is turned into a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    /// Persist as pending and end the session.
    SaveOnly,
    /// Persist as pending and continue to receiver capture.
    SaveAndContinue,
    /// Persist as pending through the staged connection flow, then end.
    CreateImmediately,
}

/// Client details captured on the send form. All fields start empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendForm {
    pub full_name: String,
    pub email: String,
    pub amount: String,
    pub phone_number: String,
}

/// Receiver details captured before preview.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiverInfo {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Host-side effects of a wizard session.
///
/// `transaction_created` receives both brand-new transactions and updates
/// to existing ones; the host upserts by `id`.
pub trait WizardHost {
    fn transaction_created(&mut self, transaction: Transaction);
    fn send_money(&mut self, currency: &Currency);
    fn receive_money(&mut self, currency: &Currency);
    fn closed(&mut self);
}

pub struct Wizard {
    country: CountryInfo,
    transactions: Vec<Transaction>,
    step: WizardStep,
    direction: Direction,
    form: SendForm,
    receiver: ReceiverInfo,
    selected: Option<Transaction>,
    rate_override: Option<f64>,
    time: TimeSelector,
    status: StatusSelector,
    search: String,
    finished: bool,
}

impl Wizard {
    /// Opens a session on a snapshot of the host's transaction collection.
    pub fn open(country: CountryInfo, transactions: Vec<Transaction>) -> Self {
        Self {
            country,
            transactions,
            step: WizardStep::Overview,
            direction: Direction::Send,
            form: SendForm::default(),
            receiver: ReceiverInfo::default(),
            selected: None,
            rate_override: None,
            time: TimeSelector::default(),
            status: StatusSelector::default(),
            search: String::new(),
            finished: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn country(&self) -> &CountryInfo {
        &self.country
    }

    pub fn selected(&self) -> Option<&Transaction> {
        self.selected.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn form_mut(&mut self) -> &mut SendForm {
        &mut self.form
    }

    pub fn receiver_mut(&mut self) -> &mut ReceiverInfo {
        &mut self.receiver
    }

    /// Starts the outbound flow from the overview.
    pub fn choose_send(&mut self, host: &mut impl WizardHost) {
        if self.step != WizardStep::Overview || self.finished {
            tracing::debug!(step = ?self.step, "ignoring send trigger outside overview");
            return;
        }
        self.direction = Direction::Send;
        self.step = WizardStep::SendForm;
        host.send_money(&self.country.currency);
    }

    /// Starts the inbound flow from the overview.
    pub fn choose_receive(&mut self, host: &mut impl WizardHost) {
        if self.step != WizardStep::Overview || self.finished {
            tracing::debug!(step = ?self.step, "ignoring receive trigger outside overview");
            return;
        }
        self.direction = Direction::Receive;
        self.step = WizardStep::PendingList;
        host.receive_money(&self.country.currency);
    }

    /// Submits the send form in the chosen mode.
    ///
    /// Validation failures surface through `notifier` and leave the wizard
    /// on the form; only construction errors propagate as `Err`.
    pub async fn submit_form(
        &mut self,
        mode: SubmitMode,
        now: DateTime<Utc>,
        notifier: &impl Notifier,
        host: &mut impl WizardHost,
    ) -> ResultEngine<()> {
        if self.step != WizardStep::SendForm || self.finished {
            tracing::debug!(step = ?self.step, "ignoring form submit outside send form");
            return Ok(());
        }
        let Some(amount) = self.validated_amount(notifier) else {
            return Ok(());
        };

        match mode {
            SubmitMode::SaveAndContinue => {
                let transaction = self.build_transaction(amount, now)?;
                notifier.success(&format!(
                    "Transaction saved as pending. Code: {}",
                    transaction.unique_code
                ));
                self.selected = Some(transaction.clone());
                host.transaction_created(transaction);
                self.step = WizardStep::ReceiverInfo;
            }
            SubmitMode::SaveOnly => {
                let transaction = self.build_transaction(amount, now)?;
                notifier.success(&format!(
                    "Transaction saved as pending. Code: {}",
                    transaction.unique_code
                ));
                host.transaction_created(transaction);
                self.finish(host);
            }
            SubmitMode::CreateImmediately => {
                notifier.info("Securing connection...");
                tokio::time::sleep(SECURE_DELAY).await;
                notifier.success("Connection secured!");
                tokio::time::sleep(SECURE_SETTLE).await;
                let transaction = self.build_transaction(amount, now)?;
                notifier.success("Transaction created successfully!");
                notifier.info(&format!("Unique Code: {}", transaction.unique_code));
                notifier.info(&format!("Transaction ID: {}", transaction.format_id));
                host.transaction_created(transaction);
                self.finish(host);
            }
        }
        Ok(())
    }

    /// Picks one of the country's pending transactions to continue with.
    pub fn select_pending(&mut self, id: &str, notifier: &impl Notifier) {
        if self.step != WizardStep::PendingList || self.finished {
            tracing::debug!(step = ?self.step, "ignoring selection outside pending list");
            return;
        }
        match self.transactions.iter().find(|t| t.id == id) {
            Some(transaction) => self.selected = Some(transaction.clone()),
            None => notifier.error("Transaction not found"),
        }
    }

    /// Moves from the pending list to receiver capture.
    pub fn continue_from_pending(&mut self, notifier: &impl Notifier) {
        if self.step != WizardStep::PendingList || self.finished {
            tracing::debug!(step = ?self.step, "ignoring continue outside pending list");
            return;
        }
        if self.selected.is_none() {
            notifier.error("Select a transaction to continue");
            return;
        }
        self.step = WizardStep::ReceiverInfo;
    }

    /// Validates receiver details and advances to the preview.
    pub fn submit_receiver(&mut self, notifier: &impl Notifier) {
        if self.step != WizardStep::ReceiverInfo || self.finished {
            tracing::debug!(step = ?self.step, "ignoring receiver submit outside receiver step");
            return;
        }
        if self.receiver.full_name.trim().is_empty() {
            notifier.error("Receiver full name is required");
            return;
        }
        self.step = WizardStep::Preview;
    }

    /// Confirms the previewed transaction, completing it after the
    /// simulated processing delay.
    pub async fn confirm(&mut self, notifier: &impl Notifier, host: &mut impl WizardHost) {
        if self.step != WizardStep::Preview || self.finished {
            tracing::debug!(step = ?self.step, "ignoring confirm outside preview");
            return;
        }
        let Some(mut transaction) = self.selected.clone() else {
            notifier.error("No transaction selected");
            return;
        };

        notifier.info("Processing transaction...");
        tokio::time::sleep(PROCESS_DELAY).await;

        if let Err(err) = transaction.transition(TransactionStatus::Completed) {
            notifier.error(&err.to_string());
            return;
        }
        notifier.success("Transaction completed successfully!");
        host.transaction_created(transaction);
        self.finish(host);
    }

    /// Steps back one screen. Returning to the overview discards drafts.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Preview => WizardStep::ReceiverInfo,
            WizardStep::ReceiverInfo => match self.direction {
                Direction::Receive => WizardStep::PendingList,
                Direction::Send => WizardStep::SendForm,
            },
            WizardStep::PendingList | WizardStep::SendForm => {
                self.reset_drafts();
                WizardStep::Overview
            }
            WizardStep::Overview => WizardStep::Overview,
        };
    }

    /// Ends the session without emitting anything.
    pub fn close(&mut self, host: &mut impl WizardHost) {
        self.finish(host);
    }

    /// Overrides the displayed rate for the rest of the session. Created
    /// records keep the country's quoted rate.
    pub fn set_rate_override(&mut self, rate: f64) -> ResultEngine<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(crate::EngineError::InvalidRate(format!(
                "rate override must be > 0, got {rate}"
            )));
        }
        self.rate_override = Some(rate);
        Ok(())
    }

    pub fn clear_rate_override(&mut self) {
        self.rate_override = None;
    }

    /// Rate in force: the override when set, otherwise the country's quote.
    pub fn effective_rate(&self) -> f64 {
        self.rate_override.unwrap_or(self.country.rate.rate)
    }

    /// Payout amount for `transaction` at the effective rate.
    pub fn receiving_amount(&self, transaction: &Transaction) -> f64 {
        rates::receiving_amount(transaction, &self.country, self.effective_rate())
    }

    pub fn set_time_window(&mut self, window: TimeWindow) {
        self.time = TimeSelector::Window(window);
    }

    pub fn set_since(&mut self, at: DateTime<Utc>) {
        self.time = TimeSelector::Since(at);
    }

    pub fn set_status_filter(&mut self, status: StatusSelector) {
        self.status = status;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Resets search and widens the window to the last month.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status = StatusSelector::All;
        self.time = TimeSelector::Window(TimeWindow::M1);
    }

    /// Snapshot transactions visible under the current filters.
    pub fn visible_transactions(&self, now: DateTime<Utc>) -> Vec<&Transaction> {
        filter::filter(&self.transactions, &self.criteria(), now)
    }

    /// Volume, fees and completion count over the visible transactions.
    pub fn summary(&self, now: DateTime<Utc>) -> FilterSummary {
        filter::summarize(&self.visible_transactions(now))
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            currency: self.country.currency.clone(),
            time: self.time,
            status: self.status,
            search: if self.search.trim().is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
        }
    }

    /// Form validation, surfacing the first failure as a user message.
    fn validated_amount(&self, notifier: &impl Notifier) -> Option<f64> {
        if self.form.full_name.trim().is_empty() {
            notifier.error("Full name is required");
            return None;
        }
        let amount = match self.form.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => {
                notifier.error("Valid amount is required");
                return None;
            }
        };
        if self.form.phone_number.trim().is_empty() {
            notifier.error("Phone number is required");
            return None;
        }
        Some(amount)
    }

    fn build_transaction(&self, amount: f64, now: DateTime<Utc>) -> ResultEngine<Transaction> {
        let (from, to) = match self.direction {
            Direction::Send => (Currency::usd(), self.country.currency.clone()),
            Direction::Receive => (self.country.currency.clone(), Currency::usd()),
        };
        // The manual override only changes the displayed receiving amount;
        // the record is priced at the country's quoted rate.
        Transaction::new(
            ident::transaction_id(now),
            self.form.full_name.trim().to_string(),
            Some(self.form.email.trim().to_string()).filter(|e| !e.is_empty()),
            amount,
            from,
            to,
            self.country.rate.rate,
            self.form.phone_number.trim().to_string(),
            self.direction,
            ident::unique_code(&mut rand::thread_rng()),
            ident::format_id(
                &self.country.currency,
                &self.form.phone_number,
                self.transactions.len(),
                now,
            ),
            now,
        )
    }

    fn reset_drafts(&mut self) {
        self.form = SendForm::default();
        self.receiver = ReceiverInfo::default();
        self.selected = None;
        self.status = StatusSelector::All;
    }

    fn finish(&mut self, host: &mut impl WizardHost) {
        self.finished = true;
        host.closed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_amount_rejects_unparseable_input() {
        let country = CountryInfo {
            flag: "🇪🇺".to_string(),
            name: "Eurozone".to_string(),
            currency: Currency::try_from("EUR").unwrap(),
            rate: crate::rates::ExchangeRate {
                pair: "USD/EUR".to_string(),
                rate: 0.92,
                change: 0.0,
                change_percent: 0.0,
                last_updated: Utc::now(),
            },
        };
        let mut wizard = Wizard::open(country, Vec::new());
        wizard.form_mut().full_name = "Jane".to_string();
        wizard.form_mut().amount = "a lot".to_string();
        wizard.form_mut().phone_number = "5551234567".to_string();
        assert!(wizard.validated_amount(&crate::NullNotifier).is_none());

        wizard.form_mut().amount = "100".to_string();
        assert_eq!(wizard.validated_amount(&crate::NullNotifier), Some(100.0));
    }
}
