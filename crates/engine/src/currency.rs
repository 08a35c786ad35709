use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like 3-letter currency code, stored uppercase.
///
/// The desk handles whatever corridors the operator has configured, so the
/// code is validated rather than enumerated: exactly three ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Settlement currency for outbound remittances.
    #[must_use]
    pub fn usd() -> Self {
        Currency("USD".to_string())
    }

    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Currency(code))
        } else {
            Err(EngineError::UnsupportedCurrency(value.to_string()))
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::try_from(value.as_str())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(Currency::try_from(" eur ").unwrap().code(), "EUR");
        assert_eq!(Currency::try_from("GHS").unwrap().code(), "GHS");
    }

    #[test]
    fn parse_rejects_bad_codes() {
        assert!(Currency::try_from("").is_err());
        assert!(Currency::try_from("EU").is_err());
        assert!(Currency::try_from("EURO").is_err());
        assert!(Currency::try_from("E1R").is_err());
    }
}
