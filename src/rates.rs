use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rates {
    pub cash_in: Decimal,
    pub cash_out: Decimal,
}

/// Current exchange rates keyed by crypto code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, Rates>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, crypto_code: &str, rates: Rates) {
        self.0.insert(crypto_code.to_string(), rates);
    }

    pub fn get(&self, crypto_code: &str) -> Option<&Rates> {
        self.0.get(crypto_code)
    }
}
