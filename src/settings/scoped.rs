use super::{ConfigScope, CryptoSettings, MachineSettings, SettingsError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GLOBAL_SCOPE: &str = "global";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(default = "global_scope")]
    pub crypto: String,
    #[serde(default = "global_scope")]
    pub machine: String,
    pub code: String,
    pub value: Value,
}

fn global_scope() -> String {
    GLOBAL_SCOPE.to_string()
}

impl ConfigEntry {
    pub fn global(code: &str, value: Value) -> Self {
        ConfigEntry {
            crypto: global_scope(),
            machine: global_scope(),
            code: code.to_string(),
            value,
        }
    }

    pub fn scoped(crypto: &str, machine: &str, code: &str, value: Value) -> Self {
        ConfigEntry {
            crypto: crypto.to_string(),
            machine: machine.to_string(),
            code: code.to_string(),
            value,
        }
    }

    fn applies_to(&self, crypto: &str, machine: &str) -> bool {
        (self.crypto == GLOBAL_SCOPE || self.crypto == crypto)
            && (self.machine == GLOBAL_SCOPE || self.machine == machine)
    }

    // A machine match outranks a crypto match.
    fn specificity(&self) -> u8 {
        let machine = if self.machine != GLOBAL_SCOPE { 2 } else { 0 };
        let crypto = if self.crypto != GLOBAL_SCOPE { 1 } else { 0 };
        machine + crypto
    }
}

/// Operator configuration stored as a flat list of scoped entries.
///
/// Lookups pick the most specific entry for the requested crypto and
/// machine. On equal specificity the later entry wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedConfig {
    entries: Vec<ConfigEntry>,
}

impl ScopedConfig {
    pub fn new(entries: Vec<ConfigEntry>) -> Self {
        ScopedConfig { entries }
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn resolve(&self, crypto: &str, machine: &str, code: &str) -> Option<&Value> {
        self.entries
            .iter()
            .filter(|entry| entry.code == code && entry.applies_to(crypto, machine))
            .max_by_key(|entry| entry.specificity())
            .map(|entry| &entry.value)
            .filter(|value| !value.is_null())
    }

    fn lookup(&self, crypto: &str, machine: &str, code: &str) -> Result<&Value, SettingsError> {
        self.resolve(crypto, machine, code)
            .ok_or_else(|| SettingsError::Missing {
                code: code.to_string(),
                crypto: crypto.to_string(),
                machine: machine.to_string(),
            })
    }

    fn get_bool(&self, crypto: &str, machine: &str, code: &str) -> Result<bool, SettingsError> {
        self.lookup(crypto, machine, code)?
            .as_bool()
            .ok_or_else(|| invalid(code, "expected a boolean"))
    }

    fn get_decimal(
        &self,
        crypto: &str,
        machine: &str,
        code: &str,
    ) -> Result<Decimal, SettingsError> {
        let value = self.lookup(crypto, machine, code)?;
        match value {
            Value::Number(_) | Value::String(_) => serde_json::from_value::<Decimal>(value.clone())
                .map_err(|e| invalid(code, &e.to_string())),
            _ => Err(invalid(code, "expected a number")),
        }
    }

    fn get_string(&self, crypto: &str, machine: &str, code: &str) -> Result<String, SettingsError> {
        self.lookup(crypto, machine, code)?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| invalid(code, "expected a string"))
    }

    fn get_string_list(
        &self,
        crypto: &str,
        machine: &str,
        code: &str,
    ) -> Result<Vec<String>, SettingsError> {
        self.lookup(crypto, machine, code)?
            .as_array()
            .ok_or_else(|| invalid(code, "expected a list"))?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| invalid(code, "expected a list of strings"))
            })
            .collect()
    }
}

fn invalid(code: &str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        code: code.to_string(),
        reason: reason.to_string(),
    }
}

impl ConfigScope for ScopedConfig {
    fn crypto_scoped(
        &self,
        crypto_code: &str,
        device_id: &str,
    ) -> Result<CryptoSettings, SettingsError> {
        Ok(CryptoSettings {
            cash_in_commission: self.get_decimal(crypto_code, device_id, "cashInCommission")?,
            cash_out_commission: self.get_decimal(crypto_code, device_id, "cashOutCommission")?,
        })
    }

    fn machine_scoped(&self, device_id: &str) -> Result<MachineSettings, SettingsError> {
        let hard_limit_verification_active =
            self.get_bool(GLOBAL_SCOPE, device_id, "hardLimitVerificationActive")?;
        let hard_limit_verification_threshold = if hard_limit_verification_active {
            Some(self.get_decimal(GLOBAL_SCOPE, device_id, "hardLimitVerificationThreshold")?)
        } else {
            None
        };

        Ok(MachineSettings {
            cash_out_enabled: self.get_bool(GLOBAL_SCOPE, device_id, "cashOutEnabled")?,
            sms_verification_active: self.get_bool(
                GLOBAL_SCOPE,
                device_id,
                "smsVerificationActive",
            )?,
            id_card_data_verification_active: self.get_bool(
                GLOBAL_SCOPE,
                device_id,
                "idCardDataVerificationActive",
            )?,
            hard_limit_verification_active,
            hard_limit_verification_threshold,
            fiat_currency: self.get_string(GLOBAL_SCOPE, device_id, "fiatCurrency")?,
            crypto_currencies: self.get_string_list(GLOBAL_SCOPE, device_id, "cryptoCurrencies")?,
        })
    }
}
