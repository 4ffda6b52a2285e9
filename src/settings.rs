use rust_decimal::Decimal;
use thiserror::Error;

pub mod scoped;

pub use scoped::{ConfigEntry, ScopedConfig, GLOBAL_SCOPE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("No value configured for {code} (crypto {crypto}, machine {machine})")]
    Missing {
        code: String,
        crypto: String,
        machine: String,
    },
    #[error("Invalid value for {code}: {reason}")]
    Invalid { code: String, reason: String },
}

/// Settings resolved for one crypto on one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoSettings {
    /// Percentage, 0-100 scale.
    pub cash_in_commission: Decimal,
    /// Percentage, 0-100 scale.
    pub cash_out_commission: Decimal,
}

/// Settings resolved for one machine across all cryptos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSettings {
    pub cash_out_enabled: bool,
    pub sms_verification_active: bool,
    pub id_card_data_verification_active: bool,
    pub hard_limit_verification_active: bool,
    pub hard_limit_verification_threshold: Option<Decimal>,
    pub fiat_currency: String,
    pub crypto_currencies: Vec<String>,
}

/// Typed access to configuration scoped by crypto and machine.
pub trait ConfigScope {
    fn crypto_scoped(
        &self,
        crypto_code: &str,
        device_id: &str,
    ) -> Result<CryptoSettings, SettingsError>;

    fn machine_scoped(&self, device_id: &str) -> Result<MachineSettings, SettingsError>;
}
