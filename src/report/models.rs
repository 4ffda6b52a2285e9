use chrono::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

pub const MANUFACTURER: &str = "lamassu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    /// `stale` is true when the machine checked in recently, hence online.
    pub fn from_stale(stale: bool) -> Self {
        if stale {
            Status::Online
        } else {
            Status::Offline
        }
    }
}

/// A transaction or daily limit. `Unlimited` stands for positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashLimit {
    Limited(Decimal),
    Unlimited,
}

impl CashLimit {
    pub fn as_f64(&self) -> f64 {
        match self {
            CashLimit::Limited(amount) => amount.to_f64().unwrap_or(f64::INFINITY),
            CashLimit::Unlimited => f64::INFINITY,
        }
    }
}

// JSON has no infinity, serde_json writes it out as null
impl Serialize for CashLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

fn iso_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinReport {
    pub crypto_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_in_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_out_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_in_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_out_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationReport {
    pub is_phone: bool,
    pub is_palm_vein: bool,
    pub is_photo: bool,
    pub is_id_doc_scan: bool,
    pub is_fingerprint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineReport {
    pub machine_id: String,
    pub status: Status,
    #[serde(serialize_with = "iso_timestamp")]
    pub last_online: DateTime<Utc>,
    pub cash_in: bool,
    pub cash_out: bool,
    pub manufacturer: String,
    pub cash_in_tx_limit: CashLimit,
    pub cash_out_tx_limit: CashLimit,
    pub cash_in_daily_limit: CashLimit,
    pub cash_out_daily_limit: CashLimit,
    pub fiat_currency: String,
    pub identification: IdentificationReport,
    pub coins: Vec<CoinReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub operator_id: String,
    #[serde(serialize_with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub machines: Vec<MachineReport>,
}
