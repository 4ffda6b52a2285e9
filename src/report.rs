use crate::db::{models::Device, DeviceSource};
use crate::radar::RadarClient;
use crate::rates::RateTable;
use crate::settings::{ConfigScope, SettingsError, GLOBAL_SCOPE};
use crate::Error;
use chrono::prelude::*;
use itertools::Itertools;
use log::{debug, info};
use rust_decimal::Decimal;

pub mod models;

use models::{
    CashLimit, CoinReport, FleetReport, IdentificationReport, MachineReport, Status, MANUFACTURER,
};

/// Configuration and exchange rates captured for one reporting run.
#[derive(Debug, Clone)]
pub struct ReportInput<C> {
    pub config: C,
    pub rates: RateTable,
}

fn map_coin<C: ConfigScope>(
    input: &ReportInput<C>,
    device_id: &str,
    crypto_code: &str,
) -> Result<CoinReport, Error> {
    let crypto_config = input.config.crypto_scoped(crypto_code, device_id)?;
    let rates = input
        .rates
        .get(crypto_code)
        .ok_or_else(|| Error::MissingRate {
            crypto_code: crypto_code.to_string(),
        })?;

    Ok(CoinReport {
        crypto_code: crypto_code.to_string(),
        cash_in_fee: crypto_config.cash_in_commission / Decimal::ONE_HUNDRED,
        cash_out_fee: crypto_config.cash_out_commission / Decimal::ONE_HUNDRED,
        cash_in_rate: rates.cash_in,
        cash_out_rate: rates.cash_out,
    })
}

fn map_machine<C: ConfigScope>(
    input: &ReportInput<C>,
    device: &Device,
) -> Result<MachineReport, Error> {
    let device_id = device.device_id.as_str();
    let machine_config = input.config.machine_scoped(device_id)?;

    let cash_limit = match (
        machine_config.hard_limit_verification_active,
        machine_config.hard_limit_verification_threshold,
    ) {
        (true, Some(threshold)) => CashLimit::Limited(threshold),
        (true, None) => {
            return Err(SettingsError::Missing {
                code: "hardLimitVerificationThreshold".to_string(),
                crypto: GLOBAL_SCOPE.to_string(),
                machine: device_id.to_string(),
            }
            .into())
        }
        (false, _) => CashLimit::Unlimited,
    };

    let identification = IdentificationReport {
        is_phone: machine_config.sms_verification_active,
        is_palm_vein: false,
        is_photo: false,
        is_id_doc_scan: machine_config.id_card_data_verification_active,
        is_fingerprint: false,
    };

    debug!(
        "Mapping machine {} with coins {}",
        device_id,
        machine_config.crypto_currencies.iter().join(", ")
    );
    let coins = machine_config
        .crypto_currencies
        .iter()
        .map(|crypto_code| map_coin(input, device_id, crypto_code))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MachineReport {
        machine_id: device.device_id.clone(),
        status: Status::from_stale(device.stale),
        last_online: device.last_online,
        cash_in: true,
        cash_out: machine_config.cash_out_enabled,
        manufacturer: MANUFACTURER.to_string(),
        cash_in_tx_limit: cash_limit,
        cash_out_tx_limit: cash_limit,
        cash_in_daily_limit: cash_limit,
        cash_out_daily_limit: cash_limit,
        fiat_currency: machine_config.fiat_currency,
        identification,
        coins,
    })
}

/// Projects device rows into a report. Machines keep the order of `devices`.
pub fn map_record<C: ConfigScope>(
    operator_id: &str,
    devices: &[Device],
    input: &ReportInput<C>,
    timestamp: DateTime<Utc>,
) -> Result<FleetReport, Error> {
    let machines = devices
        .iter()
        .map(|device| map_machine(input, device))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FleetReport {
        operator_id: operator_id.to_string(),
        timestamp,
        machines,
    })
}

pub async fn build_report<S, C>(
    source: &S,
    operator_id: &str,
    input: &ReportInput<C>,
) -> Result<FleetReport, Error>
where
    S: DeviceSource + Sync + ?Sized,
    C: ConfigScope,
{
    let timestamp = Utc::now();
    let devices = source.reportable_devices().await?;
    map_record(operator_id, &devices, input, timestamp)
}

/// Builds a fresh report and submits it. The first failure wins.
pub async fn update<S, C>(
    source: &S,
    client: &RadarClient,
    input: &ReportInput<C>,
) -> Result<(), Error>
where
    S: DeviceSource + Sync + ?Sized,
    C: ConfigScope,
{
    let report = build_report(source, client.operator_id(), input).await?;
    client.submit(&report).await?;
    info!(
        "CoinATMRadar update complete for operator {}",
        report.operator_id
    );
    Ok(())
}
