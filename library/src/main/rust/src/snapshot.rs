// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Framework facts collected by the Kotlin layer and handed over as JSON.
//!
//! Build fields, packages, sensors and telephony need the Android framework,
//! so the host gathers them once and Rust reads files and properties itself.
//! A missing section means the system service was unavailable; a missing or
//! `null` list inside a present section means that query was refused.

use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::context::{
    BuildInfo, DeviceContext, PackageSource, PhoneType, SensorInfo, SensorKind, SensorSource,
    SimState, TelephonySource,
};
use crate::error::SignalError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSnapshot {
    pub build: BuildInfo,
    pub packages: Option<PackageSnapshot>,
    pub sensors: Option<SensorSnapshot>,
    pub telephony: Option<TelephonySnapshot>,
    pub config: Option<DetectorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSnapshot {
    pub launcher_activities: Option<Vec<String>>,
    pub installed_applications: Option<Vec<String>>,
    pub running_services: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSnapshot {
    pub sensors: Option<Vec<SensorInfo>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelephonySnapshot {
    pub network_operator_name: Option<String>,
    pub sim_state: Option<SimState>,
    pub phone_type: Option<PhoneType>,
    pub line_number: Option<String>,
    /// READ_PHONE_NUMBERS was not granted
    pub line_number_denied: bool,
}

impl DeviceSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Attach the native file and property readers
    pub fn into_context(self) -> DeviceContext {
        let config = self.config.unwrap_or_default();
        let mut ctx = DeviceContext::new(self.build, config);
        if let Some(packages) = self.packages {
            ctx = ctx.with_packages(packages);
        }
        if let Some(sensors) = self.sensors {
            ctx = ctx.with_sensors(sensors);
        }
        if let Some(telephony) = self.telephony {
            ctx = ctx.with_telephony(telephony);
        }
        ctx
    }
}

fn reported<T: Clone>(value: &Option<T>, what: &'static str) -> Result<T, SignalError> {
    value.clone().ok_or(SignalError::Unavailable(what))
}

impl PackageSource for PackageSnapshot {
    fn launcher_activities(&self) -> Result<Vec<String>, SignalError> {
        reported(&self.launcher_activities, "launcher activities")
    }

    fn installed_applications(&self) -> Result<Vec<String>, SignalError> {
        reported(&self.installed_applications, "installed applications")
    }

    fn running_services(&self, limit: usize) -> Result<Vec<String>, SignalError> {
        let mut services = reported(&self.running_services, "running services")?;
        services.truncate(limit);
        Ok(services)
    }
}

impl SensorSource for SensorSnapshot {
    fn sensor_list(&self) -> Result<Vec<SensorInfo>, SignalError> {
        reported(&self.sensors, "sensor list")
    }

    fn default_sensor(&self, kind: SensorKind) -> Result<Option<SensorInfo>, SignalError> {
        let sensors = self
            .sensors
            .as_ref()
            .ok_or(SignalError::Unavailable("sensor list"))?;
        Ok(sensors
            .iter()
            .find(|sensor| sensor.sensor_type == kind.android_type())
            .cloned())
    }
}

impl TelephonySource for TelephonySnapshot {
    fn network_operator_name(&self) -> Result<Option<String>, SignalError> {
        Ok(self.network_operator_name.clone())
    }

    fn sim_state(&self) -> Result<SimState, SignalError> {
        reported(&self.sim_state, "SIM state")
    }

    fn phone_type(&self) -> Result<PhoneType, SignalError> {
        reported(&self.phone_type, "phone type")
    }

    fn line_number(&self) -> Result<Option<String>, SignalError> {
        if self.line_number_denied {
            return Err(SignalError::PermissionDenied("line number"));
        }
        Ok(self.line_number.clone())
    }
}
