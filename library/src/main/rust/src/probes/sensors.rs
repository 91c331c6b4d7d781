// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Sensor inventory probe.

use super::{ProbeOutcome, ProbeResult};
use crate::context::{SensorKind, SensorSource};
use crate::error::SignalError;
use crate::signals::SIGNALS;

/// Real phones ship at least this many sensors
const MIN_SENSOR_COUNT: usize = 3;

pub fn probe(source: Option<&dyn SensorSource>) -> ProbeOutcome {
    let mut result = ProbeResult::new();

    let Some(source) = source else {
        result.add(10, "SensorManager unavailable");
        return ProbeOutcome::Complete(result);
    };

    match scan(source, &mut result) {
        Ok(()) => ProbeOutcome::Complete(result),
        Err(cause) => ProbeOutcome::degraded(result, cause),
    }
}

fn scan(source: &dyn SensorSource, result: &mut ProbeResult) -> Result<(), SignalError> {
    let sensors = source.sensor_list()?;

    if sensors.is_empty() {
        result.add(25, "No sensors available");
    } else if sensors.len() < MIN_SENSOR_COUNT {
        result.add(15, format!("Very few sensors: {}", sensors.len()));
    }

    let mut missing = 0;
    for kind in SensorKind::CRITICAL {
        if source.default_sensor(kind)?.is_none() {
            missing += 1;
        }
    }
    if missing >= 2 {
        result.add(15, format!("Missing {} critical sensors", missing));
    }

    let emulated = sensors.iter().find(|sensor| {
        let name = sensor.name.to_lowercase();
        let vendor = sensor.vendor.to_lowercase();
        SIGNALS
            .sensor_markers
            .iter()
            .any(|marker| name.contains(marker) || vendor.contains(marker))
            || vendor.contains(SIGNALS.aosp_sensor_vendor)
    });
    if let Some(sensor) = emulated {
        result.add(20, format!("Emulator sensor: {}", sensor.name));
    }

    Ok(())
}
