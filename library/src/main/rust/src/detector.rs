// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Score aggregation and the two public entry points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::DeviceContext;
use crate::probes::{Probe, ProbeResult};

/// Confidence cap
pub const MAX_CONFIDENCE: u32 = 100;

/// Clamped score at which the detailed result reports an emulator
///
/// Looser than the per-probe thresholds used by [`is_emulator`]; the two entry
/// points can disagree.
pub const DETECTION_THRESHOLD: u32 = 30;

/// Emulator detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub is_emulator: bool,
    pub confidence_score: u32,
    /// In probe order: build, files, packages, sensors, telephony, properties
    pub reasons: Vec<String>,
}

impl DetectionResult {
    /// Fold probe results in evaluation order
    pub fn from_probe_results(results: impl IntoIterator<Item = ProbeResult>) -> Self {
        let mut total: u32 = 0;
        let mut reasons = Vec::new();
        for result in results {
            total = total.saturating_add(result.score);
            reasons.extend(result.reasons);
        }

        let confidence_score = total.min(MAX_CONFIDENCE);
        Self {
            is_emulator: confidence_score >= DETECTION_THRESHOLD,
            confidence_score,
            reasons,
        }
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DetectionResult{{is_emulator={}, confidence_score={}, reasons={:?}}}",
            self.is_emulator, self.confidence_score, self.reasons
        )
    }
}

/// Quick verdict: true as soon as any probe crosses its own threshold
pub fn is_emulator(ctx: &DeviceContext) -> bool {
    let verdict = Probe::ALL.iter().any(|probe| probe.check(ctx));
    log::debug!("Emulator check: {}", verdict);
    verdict
}

/// Run every probe and combine scores into a confidence value
pub fn get_detailed_result(ctx: &DeviceContext) -> DetectionResult {
    let result = DetectionResult::from_probe_results(
        Probe::ALL.iter().map(|probe| probe.run(ctx).into_result()),
    );
    log::debug!(
        "Emulator detection: score={} emulator={} signals={}",
        result.confidence_score,
        result.is_emulator,
        result.reasons.len()
    );
    result
}

pub fn check_build_properties(ctx: &DeviceContext) -> bool {
    Probe::BuildProperties.check(ctx)
}

pub fn check_files(ctx: &DeviceContext) -> bool {
    Probe::Files.check(ctx)
}

pub fn check_packages(ctx: &DeviceContext) -> bool {
    Probe::Packages.check(ctx)
}

pub fn check_sensors(ctx: &DeviceContext) -> bool {
    Probe::Sensors.check(ctx)
}

pub fn check_telephony(ctx: &DeviceContext) -> bool {
    Probe::Telephony.check(ctx)
}

pub fn check_system_properties(ctx: &DeviceContext) -> bool {
    Probe::SystemProperties.check(ctx)
}
