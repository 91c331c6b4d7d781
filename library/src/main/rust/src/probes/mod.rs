// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! The six emulator probes and their shared result types.
//!
//! A probe never fails. When a signal cannot be read it returns
//! [`ProbeOutcome::Degraded`] carrying whatever it scored before the failure,
//! and that partial result counts exactly like a complete one.

use crate::context::DeviceContext;
use crate::error::SignalError;

pub mod files;
pub mod metadata;
pub mod packages;
pub mod sensors;
pub mod sysprops;
pub mod telephony;

/// Score and reasons produced by one probe invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl ProbeResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a triggered sub-check
    pub fn add(&mut self, weight: u32, reason: impl Into<String>) {
        self.score += weight;
        self.reasons.push(reason.into());
    }
}

#[derive(Debug)]
pub enum ProbeOutcome {
    Complete(ProbeResult),
    Degraded {
        partial: ProbeResult,
        cause: SignalError,
    },
}

impl ProbeOutcome {
    pub fn degraded(partial: ProbeResult, cause: SignalError) -> Self {
        Self::Degraded { partial, cause }
    }

    pub fn result(&self) -> &ProbeResult {
        match self {
            Self::Complete(result) => result,
            Self::Degraded { partial, .. } => partial,
        }
    }

    pub fn into_result(self) -> ProbeResult {
        match self {
            Self::Complete(result) => result,
            Self::Degraded { partial, .. } => partial,
        }
    }

    pub fn score(&self) -> u32 {
        self.result().score
    }

    pub fn cause(&self) -> Option<&SignalError> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// Probes in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    BuildProperties,
    Files,
    Packages,
    Sensors,
    Telephony,
    SystemProperties,
}

impl Probe {
    pub const ALL: [Probe; 6] = [
        Probe::BuildProperties,
        Probe::Files,
        Probe::Packages,
        Probe::Sensors,
        Probe::Telephony,
        Probe::SystemProperties,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Probe::BuildProperties => "build",
            Probe::Files => "files",
            Probe::Packages => "packages",
            Probe::Sensors => "sensors",
            Probe::Telephony => "telephony",
            Probe::SystemProperties => "properties",
        }
    }

    /// Score at which this probe alone flags an emulator (boolean path only)
    pub fn standalone_threshold(self) -> u32 {
        match self {
            Probe::BuildProperties => 15,
            Probe::Files => 20,
            Probe::Packages => 20,
            Probe::Sensors => 15,
            Probe::Telephony => 15,
            Probe::SystemProperties => 15,
        }
    }

    pub fn run(self, ctx: &DeviceContext) -> ProbeOutcome {
        let config = ctx.config();
        let outcome = match self {
            Probe::BuildProperties => metadata::probe(ctx.build()),
            Probe::Files => files::probe(ctx.file_system(), config.proc_read_limit),
            Probe::Packages => {
                packages::probe(ctx.package_source(), config.running_service_limit)
            }
            Probe::Sensors => sensors::probe(ctx.sensor_source()),
            Probe::Telephony => telephony::probe(ctx.telephony_source()),
            Probe::SystemProperties => sysprops::probe(ctx.property_source()),
        };

        if let Some(cause) = outcome.cause() {
            log::debug!("{} probe degraded: {}", self.name(), cause);
        }
        log::trace!("{} probe scored {}", self.name(), outcome.score());
        outcome
    }

    /// Standalone verdict of this probe
    pub fn check(self, ctx: &DeviceContext) -> bool {
        self.run(ctx).score() >= self.standalone_threshold()
    }
}

/// Lowercase an optional platform string, absent meaning empty
pub(crate) fn lowered(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut result = ProbeResult::new();
        result.add(20, "Hardware contains: ranchu");
        result.add(5, "Suspicious serial number");
        assert_eq!(result.score, 25);
        assert_eq!(result.reasons.len(), 2);
    }

    #[test]
    fn test_degraded_keeps_partial_score() {
        let mut partial = ProbeResult::new();
        partial.add(30, "Launcher app: com.bluestacks.home");
        let outcome = ProbeOutcome::degraded(partial, SignalError::Unavailable("packages"));
        assert_eq!(outcome.score(), 30);
        assert!(outcome.cause().is_some());
        assert_eq!(outcome.into_result().reasons.len(), 1);
    }

    #[test]
    fn test_evaluation_order() {
        let names: Vec<&str> = Probe::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["build", "files", "packages", "sensors", "telephony", "properties"]
        );
    }

    #[test]
    fn test_lowered_absent_is_empty() {
        assert_eq!(lowered(None), "");
        assert_eq!(lowered(Some("RANCHU")), "ranchu");
    }
}
