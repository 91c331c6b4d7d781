// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! System property probe.

use super::{ProbeOutcome, ProbeResult};
use crate::error::SignalError;
use crate::properties::PropertySource;
use crate::signals::SIGNALS;

/// Reads properties, remembering the first failure and treating failed keys as unset
struct Reader<'a> {
    source: &'a dyn PropertySource,
    failure: Option<SignalError>,
}

impl<'a> Reader<'a> {
    fn get(&mut self, key: &str) -> Option<String> {
        match self.source.property(key) {
            Ok(value) => value.map(|v| v.trim().to_string()),
            Err(e) => {
                self.failure.get_or_insert(e);
                None
            }
        }
    }

    fn is(&mut self, key: &str, expected: &str) -> bool {
        self.get(key)
            .map_or(false, |value| value.eq_ignore_ascii_case(expected))
    }
}

pub fn probe(source: &dyn PropertySource) -> ProbeOutcome {
    let mut result = ProbeResult::new();
    let mut props = Reader {
        source,
        failure: None,
    };

    if props.is("ro.kernel.qemu", "1") {
        result.add(25, "ro.kernel.qemu is 1");
    }

    if props.is("ro.bootloader", "unknown") {
        result.add(10, "Bootloader is unknown");
    }

    if let Some(hardware) = props.get("ro.hardware") {
        let lower = hardware.to_lowercase();
        if SIGNALS
            .virtual_hardware_markers
            .iter()
            .any(|marker| lower.contains(marker))
        {
            result.add(20, format!("Virtual hardware: {}", hardware));
        }
    }

    if let Some(flavor) = props.get("ro.build.flavor") {
        if flavor.to_lowercase().contains("sdk") {
            result.add(15, format!("SDK build flavor: {}", flavor));
        }
    }

    let insecure = props.is("ro.secure", "0");
    let debuggable = props.is("ro.debuggable", "1");
    if insecure && debuggable {
        result.add(5, "Device is debuggable and not secure");
    }

    if log::log_enabled!(log::Level::Trace) {
        for key in SIGNALS.suspicious_property_keys {
            log::trace!("{} = {:?}", key, source.property(key));
        }
    }

    match props.failure {
        Some(cause) => ProbeOutcome::degraded(result, cause),
        None => ProbeOutcome::Complete(result),
    }
}
