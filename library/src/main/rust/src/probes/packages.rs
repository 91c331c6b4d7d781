// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Installed software probe.

use std::collections::HashSet;

use super::{ProbeOutcome, ProbeResult};
use crate::context::PackageSource;
use crate::error::SignalError;
use crate::signals::SIGNALS;

const LAUNCHER_WEIGHT: u32 = 30;
const PACKAGE_WEIGHT: u32 = 25;
const GENYMOTION_LAUNCHER_WEIGHT: u32 = 30;
const SERVICE_WEIGHT: u32 = 20;

/// Match launcher activities, installed packages and running services
/// against emulator vendor prefixes
///
/// A failed query stops the probe; what was scored so far is kept.
pub fn probe(source: Option<&dyn PackageSource>, service_limit: usize) -> ProbeOutcome {
    let mut result = ProbeResult::new();

    let Some(source) = source else {
        return ProbeOutcome::degraded(result, SignalError::Unavailable("package manager"));
    };

    if let Err(cause) = scan(source, service_limit, &mut result) {
        return ProbeOutcome::degraded(result, cause);
    }
    ProbeOutcome::Complete(result)
}

fn scan(
    source: &dyn PackageSource,
    service_limit: usize,
    result: &mut ProbeResult,
) -> Result<(), SignalError> {
    for package in source.launcher_activities()? {
        if SIGNALS.matching_prefix(&package).is_some() {
            result.add(LAUNCHER_WEIGHT, format!("Launcher app: {}", package));
        }
    }

    let mut found = HashSet::new();
    for package in source.installed_applications()? {
        if SIGNALS.matching_prefix(&package).is_some() && found.insert(package.clone()) {
            result.add(PACKAGE_WEIGHT, format!("Emulator package: {}", package));
        }

        if package == SIGNALS.genymotion_launcher {
            result.add(GENYMOTION_LAUNCHER_WEIGHT, "Genymotion launcher detected");
        }
    }

    // Legacy API, newer releases only report the caller's own services.
    // The source caps the list at `service_limit`.
    for service in source.running_services(service_limit)? {
        if SIGNALS.matching_prefix(&service).is_some() {
            result.add(SERVICE_WEIGHT, format!("Running service: {}", service));
        }
    }

    Ok(())
}
