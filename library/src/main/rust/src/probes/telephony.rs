// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Telephony state probe.

use super::{ProbeOutcome, ProbeResult};
use crate::context::{PhoneType, SimState, TelephonySource};
use crate::error::SignalError;
use crate::signals::SIGNALS;

pub fn probe(source: Option<&dyn TelephonySource>) -> ProbeOutcome {
    let mut result = ProbeResult::new();

    let Some(source) = source else {
        result.add(10, "TelephonyManager unavailable");
        return ProbeOutcome::Complete(result);
    };

    if let Err(cause) = scan_radio(source, &mut result) {
        return ProbeOutcome::degraded(result, cause);
    }

    // Permission-gated, a denial only costs this one signal
    match source.line_number() {
        Ok(Some(number)) => {
            if is_emulator_number(&number) {
                result.add(25, format!("Emulator phone number: {}", number));
            }
            ProbeOutcome::Complete(result)
        }
        Ok(None) => ProbeOutcome::Complete(result),
        Err(cause) => ProbeOutcome::degraded(result, cause),
    }
}

fn scan_radio(source: &dyn TelephonySource, result: &mut ProbeResult) -> Result<(), SignalError> {
    if let Some(operator) = source.network_operator_name()? {
        let lower = operator.to_lowercase();
        if lower.is_empty() || lower.contains("android") {
            result.add(10, format!("Suspicious network operator: {}", operator));
        }
    }

    // Weak signal, only meaningful combined with others
    if source.sim_state()? == SimState::Absent {
        result.add(5, "No SIM card");
    }

    if source.phone_type()? == PhoneType::None {
        result.add(10, "Phone type is NONE");
    }

    Ok(())
}

fn is_emulator_number(number: &str) -> bool {
    SIGNALS.emulator_line_numbers.iter().any(|known| *known == number)
        || number.starts_with(SIGNALS.emulator_line_prefix)
}
