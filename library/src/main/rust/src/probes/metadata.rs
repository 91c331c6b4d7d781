// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Build metadata probe (`android.os.Build` fields).

use super::{lowered, ProbeOutcome, ProbeResult};
use crate::context::BuildInfo;
use crate::signals::SIGNALS;

/// First table literal contained in `value`, compared case-insensitively
fn first_contained(value: &str, known: &'static [&'static str]) -> Option<&'static str> {
    known
        .iter()
        .copied()
        .find(|literal| value.contains(&literal.to_lowercase()))
}

/// Score build identity strings against the known emulator names
pub fn probe(build: &BuildInfo) -> ProbeOutcome {
    let mut result = ProbeResult::new();

    let product = lowered(build.product.as_deref());
    let device = lowered(build.device.as_deref());
    let hardware = lowered(build.hardware.as_deref());
    let model = lowered(build.model.as_deref());
    let manufacturer = lowered(build.manufacturer.as_deref());
    let brand = lowered(build.brand.as_deref());
    let fingerprint = lowered(build.fingerprint.as_deref());
    let board = lowered(build.board.as_deref());
    let bootloader = lowered(build.bootloader.as_deref());
    let host = lowered(build.host.as_deref());
    let serial = lowered(build.serial.as_deref());

    if let Some(known) = first_contained(&product, SIGNALS.product_names) {
        result.add(20, format!("Product contains: {}", known));
    }

    if let Some(known) = first_contained(&device, SIGNALS.device_names) {
        result.add(15, format!("Device contains: {}", known));
    }

    if let Some(known) = first_contained(&hardware, SIGNALS.hardware_names) {
        result.add(20, format!("Hardware contains: {}", known));
    }

    // Exact match only
    if let Some(known) = SIGNALS
        .manufacturer_names
        .iter()
        .find(|known| manufacturer.eq_ignore_ascii_case(known))
    {
        result.add(15, format!("Manufacturer is: {}", known));
    }

    if fingerprint.starts_with("generic") || fingerprint.contains("test-keys") {
        result.add(15, "Generic fingerprint detected");
    }

    if model.contains("sdk") || model.contains("emulator") || model.contains("android sdk") {
        result.add(15, "Model indicates SDK/Emulator");
    }

    if brand == "generic" || brand.starts_with("generic_") {
        result.add(10, "Generic brand detected");
    }

    if board.contains("nox")
        || bootloader.contains("nox")
        || board.contains("memu")
        || board.contains("ldplayer")
    {
        result.add(20, "Board/Bootloader indicates emulator");
    }

    if host.contains("buildstation") || (host.contains("build") && host.contains("droid")) {
        result.add(10, "Host indicates build environment");
    }

    if serial == "unknown" || serial.contains("nox") || serial.contains("android") {
        result.add(5, "Suspicious serial number");
    }

    ProbeOutcome::Complete(result)
}
