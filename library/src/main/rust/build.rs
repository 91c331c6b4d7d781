// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

// Build script for the Rust emulator detector
// Links liblog when targeting Android so android_logger can reach logcat

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Build scripts run on the host, so ask Cargo for the target OS
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("android") {
        println!("cargo:rustc-link-lib=log");
    }
}
