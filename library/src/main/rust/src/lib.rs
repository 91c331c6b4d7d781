// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Emulator Detector - Rust Implementation
//!
//! Heuristic detection of emulated or virtualized Android environments.
//! Six independent probes (build metadata, filesystem artifacts, installed
//! packages, sensors, telephony, system properties) each contribute a score
//! and human-readable reasons; the detailed entry point sums them into a
//! 0-100 confidence value.
//!
//! ```no_run
//! use emulator_detector::{get_detailed_result, BuildInfo, DetectorConfig, DeviceContext};
//!
//! let build = BuildInfo {
//!     hardware: Some("ranchu".into()),
//!     ..Default::default()
//! };
//! let ctx = DeviceContext::new(build, DetectorConfig::default());
//! let result = get_detailed_result(&ctx);
//! println!("{}", result);
//! ```

pub mod config;
pub mod context;
pub mod detector;
pub mod error;
pub mod jni_bindings;
pub mod probes;
pub mod properties;
pub mod signals;
pub mod snapshot;

pub use config::DetectorConfig;
pub use context::{
    BuildInfo, DeviceContext, FileSystem, HostFileSystem, PackageSource, PhoneType, SensorInfo,
    SensorKind, SensorSource, SimState, TelephonySource,
};
pub use detector::{
    check_build_properties, check_files, check_packages, check_sensors, check_system_properties,
    check_telephony, get_detailed_result, is_emulator, DetectionResult, DETECTION_THRESHOLD,
    MAX_CONFIDENCE,
};
pub use error::SignalError;
pub use probes::{Probe, ProbeOutcome, ProbeResult};
pub use properties::{
    select_property_source, GetpropCommand, MapPropertySource, NativePropertySource,
    PropertySource,
};
pub use snapshot::DeviceSnapshot;
