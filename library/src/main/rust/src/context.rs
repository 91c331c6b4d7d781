// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Platform collaborators consumed by the probes.
//!
//! Build metadata, packages, sensors and telephony come from the Android
//! framework and are supplied by the host. Files and system properties are
//! read natively.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::error::SignalError;
use crate::properties::{select_property_source, PropertySource};

/// Build identity strings as reported by `android.os.Build`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    pub product: Option<String>,
    pub device: Option<String>,
    pub hardware: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub fingerprint: Option<String>,
    pub board: Option<String>,
    pub bootloader: Option<String>,
    pub host: Option<String>,
    pub serial: Option<String>,
}

/// Sensor types the inventory probe expects on real hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Accelerometer,
    MagneticField,
    Gyroscope,
}

impl SensorKind {
    pub const CRITICAL: [SensorKind; 3] = [
        SensorKind::Accelerometer,
        SensorKind::Gyroscope,
        SensorKind::MagneticField,
    ];

    /// `Sensor.TYPE_*` constant
    pub fn android_type(self) -> i32 {
        match self {
            SensorKind::Accelerometer => 1,
            SensorKind::MagneticField => 2,
            SensorKind::Gyroscope => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorInfo {
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(rename = "type")]
    pub sensor_type: i32,
}

/// `TelephonyManager.SIM_STATE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SimState {
    Unknown,
    Absent,
    Ready,
    Other(i32),
}

impl From<i32> for SimState {
    fn from(value: i32) -> Self {
        match value {
            0 => SimState::Unknown,
            1 => SimState::Absent,
            5 => SimState::Ready,
            other => SimState::Other(other),
        }
    }
}

impl From<SimState> for i32 {
    fn from(state: SimState) -> Self {
        match state {
            SimState::Unknown => 0,
            SimState::Absent => 1,
            SimState::Ready => 5,
            SimState::Other(other) => other,
        }
    }
}

/// `TelephonyManager.PHONE_TYPE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PhoneType {
    None,
    Gsm,
    Cdma,
    Sip,
    Other(i32),
}

impl From<i32> for PhoneType {
    fn from(value: i32) -> Self {
        match value {
            0 => PhoneType::None,
            1 => PhoneType::Gsm,
            2 => PhoneType::Cdma,
            3 => PhoneType::Sip,
            other => PhoneType::Other(other),
        }
    }
}

impl From<PhoneType> for i32 {
    fn from(phone_type: PhoneType) -> Self {
        match phone_type {
            PhoneType::None => 0,
            PhoneType::Gsm => 1,
            PhoneType::Cdma => 2,
            PhoneType::Sip => 3,
            PhoneType::Other(other) => other,
        }
    }
}

/// Existence checks and bounded reads of small files
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &str) -> bool;

    /// Read at most `limit` bytes from the start of `path`
    fn read_prefix(&self, path: &str, limit: usize) -> Result<Vec<u8>, SignalError>;
}

/// PackageManager / ActivityManager queries
pub trait PackageSource: Send + Sync {
    /// Package names of activities handling MAIN/LAUNCHER
    fn launcher_activities(&self) -> Result<Vec<String>, SignalError>;

    fn installed_applications(&self) -> Result<Vec<String>, SignalError>;

    /// Class names of running services, legacy API
    fn running_services(&self, limit: usize) -> Result<Vec<String>, SignalError>;
}

pub trait SensorSource: Send + Sync {
    fn sensor_list(&self) -> Result<Vec<SensorInfo>, SignalError>;

    fn default_sensor(&self, kind: SensorKind) -> Result<Option<SensorInfo>, SignalError>;
}

pub trait TelephonySource: Send + Sync {
    fn network_operator_name(&self) -> Result<Option<String>, SignalError>;

    fn sim_state(&self) -> Result<SimState, SignalError>;

    fn phone_type(&self) -> Result<PhoneType, SignalError>;

    /// Requires READ_PHONE_NUMBERS; hosts report denial as `PermissionDenied`
    fn line_number(&self) -> Result<Option<String>, SignalError>;
}

/// Reads the real filesystem below `root`
///
/// Relative names such as `fstab.nox` resolve against `root`, which mirrors an
/// Android app process whose working directory is `/`.
#[derive(Debug, Clone)]
pub struct HostFileSystem {
    root: PathBuf,
}

impl HostFileSystem {
    pub fn new() -> Self {
        Self::rooted("/")
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Default for HostFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for HostFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn read_prefix(&self, path: &str, limit: usize) -> Result<Vec<u8>, SignalError> {
        let full_path = self.resolve(path);
        let file = File::open(&full_path).map_err(|e| SignalError::io(&full_path, e))?;

        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| SignalError::io(&full_path, e))?;
        Ok(buf)
    }
}

/// Everything a detection run looks at
///
/// A missing package, sensor or telephony source means the corresponding
/// system service could not be obtained.
pub struct DeviceContext {
    build: BuildInfo,
    config: DetectorConfig,
    files: Box<dyn FileSystem>,
    packages: Option<Box<dyn PackageSource>>,
    sensors: Option<Box<dyn SensorSource>>,
    telephony: Option<Box<dyn TelephonySource>>,
    properties: Box<dyn PropertySource>,
}

impl DeviceContext {
    /// Context reading the host filesystem and system properties, with no
    /// framework services attached yet
    pub fn new(build: BuildInfo, config: DetectorConfig) -> Self {
        let properties = select_property_source(&config);
        Self {
            build,
            config,
            files: Box::new(HostFileSystem::new()),
            packages: None,
            sensors: None,
            telephony: None,
            properties,
        }
    }

    pub fn with_file_system(mut self, files: impl FileSystem + 'static) -> Self {
        self.files = Box::new(files);
        self
    }

    pub fn with_packages(mut self, packages: impl PackageSource + 'static) -> Self {
        self.packages = Some(Box::new(packages));
        self
    }

    pub fn with_sensors(mut self, sensors: impl SensorSource + 'static) -> Self {
        self.sensors = Some(Box::new(sensors));
        self
    }

    pub fn with_telephony(mut self, telephony: impl TelephonySource + 'static) -> Self {
        self.telephony = Some(Box::new(telephony));
        self
    }

    pub fn with_properties(mut self, properties: impl PropertySource + 'static) -> Self {
        self.properties = Box::new(properties);
        self
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.files.as_ref()
    }

    pub fn package_source(&self) -> Option<&dyn PackageSource> {
        self.packages.as_deref()
    }

    pub fn sensor_source(&self) -> Option<&dyn SensorSource> {
        self.sensors.as_deref()
    }

    pub fn telephony_source(&self) -> Option<&dyn TelephonySource> {
        self.telephony.as_deref()
    }

    pub fn property_source(&self) -> &dyn PropertySource {
        self.properties.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    #[test]
    fn test_relative_names_resolve_against_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fstab.nox"), b"").unwrap();
        fs::create_dir_all(dir.path().join("dev/socket")).unwrap();
        fs::write(dir.path().join("dev/socket/qemud"), b"").unwrap();

        let files = HostFileSystem::rooted(dir.path());
        assert_eq!(files.root(), dir.path());
        assert_eq!(HostFileSystem::default().root(), Path::new("/"));
        assert!(files.exists("fstab.nox"));
        assert!(files.exists("/dev/socket/qemud"));
        assert!(!files.exists("/dev/qemu_pipe"));
    }

    #[test]
    fn test_read_prefix_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cpuinfo"), vec![b'x'; 4096]).unwrap();

        let files = HostFileSystem::rooted(dir.path());
        assert_eq!(files.read_prefix("/cpuinfo", 2048).unwrap().len(), 2048);
        assert_matches!(
            files.read_prefix("/missing", 2048),
            Err(SignalError::Io { .. })
        );
    }

    #[test]
    fn test_state_codes_follow_telephony_manager() {
        assert_eq!(SimState::from(1), SimState::Absent);
        assert_eq!(SimState::from(7), SimState::Other(7));
        assert_eq!(PhoneType::from(0), PhoneType::None);
        assert_eq!(i32::from(PhoneType::Cdma), 2);
    }

    #[test]
    fn test_sim_state_deserializes_from_code() {
        let state: SimState = serde_json::from_str("1").unwrap();
        assert_eq!(state, SimState::Absent);
    }
}
