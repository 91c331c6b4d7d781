// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! System property sources.
//!
//! Android exposes properties through bionic's `__system_property_get`. When
//! that is not reachable the `getprop` tool is spawned instead, bounded by a
//! timeout. Both report failures as [`SignalError`] and never panic.

use std::collections::HashMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::DetectorConfig;
use crate::error::SignalError;

/// Key read once to decide whether the native accessor works
const CAPABILITY_KEY: &str = "ro.build.version.sdk";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Key/value lookup of Android system properties
pub trait PropertySource: Send + Sync {
    /// `Ok(None)` when the key is unset or empty
    fn property(&self, key: &str) -> Result<Option<String>, SignalError>;
}

/// Direct bionic accessor
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePropertySource;

#[cfg(target_os = "android")]
impl PropertySource for NativePropertySource {
    fn property(&self, key: &str) -> Result<Option<String>, SignalError> {
        use std::ffi::{CStr, CString};

        // PROP_VALUE_MAX from <sys/system_properties.h>
        const PROP_VALUE_MAX: usize = 92;

        let name = CString::new(key)
            .map_err(|_| SignalError::Platform(format!("invalid property key: {:?}", key)))?;
        let mut value = [0 as libc::c_char; PROP_VALUE_MAX];

        // SAFETY: `name` is NUL-terminated and `value` holds PROP_VALUE_MAX bytes,
        // which bionic never exceeds (terminator included).
        let len = unsafe { libc::__system_property_get(name.as_ptr(), value.as_mut_ptr()) };
        if len <= 0 {
            return Ok(None);
        }

        // SAFETY: bionic NUL-terminates the value it wrote.
        let value = unsafe { CStr::from_ptr(value.as_ptr()) };
        Ok(Some(value.to_string_lossy().into_owned()))
    }
}

#[cfg(not(target_os = "android"))]
impl PropertySource for NativePropertySource {
    fn property(&self, _key: &str) -> Result<Option<String>, SignalError> {
        Err(SignalError::Unavailable("native system properties"))
    }
}

/// Runs `getprop <key>` and takes the first line of its output
#[derive(Debug, Clone)]
pub struct GetpropCommand {
    program: String,
    timeout: Duration,
}

impl GetpropCommand {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.getprop_path.clone(), config.getprop_timeout())
    }
}

impl PropertySource for GetpropCommand {
    fn property(&self, key: &str) -> Result<Option<String>, SignalError> {
        let mut child = Command::new(&self.program)
            .arg(key)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SignalError::command(&self.program, e))?;

        let start_time = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) => {
                    if start_time.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SignalError::Timeout {
                            command: format!("{} {}", self.program, key),
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(SignalError::command(&self.program, e)),
            }
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout
                .read_to_string(&mut output)
                .map_err(|e| SignalError::command(&self.program, e))?;
        }

        let value = output.lines().next().unwrap_or("").trim();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_string()))
        }
    }
}

/// Fixed property map, for tests and hosts that collect properties themselves
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    values: HashMap<String, String>,
}

impl MapPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapPropertySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PropertySource for MapPropertySource {
    fn property(&self, key: &str) -> Result<Option<String>, SignalError> {
        Ok(self.values.get(key).filter(|v| !v.is_empty()).cloned())
    }
}

/// Whether the native accessor answered the capability probe (cached per process)
fn native_properties_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| matches!(NativePropertySource.property(CAPABILITY_KEY), Ok(Some(_))))
}

/// Pick the native accessor when it works, else the `getprop` fallback
pub fn select_property_source(config: &DetectorConfig) -> Box<dyn PropertySource> {
    if native_properties_available() {
        log::debug!("Reading system properties natively");
        Box::new(NativePropertySource)
    } else {
        log::debug!("Reading system properties via {}", config.getprop_path);
        Box::new(GetpropCommand::from_config(config))
    }
}
