// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! JNI entry points for `com.emulatordetector.RustEmulatorDetector`.
//!
//! Nothing here may panic across the FFI boundary; every failure maps to a
//! clean verdict or a fixed JSON literal.

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

#[cfg(target_os = "android")]
use android_logger::Config;

#[cfg(target_os = "android")]
use crate::config::DetectorConfig;
use crate::detector::{get_detailed_result, is_emulator};
use crate::snapshot::DeviceSnapshot;

const FALLBACK_RESULT_JSON: &str = r#"{"is_emulator":false,"confidence_score":0,"reasons":[]}"#;

/// Extract a Java string, `None` for null or unreadable values
fn read_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.to_string_lossy().to_string()),
        Err(_) => None,
    }
}

fn read_snapshot(env: &mut JNIEnv, snapshot: &JString) -> Option<DeviceSnapshot> {
    let json = read_string(env, snapshot)?;
    match DeviceSnapshot::from_json(&json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("Rejecting malformed device snapshot: {}", e);
            None
        }
    }
}

/// Initialize logging for Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn Java_com_emulatordetector_RustEmulatorDetector_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    config_json: JString,
) {
    let config = read_string(&mut env, &config_json)
        .map(|json| DetectorConfig::from_json(&json))
        .unwrap_or_default();

    android_logger::init_once(
        Config::default()
            .with_max_level(config.level_filter())
            .with_tag("RustEmulatorDetector"),
    );
}

#[cfg(not(target_os = "android"))]
#[no_mangle]
pub extern "C" fn Java_com_emulatordetector_RustEmulatorDetector_nativeInit(
    _env: JNIEnv,
    _class: JClass,
    _config_json: JString,
) {
    // No-op for non-Android platforms
}

/// Boolean emulator check - JNI entry point
#[no_mangle]
pub extern "C" fn Java_com_emulatordetector_RustEmulatorDetector_nativeIsEmulator(
    mut env: JNIEnv,
    _class: JClass,
    snapshot_json: JString,
) -> jboolean {
    let Some(snapshot) = read_snapshot(&mut env, &snapshot_json) else {
        return JNI_FALSE;
    };

    if is_emulator(&snapshot.into_context()) {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// Detailed emulator detection - JNI entry point
///
/// Returns JSON string with DetectionResult
#[no_mangle]
pub extern "C" fn Java_com_emulatordetector_RustEmulatorDetector_nativeGetDetailedResult(
    mut env: JNIEnv,
    _class: JClass,
    snapshot_json: JString,
) -> jstring {
    let json = match read_snapshot(&mut env, &snapshot_json) {
        Some(snapshot) => {
            let result = get_detailed_result(&snapshot.into_context());
            serde_json::to_string(&result).unwrap_or_else(|_| FALLBACK_RESULT_JSON.to_string())
        }
        None => FALLBACK_RESULT_JSON.to_string(),
    };

    match env.new_string(&json) {
        Ok(jstr) => jstr.into_raw(),
        Err(_) => match env.new_string(FALLBACK_RESULT_JSON) {
            Ok(jstr) => jstr.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectionResult;

    #[test]
    fn test_fallback_literal_is_a_clean_result() {
        let result: DetectionResult = serde_json::from_str(FALLBACK_RESULT_JSON).unwrap();
        assert!(!result.is_emulator);
        assert_eq!(result.confidence_score, 0);
        assert!(result.reasons.is_empty());
    }
}
