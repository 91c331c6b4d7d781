// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Static reference data for the probes.
//!
//! Everything here is plain literal data. Probes lowercase the build/property
//! literals before comparing; package prefixes are matched case-sensitively.

/// A group of files that, if any one exists, identifies an emulator family
#[derive(Debug, Clone, Copy)]
pub struct FileFamily {
    pub name: &'static str,
    pub reason: &'static str,
    pub weight: u32,
    pub paths: &'static [&'static str],
}

/// Named, versioned set of emulator indicators
#[derive(Debug)]
pub struct SignalTable {
    pub name: &'static str,
    pub version: &'static str,
    pub product_names: &'static [&'static str],
    pub device_names: &'static [&'static str],
    pub hardware_names: &'static [&'static str],
    pub manufacturer_names: &'static [&'static str],
    pub package_prefixes: &'static [&'static str],
    pub genymotion_launcher: &'static str,
    pub suspicious_property_keys: &'static [&'static str],
    pub file_families: &'static [FileFamily],
    pub qemu_drivers: &'static [&'static str],
    pub driver_files: &'static [&'static str],
    pub sensor_markers: &'static [&'static str],
    pub aosp_sensor_vendor: &'static str,
    pub emulator_line_numbers: &'static [&'static str],
    pub emulator_line_prefix: &'static str,
    pub virtual_hardware_markers: &'static [&'static str],
}

/// Weight for a named emulator's file set
const NAMED_EMULATOR_FILES: u32 = 30;
const QEMU_PIPE_FILES: u32 = 25;
const X86_IMAGE_FILES: u32 = 20;

/// Emulator files, in evaluation order. Bare names resolve against `/`.
const FILE_FAMILIES: &[FileFamily] = &[
    FileFamily {
        name: "Genymotion",
        reason: "Genymotion files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &["/dev/socket/genyd", "/dev/socket/baseband_genyd"],
    },
    FileFamily {
        name: "Andy",
        reason: "Andy files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &["fstab.andy", "ueventd.andy.rc"],
    },
    FileFamily {
        name: "NoxPlayer",
        reason: "NoxPlayer files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &[
            "fstab.nox",
            "init.nox.rc",
            "ueventd.nox.rc",
            "/data/dalvik-cache/nox",
        ],
    },
    FileFamily {
        name: "LDPlayer",
        reason: "LDPlayer files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &[
            "fstab.ldinit",
            "init.ldinit.rc",
            "/data/data/com.ldmnq.launcher3",
            "/data/dalvik-cache/ld",
        ],
    },
    FileFamily {
        name: "MuMu Player",
        reason: "MuMu Player files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &["fstab.nemu", "init.nemu.rc", "/data/data/com.mumu.launcher"],
    },
    FileFamily {
        name: "MEmu",
        reason: "MEmu files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &[
            "fstab.memu",
            "init.memu.rc",
            "/data/data/com.microvirt.launcher",
        ],
    },
    FileFamily {
        name: "Phoenix OS",
        reason: "Phoenix OS files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &["fstab.phoenix", "init.phoenix.rc"],
    },
    FileFamily {
        name: "Waydroid",
        reason: "Waydroid files detected",
        weight: NAMED_EMULATOR_FILES,
        paths: &["/dev/.lxc", "/system/etc/init/waydroid"],
    },
    FileFamily {
        name: "QEMU pipes",
        reason: "QEMU pipes detected",
        weight: QEMU_PIPE_FILES,
        paths: &["/dev/socket/qemud", "/dev/qemu_pipe"],
    },
    FileFamily {
        name: "x86 emulator",
        reason: "x86 emulator files detected",
        weight: X86_IMAGE_FILES,
        paths: &[
            "ueventd.android_x86.rc",
            "x86.prop",
            "ueventd.ttVM_x86.rc",
            "init.ttVM_x86.rc",
            "fstab.ttVM_x86",
            "fstab.vbox86",
            "init.vbox86.rc",
            "ueventd.vbox86.rc",
        ],
    },
];

/// Package prefixes of emulator vendors
const EMULATOR_PACKAGE_PREFIXES: &[&str] = &[
    // BlueStacks
    "com.bluestacks.",
    "com.bluestacks2.",
    "com.bluestacks4.",
    "com.bluestacks5.",
    // NoxPlayer
    "com.bignox.",
    "com.nox.mopen.app",
    "com.vphone.",
    // LDPlayer
    "com.ldmnq.",
    "com.ludashi.",
    "com.changzhi.",
    // MuMu Player
    "com.mumu.",
    "com.netease.mumu.",
    // MEmu
    "com.microvirt.",
    // iTools / Haima
    "cn.itools.",
    "me.haima.",
    "com.kop.",
    "com.kaopu.",
    "com.genymotion.",
    // Phoenix OS
    "com.topjohnwu.",
    // Google Play Games for PC
    "com.google.android.games.",
    "com.google.android.gms.games.playgames",
    "waydroid.",
];

const KNOWN_PRODUCT_NAMES: &[&str] = &[
    "sdk",
    "sdk_x86",
    "sdk_x86_64",
    "sdk_gphone_x86",
    "sdk_gphone_x86_64",
    "sdk_gphone_arm64",
    "sdk_google_phone_x86",
    "sdk_google_phone_x86_64",
    "sdk_google_phone_arm64",
    "vbox86p",
    "emulator",
    "simulator",
    "google_sdk",
    "ldplayer",
    "ldinit",
    "nemu",
    "mumu",
    "memu",
    "microvirt",
    "nox",
    "phoenix",
];

const KNOWN_DEVICE_NAMES: &[&str] = &[
    "generic",
    "generic_arm64",
    "generic_x86",
    "generic_x86_64",
    "vbox86p",
    "Emulator",
    "goldfish",
    "ranchu",
    "ldinit",
    "nemu",
    "memu",
];

const KNOWN_HARDWARE_NAMES: &[&str] = &[
    "goldfish", "ranchu", "vbox86", "nox", "ttVM_x86", "ldinit", "nemu",
];

const KNOWN_MANUFACTURER_NAMES: &[&str] = &["Genymotion", "unknown", "iToolsAVM"];

/// Properties worth dumping when tracing a detection run
const SUSPICIOUS_PROPERTY_KEYS: &[&str] = &[
    "init.svc.qemud",
    "init.svc.qemu-props",
    "ro.kernel.android.qemud",
    "ro.kernel.qemu",
    "ro.kernel.qemu.gles",
    "ro.bootimage.build.date.utc",
    "ro.hardware.virtual",
    "ro.product.cpu.abilist",
    "ro.product.first_api_level",
    "ro.build.flavor",
];

/// The table shipped with this build
pub static SIGNALS: SignalTable = SignalTable {
    name: "android-emulator-indicators",
    version: "2025.1",
    product_names: KNOWN_PRODUCT_NAMES,
    device_names: KNOWN_DEVICE_NAMES,
    hardware_names: KNOWN_HARDWARE_NAMES,
    manufacturer_names: KNOWN_MANUFACTURER_NAMES,
    package_prefixes: EMULATOR_PACKAGE_PREFIXES,
    genymotion_launcher: "com.google.android.launcher.layouts.genymotion",
    suspicious_property_keys: SUSPICIOUS_PROPERTY_KEYS,
    file_families: FILE_FAMILIES,
    qemu_drivers: &["goldfish", "ranchu"],
    driver_files: &["/proc/tty/drivers", "/proc/cpuinfo"],
    sensor_markers: &["goldfish", "ranchu"],
    aosp_sensor_vendor: "the android open source project",
    emulator_line_numbers: &["15555215554", "15555215556"],
    emulator_line_prefix: "155552",
    virtual_hardware_markers: &["goldfish", "ranchu", "vbox", "nox"],
};

impl SignalTable {
    /// First emulator prefix that `name` starts with
    pub fn matching_prefix(&self, name: &str) -> Option<&'static str> {
        self.package_prefixes
            .iter()
            .copied()
            .find(|prefix| name.starts_with(prefix))
    }
}
