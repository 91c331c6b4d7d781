// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Filesystem artifact probe.

use super::{ProbeOutcome, ProbeResult};
use crate::context::FileSystem;
use crate::error::SignalError;
use crate::signals::SIGNALS;

const QEMU_DRIVER_WEIGHT: u32 = 25;

/// Check emulator file families and QEMU driver names in `/proc`
///
/// Every family is checked; a family counts once however many of its files
/// exist. Missing files are absence, unreadable ones degrade the outcome.
pub fn probe(files: &dyn FileSystem, read_limit: usize) -> ProbeOutcome {
    let mut result = ProbeResult::new();

    for family in SIGNALS.file_families {
        if family.paths.iter().any(|path| files.exists(path)) {
            result.add(family.weight, family.reason);
        }
    }

    let mut failure = None;
    let mut drivers_found = false;
    for path in SIGNALS.driver_files {
        if !files.exists(path) {
            continue;
        }
        match files.read_prefix(path, read_limit) {
            Ok(data) => {
                let content = String::from_utf8_lossy(&data);
                if SIGNALS.qemu_drivers.iter().any(|driver| content.contains(driver)) {
                    drivers_found = true;
                    break;
                }
            }
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }

    if drivers_found {
        result.add(QEMU_DRIVER_WEIGHT, "QEMU drivers detected in /proc");
    }

    finish(result, failure)
}

fn finish(result: ProbeResult, failure: Option<SignalError>) -> ProbeOutcome {
    match failure {
        Some(cause) => ProbeOutcome::degraded(result, cause),
        None => ProbeOutcome::Complete(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HostFileSystem;
    use assert_matches::assert_matches;
    use std::fs;
    use std::path::Path;

    fn touch(root: &Path, path: &str) {
        let full = root.join(path.trim_start_matches('/'));
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, b"").unwrap();
    }

    /// Denies every read, as SELinux does for `/proc/tty/drivers` on newer releases
    struct LockedProc;

    impl FileSystem for LockedProc {
        fn exists(&self, path: &str) -> bool {
            path.starts_with("/proc/")
        }

        fn read_prefix(&self, path: &str, _limit: usize) -> Result<Vec<u8>, SignalError> {
            Err(SignalError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    #[test]
    fn test_clean_root_scores_zero() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = probe(&HostFileSystem::rooted(dir.path()), 2048);
        assert_eq!(outcome.score(), 0);
        assert_matches!(outcome, ProbeOutcome::Complete(_));
    }

    #[test]
    fn test_family_counts_once() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "fstab.nox");
        touch(dir.path(), "init.nox.rc");
        touch(dir.path(), "/data/dalvik-cache/nox");

        let outcome = probe(&HostFileSystem::rooted(dir.path()), 2048);
        assert_eq!(outcome.score(), 30);
        assert_eq!(outcome.result().reasons, vec!["NoxPlayer files detected"]);
    }

    #[test]
    fn test_families_stack_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "fstab.vbox86");
        touch(dir.path(), "/dev/qemu_pipe");
        touch(dir.path(), "/dev/socket/genyd");

        let outcome = probe(&HostFileSystem::rooted(dir.path()), 2048);
        assert_eq!(outcome.score(), 30 + 25 + 20);
        assert_eq!(
            outcome.result().reasons,
            vec![
                "Genymotion files detected",
                "QEMU pipes detected",
                "x86 emulator files detected",
            ]
        );
    }

    #[test]
    fn test_qemu_driver_in_proc() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("proc/tty")).unwrap();
        fs::write(
            dir.path().join("proc/tty/drivers"),
            "/dev/tty /dev/tty 5 0 system:/dev/tty\ngoldfish_tty /dev/ttyGF 253 0-3 serial\n",
        )
        .unwrap();
        fs::write(dir.path().join("proc/cpuinfo"), "Hardware\t: ranchu\n").unwrap();

        let outcome = probe(&HostFileSystem::rooted(dir.path()), 2048);
        assert_eq!(outcome.score(), 25);
        assert_eq!(outcome.result().reasons, vec!["QEMU drivers detected in /proc"]);
    }

    #[test]
    fn test_driver_past_read_limit_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        let mut cpuinfo = "processor\t: 0\n".repeat(200);
        cpuinfo.push_str("Hardware\t: goldfish\n");
        fs::write(dir.path().join("proc/cpuinfo"), cpuinfo).unwrap();

        let outcome = probe(&HostFileSystem::rooted(dir.path()), 2048);
        assert_eq!(outcome.score(), 0);
    }

    #[test]
    fn test_unreadable_proc_degrades_without_score() {
        let outcome = probe(&LockedProc, 2048);
        assert_eq!(outcome.score(), 0);
        assert_matches!(outcome.cause(), Some(SignalError::Io { .. }));
    }
}
