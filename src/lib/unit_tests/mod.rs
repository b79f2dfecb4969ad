// SPDX-License-Identifier: Apache-2.0

mod config;
mod unmanaged;

use tempfile::TempDir;

use crate::{Hwinfo, StaticHardwareReader, Sysroot};

/// Temporary root holding `files` (relative path, content) with `hwinfos`
/// as the present hardware. Keep the [TempDir] alive while using the
/// [Sysroot].
pub(crate) fn new_sysroot(
    files: &[(&str, &str)],
    hwinfos: Vec<Hwinfo>,
) -> (TempDir, Sysroot) {
    let tmp = TempDir::new().unwrap();
    let sysroot = Sysroot::new(tmp.path())
        .with_hardware(Box::new(StaticHardwareReader::new(hwinfos)));
    for (path, content) in files {
        sysroot.write_file(path, content).unwrap();
    }
    (tmp, sysroot)
}
