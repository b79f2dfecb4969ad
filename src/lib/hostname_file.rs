// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, NicfgError, Sysroot};

pub(crate) const HOSTNAME_FILE: &str = "etc/hostname";

/// Static hostname. When the file is missing on the running system, the
/// current kernel hostname is used.
pub(crate) fn read_static_hostname(
    sysroot: &Sysroot,
) -> Result<String, NicfgError> {
    if let Some(content) = sysroot.read_file(HOSTNAME_FILE)? {
        return Ok(content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .unwrap_or_default()
            .to_string());
    }
    if sysroot.is_live() {
        let name = nix::unistd::gethostname().map_err(|e| {
            NicfgError::new(
                ErrorKind::IoFailure,
                format!("Failed to get hostname: {e}"),
            )
        })?;
        Ok(name.to_string_lossy().to_string())
    } else {
        Ok(String::new())
    }
}

pub(crate) fn write_static_hostname(
    sysroot: &Sysroot,
    name: &str,
) -> Result<(), NicfgError> {
    if name.is_empty() {
        sysroot.remove_file(HOSTNAME_FILE)?;
        Ok(())
    } else {
        sysroot.write_file(HOSTNAME_FILE, &format!("{name}\n"))
    }
}
