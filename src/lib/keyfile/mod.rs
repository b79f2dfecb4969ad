// SPDX-License-Identifier: Apache-2.0

mod handlers;
mod ip;
mod key_file;
mod reader;
mod writer;

#[cfg(test)]
mod unit_tests;

use std::path::PathBuf;

use self::{
    handlers::{KeyfileHandler, SECTION_CONNECTION, keyfile_registry},
    key_file::KeyFile,
};
use crate::{NicfgError, Sysroot, dispatch::TypeRegistry};

pub(crate) const KEYFILE_DIR: &str = "etc/NetworkManager/system-connections";
const KEYFILE_SUFFIX: &str = ".nmconnection";

/// Backend of the connection keyfiles under
/// `/etc/NetworkManager/system-connections`.
pub struct KeyfileBackend {
    registry: TypeRegistry<dyn KeyfileHandler>,
}

impl KeyfileBackend {
    pub fn new() -> Self {
        Self {
            registry: keyfile_registry(),
        }
    }
}

impl Default for KeyfileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyfileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyfileBackend").finish_non_exhaustive()
    }
}

/// File of a new connection named `id`.
fn keyfile_rel_path(id: &str) -> PathBuf {
    PathBuf::from(KEYFILE_DIR)
        .join(format!("{}{KEYFILE_SUFFIX}", id.replace('/', "_")))
}

/// One parsed keyfile.
#[derive(Debug, Clone)]
struct LoadedKeyfile {
    rel_path: PathBuf,
    /// File name without suffix, used when `connection.id` is missing.
    stem: String,
    kf: KeyFile,
}

impl LoadedKeyfile {
    fn id(&self) -> &str {
        self.kf
            .get_non_empty(SECTION_CONNECTION, "id")
            .unwrap_or(self.stem.as_str())
    }

    fn uuid(&self) -> Option<&str> {
        self.kf.get_non_empty(SECTION_CONNECTION, "uuid")
    }

    fn interface_name(&self) -> &str {
        self.kf
            .get_non_empty(SECTION_CONNECTION, "interface-name")
            .unwrap_or(self.id())
    }
}

/// All keyfiles sorted by file name.
fn load_keyfiles(sysroot: &Sysroot) -> Result<Vec<LoadedKeyfile>, NicfgError> {
    let mut ret = Vec::new();
    for file_name in sysroot.list_dir(KEYFILE_DIR)? {
        let Some(stem) = file_name.strip_suffix(KEYFILE_SUFFIX) else {
            continue;
        };
        let rel_path = PathBuf::from(KEYFILE_DIR).join(&file_name);
        if let Some(content) = sysroot.read_file(&rel_path)? {
            ret.push(LoadedKeyfile {
                stem: stem.to_string(),
                kf: KeyFile::parse(&content),
                rel_path,
            });
        }
    }
    Ok(ret)
}
