// SPDX-License-Identifier: Apache-2.0

use std::{
    io::Write,
    os::unix::fs::{OpenOptionsExt, PermissionsExt},
    path::{Path, PathBuf},
};

use crate::{
    CommandExecutor, HardwareReader, NicfgError, SysfsHardwareReader,
    SystemCommandExecutor,
};

const DEFAULT_FILE_MODE: u32 = 0o644;
const SECRET_FILE_MODE: u32 = 0o600;

/// Everything a reader or writer needs from the outside world: the root
/// directory all on-disk paths are relative to plus the hardware and
/// command collaborators.
#[derive(Debug)]
#[non_exhaustive]
pub struct Sysroot {
    path: PathBuf,
    pub hardware: Box<dyn HardwareReader>,
    pub executor: Box<dyn CommandExecutor>,
}

impl Default for Sysroot {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Sysroot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            hardware: Box::new(SysfsHardwareReader),
            executor: Box::new(SystemCommandExecutor),
        }
    }

    pub fn with_hardware(mut self, hardware: Box<dyn HardwareReader>) -> Self {
        self.hardware = hardware;
        self
    }

    pub fn with_executor(mut self, executor: Box<dyn CommandExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn root(&self) -> &Path {
        self.path.as_path()
    }

    /// Whether this is the running system instead of a chroot or test
    /// directory.
    pub fn is_live(&self) -> bool {
        self.path == Path::new("/")
    }

    /// Full path of `rel`, leading `/` of `rel` ignored.
    pub fn path<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        let rel = rel.as_ref();
        self.path.join(rel.strip_prefix("/").unwrap_or(rel))
    }

    /// File content, `None` when the file does not exist.
    pub fn read_file<P: AsRef<Path>>(
        &self,
        rel: P,
    ) -> Result<Option<String>, NicfgError> {
        let path = self.path(rel);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NicfgError::io("read", &path, e)),
        }
    }

    /// Names of regular files in directory `rel` sorted, empty when the
    /// directory does not exist.
    pub fn list_dir<P: AsRef<Path>>(
        &self,
        rel: P,
    ) -> Result<Vec<String>, NicfgError> {
        let path = self.path(rel);
        let entries = match std::fs::read_dir(&path) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(NicfgError::io("read directory", &path, e)),
        };
        let mut ret = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| NicfgError::io("read", &path, e))?;
            if entry.path().is_file() {
                ret.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        ret.sort_unstable();
        Ok(ret)
    }

    pub fn write_file<P: AsRef<Path>>(
        &self,
        rel: P,
        content: &str,
    ) -> Result<(), NicfgError> {
        self.write_file_with_mode(rel, content, DEFAULT_FILE_MODE)
    }

    /// Write file readable by owner only.
    pub fn write_secret_file<P: AsRef<Path>>(
        &self,
        rel: P,
        content: &str,
    ) -> Result<(), NicfgError> {
        self.write_file_with_mode(rel, content, SECRET_FILE_MODE)
    }

    fn write_file_with_mode<P: AsRef<Path>>(
        &self,
        rel: P,
        content: &str,
        mode: u32,
    ) -> Result<(), NicfgError> {
        let path = self.path(rel);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| NicfgError::io("create directory", dir, e))?;
        }
        log::debug!("Writing {}", path.display());
        let mut fd = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(mode)
            .open(&path)
            .map_err(|e| NicfgError::io("open", &path, e))?;
        fd.write_all(content.as_bytes())
            .map_err(|e| NicfgError::io("write", &path, e))?;
        // Existing files keep their mode on open
        fd.set_permissions(std::fs::Permissions::from_mode(mode))
            .map_err(|e| NicfgError::io("change mode of", &path, e))?;
        Ok(())
    }

    /// Remove file, return whether it existed.
    pub fn remove_file<P: AsRef<Path>>(
        &self,
        rel: P,
    ) -> Result<bool, NicfgError> {
        let path = self.path(rel);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NicfgError::io("remove", &path, e)),
        }
    }
}
