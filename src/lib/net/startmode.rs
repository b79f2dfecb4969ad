// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, NicfgError};

/// When an interface should be activated.
///
/// Two start modes are equal when their names are equal and, for
/// [Startmode::Ifplugd], their priorities are equal too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case", tag = "name")]
#[non_exhaustive]
pub enum Startmode {
    /// Activated at boot.
    Auto,
    /// Activated when the device appears.
    Hotplug,
    /// Activated by the user only.
    #[default]
    Manual,
    /// Never activated.
    Off,
    /// Activated at boot, never deactivated (root file system on network).
    Nfsroot,
    /// Activated when a cable is plugged in. The interface with highest
    /// priority wins when several of them have carrier.
    Ifplugd { priority: u32 },
}

impl Startmode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hotplug => "hotplug",
            Self::Manual => "manual",
            Self::Off => "off",
            Self::Nfsroot => "nfsroot",
            Self::Ifplugd { .. } => "ifplugd",
        }
    }

    /// Parse backend literal. `onboot`, `on` and `boot` are legacy aliases
    /// of `auto`. The priority of `ifplugd` start as 0, callers set it
    /// from their own storage.
    pub fn from_name(name: &str) -> Result<Self, NicfgError> {
        match name.trim().to_lowercase().as_str() {
            "auto" | "onboot" | "on" | "boot" => Ok(Self::Auto),
            "hotplug" => Ok(Self::Hotplug),
            "manual" => Ok(Self::Manual),
            "off" => Ok(Self::Off),
            "nfsroot" => Ok(Self::Nfsroot),
            "ifplugd" => Ok(Self::Ifplugd { priority: 0 }),
            _ => Err(NicfgError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Invalid start mode '{name}', valid values are: auto, \
                     hotplug, manual, off, nfsroot, ifplugd"
                ),
            )),
        }
    }

    pub fn priority(&self) -> Option<u32> {
        if let Self::Ifplugd { priority } = self {
            Some(*priority)
        } else {
            None
        }
    }

    /// Whether the interface is brought up without user action.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, Self::Manual | Self::Off)
    }
}

impl std::fmt::Display for Startmode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ifplugd { priority } => write!(f, "ifplugd({priority})"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl std::str::FromStr for Startmode {
    type Err = NicfgError;

    fn from_str(s: &str) -> Result<Self, NicfgError> {
        Self::from_name(s)
    }
}
