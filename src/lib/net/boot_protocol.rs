// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, NicfgError};

/// IP address assignment method of a connection.
///
/// The canonical name is used for display and as file literal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BootProtocol {
    /// No IP configuration at all, e.g. ports of a bond.
    #[default]
    None,
    /// DHCP for both IPv4 and IPv6.
    Dhcp,
    /// DHCPv4 only.
    Dhcp4,
    /// DHCPv6 only.
    Dhcp6,
    /// Statically assigned addresses.
    Static,
}

impl BootProtocol {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Dhcp,
        Self::Dhcp4,
        Self::Dhcp6,
        Self::Static,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dhcp => "dhcp",
            Self::Dhcp4 => "dhcp4",
            Self::Dhcp6 => "dhcp6",
            Self::Static => "static",
        }
    }

    /// Parse backend literal. Unknown literal is an error, the reader
    /// decides the fallback.
    pub fn from_name(name: &str) -> Result<Self, NicfgError> {
        Self::ALL
            .iter()
            .find(|b| b.name() == name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| {
                NicfgError::new(
                    ErrorKind::InvalidArgument,
                    format!(
                        "Invalid boot protocol '{name}', valid values are: \
                         none, dhcp, dhcp4, dhcp6, static"
                    ),
                )
            })
    }

    pub fn is_dhcp(&self) -> bool {
        matches!(self, Self::Dhcp | Self::Dhcp4 | Self::Dhcp6)
    }

    pub fn is_static(&self) -> bool {
        self == &Self::Static
    }

    pub fn has_dhcp4(&self) -> bool {
        matches!(self, Self::Dhcp | Self::Dhcp4)
    }

    pub fn has_dhcp6(&self) -> bool {
        matches!(self, Self::Dhcp | Self::Dhcp6)
    }
}

impl std::fmt::Display for BootProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for BootProtocol {
    type Err = NicfgError;

    fn from_str(s: &str) -> Result<Self, NicfgError> {
        Self::from_name(s)
    }
}
