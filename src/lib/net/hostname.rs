// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

/// Which interface, if any, is allowed to update the hostname through DHCP.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DhcpHostnamePolicy {
    #[default]
    None,
    Any,
    Interface(String),
}

impl DhcpHostnamePolicy {
    /// Whether DHCP on interface `iface_name` may set the hostname.
    pub fn allows(&self, iface_name: &str) -> bool {
        match self {
            Self::None => false,
            Self::Any => true,
            Self::Interface(n) => n == iface_name,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct Hostname {
    #[serde(default)]
    pub static_name: String,
    #[serde(default)]
    pub dhcp_hostname: DhcpHostnamePolicy,
    /// Hostname proposed by the installer, only set during installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer: Option<String>,
}

impl Hostname {
    pub fn new(static_name: &str) -> Self {
        Self {
            static_name: static_name.to_string(),
            ..Default::default()
        }
    }

    /// Hostname without domain part.
    pub fn short_name(&self) -> &str {
        self.static_name
            .split_once('.')
            .map(|(s, _)| s)
            .unwrap_or(self.static_name.as_str())
    }
}
