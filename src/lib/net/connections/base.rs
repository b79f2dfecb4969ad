// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    BootProtocol, InterfaceType, IpAddress, IpConfig, JsonDisplay, Startmode,
};

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Settings shared among all connection types
pub struct BaseConnection {
    /// Connection name. For the sysconfig backend it is always the interface
    /// name, for the keyfile backend it is the connection ID.
    pub name: String,
    #[serde(default, rename = "type")]
    pub conn_type: InterfaceType,
    /// Interface this connection applies to. Undefined means the same as
    /// `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub bootproto: BootProtocol,
    #[serde(default)]
    pub startmode: Startmode,
    /// Primary address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpConfig>,
    /// Additional addresses in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_aliases: Vec<IpConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_zone: Option<String>,
    /// MAC address to set on the interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lladdress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethtool_options: Option<String>,
    /// Host names bound to the primary address in the host alias table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
    /// Connection UUID, only meaningful to the keyfile backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl BaseConnection {
    pub fn new(name: &str, conn_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            conn_type,
            ..Default::default()
        }
    }

    pub fn interface_name(&self) -> &str {
        self.interface.as_deref().unwrap_or(self.name.as_str())
    }

    /// Primary address followed by aliases.
    pub fn all_ips(&self) -> impl Iterator<Item = &IpConfig> {
        self.ip.iter().chain(self.ip_aliases.iter())
    }

    /// Static boot protocol with a primary address holding a prefix.
    pub fn is_static_addressed(&self) -> bool {
        self.bootproto.is_static()
            && self
                .ip
                .as_ref()
                .map(|i| i.address.is_valid_static())
                .unwrap_or_default()
    }

    pub fn primary_address(&self) -> Option<&IpAddress> {
        self.ip.as_ref().map(|i| &i.address)
    }

    pub fn has_ipv4_address(&self) -> bool {
        self.all_ips().any(|i| i.address.is_ipv4())
    }

    pub fn has_ipv6_address(&self) -> bool {
        self.all_ips().any(|i| i.address.is_ipv6())
    }
}
