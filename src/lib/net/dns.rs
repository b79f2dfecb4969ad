// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

/// Name resolution settings
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct Dns {
    /// Name servers in configured order, duplicates allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<IpAddr>,
    /// Search domains in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searchlist: Vec<String>,
    /// Policy for updating the resolver configuration, for example `auto`
    /// or `STATIC`. `None` means backend default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolv_conf_policy: Option<String>,
    /// Whether the static hostname is written to the hosts file.
    #[serde(default)]
    pub hostname_to_hosts: bool,
}

impl Dns {
    pub fn ipv4_nameservers(&self) -> impl Iterator<Item = &IpAddr> {
        self.nameservers.iter().filter(|n| n.is_ipv4())
    }

    pub fn ipv6_nameservers(&self) -> impl Iterator<Item = &IpAddr> {
        self.nameservers.iter().filter(|n| n.is_ipv6())
    }
}
