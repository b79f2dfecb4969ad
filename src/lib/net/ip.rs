// SPDX-License-Identifier: Apache-2.0

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, JsonDisplay, NicfgError};

const IPV4_ADDR_LEN: u8 = 32;
const IPV6_ADDR_LEN: u8 = 128;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

/// IP address with an optional prefix length.
///
/// An address without explicit prefix stays without prefix: it is up to the
/// caller to decide whether that means a host address or a configuration
/// error.
///
/// Serialize and deserialize to/from `192.0.2.1/24` or `192.0.2.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct IpAddress {
    pub address: IpAddr,
    pub prefix: Option<u8>,
}

impl IpAddress {
    pub fn new(address: IpAddr, prefix: Option<u8>) -> Result<Self, NicfgError> {
        if let Some(prefix) = prefix {
            validate_prefix(&address, prefix)?;
        }
        Ok(Self { address, prefix })
    }

    /// Parse `addr/prefix` or bare `addr`.
    pub fn from_string(value: &str) -> Result<Self, NicfgError> {
        let value = value.trim();
        let (addr, prefix) = match value.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (value, None),
        };
        let address = IpAddr::from_str(addr).map_err(|e| {
            NicfgError::new(
                ErrorKind::InvalidArgument,
                format!("Invalid IP address '{value}': {e}"),
            )
        })?;
        let prefix = match prefix {
            Some(p) => Some(p.parse::<u8>().map_err(|e| {
                NicfgError::new(
                    ErrorKind::InvalidArgument,
                    format!("Invalid prefix length in '{value}': {e}"),
                )
            })?),
            None => None,
        };
        Self::new(address, prefix)
    }

    pub fn family(&self) -> AddressFamily {
        if self.address.is_ipv6() {
            AddressFamily::Ipv6
        } else {
            AddressFamily::Ipv4
        }
    }

    pub fn is_ipv4(&self) -> bool {
        self.address.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.address.is_ipv6()
    }

    /// Dotted netmask of an IPv4 address holding a prefix.
    pub fn netmask(&self) -> Option<String> {
        match (self.address, self.prefix) {
            (IpAddr::V4(_), Some(prefix)) => {
                prefix_to_netmask(prefix).ok().map(|m| m.to_string())
            }
            _ => None,
        }
    }

    /// Set the prefix from a dotted IPv4 netmask.
    pub fn set_netmask(&mut self, netmask: &str) -> Result<(), NicfgError> {
        if self.is_ipv6() {
            return Err(NicfgError::new(
                ErrorKind::InvalidArgument,
                format!("Cannot apply netmask {netmask} to IPv6 {self}"),
            ));
        }
        self.prefix = Some(netmask_to_prefix(netmask)?);
        Ok(())
    }

    /// Network address, `None` when prefix is unknown.
    pub fn network(&self) -> Option<IpAddr> {
        self.prefix.map(|p| apply_ip_prefix_len(self.address, p))
    }

    /// Whether `ip` belongs to the network of this address.
    /// Always false when prefix is unknown.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        match self.prefix {
            Some(prefix) if ip.is_ipv4() == self.address.is_ipv4() => {
                apply_ip_prefix_len(*ip, prefix)
                    == apply_ip_prefix_len(self.address, prefix)
            }
            _ => false,
        }
    }

    /// Whether prefix covers the full address length.
    pub fn is_host(&self) -> bool {
        match self.prefix {
            Some(p) => {
                p == if self.is_ipv6() {
                    IPV6_ADDR_LEN
                } else {
                    IPV4_ADDR_LEN
                }
            }
            None => false,
        }
    }

    /// Whether this address is a usable unicast address with known prefix.
    pub fn is_valid_static(&self) -> bool {
        self.prefix.is_some() && !self.address.is_unspecified()
    }
}

impl std::fmt::Display for IpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.prefix {
            Some(prefix) => write!(f, "{}/{prefix}", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl FromStr for IpAddress {
    type Err = NicfgError;

    fn from_str(s: &str) -> Result<Self, NicfgError> {
        Self::from_string(s)
    }
}

impl From<IpAddress> for String {
    fn from(v: IpAddress) -> Self {
        v.to_string()
    }
}

impl TryFrom<String> for IpAddress {
    type Error = NicfgError;

    fn try_from(value: String) -> Result<Self, NicfgError> {
        Self::from_string(value.as_str())
    }
}

/// One configured address of a connection.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct IpConfig {
    pub address: IpAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Peer address of point-to-point links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<IpAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<IpAddress>,
}

impl IpConfig {
    pub fn new(address: IpAddress) -> Self {
        Self {
            address,
            label: None,
            remote_address: None,
            broadcast: None,
        }
    }
}

/// Convert prefix length into IPv4 dotted netmask.
pub fn prefix_to_netmask(prefix: u8) -> Result<Ipv4Addr, NicfgError> {
    if prefix > IPV4_ADDR_LEN {
        return Err(NicfgError::new(
            ErrorKind::InvalidArgument,
            format!(
                "Invalid IPv4 prefix length {prefix}, should be in the range \
                 of 0 to {IPV4_ADDR_LEN}"
            ),
        ));
    }
    Ok(if prefix == 0 {
        Ipv4Addr::from(0)
    } else {
        Ipv4Addr::from(u32::MAX << (IPV4_ADDR_LEN - prefix))
    })
}

/// Convert IPv4 dotted netmask into prefix length. Non-contiguous masks
/// are rejected.
pub fn netmask_to_prefix(netmask: &str) -> Result<u8, NicfgError> {
    let mask = Ipv4Addr::from_str(netmask.trim()).map_err(|e| {
        NicfgError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid netmask '{netmask}': {e}"),
        )
    })?;
    let bits = u32::from(mask);
    let prefix = bits.leading_ones();
    if bits.checked_shl(prefix).unwrap_or(0) != 0 {
        return Err(NicfgError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid netmask '{netmask}': not contiguous"),
        ));
    }
    Ok(prefix as u8)
}

fn validate_prefix(address: &IpAddr, prefix: u8) -> Result<(), NicfgError> {
    let max = if address.is_ipv6() {
        IPV6_ADDR_LEN
    } else {
        IPV4_ADDR_LEN
    };
    if prefix > max {
        Err(NicfgError::new(
            ErrorKind::InvalidArgument,
            format!(
                "Invalid prefix length {prefix} for {address}, should be in \
                 the range of 0 to {max}"
            ),
        ))
    } else {
        Ok(())
    }
}

fn apply_ip_prefix_len(ip: IpAddr, prefix_length: u8) -> IpAddr {
    if prefix_length == 0 {
        return if ip.is_ipv6() {
            IpAddr::V6(0.into())
        } else {
            IpAddr::V4(0.into())
        };
    }

    if (ip.is_ipv6() && prefix_length >= IPV6_ADDR_LEN)
        || (ip.is_ipv4() && prefix_length >= IPV4_ADDR_LEN)
    {
        return ip;
    }

    match ip {
        IpAddr::V6(i) => Ipv6Addr::from(
            u128::from(i) & (u128::MAX << (IPV6_ADDR_LEN - prefix_length)),
        )
        .into(),
        IpAddr::V4(i) => Ipv4Addr::from(
            u32::from(i) & (u32::MAX << (IPV4_ADDR_LEN - prefix_length)),
        )
        .into(),
    }
}
