// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[non_exhaustive]
#[serde(rename_all = "kebab-case")]
/// Interface type
pub enum InterfaceType {
    /// Ethernet interface.
    /// Deserialize and serialize from/to 'ethernet'
    Ethernet,
    /// Wireless LAN interface.
    /// Deserialize and serialize from/to 'wireless'
    Wireless,
    /// IP over InfiniBand interface.
    /// Deserialize and serialize from/to 'infiniband'
    #[serde(rename = "infiniband")]
    InfiniBand,
    /// Bond interface.
    /// Deserialize and serialize from/to 'bond'
    Bond,
    /// Bridge provided by Linux kernel.
    /// Deserialize and serialize from/to 'bridge'
    Bridge,
    /// VLAN interface.
    /// Deserialize and serialize from/to 'vlan'
    Vlan,
    /// TUN interface.
    /// Deserialize and serialize from/to 'tun'
    Tun,
    /// TAP interface.
    /// Deserialize and serialize from/to 'tap'
    Tap,
    /// Dummy interface.
    /// Deserialize and serialize from/to 'dummy'
    Dummy,
    /// Loopback interface.
    /// Deserialize and serialize from/to 'loopback'
    Loopback,
    /// S390 OSA Express (QDIO) channel device.
    /// Deserialize and serialize from/to 'qeth'
    Qeth,
    /// S390 channel-to-channel device.
    /// Deserialize and serialize from/to 'ctc'
    Ctc,
    /// S390 LAN channel station.
    /// Deserialize and serialize from/to 'lcs'
    Lcs,
    /// S390 HiperSockets device.
    /// Deserialize and serialize from/to 'hsi'
    Hsi,
    /// Interface unknown
    #[serde(untagged)]
    Unknown(String),
}

impl Default for InterfaceType {
    fn default() -> Self {
        Self::Unknown("unknown".to_string())
    }
}

impl InterfaceType {
    pub fn is_unknown(&self) -> bool {
        matches!(self, InterfaceType::Unknown(_))
    }

    /// Whether interface is created by software instead of backed by
    /// hardware.
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            InterfaceType::Bond
                | InterfaceType::Bridge
                | InterfaceType::Vlan
                | InterfaceType::Tun
                | InterfaceType::Tap
                | InterfaceType::Dummy
        )
    }

    /// Whether this interface holds ports.
    pub fn is_controller(&self) -> bool {
        matches!(self, InterfaceType::Bond | InterfaceType::Bridge)
    }

    pub fn is_s390(&self) -> bool {
        matches!(
            self,
            InterfaceType::Qeth
                | InterfaceType::Ctc
                | InterfaceType::Lcs
                | InterfaceType::Hsi
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ethernet => "ethernet",
            Self::Wireless => "wireless",
            Self::InfiniBand => "infiniband",
            Self::Bond => "bond",
            Self::Bridge => "bridge",
            Self::Vlan => "vlan",
            Self::Tun => "tun",
            Self::Tap => "tap",
            Self::Dummy => "dummy",
            Self::Loopback => "loopback",
            Self::Qeth => "qeth",
            Self::Ctc => "ctc",
            Self::Lcs => "lcs",
            Self::Hsi => "hsi",
            Self::Unknown(s) => s.as_str(),
        }
    }
}

impl From<&str> for InterfaceType {
    fn from(s: &str) -> Self {
        match s {
            "ethernet" => Self::Ethernet,
            "wireless" => Self::Wireless,
            "infiniband" => Self::InfiniBand,
            "bond" => Self::Bond,
            "bridge" => Self::Bridge,
            "vlan" => Self::Vlan,
            "tun" => Self::Tun,
            "tap" => Self::Tap,
            "dummy" => Self::Dummy,
            "loopback" => Self::Loopback,
            "qeth" => Self::Qeth,
            "ctc" => Self::Ctc,
            "lcs" => Self::Lcs,
            "hsi" => Self::Hsi,
            other => Self::Unknown(other.to_string()),
        }
    }
}
