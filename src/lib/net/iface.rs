// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{InterfaceType, JsonDisplay};

/// Stable handle of an [Interface] inside its [crate::Interfaces]
/// collection. Survives renames, never reused within one collection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct InterfaceId(pub(crate) u32);

impl std::fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hardware description of a physical interface.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Hwinfo {
    /// Kernel interface name reported by the system.
    pub name: String,
    #[serde(default, rename = "type")]
    pub iface_type: InterfaceType,
    /// Bus ID, e.g. `0000:00:03.0` or `0.0.0700` for S390.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub busid: Option<String>,
    /// MAC address in the format: lower case hex string separated by `:`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

impl Hwinfo {
    pub fn new(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            ..Default::default()
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
/// Network interface known to the kernel or only configured on disk.
pub struct Interface {
    /// Assigned by [crate::Interfaces::push()].
    #[serde(default)]
    pub id: InterfaceId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub iface_type: InterfaceType,
    /// Hardware information, only for physical interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<Hwinfo>,
    /// Whether the device currently exists in the system.
    #[serde(default)]
    pub present: bool,
    /// Name before the last [crate::Config::rename_interface()].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,
}

impl Interface {
    /// Interface only configured on disk.
    pub fn new(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            ..Default::default()
        }
    }

    /// Interface found by hardware enumeration.
    pub fn from_hwinfo(hwinfo: Hwinfo) -> Self {
        Self {
            name: hwinfo.name.clone(),
            iface_type: hwinfo.iface_type.clone(),
            present: true,
            hardware: if hwinfo.iface_type.is_virtual() {
                None
            } else {
                Some(hwinfo)
            },
            ..Default::default()
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn iface_type(&self) -> &InterfaceType {
        &self.iface_type
    }

    pub fn is_virtual(&self) -> bool {
        self.iface_type.is_virtual()
    }

    pub fn is_physical(&self) -> bool {
        !self.is_virtual()
    }

    pub fn busid(&self) -> Option<&str> {
        self.hardware.as_ref().and_then(|h| h.busid.as_deref())
    }

    pub fn mac(&self) -> Option<&str> {
        self.hardware.as_ref().and_then(|h| h.mac.as_deref())
    }

    pub fn driver(&self) -> Option<&str> {
        self.hardware.as_ref().and_then(|h| h.driver.as_deref())
    }
}
