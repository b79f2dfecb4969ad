// SPDX-License-Identifier: Apache-2.0

mod base;
mod bond;
mod bridge;
mod conn;
mod conn_trait;
mod ethernet;
mod infiniband;
mod s390;
mod tunnel;
mod vlan;
mod wireless;

pub use self::base::BaseConnection;
pub use self::bond::{BondConfig, BondConnection};
pub use self::bridge::{BridgeConfig, BridgeConnection};
pub use self::conn::ConnectionConfig;
pub use self::conn_trait::NicfgConnection;
pub use self::ethernet::{
    DummyConnection, EthernetConnection, LoopbackConnection,
};
pub use self::infiniband::{InfiniBandConnection, IpoibMode};
pub use self::s390::{S390Config, S390Connection};
pub use self::tunnel::TunnelConnection;
pub use self::vlan::{VlanConfig, VlanConnection};
pub(crate) use self::vlan::vlan_id_from_name;
pub use self::wireless::{
    HIDE_PASSWORD_STR, WIRELESS_WEP_KEY_COUNT, WirelessAuthMode,
    WirelessConfig, WirelessConnection, WirelessEapMode, WirelessMode,
};
