// SPDX-License-Identifier: Apache-2.0

mod boot_protocol;
mod connections;
mod conns;
mod diff;
mod dns;
mod hostname;
mod iface;
mod iface_type;
mod ifaces;
mod ip;
mod route;
mod startmode;

#[cfg(test)]
mod unit_tests;

pub use self::boot_protocol::BootProtocol;
pub use self::connections::{
    BaseConnection, BondConfig, BondConnection, BridgeConfig,
    BridgeConnection, ConnectionConfig, DummyConnection, EthernetConnection,
    HIDE_PASSWORD_STR, InfiniBandConnection, IpoibMode, LoopbackConnection,
    NicfgConnection, S390Config, S390Connection, TunnelConnection,
    VlanConfig, VlanConnection, WIRELESS_WEP_KEY_COUNT, WirelessAuthMode,
    WirelessConfig, WirelessConnection, WirelessEapMode, WirelessMode,
};
pub(crate) use self::connections::vlan_id_from_name;
pub use self::conns::ConnectionConfigs;
pub use self::diff::CollectionDiff;
pub use self::dns::Dns;
pub use self::hostname::{DhcpHostnamePolicy, Hostname};
pub use self::iface::{Hwinfo, Interface, InterfaceId};
pub use self::iface_type::InterfaceType;
pub use self::ifaces::Interfaces;
pub use self::ip::{
    AddressFamily, IpAddress, IpConfig, netmask_to_prefix, prefix_to_netmask,
};
pub use self::route::{
    Route, RouteDestination, RouteInterface, Routing, RoutingTable,
};
pub use self::startmode::Startmode;
