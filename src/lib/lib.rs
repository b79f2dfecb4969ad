// SPDX-License-Identifier: Apache-2.0

//! Unified model of the host network configuration, read from and written
//! to the files of several network backends.
//!
//! ```no_run
//! use nicfg::{Backend, Config, Issues, Sysroot};
//!
//! let sysroot = Sysroot::default();
//! let mut issues = Issues::new();
//! let mut config =
//!     Config::read(Backend::Sysconfig, &sysroot, &mut issues).unwrap();
//! let old = config.copy();
//! config.rename_interface("eth0", "lan0").unwrap();
//! config.backend = Some(Backend::Keyfile);
//! config.write(&sysroot, Some(&old)).unwrap();
//! ```

mod backend;
mod command;
mod config;
mod dispatch;
mod error;
mod forwarding;
mod hostname_file;
mod hosts;
mod hwinfo;
mod issue;
mod keyfile;
mod net;
mod resolv;
mod sysconfig;
mod sysroot;
mod unmanaged;

#[cfg(test)]
mod unit_tests;

pub use self::backend::{Backend, ConfigReader, ConfigWriter};
pub use self::command::{CommandExecutor, SystemCommandExecutor};
pub use self::config::Config;
pub use self::error::{ErrorKind, NicfgError};
pub use self::hosts::{HOSTNAME_LOOPBACK_IP, HostsTable};
pub use self::hwinfo::{
    HardwareReader, StaticHardwareReader, SysfsHardwareReader,
};
pub use self::issue::{Issue, IssueLocation, Issues};
pub use self::keyfile::KeyfileBackend;
pub use self::net::{
    AddressFamily, BaseConnection, BondConfig, BondConnection, BootProtocol,
    BridgeConfig, BridgeConnection, CollectionDiff, ConnectionConfig,
    ConnectionConfigs, DhcpHostnamePolicy, Dns, DummyConnection,
    EthernetConnection, HIDE_PASSWORD_STR, Hostname, Hwinfo,
    InfiniBandConnection, Interface, InterfaceId, InterfaceType, Interfaces,
    IpAddress, IpConfig, IpoibMode, LoopbackConnection, NicfgConnection,
    Route, RouteDestination, RouteInterface, Routing, RoutingTable,
    S390Config, S390Connection, Startmode, TunnelConnection, VlanConfig,
    VlanConnection, WIRELESS_WEP_KEY_COUNT, WirelessAuthMode, WirelessConfig,
    WirelessConnection, WirelessEapMode, WirelessMode, netmask_to_prefix,
    prefix_to_netmask,
};
pub use self::sysconfig::{RouteRecord, SysconfigBackend};
pub use self::sysroot::Sysroot;
pub use self::unmanaged::UnmanagedBackend;

pub(crate) use nicfg_derive::{JsonDisplay, JsonDisplayHideSecrets};
