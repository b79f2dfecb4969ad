// SPDX-License-Identifier: Apache-2.0

use super::{ifcfg::IfcfgFile, s390::S390Handler, wireless::WirelessHandler};
use crate::{
    BaseConnection, BondConnection, BridgeConnection, ConnectionConfig,
    DummyConnection, EthernetConnection, InfiniBandConnection, InterfaceType,
    IpoibMode, Issues, LoopbackConnection, Sysroot, TunnelConnection,
    VlanConnection, dispatch::TypeRegistry, net::vlan_id_from_name,
};

/// Field mapping of one device type in `ifcfg-<name>` files.
///
/// The shared fields are handled before [SysconfigHandler::read()] and
/// after [SysconfigHandler::write()], handlers only take care of the
/// device specific keys.
pub(crate) trait SysconfigHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> ConnectionConfig;

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile);
}

pub(crate) fn sysconfig_registry() -> TypeRegistry<dyn SysconfigHandler> {
    let mut registry: TypeRegistry<dyn SysconfigHandler> = TypeRegistry::new();
    registry.register(InterfaceType::Ethernet, Box::new(EthernetHandler));
    registry.register(InterfaceType::Wireless, Box::new(WirelessHandler));
    registry.register(InterfaceType::Bond, Box::new(BondHandler));
    registry.register(InterfaceType::Bridge, Box::new(BridgeHandler));
    registry.register(InterfaceType::Vlan, Box::new(VlanHandler));
    registry.register(InterfaceType::InfiniBand, Box::new(InfiniBandHandler));
    registry.register(InterfaceType::Tun, Box::new(TunnelHandler));
    registry.register(InterfaceType::Tap, Box::new(TunnelHandler));
    registry.register(InterfaceType::Dummy, Box::new(DummyHandler));
    registry.register(InterfaceType::Loopback, Box::new(LoopbackHandler));
    for s390_type in [
        InterfaceType::Qeth,
        InterfaceType::Ctc,
        InterfaceType::Lcs,
        InterfaceType::Hsi,
    ] {
        registry.register(s390_type, Box::new(S390Handler));
    }
    registry
}

struct EthernetHandler;

impl SysconfigHandler for EthernetHandler {
    fn read(
        &self,
        _ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Ethernet(Box::new(EthernetConnection {
            base,
            ..Default::default()
        }))
    }

    fn write(&self, _conn: &ConnectionConfig, _ifcfg: &mut IfcfgFile) {}
}

struct LoopbackHandler;

impl SysconfigHandler for LoopbackHandler {
    fn read(
        &self,
        _ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Loopback(Box::new(LoopbackConnection {
            base,
            ..Default::default()
        }))
    }

    fn write(&self, _conn: &ConnectionConfig, _ifcfg: &mut IfcfgFile) {}
}

struct DummyHandler;

impl SysconfigHandler for DummyHandler {
    fn read(
        &self,
        _ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Dummy(Box::new(DummyConnection {
            base,
            ..Default::default()
        }))
    }

    fn write(&self, _conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        ifcfg.vars.set("INTERFACETYPE", "dummy");
    }
}

const BONDING_SLAVE_PREFIX: &str = "BONDING_SLAVE";

struct BondHandler;

impl SysconfigHandler for BondHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = BondConnection {
            base,
            ..Default::default()
        };
        for suffix in ifcfg.vars.suffixes(BONDING_SLAVE_PREFIX) {
            if let Some(port) = ifcfg
                .vars
                .get_non_empty(&format!("{BONDING_SLAVE_PREFIX}{suffix}"))
            {
                conn.bond.ports.push(port.to_string());
            }
        }
        conn.bond.options = ifcfg
            .vars
            .get_non_empty("BONDING_MODULE_OPTS")
            .map(str::to_string);
        ConnectionConfig::Bond(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::Bond(conn) = conn else {
            return;
        };
        let vars = &mut ifcfg.vars;
        vars.set_bool("BONDING_MASTER", true);
        vars.remove_prefixed(BONDING_SLAVE_PREFIX);
        for (index, port) in conn.bond.ports.iter().enumerate() {
            vars.set(&format!("{BONDING_SLAVE_PREFIX}_{index}"), port);
        }
        vars.set_opt("BONDING_MODULE_OPTS", conn.bond.options.as_deref());
    }
}

struct BridgeHandler;

impl SysconfigHandler for BridgeHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = BridgeConnection {
            base,
            ..Default::default()
        };
        let vars = &ifcfg.vars;
        conn.bridge.ports = vars
            .get("BRIDGE_PORTS")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        conn.bridge.stp = vars.get_bool("BRIDGE_STP").unwrap_or_default();
        conn.bridge.forward_delay = vars.get_u32("BRIDGE_FORWARDDELAY");
        ConnectionConfig::Bridge(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::Bridge(conn) = conn else {
            return;
        };
        let vars = &mut ifcfg.vars;
        vars.set_bool("BRIDGE", true);
        vars.set("BRIDGE_PORTS", &conn.bridge.ports.join(" "));
        vars.set("BRIDGE_STP", if conn.bridge.stp { "on" } else { "off" });
        vars.set_opt(
            "BRIDGE_FORWARDDELAY",
            conn.bridge.forward_delay.map(|d| d.to_string()).as_deref(),
        );
    }
}

struct VlanHandler;

impl SysconfigHandler for VlanHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = VlanConnection {
            base,
            ..Default::default()
        };
        conn.vlan.parent = ifcfg
            .vars
            .get("ETHERDEVICE")
            .unwrap_or_default()
            .to_string();
        conn.vlan.id = ifcfg
            .vars
            .get_u32("VLAN_ID")
            .and_then(|i| u16::try_from(i).ok())
            .or_else(|| vlan_id_from_name(&ifcfg.name));
        ConnectionConfig::Vlan(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::Vlan(conn) = conn else {
            return;
        };
        let vars = &mut ifcfg.vars;
        vars.set("ETHERDEVICE", &conn.vlan.parent);
        vars.set_opt(
            "VLAN_ID",
            conn.vlan.id.map(|i| i.to_string()).as_deref(),
        );
    }
}

struct InfiniBandHandler;

impl SysconfigHandler for InfiniBandHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::InfiniBand(Box::new(InfiniBandConnection {
            base,
            ipoib_mode: ifcfg
                .vars
                .get_non_empty("IPOIB_MODE")
                .and_then(IpoibMode::from_name),
        }))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::InfiniBand(conn) = conn else {
            return;
        };
        ifcfg
            .vars
            .set_opt("IPOIB_MODE", conn.ipoib_mode.map(|m| m.as_str()));
    }
}

struct TunnelHandler;

impl SysconfigHandler for TunnelHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        _sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let vars = &ifcfg.vars;
        ConnectionConfig::Tunnel(Box::new(TunnelConnection {
            base,
            owner: vars.get_non_empty("TUNNEL_SET_OWNER").map(str::to_string),
            group: vars.get_non_empty("TUNNEL_SET_GROUP").map(str::to_string),
        }))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::Tunnel(conn) = conn else {
            return;
        };
        let vars = &mut ifcfg.vars;
        vars.set("TUNNEL", if conn.is_tap() { "tap" } else { "tun" });
        vars.set_opt("TUNNEL_SET_OWNER", conn.owner.as_deref());
        vars.set_opt("TUNNEL_SET_GROUP", conn.group.as_deref());
    }
}
