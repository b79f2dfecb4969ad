// SPDX-License-Identifier: Apache-2.0

use crate::{
    Backend, BondConnection, BootProtocol, Config, ConnectionConfig,
    DhcpHostnamePolicy, DummyConnection, ErrorKind, EthernetConnection,
    Interface, InterfaceType, IpAddress, IpConfig, NicfgConnection, Route,
    RouteDestination, RouteInterface, VlanConnection,
};

fn gen_config() -> Config {
    let mut config = Config::new(Backend::Sysconfig);
    for name in ["eth0", "eth1"] {
        config.interfaces.push(Interface::new(name, InterfaceType::Ethernet));
    }
    let mut eth0 = EthernetConnection::new("eth0");
    eth0.base.bootproto = BootProtocol::Static;
    eth0.base.ip = Some(IpConfig::new(
        IpAddress::from_string("192.168.1.5/24").unwrap(),
    ));
    config.add_or_update_connection_config(ConnectionConfig::Ethernet(
        Box::new(eth0),
    ));
    let mut bond = BondConnection::new("bond0");
    bond.bond.ports = vec!["eth0".into(), "eth1".into()];
    config.add_or_update_connection_config(ConnectionConfig::Bond(Box::new(
        bond,
    )));
    config.add_or_update_connection_config(ConnectionConfig::Vlan(Box::new(
        VlanConnection::new("eth0.10", "eth0", 10),
    )));
    let eth0_id = config.interfaces.by_name("eth0").unwrap().id();
    config.routing.add_route(Route::new(
        RouteDestination::Network(
            IpAddress::from_string("10.1.0.0/16").unwrap(),
        ),
        Some("192.168.1.254".parse().unwrap()),
        RouteInterface::Bound(eth0_id),
    ));
    config.routing.add_route(Route::new(
        RouteDestination::Default,
        Some("192.168.1.1".parse().unwrap()),
        RouteInterface::Unbound,
    ));
    config.hostname.dhcp_hostname =
        DhcpHostnamePolicy::Interface("eth0".into());
    config
}

#[test]
fn test_config_add_connection_creates_interface() {
    let config = gen_config();
    let bond = config.interfaces.by_name("bond0").unwrap();
    assert_eq!(bond.iface_type(), &InterfaceType::Bond);
    assert!(!bond.present);
    assert_eq!(
        config.interfaces.by_name("eth0.10").unwrap().iface_type(),
        &InterfaceType::Vlan
    );
}

#[test]
fn test_config_rename_interface() {
    let mut config = gen_config();
    let id = config.interfaces.by_name("eth0").unwrap().id();
    config.rename_interface("eth0", "lan0").unwrap();

    let iface = config.interfaces.by_name("lan0").unwrap();
    assert_eq!(iface.id(), id);
    assert_eq!(iface.old_name.as_deref(), Some("eth0"));
    assert!(config.interfaces.by_name("eth0").is_none());
    assert_eq!(config.connections.by_interface("lan0").unwrap().name(), "lan0");
    assert_eq!(config.ports_of("bond0"), vec!["lan0", "eth1"]);
    assert_eq!(
        config.connections.by_name("eth0.10").unwrap().parent(),
        Some("lan0")
    );
    assert_eq!(
        config.hostname.dhcp_hostname,
        DhcpHostnamePolicy::Interface("lan0".into())
    );

    let routes = config.routes_for(Some("lan0")).unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].interface_name(&config.interfaces), Some("lan0"));
}

#[test]
fn test_config_rename_to_existing_name() {
    let mut config = gen_config();
    let result = config.rename_interface("eth0", "eth1");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_config_delete_interface() {
    let mut config = gen_config();
    config.delete_interface("eth0").unwrap();

    assert!(config.interfaces.by_name("eth0").is_none());
    assert!(config.connections.by_interface("eth0").is_none());
    assert_eq!(config.routing.routes().count(), 1);
    assert!(config.routing.routes().all(|r| r.is_default()));
    assert_eq!(config.hostname.dhcp_hostname, DhcpHostnamePolicy::None);
}

#[test]
fn test_config_delete_unknown_interface() {
    let mut config = gen_config();
    let result = config.delete_interface("eth9");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn test_config_copy_is_independent() {
    let config = gen_config();
    let mut copy = config.copy();
    assert_eq!(copy, config);

    copy.rename_interface("eth1", "lan1").unwrap();
    copy.add_or_update_connection_config(ConnectionConfig::Dummy(Box::new(
        DummyConnection::new("dummy0"),
    )));
    assert!(config.interfaces.by_name("eth1").is_some());
    assert!(config.interfaces.by_name("dummy0").is_none());
    assert_eq!(config.ports_of("bond0"), vec!["eth0", "eth1"]);
}

#[test]
fn test_config_controller_of() {
    let config = gen_config();
    assert_eq!(config.controller_of("eth1").map(|c| c.name()), Some("bond0"));
    assert!(config.controller_of("bond0").is_none());
}

#[test]
fn test_config_routes_for_unknown_interface() {
    let config = gen_config();
    let result = config.routes_for(Some("eth9"));
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn test_config_global_routes() {
    let config = gen_config();
    let routes = config.routes_for(None).unwrap();
    assert_eq!(routes.len(), 1);
    assert!(routes[0].is_default());
}

#[test]
fn test_backend_from_id() {
    assert_eq!(Backend::from_id("keyfile").unwrap(), Backend::Keyfile);
    assert_eq!(Backend::from_id(" none ").unwrap(), Backend::Unmanaged);
    assert_eq!("sysconfig".parse::<Backend>().unwrap(), Backend::Sysconfig);

    let result = Backend::from_id("bogus");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidBackend);
        assert!(e.msg().contains("sysconfig, keyfile, none"));
    }
}

#[test]
fn test_config_write_without_backend() {
    let (_tmp, sysroot) = crate::unit_tests::new_sysroot(&[], Vec::new());
    let mut config = gen_config();
    config.backend = None;
    let result = config.write(&sysroot, None);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidBackend);
    }
}
