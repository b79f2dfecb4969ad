// SPDX-License-Identifier: Apache-2.0

use std::os::unix::fs::PermissionsExt;

use crate::{
    Backend, BondConnection, BootProtocol, Config, ConnectionConfig,
    EthernetConnection, Hwinfo, Interface, InterfaceType, IpAddress,
    IpConfig, Issues, NicfgConnection, Route, RouteDestination,
    RouteInterface, Startmode, Sysroot, keyfile::key_file::KeyFile,
    unit_tests::new_sysroot,
};

const DIR: &str = "etc/NetworkManager/system-connections";

const ETH0: &str = "[connection]\n\
    id=eth0\n\
    uuid=5fcf4c36-8bd4-4b0e-a0a1-27d1d5e7a9a1\n\
    type=ethernet\n\
    interface-name=eth0\n\
    \n\
    [ipv4]\n\
    method=manual\n\
    address1=192.168.1.5/24,192.168.1.1\n\
    dns=192.0.2.53;\n\
    dns-search=example.org;\n\
    \n\
    [ipv6]\n\
    method=ignore\n\
    \n\
    [vendor-extension]\n\
    flag=kept\n";

const WIRED: &str = "[connection]\n\
    id=Wired connection 1\n\
    uuid=0b7c2b5e-93a6-4c4f-9e55-cf1f7c1bbd10\n\
    type=802-3-ethernet\n\
    interface-name=eth1\n\
    autoconnect=false\n\
    \n\
    [ipv4]\n\
    method=auto\n\
    \n\
    [ipv6]\n\
    method=auto\n";

const BOND0: &str = "[connection]\n\
    id=bond0\n\
    type=bond\n\
    interface-name=bond0\n\
    \n\
    [bond]\n\
    mode=active-backup\n\
    \n\
    [ipv4]\n\
    method=disabled\n\
    \n\
    [ipv6]\n\
    method=ignore\n";

const BOND0_PORT: &str = "[connection]\n\
    id=bond0-port-eth2\n\
    type=ethernet\n\
    interface-name=eth2\n\
    master=bond0\n\
    slave-type=bond\n";

const WG0: &str = "[connection]\n\
    id=wg0\n\
    type=wireguard\n\
    interface-name=wg0\n";

fn path(name: &str) -> String {
    format!("{DIR}/{name}.nmconnection")
}

fn read_kf(sysroot: &Sysroot, name: &str) -> KeyFile {
    KeyFile::parse(&sysroot.read_file(path(name)).unwrap().unwrap())
}

fn hwinfos() -> Vec<Hwinfo> {
    vec![
        Hwinfo::new("eth0", InterfaceType::Ethernet),
        Hwinfo::new("eth1", InterfaceType::Ethernet),
    ]
}

fn sample_sysroot() -> (tempfile::TempDir, Sysroot) {
    new_sysroot(
        &[
            (path("eth0").as_str(), ETH0),
            (path("Wired connection 1").as_str(), WIRED),
            (path("bond0").as_str(), BOND0),
            (path("bond0-port-eth2").as_str(), BOND0_PORT),
            (path("wg0").as_str(), WG0),
        ],
        hwinfos(),
    )
}

#[test]
fn test_keyfile_read() {
    let (_tmp, sysroot) = sample_sysroot();
    let mut issues = Issues::new();
    let config = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();

    assert!(issues.is_empty());
    assert_eq!(config.connections.len(), 4);
    assert!(config.connections.by_name("wg0").is_none());
    assert!(config.interfaces.by_name("wg0").is_none());

    let eth0 = config.connections.by_name("eth0").unwrap();
    assert_eq!(eth0.bootproto(), BootProtocol::Static);
    assert_eq!(eth0.base_conn().startmode, Startmode::Auto);
    assert_eq!(
        eth0.base_conn().uuid.as_deref(),
        Some("5fcf4c36-8bd4-4b0e-a0a1-27d1d5e7a9a1")
    );

    let wired = config.connections.by_interface("eth1").unwrap();
    assert_eq!(wired.name(), "Wired connection 1");
    assert_eq!(wired.bootproto(), BootProtocol::Dhcp);
    assert_eq!(wired.base_conn().startmode, Startmode::Off);

    let bond0 = config.connections.by_name("bond0").unwrap();
    assert_eq!(bond0.bootproto(), BootProtocol::Static);
    assert_eq!(config.ports_of("bond0"), vec!["eth2"]);
    let eth2 = config.interfaces.by_name("eth2").unwrap();
    assert!(!eth2.present);
    assert_eq!(eth2.iface_type(), &InterfaceType::Ethernet);

    let routes = config.routes_for(Some("eth0")).unwrap();
    assert_eq!(routes.len(), 1);
    assert!(routes[0].is_default());
    assert_eq!(routes[0].gateway, Some("192.168.1.1".parse().unwrap()));
    assert_eq!(config.routing.routes().count(), 1);

    assert_eq!(
        config.dns.nameservers,
        vec!["192.0.2.53".parse::<std::net::IpAddr>().unwrap()]
    );
    assert_eq!(config.dns.searchlist, vec!["example.org"]);
}

#[test]
fn test_keyfile_invalid_autoconnect() {
    let (_tmp, sysroot) = new_sysroot(
        &[(
            path("eth0").as_str(),
            "[connection]\nid=eth0\ntype=ethernet\nautoconnect=maybe\n",
        )],
        hwinfos(),
    );
    let mut issues = Issues::new();
    let config = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();

    let eth0 = config.connections.by_name("eth0").unwrap();
    assert_eq!(eth0.base_conn().startmode, Startmode::Auto);
    assert_eq!(eth0.bootproto(), BootProtocol::None);
    assert_eq!(issues.len(), 1);
    let issue = issues.iter().next().unwrap();
    assert_eq!(issue.location.key, "connection.autoconnect");
    assert_eq!(issue.value, "maybe");
    assert_eq!(issue.fallback, "auto");
}

fn gen_config() -> Config {
    let mut config = Config::new(Backend::Keyfile);
    for name in ["eth0", "eth1", "eth2"] {
        config.interfaces.push(Interface::new(name, InterfaceType::Ethernet));
    }
    let mut eth0 = EthernetConnection::new("eth0");
    eth0.base.bootproto = BootProtocol::Static;
    eth0.base.startmode = Startmode::Auto;
    eth0.base.ip = Some(IpConfig::new(
        IpAddress::from_string("192.168.1.5/24").unwrap(),
    ));
    config.add_or_update_connection_config(ConnectionConfig::Ethernet(
        Box::new(eth0),
    ));
    let mut eth1 = EthernetConnection::new("eth1");
    eth1.base.startmode = Startmode::Manual;
    config.add_or_update_connection_config(ConnectionConfig::Ethernet(
        Box::new(eth1),
    ));
    let mut bond = BondConnection::new("bond0");
    bond.base.bootproto = BootProtocol::Dhcp;
    bond.base.startmode = Startmode::Auto;
    bond.bond.ports = vec!["eth1".into(), "eth2".into()];
    bond.bond.options = Some("mode=active-backup miimon=100".into());
    config.add_or_update_connection_config(ConnectionConfig::Bond(Box::new(
        bond,
    )));
    for gw in ["192.168.1.1", "10.0.0.1"] {
        config.routing.add_route(Route::new(
            RouteDestination::Default,
            Some(gw.parse().unwrap()),
            RouteInterface::Unbound,
        ));
    }
    config.dns.nameservers = vec!["192.0.2.53".parse().unwrap()];
    config
}

#[test]
fn test_keyfile_write_new() {
    let (_tmp, sysroot) = new_sysroot(&[], hwinfos());
    gen_config().write(&sysroot, None).unwrap();

    assert_eq!(
        sysroot.list_dir(DIR).unwrap(),
        vec![
            "bond0.nmconnection",
            "eth0.nmconnection",
            "eth1.nmconnection",
            "eth2.nmconnection"
        ]
    );
    let mode = std::fs::metadata(sysroot.path(path("eth0")))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);

    let eth0 = read_kf(&sysroot, "eth0");
    assert_eq!(eth0.get("connection", "type"), Some("ethernet"));
    assert_eq!(eth0.get("connection", "autoconnect"), None);
    assert!(eth0.get_non_empty("connection", "uuid").is_some());
    assert_eq!(eth0.get("ipv4", "method"), Some("manual"));
    assert_eq!(eth0.get("ipv4", "address1"), Some("192.168.1.5/24"));
    assert_eq!(eth0.get("ipv4", "gateway"), Some("192.168.1.1"));
    assert_eq!(eth0.get("ipv4", "route1"), None);
    assert_eq!(eth0.get("ipv4", "dns"), Some("192.0.2.53;"));
    assert_eq!(eth0.get("ipv6", "method"), Some("ignore"));

    let eth1 = read_kf(&sysroot, "eth1");
    assert_eq!(eth1.get("connection", "master"), Some("bond0"));
    assert_eq!(eth1.get("connection", "slave-type"), Some("bond"));
    assert_eq!(eth1.get("connection", "autoconnect"), Some("false"));
    assert!(!eth1.has_section("ipv4"));

    let eth2 = read_kf(&sysroot, "eth2");
    assert_eq!(eth2.get("connection", "master"), Some("bond0"));
    assert_eq!(eth2.get("connection", "autoconnect"), None);

    let bond0 = read_kf(&sysroot, "bond0");
    assert_eq!(bond0.get("connection", "type"), Some("bond"));
    assert_eq!(bond0.get("bond", "mode"), Some("active-backup"));
    assert_eq!(bond0.get("bond", "miimon"), Some("100"));
    assert_eq!(bond0.get("ipv4", "method"), Some("auto"));
    assert_eq!(bond0.get("ipv4", "dns"), None);

    let mut issues = Issues::new();
    let config = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();
    assert!(issues.is_empty());
    assert_eq!(config.ports_of("bond0"), vec!["eth1", "eth2"]);
    assert_eq!(
        config.connections.by_name("eth1").unwrap().base_conn().startmode,
        Startmode::Off
    );
    let routes = config.routes_for(Some("eth0")).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].gateway, Some("192.168.1.1".parse().unwrap()));
}

#[test]
fn test_keyfile_rewrite_keeps_uuid_and_unknown_sections() {
    let (_tmp, sysroot) = sample_sysroot();
    let mut issues = Issues::new();
    let old = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();
    let mut config = old.copy();
    if let Some(eth0) = config.connections.by_name_mut("eth0") {
        eth0.base_conn_mut().mtu = Some(9000);
    }
    config.write(&sysroot, Some(&old)).unwrap();

    let eth0 = read_kf(&sysroot, "eth0");
    assert_eq!(
        eth0.get("connection", "uuid"),
        Some("5fcf4c36-8bd4-4b0e-a0a1-27d1d5e7a9a1")
    );
    assert_eq!(eth0.get("vendor-extension", "flag"), Some("kept"));
    assert_eq!(eth0.get("ethernet", "mtu"), Some("9000"));
    assert_eq!(eth0.get("ipv4", "gateway"), Some("192.168.1.1"));
    assert_eq!(eth0.get("ipv4", "address1"), Some("192.168.1.5/24"));
    assert_eq!(eth0.get("ipv4", "dns-search"), Some("example.org;"));

    let port = read_kf(&sysroot, "bond0-port-eth2");
    assert_eq!(port.get("connection", "master"), Some("bond0"));
    assert!(sysroot.read_file(path("wg0")).unwrap().is_some());
}

#[test]
fn test_keyfile_removed_connection_deleted() {
    let (_tmp, sysroot) = sample_sysroot();
    let mut issues = Issues::new();
    let old = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();
    let mut config = old.copy();
    config.delete_interface("eth1").unwrap();
    config.write(&sysroot, Some(&old)).unwrap();

    assert!(
        sysroot
            .read_file(path("Wired connection 1"))
            .unwrap()
            .is_none()
    );
    assert!(sysroot.read_file(path("eth0")).unwrap().is_some());
    assert!(sysroot.read_file(path("bond0")).unwrap().is_some());
}

#[test]
fn test_keyfile_static_without_address_round_trip() {
    let (_tmp, sysroot) = new_sysroot(&[], hwinfos());
    let mut config = Config::new(Backend::Keyfile);
    let mut eth0 = EthernetConnection::new("eth0");
    eth0.base.bootproto = BootProtocol::Static;
    config.add_or_update_connection_config(ConnectionConfig::Ethernet(
        Box::new(eth0),
    ));
    config.write(&sysroot, None).unwrap();

    let kf = read_kf(&sysroot, "eth0");
    assert_eq!(kf.get("ipv4", "method"), Some("disabled"));
    assert_eq!(kf.get("ipv6", "method"), Some("ignore"));

    let mut issues = Issues::new();
    let config = Config::read(Backend::Keyfile, &sysroot, &mut issues).unwrap();
    let eth0 = config.connections.by_name("eth0").unwrap();
    assert_eq!(eth0.bootproto(), BootProtocol::Static);
    assert!(eth0.base_conn().ip.is_none());
}
