// SPDX-License-Identifier: Apache-2.0

use crate::{
    BondConnection, BootProtocol, ConnectionConfig, ConnectionConfigs,
    EthernetConnection, InterfaceType, NicfgConnection, Startmode,
    VlanConnection,
};

fn gen_conns() -> ConnectionConfigs {
    let mut bond = BondConnection::new("bond0");
    bond.bond.ports = vec!["eth0".into(), "eth1".into()];
    bond.bond.options = Some("mode=active-backup miimon=100".into());
    [
        ConnectionConfig::Ethernet(Box::new(EthernetConnection::new("eth0"))),
        ConnectionConfig::Ethernet(Box::new(EthernetConnection::new("eth1"))),
        ConnectionConfig::Bond(Box::new(bond)),
        ConnectionConfig::Vlan(Box::new(VlanConnection::new(
            "eth0.10", "eth0", 10,
        ))),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_conns_rename_interface_follows_refs() {
    let mut conns = gen_conns();
    conns.rename_interface("eth0", "lan0");
    assert!(conns.by_name("eth0").is_none());
    assert_eq!(conns.by_interface("lan0").unwrap().name(), "lan0");
    assert_eq!(
        conns.by_name("bond0").unwrap().ports(),
        Some(vec!["lan0", "eth1"])
    );
    assert_eq!(conns.by_name("eth0.10").unwrap().parent(), Some("lan0"));
}

#[test]
fn test_conns_rename_interface_keeps_conn_id() {
    let mut conn = EthernetConnection::new("Wired connection 1");
    conn.base.interface = Some("eth0".into());
    let mut conns = ConnectionConfigs::new();
    conns.add_or_update(ConnectionConfig::Ethernet(Box::new(conn)));
    conns.rename_interface("eth0", "lan0");
    let conn = conns.by_interface("lan0").unwrap();
    assert_eq!(conn.name(), "Wired connection 1");
}

#[test]
fn test_conns_add_or_update_in_place() {
    let mut conns = gen_conns();
    let mut conn = EthernetConnection::new("eth1");
    conn.base.bootproto = BootProtocol::Dhcp;
    conns.add_or_update(ConnectionConfig::Ethernet(Box::new(conn)));
    assert_eq!(conns.len(), 4);
    assert_eq!(conns.names(), vec!["eth0", "eth1", "bond0", "eth0.10"]);
    assert_eq!(conns.by_name("eth1").unwrap().bootproto(), BootProtocol::Dhcp);
}

#[test]
fn test_conns_diff() {
    let old = gen_conns();
    let mut new = old.clone();
    new.remove("eth0.10");
    new.by_name_mut("eth1").unwrap().base_conn_mut().startmode =
        Startmode::Auto;
    let diff = new.diff(&old);
    assert!(diff.added.is_empty());
    assert_eq!(diff.removed, vec!["eth0.10".to_string()]);
    assert_eq!(diff.changed, vec!["eth1".to_string()]);
}

#[test]
fn test_conn_yaml_dispatch_by_type() {
    let conns: ConnectionConfigs = serde_yaml::from_str(
        r"---
- name: eth0
  type: ethernet
  bootproto: static
  ip:
    address: 192.0.2.2/24
  ip-aliases:
  - address: 192.0.2.3/24
    label: alias
- name: tap0
  type: tap
  owner: nobody
- name: eth5
  type: qeth
  s390:
    read-channel: 0.0.0700
    write-channel: 0.0.0701
    data-channel: 0.0.0702
    layer2: true",
    )
    .unwrap();
    let eth0 = conns.by_name("eth0").unwrap();
    assert!(matches!(eth0, ConnectionConfig::Ethernet(_)));
    assert!(eth0.base_conn().is_static_addressed());
    assert_eq!(eth0.base_conn().all_ips().count(), 2);
    if let Some(ConnectionConfig::Tunnel(tap)) = conns.by_name("tap0") {
        assert!(tap.is_tap());
        assert_eq!(tap.owner.as_deref(), Some("nobody"));
    } else {
        panic!("tap0 should be tunnel connection");
    }
    if let Some(ConnectionConfig::S390(qeth)) = conns.by_name("eth5") {
        assert_eq!(qeth.conn_type(), &InterfaceType::Qeth);
        assert_eq!(qeth.s390.channel_ids(), "0.0.0700 0.0.0701 0.0.0702");
    } else {
        panic!("eth5 should be s390 connection");
    }
}

#[test]
fn test_conn_yaml_unsupported_type() {
    let result = serde_yaml::from_str::<ConnectionConfig>(
        r"---
name: wg0
type: wireguard",
    );
    assert!(result.is_err());
}

#[test]
fn test_conn_new_by_type() {
    assert!(ConnectionConfig::new("x", &InterfaceType::Unknown("x".into()))
        .is_none());
    let conn = ConnectionConfig::new("ctc0", &InterfaceType::Ctc).unwrap();
    assert!(matches!(conn, ConnectionConfig::S390(_)));
    assert_eq!(conn.conn_type(), &InterfaceType::Ctc);
    assert!(
        ConnectionConfig::new("br0", &InterfaceType::Bridge)
            .unwrap()
            .is_virtual()
    );
}
