// SPDX-License-Identifier: Apache-2.0

use crate::{
    BootProtocol, HostsTable, Hwinfo, InterfaceType, Issues, Startmode,
    sysconfig::{base::read_base, ifcfg::IfcfgFile, shell_file::ShellVarFile},
    unit_tests::new_sysroot,
};

fn ifcfg(name: &str, content: &str) -> IfcfgFile {
    let mut ret = IfcfgFile::new(name);
    ret.vars = ShellVarFile::parse(content);
    ret
}

#[test]
fn test_iface_type_from_keys() {
    assert_eq!(
        ifcfg("foo", "BONDING_MASTER=yes\n").iface_type(&[]),
        InterfaceType::Bond
    );
    assert_eq!(
        ifcfg("foo", "BRIDGE='yes'\n").iface_type(&[]),
        InterfaceType::Bridge
    );
    assert_eq!(
        ifcfg("foo", "ETHERDEVICE=eth0\n").iface_type(&[]),
        InterfaceType::Vlan
    );
    assert_eq!(
        ifcfg("foo", "TUNNEL=tap\n").iface_type(&[]),
        InterfaceType::Tap
    );
    assert_eq!(
        ifcfg("foo", "WIRELESS_ESSID=home\n").iface_type(&[]),
        InterfaceType::Wireless
    );
    assert_eq!(
        ifcfg("foo", "INTERFACETYPE=dummy\n").iface_type(&[]),
        InterfaceType::Dummy
    );
    assert_eq!(
        ifcfg("foo", "CCW_CHAN_IDS='0.0.0700 0.0.0701 0.0.0702'\n")
            .iface_type(&[]),
        InterfaceType::Qeth
    );
    assert_eq!(
        ifcfg("foo", "CCW_CHAN_IDS='0.0.0600 0.0.0601'\nCTC_PROTOCOL=0\n")
            .iface_type(&[]),
        InterfaceType::Ctc
    );
}

#[test]
fn test_iface_type_from_name_and_hardware() {
    assert_eq!(ifcfg("lo", "").iface_type(&[]), InterfaceType::Loopback);
    assert_eq!(ifcfg("br0", "").iface_type(&[]), InterfaceType::Bridge);
    assert_eq!(ifcfg("wlan1", "").iface_type(&[]), InterfaceType::Wireless);
    // Prefix must be followed by a number
    assert_eq!(ifcfg("brain", "").iface_type(&[]), InterfaceType::Ethernet);
    assert_eq!(
        ifcfg("wlp3s0", "").iface_type(&[Hwinfo::new(
            "wlp3s0",
            InterfaceType::Wireless
        )]),
        InterfaceType::Wireless
    );
    assert_eq!(ifcfg("enp1s0", "").iface_type(&[]), InterfaceType::Ethernet);
}

#[test]
fn test_read_base_defaults_without_issue() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", ""),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(base.bootproto, BootProtocol::Static);
    assert_eq!(base.startmode, Startmode::Manual);
    assert!(base.ip.is_none());
    assert!(issues.is_empty());
}

#[test]
fn test_read_base_invalid_bootproto_with_ip() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", "BOOTPROTO=bogus\nIPADDR=192.168.1.5/24\n"),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(base.bootproto, BootProtocol::Static);
    assert_eq!(issues.len(), 1);
    let issue = issues.iter().next().unwrap();
    assert_eq!(issue.location.key, "BOOTPROTO");
    assert_eq!(issue.value, "bogus");
    assert_eq!(issue.fallback, "static");
    assert!(issue.location.file.ends_with("ifcfg-eth0"));
}

#[test]
fn test_read_base_invalid_bootproto_without_ip() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", "BOOTPROTO=bogus\n"),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(base.bootproto, BootProtocol::Dhcp);
    assert_eq!(issues.iter().next().unwrap().fallback, "dhcp");
}

#[test]
fn test_read_base_startmode() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", "STARTMODE=sometimes\n"),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(base.startmode, Startmode::Manual);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.iter().next().unwrap().location.key, "STARTMODE");

    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", "STARTMODE=ifplugd\nIFPLUGD_PRIORITY=5\n"),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(base.startmode, Startmode::Ifplugd { priority: 5 });
    assert!(issues.is_empty());
}

#[test]
fn test_read_base_addresses() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let hosts = HostsTable::parse("192.168.1.5 server.example.org server\n");
    let base = read_base(
        &ifcfg(
            "eth0",
            "IPADDR=192.168.1.5\nNETMASK=255.255.255.0\n\
             IPADDR_a=10.0.0.5\nPREFIXLEN_a=8\nLABEL_a=storage\n\
             IPADDR_b=2001:db8::5/64\nIPADDR1=172.16.0.5\n\
             PREFIXLEN1=12\n",
        ),
        InterfaceType::Ethernet,
        &hosts,
        &sysroot,
        &mut issues,
    );
    let ip = base.ip.as_ref().unwrap();
    assert_eq!(ip.address.to_string(), "192.168.1.5/24");
    assert_eq!(base.ip_aliases.len(), 3);
    assert_eq!(base.ip_aliases[0].address.to_string(), "10.0.0.5/8");
    assert_eq!(base.ip_aliases[0].label.as_deref(), Some("storage"));
    assert_eq!(base.ip_aliases[1].address.to_string(), "2001:db8::5/64");
    assert_eq!(base.ip_aliases[2].address.to_string(), "172.16.0.5/12");
    assert_eq!(
        base.hostnames,
        vec!["server.example.org".to_string(), "server".to_string()]
    );
    assert!(issues.is_empty());
}

#[test]
fn test_read_base_promotes_first_alias() {
    let (_tmp, sysroot) = new_sysroot(&[], Vec::new());
    let mut issues = Issues::new();
    let base = read_base(
        &ifcfg("eth0", "IPADDR_1=10.0.0.2/8\n"),
        InterfaceType::Ethernet,
        &HostsTable::default(),
        &sysroot,
        &mut issues,
    );
    assert_eq!(
        base.ip.as_ref().map(|i| i.address.to_string()),
        Some("10.0.0.2/8".to_string())
    );
    assert!(base.ip_aliases.is_empty());
}
