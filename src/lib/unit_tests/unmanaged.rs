// SPDX-License-Identifier: Apache-2.0

use crate::{
    Backend, Config, ConnectionConfig, DummyConnection, Hwinfo, InterfaceType,
    Issues, unit_tests::new_sysroot,
};

const RESOLV_CONF: &str = "# managed by hand\n\
    options rotate\n\
    search example.org\n\
    nameserver 192.0.2.53\n\
    nameserver 2001:db8::53\n";

#[test]
fn test_unmanaged_read() {
    let (_tmp, sysroot) = new_sysroot(
        &[
            ("etc/resolv.conf", RESOLV_CONF),
            ("etc/hostname", "host.example.org\n"),
            (
                "etc/sysctl.d/70-nicfg-forwarding.conf",
                "net.ipv4.ip_forward = 1\n",
            ),
            ("etc/sysconfig/network/ifcfg-eth1", "BOOTPROTO='dhcp'\n"),
        ],
        vec![Hwinfo::new("eth0", InterfaceType::Ethernet)],
    );
    let mut issues = Issues::new();
    let config =
        Config::read(Backend::Unmanaged, &sysroot, &mut issues).unwrap();

    assert!(issues.is_empty());
    assert_eq!(config.source, Some(Backend::Unmanaged));
    assert_eq!(config.interfaces.len(), 1);
    assert!(config.interfaces.by_name("eth0").unwrap().present);
    assert!(config.connections.is_empty());
    assert!(config.routing.is_empty());
    assert!(config.routing.forward_ipv4);
    assert!(!config.routing.forward_ipv6);
    assert_eq!(config.dns.searchlist, vec!["example.org"]);
    assert_eq!(config.dns.nameservers.len(), 2);
    assert_eq!(config.hostname.static_name, "host.example.org");
}

#[test]
fn test_unmanaged_write_keeps_resolv_options() {
    let (_tmp, sysroot) =
        new_sysroot(&[("etc/resolv.conf", RESOLV_CONF)], Vec::new());
    let mut issues = Issues::new();
    let old =
        Config::read(Backend::Unmanaged, &sysroot, &mut issues).unwrap();
    let mut config = old.copy();
    config.dns.nameservers = vec!["198.51.100.1".parse().unwrap()];
    config.dns.searchlist.clear();
    config.hostname.static_name = "box".into();
    config.routing.forward_ipv6 = true;
    config.add_or_update_connection_config(ConnectionConfig::Dummy(Box::new(
        DummyConnection::new("dummy0"),
    )));
    config.write(&sysroot, Some(&old)).unwrap();

    assert_eq!(
        sysroot.read_file("etc/resolv.conf").unwrap().unwrap(),
        "# managed by hand\noptions rotate\nnameserver 198.51.100.1\n"
    );
    assert_eq!(sysroot.read_file("etc/hostname").unwrap().unwrap(), "box\n");
    let forwarding = sysroot
        .read_file("etc/sysctl.d/70-nicfg-forwarding.conf")
        .unwrap()
        .unwrap();
    assert!(forwarding.contains("net.ipv4.ip_forward = 0\n"));
    assert!(forwarding.contains("net.ipv6.conf.all.forwarding = 1\n"));
    assert!(sysroot.list_dir("etc/sysconfig/network").unwrap().is_empty());
}
