// SPDX-License-Identifier: Apache-2.0

use std::{net::IpAddr, path::Path};

use crate::{
    BaseConnection, BootProtocol, Dns, InterfaceType, IpAddress, IpConfig,
    Issues, Route, RouteDestination, RouteInterface,
    keyfile::{
        ip::{KeyfileIp, bootproto_from_methods, write_ip},
        key_file::KeyFile,
    },
};

#[test]
fn test_bootproto_from_methods() {
    for (ipv4, ipv6, expected) in [
        (Some("auto"), Some("auto"), BootProtocol::Dhcp),
        (Some("auto"), Some("ignore"), BootProtocol::Dhcp4),
        (Some("disabled"), Some("auto"), BootProtocol::Dhcp6),
        (Some("manual"), None, BootProtocol::Static),
        (Some("disabled"), None, BootProtocol::Static),
        (Some("link-local"), Some("ignore"), BootProtocol::Static),
        (None, Some("manual"), BootProtocol::Static),
        (None, None, BootProtocol::None),
    ] {
        assert_eq!(bootproto_from_methods(ipv4, ipv6), expected);
    }
}

#[test]
fn test_keyfile_ip_read() {
    let kf = KeyFile::parse(
        "[ipv4]\n\
         method=manual\n\
         address2=10.0.0.5/8\n\
         address1=192.168.1.5/24,192.168.1.1\n\
         route1=0.0.0.0/0,192.168.1.254\n\
         route2=172.16.0.0/12,10.0.0.1,50\n\
         route3=bogus\n\
         dns=192.0.2.53;\n\
         \n\
         [ipv6]\n\
         method=manual\n\
         address1=2001:db8::5/64\n\
         dns=2001:db8::53;192.0.2.53;\n\
         dns-search=example.org;\n",
    );
    let mut issues = Issues::new();
    let ip = KeyfileIp::read(&kf, Path::new("/eth0.nmconnection"), &mut issues);

    assert_eq!(ip.bootproto, BootProtocol::Static);
    let addresses: Vec<String> =
        ip.addresses.iter().map(|i| i.address.to_string()).collect();
    assert_eq!(
        addresses,
        vec!["192.168.1.5/24", "10.0.0.5/8", "2001:db8::5/64"]
    );
    assert_eq!(ip.gateways, vec!["192.168.1.1".parse::<IpAddr>().unwrap()]);
    assert_eq!(ip.routes.len(), 2);
    assert!(ip.routes[0].is_default());
    assert_eq!(ip.routes[0].gateway, Some("192.168.1.254".parse().unwrap()));
    assert_eq!(
        ip.routes[1].destination,
        RouteDestination::Network(
            IpAddress::from_string("172.16.0.0/12").unwrap()
        )
    );
    assert_eq!(ip.routes[1].options.as_deref(), Some("metric 50"));
    assert!(ip.routes.iter().all(|r| r.interface == RouteInterface::Unbound));
    assert_eq!(
        ip.nameservers,
        vec![
            "192.0.2.53".parse::<IpAddr>().unwrap(),
            "2001:db8::53".parse().unwrap()
        ]
    );
    assert_eq!(ip.searchlist, vec!["example.org"]);

    assert_eq!(issues.len(), 1);
    let issue = issues.iter().next().unwrap();
    assert_eq!(issue.location.key, "ipv4.route3");
    assert_eq!(issue.value, "bogus");

    let mut base = BaseConnection::new("eth0", InterfaceType::Ethernet);
    ip.apply_to(&mut base);
    assert_eq!(
        base.primary_address().map(|i| i.to_string()).as_deref(),
        Some("192.168.1.5/24")
    );
    assert_eq!(base.ip_aliases.len(), 2);
}

fn static_base() -> BaseConnection {
    let mut base = BaseConnection::new("eth0", InterfaceType::Ethernet);
    base.bootproto = BootProtocol::Static;
    base.ip = Some(IpConfig::new(
        IpAddress::from_string("192.168.1.5/24").unwrap(),
    ));
    base
}

#[test]
fn test_write_ip_static() {
    let mut kf = KeyFile::parse("[ipv4]\nmethod=auto\nmay-fail=false\n");
    let default = Route::new(
        RouteDestination::Default,
        Some("192.168.1.1".parse().unwrap()),
        RouteInterface::Unbound,
    );
    let mut net = Route::new(
        RouteDestination::Network(
            IpAddress::from_string("10.0.0.0/8").unwrap(),
        ),
        Some("192.168.1.254".parse().unwrap()),
        RouteInterface::Unbound,
    );
    net.options = Some("metric 100".into());
    let dns = Dns {
        nameservers: vec![
            "192.0.2.53".parse().unwrap(),
            "2001:db8::53".parse().unwrap(),
        ],
        searchlist: vec!["example.org".into()],
        ..Default::default()
    };
    write_ip(&mut kf, &static_base(), &[&default, &net], &dns);

    assert_eq!(
        kf.to_string(),
        "[ipv4]\n\
         may-fail=false\n\
         method=manual\n\
         address1=192.168.1.5/24\n\
         gateway=192.168.1.1\n\
         route1=10.0.0.0/8,192.168.1.254,100\n\
         dns=192.0.2.53;\n\
         dns-search=example.org;\n\
         \n\
         [ipv6]\n\
         method=ignore\n"
    );
}

#[test]
fn test_write_ip_dhcp_skips_dns() {
    let mut kf = KeyFile::default();
    let mut base = BaseConnection::new("eth0", InterfaceType::Ethernet);
    base.bootproto = BootProtocol::Dhcp;
    let dns = Dns {
        nameservers: vec!["192.0.2.53".parse().unwrap()],
        ..Default::default()
    };
    write_ip(&mut kf, &base, &[], &dns);

    assert_eq!(kf.get("ipv4", "method"), Some("auto"));
    assert_eq!(kf.get("ipv6", "method"), Some("auto"));
    assert_eq!(kf.get("ipv4", "dns"), None);
}

#[test]
fn test_write_ip_none_removes_method() {
    let mut kf = KeyFile::parse(
        "[ipv4]\nmethod=manual\naddress1=192.0.2.1/24\n\
         [ipv6]\nmethod=auto\n",
    );
    let base = BaseConnection::new("eth0", InterfaceType::Ethernet);
    write_ip(&mut kf, &base, &[], &Dns::default());

    assert_eq!(kf.get("ipv4", "method"), None);
    assert_eq!(kf.get("ipv4", "address1"), None);
    assert_eq!(kf.get("ipv6", "method"), None);
}
