// SPDX-License-Identifier: Apache-2.0

use crate::{
    Interface, InterfaceType, Interfaces, RouteDestination, RouteInterface,
    RouteRecord,
};

#[test]
fn test_route_record_from_line() {
    assert_eq!(RouteRecord::from_line("# comment"), None);
    assert_eq!(RouteRecord::from_line("   "), None);
    let record = RouteRecord::from_line("default 192.168.1.1").unwrap();
    assert_eq!(record.destination, "default");
    assert_eq!(record.gateway, "192.168.1.1");
    assert_eq!(record.netmask, "-");
    assert_eq!(record.device, "-");
    assert_eq!(record.options, "");

    let record =
        RouteRecord::from_line("10.0.0.0 - 255.0.0.0 eth0 metric 100")
            .unwrap();
    assert_eq!(record.options, "metric 100");
}

#[test]
fn test_route_record_default_unbound() {
    let mut ifaces = Interfaces::new();
    let record = RouteRecord::from_line("default 192.168.1.1 - -").unwrap();
    let route = record.to_route(&mut ifaces, None).unwrap();
    assert!(route.is_default());
    assert_eq!(route.destination, RouteDestination::Default);
    assert_eq!(route.interface, RouteInterface::Unbound);
    assert!(ifaces.is_empty());
    assert_eq!(RouteRecord::from_route(&route, &ifaces), record);
}

#[test]
fn test_route_record_round_trip() {
    let mut ifaces = Interfaces::new();
    ifaces.push(Interface::new("eth1", InterfaceType::Ethernet));
    for line in [
        "10.1.0.0/16 10.0.0.254 - eth1",
        "192.168.7.0/24 - - any",
        "2001:db8:1::/48 2001:db8::1 - eth1 metric 1024",
        "default 10.0.0.1 - -",
    ] {
        let record = RouteRecord::from_line(line).unwrap();
        let route = record.to_route(&mut ifaces, None).unwrap();
        assert_eq!(RouteRecord::from_route(&route, &ifaces), record);
        assert_eq!(record.to_line(), line);
    }
}

#[test]
fn test_route_record_netmask_forms() {
    let mut ifaces = Interfaces::new();
    for line in [
        "10.1.0.0 - 255.255.0.0 -",
        "10.1.0.0 - /16 -",
        "10.1.0.0 - 16 -",
    ] {
        let route = RouteRecord::from_line(line)
            .unwrap()
            .to_route(&mut ifaces, None)
            .unwrap();
        assert_eq!(route.destination.to_string(), "10.1.0.0/16");
    }
}

#[test]
fn test_route_record_binds_file_device() {
    let mut ifaces = Interfaces::new();
    let route = RouteRecord::from_line("10.1.0.0/16 10.0.0.254 - -")
        .unwrap()
        .to_route(&mut ifaces, Some("bond0"))
        .unwrap();
    let bond0 = ifaces.by_name("bond0").unwrap();
    assert!(!bond0.present);
    assert_eq!(route.interface, RouteInterface::Bound(bond0.id()));
}

#[test]
fn test_route_record_invalid() {
    let mut ifaces = Interfaces::new();
    for line in ["10.1.0.0 - 255.0.255.0 -", "nowhere 10.0.0.1 - -"] {
        assert!(
            RouteRecord::from_line(line)
                .unwrap()
                .to_route(&mut ifaces, None)
                .is_err()
        );
    }
}
