// SPDX-License-Identifier: Apache-2.0

use crate::{
    BaseConnection, BootProtocol, Interface, InterfaceType, Interfaces,
    IpAddress, IpConfig, Route, RouteDestination, RouteInterface, Routing,
};

fn static_conn(name: &str, ip: &str) -> BaseConnection {
    let mut conn = BaseConnection::new(name, InterfaceType::Ethernet);
    conn.bootproto = BootProtocol::Static;
    conn.ip = Some(IpConfig::new(IpAddress::from_string(ip).unwrap()));
    conn
}

fn default_route(gw: &str, interface: RouteInterface) -> Route {
    Route::new(RouteDestination::Default, Some(gw.parse().unwrap()), interface)
}

#[test]
fn test_routes_for_unbound_default_in_subnet() {
    let mut ifaces = Interfaces::new();
    let eth0 = ifaces.push(Interface::new("eth0", InterfaceType::Ethernet));
    let mut routing = Routing::default();
    routing.add_route(default_route("192.168.1.1", RouteInterface::Unbound));
    routing.add_route(default_route("10.0.0.1", RouteInterface::Unbound));

    let conn = static_conn("eth0", "192.168.1.5/24");
    let routes = routing.routes_for(Some(eth0), Some(&conn));
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].gateway, Some("192.168.1.1".parse().unwrap()));
}

#[test]
fn test_routes_for_dhcp_conn_skips_unbound() {
    let mut ifaces = Interfaces::new();
    let eth0 = ifaces.push(Interface::new("eth0", InterfaceType::Ethernet));
    let mut routing = Routing::default();
    routing.add_route(default_route("192.168.1.1", RouteInterface::Unbound));

    let mut conn = static_conn("eth0", "192.168.1.5/24");
    conn.bootproto = BootProtocol::Dhcp;
    assert!(routing.routes_for(Some(eth0), Some(&conn)).is_empty());

    let mut conn = static_conn("eth0", "192.168.1.5/24");
    conn.ip.as_mut().unwrap().address.prefix = None;
    assert!(routing.routes_for(Some(eth0), Some(&conn)).is_empty());
}

#[test]
fn test_routes_for_explicit_and_global() {
    let mut ifaces = Interfaces::new();
    let eth0 = ifaces.push(Interface::new("eth0", InterfaceType::Ethernet));
    let eth1 = ifaces.push(Interface::new("eth1", InterfaceType::Ethernet));
    let mut routing = Routing::default();
    let net_route = Route::new(
        RouteDestination::Network(
            IpAddress::from_string("10.10.0.0/16").unwrap(),
        ),
        Some("10.0.0.254".parse().unwrap()),
        RouteInterface::Bound(eth1),
    );
    routing.add_route(net_route.clone());
    routing.add_route(default_route("192.168.1.1", RouteInterface::Unbound));
    routing.add_route(default_route("192.168.1.2", RouteInterface::Any));

    assert!(routing.routes_for(Some(eth0), None).is_empty());
    assert_eq!(routing.routes_for(Some(eth1), None), vec![&net_route]);
    assert_eq!(routing.explicit_routes_for(eth1), vec![&net_route]);
    assert_eq!(routing.routes_for(None, None).len(), 2);

    assert_eq!(routing.remove_routes_for(eth1), 1);
    assert!(routing.explicit_routes_for(eth1).is_empty());
    assert_eq!(routing.routes().count(), 2);
}

#[test]
fn test_route_destination_string() {
    let dst: RouteDestination = "default".parse().unwrap();
    assert!(dst.is_default());
    let dst: RouteDestination = "192.0.2.0/24".parse().unwrap();
    assert_eq!(dst.to_string(), "192.0.2.0/24");
    assert!("default6".parse::<RouteDestination>().is_err());
}
