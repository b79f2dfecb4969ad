// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::{
    BaseConnection, InterfaceId, Interfaces, IpAddress, JsonDisplay,
    NicfgError,
};

const DEFAULT_DESTINATION: &str = "default";

/// Route destination
///
/// Serialize and deserialize to/from `default` or `192.0.2.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub enum RouteDestination {
    Default,
    Network(IpAddress),
}

impl RouteDestination {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl std::fmt::Display for RouteDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "{DEFAULT_DESTINATION}"),
            Self::Network(ip) => write!(f, "{ip}"),
        }
    }
}

impl std::str::FromStr for RouteDestination {
    type Err = NicfgError;

    fn from_str(s: &str) -> Result<Self, NicfgError> {
        let s = s.trim();
        if s == DEFAULT_DESTINATION {
            Ok(Self::Default)
        } else {
            Ok(Self::Network(IpAddress::from_string(s)?))
        }
    }
}

impl From<RouteDestination> for String {
    fn from(v: RouteDestination) -> Self {
        v.to_string()
    }
}

impl TryFrom<String> for RouteDestination {
    type Error = NicfgError;

    fn try_from(value: String) -> Result<Self, NicfgError> {
        value.parse()
    }
}

/// Interface a route is bound to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum RouteInterface {
    /// Global route not bound to any interface.
    #[default]
    Unbound,
    /// Bound to whatever interface matches.
    Any,
    /// Bound to the interface holding this ID in [crate::Config::interfaces].
    Bound(InterfaceId),
}

impl RouteInterface {
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    pub fn id(&self) -> Option<InterfaceId> {
        if let Self::Bound(id) = self {
            Some(*id)
        } else {
            None
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct Route {
    pub destination: RouteDestination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<IpAddr>,
    #[serde(default)]
    pub interface: RouteInterface,
    /// Extra options passed as they are to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl Route {
    pub fn new(
        destination: RouteDestination,
        gateway: Option<IpAddr>,
        interface: RouteInterface,
    ) -> Self {
        Self {
            destination,
            gateway,
            interface,
            options: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.destination.is_default()
    }

    pub fn is_ipv6(&self) -> bool {
        match (&self.destination, &self.gateway) {
            (RouteDestination::Network(ip), _) => ip.is_ipv6(),
            (RouteDestination::Default, Some(gw)) => gw.is_ipv6(),
            (RouteDestination::Default, None) => false,
        }
    }

    /// Name of the bound interface looked up through `ifaces`.
    pub fn interface_name<'a>(&self, ifaces: &'a Interfaces) -> Option<&'a str> {
        self.interface
            .id()
            .and_then(|id| ifaces.by_id(id))
            .map(|i| i.name.as_str())
    }
}

/// Ordered routes of one routing table
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct RoutingTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { id: None, routes }
    }
}

/// Routing tables plus the IP forwarding flags.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct Routing {
    #[serde(default)]
    pub tables: Vec<RoutingTable>,
    #[serde(default)]
    pub forward_ipv4: bool,
    #[serde(default)]
    pub forward_ipv6: bool,
}

impl Routing {
    pub fn new(tables: Vec<RoutingTable>) -> Self {
        Self {
            tables,
            ..Default::default()
        }
    }

    /// All routes of all tables in order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.tables.iter().flat_map(|t| t.routes.iter())
    }

    /// Append route to the first table, creating it when missing.
    pub fn add_route(&mut self, route: Route) {
        match self.tables.first_mut() {
            Some(table) => table.routes.push(route),
            None => self.tables.push(RoutingTable::new(vec![route])),
        }
    }

    /// Routes explicitly bound to interface `id`.
    pub fn explicit_routes_for(&self, id: InterfaceId) -> Vec<&Route> {
        self.routes()
            .filter(|r| r.interface == RouteInterface::Bound(id))
            .collect()
    }

    /// Routes not bound to a specific interface, `any` included.
    pub fn global_routes(&self) -> Vec<&Route> {
        self.routes().filter(|r| !r.interface.is_bound()).collect()
    }

    /// Routes a backend should store for the interface `id` configured by
    /// `conn`:
    ///  * Routes bound to that interface.
    ///  * When `conn` is statically addressed with a prefix, unbound default
    ///    routes whose gateway is inside the network of its primary
    ///    address.
    ///
    /// With `id` set to `None`, all routes not bound to an interface.
    pub fn routes_for(
        &self,
        id: Option<InterfaceId>,
        conn: Option<&BaseConnection>,
    ) -> Vec<&Route> {
        let Some(id) = id else {
            return self.global_routes();
        };
        let static_ip = conn
            .filter(|c| c.is_static_addressed())
            .and_then(|c| c.primary_address());
        self.routes()
            .filter(|r| match r.interface {
                RouteInterface::Bound(i) => i == id,
                RouteInterface::Unbound => match (static_ip, r.gateway) {
                    (Some(ip), Some(gw)) => {
                        r.is_default() && ip.contains(&gw)
                    }
                    _ => false,
                },
                RouteInterface::Any => false,
            })
            .collect()
    }

    /// Remove routes bound to interface `id`, returning how many were
    /// removed.
    pub fn remove_routes_for(&mut self, id: InterfaceId) -> usize {
        let mut count = 0;
        for table in self.tables.iter_mut() {
            let before = table.routes.len();
            table
                .routes
                .retain(|r| r.interface != RouteInterface::Bound(id));
            count += before - table.routes.len();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.routes().next().is_none()
    }
}
