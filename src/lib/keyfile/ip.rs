// SPDX-License-Identifier: Apache-2.0

use std::{net::IpAddr, path::Path};

use super::key_file::KeyFile;
use crate::{
    AddressFamily, BaseConnection, BootProtocol, Dns, IpAddress, IpConfig,
    Issue, IssueLocation, Issues, Route, RouteDestination, RouteInterface,
};

pub(crate) const SECTION_IPV4: &str = "ipv4";
pub(crate) const SECTION_IPV6: &str = "ipv6";

const METHOD_AUTO: &str = "auto";
const METHOD_MANUAL: &str = "manual";
const METHOD_V4_OFF: &str = "disabled";
const METHOD_V6_OFF: &str = "ignore";

const KEY_METHOD: &str = "method";
const KEY_GATEWAY: &str = "gateway";
const KEY_DNS: &str = "dns";
const KEY_DNS_SEARCH: &str = "dns-search";
const METRIC_PREFIX: &str = "metric ";

/// Boot protocol of the `method` keys of both IP sections.
///
/// | ipv4   | ipv6   | result |
/// |--------|--------|--------|
/// | auto   | auto   | dhcp   |
/// | auto   | other  | dhcp4  |
/// | other  | auto   | dhcp6  |
/// | other  | other  | static |
/// | absent | absent | none   |
///
/// A single present non-auto method is enough for static.
pub(crate) fn bootproto_from_methods(
    ipv4: Option<&str>,
    ipv6: Option<&str>,
) -> BootProtocol {
    match (ipv4 == Some(METHOD_AUTO), ipv6 == Some(METHOD_AUTO)) {
        (true, true) => BootProtocol::Dhcp,
        (true, false) => BootProtocol::Dhcp4,
        (false, true) => BootProtocol::Dhcp6,
        (false, false) => {
            if ipv4.is_some() || ipv6.is_some() {
                BootProtocol::Static
            } else {
                BootProtocol::None
            }
        }
    }
}

/// `method` of one family, `None` means the key is removed.
fn method_of(
    bootproto: BootProtocol,
    dhcp: bool,
    has_address: bool,
    off: &'static str,
) -> Option<&'static str> {
    if dhcp {
        Some(METHOD_AUTO)
    } else if has_address {
        Some(METHOD_MANUAL)
    } else if bootproto == BootProtocol::None {
        None
    } else {
        Some(off)
    }
}

/// Numbered keys like `address1` or `route12` sorted by number.
fn numbered_keys<'a>(
    kf: &'a KeyFile,
    section: &str,
    prefix: &str,
) -> Vec<&'a str> {
    let mut keys: Vec<(u32, &str)> = kf
        .keys(section)
        .into_iter()
        .filter_map(|k| {
            let num = k.strip_prefix(prefix)?;
            if num.is_empty() {
                Some((0, k))
            } else {
                num.parse::<u32>().ok().map(|n| (n, k))
            }
        })
        .collect();
    keys.sort_by_key(|(n, _)| *n);
    keys.into_iter().map(|(_, k)| k).collect()
}

/// IP settings of one connection keyfile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct KeyfileIp {
    pub(crate) bootproto: BootProtocol,
    /// IPv4 addresses followed by IPv6 ones.
    pub(crate) addresses: Vec<IpConfig>,
    pub(crate) gateways: Vec<IpAddr>,
    pub(crate) routes: Vec<Route>,
    pub(crate) nameservers: Vec<IpAddr>,
    pub(crate) searchlist: Vec<String>,
}

impl KeyfileIp {
    /// Routes and gateways are returned unbound, the caller binds them to
    /// the interface of the connection.
    pub(crate) fn read(kf: &KeyFile, path: &Path, issues: &mut Issues) -> Self {
        let mut ret = Self {
            bootproto: bootproto_from_methods(
                kf.get_non_empty(SECTION_IPV4, KEY_METHOD),
                kf.get_non_empty(SECTION_IPV6, KEY_METHOD),
            ),
            ..Default::default()
        };
        for section in [SECTION_IPV4, SECTION_IPV6] {
            ret.read_section(kf, section, path, issues);
        }
        ret
    }

    fn read_section(
        &mut self,
        kf: &KeyFile,
        section: &str,
        path: &Path,
        issues: &mut Issues,
    ) {
        let mut invalid = |key: &str, value: &str, msg: String| {
            issues.push(Issue::new(
                IssueLocation::new(path, &format!("{section}.{key}")),
                value,
                "",
                msg,
            ))
        };
        let mut keys = numbered_keys(kf, section, "address");
        keys.extend(numbered_keys(kf, section, "addresses"));
        for key in keys {
            let value = kf.get(section, key).unwrap_or_default();
            let mut items = value.split(',').map(str::trim);
            match IpAddress::from_string(items.next().unwrap_or_default()) {
                Ok(ip) => self.addresses.push(IpConfig::new(ip)),
                Err(e) => {
                    invalid(
                        key,
                        value,
                        format!("Ignoring address: {}", e.msg()),
                    );
                    continue;
                }
            }
            if let Some(gw) = items.next().filter(|g| !g.is_empty()) {
                match gw.parse::<IpAddr>() {
                    Ok(gw) => self.add_gateway(gw),
                    Err(e) => {
                        invalid(key, value, format!("Ignoring gateway: {e}"))
                    }
                }
            }
        }
        if let Some(gw) = kf.get_non_empty(section, KEY_GATEWAY) {
            match gw.parse::<IpAddr>() {
                Ok(gw) => self.add_gateway(gw),
                Err(e) => {
                    invalid(KEY_GATEWAY, gw, format!("Ignoring gateway: {e}"))
                }
            }
        }
        for key in numbered_keys(kf, section, "route") {
            let value = kf.get(section, key).unwrap_or_default();
            match route_from_value(value) {
                Ok(route) => self.routes.push(route),
                Err(msg) => invalid(key, value, msg),
            }
        }
        for ns in kf.get_list(section, KEY_DNS) {
            match ns.parse::<IpAddr>() {
                Ok(ns) => {
                    if !self.nameservers.contains(&ns) {
                        self.nameservers.push(ns);
                    }
                }
                Err(e) => {
                    invalid(KEY_DNS, ns, format!("Ignoring name server: {e}"))
                }
            }
        }
        for domain in kf.get_list(section, KEY_DNS_SEARCH) {
            if !self.searchlist.iter().any(|d| d == domain) {
                self.searchlist.push(domain.to_string());
            }
        }
    }

    fn add_gateway(&mut self, gw: IpAddr) {
        if !self.gateways.contains(&gw) {
            self.gateways.push(gw);
        }
    }

    /// Primary address and aliases: the first IPv4 address is primary,
    /// the first IPv6 address when no IPv4 one exists.
    pub(crate) fn apply_to(&self, base: &mut BaseConnection) {
        base.bootproto = self.bootproto;
        let mut addresses = self.addresses.clone().into_iter();
        base.ip = addresses.next();
        base.ip_aliases = addresses.collect();
    }
}

/// `dst/prefix[,gateway[,metric]]`
fn route_from_value(value: &str) -> Result<Route, String> {
    let mut items = value.split(',').map(str::trim);
    let dst = IpAddress::from_string(items.next().unwrap_or_default())
        .map_err(|e| format!("Ignoring route: {}", e.msg()))?;
    let gateway = match items.next().filter(|g| !g.is_empty()) {
        Some(gw) => {
            let gw = gw
                .parse::<IpAddr>()
                .map_err(|e| format!("Ignoring route gateway: {e}"))?;
            if gw.is_unspecified() { None } else { Some(gw) }
        }
        None => None,
    };
    let destination = if dst.prefix == Some(0) && dst.address.is_unspecified()
    {
        RouteDestination::Default
    } else {
        RouteDestination::Network(dst)
    };
    let mut route = Route::new(destination, gateway, RouteInterface::Unbound);
    if let Some(metric) = items.next().filter(|m| !m.is_empty()) {
        let metric = metric
            .parse::<u32>()
            .map_err(|e| format!("Ignoring route metric: {e}"))?;
        route.options = Some(format!("{METRIC_PREFIX}{metric}"));
    }
    Ok(route)
}

fn route_to_value(route: &Route) -> String {
    let dst = match &route.destination {
        RouteDestination::Network(ip) => ip.to_string(),
        RouteDestination::Default if route.is_ipv6() => "::/0".to_string(),
        RouteDestination::Default => "0.0.0.0/0".to_string(),
    };
    let metric = route
        .options
        .as_deref()
        .and_then(|o| o.trim().strip_prefix(METRIC_PREFIX))
        .and_then(|m| m.trim().parse::<u32>().ok());
    match (route.gateway, metric) {
        (Some(gw), Some(m)) => format!("{dst},{gw},{m}"),
        (Some(gw), None) => format!("{dst},{gw}"),
        (None, Some(m)) => {
            let any = if route.is_ipv6() { "::" } else { "0.0.0.0" };
            format!("{dst},{any},{m}")
        }
        (None, None) => dst,
    }
}

/// Store addresses, routes and name servers of `base` into both IP
/// sections. `routes` are those placed on this connection.
pub(crate) fn write_ip(
    kf: &mut KeyFile,
    base: &BaseConnection,
    routes: &[&Route],
    dns: &Dns,
) {
    let mut search_written = false;
    for (section, family) in [
        (SECTION_IPV4, AddressFamily::Ipv4),
        (SECTION_IPV6, AddressFamily::Ipv6),
    ] {
        let is_ipv6 = family == AddressFamily::Ipv6;
        let method = if is_ipv6 {
            method_of(
                base.bootproto,
                base.bootproto.has_dhcp6(),
                base.has_ipv6_address(),
                METHOD_V6_OFF,
            )
        } else {
            method_of(
                base.bootproto,
                base.bootproto.has_dhcp4(),
                base.has_ipv4_address(),
                METHOD_V4_OFF,
            )
        };
        kf.remove_matching(section, |k| {
            k.starts_with("address")
                || k.starts_with("route")
                || [KEY_METHOD, KEY_GATEWAY, KEY_DNS, KEY_DNS_SEARCH]
                    .contains(&k)
        });
        let Some(method) = method else {
            continue;
        };
        kf.set(section, KEY_METHOD, method);

        for (index, ip) in base
            .all_ips()
            .filter(|i| i.address.family() == family)
            .enumerate()
        {
            kf.set(
                section,
                &format!("address{}", index + 1),
                &ip.address.to_string(),
            );
        }

        let mut route_index = 0;
        let mut gateway_written = false;
        for route in routes.iter().filter(|r| r.is_ipv6() == is_ipv6) {
            if route.is_default()
                && !gateway_written
                && route.options.is_none()
                && let Some(gw) = route.gateway
            {
                kf.set(section, KEY_GATEWAY, &gw.to_string());
                gateway_written = true;
                continue;
            }
            route_index += 1;
            kf.set(
                section,
                &format!("route{route_index}"),
                &route_to_value(route),
            );
        }

        if method == METHOD_MANUAL {
            let nameservers: Vec<String> = dns
                .nameservers
                .iter()
                .filter(|n| n.is_ipv6() == is_ipv6)
                .map(|n| n.to_string())
                .collect();
            kf.set_list(section, KEY_DNS, &nameservers);
            if !search_written {
                kf.set_list(section, KEY_DNS_SEARCH, &dns.searchlist);
                search_written = !dns.searchlist.is_empty();
            }
        }
    }
}
