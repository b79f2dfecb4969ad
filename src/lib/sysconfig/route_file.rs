// SPDX-License-Identifier: Apache-2.0

use std::{net::IpAddr, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::ifcfg::{SYSCONFIG_DIR, is_backup_name};
use crate::{
    Config, ErrorKind, InterfaceType, Interfaces, IpAddress, Issue,
    IssueLocation, Issues, JsonDisplay, NicfgError, Route, RouteDestination,
    RouteInterface, Routing, RoutingTable, Sysroot,
};

const ROUTES_FILE: &str = "routes";
const IFROUTE_PREFIX: &str = "ifroute-";
const NO_VALUE: &str = "-";
const DEFAULT_DST: &str = "default";
const ANY_DEVICE: &str = "any";

fn routes_rel_path() -> PathBuf {
    PathBuf::from(SYSCONFIG_DIR).join(ROUTES_FILE)
}

fn ifroute_rel_path(name: &str) -> PathBuf {
    PathBuf::from(SYSCONFIG_DIR).join(format!("{IFROUTE_PREFIX}{name}"))
}

/// One line of the `routes` or `ifroute-<device>` files:
/// `destination gateway netmask device [options]`, `-` for absent values.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct RouteRecord {
    pub destination: String,
    pub gateway: String,
    pub netmask: String,
    pub device: String,
    /// Remaining columns, empty when none.
    pub options: String,
}

fn value_or_none(v: Option<String>) -> String {
    v.unwrap_or_else(|| NO_VALUE.to_string())
}

fn invalid_route(msg: String) -> NicfgError {
    NicfgError::new(ErrorKind::InvalidArgument, msg)
}

impl RouteRecord {
    /// Parse one line, `None` for blank and comment lines.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let mut columns = line.split_whitespace();
        let mut next = || columns.next().unwrap_or(NO_VALUE).to_string();
        let destination = next();
        let gateway = next();
        let netmask = next();
        let device = next();
        let options = columns.collect::<Vec<&str>>().join(" ");
        Some(Self {
            destination,
            gateway,
            netmask,
            device,
            options,
        })
    }

    pub fn to_line(&self) -> String {
        let mut ret = format!(
            "{} {} {} {}",
            self.destination, self.gateway, self.netmask, self.device
        );
        if !self.options.is_empty() {
            ret.push(' ');
            ret.push_str(&self.options);
        }
        ret
    }

    /// Flatten `route`, looking up the bound interface name in `ifaces`.
    pub fn from_route(route: &Route, ifaces: &Interfaces) -> Self {
        let device = match route.interface {
            RouteInterface::Unbound => None,
            RouteInterface::Any => Some(ANY_DEVICE.to_string()),
            RouteInterface::Bound(_) => {
                let name = route.interface_name(ifaces).map(str::to_string);
                if name.is_none() {
                    log::warn!(
                        "Route {} bound to unknown interface {}",
                        route.destination,
                        route.interface
                    );
                }
                name
            }
        };
        Self {
            destination: route.destination.to_string(),
            gateway: value_or_none(route.gateway.map(|g| g.to_string())),
            netmask: NO_VALUE.to_string(),
            device: value_or_none(device),
            options: route.options.clone().unwrap_or_default(),
        }
    }

    /// Build [Route], binding to interfaces of `ifaces` (created as not
    /// present when missing). Device `-` means `file_device` when reading
    /// an `ifroute-<device>` file.
    pub fn to_route(
        &self,
        ifaces: &mut Interfaces,
        file_device: Option<&str>,
    ) -> Result<Route, NicfgError> {
        let destination = if self.destination == DEFAULT_DST {
            RouteDestination::Default
        } else {
            let mut ip = IpAddress::from_string(&self.destination)?;
            if ip.prefix.is_none() && self.netmask != NO_VALUE {
                let mask = self.netmask.trim_start_matches('/');
                if mask.contains('.') {
                    ip.set_netmask(mask)?;
                } else {
                    ip = IpAddress::new(
                        ip.address,
                        Some(mask.parse::<u8>().map_err(|e| {
                            invalid_route(format!(
                                "Invalid netmask '{}': {e}",
                                self.netmask
                            ))
                        })?),
                    )?;
                }
            }
            RouteDestination::Network(ip)
        };
        let gateway = if self.gateway == NO_VALUE {
            None
        } else {
            Some(self.gateway.parse::<IpAddr>().map_err(|e| {
                invalid_route(format!(
                    "Invalid gateway '{}': {e}",
                    self.gateway
                ))
            })?)
        };
        let device = match self.device.as_str() {
            NO_VALUE => file_device,
            d => Some(d),
        };
        let interface = match device {
            None => RouteInterface::Unbound,
            Some(ANY_DEVICE) => RouteInterface::Any,
            Some(name) => RouteInterface::Bound(
                ifaces.find_or_create(name, InterfaceType::default()),
            ),
        };
        Ok(Route {
            destination,
            gateway,
            interface,
            options: if self.options.is_empty() {
                None
            } else {
                Some(self.options.clone())
            },
        })
    }
}

fn read_route_file(
    sysroot: &Sysroot,
    rel_path: PathBuf,
    file_device: Option<&str>,
    ifaces: &mut Interfaces,
    issues: &mut Issues,
) -> Result<Vec<Route>, NicfgError> {
    let Some(content) = sysroot.read_file(&rel_path)? else {
        return Ok(Vec::new());
    };
    let mut ret = Vec::new();
    for line in content.lines() {
        let Some(record) = RouteRecord::from_line(line) else {
            continue;
        };
        match record.to_route(ifaces, file_device) {
            Ok(route) => ret.push(route),
            Err(e) => issues.push(Issue::new(
                IssueLocation::new(
                    &sysroot.path(&rel_path),
                    &record.destination,
                ),
                line.trim(),
                "",
                format!("Ignoring invalid route: {}", e.msg()),
            )),
        }
    }
    Ok(ret)
}

/// Global `routes` file first, then `ifroute-*` files sorted by name.
pub(crate) fn read_routes(
    sysroot: &Sysroot,
    ifaces: &mut Interfaces,
    issues: &mut Issues,
) -> Result<Routing, NicfgError> {
    let mut routes =
        read_route_file(sysroot, routes_rel_path(), None, ifaces, issues)?;
    for file_name in sysroot.list_dir(SYSCONFIG_DIR)? {
        if let Some(dev) = file_name.strip_prefix(IFROUTE_PREFIX)
            && !dev.is_empty()
            && !is_backup_name(dev)
        {
            routes.extend(read_route_file(
                sysroot,
                ifroute_rel_path(dev),
                Some(dev),
                ifaces,
                issues,
            )?);
        }
    }
    Ok(Routing::new(vec![RoutingTable::new(routes)]))
}

fn records_to_string(records: &[RouteRecord]) -> String {
    let mut ret = String::new();
    for record in records {
        ret.push_str(&record.to_line());
        ret.push('\n');
    }
    ret
}

/// Write routes not bound to a specific interface into the global
/// `routes` file and bound ones into `ifroute-<name>`. `ifroute-*` files of
/// interfaces without routes are removed, the global file is only emptied.
pub(crate) fn write_routes(
    sysroot: &Sysroot,
    config: &Config,
) -> Result<(), NicfgError> {
    let mut global = Vec::new();
    let mut per_device: Vec<(String, Vec<RouteRecord>)> = Vec::new();
    for route in config.routing.routes() {
        let record = RouteRecord::from_route(route, &config.interfaces);
        match route.interface_name(&config.interfaces) {
            Some(name) => {
                match per_device.iter_mut().find(|(n, _)| n == name) {
                    Some((_, records)) => records.push(record),
                    None => per_device.push((name.to_string(), vec![record])),
                }
            }
            None => global.push(record),
        }
    }
    sysroot.write_file(routes_rel_path(), &records_to_string(&global))?;
    for (name, records) in per_device.iter() {
        sysroot
            .write_file(ifroute_rel_path(name), &records_to_string(records))?;
    }
    for file_name in sysroot.list_dir(SYSCONFIG_DIR)? {
        if let Some(dev) = file_name.strip_prefix(IFROUTE_PREFIX)
            && !is_backup_name(dev)
            && !per_device.iter().any(|(n, _)| n == dev)
        {
            log::debug!("No route left for {dev}");
            sysroot.remove_file(ifroute_rel_path(dev))?;
        }
    }
    Ok(())
}
