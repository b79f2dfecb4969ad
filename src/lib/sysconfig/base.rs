// SPDX-License-Identifier: Apache-2.0

use super::ifcfg::IfcfgFile;
use crate::{
    BaseConnection, BootProtocol, ErrorKind, HostsTable, InterfaceType,
    IpAddress, IpConfig, Issue, IssueLocation, Issues, NicfgError, Startmode,
    Sysroot,
};

const KEY_BOOTPROTO: &str = "BOOTPROTO";
const KEY_STARTMODE: &str = "STARTMODE";
const KEY_IFPLUGD_PRIORITY: &str = "IFPLUGD_PRIORITY";
const KEY_IPADDR: &str = "IPADDR";
const KEY_PREFIXLEN: &str = "PREFIXLEN";
const KEY_NETMASK: &str = "NETMASK";
const KEY_LABEL: &str = "LABEL";
const KEY_REMOTE_IPADDR: &str = "REMOTE_IPADDR";
const KEY_BROADCAST: &str = "BROADCAST";

/// Fields shared by every device type of `ifcfg-<name>`.
pub(crate) fn read_base(
    ifcfg: &IfcfgFile,
    conn_type: InterfaceType,
    hosts: &HostsTable,
    sysroot: &Sysroot,
    issues: &mut Issues,
) -> BaseConnection {
    let vars = &ifcfg.vars;
    let mut base = BaseConnection::new(&ifcfg.name, conn_type);
    let (ip, ip_aliases) = read_ips(ifcfg, sysroot, issues);
    base.ip = ip;
    base.ip_aliases = ip_aliases;
    base.bootproto = read_bootproto(ifcfg, base.ip.is_some(), sysroot, issues);
    base.startmode = read_startmode(ifcfg, sysroot, issues);
    base.mtu = vars.get_u32("MTU");
    base.firewall_zone = vars.get_non_empty("ZONE").map(str::to_string);
    base.description = vars.get_non_empty("NAME").map(str::to_string);
    base.lladdress = vars.get_non_empty("LLADDR").map(str::to_string);
    base.ethtool_options =
        vars.get_non_empty("ETHTOOL_OPTIONS").map(str::to_string);
    if let Some(ip) = base.primary_address() {
        base.hostnames = hosts.names_of(&ip.address.to_string());
    }
    base
}

fn read_bootproto(
    ifcfg: &IfcfgFile,
    has_ip: bool,
    sysroot: &Sysroot,
    issues: &mut Issues,
) -> BootProtocol {
    let Some(value) = ifcfg.vars.get_non_empty(KEY_BOOTPROTO) else {
        return BootProtocol::Static;
    };
    match BootProtocol::from_name(value) {
        Ok(b) => b,
        Err(e) => {
            let fallback = if has_ip {
                BootProtocol::Static
            } else {
                BootProtocol::Dhcp
            };
            issues.push(Issue::new(
                IssueLocation::new(&ifcfg.path(sysroot), KEY_BOOTPROTO),
                value,
                fallback.name(),
                e.msg().to_string(),
            ));
            fallback
        }
    }
}

fn read_startmode(
    ifcfg: &IfcfgFile,
    sysroot: &Sysroot,
    issues: &mut Issues,
) -> Startmode {
    let Some(value) = ifcfg.vars.get_non_empty(KEY_STARTMODE) else {
        return Startmode::Manual;
    };
    match Startmode::from_name(value) {
        Ok(Startmode::Ifplugd { .. }) => Startmode::Ifplugd {
            priority: ifcfg.vars.get_u32(KEY_IFPLUGD_PRIORITY).unwrap_or(0),
        },
        Ok(s) => s,
        Err(e) => {
            issues.push(Issue::new(
                IssueLocation::new(&ifcfg.path(sysroot), KEY_STARTMODE),
                value,
                Startmode::Manual.name(),
                e.msg().to_string(),
            ));
            Startmode::Manual
        }
    }
}

fn read_ip_address(
    ifcfg: &IfcfgFile,
    suffix: &str,
) -> Result<Option<IpAddress>, NicfgError> {
    let vars = &ifcfg.vars;
    let Some(addr) = vars.get_non_empty(&format!("{KEY_IPADDR}{suffix}"))
    else {
        return Ok(None);
    };
    let mut ip = IpAddress::from_string(addr)?;
    if ip.prefix.is_none() {
        if let Some(prefix) =
            vars.get_non_empty(&format!("{KEY_PREFIXLEN}{suffix}"))
        {
            ip = IpAddress::new(
                ip.address,
                Some(prefix.parse::<u8>().map_err(|e| {
                    NicfgError::new(
                        ErrorKind::InvalidArgument,
                        format!("Invalid prefix length {prefix}: {e}"),
                    )
                })?),
            )?;
        } else if let Some(mask) =
            vars.get_non_empty(&format!("{KEY_NETMASK}{suffix}"))
        {
            ip.set_netmask(mask)?;
        }
    }
    Ok(Some(ip))
}

/// Primary address from `IPADDR`, aliases from `IPADDR<suffix>` with any
/// suffix (`IPADDR_1`, `IPADDR1`, `IPADDRfoo`) in file order. Without
/// `IPADDR`, the first alias is promoted to primary.
fn read_ips(
    ifcfg: &IfcfgFile,
    sysroot: &Sysroot,
    issues: &mut Issues,
) -> (Option<IpConfig>, Vec<IpConfig>) {
    let vars = &ifcfg.vars;
    let mut ips: Vec<(bool, IpConfig)> = Vec::new();
    for suffix in vars.suffixes(KEY_IPADDR) {
        let ip = match read_ip_address(ifcfg, suffix) {
            Ok(Some(ip)) => ip,
            Ok(None) => continue,
            Err(e) => {
                let key = format!("{KEY_IPADDR}{suffix}");
                issues.push(Issue::new(
                    IssueLocation::new(&ifcfg.path(sysroot), &key),
                    vars.get(&key).unwrap_or_default(),
                    "",
                    format!("Ignoring invalid address: {}", e.msg()),
                ));
                continue;
            }
        };
        let mut ip_config = IpConfig::new(ip);
        ip_config.label = vars
            .get_non_empty(&format!("{KEY_LABEL}{suffix}"))
            .map(str::to_string);
        ip_config.remote_address = vars
            .get_non_empty(&format!("{KEY_REMOTE_IPADDR}{suffix}"))
            .and_then(|v| IpAddress::from_string(v).ok());
        ip_config.broadcast = vars
            .get_non_empty(&format!("{KEY_BROADCAST}{suffix}"))
            .and_then(|v| IpAddress::from_string(v).ok());
        ips.push((suffix.is_empty(), ip_config));
    }
    let primary_pos = ips
        .iter()
        .position(|(is_primary, _)| *is_primary)
        .or(if ips.is_empty() { None } else { Some(0) });
    let primary = primary_pos.map(|pos| ips.remove(pos).1);
    (primary, ips.into_iter().map(|(_, ip)| ip).collect())
}

fn write_ip(ifcfg: &mut IfcfgFile, suffix: &str, ip: &IpConfig) {
    let vars = &mut ifcfg.vars;
    vars.set(&format!("{KEY_IPADDR}{suffix}"), &ip.address.to_string());
    vars.set_opt(&format!("{KEY_LABEL}{suffix}"), ip.label.as_deref());
    vars.set_opt(
        &format!("{KEY_REMOTE_IPADDR}{suffix}"),
        ip.remote_address.map(|i| i.to_string()).as_deref(),
    );
    vars.set_opt(
        &format!("{KEY_BROADCAST}{suffix}"),
        ip.broadcast.map(|i| i.to_string()).as_deref(),
    );
}

/// Store the shared fields, aliases get suffixes `_0`, `_1` and so on.
pub(crate) fn write_base(base: &BaseConnection, ifcfg: &mut IfcfgFile) {
    let vars = &mut ifcfg.vars;
    vars.set(KEY_BOOTPROTO, base.bootproto.name());
    vars.set(KEY_STARTMODE, base.startmode.name());
    vars.set_opt(
        KEY_IFPLUGD_PRIORITY,
        base.startmode.priority().map(|p| p.to_string()).as_deref(),
    );
    for key in [
        KEY_IPADDR,
        KEY_PREFIXLEN,
        KEY_NETMASK,
        KEY_LABEL,
        KEY_REMOTE_IPADDR,
        KEY_BROADCAST,
    ] {
        vars.remove_prefixed(key);
    }
    vars.set_opt("MTU", base.mtu.map(|m| m.to_string()).as_deref());
    vars.set_opt("ZONE", base.firewall_zone.as_deref());
    vars.set_opt("NAME", base.description.as_deref());
    vars.set_opt("LLADDR", base.lladdress.as_deref());
    vars.set_opt("ETHTOOL_OPTIONS", base.ethtool_options.as_deref());
    if let Some(ip) = base.ip.as_ref() {
        write_ip(ifcfg, "", ip);
    }
    for (index, ip) in base.ip_aliases.iter().enumerate() {
        write_ip(ifcfg, &format!("_{index}"), ip);
    }
}
