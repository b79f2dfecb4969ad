// SPDX-License-Identifier: Apache-2.0

use std::{net::IpAddr, path::PathBuf};

use super::{ifcfg::SYSCONFIG_DIR, shell_file::ShellVarFile};
use crate::{DhcpHostnamePolicy, Dns, Issue, IssueLocation, Issues, NicfgError, Sysroot};

const CONFIG_FILE: &str = "config";
const DHCP_FILE: &str = "dhcp";

const KEY_DNS_SERVERS: &str = "NETCONFIG_DNS_STATIC_SERVERS";
const KEY_DNS_SEARCHLIST: &str = "NETCONFIG_DNS_STATIC_SEARCHLIST";
const KEY_DNS_POLICY: &str = "NETCONFIG_DNS_POLICY";
pub(crate) const KEY_SET_HOSTNAME: &str = "DHCLIENT_SET_HOSTNAME";
const KEY_HOSTNAME_TO_HOSTS: &str = "WRITE_HOSTNAME_TO_HOSTS";

fn config_rel_path() -> PathBuf {
    PathBuf::from(SYSCONFIG_DIR).join(CONFIG_FILE)
}

fn dhcp_rel_path() -> PathBuf {
    PathBuf::from(SYSCONFIG_DIR).join(DHCP_FILE)
}

fn read_vars(
    sysroot: &Sysroot,
    rel: PathBuf,
) -> Result<ShellVarFile, NicfgError> {
    Ok(sysroot
        .read_file(rel)?
        .map(|c| ShellVarFile::parse(&c))
        .unwrap_or_default())
}

pub(crate) fn read_dns(
    sysroot: &Sysroot,
    issues: &mut Issues,
) -> Result<Dns, NicfgError> {
    let config = read_vars(sysroot, config_rel_path())?;
    let dhcp = read_vars(sysroot, dhcp_rel_path())?;
    let mut dns = Dns::default();
    for server in config
        .get(KEY_DNS_SERVERS)
        .unwrap_or_default()
        .split_whitespace()
    {
        match server.parse::<IpAddr>() {
            Ok(ip) => dns.nameservers.push(ip),
            Err(e) => issues.push(Issue::new(
                IssueLocation::new(
                    &sysroot.path(config_rel_path()),
                    KEY_DNS_SERVERS,
                ),
                server,
                "",
                format!("Ignoring invalid name server: {e}"),
            )),
        }
    }
    dns.searchlist = config
        .get(KEY_DNS_SEARCHLIST)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    dns.resolv_conf_policy =
        config.get_non_empty(KEY_DNS_POLICY).map(str::to_string);
    dns.hostname_to_hosts =
        dhcp.get_bool(KEY_HOSTNAME_TO_HOSTS).unwrap_or_default();
    Ok(dns)
}

pub(crate) fn write_dns(sysroot: &Sysroot, dns: &Dns) -> Result<(), NicfgError> {
    let mut config = read_vars(sysroot, config_rel_path())?;
    let orig = config.clone();
    config.set(
        KEY_DNS_SERVERS,
        &dns.nameservers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );
    config.set(KEY_DNS_SEARCHLIST, &dns.searchlist.join(" "));
    if let Some(policy) = dns.resolv_conf_policy.as_deref() {
        config.set(KEY_DNS_POLICY, policy);
    }
    if config != orig {
        sysroot.write_file(config_rel_path(), &config.to_string())?;
    }
    Ok(())
}

/// Global DHCP hostname flag. Per interface `DHCLIENT_SET_HOSTNAME` in
/// `ifcfg-<name>` takes precedence and is handled by the reader.
pub(crate) fn read_dhcp_hostname(
    sysroot: &Sysroot,
) -> Result<DhcpHostnamePolicy, NicfgError> {
    let dhcp = read_vars(sysroot, dhcp_rel_path())?;
    Ok(if dhcp.get_bool(KEY_SET_HOSTNAME).unwrap_or_default() {
        DhcpHostnamePolicy::Any
    } else {
        DhcpHostnamePolicy::None
    })
}

pub(crate) fn write_dhcp(
    sysroot: &Sysroot,
    policy: &DhcpHostnamePolicy,
    hostname_to_hosts: bool,
) -> Result<(), NicfgError> {
    let mut dhcp = read_vars(sysroot, dhcp_rel_path())?;
    let orig = dhcp.clone();
    dhcp.set_bool(KEY_SET_HOSTNAME, *policy == DhcpHostnamePolicy::Any);
    dhcp.set_bool(KEY_HOSTNAME_TO_HOSTS, hostname_to_hosts);
    if dhcp != orig {
        sysroot.write_file(dhcp_rel_path(), &dhcp.to_string())?;
    }
    Ok(())
}
