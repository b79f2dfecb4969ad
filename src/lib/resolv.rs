// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;

use crate::{Dns, NicfgError, Sysroot};

pub(crate) const RESOLV_CONF_FILE: &str = "etc/resolv.conf";

/// Name servers and search domains of `/etc/resolv.conf`.
pub(crate) fn read_resolv_conf(sysroot: &Sysroot) -> Result<Dns, NicfgError> {
    let mut dns = Dns::default();
    let Some(content) = sysroot.read_file(RESOLV_CONF_FILE)? else {
        return Ok(dns);
    };
    for line in content.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("nameserver") => {
                if let Some(ip) = fields.next() {
                    match ip.parse::<IpAddr>() {
                        Ok(ip) => dns.nameservers.push(ip),
                        Err(e) => log::warn!(
                            "Ignoring invalid nameserver {ip} in \
                             {RESOLV_CONF_FILE}: {e}"
                        ),
                    }
                }
            }
            // Last one wins
            Some("search") | Some("domain") => {
                dns.searchlist = fields.map(str::to_string).collect();
            }
            _ => (),
        }
    }
    Ok(dns)
}

/// Rewrite name servers and search domains, keeping other lines.
pub(crate) fn write_resolv_conf(
    sysroot: &Sysroot,
    dns: &Dns,
) -> Result<(), NicfgError> {
    let old = sysroot.read_file(RESOLV_CONF_FILE)?.unwrap_or_default();
    let mut lines: Vec<String> = old
        .lines()
        .filter(|l| {
            !matches!(
                l.split_whitespace().next(),
                Some("nameserver") | Some("search") | Some("domain")
            )
        })
        .map(str::to_string)
        .collect();
    if !dns.searchlist.is_empty() {
        lines.push(format!("search {}", dns.searchlist.join(" ")));
    }
    for ns in dns.nameservers.iter() {
        lines.push(format!("nameserver {ns}"));
    }
    let mut content = lines.join("\n");
    content.push('\n');
    sysroot.write_file(RESOLV_CONF_FILE, &content)
}
