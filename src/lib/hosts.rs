// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;

use crate::{NicfgError, Sysroot};

pub(crate) const HOSTS_FILE: &str = "etc/hosts";

/// Address used for the local hostname entry.
pub const HOSTNAME_LOOPBACK_IP: &str = "127.0.0.2";

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostsLine {
    Entry {
        ip: String,
        names: Vec<String>,
        comment: Option<String>,
    },
    Other(String),
}

/// The host alias table `/etc/hosts`: IP address to host names.
///
/// Comments and lines not touched are kept as they are when writing back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct HostsTable {
    lines: Vec<HostsLine>,
}

fn same_ip(a: &str, b: &str) -> bool {
    match (a.parse::<IpAddr>(), b.parse::<IpAddr>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

impl HostsTable {
    pub fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        for line in content.lines() {
            let (data, comment) = match line.split_once('#') {
                Some((d, c)) => (d, Some(c.trim().to_string())),
                None => (line, None),
            };
            let mut fields = data.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(ip), Some(name)) => {
                    let mut names = vec![name.to_string()];
                    names.extend(fields.map(str::to_string));
                    lines.push(HostsLine::Entry {
                        ip: ip.to_string(),
                        names,
                        comment,
                    });
                }
                _ => lines.push(HostsLine::Other(line.to_string())),
            }
        }
        Self { lines }
    }

    pub fn read(sysroot: &Sysroot) -> Result<Self, NicfgError> {
        Ok(sysroot
            .read_file(HOSTS_FILE)?
            .map(|c| Self::parse(&c))
            .unwrap_or_default())
    }

    pub fn write(&self, sysroot: &Sysroot) -> Result<(), NicfgError> {
        sysroot.write_file(HOSTS_FILE, &self.to_string())
    }

    /// Host names of all entries for `ip`.
    pub fn names_of(&self, ip: &str) -> Vec<String> {
        let mut ret = Vec::new();
        for line in self.lines.iter() {
            if let HostsLine::Entry { ip: i, names, .. } = line
                && same_ip(i, ip)
            {
                ret.extend(names.iter().cloned());
            }
        }
        ret
    }

    /// Replace the names of `ip`. The first entry of `ip` is updated in
    /// place, following ones are dropped. Empty `names` removes `ip`.
    pub fn set_names(&mut self, ip: &str, names: &[String]) {
        let mut done = names.is_empty();
        let mut new_lines = Vec::with_capacity(self.lines.len() + 1);
        for line in self.lines.drain(..) {
            match line {
                HostsLine::Entry {
                    ip: i, comment, ..
                } if same_ip(&i, ip) => {
                    if !done {
                        new_lines.push(HostsLine::Entry {
                            ip: i,
                            names: names.to_vec(),
                            comment,
                        });
                        done = true;
                    }
                }
                line => new_lines.push(line),
            }
        }
        if !done {
            new_lines.push(HostsLine::Entry {
                ip: ip.to_string(),
                names: names.to_vec(),
                comment: None,
            });
        }
        self.lines = new_lines;
    }

    pub fn remove(&mut self, ip: &str) {
        self.set_names(ip, &[]);
    }
}

impl std::fmt::Display for HostsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            match line {
                HostsLine::Entry { ip, names, comment } => {
                    write!(f, "{ip}\t{}", names.join(" "))?;
                    if let Some(c) = comment {
                        write!(f, "\t# {c}")?;
                    }
                    writeln!(f)?;
                }
                HostsLine::Other(s) => writeln!(f, "{s}")?,
            }
        }
        Ok(())
    }
}

/// Sync host names of connection primary addresses and the hostname entry
/// of [HOSTNAME_LOOPBACK_IP] into the hosts file.
pub(crate) fn write_hosts(
    sysroot: &Sysroot,
    config: &crate::Config,
    old: Option<&crate::Config>,
) -> Result<(), NicfgError> {
    use crate::NicfgConnection;

    let orig = HostsTable::read(sysroot)?;
    let mut hosts = orig.clone();
    if let Some(old) = old {
        for base in old.connections.iter().map(|c| c.base_conn()) {
            if let Some(ip) = base.primary_address()
                && !base.hostnames.is_empty()
            {
                hosts.remove(&ip.address.to_string());
            }
        }
    }
    for base in config.connections.iter().map(|c| c.base_conn()) {
        if let Some(ip) = base.primary_address()
            && !base.hostnames.is_empty()
        {
            hosts.set_names(&ip.address.to_string(), &base.hostnames);
        }
    }
    let static_name = config.hostname.static_name.as_str();
    if config.dns.hostname_to_hosts && !static_name.is_empty() {
        let mut names = vec![static_name.to_string()];
        let short_name = config.hostname.short_name();
        if short_name != static_name {
            names.push(short_name.to_string());
        }
        hosts.set_names(HOSTNAME_LOOPBACK_IP, &names);
    } else {
        hosts.remove(HOSTNAME_LOOPBACK_IP);
    }
    if hosts != orig {
        hosts.write(sysroot)?;
    }
    Ok(())
}
