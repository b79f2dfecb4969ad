// SPDX-License-Identifier: Apache-2.0

use crate::{NicfgError, Routing, Sysroot};

pub(crate) const FORWARDING_FILE: &str =
    "etc/sysctl.d/70-nicfg-forwarding.conf";
const IPV4_FORWARD_KEY: &str = "net.ipv4.ip_forward";
const IPV6_FORWARD_KEY: &str = "net.ipv6.conf.all.forwarding";

fn is_enabled(value: &str) -> bool {
    matches!(value.trim(), "1" | "yes" | "true")
}

/// Load IPv4 and IPv6 forwarding flags into `routing`. Missing file or keys
/// mean disabled.
pub(crate) fn read_forwarding(
    sysroot: &Sysroot,
    routing: &mut Routing,
) -> Result<(), NicfgError> {
    let Some(content) = sysroot.read_file(FORWARDING_FILE)? else {
        return Ok(());
    };
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim().replace('/', ".").as_str() {
                IPV4_FORWARD_KEY => routing.forward_ipv4 = is_enabled(value),
                IPV6_FORWARD_KEY => routing.forward_ipv6 = is_enabled(value),
                _ => (),
            }
        }
    }
    Ok(())
}

pub(crate) fn write_forwarding(
    sysroot: &Sysroot,
    routing: &Routing,
) -> Result<(), NicfgError> {
    sysroot.write_file(
        FORWARDING_FILE,
        &format!(
            "# Generated by nicfg\n{IPV4_FORWARD_KEY} = {}\n\
             {IPV6_FORWARD_KEY} = {}\n",
            u8::from(routing.forward_ipv4),
            u8::from(routing.forward_ipv6),
        ),
    )
}
