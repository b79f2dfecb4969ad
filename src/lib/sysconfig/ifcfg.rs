// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use super::shell_file::ShellVarFile;
use crate::{Hwinfo, InterfaceType, NicfgError, Sysroot};

pub(crate) const SYSCONFIG_DIR: &str = "etc/sysconfig/network";
pub(crate) const IFCFG_PREFIX: &str = "ifcfg-";

const BACKUP_SUFFIXES: [&str; 6] =
    ["~", ".bak", ".orig", ".rpmnew", ".rpmsave", ".old"];

/// Whether `name` is a backup copy left by an editor or package manager.
pub(crate) fn is_backup_name(name: &str) -> bool {
    BACKUP_SUFFIXES.iter().any(|s| name.ends_with(s))
}

pub(crate) fn ifcfg_rel_path(name: &str) -> PathBuf {
    PathBuf::from(SYSCONFIG_DIR).join(format!("{IFCFG_PREFIX}{name}"))
}

/// Interface names holding an `ifcfg-<name>` file, backups excluded.
pub(crate) fn list_ifcfg_names(
    sysroot: &Sysroot,
) -> Result<Vec<String>, NicfgError> {
    Ok(sysroot
        .list_dir(SYSCONFIG_DIR)?
        .into_iter()
        .filter_map(|f| f.strip_prefix(IFCFG_PREFIX).map(str::to_string))
        .filter(|n| !n.is_empty() && !is_backup_name(n))
        .collect())
}

/// One `ifcfg-<name>` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct IfcfgFile {
    pub(crate) name: String,
    pub(crate) vars: ShellVarFile,
}

impl IfcfgFile {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vars: ShellVarFile::default(),
        }
    }

    pub(crate) fn read(
        sysroot: &Sysroot,
        name: &str,
    ) -> Result<Option<Self>, NicfgError> {
        Ok(sysroot
            .read_file(ifcfg_rel_path(name))?
            .map(|content| Self {
                name: name.to_string(),
                vars: ShellVarFile::parse(&content),
            }))
    }

    pub(crate) fn write(&self, sysroot: &Sysroot) -> Result<(), NicfgError> {
        sysroot.write_file(ifcfg_rel_path(&self.name), &self.vars.to_string())
    }

    pub(crate) fn path(&self, sysroot: &Sysroot) -> PathBuf {
        sysroot.path(ifcfg_rel_path(&self.name))
    }

    /// Device type from the file keys, then the name, then the hardware.
    pub(crate) fn iface_type(&self, hwinfos: &[Hwinfo]) -> InterfaceType {
        let vars = &self.vars;
        if let Some(t) = vars.get_non_empty("INTERFACETYPE") {
            return match t.to_lowercase().as_str() {
                "wlan" | "wifi" => InterfaceType::Wireless,
                "ib" => InterfaceType::InfiniBand,
                "lo" => InterfaceType::Loopback,
                "bonding" => InterfaceType::Bond,
                t => InterfaceType::from(t),
            };
        }
        if vars.get_bool("BONDING_MASTER") == Some(true) {
            return InterfaceType::Bond;
        }
        if vars.get_bool("BRIDGE") == Some(true) {
            return InterfaceType::Bridge;
        }
        if vars.get_non_empty("ETHERDEVICE").is_some() {
            return InterfaceType::Vlan;
        }
        match vars.get_non_empty("TUNNEL") {
            Some("tap") => return InterfaceType::Tap,
            Some("tun") => return InterfaceType::Tun,
            Some(t) => return InterfaceType::Unknown(t.to_string()),
            None => (),
        }
        if vars.has_prefix("WIRELESS_") {
            return InterfaceType::Wireless;
        }
        if vars.get_non_empty("CCW_CHAN_IDS").is_some() {
            return if vars.get_non_empty("CTC_PROTOCOL").is_some() {
                InterfaceType::Ctc
            } else if vars.get_non_empty("LCS_LANCMD_TIMEOUT").is_some() {
                InterfaceType::Lcs
            } else {
                InterfaceType::Qeth
            };
        }
        if vars.get_non_empty("IPOIB_MODE").is_some() {
            return InterfaceType::InfiniBand;
        }
        if let Some(t) = iface_type_from_name(&self.name) {
            return t;
        }
        if let Some(hwinfo) = hwinfos.iter().find(|h| h.name == self.name)
            && !hwinfo.iface_type.is_unknown()
        {
            return hwinfo.iface_type.clone();
        }
        InterfaceType::Ethernet
    }
}

fn iface_type_from_name(name: &str) -> Option<InterfaceType> {
    if name == "lo" {
        return Some(InterfaceType::Loopback);
    }
    const NAME_PREFIXES: [(&str, InterfaceType); 10] = [
        ("wlan", InterfaceType::Wireless),
        ("ib", InterfaceType::InfiniBand),
        ("bond", InterfaceType::Bond),
        ("br", InterfaceType::Bridge),
        ("vlan", InterfaceType::Vlan),
        ("tun", InterfaceType::Tun),
        ("tap", InterfaceType::Tap),
        ("dummy", InterfaceType::Dummy),
        ("hsi", InterfaceType::Hsi),
        ("ctc", InterfaceType::Ctc),
    ];
    NAME_PREFIXES
        .into_iter()
        .find(|(prefix, _)| {
            name.strip_prefix(prefix)
                .map(|r| {
                    r.is_empty() || r.starts_with(|c: char| c.is_ascii_digit())
                })
                .unwrap_or_default()
        })
        .map(|(_, t)| t)
}
