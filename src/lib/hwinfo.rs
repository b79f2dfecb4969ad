// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use crate::{Hwinfo, InterfaceType, NicfgError};

const ARPHRD_ETHER: u32 = 1;
const ARPHRD_INFINIBAND: u32 = 32;
const ARPHRD_LOOPBACK: u32 = 772;

const IFF_TUN: u32 = 0x0001;
const IFF_TAP: u32 = 0x0002;

/// Enumerate network devices of the system.
pub trait HardwareReader: std::fmt::Debug {
    fn read(&self, root: &Path) -> Result<Vec<Hwinfo>, NicfgError>;
}

/// [HardwareReader] walking `<root>/sys/class/net`.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct SysfsHardwareReader;

impl HardwareReader for SysfsHardwareReader {
    fn read(&self, root: &Path) -> Result<Vec<Hwinfo>, NicfgError> {
        let class_dir = root.join("sys/class/net");
        let entries = match std::fs::read_dir(&class_dir) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found", class_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(NicfgError::io("read directory", &class_dir, e));
            }
        };
        let mut ret = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| NicfgError::io("read", &class_dir, e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            ret.push(read_sysfs_iface(&entry.path(), &name));
        }
        ret.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(ret)
    }
}

fn read_sysfs_iface(dir: &Path, name: &str) -> Hwinfo {
    let mut hwinfo = Hwinfo::new(name, sysfs_iface_type(dir));
    hwinfo.mac = read_sysfs_str(&dir.join("address"))
        .filter(|m| !m.is_empty() && m != "00:00:00:00:00:00");
    hwinfo.busid = link_basename(&dir.join("device"));
    hwinfo.driver = link_basename(&dir.join("device/driver"));
    log::debug!("Found hardware {hwinfo}");
    hwinfo
}

fn sysfs_iface_type(dir: &Path) -> InterfaceType {
    if dir.join("wireless").exists() || dir.join("phy80211").exists() {
        return InterfaceType::Wireless;
    }
    if dir.join("bonding").exists() {
        return InterfaceType::Bond;
    }
    if dir.join("bridge").exists() {
        return InterfaceType::Bridge;
    }
    if let Some(flags) = read_sysfs_str(&dir.join("tun_flags"))
        .and_then(|f| u32::from_str_radix(f.trim_start_matches("0x"), 16).ok())
    {
        if flags & IFF_TAP > 0 {
            return InterfaceType::Tap;
        } else if flags & IFF_TUN > 0 {
            return InterfaceType::Tun;
        }
    }
    match read_sysfs_str(&dir.join("type")).and_then(|t| t.parse::<u32>().ok())
    {
        Some(ARPHRD_LOOPBACK) => InterfaceType::Loopback,
        Some(ARPHRD_INFINIBAND) => InterfaceType::InfiniBand,
        Some(ARPHRD_ETHER) => {
            if dir.join("device").exists() {
                InterfaceType::Ethernet
            } else if read_sysfs_str(&dir.join("uevent"))
                .map(|u| u.contains("DEVTYPE=vlan"))
                .unwrap_or_default()
            {
                InterfaceType::Vlan
            } else {
                InterfaceType::Dummy
            }
        }
        Some(t) => InterfaceType::Unknown(format!("arphrd-{t}")),
        None => InterfaceType::default(),
    }
}

fn read_sysfs_str(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn link_basename(path: &Path) -> Option<String> {
    std::fs::read_link(path)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
}

/// [HardwareReader] returning a fixed list, for offline conversion.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct StaticHardwareReader {
    pub hwinfos: Vec<Hwinfo>,
}

impl StaticHardwareReader {
    pub fn new(hwinfos: Vec<Hwinfo>) -> Self {
        Self { hwinfos }
    }
}

impl HardwareReader for StaticHardwareReader {
    fn read(&self, _root: &Path) -> Result<Vec<Hwinfo>, NicfgError> {
        Ok(self.hwinfos.clone())
    }
}
