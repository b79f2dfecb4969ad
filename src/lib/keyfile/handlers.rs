// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use super::key_file::KeyFile;
use crate::{
    BaseConnection, BondConnection, BridgeConnection, ConnectionConfig,
    DummyConnection, EthernetConnection, InfiniBandConnection, InterfaceType,
    IpoibMode, Issue, IssueLocation, Issues, LoopbackConnection,
    NicfgConnection, S390Config, S390Connection, TunnelConnection,
    VlanConnection, WIRELESS_WEP_KEY_COUNT, WirelessAuthMode, WirelessConfig,
    WirelessConnection, WirelessEapMode, WirelessMode, dispatch::TypeRegistry,
};

pub(crate) const SECTION_CONNECTION: &str = "connection";
const SECTION_ETHERNET: &str = "ethernet";
const SECTION_S390_OPTIONS: &str = "ethernet-s390-options";
const SECTION_WIFI: &str = "wifi";
const SECTION_WIFI_SECURITY: &str = "wifi-security";
const SECTION_8021X: &str = "802-1x";
const SECTION_BOND: &str = "bond";
const SECTION_BRIDGE: &str = "bridge";
const SECTION_VLAN: &str = "vlan";
const SECTION_INFINIBAND: &str = "infiniband";
const SECTION_TUN: &str = "tun";
const SECTION_DUMMY: &str = "dummy";
const SECTION_LOOPBACK: &str = "loopback";

const KEY_S390_NETTYPE: &str = "s390-nettype";
const KEY_S390_SUBCHANNELS: &str = "s390-subchannels";
const TUN_MODE_TUN: &str = "1";
const TUN_MODE_TAP: &str = "2";

/// Device type of a keyfile from `connection.type` and the type sections.
/// Unsupported `connection.type` gives [InterfaceType::Unknown].
pub(crate) fn conn_type_of(kf: &KeyFile) -> InterfaceType {
    let nm_type = kf
        .get_non_empty(SECTION_CONNECTION, "type")
        .unwrap_or("ethernet");
    match nm_type {
        "ethernet" | "802-3-ethernet" => {
            match kf.get_non_empty(SECTION_ETHERNET, KEY_S390_NETTYPE) {
                Some("qeth") => InterfaceType::Qeth,
                Some("ctc") => InterfaceType::Ctc,
                Some("lcs") => InterfaceType::Lcs,
                _ => InterfaceType::Ethernet,
            }
        }
        "wifi" | "802-11-wireless" => InterfaceType::Wireless,
        "bond" => InterfaceType::Bond,
        "bridge" => InterfaceType::Bridge,
        "vlan" => InterfaceType::Vlan,
        "infiniband" => InterfaceType::InfiniBand,
        "tun" => {
            if kf.get(SECTION_TUN, "mode") == Some(TUN_MODE_TAP) {
                InterfaceType::Tap
            } else {
                InterfaceType::Tun
            }
        }
        "dummy" => InterfaceType::Dummy,
        "loopback" => InterfaceType::Loopback,
        t => InterfaceType::Unknown(t.to_string()),
    }
}

/// Section holding `mtu` and `cloned-mac-address` of the device type.
pub(crate) fn link_section(conn_type: &InterfaceType) -> &'static str {
    match conn_type {
        InterfaceType::Wireless => SECTION_WIFI,
        InterfaceType::InfiniBand => SECTION_INFINIBAND,
        InterfaceType::Loopback => SECTION_LOOPBACK,
        _ => SECTION_ETHERNET,
    }
}

/// Field mapping of one device type in `*.nmconnection` files.
///
/// The `[connection]`, `[ipv4]` and `[ipv6]` sections are handled by the
/// reader and writer, handlers only take care of the type sections.
pub(crate) trait KeyfileHandler {
    /// Value of `connection.type`.
    fn nm_type(&self) -> &'static str;

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        path: &Path,
        issues: &mut Issues,
    ) -> ConnectionConfig;

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile);
}

pub(crate) fn keyfile_registry() -> TypeRegistry<dyn KeyfileHandler> {
    let mut registry: TypeRegistry<dyn KeyfileHandler> = TypeRegistry::new();
    registry.register(InterfaceType::Ethernet, Box::new(EthernetHandler));
    registry.register(InterfaceType::Wireless, Box::new(WirelessHandler));
    registry.register(InterfaceType::Bond, Box::new(BondHandler));
    registry.register(InterfaceType::Bridge, Box::new(BridgeHandler));
    registry.register(InterfaceType::Vlan, Box::new(VlanHandler));
    registry.register(InterfaceType::InfiniBand, Box::new(InfiniBandHandler));
    registry.register(InterfaceType::Tun, Box::new(TunHandler));
    registry.register(InterfaceType::Tap, Box::new(TunHandler));
    registry.register(InterfaceType::Dummy, Box::new(DummyHandler));
    registry.register(InterfaceType::Loopback, Box::new(LoopbackHandler));
    for s390_type in [
        InterfaceType::Qeth,
        InterfaceType::Ctc,
        InterfaceType::Lcs,
        InterfaceType::Hsi,
    ] {
        registry.register(s390_type, Box::new(S390Handler));
    }
    registry
}

struct EthernetHandler;

impl KeyfileHandler for EthernetHandler {
    fn nm_type(&self) -> &'static str {
        "ethernet"
    }

    fn read(
        &self,
        _kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Ethernet(Box::new(EthernetConnection { base }))
    }

    fn write(&self, _conn: &ConnectionConfig, kf: &mut KeyFile) {
        kf.ensure_section(SECTION_ETHERNET);
    }
}

struct S390Handler;

impl KeyfileHandler for S390Handler {
    fn nm_type(&self) -> &'static str {
        "ethernet"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut s390 = S390Config::default();
        s390.set_channel_ids(
            &kf.get_list(SECTION_ETHERNET, KEY_S390_SUBCHANNELS).join(" "),
        );
        s390.layer2 = kf
            .get_bool(SECTION_S390_OPTIONS, "layer2")
            .unwrap_or_default();
        s390.port_number = kf.get_u32(SECTION_S390_OPTIONS, "portno");
        s390.protocol = kf.get_u32(SECTION_S390_OPTIONS, "protocol");
        s390.lancmd_timeout =
            kf.get_u32(SECTION_S390_OPTIONS, "lancmd_timeout");
        ConnectionConfig::S390(Box::new(S390Connection { base, s390 }))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::S390(conn) = conn else {
            return;
        };
        let s390 = &conn.s390;
        let nettype = match conn.conn_type() {
            InterfaceType::Ctc => "ctc",
            InterfaceType::Lcs => "lcs",
            // HiperSockets are driven by qeth
            _ => "qeth",
        };
        kf.set(SECTION_ETHERNET, KEY_S390_NETTYPE, nettype);
        let channels: Vec<String> = s390
            .channel_ids()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        kf.set_list(SECTION_ETHERNET, KEY_S390_SUBCHANNELS, &channels);
        if nettype == "qeth" {
            kf.set(
                SECTION_S390_OPTIONS,
                "layer2",
                if s390.layer2 { "1" } else { "0" },
            );
        } else {
            kf.remove(SECTION_S390_OPTIONS, "layer2");
        }
        for (key, value) in [
            ("portno", s390.port_number),
            ("protocol", s390.protocol),
            ("lancmd_timeout", s390.lancmd_timeout),
        ] {
            kf.set_opt(
                SECTION_S390_OPTIONS,
                key,
                value.map(|v| v.to_string()).as_deref(),
            );
        }
    }
}

struct WirelessHandler;

fn wifi_mode_to_str(mode: WirelessMode) -> &'static str {
    match mode {
        WirelessMode::Managed => "infrastructure",
        WirelessMode::AdHoc => "adhoc",
        WirelessMode::Master => "ap",
    }
}

fn wifi_mode_from_str(mode: &str) -> Option<WirelessMode> {
    match mode {
        "infrastructure" => Some(WirelessMode::Managed),
        "adhoc" => Some(WirelessMode::AdHoc),
        "ap" => Some(WirelessMode::Master),
        _ => None,
    }
}

fn str_opt(kf: &KeyFile, section: &str, key: &str) -> Option<String> {
    kf.get_non_empty(section, key).map(str::to_string)
}

impl KeyfileHandler for WirelessHandler {
    fn nm_type(&self) -> &'static str {
        "wifi"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        path: &Path,
        issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut wireless = WirelessConfig {
            essid: kf.get(SECTION_WIFI, "ssid").unwrap_or_default().to_string(),
            ..Default::default()
        };
        if let Some(mode) = kf.get_non_empty(SECTION_WIFI, "mode") {
            wireless.mode = wifi_mode_from_str(mode).unwrap_or_else(|| {
                issues.push(Issue::new(
                    IssueLocation::new(path, "wifi.mode"),
                    mode,
                    wifi_mode_to_str(WirelessMode::Managed),
                    "Unsupported wireless mode".to_string(),
                ));
                WirelessMode::Managed
            });
        }
        wireless.channel = kf.get_u32(SECTION_WIFI, "channel");
        wireless.ap = str_opt(kf, SECTION_WIFI, "bssid");

        let sec = SECTION_WIFI_SECURITY;
        wireless.auth_mode = match kf.get_non_empty(sec, "key-mgmt") {
            None => WirelessAuthMode::NoEncryption,
            Some("wpa-psk") | Some("sae") => WirelessAuthMode::Psk,
            Some("wpa-eap") | Some("wpa-eap-suite-b-192") => {
                WirelessAuthMode::Eap
            }
            Some(_) => {
                if kf.get(sec, "auth-alg") == Some("shared") {
                    WirelessAuthMode::Shared
                } else {
                    WirelessAuthMode::Open
                }
            }
        };
        wireless.wpa_psk = str_opt(kf, sec, "psk");
        for index in 0..WIRELESS_WEP_KEY_COUNT {
            if let Some(key) = kf.get_non_empty(sec, &format!("wep-key{index}"))
            {
                wireless.keys.push(key.to_string());
            }
        }
        wireless.default_key = kf
            .get_u32(sec, "wep-tx-keyidx")
            .and_then(|i| u8::try_from(i).ok())
            .unwrap_or_default();

        let eap = SECTION_8021X;
        wireless.eap_mode = kf
            .get_list(eap, "eap")
            .into_iter()
            .find_map(WirelessEapMode::from_name);
        wireless.eap_auth = str_opt(kf, eap, "phase2-auth");
        wireless.wpa_identity = str_opt(kf, eap, "identity");
        wireless.wpa_anonymous_identity =
            str_opt(kf, eap, "anonymous-identity");
        wireless.wpa_password = str_opt(kf, eap, "password");
        wireless.ca_cert = str_opt(kf, eap, "ca-cert");
        wireless.client_cert = str_opt(kf, eap, "client-cert");
        wireless.client_key = str_opt(kf, eap, "private-key");
        wireless.client_key_password =
            str_opt(kf, eap, "private-key-password");

        ConnectionConfig::Wireless(Box::new(WirelessConnection {
            base,
            wireless,
        }))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::Wireless(conn) = conn else {
            return;
        };
        let wireless = &conn.wireless;
        kf.set(SECTION_WIFI, "ssid", &wireless.essid);
        kf.set(SECTION_WIFI, "mode", wifi_mode_to_str(wireless.mode));
        kf.set_opt(
            SECTION_WIFI,
            "channel",
            wireless.channel.map(|c| c.to_string()).as_deref(),
        );
        kf.set_opt(SECTION_WIFI, "bssid", wireless.ap.as_deref());

        let sec = SECTION_WIFI_SECURITY;
        if wireless.auth_mode == WirelessAuthMode::NoEncryption {
            kf.remove_section(sec);
        } else {
            kf.remove_matching(sec, |k| {
                ["key-mgmt", "auth-alg", "psk", "wep-tx-keyidx"].contains(&k)
                    || k.starts_with("wep-key")
            });
        }
        match wireless.auth_mode {
            WirelessAuthMode::NoEncryption => (),
            WirelessAuthMode::Open | WirelessAuthMode::Shared => {
                kf.set(sec, "key-mgmt", "none");
                kf.set(
                    sec,
                    "auth-alg",
                    if wireless.auth_mode == WirelessAuthMode::Shared {
                        "shared"
                    } else {
                        "open"
                    },
                );
                for (index, key) in wireless
                    .keys
                    .iter()
                    .take(WIRELESS_WEP_KEY_COUNT)
                    .enumerate()
                {
                    kf.set(sec, &format!("wep-key{index}"), key);
                }
                if !wireless.keys.is_empty() {
                    kf.set(
                        sec,
                        "wep-tx-keyidx",
                        &wireless.default_key.to_string(),
                    );
                }
            }
            WirelessAuthMode::Psk => {
                kf.set(sec, "key-mgmt", "wpa-psk");
                kf.set_opt(sec, "psk", wireless.wpa_psk.as_deref());
            }
            WirelessAuthMode::Eap => {
                kf.set(sec, "key-mgmt", "wpa-eap");
            }
        }

        let eap = SECTION_8021X;
        if wireless.auth_mode != WirelessAuthMode::Eap {
            kf.remove_section(eap);
            return;
        }
        let eap_modes: Vec<String> = wireless
            .eap_mode
            .iter()
            .map(|m| m.as_str().to_string())
            .collect();
        kf.set_list(eap, "eap", &eap_modes);
        for (key, value) in [
            ("phase2-auth", &wireless.eap_auth),
            ("identity", &wireless.wpa_identity),
            ("anonymous-identity", &wireless.wpa_anonymous_identity),
            ("password", &wireless.wpa_password),
            ("ca-cert", &wireless.ca_cert),
            ("client-cert", &wireless.client_cert),
            ("private-key", &wireless.client_key),
            ("private-key-password", &wireless.client_key_password),
        ] {
            kf.set_opt(eap, key, value.as_deref());
        }
    }
}

struct BondHandler;

impl KeyfileHandler for BondHandler {
    fn nm_type(&self) -> &'static str {
        "bond"
    }

    /// Ports are collected from the port connections by the reader.
    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = BondConnection {
            base,
            ..Default::default()
        };
        let options: Vec<String> = kf
            .keys(SECTION_BOND)
            .into_iter()
            .filter_map(|k| {
                kf.get(SECTION_BOND, k).map(|v| format!("{k}={v}"))
            })
            .collect();
        if !options.is_empty() {
            conn.bond.options = Some(options.join(" "));
        }
        ConnectionConfig::Bond(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::Bond(conn) = conn else {
            return;
        };
        kf.remove_section(SECTION_BOND);
        kf.ensure_section(SECTION_BOND);
        for (key, value) in conn.bond.option_pairs() {
            kf.set(SECTION_BOND, key, value);
        }
    }
}

struct BridgeHandler;

impl KeyfileHandler for BridgeHandler {
    fn nm_type(&self) -> &'static str {
        "bridge"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = BridgeConnection {
            base,
            ..Default::default()
        };
        // Enabled unless told otherwise
        conn.bridge.stp = kf.get_bool(SECTION_BRIDGE, "stp").unwrap_or(true);
        conn.bridge.forward_delay = kf.get_u32(SECTION_BRIDGE, "forward-delay");
        ConnectionConfig::Bridge(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::Bridge(conn) = conn else {
            return;
        };
        kf.set_bool(SECTION_BRIDGE, "stp", conn.bridge.stp);
        kf.set_opt(
            SECTION_BRIDGE,
            "forward-delay",
            conn.bridge.forward_delay.map(|d| d.to_string()).as_deref(),
        );
    }
}

struct VlanHandler;

impl KeyfileHandler for VlanHandler {
    fn nm_type(&self) -> &'static str {
        "vlan"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        path: &Path,
        issues: &mut Issues,
    ) -> ConnectionConfig {
        let mut conn = VlanConnection {
            base,
            ..Default::default()
        };
        conn.vlan.parent =
            kf.get(SECTION_VLAN, "parent").unwrap_or_default().to_string();
        if let Some(id) = kf.get_non_empty(SECTION_VLAN, "id") {
            match id.parse::<u16>() {
                Ok(i) => conn.vlan.id = Some(i),
                Err(e) => issues.push(Issue::new(
                    IssueLocation::new(path, "vlan.id"),
                    id,
                    "",
                    format!("Invalid VLAN ID: {e}"),
                )),
            }
        }
        ConnectionConfig::Vlan(Box::new(conn))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::Vlan(conn) = conn else {
            return;
        };
        kf.set(SECTION_VLAN, "parent", &conn.vlan.parent);
        kf.set_opt(
            SECTION_VLAN,
            "id",
            conn.vlan.id.map(|i| i.to_string()).as_deref(),
        );
    }
}

struct InfiniBandHandler;

impl KeyfileHandler for InfiniBandHandler {
    fn nm_type(&self) -> &'static str {
        "infiniband"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::InfiniBand(Box::new(InfiniBandConnection {
            base,
            ipoib_mode: kf
                .get_non_empty(SECTION_INFINIBAND, "transport-mode")
                .and_then(IpoibMode::from_name),
        }))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::InfiniBand(conn) = conn else {
            return;
        };
        kf.ensure_section(SECTION_INFINIBAND);
        kf.set_opt(
            SECTION_INFINIBAND,
            "transport-mode",
            conn.ipoib_mode.map(|m| m.as_str()),
        );
    }
}

struct TunHandler;

impl KeyfileHandler for TunHandler {
    fn nm_type(&self) -> &'static str {
        "tun"
    }

    fn read(
        &self,
        kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Tunnel(Box::new(TunnelConnection {
            base,
            owner: str_opt(kf, SECTION_TUN, "owner"),
            group: str_opt(kf, SECTION_TUN, "group"),
        }))
    }

    fn write(&self, conn: &ConnectionConfig, kf: &mut KeyFile) {
        let ConnectionConfig::Tunnel(conn) = conn else {
            return;
        };
        kf.set(
            SECTION_TUN,
            "mode",
            if conn.is_tap() {
                TUN_MODE_TAP
            } else {
                TUN_MODE_TUN
            },
        );
        kf.set_opt(SECTION_TUN, "owner", conn.owner.as_deref());
        kf.set_opt(SECTION_TUN, "group", conn.group.as_deref());
    }
}

struct DummyHandler;

impl KeyfileHandler for DummyHandler {
    fn nm_type(&self) -> &'static str {
        "dummy"
    }

    fn read(
        &self,
        _kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Dummy(Box::new(DummyConnection { base }))
    }

    fn write(&self, _conn: &ConnectionConfig, kf: &mut KeyFile) {
        kf.ensure_section(SECTION_DUMMY);
    }
}

struct LoopbackHandler;

impl KeyfileHandler for LoopbackHandler {
    fn nm_type(&self) -> &'static str {
        "loopback"
    }

    fn read(
        &self,
        _kf: &KeyFile,
        base: BaseConnection,
        _path: &Path,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        ConnectionConfig::Loopback(Box::new(LoopbackConnection { base }))
    }

    fn write(&self, _conn: &ConnectionConfig, _kf: &mut KeyFile) {}
}
