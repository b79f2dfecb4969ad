// SPDX-License-Identifier: Apache-2.0

use super::{handlers::SysconfigHandler, ifcfg::IfcfgFile};
use crate::{
    BaseConnection, ConnectionConfig, Issue, IssueLocation, Issues, Sysroot,
    WIRELESS_WEP_KEY_COUNT, WirelessAuthMode, WirelessConfig,
    WirelessConnection, WirelessEapMode, WirelessMode,
};

const KEY_MODE: &str = "WIRELESS_MODE";
const KEY_AUTH_MODE: &str = "WIRELESS_AUTH_MODE";
const KEY_WEP_KEY: &str = "WIRELESS_KEY";

fn mode_to_str(mode: WirelessMode) -> &'static str {
    match mode {
        WirelessMode::Managed => "Managed",
        WirelessMode::AdHoc => "Ad-hoc",
        WirelessMode::Master => "Master",
    }
}

fn mode_from_str(value: &str) -> Option<WirelessMode> {
    match value.to_lowercase().as_str() {
        "managed" => Some(WirelessMode::Managed),
        "ad-hoc" | "adhoc" => Some(WirelessMode::AdHoc),
        "master" => Some(WirelessMode::Master),
        _ => None,
    }
}

fn auth_mode_to_str(mode: WirelessAuthMode) -> &'static str {
    match mode {
        WirelessAuthMode::NoEncryption => "no-encryption",
        WirelessAuthMode::Open => "open",
        WirelessAuthMode::Shared => "sharedkey",
        WirelessAuthMode::Psk => "psk",
        WirelessAuthMode::Eap => "eap",
    }
}

fn auth_mode_from_str(value: &str) -> Option<WirelessAuthMode> {
    match value.to_lowercase().as_str() {
        "no-encryption" | "none" => Some(WirelessAuthMode::NoEncryption),
        "open" => Some(WirelessAuthMode::Open),
        "sharedkey" | "shared" => Some(WirelessAuthMode::Shared),
        "psk" | "wpa-psk" => Some(WirelessAuthMode::Psk),
        "eap" | "wpa-eap" => Some(WirelessAuthMode::Eap),
        _ => None,
    }
}

/// `WIRELESS_KEY` is the same as `WIRELESS_KEY_0`.
fn wep_key_name(index: usize) -> String {
    format!("{KEY_WEP_KEY}_{index}")
}

fn str_opt(ifcfg: &IfcfgFile, key: &str) -> Option<String> {
    ifcfg.vars.get_non_empty(key).map(str::to_string)
}

pub(crate) struct WirelessHandler;

impl SysconfigHandler for WirelessHandler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        sysroot: &Sysroot,
        issues: &mut Issues,
    ) -> ConnectionConfig {
        let vars = &ifcfg.vars;
        let mut wireless = WirelessConfig {
            essid: vars.get("WIRELESS_ESSID").unwrap_or_default().to_string(),
            ..Default::default()
        };
        if let Some(value) = vars.get_non_empty(KEY_MODE) {
            wireless.mode = mode_from_str(value).unwrap_or_else(|| {
                issues.push(Issue::new(
                    IssueLocation::new(&ifcfg.path(sysroot), KEY_MODE),
                    value,
                    mode_to_str(WirelessMode::Managed),
                    "Invalid wireless mode".to_string(),
                ));
                WirelessMode::Managed
            });
        }
        if let Some(value) = vars.get_non_empty(KEY_AUTH_MODE) {
            wireless.auth_mode = auth_mode_from_str(value).unwrap_or_else(|| {
                issues.push(Issue::new(
                    IssueLocation::new(&ifcfg.path(sysroot), KEY_AUTH_MODE),
                    value,
                    auth_mode_to_str(WirelessAuthMode::NoEncryption),
                    "Invalid wireless authentication mode".to_string(),
                ));
                WirelessAuthMode::NoEncryption
            });
        }
        wireless.wpa_psk = str_opt(ifcfg, "WIRELESS_WPA_PSK");
        for index in 0..WIRELESS_WEP_KEY_COUNT {
            let key = vars.get_non_empty(&wep_key_name(index)).or(
                if index == 0 {
                    vars.get_non_empty(KEY_WEP_KEY)
                } else {
                    None
                },
            );
            if let Some(key) = key {
                wireless.keys.push(key.to_string());
            }
        }
        wireless.key_length = vars.get_u32("WIRELESS_KEY_LENGTH");
        wireless.default_key = vars
            .get_u32("WIRELESS_DEFAULT_KEY")
            .and_then(|k| u8::try_from(k).ok())
            .unwrap_or_default();
        wireless.eap_mode = vars
            .get_non_empty("WIRELESS_EAP_MODE")
            .and_then(WirelessEapMode::from_name);
        wireless.eap_auth = str_opt(ifcfg, "WIRELESS_EAP_AUTH");
        wireless.wpa_identity = str_opt(ifcfg, "WIRELESS_WPA_IDENTITY");
        wireless.wpa_anonymous_identity = str_opt(ifcfg, "WIRELESS_WPA_ANONID");
        wireless.wpa_password = str_opt(ifcfg, "WIRELESS_WPA_PASSWORD");
        wireless.ca_cert = str_opt(ifcfg, "WIRELESS_CA_CERT");
        wireless.client_cert = str_opt(ifcfg, "WIRELESS_CLIENT_CERT");
        wireless.client_key = str_opt(ifcfg, "WIRELESS_CLIENT_KEY");
        wireless.client_key_password =
            str_opt(ifcfg, "WIRELESS_CLIENT_KEY_PASSWORD");
        wireless.channel = vars.get_u32("WIRELESS_CHANNEL");
        wireless.ap = str_opt(ifcfg, "WIRELESS_AP");

        ConnectionConfig::Wireless(Box::new(WirelessConnection {
            base,
            wireless,
        }))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::Wireless(conn) = conn else {
            return;
        };
        let wireless = &conn.wireless;
        let vars = &mut ifcfg.vars;
        vars.remove_prefixed("WIRELESS_");
        vars.set("WIRELESS_ESSID", &wireless.essid);
        vars.set(KEY_MODE, mode_to_str(wireless.mode));
        vars.set(KEY_AUTH_MODE, auth_mode_to_str(wireless.auth_mode));
        vars.set_opt("WIRELESS_WPA_PSK", wireless.wpa_psk.as_deref());
        for (index, key) in wireless
            .keys
            .iter()
            .take(WIRELESS_WEP_KEY_COUNT)
            .enumerate()
        {
            vars.set(&wep_key_name(index), key);
        }
        vars.set_opt(
            "WIRELESS_KEY_LENGTH",
            wireless.key_length.map(|l| l.to_string()).as_deref(),
        );
        if !wireless.keys.is_empty() {
            vars.set("WIRELESS_DEFAULT_KEY", &wireless.default_key.to_string());
        }
        vars.set_opt(
            "WIRELESS_EAP_MODE",
            wireless.eap_mode.map(|m| m.as_str().to_uppercase()).as_deref(),
        );
        vars.set_opt("WIRELESS_EAP_AUTH", wireless.eap_auth.as_deref());
        vars.set_opt("WIRELESS_WPA_IDENTITY", wireless.wpa_identity.as_deref());
        vars.set_opt(
            "WIRELESS_WPA_ANONID",
            wireless.wpa_anonymous_identity.as_deref(),
        );
        vars.set_opt("WIRELESS_WPA_PASSWORD", wireless.wpa_password.as_deref());
        vars.set_opt("WIRELESS_CA_CERT", wireless.ca_cert.as_deref());
        vars.set_opt("WIRELESS_CLIENT_CERT", wireless.client_cert.as_deref());
        vars.set_opt("WIRELESS_CLIENT_KEY", wireless.client_key.as_deref());
        vars.set_opt(
            "WIRELESS_CLIENT_KEY_PASSWORD",
            wireless.client_key_password.as_deref(),
        );
        vars.set_opt(
            "WIRELESS_CHANNEL",
            wireless.channel.map(|c| c.to_string()).as_deref(),
        );
        vars.set_opt("WIRELESS_AP", wireless.ap.as_deref());
    }
}
