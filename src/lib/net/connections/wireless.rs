// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    BaseConnection, InterfaceType, JsonDisplay, JsonDisplayHideSecrets,
    NicfgConnection,
};

/// String replacing secrets when displaying or debugging.
pub const HIDE_PASSWORD_STR: &str = "<_password_hidden_by_nicfg>";

/// Up to this many WEP keys could be configured.
pub const WIRELESS_WEP_KEY_COUNT: usize = 4;

/// Wireless LAN connection.
///
/// Display and Debug output never contain the secrets.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonDisplayHideSecrets,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct WirelessConnection {
    #[serde(flatten)]
    pub base: BaseConnection,
    #[serde(default)]
    pub wireless: WirelessConfig,
}

impl Default for WirelessConnection {
    fn default() -> Self {
        Self {
            base: BaseConnection {
                conn_type: InterfaceType::Wireless,
                ..Default::default()
            },
            wireless: WirelessConfig::default(),
        }
    }
}

impl WirelessConnection {
    pub fn new(name: &str, essid: &str) -> Self {
        Self {
            base: BaseConnection::new(name, InterfaceType::Wireless),
            wireless: WirelessConfig {
                essid: essid.to_string(),
                ..Default::default()
            },
        }
    }
}

impl NicfgConnection for WirelessConnection {
    fn base_conn(&self) -> &BaseConnection {
        &self.base
    }

    fn base_conn_mut(&mut self) -> &mut BaseConnection {
        &mut self.base
    }

    fn hide_secrets_conn_specific(&mut self) {
        self.wireless.hide_secrets();
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum WirelessMode {
    #[default]
    Managed,
    AdHoc,
    Master,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum WirelessAuthMode {
    #[default]
    NoEncryption,
    /// WEP open system
    Open,
    /// WEP shared key
    Shared,
    /// WPA pre-shared key
    Psk,
    /// WPA enterprise (802.1x)
    Eap,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum WirelessEapMode {
    Peap,
    Ttls,
    Tls,
}

impl WirelessEapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peap => "peap",
            Self::Ttls => "ttls",
            Self::Tls => "tls",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "peap" => Some(Self::Peap),
            "ttls" => Some(Self::Ttls),
            "tls" => Some(Self::Tls),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplayHideSecrets)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct WirelessConfig {
    #[serde(default)]
    pub essid: String,
    #[serde(default)]
    pub mode: WirelessMode,
    #[serde(default)]
    pub auth_mode: WirelessAuthMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpa_psk: Option<String>,
    /// WEP keys, at most [WIRELESS_WEP_KEY_COUNT].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    /// WEP key length in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
    /// Index of the WEP key used for transmitting.
    #[serde(default)]
    pub default_key: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eap_mode: Option<WirelessEapMode>,
    /// Inner (phase 2) authentication of PEAP or TTLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eap_auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpa_identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpa_anonymous_identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpa_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
    /// BSSID of the access point to associate with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<String>,
}

impl WirelessConfig {
    pub fn hide_secrets(&mut self) {
        for secret in [
            &mut self.wpa_psk,
            &mut self.wpa_password,
            &mut self.client_key_password,
        ] {
            if secret.is_some() {
                *secret = Some(HIDE_PASSWORD_STR.to_string());
            }
        }
        for key in self.keys.iter_mut() {
            *key = HIDE_PASSWORD_STR.to_string();
        }
    }

    pub fn remove_secrets(&mut self) {
        self.wpa_psk = None;
        self.wpa_password = None;
        self.client_key_password = None;
        self.keys.clear();
    }
}

impl std::fmt::Debug for WirelessConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        let mut hidden = self.clone();
        hidden.hide_secrets();
        f.debug_struct("WirelessConfig")
            .field("essid", &hidden.essid)
            .field("mode", &hidden.mode)
            .field("auth_mode", &hidden.auth_mode)
            .field("wpa_psk", &hidden.wpa_psk)
            .field("keys", &hidden.keys)
            .field("key_length", &hidden.key_length)
            .field("default_key", &hidden.default_key)
            .field("eap_mode", &hidden.eap_mode)
            .field("eap_auth", &hidden.eap_auth)
            .field("wpa_identity", &hidden.wpa_identity)
            .field("wpa_anonymous_identity", &hidden.wpa_anonymous_identity)
            .field("wpa_password", &hidden.wpa_password)
            .field("ca_cert", &hidden.ca_cert)
            .field("client_cert", &hidden.client_cert)
            .field("client_key", &hidden.client_key)
            .field("client_key_password", &hidden.client_key_password)
            .field("channel", &hidden.channel)
            .field("ap", &hidden.ap)
            .finish()
    }
}
