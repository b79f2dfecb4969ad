// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    BaseConnection, BondConnection, BridgeConnection, DummyConnection,
    EthernetConnection, InfiniBandConnection, InterfaceType,
    JsonDisplayHideSecrets, LoopbackConnection, NicfgConnection,
    S390Connection, TunnelConnection, VlanConnection, WirelessConnection,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonDisplayHideSecrets)]
#[serde(rename_all = "kebab-case", untagged)]
#[non_exhaustive]
/// Declarative settings of one connection, subtyped by device type.
pub enum ConnectionConfig {
    Ethernet(Box<EthernetConnection>),
    Wireless(Box<WirelessConnection>),
    Bond(Box<BondConnection>),
    Bridge(Box<BridgeConnection>),
    Vlan(Box<VlanConnection>),
    InfiniBand(Box<InfiniBandConnection>),
    /// TUN and TAP
    Tunnel(Box<TunnelConnection>),
    Dummy(Box<DummyConnection>),
    Loopback(Box<LoopbackConnection>),
    /// qeth, ctc, lcs and hsi
    S390(Box<S390Connection>),
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::Ethernet(Box::default())
    }
}

impl<'de> Deserialize<'de> for ConnectionConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;

        match Option::deserialize(&v["type"])
            .map_err(serde::de::Error::custom)?
        {
            Some(InterfaceType::Ethernet) | None => {
                let inner = EthernetConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Ethernet(Box::new(inner)))
            }
            Some(InterfaceType::Wireless) => {
                let inner = WirelessConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Wireless(Box::new(inner)))
            }
            Some(InterfaceType::Bond) => {
                let inner = BondConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Bond(Box::new(inner)))
            }
            Some(InterfaceType::Bridge) => {
                let inner = BridgeConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Bridge(Box::new(inner)))
            }
            Some(InterfaceType::Vlan) => {
                let inner = VlanConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Vlan(Box::new(inner)))
            }
            Some(InterfaceType::InfiniBand) => {
                let inner = InfiniBandConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::InfiniBand(Box::new(inner)))
            }
            Some(InterfaceType::Tun) | Some(InterfaceType::Tap) => {
                let inner = TunnelConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Tunnel(Box::new(inner)))
            }
            Some(InterfaceType::Dummy) => {
                let inner = DummyConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Dummy(Box::new(inner)))
            }
            Some(InterfaceType::Loopback) => {
                let inner = LoopbackConnection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::Loopback(Box::new(inner)))
            }
            Some(t) if t.is_s390() => {
                let inner = S390Connection::deserialize(v)
                    .map_err(serde::de::Error::custom)?;
                Ok(Self::S390(Box::new(inner)))
            }
            Some(t) => Err(serde::de::Error::custom(format!(
                "Unsupported connection type {t}"
            ))),
        }
    }
}

macro_rules! gen_conn_no_arg {
    ( $self:ident, $func:ident, $($variant:path,)+ ) => {
        match $self {
            $(
                $variant(c) => c.$func(),
            )+
        }
    };
}

macro_rules! gen_conn_trait_impl {
    ( $(($func:ident, $return:ty),)+ ) => {
        $(
            fn $func(&self) -> $return {
                gen_conn_no_arg!(
                    self,
                    $func,
                    Self::Ethernet,
                    Self::Wireless,
                    Self::Bond,
                    Self::Bridge,
                    Self::Vlan,
                    Self::InfiniBand,
                    Self::Tunnel,
                    Self::Dummy,
                    Self::Loopback,
                    Self::S390,
                )
            }
        )+
    }
}

macro_rules! gen_conn_trait_impl_mut {
    ( $(($func:ident, $return:ty),)+ ) => {
        $(
            fn $func(&mut self) -> $return {
                gen_conn_no_arg!(
                    self,
                    $func,
                    Self::Ethernet,
                    Self::Wireless,
                    Self::Bond,
                    Self::Bridge,
                    Self::Vlan,
                    Self::InfiniBand,
                    Self::Tunnel,
                    Self::Dummy,
                    Self::Loopback,
                    Self::S390,
                )
            }
        )+
    }
}

impl NicfgConnection for ConnectionConfig {
    gen_conn_trait_impl!(
        (is_virtual, bool),
        (base_conn, &BaseConnection),
        (ports, Option<Vec<&str>>),
        (parent, Option<&str>),
    );

    gen_conn_trait_impl_mut!(
        (base_conn_mut, &mut BaseConnection),
        (hide_secrets_conn_specific, ()),
    );

    fn rename_iface_refs(&mut self, old_name: &str, new_name: &str) {
        match self {
            Self::Ethernet(c) => c.rename_iface_refs(old_name, new_name),
            Self::Wireless(c) => c.rename_iface_refs(old_name, new_name),
            Self::Bond(c) => c.rename_iface_refs(old_name, new_name),
            Self::Bridge(c) => c.rename_iface_refs(old_name, new_name),
            Self::Vlan(c) => c.rename_iface_refs(old_name, new_name),
            Self::InfiniBand(c) => c.rename_iface_refs(old_name, new_name),
            Self::Tunnel(c) => c.rename_iface_refs(old_name, new_name),
            Self::Dummy(c) => c.rename_iface_refs(old_name, new_name),
            Self::Loopback(c) => c.rename_iface_refs(old_name, new_name),
            Self::S390(c) => c.rename_iface_refs(old_name, new_name),
        }
    }
}

impl ConnectionConfig {
    /// Create empty connection of specified type, `None` for unsupported
    /// types.
    pub fn new(name: &str, conn_type: &InterfaceType) -> Option<Self> {
        Some(match conn_type {
            InterfaceType::Ethernet => {
                Self::Ethernet(Box::new(EthernetConnection::new(name)))
            }
            InterfaceType::Wireless => {
                Self::Wireless(Box::new(WirelessConnection::new(name, "")))
            }
            InterfaceType::Bond => Self::Bond(Box::new(BondConnection::new(name))),
            InterfaceType::Bridge => {
                Self::Bridge(Box::new(BridgeConnection::new(name)))
            }
            InterfaceType::Vlan => {
                let mut conn = VlanConnection::default();
                conn.base.name = name.to_string();
                Self::Vlan(Box::new(conn))
            }
            InterfaceType::InfiniBand => {
                Self::InfiniBand(Box::new(InfiniBandConnection::new(name)))
            }
            InterfaceType::Tun => {
                Self::Tunnel(Box::new(TunnelConnection::new(name, false)))
            }
            InterfaceType::Tap => {
                Self::Tunnel(Box::new(TunnelConnection::new(name, true)))
            }
            InterfaceType::Dummy => {
                Self::Dummy(Box::new(DummyConnection::new(name)))
            }
            InterfaceType::Loopback => {
                Self::Loopback(Box::new(LoopbackConnection::new(name)))
            }
            t if t.is_s390() => {
                Self::S390(Box::new(S390Connection::new(name, t.clone())))
            }
            _ => return None,
        })
    }

    /// Wrap base settings into connection of type `base.conn_type`,
    /// `None` for unsupported types.
    pub fn from_base(base: BaseConnection) -> Option<Self> {
        let mut ret = Self::new(&base.name, &base.conn_type)?;
        *ret.base_conn_mut() = base;
        Some(ret)
    }
}
