// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{BaseConnection, InterfaceType, JsonDisplay, NicfgConnection};

macro_rules! gen_base_only_conn {
    ($(#[$doc:meta])* $name:ident, $iface_type:expr, $is_virtual:expr) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
        )]
        #[serde(rename_all = "kebab-case")]
        #[non_exhaustive]
        pub struct $name {
            #[serde(flatten)]
            pub base: BaseConnection,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    base: BaseConnection {
                        conn_type: $iface_type,
                        ..Default::default()
                    },
                }
            }
        }

        impl $name {
            pub fn new(name: &str) -> Self {
                Self {
                    base: BaseConnection::new(name, $iface_type),
                }
            }
        }

        impl NicfgConnection for $name {
            fn base_conn(&self) -> &BaseConnection {
                &self.base
            }

            fn base_conn_mut(&mut self) -> &mut BaseConnection {
                &mut self.base
            }

            fn is_virtual(&self) -> bool {
                $is_virtual
            }
        }
    };
}

gen_base_only_conn!(
    /// Ethernet connection
    EthernetConnection,
    InterfaceType::Ethernet,
    false
);

gen_base_only_conn!(
    /// Dummy interface connection
    DummyConnection,
    InterfaceType::Dummy,
    true
);

gen_base_only_conn!(
    /// Loopback connection
    LoopbackConnection,
    InterfaceType::Loopback,
    false
);
