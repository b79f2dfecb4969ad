// SPDX-License-Identifier: Apache-2.0

use crate::{BootProtocol, ErrorKind, InterfaceType, Startmode};

#[test]
fn test_boot_protocol_names() {
    for bootproto in BootProtocol::ALL {
        assert_eq!(
            BootProtocol::from_name(bootproto.name()).unwrap(),
            bootproto
        );
    }
    assert_eq!(BootProtocol::from_name("DHCP").unwrap(), BootProtocol::Dhcp);
}

#[test]
fn test_boot_protocol_invalid() {
    let result = BootProtocol::from_name("dhcp+autoip");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_boot_protocol_family() {
    assert!(BootProtocol::Dhcp.has_dhcp4());
    assert!(BootProtocol::Dhcp.has_dhcp6());
    assert!(!BootProtocol::Dhcp4.has_dhcp6());
    assert!(!BootProtocol::Dhcp6.has_dhcp4());
    assert!(BootProtocol::Dhcp6.is_dhcp());
    assert!(!BootProtocol::Static.is_dhcp());
}

#[test]
fn test_startmode_aliases() {
    for name in ["auto", "onboot", "on", "boot"] {
        assert_eq!(Startmode::from_name(name).unwrap(), Startmode::Auto);
    }
    assert_eq!(
        Startmode::from_name("ifplugd").unwrap(),
        Startmode::Ifplugd { priority: 0 }
    );
    assert!(Startmode::from_name("sometimes").is_err());
}

#[test]
fn test_startmode_equality_by_priority() {
    assert_ne!(
        Startmode::Ifplugd { priority: 1 },
        Startmode::Ifplugd { priority: 2 }
    );
    assert_eq!(
        Startmode::Ifplugd { priority: 3 },
        Startmode::Ifplugd { priority: 3 }
    );
    assert_eq!(Startmode::Ifplugd { priority: 3 }.to_string(), "ifplugd(3)");
}

#[test]
fn test_startmode_serde() {
    let mode: Startmode = serde_yaml::from_str(
        r"---
name: ifplugd
priority: 10",
    )
    .unwrap();
    assert_eq!(mode, Startmode::Ifplugd { priority: 10 });
    let mode: Startmode = serde_yaml::from_str("name: off").unwrap();
    assert_eq!(mode, Startmode::Off);
}

#[test]
fn test_iface_type_unknown() {
    let iface_type: InterfaceType = serde_yaml::from_str("wireguard").unwrap();
    assert_eq!(iface_type, InterfaceType::Unknown("wireguard".into()));
    assert!(iface_type.is_unknown());
    let iface_type: InterfaceType = serde_yaml::from_str("qeth").unwrap();
    assert!(iface_type.is_s390());
}
