// SPDX-License-Identifier: Apache-2.0

use crate::keyfile::key_file::KeyFile;

const CONTENT: &str = "[connection]\n\
    id=eth0\n\
    # comment kept\n\
    type=ethernet\n\
    \n\
    [ipv4]\n\
    method=auto\n\
    dns=192.0.2.53;;192.0.2.54;\n\
    \n\
    [vendor]\n\
    foo=bar\n";

#[test]
fn test_key_file_unchanged_round_trip() {
    assert_eq!(KeyFile::parse(CONTENT).to_string(), CONTENT);
}

#[test]
fn test_key_file_get() {
    let kf = KeyFile::parse(CONTENT);
    assert_eq!(kf.get("connection", "type"), Some("ethernet"));
    assert_eq!(kf.get("connection", "uuid"), None);
    assert_eq!(kf.get("missing", "id"), None);
    assert_eq!(kf.get_list("ipv4", "dns"), vec!["192.0.2.53", "192.0.2.54"]);
    assert_eq!(kf.keys("connection"), vec!["id", "type"]);
    assert!(kf.has_section("vendor"));
}

#[test]
fn test_key_file_get_typed() {
    let kf = KeyFile::parse(
        "[bridge]\nstp=TRUE\nforward-delay=abc\npriority=\n\
         [ethernet]\nmtu=1500\n",
    );
    assert_eq!(kf.get_bool("bridge", "stp"), Some(true));
    assert_eq!(kf.get_u32("bridge", "forward-delay"), None);
    assert_eq!(kf.get_non_empty("bridge", "priority"), None);
    assert_eq!(kf.get_u32("ethernet", "mtu"), Some(1500));
}

#[test]
fn test_key_file_set_and_remove() {
    let mut kf = KeyFile::parse(CONTENT);
    kf.set("connection", "id", "lan0");
    kf.set("connection", "uuid", "abc");
    kf.set_list("ipv4", "dns", &[]);
    kf.set_bool("ipv6", "may-fail", false);
    kf.remove_section("vendor");
    assert_eq!(
        kf.to_string(),
        "[connection]\n\
         id=lan0\n\
         # comment kept\n\
         type=ethernet\n\
         uuid=abc\n\
         \n\
         [ipv4]\n\
         method=auto\n\
         \n\
         [ipv6]\n\
         may-fail=false\n"
    );
}

#[test]
fn test_key_file_set_list() {
    let mut kf = KeyFile::default();
    kf.set_list("ipv4", "dns-search", &["a.org".into(), "b.org".into()]);
    assert_eq!(kf.get("ipv4", "dns-search"), Some("a.org;b.org;"));
}

#[test]
fn test_key_file_remove_matching() {
    let mut kf = KeyFile::parse(
        "[ipv4]\naddress1=192.0.2.1/24\nroute1=10.0.0.0/8\nmethod=manual\n",
    );
    kf.remove_matching("ipv4", |k| {
        k.starts_with("address") || k.starts_with("route")
    });
    assert_eq!(kf.to_string(), "[ipv4]\nmethod=manual\n");
}
