// SPDX-License-Identifier: Apache-2.0

use crate::sysconfig::shell_file::ShellVarFile;

#[test]
fn test_shell_file_parse_quotes() {
    let vars = ShellVarFile::parse(
        "# comment\n\
         BOOTPROTO='static'\n\
         NAME=\"Uplink \\\"A\\\"\"\n\
         export MTU=1500 # trailing\n\
         ETHTOOL_OPTIONS=''\n\
         not a var\n",
    );
    assert_eq!(vars.get("BOOTPROTO"), Some("static"));
    assert_eq!(vars.get("NAME"), Some("Uplink \"A\""));
    assert_eq!(vars.get_u32("MTU"), Some(1500));
    assert_eq!(vars.get("ETHTOOL_OPTIONS"), Some(""));
    assert_eq!(vars.get_non_empty("ETHTOOL_OPTIONS"), None);
    assert_eq!(vars.get("not a var"), None);
}

#[test]
fn test_shell_file_last_assignment_wins() {
    let vars = ShellVarFile::parse("STARTMODE=auto\nSTARTMODE=manual\n");
    assert_eq!(vars.get("STARTMODE"), Some("manual"));
    assert_eq!(vars.keys(), vec!["STARTMODE"]);
}

#[test]
fn test_shell_file_bool() {
    let vars = ShellVarFile::parse("A=yes\nB=no\nC=on\nD=\n");
    assert_eq!(vars.get_bool("A"), Some(true));
    assert_eq!(vars.get_bool("B"), Some(false));
    assert_eq!(vars.get_bool("C"), Some(true));
    assert_eq!(vars.get_bool("D"), None);
    assert_eq!(vars.get_bool("E"), None);
}

#[test]
fn test_shell_file_keeps_untouched_lines() {
    let content = "# Managed by hand\nFOO=\"bar\"   # keep\nMTU=1400\n";
    let mut vars = ShellVarFile::parse(content);
    vars.set("MTU", "1400");
    assert_eq!(vars.to_string(), content);

    vars.set("MTU", "9000");
    vars.set("ZONE", "it's");
    assert_eq!(
        vars.to_string(),
        "# Managed by hand\nFOO=\"bar\"   # keep\nMTU='9000'\n\
         ZONE='it'\\''s'\n"
    );
}

#[test]
fn test_shell_file_suffixes_and_remove_prefixed() {
    let mut vars = ShellVarFile::parse(
        "IPADDR=192.0.2.1/24\nIPADDR_1=192.0.2.2/24\nIPADDR_x=192.0.2.3/24\n\
         BONDING_SLAVE0=eth0\n",
    );
    assert_eq!(vars.suffixes("IPADDR"), vec!["", "_1", "_x"]);
    assert!(vars.has_prefix("BONDING_"));
    vars.remove_prefixed("IPADDR");
    assert_eq!(vars.keys(), vec!["BONDING_SLAVE0"]);
}
