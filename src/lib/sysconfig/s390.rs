// SPDX-License-Identifier: Apache-2.0

use super::{handlers::SysconfigHandler, ifcfg::IfcfgFile};
use crate::{
    BaseConnection, ConnectionConfig, InterfaceType, Issues, NicfgConnection,
    S390Config, S390Connection, Sysroot,
};

const KEY_CHAN_IDS: &str = "CCW_CHAN_IDS";
const KEY_CHAN_MODE: &str = "CCW_CHAN_MODE";
const KEY_LAYER2: &str = "QETH_LAYER2";
const KEY_CTC_PROTOCOL: &str = "CTC_PROTOCOL";
const KEY_LCS_LANCMD_TIMEOUT: &str = "LCS_LANCMD_TIMEOUT";

pub(crate) struct S390Handler;

impl SysconfigHandler for S390Handler {
    fn read(
        &self,
        ifcfg: &IfcfgFile,
        base: BaseConnection,
        sysroot: &Sysroot,
        _issues: &mut Issues,
    ) -> ConnectionConfig {
        let vars = &ifcfg.vars;
        let mut s390 = S390Config::default();
        s390.set_channel_ids(vars.get(KEY_CHAN_IDS).unwrap_or_default());
        s390.port_number = vars.get_u32(KEY_CHAN_MODE);
        s390.protocol = vars.get_u32(KEY_CTC_PROTOCOL);
        s390.lancmd_timeout = vars.get_u32(KEY_LCS_LANCMD_TIMEOUT);
        match vars.get_bool(KEY_LAYER2) {
            Some(layer2) => s390.layer2 = layer2,
            None => {
                if base.conn_type == InterfaceType::Qeth
                    && !s390.read_channel.is_empty()
                {
                    query_qeth_attrs(sysroot, &mut s390);
                }
            }
        }
        ConnectionConfig::S390(Box::new(S390Connection { base, s390 }))
    }

    fn write(&self, conn: &ConnectionConfig, ifcfg: &mut IfcfgFile) {
        let ConnectionConfig::S390(conn) = conn else {
            return;
        };
        let s390 = &conn.s390;
        let vars = &mut ifcfg.vars;
        vars.set("INTERFACETYPE", conn.conn_type().as_str());
        vars.set(KEY_CHAN_IDS, &s390.channel_ids());
        vars.set_opt(
            KEY_CHAN_MODE,
            s390.port_number.map(|p| p.to_string()).as_deref(),
        );
        if matches!(conn.conn_type(), InterfaceType::Qeth | InterfaceType::Hsi)
        {
            vars.set_bool(KEY_LAYER2, s390.layer2);
        } else {
            vars.remove(KEY_LAYER2);
        }
        vars.set_opt(
            KEY_CTC_PROTOCOL,
            s390.protocol.map(|p| p.to_string()).as_deref(),
        );
        vars.set_opt(
            KEY_LCS_LANCMD_TIMEOUT,
            s390.lancmd_timeout.map(|p| p.to_string()).as_deref(),
        );
    }
}

/// Ask `lszdev` for the layer2 and port number attributes of the active
/// device. Failures only leave the defaults.
fn query_qeth_attrs(sysroot: &Sysroot, s390: &mut S390Config) {
    let output = match sysroot.executor.run(
        "lszdev",
        &[
            "qeth",
            s390.read_channel.as_str(),
            "--columns",
            "id,attr:layer2,attr:portno",
            "--no-headings",
        ],
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!(
                "Failed to query qeth device {}: {e}",
                s390.read_channel
            );
            return;
        }
    };
    if let Some(line) = output.lines().find(|l| !l.trim().is_empty()) {
        let mut columns = line.split_whitespace().skip(1);
        if let Some(layer2) = columns.next() {
            s390.layer2 = layer2 == "1" || layer2 == "yes";
        }
        if let Some(portno) = columns.next().and_then(|p| p.parse().ok()) {
            s390.port_number = Some(portno);
        }
    }
}
