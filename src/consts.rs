//! Numeric constant tables. Per the distilled spec §1/§6 these are input
//! data, not core parsing logic; they are reproduced verbatim from
//! `itamae.ieee80211` so that decoders and callers can name them instead of
//! hard-coding magic numbers.

/// Frame-control `type` field values.
pub const FT_MGMT: u8 = 0;
pub const FT_CTRL: u8 = 1;
pub const FT_DATA: u8 = 2;
pub const FT_RSRV: u8 = 3;

pub const FT_TYPES: [&str; 4] = ["mgmt", "ctrl", "data", "rsrv"];

pub const ST_MGMT_TYPES: [&str; 16] = [
    "assoc-req",
    "assoc-resp",
    "reassoc-req",
    "reassoc-resp",
    "probe-req",
    "probe-resp",
    "timing-adv",
    "rsrv-7",
    "beacon",
    "atim",
    "disassoc",
    "auth",
    "deauth",
    "action",
    "action-noack",
    "rsrv-15",
];

pub const ST_MGMT_ASSOC_REQ: u8 = 0;
pub const ST_MGMT_ASSOC_RESP: u8 = 1;
pub const ST_MGMT_REASSOC_REQ: u8 = 2;
pub const ST_MGMT_REASSOC_RESP: u8 = 3;
pub const ST_MGMT_PROBE_REQ: u8 = 4;
pub const ST_MGMT_PROBE_RESP: u8 = 5;
pub const ST_MGMT_TIMING_ADV: u8 = 6;
pub const ST_MGMT_BEACON: u8 = 8;
pub const ST_MGMT_ATIM: u8 = 9;
pub const ST_MGMT_DISASSOC: u8 = 10;
pub const ST_MGMT_AUTH: u8 = 11;
pub const ST_MGMT_DEAUTH: u8 = 12;
pub const ST_MGMT_ACTION: u8 = 13;
pub const ST_MGMT_ACTION_NOACK: u8 = 14;

pub const ST_CTRL_TYPES: [&str; 16] = [
    "ctrl-rsrv-0",
    "ctrl-rsrv-1",
    "ctrl-rsrv-2",
    "ctrl-rsrv-3",
    "ctrl-rsrv-4",
    "ctrl-rsrv-5",
    "ctrl-rsrv-6",
    "wrapper",
    "block-ack-req",
    "block-ack",
    "ps-poll",
    "rts",
    "cts",
    "ack",
    "cf-end",
    "cf-end-cf-ack",
];

pub const ST_CTRL_WRAPPER: u8 = 7;
pub const ST_CTRL_BLOCK_ACK_REQ: u8 = 8;
pub const ST_CTRL_BLOCK_ACK: u8 = 9;
pub const ST_CTRL_PS_POLL: u8 = 10;
pub const ST_CTRL_RTS: u8 = 11;
pub const ST_CTRL_CTS: u8 = 12;
pub const ST_CTRL_ACK: u8 = 13;
pub const ST_CTRL_CF_END: u8 = 14;
pub const ST_CTRL_CF_END_CF_ACK: u8 = 15;

pub const ST_DATA_TYPES: [&str; 16] = [
    "data",
    "cfack",
    "cfpoll",
    "cfack-cfpoll",
    "null",
    "null-cfack",
    "null-cfpoll",
    "null-cfack-cfpoll",
    "qos-data",
    "qos-data-cfack",
    "qos-data-cfpoll",
    "qos-data-cfack-cfpoll",
    "qos-null",
    "rsrv-13",
    "qos-cfpoll",
    "qos-cfack-cfpoll",
];

pub const ST_DATA_QOS_DATA: u8 = 8;
pub const ST_DATA_QOS_CFACK_CFPOLL: u8 = 15;

/// `data`-frame subtype bitmask: each bit toggles a modification of the
/// base data frame (Std 8.2.4.1.3).
pub const DATA_SUBTYPE_FIELDS: [(&str, u32); 4] = [
    ("cf-ack", 1 << 0),
    ("cf-poll", 1 << 1),
    ("no-body", 1 << 2),
    ("qos", 1 << 3),
];

pub fn subtype_name(frame_type: u8, subtype: u8) -> &'static str {
    match frame_type {
        FT_MGMT => ST_MGMT_TYPES[subtype as usize & 0xf],
        FT_CTRL => ST_CTRL_TYPES[subtype as usize & 0xf],
        FT_DATA => ST_DATA_TYPES[subtype as usize & 0xf],
        _ => "rsrv",
    }
}

/// Frame-control flag octet (`fc1`), Std Figure 8-2.
pub const FC_FLAGS: [(&str, u32); 8] = [
    ("td", 1 << 0),
    ("fd", 1 << 1),
    ("mf", 1 << 2),
    ("r", 1 << 3),
    ("pm", 1 << 4),
    ("md", 1 << 5),
    ("pf", 1 << 6),
    ("o", 1 << 7),
];

/// Capability Information bitmap, Std Figure 8-34.
pub const CAP_INFO: [(&str, u32); 16] = [
    ("ess", 1 << 0),
    ("ibss", 1 << 1),
    ("cfpollable", 1 << 2),
    ("cf-poll-req", 1 << 3),
    ("privacy", 1 << 4),
    ("short-pre", 1 << 5),
    ("pbcc", 1 << 6),
    ("ch-agility", 1 << 7),
    ("spec-mgmt", 1 << 8),
    ("qos", 1 << 9),
    ("time-slot", 1 << 10),
    ("apsd", 1 << 11),
    ("rdo-meas", 1 << 12),
    ("dsss-ofdm", 1 << 13),
    ("delayed-ba", 1 << 14),
    ("immediate-ba", 1 << 15),
];

/// ERP Information bitmap, element 42.
pub const ERP_INFO: [(&str, u32); 3] = [
    ("non-erp", 1 << 0),
    ("use-protect", 1 << 1),
    ("barker", 1 << 2),
];

/// Element IDs, `itamae.ieee80211.EID_*`, preserved verbatim.
pub mod eid {
    pub const SSID: u8 = 0;
    pub const SUPPORTED_RATES: u8 = 1;
    pub const FH: u8 = 2;
    pub const DSSS: u8 = 3;
    pub const CF: u8 = 4;
    pub const TIM: u8 = 5;
    pub const IBSS: u8 = 6;
    pub const COUNTRY: u8 = 7;
    pub const HOP_PARAMS: u8 = 8;
    pub const HOP_TABLE: u8 = 9;
    pub const REQUEST: u8 = 10;
    pub const BSS_LOAD: u8 = 11;
    pub const EDCA: u8 = 12;
    pub const TSPEC: u8 = 13;
    pub const TCLAS: u8 = 14;
    pub const SCHED: u8 = 15;
    pub const CHALLENGE: u8 = 16;
    pub const PWR_CONSTRAINT: u8 = 32;
    pub const PWR_CAPABILITY: u8 = 33;
    pub const TPC_REQ: u8 = 34;
    pub const TPC_RPT: u8 = 35;
    pub const CHANNELS: u8 = 36;
    pub const CH_SWITCH: u8 = 37;
    pub const MSMT_REQ: u8 = 38;
    pub const MSMT_RPT: u8 = 39;
    pub const QUIET: u8 = 40;
    pub const IBSS_DFS: u8 = 41;
    pub const ERP: u8 = 42;
    pub const TS_DELAY: u8 = 43;
    pub const TCLAS_PRO: u8 = 44;
    pub const HT_CAP: u8 = 45;
    pub const QOS_CAP: u8 = 46;
    pub const RSNE: u8 = 48;
    pub const EXTENDED_RATES: u8 = 50;
    pub const AP_CH_RPT: u8 = 51;
    pub const NEIGHBOR_RPT: u8 = 52;
    pub const RCPI: u8 = 53;
    pub const MDE: u8 = 54;
    pub const FTE: u8 = 55;
    pub const TIE: u8 = 56;
    pub const RDE: u8 = 57;
    pub const DSE_REG_LOC: u8 = 58;
    pub const OP_CLASSES: u8 = 59;
    pub const EXT_CH_SWITCH: u8 = 60;
    pub const HT_OP: u8 = 61;
    pub const SEC_CH_OFFSET: u8 = 62;
    pub const BSS_AVG_DELAY: u8 = 63;
    pub const ANTENNA: u8 = 64;
    pub const RSNI: u8 = 65;
    pub const MSMT_PILOT: u8 = 66;
    pub const BSS_AVAIL: u8 = 67;
    pub const BSS_AC_DELAY: u8 = 68;
    pub const TIME_ADV: u8 = 69;
    pub const RM_ENABLED: u8 = 70;
    pub const MULT_BSSID: u8 = 71;
    pub const COEXIST_20_40: u8 = 72;
    pub const INTOLERANT_20_40: u8 = 73;
    pub const OVERLAPPING_BSS: u8 = 74;
    pub const RIC_DESC: u8 = 75;
    pub const MGMT_MIC: u8 = 76;
    pub const EVENT_REQ: u8 = 78;
    pub const EVENT_RPT: u8 = 79;
    pub const DIAG_REQ: u8 = 80;
    pub const DIAG_RPT: u8 = 81;
    pub const LOCATION: u8 = 82;
    pub const NONTRANS_BSS: u8 = 83;
    pub const SSID_LIST: u8 = 84;
    pub const MULT_BSSID_INDEX: u8 = 85;
    pub const FMS_DESC: u8 = 86;
    pub const FMS_REQ: u8 = 87;
    pub const FMS_RESP: u8 = 88;
    pub const QOS_TRAFFIC_CAP: u8 = 89;
    pub const BSS_MAX_IDLE: u8 = 90;
    pub const TFS_REQ: u8 = 91;
    pub const TFS_RESP: u8 = 92;
    pub const WNM_SLEEP: u8 = 93;
    pub const TIM_REQ: u8 = 94;
    pub const TIM_RESP: u8 = 95;
    pub const COLLOCATED_INTERFERENCE: u8 = 96;
    pub const CH_USAGE: u8 = 97;
    pub const TIME_ZONE: u8 = 98;
    pub const DMS_REQ: u8 = 99;
    pub const DMS_RESP: u8 = 100;
    pub const LINK_ID: u8 = 101;
    pub const WAKEUP_SCHED: u8 = 102;
    pub const CH_SWITCH_TIMING: u8 = 104;
    pub const PTI_CTRL: u8 = 105;
    pub const TPU_BUFF_STATUS: u8 = 106;
    pub const INTERWORKING: u8 = 107;
    pub const ADV_PROTOCOL: u8 = 108;
    pub const EXPEDITED_BW_REQ: u8 = 109;
    pub const QOS_MAP_SET: u8 = 110;
    pub const ROAMING_CONS: u8 = 111;
    pub const EMERGENCY_ALERT_ID: u8 = 112;
    pub const MESH_CONFIG: u8 = 113;
    pub const MESH_ID: u8 = 114;
    pub const MESH_LINK_METRIC_RPT: u8 = 115;
    pub const CONGESTION: u8 = 116;
    pub const MESH_PEERING_MGMT: u8 = 117;
    pub const MESH_CH_SWITCH_PARAM: u8 = 118;
    pub const MESH_AWAKE_WIN: u8 = 119;
    pub const BEACON_TIMING: u8 = 120;
    pub const MCCAOP_SETUP_REQ: u8 = 121;
    pub const MCCAOP_SETUP_REP: u8 = 122;
    pub const MCCAOP_ADV: u8 = 123;
    pub const MCCAOP_TEARDOWN: u8 = 124;
    pub const GANN: u8 = 125;
    pub const RANN: u8 = 126;
    pub const EXT_CAP: u8 = 127;
    pub const PREQ: u8 = 130;
    pub const PREP: u8 = 131;
    pub const PERR: u8 = 132;
    pub const PXU: u8 = 137;
    pub const PXUC: u8 = 138;
    pub const AUTH_MESH_PEER_EXC: u8 = 139;
    pub const MIC: u8 = 140;
    pub const DEST_URI: u8 = 141;
    pub const UAPSD_COEXIST: u8 = 142;
    pub const MCCAOP_ADV_OVERVIEW: u8 = 174;
    pub const VEND_SPEC: u8 = 221;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_name_resolves_per_type() {
        assert_eq!(subtype_name(FT_CTRL, ST_CTRL_ACK), "ack");
        assert_eq!(subtype_name(FT_DATA, ST_DATA_QOS_DATA), "qos-data");
        assert_eq!(subtype_name(FT_RSRV, 0), "rsrv");
    }
}
