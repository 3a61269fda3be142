//! MAC header fields (C2): frame control, duration/ID, addressing, sequence
//! control, QoS control, HT control.

use indexmap::IndexMap;

use crate::bits::{bitmask_list, leastx, midx, mostx};
use crate::consts;
use crate::cursor::{Cursor, TruncatedBuffer};

/// A 6-byte hardware address, rendered lowercase colon-hex on output
/// (Std 8.2.4.3).
pub type HwAddr = [u8; 6];

pub fn hwaddr_to_string(addr: &HwAddr) -> String {
    addr.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

pub const BROADCAST: HwAddr = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff];

/// `{vers, type, subtype, flags}`, Std Figure 8-1/8-2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameControl {
    pub vers: u8,
    pub frame_type: u8,
    pub subtype: u8,
    pub flags: IndexMap<&'static str, bool>,
}

impl FrameControl {
    pub fn decode(fc0: u8, fc1: u8) -> Self {
        FrameControl {
            vers: leastx(2, fc0 as u32) as u8,
            frame_type: midx(2, 2, fc0 as u32) as u8,
            subtype: mostx(4, fc0 as u32) as u8,
            flags: bitmask_list(&consts::FC_FLAGS, fc1 as u32),
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn to_ds(&self) -> bool {
        self.flag("td")
    }

    pub fn from_ds(&self) -> bool {
        self.flag("fd")
    }

    pub fn protected(&self) -> bool {
        self.flag("pf")
    }

    pub fn order(&self) -> bool {
        self.flag("o")
    }

    pub fn type_desc(&self) -> &'static str {
        consts::FT_TYPES[self.frame_type as usize & 0x3]
    }

    pub fn subtype_desc(&self) -> &'static str {
        consts::subtype_name(self.frame_type, self.subtype)
    }
}

/// Duration/ID field, Std 8.2.4.4 — tri-state decode on bits 15/14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    Vcs { dur: u16 },
    Cfp,
    Aid { aid: u16 },
    Reserved,
}

impl Duration {
    pub fn decode(v: u16) -> Self {
        let b15 = (v >> 15) & 1;
        let b14 = (v >> 14) & 1;
        match (b15, b14) {
            (0, _) => Duration::Vcs { dur: v & 0x7FFF },
            (1, 0) if v == 32768 => Duration::Cfp,
            (1, 0) => Duration::Reserved,
            (1, 1) => {
                let aid = v & 0x1FFF;
                if aid <= 2007 {
                    Duration::Aid { aid }
                } else {
                    Duration::Reserved
                }
            }
            _ => Duration::Reserved,
        }
    }
}

/// `{fragno, seqno}`, Std Figure 8-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqCtrl {
    pub fragno: u8,
    pub seqno: u16,
}

impl SeqCtrl {
    pub fn decode(v: u16) -> Self {
        SeqCtrl {
            fragno: leastx(4, v as u32) as u8,
            seqno: mostx(4, v as u32) as u16,
        }
    }
}

/// How the QoS control msb octet should be reinterpreted. Selection depends
/// on direction and the EOSP bit, which is the caller's responsibility
/// (distilled spec §3 item 5) — the decoder only records the raw byte and
/// this hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QosMsbHint {
    AccessPointPsBufferState,
    TxopLimit,
    QueueSize,
    Mesh,
}

/// `{tid, eosp, ack-policy, a-msdu}` (lsb) plus a raw msb octet
/// ("txop") with context-dependent reinterpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosCtrl {
    pub tid: u8,
    pub eosp: bool,
    pub ack_policy: u8,
    pub a_msdu: bool,
    pub txop: u8,
    pub qos_msb_hint: QosMsbHint,
}

impl QosCtrl {
    pub fn decode(lsb: u8, msb: u8, from_ds: bool) -> Self {
        let eosp = midx(4, 1, lsb as u32) != 0;
        // Std Table 8-4: direction and the EOSP subfield together select
        // the msb octet's reinterpretation. `from_ds` alone only
        // distinguishes AP-sent from STA-sent; folding in `eosp`
        // reaches all four documented interpretations.
        let hint = match (from_ds, eosp) {
            (true, false) => QosMsbHint::AccessPointPsBufferState,
            (true, true) => QosMsbHint::QueueSize,
            (false, false) => QosMsbHint::TxopLimit,
            (false, true) => QosMsbHint::Mesh,
        };
        QosCtrl {
            tid: leastx(4, lsb as u32) as u8,
            eosp,
            ack_policy: midx(5, 2, lsb as u32) as u8,
            a_msdu: midx(7, 1, lsb as u32) != 0,
            txop: msb,
            qos_msb_hint: hint,
        }
    }
}

/// HT Control, Std Figure 8-5 — 32-bit field, decoded but never read from
/// the data/mgmt paths even when `flags.o == 1` (see DESIGN.md, Open
/// Question 1; the reference implementation exhibits the same behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtControl {
    pub lac_rsrv: u8,
    pub lac_trq: bool,
    pub lac_mai_mrq: bool,
    pub lac_mai_msi: u8,
    pub lac_mfsi: u8,
    pub lac_mfbasel_cmd: u8,
    pub lac_mfbasel_data: u8,
    pub calibration_pos: u8,
    pub calibration_seq: u8,
    pub rsrv1: u8,
    pub csi_steering: u8,
    pub rsrv2: bool,
    pub ndp_announcement: bool,
    pub rsrv3: u32,
    pub ac_constraint: bool,
    pub rdg_more_ppdu: bool,
}

impl HtControl {
    pub fn decode(v: u32) -> Self {
        HtControl {
            lac_rsrv: leastx(1, v) as u8,
            lac_trq: midx(1, 1, v) != 0,
            lac_mai_mrq: midx(2, 1, v) != 0,
            lac_mai_msi: midx(3, 3, v) as u8,
            lac_mfsi: midx(6, 3, v) as u8,
            lac_mfbasel_cmd: midx(9, 3, v) as u8,
            lac_mfbasel_data: midx(12, 4, v) as u8,
            calibration_pos: midx(16, 2, v) as u8,
            calibration_seq: midx(18, 2, v) as u8,
            rsrv1: midx(20, 2, v) as u8,
            csi_steering: midx(22, 2, v) as u8,
            rsrv2: midx(24, 1, v) != 0,
            ndp_announcement: midx(25, 1, v) != 0,
            rsrv3: midx(26, 4, v),
            ac_constraint: midx(30, 1, v) != 0,
            rdg_more_ppdu: midx(31, 1, v) != 0,
        }
    }
}

/// Shared `BarControl`/`BaControl` layout, Std Figure 8-18/8-20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaType {
    Basic,
    Compressed,
    Reserved,
    MultiTid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaBarControl {
    pub ack_policy: bool,
    pub multi_tid: bool,
    pub compressed_bm: bool,
    pub reserved: u16,
    pub tid_info: u8,
    pub ba_type: BaType,
}

impl BaBarControl {
    pub fn decode(v: u16) -> Self {
        let ack_policy = leastx(1, v as u32) != 0;
        let multi_tid = midx(1, 1, v as u32) != 0;
        let compressed_bm = midx(2, 1, v as u32) != 0;
        let ba_type = match (multi_tid, compressed_bm) {
            (false, false) => BaType::Basic,
            (false, true) => BaType::Compressed,
            (true, false) => BaType::Reserved,
            (true, true) => BaType::MultiTid,
        };
        BaBarControl {
            ack_policy,
            multi_tid,
            compressed_bm,
            reserved: midx(3, 9, v as u32) as u16,
            tid_info: mostx(12, v as u32) as u8,
            ba_type,
        }
    }
}

/// One `(per-tid-info, seqctrl)` record from a multi-TID BAR/BA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerTid {
    pub pertid_rsrv: u16,
    pub pertid_tid: u8,
    pub fragno: u8,
    pub seqno: u16,
}

impl PerTid {
    pub fn decode(pertid_info: u16, seqctrl: u16) -> Self {
        let sc = SeqCtrl::decode(seqctrl);
        PerTid {
            pertid_rsrv: leastx(12, pertid_info as u32) as u16,
            pertid_tid: mostx(12, pertid_info as u32) as u8,
            fragno: sc.fragno,
            seqno: sc.seqno,
        }
    }
}

pub fn read_addr(c: &mut Cursor<'_>) -> Result<HwAddr, TruncatedBuffer> {
    c.read_array::<6>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_control_decodes_ack() {
        // 0xD4 0x00 -> type=CTRL(1), subtype=ACK(13), vers=0, no flags.
        let fc = FrameControl::decode(0xD4, 0x00);
        assert_eq!(fc.vers, 0);
        assert_eq!(fc.frame_type, consts::FT_CTRL);
        assert_eq!(fc.subtype, consts::ST_CTRL_ACK);
        assert!(!fc.protected());
        assert!(!fc.to_ds());
    }

    #[test]
    fn duration_decodes_vcs() {
        assert_eq!(Duration::decode(0), Duration::Vcs { dur: 0 });
    }

    #[test]
    fn duration_decodes_aid() {
        // PS-Poll example from the distilled spec: AID=42.
        assert_eq!(Duration::decode(0xC02A), Duration::Aid { aid: 42 });
    }

    #[test]
    fn duration_decodes_cfp_and_reserved() {
        assert_eq!(Duration::decode(0x8000), Duration::Cfp);
        assert_eq!(Duration::decode(0x8001), Duration::Reserved);
    }

    #[test]
    fn hwaddr_formats_lowercase_colon_hex() {
        assert_eq!(hwaddr_to_string(&BROADCAST), "ff:ff:ff:ff:ff:ff");
    }

    #[test]
    fn ba_control_derives_type_from_bit_pair() {
        assert_eq!(BaBarControl::decode(0b000).ba_type, BaType::Basic);
        assert_eq!(BaBarControl::decode(0b100).ba_type, BaType::Compressed);
        assert_eq!(BaBarControl::decode(0b010).ba_type, BaType::Reserved);
        assert_eq!(BaBarControl::decode(0b110).ba_type, BaType::MultiTid);
    }

    #[test]
    fn qos_msb_hint_reaches_all_four_variants() {
        let eosp_bit = 1 << 4;
        assert_eq!(QosCtrl::decode(0, 0, true).qos_msb_hint, QosMsbHint::AccessPointPsBufferState);
        assert_eq!(QosCtrl::decode(eosp_bit, 0, true).qos_msb_hint, QosMsbHint::QueueSize);
        assert_eq!(QosCtrl::decode(0, 0, false).qos_msb_hint, QosMsbHint::TxopLimit);
        assert_eq!(QosCtrl::decode(eosp_bit, 0, false).qos_msb_hint, QosMsbHint::Mesh);
    }
}
