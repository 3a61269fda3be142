//! C4: control-frame variant decoder (RTS/CTS/ACK/PS-Poll/CF-End(+CF-Ack),
//! BAR/BA basic/compressed/multi-TID, Control Wrapper).

use crate::header::{BaBarControl, BaType, HwAddr, PerTid};

/// Block Ack Request info, variant-dependent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarInfo {
    Basic { fragno: u8, seqno: u16 },
    Compressed { fragno: u8, seqno: u16 },
    /// `(multi-tid, compressed-bm) == (1, 0)`: undefined by the standard;
    /// the remainder is kept opaque.
    Reserved { unparsed: Vec<u8> },
    MultiTid { tids: Vec<PerTid> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAckReq {
    pub addr2: HwAddr,
    pub barctrl: BaBarControl,
    pub barinfo: BarInfo,
}

/// Block Ack info: same control layout as BAR, with a trailing bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaInfo {
    /// Fixed at 128 opaque bytes, matching the source exactly even though
    /// the standard permits negotiated sizes (distilled spec §9, Open
    /// Question 4).
    Basic { fragno: u8, seqno: u16, bitmap: Vec<u8> },
    Compressed { fragno: u8, seqno: u16, bitmap: [u8; 8] },
    Reserved { unparsed: Vec<u8> },
    MultiTid { tids: Vec<(PerTid, [u8; 8])> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAck {
    pub addr2: HwAddr,
    pub bactrl: BaBarControl,
    pub bainfo: BaInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlWrapper<'a> {
    pub carried_framectrl: u16,
    pub htc: u32,
    pub carried_frame: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtrlBody<'a> {
    /// CTS, ACK: no additional fields.
    NoFields,
    /// RTS, PS-Poll, CF-End, CF-End+CF-Ack: just `addr2`.
    Addr2(HwAddr),
    BlockAckReq(BlockAckReq),
    BlockAck(BlockAck),
    Wrapper(ControlWrapper<'a>),
    /// Any other subtype: `ctrl: invalid subtype` is appended to `err`
    /// (distilled spec §4.4, last row) and no fields are decoded.
    Invalid,
}

/// Fixed at 128 bytes in the source, even though the standard permits
/// negotiated Block Ack buffer sizes (distilled spec §9, Open Question 4).
pub const BASIC_BA_BITMAP_LEN: usize = 128;

use crate::consts;
use crate::cursor::Cursor;
use crate::error::Fault;
use crate::record::MpduRecord;

fn decode_barinfo(c: &mut Cursor<'_>, barctrl: &BaBarControl) -> Result<BarInfo, Fault> {
    match barctrl.ba_type {
        BaType::Basic => {
            let seqctrl = c
                .read_u16()
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack-req.barinfo", format!("{:?}", e)))?;
            let sc = crate::header::SeqCtrl::decode(seqctrl);
            Ok(BarInfo::Basic { fragno: sc.fragno, seqno: sc.seqno })
        }
        BaType::Compressed => {
            let seqctrl = c
                .read_u16()
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack-req.barinfo", format!("{:?}", e)))?;
            let sc = crate::header::SeqCtrl::decode(seqctrl);
            Ok(BarInfo::Compressed { fragno: sc.fragno, seqno: sc.seqno })
        }
        BaType::Reserved => Ok(BarInfo::Reserved { unparsed: c.rest().to_vec() }),
        BaType::MultiTid => {
            let mut tids = Vec::with_capacity(barctrl.tid_info as usize + 1);
            for _ in 0..=barctrl.tid_info {
                let pertid_info = c.read_u16().map_err(|e| {
                    Fault::new("ctrl.ctrl-block-ack-req.barinfo.tids", format!("{:?}", e))
                })?;
                let seqctrl = c.read_u16().map_err(|e| {
                    Fault::new("ctrl.ctrl-block-ack-req.barinfo.tids", format!("{:?}", e))
                })?;
                tids.push(PerTid::decode(pertid_info, seqctrl));
            }
            Ok(BarInfo::MultiTid { tids })
        }
    }
}

fn decode_bainfo(c: &mut Cursor<'_>, bactrl: &BaBarControl) -> Result<BaInfo, Fault> {
    match bactrl.ba_type {
        BaType::Basic => {
            let seqctrl = c
                .read_u16()
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo", format!("{:?}", e)))?;
            let sc = crate::header::SeqCtrl::decode(seqctrl);
            let bitmap = c
                .read_slice(BASIC_BA_BITMAP_LEN)
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo", format!("{:?}", e)))?
                .to_vec();
            Ok(BaInfo::Basic { fragno: sc.fragno, seqno: sc.seqno, bitmap })
        }
        BaType::Compressed => {
            let seqctrl = c
                .read_u16()
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo", format!("{:?}", e)))?;
            let sc = crate::header::SeqCtrl::decode(seqctrl);
            let bitmap: [u8; 8] = c
                .read_array()
                .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo", format!("{:?}", e)))?;
            Ok(BaInfo::Compressed { fragno: sc.fragno, seqno: sc.seqno, bitmap })
        }
        BaType::Reserved => Ok(BaInfo::Reserved { unparsed: c.rest().to_vec() }),
        BaType::MultiTid => {
            let mut tids = Vec::with_capacity(bactrl.tid_info as usize + 1);
            for _ in 0..=bactrl.tid_info {
                let pertid_info = c
                    .read_u16()
                    .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo.tids", format!("{:?}", e)))?;
                let seqctrl = c
                    .read_u16()
                    .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bainfo.tids", format!("{:?}", e)))?;
                let bitmap: [u8; 8] = c.read_array().map_err(|e| {
                    Fault::new("ctrl.ctrl-block-ack.bainfo.tids", format!("{:?}", e))
                })?;
                tids.push((PerTid::decode(pertid_info, seqctrl), bitmap));
            }
            Ok(BaInfo::MultiTid { tids })
        }
    }
}

/// Dispatches on `framectrl.subtype` (distilled spec §4.4).
pub fn decode<'a>(c: &mut Cursor<'a>, record: &mut MpduRecord<'a>) {
    let subtype = record.subtype().unwrap_or(0);
    let body = match subtype {
        consts::ST_CTRL_CTS | consts::ST_CTRL_ACK => CtrlBody::NoFields,
        consts::ST_CTRL_RTS
        | consts::ST_CTRL_PS_POLL
        | consts::ST_CTRL_CF_END
        | consts::ST_CTRL_CF_END_CF_ACK => match c.read_array() {
            Ok(addr2) => {
                record.addr2 = Some(addr2);
                record.mark_present("addr2");
                CtrlBody::Addr2(addr2)
            }
            Err(e) => {
                record.push_fault(
                    format!("ctrl.{}", consts::subtype_name(consts::FT_CTRL, subtype)),
                    format!("addr2: {:?}", e),
                );
                return;
            }
        },
        consts::ST_CTRL_BLOCK_ACK_REQ => match decode_block_ack_req(c) {
            Ok(bar) => CtrlBody::BlockAckReq(bar),
            Err(fault) => {
                record.err.push(fault);
                return;
            }
        },
        consts::ST_CTRL_BLOCK_ACK => match decode_block_ack(c) {
            Ok(ba) => CtrlBody::BlockAck(ba),
            Err(fault) => {
                record.err.push(fault);
                return;
            }
        },
        consts::ST_CTRL_WRAPPER => match decode_wrapper(c) {
            Ok(wrapper) => CtrlBody::Wrapper(wrapper),
            Err(fault) => {
                record.err.push(fault);
                return;
            }
        },
        _ => {
            record.push_fault("ctrl", "invalid subtype");
            CtrlBody::Invalid
        }
    };
    record.mark_present("ctrl-body");
    record.body = Some(crate::record::FrameBody::Ctrl(body));
}

fn decode_block_ack_req(c: &mut Cursor<'_>) -> Result<BlockAckReq, Fault> {
    let addr2 = c
        .read_array()
        .map_err(|e| Fault::new("ctrl.ctrl-block-ack-req.addr2", format!("{:?}", e)))?;
    let raw = c
        .read_u16()
        .map_err(|e| Fault::new("ctrl.ctrl-block-ack-req.barctrl", format!("{:?}", e)))?;
    let barctrl = BaBarControl::decode(raw);
    let barinfo = decode_barinfo(c, &barctrl)?;
    Ok(BlockAckReq { addr2, barctrl, barinfo })
}

fn decode_block_ack(c: &mut Cursor<'_>) -> Result<BlockAck, Fault> {
    let addr2 = c
        .read_array()
        .map_err(|e| Fault::new("ctrl.ctrl-block-ack.addr2", format!("{:?}", e)))?;
    let raw = c
        .read_u16()
        .map_err(|e| Fault::new("ctrl.ctrl-block-ack.bactrl", format!("{:?}", e)))?;
    let bactrl = BaBarControl::decode(raw);
    let bainfo = decode_bainfo(c, &bactrl)?;
    Ok(BlockAck { addr2, bactrl, bainfo })
}

fn decode_wrapper<'a>(c: &mut Cursor<'a>) -> Result<ControlWrapper<'a>, Fault> {
    let carried_framectrl = c
        .read_u16()
        .map_err(|e| Fault::new("ctrl.ctrl-wrapper.carriedframectrl", format!("{:?}", e)))?;
    let htc = c
        .read_u32()
        .map_err(|e| Fault::new("ctrl.ctrl-wrapper.htc", format!("{:?}", e)))?;
    let carried_frame = c.rest();
    Ok(ControlWrapper { carried_framectrl, htc, carried_frame })
}
