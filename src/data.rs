//! C5: data-frame 3rd/4th-address and QoS decoding.
//!
//! `addr2`, `addr3` and `seqctrl` are always read by the caller before
//! reaching this module (the distilled spec's per-subtype table is uniform
//! there); this module only carries the two *conditional* extensions:
//! the 4th address (ToDS ∧ FromDS) and QoS Control (subtype ≥ QOS_DATA).
//! HT Control is deliberately not read here — see DESIGN.md, Open
//! Question 1.

/// Marker describing which of the two optional data-frame extensions were
/// present; the actual decoded values live on [`crate::record::MpduRecord`]
/// (`addr4`, `qos`) since they are shared with the header proper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataBody {
    pub has_addr4: bool,
    pub has_qos: bool,
}

use crate::consts;
use crate::cursor::Cursor;
use crate::header::QosCtrl;
use crate::record::MpduRecord;

/// Reads `addr2|addr3|seqctrl`, the conditional 4th address, and the
/// conditional QoS Control field (distilled spec §4.5). HT Control is
/// deliberately never read here, even when `flags.o == 1` — see
/// DESIGN.md, Open Question 1.
pub fn decode<'a>(c: &mut Cursor<'a>, record: &mut MpduRecord<'a>) {
    let addr2 = match c.read_array() {
        Ok(a) => a,
        Err(e) => {
            record.push_fault("data.addr2", format!("{:?}", e));
            return;
        }
    };
    record.addr2 = Some(addr2);
    record.mark_present("addr2");

    let addr3 = match c.read_array() {
        Ok(a) => a,
        Err(e) => {
            record.push_fault("data.addr3", format!("{:?}", e));
            return;
        }
    };
    record.addr3 = Some(addr3);
    record.mark_present("addr3");

    let seqctrl = match c.read_u16() {
        Ok(v) => v,
        Err(e) => {
            record.push_fault("data.seqctrl", format!("{:?}", e));
            return;
        }
    };
    record.seqctrl = Some(crate::header::SeqCtrl::decode(seqctrl));
    record.mark_present("seqctrl");

    let fc = record.framectrl.as_ref().expect("data path requires framectrl");
    let mut body = DataBody::default();

    if fc.to_ds() && fc.from_ds() {
        match c.read_array() {
            Ok(addr4) => {
                record.addr4 = Some(addr4);
                record.mark_present("addr4");
                body.has_addr4 = true;
            }
            Err(e) => record.push_fault("data.addr4", format!("{:?}", e)),
        }
    }

    if (consts::ST_DATA_QOS_DATA..=consts::ST_DATA_QOS_CFACK_CFPOLL).contains(&record.subtype().unwrap_or(0)) {
        match c.read_u16() {
            Ok(v) => {
                let lsb = (v & 0xff) as u8;
                let msb = (v >> 8) as u8;
                record.qos = Some(QosCtrl::decode(lsb, msb, fc.from_ds()));
                record.mark_present("qos");
                body.has_qos = true;
            }
            Err(e) => record.push_fault("data.qos", format!("{:?}", e)),
        }
    }

    record.body = Some(crate::record::FrameBody::Data(body));
}
