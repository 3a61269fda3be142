//! Management-frame subtype state machine (C6 + C7 + C8): fixed parameters,
//! then the Information-Element stream.

pub mod eid;
pub mod fixed;
pub mod ie;

use indexmap::IndexMap;

use crate::consts;
use crate::cursor::Cursor;
use crate::error::Fault;
use crate::header::HwAddr;
use crate::record::MpduRecord;
use fixed::{mask_aid, Capability, FixedParams};
use ie::Element;

/// Reads `addr2|addr3|seqctrl` (unconditional for every management
/// subtype) then dispatches on `subtype` to read the fixed-parameter
/// block, and finally walks the Information-Element stream.
pub fn decode<'a>(c: &mut Cursor<'a>, record: &mut MpduRecord<'a>) {
    let addr2: HwAddr = match c.read_array() {
        Ok(a) => a,
        Err(e) => {
            record.push_fault("mgmt.addr2", format!("{:?}", e));
            return;
        }
    };
    record.addr2 = Some(addr2);
    record.mark_present("addr2");

    let addr3: HwAddr = match c.read_array() {
        Ok(a) => a,
        Err(e) => {
            record.push_fault("mgmt.addr3", format!("{:?}", e));
            return;
        }
    };
    record.addr3 = Some(addr3);
    record.mark_present("addr3");

    let seqctrl = match c.read_u16() {
        Ok(v) => v,
        Err(e) => {
            record.push_fault("mgmt.seqctrl", format!("{:?}", e));
            return;
        }
    };
    record.seqctrl = Some(crate::header::SeqCtrl::decode(seqctrl));
    record.mark_present("seqctrl");

    let subtype = record.subtype().unwrap_or(0);
    let subtype_name = consts::ST_MGMT_TYPES[subtype as usize & 0xf];

    let fixed_params = match decode_fixed_params(c, subtype) {
        Ok(fp) => fp,
        Err(fault) => {
            log::warn!("mgmt: fixed-params decode failed for subtype {subtype}: {fault}");
            record.err.push(fault);
            return;
        }
    };
    record.mark_present("fixed-params");

    let mut ie_err = Vec::new();
    let info_elements = ie::decode_elements(c, &mut ie_err);
    record.err.extend(ie_err);
    if !info_elements.is_empty() {
        record.mark_present("info-elements");
    }

    let _ = subtype_name;
    record.body = Some(crate::record::FrameBody::Mgmt { fixed_params, info_elements });
}

fn read_u64(c: &mut Cursor<'_>, location: &'static str) -> Result<u64, Fault> {
    c.read_u64().map_err(|e| Fault::new(location, format!("{:?}", e)))
}

fn read_u16(c: &mut Cursor<'_>, location: &'static str) -> Result<u16, Fault> {
    c.read_u16().map_err(|e| Fault::new(location, format!("{:?}", e)))
}

fn read_u8(c: &mut Cursor<'_>, location: &'static str) -> Result<u8, Fault> {
    c.read_u8().map_err(|e| Fault::new(location, format!("{:?}", e)))
}

fn decode_fixed_params<'a>(c: &mut Cursor<'a>, subtype: u8) -> Result<FixedParams<'a>, Fault> {
    use consts::*;
    Ok(match subtype {
        ST_MGMT_ASSOC_REQ => FixedParams::AssocReq {
            capability: Capability::decode(read_u16(c, "mgmt.assoc-req.capability")?),
            listen_interval: read_u16(c, "mgmt.assoc-req.listen-interval")?,
        },
        ST_MGMT_ASSOC_RESP => FixedParams::AssocResp {
            capability: Capability::decode(read_u16(c, "mgmt.assoc-resp.capability")?),
            status_code: read_u16(c, "mgmt.assoc-resp.status-code")?,
            aid: mask_aid(read_u16(c, "mgmt.assoc-resp.aid")?),
        },
        ST_MGMT_REASSOC_REQ => FixedParams::ReassocReq {
            capability: Capability::decode(read_u16(c, "mgmt.reassoc-req.capability")?),
            listen_interval: read_u16(c, "mgmt.reassoc-req.listen-interval")?,
            current_ap: c
                .read_array()
                .map_err(|e| Fault::new("mgmt.reassoc-req.current-ap", format!("{:?}", e)))?,
        },
        ST_MGMT_REASSOC_RESP => FixedParams::ReassocResp {
            capability: Capability::decode(read_u16(c, "mgmt.reassoc-resp.capability")?),
            status_code: read_u16(c, "mgmt.reassoc-resp.status-code")?,
            aid: mask_aid(read_u16(c, "mgmt.reassoc-resp.aid")?),
        },
        ST_MGMT_PROBE_REQ => FixedParams::ProbeReq,
        ST_MGMT_TIMING_ADV => FixedParams::TimingAdv {
            timestamp: read_u64(c, "mgmt.timing-adv.timestamp")?,
            capability: Capability::decode(read_u16(c, "mgmt.timing-adv.capability")?),
        },
        ST_MGMT_PROBE_RESP => FixedParams::ProbeResp {
            timestamp: read_u64(c, "mgmt.probe-resp.timestamp")?,
            beacon_interval_us: beacon_interval_us(read_u16(c, "mgmt.probe-resp.beacon-int")?),
            capability: Capability::decode(read_u16(c, "mgmt.probe-resp.capability")?),
        },
        ST_MGMT_BEACON => FixedParams::Beacon {
            timestamp: read_u64(c, "mgmt.beacon.timestamp")?,
            beacon_interval_us: beacon_interval_us(read_u16(c, "mgmt.beacon.beacon-int")?),
            capability: Capability::decode(read_u16(c, "mgmt.beacon.capability")?),
        },
        ST_MGMT_DISASSOC => FixedParams::Disassoc {
            reason_code: read_u16(c, "mgmt.disassoc.reason-code")?,
        },
        ST_MGMT_AUTH => FixedParams::Auth {
            algorithm_no: read_u16(c, "mgmt.auth.algorithm-no")?,
            auth_seq: read_u16(c, "mgmt.auth.auth-seq")?,
            status_code: read_u16(c, "mgmt.auth.status-code")?,
        },
        ST_MGMT_DEAUTH => FixedParams::Deauth {
            reason_code: read_u16(c, "mgmt.deauth.reason-code")?,
        },
        ST_MGMT_ACTION => FixedParams::Action {
            category: read_u8(c, "mgmt.action.category")?,
            action: read_u8(c, "mgmt.action.action")?,
            action_el: c.rest(),
        },
        ST_MGMT_ACTION_NOACK => FixedParams::ActionNoAck {
            category: read_u8(c, "mgmt.action-noack.category")?,
            action: read_u8(c, "mgmt.action-noack.action")?,
            action_el: c.rest(),
        },
        // ATIM (9) and reserved subtypes 7/15.
        _ => FixedParams::None,
    })
}

/// Beacon interval is expressed in TU (1024 microseconds); output is
/// multiplied to express microseconds directly (distilled spec §6).
fn beacon_interval_us(raw: u16) -> u32 {
    raw as u32 * 1024
}

/// First info-element with the given `eid` across an aggregated map
/// (`itamae.mpdu.MPDU.getie`, exposed here for callers operating directly
/// on a decoded map rather than through [`MpduRecord::ie`]).
pub fn first<'a, 'b>(map: &'b IndexMap<u8, Vec<Element<'a>>>, eid: u8) -> Option<&'b Element<'a>> {
    map.get(&eid).and_then(|v| v.first())
}
