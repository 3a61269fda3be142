//! C7: the Information-Element engine — length-prefixed TLV walk, dispatch
//! by element ID, and multi-instance aggregation.

use indexmap::IndexMap;

use super::eid::{self, ElementValue};
use crate::cursor::Cursor;
use crate::error::Fault;

/// One decoded `(eid, payload)` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    pub eid: u8,
    pub value: ElementValue<'a>,
}

/// `(sid:u8, slen:u8, payload[slen])` sub-element, as nested inside
/// Neighbor Report / FTE / FMS / Mesh MCCAOP containers. The default
/// sub-decoder yields the raw payload unchanged; containers with known
/// sub-element shapes may supply their own decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubElement<'a> {
    pub sid: u8,
    pub payload: &'a [u8],
}

/// Walks a generic sub-element TLV stream, the default sub-decoder
/// (`itamae._mpdu._iesubel_`: identity passthrough).
pub fn walk_sub_elements(buf: &[u8]) -> Vec<SubElement<'_>> {
    let mut c = Cursor::new(buf);
    let mut out = Vec::new();
    while c.remaining() >= 2 {
        let sid = match c.read_u8() {
            Ok(v) => v,
            Err(_) => break,
        };
        let slen = match c.read_u8() {
            Ok(v) => v,
            Err(_) => break,
        };
        match c.read_slice(slen as usize) {
            Ok(payload) => out.push(SubElement { sid, payload }),
            Err(_) => break,
        }
    }
    out
}

/// Walks the top-level IE stream starting at the cursor's current
/// position through to the end of the buffer, dispatching each element to
/// its per-EID decoder (C8) and aggregating same-`eid` elements in
/// insertion order (distilled spec §4.7).
///
/// Faults are appended to `err` under `mgmt.info-elements.eid-{eid}` for a
/// per-element decode failure (the loop continues to the next element), or
/// under `mgmt.info-elements` for a structural failure reading the
/// `(eid, elen)` TLV header itself (the loop aborts, to bound iteration by
/// `len(buf)` even for pathological `elen` values).
pub fn decode_elements<'a>(
    c: &mut Cursor<'a>,
    err: &mut Vec<Fault>,
) -> IndexMap<u8, Vec<Element<'a>>> {
    let mut elements: IndexMap<u8, Vec<Element<'a>>> = IndexMap::new();
    while !c.is_empty() {
        let id = match c.read_u8() {
            Ok(v) => v,
            Err(e) => {
                err.push(Fault::new("mgmt.info-elements", format!("reading eid: {:?}", e)));
                break;
            }
        };
        let len = match c.read_u8() {
            Ok(v) => v,
            Err(e) => {
                err.push(Fault::new("mgmt.info-elements", format!("reading elen: {:?}", e)));
                break;
            }
        };
        let payload = match c.read_slice(len as usize) {
            Ok(p) => p,
            Err(e) => {
                err.push(Fault::new("mgmt.info-elements", format!("reading payload: {:?}", e)));
                break;
            }
        };
        match eid::decode(id, payload) {
            Ok(value) => {
                log::trace!("ie: eid={id} len={len}");
                elements.entry(id).or_default().push(Element { eid: id, value });
            }
            Err(message) => {
                log::debug!("ie: eid={id} decode failed: {message}");
                err.push(Fault::new(format!("mgmt.info-elements.eid-{id}"), message));
            }
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_repeated_eids_in_order() {
        let buf = [0u8, 1, b'a', 0, 1, b'b'];
        let mut c = Cursor::new(&buf);
        let mut err = Vec::new();
        let elements = decode_elements(&mut c, &mut err);
        assert_eq!(elements[&0].len(), 2);
        assert!(err.is_empty());
    }

    #[test]
    fn truncated_payload_aborts_loop_without_panicking() {
        let buf = [5u8, 10, 1, 2]; // elen=10 but only 2 bytes remain
        let mut c = Cursor::new(&buf);
        let mut err = Vec::new();
        let elements = decode_elements(&mut c, &mut err);
        assert!(elements.is_empty());
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].location, "mgmt.info-elements");
    }

    #[test]
    fn pathological_elen_zero_terminates_within_buffer_length() {
        let buf = [7u8, 0, 7, 0, 7, 0];
        let mut c = Cursor::new(&buf);
        let mut err = Vec::new();
        let elements = decode_elements(&mut c, &mut err);
        assert_eq!(elements[&7].len(), 3);
        assert!(err.is_empty());
    }

    #[test]
    fn sub_element_walker_yields_raw_payloads() {
        let buf = [1u8, 2, 9, 9, 3, 0];
        let subs = walk_sub_elements(&buf);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].sid, 1);
        assert_eq!(subs[0].payload, &[9, 9]);
        assert_eq!(subs[1].sid, 3);
        assert_eq!(subs[1].payload, &[] as &[u8]);
    }
}
