//! C9: the MPDU Assembler's output type and accumulation helpers.

use indexmap::IndexMap;

use crate::crypt::L3Crypt;
use crate::ctrl::CtrlBody;
use crate::data::DataBody;
use crate::error::Fault;
use crate::header::{Duration, FrameControl, HtControl, HwAddr, QosCtrl, SeqCtrl};
use crate::mgmt::fixed::FixedParams;
use crate::mgmt::ie::Element;

/// Maximum MPDU size in bytes (`itamae.mpdu.MAX_MPDU`).
pub const MAX_MPDU: usize = 7991;

/// The type-specific payload of an MPDU, once the header has been decoded.
#[derive(Debug, Clone)]
pub enum FrameBody<'a> {
    Mgmt {
        fixed_params: FixedParams<'a>,
        info_elements: IndexMap<u8, Vec<Element<'a>>>,
    },
    Ctrl(CtrlBody<'a>),
    Data(DataBody),
    /// `framectrl.type == RSRV`; nothing further was decoded.
    Reserved,
}

/// The fully structured representation of one MPDU.
///
/// Invariants (distilled spec §3): `size == offset + stripped`; `present`
/// lists field tags in decode order; `err` is empty iff the frame decoded
/// without recoverable fault; `framectrl`/`duration`/`addr1` are present in
/// every non-empty record.
#[derive(Debug, Clone, Default)]
pub struct MpduRecord<'a> {
    pub offset: usize,
    pub stripped: usize,
    pub present: Vec<&'static str>,
    pub err: Vec<Fault>,

    pub framectrl: Option<FrameControl>,
    pub duration: Option<Duration>,
    pub addr1: Option<HwAddr>,
    pub addr2: Option<HwAddr>,
    pub addr3: Option<HwAddr>,
    pub addr4: Option<HwAddr>,
    pub seqctrl: Option<SeqCtrl>,
    pub qos: Option<QosCtrl>,
    pub htc: Option<HtControl>,
    pub fcs: Option<u32>,

    pub body: Option<FrameBody<'a>>,
    pub crypt: Option<L3Crypt<'a>>,
}

impl<'a> MpduRecord<'a> {
    pub fn new() -> Self {
        MpduRecord::default()
    }

    pub fn size(&self) -> usize {
        self.offset + self.stripped
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    pub fn mark_present(&mut self, tag: &'static str) {
        self.present.push(tag);
    }

    pub fn push_fault(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.err.push(Fault::new(location, message));
    }

    pub fn vers(&self) -> Option<u8> {
        self.framectrl.as_ref().map(|fc| fc.vers)
    }

    pub fn frame_type(&self) -> Option<u8> {
        self.framectrl.as_ref().map(|fc| fc.frame_type)
    }

    pub fn subtype(&self) -> Option<u8> {
        self.framectrl.as_ref().map(|fc| fc.subtype)
    }

    /// First info-element value stored under `eid`, if any
    /// (`itamae.mpdu.MPDU.getie`).
    pub fn ie(&self, eid: u8) -> Option<&Element<'a>> {
        match &self.body {
            Some(FrameBody::Mgmt { info_elements, .. }) => {
                info_elements.get(&eid).and_then(|v| v.first())
            }
            _ => None,
        }
    }

    /// All info-element values stored under each of `eids`, one `Vec` per
    /// requested id, preserving order (`itamae.mpdu.MPDU.geties`).
    pub fn ies(&self, eids: &[u8]) -> Vec<Vec<&Element<'a>>> {
        eids.iter()
            .map(|eid| match &self.body {
                Some(FrameBody::Mgmt { info_elements, .. }) => info_elements
                    .get(eid)
                    .map(|v| v.iter().collect())
                    .unwrap_or_default(),
                _ => Vec::new(),
            })
            .collect()
    }
}

/// `itamae.mpdu.validssid`: an SSID is valid iff it is at most 32 bytes and
/// valid UTF-8.
pub fn valid_ssid(s: &[u8]) -> bool {
    s.len() <= 32 && std::str::from_utf8(s).is_ok()
}

/// `itamae.mpdu.datasubtype_all`: which data-subtype modification bits are
/// set in a data-frame subtype nibble.
pub fn data_subtype_all(subtype: u8) -> IndexMap<&'static str, bool> {
    crate::bits::bitmask_list(&crate::consts::DATA_SUBTYPE_FIELDS, subtype as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_offset_plus_stripped() {
        let mut r = MpduRecord::new();
        r.offset = 24;
        r.stripped = 4;
        assert_eq!(r.size(), 28);
    }

    #[test]
    fn valid_ssid_rejects_overlong_and_non_utf8() {
        assert!(valid_ssid(b"test"));
        assert!(!valid_ssid(&[0u8; 33]));
        assert!(!valid_ssid(&[0xff, 0xfe]));
    }

    #[test]
    fn data_subtype_all_reports_qos_bit() {
        let flags = data_subtype_all(0b1000);
        assert!(flags["qos"]);
        assert!(!flags["cf-ack"]);
    }
}
