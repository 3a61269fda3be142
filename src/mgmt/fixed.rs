//! C6: per-subtype fixed-parameter blocks, read immediately after
//! `addr2|addr3|seqctrl` and before the Information-Element stream.

use indexmap::IndexMap;

use crate::bits::bitmask_list;
use crate::consts;
use crate::header::HwAddr;

/// Capability Information, Std Figure 8-34, parsed as a named bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability(pub IndexMap<&'static str, bool>);

impl Capability {
    pub fn decode(v: u16) -> Self {
        Capability(bitmask_list(&consts::CAP_INFO, v as u32))
    }

    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }
}

/// One fixed-parameter block per management subtype (distilled spec §4.6).
/// `action-el` carries the opaque remainder of Action frames; everything
/// else is consumed by the IE loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedParams<'a> {
    AssocReq {
        capability: Capability,
        listen_interval: u16,
    },
    AssocResp {
        capability: Capability,
        status_code: u16,
        aid: u16,
    },
    ReassocReq {
        capability: Capability,
        listen_interval: u16,
        current_ap: HwAddr,
    },
    ReassocResp {
        capability: Capability,
        status_code: u16,
        aid: u16,
    },
    ProbeReq,
    /// Beacon interval is expressed in microseconds on output (×1024 per
    /// the distilled spec §6).
    ProbeResp {
        timestamp: u64,
        beacon_interval_us: u32,
        capability: Capability,
    },
    Beacon {
        timestamp: u64,
        beacon_interval_us: u32,
        capability: Capability,
    },
    TimingAdv {
        timestamp: u64,
        capability: Capability,
    },
    Disassoc {
        reason_code: u16,
    },
    Auth {
        algorithm_no: u16,
        auth_seq: u16,
        status_code: u16,
    },
    Deauth {
        reason_code: u16,
    },
    Action {
        category: u8,
        action: u8,
        action_el: &'a [u8],
    },
    ActionNoAck {
        category: u8,
        action: u8,
        action_el: &'a [u8],
    },
    /// ATIM and reserved subtypes 7/15: no fixed parameters.
    None,
}

/// `aid` keeps only its low 14 bits (Std 8.4.1.8): the top two bits of the
/// field are reserved and must be masked off before exposing the value.
pub fn mask_aid(raw: u16) -> u16 {
    raw & 0x3FFF
}
