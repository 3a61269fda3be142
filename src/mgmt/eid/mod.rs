//! C8: per-element-ID decoders. The "notable shapes" from the distilled
//! spec §4.8 are implemented in full; every other recognized element ID is
//! named in [`crate::consts::eid`] but falls through to
//! [`ElementValue::Unknown`] — this mirrors the source, where most per-EID
//! decoders are `pass` stubs (distilled spec §9, Open Question 2).

mod ht;
mod measurement;
mod rsne;
mod tclas;
mod tspec;

pub use ht::{HtCapabilities, HtOperation};
pub use measurement::{MeasurementReport, MeasurementRequest};
pub use rsne::Rsne;
pub use tclas::Tclas;
pub use tspec::Tspec;

use crate::consts::eid;

/// SSID (0): UTF-8 on success, raw bytes on failure — never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ssid<'a> {
    Text(String),
    Raw(&'a [u8]),
}

/// TIM (5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmCtrl {
    pub tib: bool,
    pub offset: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tim<'a> {
    pub dtim_cnt: u8,
    pub dtim_per: u8,
    pub bm_ctrl: BmCtrl,
    pub vir_bm: &'a [u8],
}

/// Country (7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTriplet {
    pub first_ch: u8,
    pub num_ch: u8,
    pub max_tx: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub country: String,
    pub triplets: Vec<CountryTriplet>,
    pub pad: Option<u8>,
}

/// ERP Information (42).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erp {
    pub non_erp: bool,
    pub use_protect: bool,
    pub barker: bool,
}

/// Vendor-Specific (221).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSpecific<'a> {
    pub oui: [u8; 3],
    pub content: &'a [u8],
}

/// The decoded payload of one information element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue<'a> {
    Ssid(Ssid<'a>),
    Rates(Vec<f32>),
    Dsss { channel: u8 },
    Tim(Tim<'a>),
    Country(Country),
    Erp(Erp),
    HtCapabilities(HtCapabilities),
    HtOperation(HtOperation),
    Rsne(Rsne),
    Tspec(Tspec),
    Tclas(Tclas<'a>),
    MeasurementRequest(MeasurementRequest<'a>),
    MeasurementReport(MeasurementReport<'a>),
    VendorSpecific(VendorSpecific<'a>),
    /// Per-EID decoder not yet implemented, or the source itself stubs it
    /// out — always valid, never an error.
    Unknown { raw: &'a [u8] },
}

/// Supported/Extended Rates (elements 1 and 50): `rate = (byte & 0x7F) *
/// 0.5` Mbps, one float per rate byte (`itamae._mpdu._eidrates_`).
fn decode_rates(payload: &[u8]) -> Vec<f32> {
    payload.iter().map(|&b| (b & 0x7F) as f32 * 0.5).collect()
}

fn decode_ssid(payload: &[u8]) -> Ssid<'_> {
    match std::str::from_utf8(payload) {
        Ok(s) => Ssid::Text(s.to_owned()),
        Err(_) => Ssid::Raw(payload),
    }
}

fn decode_dsss(payload: &[u8]) -> Result<ElementValue<'static>, String> {
    let channel = *payload.first().ok_or("dsss: empty payload")?;
    Ok(ElementValue::Dsss { channel })
}

fn decode_tim(payload: &[u8]) -> Result<Tim<'_>, String> {
    if payload.len() < 3 {
        return Err(format!("tim: need 3 bytes, have {}", payload.len()));
    }
    let bmctrl = payload[2];
    Ok(Tim {
        dtim_cnt: payload[0],
        dtim_per: payload[1],
        bm_ctrl: BmCtrl {
            tib: bmctrl & 0x1 != 0,
            offset: bmctrl >> 1,
        },
        vir_bm: &payload[3..],
    })
}

fn decode_country(payload: &[u8]) -> Result<Country, String> {
    if payload.len() < 3 {
        return Err(format!("country: need 3 bytes, have {}", payload.len()));
    }
    let country = String::from_utf8_lossy(&payload[..3]).into_owned();
    let rest = &payload[3..];
    let mut triplets = Vec::new();
    let mut i = 0;
    while i + 3 <= rest.len() {
        triplets.push(CountryTriplet {
            first_ch: rest[i],
            num_ch: rest[i + 1],
            max_tx: rest[i + 2],
        });
        i += 3;
    }
    let pad = if rest.len() % 3 == 1 { Some(rest[rest.len() - 1]) } else { None };
    Ok(Country { country, triplets, pad })
}

fn decode_erp(payload: &[u8]) -> Result<Erp, String> {
    let v = *payload.first().ok_or("erp: empty payload")?;
    Ok(Erp {
        non_erp: v & 0x1 != 0,
        use_protect: v & 0x2 != 0,
        barker: v & 0x4 != 0,
    })
}

fn decode_vendor(payload: &[u8]) -> Result<VendorSpecific<'_>, String> {
    if payload.len() < 3 {
        return Err(format!("vendor-specific: need 3 bytes, have {}", payload.len()));
    }
    Ok(VendorSpecific {
        oui: [payload[0], payload[1], payload[2]],
        content: &payload[3..],
    })
}

/// Dispatches one element's payload to its per-EID decoder. `Ok` is
/// returned for every element, including unrecognized ones
/// (`ElementValue::Unknown`); `Err` is reserved for elements whose *known*
/// shape could not be decoded from the bytes present.
pub fn decode<'a>(id: u8, payload: &'a [u8]) -> Result<ElementValue<'a>, String> {
    match id {
        eid::SSID => Ok(ElementValue::Ssid(decode_ssid(payload))),
        eid::SUPPORTED_RATES | eid::EXTENDED_RATES => Ok(ElementValue::Rates(decode_rates(payload))),
        eid::DSSS => decode_dsss(payload),
        eid::TIM => decode_tim(payload).map(ElementValue::Tim),
        eid::COUNTRY => decode_country(payload).map(ElementValue::Country),
        eid::ERP => decode_erp(payload).map(ElementValue::Erp),
        eid::HT_CAP => ht::decode_capabilities(payload).map(ElementValue::HtCapabilities),
        eid::HT_OP => ht::decode_operation(payload).map(ElementValue::HtOperation),
        eid::RSNE => rsne::decode(payload).map(ElementValue::Rsne),
        eid::TSPEC => tspec::decode(payload).map(ElementValue::Tspec),
        eid::TCLAS => tclas::decode(payload).map(ElementValue::Tclas),
        eid::MSMT_REQ => measurement::decode_request(payload).map(ElementValue::MeasurementRequest),
        eid::MSMT_RPT => measurement::decode_report(payload).map(ElementValue::MeasurementReport),
        eid::VEND_SPEC => decode_vendor(payload).map(ElementValue::VendorSpecific),
        _ => {
            #[cfg(feature = "panic")]
            panic!("unhandled element id {id}, {} byte payload", payload.len());
            #[cfg(not(feature = "panic"))]
            Ok(ElementValue::Unknown { raw: payload })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssid_decodes_utf8() {
        assert_eq!(decode(eid::SSID, b"test").unwrap(), ElementValue::Ssid(Ssid::Text("test".into())));
    }

    #[test]
    fn rates_mask_basic_rate_bit() {
        // 0x82 -> basic-rate bit (0x80) stripped, value 0x02 * 0.5 == 1.0 Mbps.
        assert_eq!(decode(eid::SUPPORTED_RATES, &[0x82]).unwrap(), ElementValue::Rates(vec![1.0]));
    }

    #[test]
    fn unknown_eid_falls_through_to_raw() {
        let v = decode(200, &[1, 2, 3]).unwrap();
        assert_eq!(v, ElementValue::Unknown { raw: &[1, 2, 3] });
    }

    #[test]
    fn tim_splits_bmctrl_bits() {
        let tim = decode_tim(&[1, 2, 0b0000_0011, 0xAA]).unwrap();
        assert_eq!(tim.dtim_cnt, 1);
        assert_eq!(tim.dtim_per, 2);
        assert!(tim.bm_ctrl.tib);
        assert_eq!(tim.bm_ctrl.offset, 1);
        assert_eq!(tim.vir_bm, &[0xAA]);
    }

    #[test]
    fn country_parses_triplets_and_pad() {
        let payload = [b'U', b'S', b' ', 1, 11, 20, 0];
        let country = decode_country(&payload).unwrap();
        assert_eq!(country.country, "US ");
        assert_eq!(country.triplets.len(), 1);
        assert_eq!(country.pad, Some(0));
    }
}
