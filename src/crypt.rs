//! C3: the encryption-type discriminator. Invoked only when
//! `framectrl.flags.pf == 1`; inspects the first 4 post-header bytes to
//! classify WEP vs TKIP vs CCMP and extract the IV/ExtIV/PN/MIC/ICV slices.
//!
//! See http://www.xirrus.com/cdn/pdf/wifi-demystified/documents_posters_encryption_plotter.pdf
//! for the ExtIV/seed test this module reproduces.

use crate::bits::{leastx, midx, mostx};
use crate::cursor::Cursor;
use crate::error::Fault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyId {
    pub rsrv: u8,
    pub ext_iv: bool,
    pub key_id: u8,
}

impl KeyId {
    fn decode(b: u8) -> Self {
        KeyId {
            rsrv: leastx(5, b as u32) as u8,
            ext_iv: midx(5, 1, b as u32) != 0,
            key_id: mostx(6, b as u32) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wep<'a> {
    pub iv: [u8; 4],
    pub key_id: u8,
    pub icv: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tkip<'a> {
    pub tsc1: u8,
    pub wep_seed: u8,
    pub tsc0: u8,
    pub key_id: KeyId,
    pub tsc2: u8,
    pub tsc3: u8,
    pub tsc4: u8,
    pub tsc5: u8,
    pub mic: &'a [u8],
    pub icv: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ccmp<'a> {
    pub pn0: u8,
    pub pn1: u8,
    pub rsrv: u8,
    pub key_id: KeyId,
    pub pn2: u8,
    pub pn3: u8,
    pub pn4: u8,
    pub pn5: u8,
    pub mic: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum L3Crypt<'a> {
    Wep(Wep<'a>),
    Tkip(Tkip<'a>),
    Ccmp(Ccmp<'a>),
}

impl<'a> L3Crypt<'a> {
    pub fn type_name(&self) -> &'static str {
        match self {
            L3Crypt::Wep(_) => "wep",
            L3Crypt::Tkip(_) => "tkip",
            L3Crypt::Ccmp(_) => "ccmp",
        }
    }
}

/// `_CCMP_PN0_BYTE_` in the source: the (buggy) byte index `pn5` was read
/// from instead of the standard-correct index 7. Preserved only behind
/// `ccmp-pn5-compat` (distilled spec §9, Open Question 3).
const CCMP_PN0_BYTE: usize = 0;
const CCMP_PN5_BYTE_STANDARD: usize = 7;

/// Classifies and decodes the layer-3 crypto header at the cursor's current
/// position. `working` is the remainder of the frame (post-header, with any
/// trailing FCS already stripped by the caller) so MIC/ICV can be read from
/// its tail.
pub fn decode<'a>(c: &mut Cursor<'a>, working_tail_len: usize) -> Result<L3Crypt<'a>, Fault> {
    let peek = c.rest();
    if peek.len() < 4 {
        return Err(Fault::new(
            "l3-crypt",
            format!("testing for encryption: need 4 bytes, have {}", peek.len()),
        ));
    }
    let (b0, b1, _b2, b3) = (peek[0], peek[1], peek[2], peek[3]);

    if b3 & 0x20 == 0 {
        log::trace!("l3-crypt: classified as wep");
        let iv = c
            .read_array::<4>()
            .map_err(|e| Fault::new("l3-crypt.wep", format!("{:?}", e)))?;
        let icv = tail_slice(c, working_tail_len, 4)
            .map_err(|e| Fault::new("l3-crypt.wep", e))?;
        return Ok(L3Crypt::Wep(Wep {
            iv,
            key_id: mostx(6, b3 as u32) as u8,
            icv,
        }));
    }

    if (b0 as u32 | 0x20) & 0x7f == b1 as u32 {
        log::trace!("l3-crypt: classified as tkip");
        let bytes = c
            .read_array::<8>()
            .map_err(|e| Fault::new("l3-crypt.tkip", format!("{:?}", e)))?;
        let mic = tail_slice(c, working_tail_len, 12)
            .map_err(|e| Fault::new("l3-crypt.tkip", e))?;
        let icv = tail_slice(c, working_tail_len, 4).map_err(|e| Fault::new("l3-crypt.tkip", e))?;
        let mic = &mic[..8];
        Ok(L3Crypt::Tkip(Tkip {
            tsc1: bytes[0],
            wep_seed: bytes[1],
            tsc0: bytes[2],
            key_id: KeyId::decode(bytes[3]),
            tsc2: bytes[4],
            tsc3: bytes[5],
            tsc4: bytes[6],
            tsc5: bytes[7],
            mic,
            icv,
        }))
    } else {
        log::trace!("l3-crypt: classified as ccmp");
        let bytes = c
            .read_array::<8>()
            .map_err(|e| Fault::new("l3-crypt.ccmp", format!("{:?}", e)))?;
        let mic =
            tail_slice(c, working_tail_len, 8).map_err(|e| Fault::new("l3-crypt.ccmp", e))?;
        let pn5_byte = if cfg!(feature = "ccmp-pn5-compat") {
            CCMP_PN0_BYTE
        } else {
            CCMP_PN5_BYTE_STANDARD
        };
        let pn5 = bytes[pn5_byte];
        Ok(L3Crypt::Ccmp(Ccmp {
            pn0: bytes[0],
            pn1: bytes[1],
            rsrv: leastx(5, bytes[2] as u32) as u8,
            key_id: KeyId::decode(bytes[3]),
            pn2: bytes[4],
            pn3: bytes[5],
            pn4: bytes[6],
            pn5,
            mic,
        }))
    }
}

/// Returns the last `want` bytes of whatever remains once `tail_reserve`
/// further bytes (already consumed elsewhere, e.g. by a sibling MIC/ICV
/// read) are set aside from the end of the whole working slice.
fn tail_slice<'a>(c: &Cursor<'a>, _working_tail_len: usize, want: usize) -> Result<&'a [u8], String> {
    let rest = c.rest();
    if rest.len() < want {
        return Err(format!("need {} trailing bytes, have {}", want, rest.len()));
    }
    Ok(&rest[rest.len() - want..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_wep() {
        let buf = [0x00u8, 0x00, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef];
        let mut c = Cursor::new(&buf);
        let crypt = decode(&mut c, 0).unwrap();
        assert_eq!(crypt.type_name(), "wep");
    }

    #[test]
    fn classifies_ccmp_when_seed_test_fails() {
        // bit5 of byte3 set (0x20), and (b0|0x20)&0x7f != b1 -> ccmp.
        let buf = [0x24u8, 0x00, 0x00, 0x20, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut c = Cursor::new(&buf);
        let crypt = decode(&mut c, 0).unwrap();
        assert_eq!(crypt.type_name(), "ccmp");
    }

    #[test]
    fn classifies_tkip_when_seed_test_passes() {
        // (b0|0x20)&0x7f == b1
        let b0 = 0x11u8;
        let b1 = (b0 | 0x20) & 0x7f;
        let buf = [b0, b1, 0x00, 0x20, 1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut c = Cursor::new(&buf);
        let crypt = decode(&mut c, 0).unwrap();
        assert_eq!(crypt.type_name(), "tkip");
    }
}
