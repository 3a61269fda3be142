//! A high-throughput, read-only decoder for IEEE 802.11-2012 MAC Protocol
//! Data Units (MPDUs).
//!
//! Given a contiguous byte buffer holding one MPDU — optionally preceded by
//! a separately-parsed Radiotap header and optionally terminated by a
//! 4-byte Frame Check Sequence — [`parse`] produces a fully structured
//! [`MpduRecord`]: the MAC header, the fixed parameters of management
//! subtypes, every recognized Information Element, the control-frame
//! variants, data-frame QoS/address extensions, and layer-3 encryption
//! header metadata.
//!
//! The decoder never panics on malformed or truncated input. Per-field
//! decode errors are appended to [`MpduRecord::err`] and parsing continues
//! wherever structurally possible; only a header that cannot be read at
//! all aborts the call with [`error::Error`].

pub mod bits;
pub mod consts;
pub mod crypt;
pub mod ctrl;
pub mod cursor;
pub mod data;
pub mod error;
pub mod header;
pub mod mcs;
pub mod mgmt;
pub mod record;

use cursor::Cursor;
pub use error::Error;
use header::{Duration, FrameControl};
pub use record::MpduRecord;

/// Maximum frame size the decoder expects to see (`itamae.mpdu.MAX_MPDU`).
pub use record::MAX_MPDU;
/// Broadcast hardware address (`itamae.mpdu.BROADCAST`).
pub use header::BROADCAST;

const HEADER_LEN: usize = 10; // framectrl(2) + duration(2) + addr1(6)

/// Parses one MPDU.
///
/// `has_fcs` tells the decoder whether the trailing 4 bytes of `buf` are a
/// Frame Check Sequence to be extracted and stripped before type-specific
/// decoding runs (distilled spec §3/§6).
///
/// An empty `buf` is not an error: it returns an empty record with
/// `offset == 0` and no `framectrl`. A nonempty buffer shorter than the
/// mandatory `framectrl|duration|addr1` header is a fatal
/// [`Error::Truncated`] — the minimum decodable frame is 10 bytes.
/// Everything past that mandatory header degrades to an entry in
/// [`MpduRecord::err`] instead of aborting the call.
pub fn parse(buf: &[u8], has_fcs: bool) -> Result<MpduRecord<'_>, Error> {
    log::trace!("parse: {} bytes, has_fcs={}", buf.len(), has_fcs);
    if buf.is_empty() {
        return Ok(MpduRecord::new());
    }
    if buf.len() < HEADER_LEN {
        log::warn!("parse: {} bytes is shorter than the {}-byte mandatory header", buf.len(), HEADER_LEN);
        return Err(Error::Truncated { offset: 0, need: HEADER_LEN, have: buf.len() });
    }

    let mut record = MpduRecord::new();

    let mut header_cursor = Cursor::new(buf);
    let fc0 = header_cursor.read_u8().expect("length checked above");
    let fc1 = header_cursor.read_u8().expect("length checked above");
    let framectrl = FrameControl::decode(fc0, fc1);
    record.framectrl = Some(framectrl.clone());
    record.mark_present("framectrl");

    let duration_raw = header_cursor.read_u16().expect("length checked above");
    record.duration = Some(Duration::decode(duration_raw));
    record.mark_present("duration");

    let addr1 = header_cursor.read_array::<6>().expect("length checked above");
    record.addr1 = Some(addr1);
    record.mark_present("addr1");

    record.offset = HEADER_LEN;

    let working: &[u8] = if has_fcs {
        if buf.len() < HEADER_LEN + 4 {
            return Err(Error::Truncated { offset: 0, need: HEADER_LEN + 4, have: buf.len() });
        }
        let fcs_bytes = &buf[buf.len() - 4..];
        record.fcs = Some(u32::from_le_bytes([fcs_bytes[0], fcs_bytes[1], fcs_bytes[2], fcs_bytes[3]]));
        record.stripped += 4;
        &buf[..buf.len() - 4]
    } else {
        buf
    };

    let mut c = Cursor::new(working);
    // Replay the header read on the (possibly FCS-truncated) working slice
    // so the cursor position matches `record.offset` going forward.
    let _ = c.read_slice(HEADER_LEN);

    log::debug!(
        "parse: type={} subtype={}",
        framectrl.type_desc(),
        framectrl.subtype_desc()
    );
    match framectrl.frame_type {
        consts::FT_MGMT => mgmt::decode(&mut c, &mut record),
        consts::FT_CTRL => ctrl::decode(&mut c, &mut record),
        consts::FT_DATA => data::decode(&mut c, &mut record),
        _ => record.push_fault("framectrl.type", "invalid type RSRV"),
    }

    record.offset = c.position();

    if framectrl.protected() {
        match crypt::decode(&mut c, 0) {
            Ok(l3) => {
                log::trace!("parse: l3-crypt classified as {}", l3.type_name());
                record.stripped += crypt_stripped_len(&l3);
                record.offset = c.position();
                record.crypt = Some(l3);
                record.mark_present("l3-crypt");
            }
            Err(fault) => {
                log::warn!("parse: l3-crypt decode failed: {}", fault);
                record.err.push(fault);
            }
        }
    }

    if !record.err.is_empty() {
        log::debug!("parse: {} recoverable fault(s)", record.err.len());
    }

    if has_fcs {
        record.mark_present("fcs");
    }

    Ok(record)
}

fn crypt_stripped_len(l3: &crypt::L3Crypt<'_>) -> usize {
    match l3 {
        crypt::L3Crypt::Wep(_) => 4,
        crypt::L3Crypt::Tkip(_) => 12,
        crypt::L3Crypt::Ccmp(_) => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn empty_buffer_returns_empty_record() {
        init_logging();
        let record = parse(&[], false).unwrap();
        assert_eq!(record.offset, 0);
        assert!(record.framectrl.is_none());
        assert!(record.is_empty());
    }

    #[test]
    fn buffer_shorter_than_header_is_fatal() {
        let err = parse(&[0xD4, 0x00, 0x00], false).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
    }

    #[test]
    fn minimal_ack_with_fcs_stripped() {
        init_logging();
        // Scenario 1 from the distilled spec: D4 00 00 00 FF FF FF FF FF FF.
        let buf = [0xD4, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let record = parse(&buf, false).unwrap();
        let fc = record.framectrl.as_ref().unwrap();
        assert_eq!(fc.frame_type, consts::FT_CTRL);
        assert_eq!(fc.subtype, consts::ST_CTRL_ACK);
        assert!(fc.flags.values().all(|&v| !v));
        assert_eq!(record.duration, Some(Duration::Vcs { dur: 0 }));
        assert_eq!(record.addr1, Some(header::BROADCAST));
        assert_eq!(record.offset, 10);
        assert_eq!(record.stripped, 0);
        assert!(record.err.is_empty());
    }

    #[test]
    fn ps_poll_decodes_aid_and_addr2() {
        init_logging();
        // Scenario 2 from the distilled spec.
        let buf = [
            0xA4, 0x00, 0x2A, 0xC0, 0x00, 0x1F, 0x3F, 0xA2, 0xB1, 0xC3, 0x00, 0x1F, 0x3F, 0xA2,
            0xB1, 0xC4,
        ];
        let record = parse(&buf, false).unwrap();
        let fc = record.framectrl.as_ref().unwrap();
        assert_eq!(fc.frame_type, consts::FT_CTRL);
        assert_eq!(fc.subtype, consts::ST_CTRL_PS_POLL);
        assert_eq!(record.duration, Some(Duration::Aid { aid: 42 }));
        assert_eq!(header::hwaddr_to_string(&record.addr1.unwrap()), "00:1f:3f:a2:b1:c3");
        assert_eq!(header::hwaddr_to_string(&record.addr2.unwrap()), "00:1f:3f:a2:b1:c4");
        assert!(record.present.contains(&"addr2"));
    }

    fn beacon_fixture(ssid: &[u8], rate: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x80, 0x00]); // framectrl: mgmt/beacon
        buf.extend_from_slice(&[0x00, 0x00]); // duration
        buf.extend_from_slice(&header::BROADCAST); // addr1
        buf.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]); // addr2
        buf.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]); // addr3
        buf.extend_from_slice(&[0x10, 0x00]); // seqctrl
        buf.extend_from_slice(&0x0102030405060708u64.to_le_bytes()); // timestamp
        buf.extend_from_slice(&100u16.to_le_bytes()); // beacon-interval
        buf.extend_from_slice(&0x0421u16.to_le_bytes()); // capability
        buf.push(consts::eid::SSID);
        buf.push(ssid.len() as u8);
        buf.extend_from_slice(ssid);
        buf.push(consts::eid::SUPPORTED_RATES);
        buf.push(1);
        buf.push(rate);
        buf
    }

    #[test]
    fn beacon_with_ssid_and_supported_rates() {
        init_logging();
        // Scenario 3 from the distilled spec.
        let buf = beacon_fixture(b"test", 0x82);
        let record = parse(&buf, false).unwrap();
        let fc = record.framectrl.as_ref().unwrap();
        assert_eq!(fc.subtype, consts::ST_MGMT_BEACON);
        match &record.body {
            Some(record::FrameBody::Mgmt { fixed_params, info_elements }) => {
                match fixed_params {
                    mgmt::fixed::FixedParams::Beacon { timestamp, beacon_interval_us, capability } => {
                        assert_eq!(*timestamp, 0x0102030405060708);
                        assert_eq!(*beacon_interval_us, 100 * 1024);
                        assert!(capability.get("ess"));
                    }
                    other => panic!("expected Beacon fixed params, got {other:?}"),
                }
                let ssid = &info_elements[&consts::eid::SSID];
                assert_eq!(ssid.len(), 1);
                let rates = &info_elements[&consts::eid::SUPPORTED_RATES];
                assert_eq!(rates.len(), 1);
            }
            other => panic!("expected Mgmt body, got {other:?}"),
        }
        assert!(record.err.is_empty());
    }

    fn qos_data_fixture(protected: bool) -> Vec<u8> {
        let mut fc1 = 0b0000_0011u8; // to-ds + from-ds
        if protected {
            fc1 |= 0b0100_0000;
        }
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x88, fc1]); // data / qos-data (subtype 8)
        buf.extend_from_slice(&[0x00, 0x00]); // duration
        buf.extend_from_slice(&[1, 1, 1, 1, 1, 1]); // addr1
        buf.extend_from_slice(&[2, 2, 2, 2, 2, 2]); // addr2
        buf.extend_from_slice(&[3, 3, 3, 3, 3, 3]); // addr3
        buf.extend_from_slice(&[0x00, 0x00]); // seqctrl
        buf.extend_from_slice(&[4, 4, 4, 4, 4, 4]); // addr4
        buf.extend_from_slice(&[0x01, 0x00]); // qos: tid=1
        buf
    }

    #[test]
    fn qos_data_todsfromds_decodes_all_addresses_and_qos() {
        init_logging();
        // Scenario 4 from the distilled spec.
        let buf = qos_data_fixture(false);
        let record = parse(&buf, false).unwrap();
        assert!(record.present.contains(&"addr2"));
        assert!(record.present.contains(&"addr3"));
        assert!(record.present.contains(&"addr4"));
        assert!(record.present.contains(&"seqctrl"));
        assert!(record.present.contains(&"qos"));
        let qos = record.qos.unwrap();
        assert_eq!(qos.tid, 1);
    }

    #[test]
    fn ccmp_protected_data_advances_offset_by_eight() {
        init_logging();
        // Scenario 5 from the distilled spec.
        let mut buf = qos_data_fixture(true);
        let header_start = buf.len();
        buf.extend_from_slice(&[0x24, 0x00, 0x00, 0x20, 5, 6, 7, 8]); // ccmp header
        buf.extend_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]); // mic trailer
        let record = parse(&buf, false).unwrap();
        assert_eq!(record.crypt.as_ref().unwrap().type_name(), "ccmp");
        assert_eq!(record.offset, header_start + 8);
        assert_eq!(record.stripped, 8);
    }

    #[test]
    fn truncated_probe_response_records_ie_fault_without_panicking() {
        init_logging();
        // Scenario 6 from the distilled spec: header + fixed-params, then
        // cut mid-SSID.
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x50, 0x00]); // probe-resp
        buf.extend_from_slice(&[0x00, 0x00]);
        buf.extend_from_slice(&header::BROADCAST);
        buf.extend_from_slice(&[1, 1, 1, 1, 1, 1]);
        buf.extend_from_slice(&[1, 1, 1, 1, 1, 1]);
        buf.extend_from_slice(&[0x00, 0x00]);
        buf.extend_from_slice(&0u64.to_le_bytes());
        buf.extend_from_slice(&100u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.push(consts::eid::SSID);
        buf.push(10); // claims 10 bytes of SSID
        buf.extend_from_slice(b"short"); // only 5 are actually present

        let record = parse(&buf, false).unwrap();
        assert!(record.present.contains(&"fixed-params"));
        assert!(record.err.iter().any(|f| f.location == "mgmt.info-elements"));
    }

    #[test]
    fn universal_invariant_offset_plus_stripped_never_exceeds_len() {
        init_logging();
        let buf = qos_data_fixture(false);
        let record = parse(&buf, true).unwrap();
        assert!(record.offset + record.stripped <= buf.len());
    }
}
