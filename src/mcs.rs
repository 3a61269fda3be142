//! HT MCS index lookup tables, ported from the original package's
//! `mcs.py` convenience module. HT-only (no VHT/802.11ac), as the source
//! documents. Supplementary to MPDU parsing: a consumer decoding HT
//! Capabilities/Operation IEs may want to turn an MCS index into a
//! human-meaningful modulation and data rate.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum McsError {
    #[error("mcs index {0} must be 0 <= i <= 31")]
    InvalidIndex(u8),
    #[error("mcs width {0} must be 20 or 40")]
    InvalidWidth(u8),
    #[error("mcs guard interval {0} must be 0 (short) or 1 (long)")]
    InvalidGuardInterval(u8),
}

/// Modulation and coding rate names, repeating every 8 MCS indices
/// (Std Tables 20-30 through 20-35).
const MCS_HT_INDEX: [&str; 8] = [
    "BPSK 1/2",
    "QPSK 1/2",
    "QPSK 3/4",
    "16-QAM 1/2",
    "16-QAM 3/4",
    "64-QAM 2/3",
    "64-QAM 3/4",
    "64-QAM 5/6",
];

/// `(width_20_long_gi, width_20_short_gi, width_40_long_gi, width_40_short_gi)`
/// data rates in Mbps, one row per MCS index 0..31 (Std Tables 20-30
/// through 20-37).
const MCS_HT_RATES: [(f32, f32, f32, f32); 32] = [
    (6.5, 7.2, 13.5, 15.0),
    (13.0, 14.4, 27.0, 30.0),
    (19.5, 21.7, 40.5, 45.0),
    (26.0, 28.9, 54.0, 60.0),
    (39.0, 43.3, 81.0, 90.0),
    (52.0, 57.8, 108.0, 120.0),
    (58.5, 65.0, 121.5, 135.0),
    (65.0, 72.2, 135.0, 150.0),
    (13.0, 14.4, 27.0, 30.0),
    (26.0, 28.9, 54.0, 60.0),
    (39.0, 43.3, 81.0, 90.0),
    (52.0, 57.8, 108.0, 120.0),
    (78.0, 86.7, 162.0, 180.0),
    (104.0, 115.6, 216.0, 240.0),
    (117.0, 130.3, 243.0, 270.0),
    (130.0, 144.4, 270.0, 300.0),
    (19.5, 21.7, 40.5, 45.0),
    (39.0, 43.3, 81.0, 90.0),
    (58.5, 65.0, 121.5, 135.0),
    (78.0, 86.7, 162.0, 180.0),
    (117.0, 130.0, 243.0, 270.0),
    (156.0, 173.3, 324.0, 360.0),
    (175.5, 195.0, 364.5, 405.0),
    (195.0, 216.7, 405.0, 450.0),
    (26.0, 28.9, 54.0, 60.0),
    (52.0, 57.8, 108.0, 120.0),
    (78.0, 86.7, 162.0, 180.0),
    (104.0, 115.6, 216.0, 240.0),
    (156.0, 173.3, 324.0, 360.0),
    (208.0, 231.1, 432.0, 480.0),
    (234.0, 260.0, 486.0, 540.0),
    (260.0, 288.9, 540.0, 600.0),
];

/// Modulation/coding name and number of spatial streams for MCS index `i`.
pub fn mcs_coding(i: u8) -> Result<(&'static str, u8), McsError> {
    if i > 31 {
        return Err(McsError::InvalidIndex(i));
    }
    let (spatial_streams, name_index) = (i / 8, i % 8);
    Ok((MCS_HT_INDEX[name_index as usize], spatial_streams + 1))
}

/// Data rate in Mbps for MCS index `i` at channel `width` (20 or 40) and
/// `guard_interval` (0 = short, 1 = long).
pub fn mcs_rate(i: u8, width: u8, guard_interval: u8) -> Result<f32, McsError> {
    if i > 31 {
        return Err(McsError::InvalidIndex(i));
    }
    if width != 20 && width != 40 {
        return Err(McsError::InvalidWidth(width));
    }
    if guard_interval > 1 {
        return Err(McsError::InvalidGuardInterval(guard_interval));
    }
    let (w20_long, w20_short, w40_long, w40_short) = MCS_HT_RATES[i as usize];
    Ok(match (width, guard_interval) {
        (20, 1) => w20_long,
        (20, 0) => w20_short,
        (40, 1) => w40_long,
        (40, 0) => w40_short,
        _ => unreachable!(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coding_wraps_every_eight_indices() {
        assert_eq!(mcs_coding(0).unwrap(), ("BPSK 1/2", 1));
        assert_eq!(mcs_coding(8).unwrap(), ("BPSK 1/2", 2));
        assert_eq!(mcs_coding(31).unwrap(), ("64-QAM 5/6", 4));
    }

    #[test]
    fn rate_rejects_out_of_range_inputs() {
        assert_eq!(mcs_coding(32), Err(McsError::InvalidIndex(32)));
        assert_eq!(mcs_rate(0, 30, 0), Err(McsError::InvalidWidth(30)));
        assert_eq!(mcs_rate(0, 20, 2), Err(McsError::InvalidGuardInterval(2)));
    }

    #[test]
    fn rate_matches_table_for_known_index() {
        assert_eq!(mcs_rate(0, 20, 0).unwrap(), 7.2);
        assert_eq!(mcs_rate(0, 20, 1).unwrap(), 6.5);
    }
}
