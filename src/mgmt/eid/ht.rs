//! HT Capabilities (45) and HT Operation (61), Std 8.4.2.58/8.4.2.59.

use crate::bits::{leastx, midx};

/// HT Capabilities Info, Std Figure 8-99.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtCapInfo {
    pub ldpc_coding: bool,
    pub support_ch_width: bool,
    pub sm_power_save: u8,
    pub green_field: bool,
    pub short_gi_20: bool,
    pub short_gi_40: bool,
    pub tx_stbc: bool,
    pub rx_stbc: u8,
    pub delayed_block_ack: bool,
    pub max_amsdu_len: bool,
    pub dsss_cck_40: bool,
    pub rsrv: bool,
    pub intolerant_40: bool,
    pub lsig_txop_protect: bool,
}

impl HtCapInfo {
    fn decode(v: u16) -> Self {
        HtCapInfo {
            ldpc_coding: leastx(1, v as u32) != 0,
            support_ch_width: midx(1, 1, v as u32) != 0,
            sm_power_save: midx(2, 2, v as u32) as u8,
            green_field: midx(4, 1, v as u32) != 0,
            short_gi_20: midx(5, 1, v as u32) != 0,
            short_gi_40: midx(6, 1, v as u32) != 0,
            tx_stbc: midx(7, 1, v as u32) != 0,
            rx_stbc: midx(8, 2, v as u32) as u8,
            delayed_block_ack: midx(10, 1, v as u32) != 0,
            max_amsdu_len: midx(11, 1, v as u32) != 0,
            dsss_cck_40: midx(12, 1, v as u32) != 0,
            rsrv: midx(13, 1, v as u32) != 0,
            intolerant_40: midx(14, 1, v as u32) != 0,
            lsig_txop_protect: midx(15, 1, v as u32) != 0,
        }
    }
}

/// A-MPDU Parameters, Std Figure 8-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmpduParams {
    pub max_length_exp: u8,
    pub min_spacing: u8,
    pub rsrv: u8,
}

impl AmpduParams {
    fn decode(v: u8) -> Self {
        AmpduParams {
            max_length_exp: leastx(2, v as u32) as u8,
            min_spacing: midx(2, 3, v as u32) as u8,
            rsrv: midx(5, 3, v as u32) as u8,
        }
    }
}

/// Supported MCS Set, Std Figure 8-101 — 16 bytes: a 77-bit Rx MCS bitmap
/// (64 bits from the first 8 bytes + low 13 bits of the next 2),
/// highest supported data rate, Tx MCS flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McsSet {
    pub rx_mcs_bitmap: Vec<bool>,
    pub tx_highest_sup_data_rate: u16,
    pub tx_mcs_set_defined: bool,
    pub tx_rx_mcs_set_not_equal: bool,
    pub tx_max_spatial_streams: u8,
    pub tx_unequal_modulation: bool,
}

impl McsSet {
    fn decode(b: &[u8; 16]) -> Self {
        let mut rx_mcs_bitmap = Vec::with_capacity(77);
        for byte in 0..8 {
            for bit in 0..8 {
                rx_mcs_bitmap.push(b[byte] & (1 << bit) != 0);
            }
        }
        let extra = u16::from_le_bytes([b[8], b[9]]);
        for bit in 0..13 {
            rx_mcs_bitmap.push(extra & (1 << bit) != 0);
        }
        // `=Q2HI`: vs[2] is bytes 10-11, distinct from the vs[1] bytes
        // (8-9) already consumed above for the top of the Rx bitmap.
        let highest_rate_field = u16::from_le_bytes([b[10], b[11]]);
        let tx_highest_sup_data_rate = leastx(10, highest_rate_field as u32) as u16;
        let tx_flags = b[12];
        McsSet {
            rx_mcs_bitmap,
            tx_highest_sup_data_rate,
            tx_mcs_set_defined: tx_flags & 0x1 != 0,
            tx_rx_mcs_set_not_equal: tx_flags & 0x2 != 0,
            tx_max_spatial_streams: midx(2, 2, tx_flags as u32) as u8,
            tx_unequal_modulation: midx(4, 1, tx_flags as u32) != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtCapabilities {
    pub ht_cap_info: HtCapInfo,
    pub ampdu_params: AmpduParams,
    pub mcs_set: McsSet,
    pub ht_extended_cap: u16,
    pub tx_beamforming_cap: u32,
    pub asel_cap: u8,
}

pub fn decode_capabilities(payload: &[u8]) -> Result<HtCapabilities, String> {
    if payload.len() < 26 {
        return Err(format!("ht-capabilities: need 26 bytes, have {}", payload.len()));
    }
    let ht_cap_info = HtCapInfo::decode(u16::from_le_bytes([payload[0], payload[1]]));
    let ampdu_params = AmpduParams::decode(payload[2]);
    let mut mcs_bytes = [0u8; 16];
    mcs_bytes.copy_from_slice(&payload[3..19]);
    let mcs_set = McsSet::decode(&mcs_bytes);
    let ht_extended_cap = u16::from_le_bytes([payload[19], payload[20]]);
    let tx_beamforming_cap = u32::from_le_bytes([payload[21], payload[22], payload[23], payload[24]]);
    let asel_cap = payload[25];
    Ok(HtCapabilities {
        ht_cap_info,
        ampdu_params,
        mcs_set,
        ht_extended_cap,
        tx_beamforming_cap,
        asel_cap,
    })
}

/// HT Operation, Std Figure 8-102: primary channel + three sub-words of
/// named bitmap flags, plus the Basic MCS Set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtOpInfo {
    pub secondary_ch_offset: u8,
    pub sta_ch_width: bool,
    pub rifs_mode: bool,
    pub ht_protection: u8,
    pub nongf_present: bool,
    pub obss_nonht_present: bool,
    pub dual_beacon: bool,
    pub dual_cts_protect: bool,
    pub stbc_beacon: bool,
    pub lsig_txop_protect: bool,
    pub pco_active: bool,
    pub pco_phase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtOperation {
    pub primary_channel: u8,
    pub ht_op_info: HtOpInfo,
    pub basic_mcs_set: McsSet,
}

pub fn decode_operation(payload: &[u8]) -> Result<HtOperation, String> {
    if payload.len() < 22 {
        return Err(format!("ht-operation: need 22 bytes, have {}", payload.len()));
    }
    let primary_channel = payload[0];
    let op1 = payload[1];
    let op2 = u16::from_le_bytes([payload[2], payload[3]]);
    let op3 = u16::from_le_bytes([payload[4], payload[5]]);
    let ht_op_info = HtOpInfo {
        secondary_ch_offset: leastx(2, op1 as u32) as u8,
        sta_ch_width: midx(2, 1, op1 as u32) != 0,
        rifs_mode: midx(3, 1, op1 as u32) != 0,
        ht_protection: leastx(2, op2 as u32) as u8,
        nongf_present: midx(2, 1, op2 as u32) != 0,
        obss_nonht_present: midx(4, 1, op2 as u32) != 0,
        dual_beacon: midx(6, 1, op2 as u32) != 0,
        dual_cts_protect: midx(7, 1, op2 as u32) != 0,
        stbc_beacon: midx(8, 1, op2 as u32) != 0,
        lsig_txop_protect: midx(0, 1, op3 as u32) != 0,
        pco_active: midx(1, 1, op3 as u32) != 0,
        pco_phase: midx(2, 1, op3 as u32) != 0,
    };
    let mut mcs_bytes = [0u8; 16];
    mcs_bytes.copy_from_slice(&payload[6..22]);
    Ok(HtOperation {
        primary_channel,
        ht_op_info,
        basic_mcs_set: McsSet::decode(&mcs_bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_capabilities_payload() {
        assert!(decode_capabilities(&[0u8; 10]).is_err());
    }

    #[test]
    fn decodes_full_capabilities_payload() {
        let payload = [0u8; 26];
        let caps = decode_capabilities(&payload).unwrap();
        assert!(!caps.ht_cap_info.ldpc_coding);
        assert_eq!(caps.mcs_set.rx_mcs_bitmap.len(), 77);
    }

    #[test]
    fn mcs_set_reads_highest_rate_from_bytes_ten_eleven() {
        let mut mcs_bytes = [0u8; 16];
        mcs_bytes[8] = 0xFF; // top of the Rx bitmap, must not leak into the rate
        mcs_bytes[9] = 0xFF;
        mcs_bytes[10] = 0x2C; // 300 Mbps == 0b01_0010_1100, low 10 bits
        mcs_bytes[11] = 0x01;
        let mcs_set = McsSet::decode(&mcs_bytes);
        assert_eq!(mcs_set.tx_highest_sup_data_rate, 300);
    }
}
