//! TSPEC (13), Std Figure 8-196: 3-byte TS Info followed by a fixed
//! sequence of u16/u32 fields.

use crate::bits::midx;
use crate::cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TsInfo {
    pub traffic_type: bool,
    pub tsid: u8,
    pub direction: u8,
    pub access_policy: u8,
    pub aggregation: bool,
    pub apsd: bool,
    pub user_priority: u8,
    pub ack_policy: u8,
    pub schedule: bool,
}

impl TsInfo {
    fn decode(b: [u8; 3]) -> Self {
        let v = (b[0] as u32) | (b[1] as u32) << 8 | (b[2] as u32) << 16;
        TsInfo {
            traffic_type: midx(0, 1, v) != 0,
            tsid: midx(1, 4, v) as u8,
            direction: midx(5, 2, v) as u8,
            access_policy: midx(7, 2, v) as u8,
            aggregation: midx(9, 1, v) != 0,
            apsd: midx(10, 1, v) != 0,
            user_priority: midx(11, 3, v) as u8,
            ack_policy: midx(14, 2, v) as u8,
            schedule: midx(16, 1, v) != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tspec {
    pub ts_info: TsInfo,
    pub nominal_msdu_size: u16,
    pub max_msdu_size: u16,
    pub min_service_interval: u32,
    pub max_service_interval: u32,
    pub inactivity_interval: u32,
    pub suspension_interval: u32,
    pub service_start_time: u32,
    pub min_data_rate: u32,
    pub mean_data_rate: u32,
    pub peak_data_rate: u32,
    pub burst_size: u32,
    pub delay_bound: u32,
    pub min_phy_rate: u32,
    pub surplus_bw_allowance: u16,
    pub medium_time: u16,
}

pub fn decode(payload: &[u8]) -> Result<Tspec, String> {
    if payload.len() < 55 {
        return Err(format!("tspec: need 55 bytes, have {}", payload.len()));
    }
    let mut c = Cursor::new(payload);
    let ts_info_bytes: [u8; 3] = c.read_array().map_err(|e| format!("tspec.ts-info: {:?}", e))?;
    let rd = |c: &mut Cursor<'_>, field: &str| -> Result<u16, String> {
        c.read_u16().map_err(|e| format!("tspec.{field}: {:?}", e))
    };
    let rd32 = |c: &mut Cursor<'_>, field: &str| -> Result<u32, String> {
        c.read_u32().map_err(|e| format!("tspec.{field}: {:?}", e))
    };
    Ok(Tspec {
        ts_info: TsInfo::decode(ts_info_bytes),
        nominal_msdu_size: rd(&mut c, "nominal-msdu-size")?,
        max_msdu_size: rd(&mut c, "max-msdu-size")?,
        min_service_interval: rd32(&mut c, "min-service-interval")?,
        max_service_interval: rd32(&mut c, "max-service-interval")?,
        inactivity_interval: rd32(&mut c, "inactivity-interval")?,
        suspension_interval: rd32(&mut c, "suspension-interval")?,
        service_start_time: rd32(&mut c, "service-start-time")?,
        min_data_rate: rd32(&mut c, "min-data-rate")?,
        mean_data_rate: rd32(&mut c, "mean-data-rate")?,
        peak_data_rate: rd32(&mut c, "peak-data-rate")?,
        burst_size: rd32(&mut c, "burst-size")?,
        delay_bound: rd32(&mut c, "delay-bound")?,
        min_phy_rate: rd32(&mut c, "min-phy-rate")?,
        surplus_bw_allowance: rd(&mut c, "surplus-bw-allowance")?,
        medium_time: rd(&mut c, "medium-time")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_payload() {
        assert!(decode(&[0u8; 10]).is_err());
    }

    #[test]
    fn decodes_zeroed_body() {
        let tspec = decode(&[0u8; 55]).unwrap();
        assert_eq!(tspec.nominal_msdu_size, 0);
        assert_eq!(tspec.medium_time, 0);
    }
}
