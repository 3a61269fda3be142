//! RSNE (48), Std 8.4.2.27: 2-byte version then an optional tail chain —
//! each field only consumes bytes if present; absence of remaining bytes
//! terminates the chain early rather than erroring.

use crate::cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteSelector {
    pub oui: [u8; 3],
    pub suite_type: u8,
}

fn read_suite(c: &mut Cursor<'_>) -> Option<SuiteSelector> {
    let bytes: [u8; 4] = c.read_array().ok()?;
    Some(SuiteSelector {
        oui: [bytes[0], bytes[1], bytes[2]],
        suite_type: bytes[3],
    })
}

fn read_suite_list(c: &mut Cursor<'_>) -> Option<Vec<SuiteSelector>> {
    let count: u16 = c.read_u16().ok()?;
    let mut list = Vec::with_capacity(count as usize);
    for _ in 0..count {
        list.push(read_suite(c)?);
    }
    Some(list)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsnCapabilities {
    pub preauth: bool,
    pub no_pairwise: bool,
    pub mfpr: bool,
    pub mfpc: bool,
    pub rsrv1: bool,
    pub peerkey_enabled: bool,
    pub spp_amsdu_cap: bool,
    pub spp_amsdu_req: bool,
    pub pbac: bool,
    pub ext_key_id: bool,
    pub ptksa_replay_counter: u8,
    pub gtksa_replay_counter: u8,
    pub rsrv2: u8,
}

impl RsnCapabilities {
    fn decode(v: u16) -> Self {
        use crate::bits::midx;
        RsnCapabilities {
            preauth: midx(0, 1, v as u32) != 0,
            no_pairwise: midx(1, 1, v as u32) != 0,
            mfpr: midx(6, 1, v as u32) != 0,
            mfpc: midx(7, 1, v as u32) != 0,
            rsrv1: midx(8, 1, v as u32) != 0,
            peerkey_enabled: midx(9, 1, v as u32) != 0,
            spp_amsdu_cap: midx(2, 1, v as u32) != 0,
            spp_amsdu_req: midx(3, 1, v as u32) != 0,
            pbac: midx(4, 1, v as u32) != 0,
            ext_key_id: midx(5, 1, v as u32) != 0,
            ptksa_replay_counter: midx(10, 2, v as u32) as u8,
            gtksa_replay_counter: midx(12, 2, v as u32) as u8,
            rsrv2: midx(14, 2, v as u32) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rsne {
    pub version: u16,
    pub group_data_cipher_suite: Option<SuiteSelector>,
    pub pairwise_cipher_suites: Option<Vec<SuiteSelector>>,
    pub akm_suites: Option<Vec<SuiteSelector>>,
    pub rsn_capabilities: Option<RsnCapabilities>,
    pub pmkids: Option<Vec<[u8; 16]>>,
    pub group_mgmt_cipher_suite: Option<SuiteSelector>,
}

pub fn decode(payload: &[u8]) -> Result<Rsne, String> {
    let mut c = Cursor::new(payload);
    let version = c.read_u16().map_err(|_| "rsne: missing version".to_string())?;
    let mut rsne = Rsne { version, ..Default::default() };

    if c.remaining() == 0 {
        return Ok(rsne);
    }
    rsne.group_data_cipher_suite = read_suite(&mut c);
    if rsne.group_data_cipher_suite.is_none() || c.remaining() == 0 {
        return Ok(rsne);
    }
    rsne.pairwise_cipher_suites = read_suite_list(&mut c);
    if rsne.pairwise_cipher_suites.is_none() || c.remaining() == 0 {
        return Ok(rsne);
    }
    rsne.akm_suites = read_suite_list(&mut c);
    if rsne.akm_suites.is_none() || c.remaining() == 0 {
        return Ok(rsne);
    }
    if let Ok(v) = c.read_u16() {
        rsne.rsn_capabilities = Some(RsnCapabilities::decode(v));
    }
    if c.remaining() == 0 {
        return Ok(rsne);
    }
    if let Ok(count) = c.read_u16() {
        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            match c.read_array::<16>() {
                Ok(id) => ids.push(id),
                Err(_) => break,
            }
        }
        rsne.pmkids = Some(ids);
    }
    if c.remaining() == 0 {
        return Ok(rsne);
    }
    rsne.group_mgmt_cipher_suite = read_suite(&mut c);
    Ok(rsne)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_only_rsne_decodes() {
        let rsne = decode(&[1, 0]).unwrap();
        assert_eq!(rsne.version, 1);
        assert!(rsne.group_data_cipher_suite.is_none());
    }

    #[test]
    fn full_chain_decodes_in_order() {
        let mut payload = vec![1, 0]; // version
        payload.extend_from_slice(&[0x00, 0x0f, 0xac, 0x04]); // group cipher CCMP
        payload.extend_from_slice(&[1, 0]); // pairwise count
        payload.extend_from_slice(&[0x00, 0x0f, 0xac, 0x04]);
        payload.extend_from_slice(&[1, 0]); // akm count
        payload.extend_from_slice(&[0x00, 0x0f, 0xac, 0x02]);
        payload.extend_from_slice(&[0x00, 0x00]); // rsn capabilities
        let rsne = decode(&payload).unwrap();
        assert_eq!(rsne.pairwise_cipher_suites.unwrap().len(), 1);
        assert_eq!(rsne.akm_suites.unwrap().len(), 1);
        assert!(rsne.rsn_capabilities.is_some());
        assert!(rsne.pmkids.is_none());
    }
}
