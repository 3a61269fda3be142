//! TCLAS (14), Std 8.4.2.29: classifier-type-dispatched frame classifier.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ethernet {
    pub source: [u8; 6],
    pub dest: [u8; 6],
    pub ether_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpUdpIpv4 {
    pub source_ip: [u8; 4],
    pub dest_ip: [u8; 4],
    pub source_port: u16,
    pub dest_port: u16,
    pub dscp: u8,
    pub protocol: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpUdpIpv6 {
    pub source_ip: [u8; 16],
    pub dest_ip: [u8; 16],
    pub source_port: u16,
    pub dest_port: u16,
    pub flow_label: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ieee8021Q {
    pub tci: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOffset<'a> {
    pub offset: u16,
    pub value: &'a [u8],
    pub mask: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ieee8021D {
    pub version: u8,
    pub dscp: u8,
    pub user_priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TclasBody<'a> {
    Ethernet(Ethernet),
    TcpUdpIpv4(TcpUdpIpv4),
    TcpUdpIpv6(TcpUdpIpv6),
    Ieee8021Q(Ieee8021Q),
    FilterOffset(FilterOffset<'a>),
    Ieee8021D(Ieee8021D),
    Unknown { classifier_type: u8, raw: &'a [u8] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tclas<'a> {
    pub user_priority: u8,
    pub body: TclasBody<'a>,
}

pub fn decode(payload: &[u8]) -> Result<Tclas<'_>, String> {
    if payload.len() < 2 {
        return Err(format!("tclas: need 2 bytes, have {}", payload.len()));
    }
    let classifier_type = payload[0];
    let user_priority = payload[1];
    let rest = &payload[2..];

    let body = match classifier_type {
        0 => {
            if rest.len() < 14 {
                return Err(format!("tclas.ethernet: need 14 bytes, have {}", rest.len()));
            }
            let mut source = [0u8; 6];
            let mut dest = [0u8; 6];
            source.copy_from_slice(&rest[0..6]);
            dest.copy_from_slice(&rest[6..12]);
            TclasBody::Ethernet(Ethernet {
                source,
                dest,
                ether_type: u16::from_be_bytes([rest[12], rest[13]]),
            })
        }
        1 if rest.len() >= 16 && rest.len() < 40 => {
            let mut source_ip = [0u8; 4];
            let mut dest_ip = [0u8; 4];
            source_ip.copy_from_slice(&rest[0..4]);
            dest_ip.copy_from_slice(&rest[4..8]);
            TclasBody::TcpUdpIpv4(TcpUdpIpv4 {
                source_ip,
                dest_ip,
                source_port: u16::from_be_bytes([rest[8], rest[9]]),
                dest_port: u16::from_be_bytes([rest[10], rest[11]]),
                dscp: rest[12],
                protocol: rest[13],
            })
        }
        1 if rest.len() >= 41 => {
            let mut source_ip = [0u8; 16];
            let mut dest_ip = [0u8; 16];
            source_ip.copy_from_slice(&rest[0..16]);
            dest_ip.copy_from_slice(&rest[16..32]);
            TclasBody::TcpUdpIpv6(TcpUdpIpv6 {
                source_ip,
                dest_ip,
                source_port: u16::from_be_bytes([rest[32], rest[33]]),
                dest_port: u16::from_be_bytes([rest[34], rest[35]]),
                flow_label: [rest[36], rest[37], rest[38]],
            })
        }
        2 if rest.len() >= 2 => TclasBody::Ieee8021Q(Ieee8021Q {
            tci: u16::from_be_bytes([rest[0], rest[1]]),
        }),
        3 if rest.len() >= 2 => {
            let offset = u16::from_be_bytes([rest[0], rest[1]]);
            let body_rest = &rest[2..];
            let half = body_rest.len() / 2;
            TclasBody::FilterOffset(FilterOffset {
                offset,
                value: &body_rest[..half],
                mask: &body_rest[half..],
            })
        }
        5 if rest.len() >= 1 => TclasBody::Ieee8021D(Ieee8021D {
            version: rest[0] >> 5,
            dscp: (rest[0] >> 3) & 0x3,
            user_priority: rest[0] & 0x7,
        }),
        _ => TclasBody::Unknown { classifier_type, raw: rest },
    };

    Ok(Tclas { user_priority, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_classifier_type_falls_back_to_raw() {
        let tclas = decode(&[9, 0, 1, 2, 3]).unwrap();
        assert!(matches!(tclas.body, TclasBody::Unknown { classifier_type: 9, .. }));
    }

    #[test]
    fn rejects_payload_shorter_than_header() {
        assert!(decode(&[0]).is_err());
    }
}
