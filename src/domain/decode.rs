use std::net::IpAddr;
use std::time::SystemTime;

use etherparse::{NetSlice, SlicedPacket, TransportSlice};

use super::{ConnectionRecord, Frame, LinkType};

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86dd;
const NULL_HEADER_LEN: usize = 4;
const SLL_HEADER_LEN: usize = 16;
const SLL2_HEADER_LEN: usize = 20;

/// Extract the TCP endpoints of a captured frame.
///
/// Returns `None` for anything that is not TCP over IPv4/IPv6, including
/// truncated frames and link types we do not know how to strip.
pub fn decode_frame(frame: &Frame, seen: SystemTime) -> Option<ConnectionRecord> {
    let sliced = slice(frame.link_type, &frame.data)?;

    let (source_ip, destination_ip) = match &sliced.net {
        Some(NetSlice::Ipv4(ipv4)) => (
            IpAddr::V4(ipv4.header().source_addr()),
            IpAddr::V4(ipv4.header().destination_addr()),
        ),
        Some(NetSlice::Ipv6(ipv6)) => (
            IpAddr::V6(ipv6.header().source_addr()),
            IpAddr::V6(ipv6.header().destination_addr()),
        ),
        _ => return None,
    };

    match &sliced.transport {
        Some(TransportSlice::Tcp(tcp)) => Some(ConnectionRecord::new(
            source_ip,
            tcp.source_port(),
            destination_ip,
            tcp.destination_port(),
            seen,
        )),
        _ => None,
    }
}

fn slice(link_type: LinkType, data: &[u8]) -> Option<SlicedPacket<'_>> {
    match link_type {
        LinkType::Ethernet => SlicedPacket::from_ethernet(data).ok(),
        LinkType::RawIp => SlicedPacket::from_ip(data).ok(),
        LinkType::Null => SlicedPacket::from_ip(data.get(NULL_HEADER_LEN..)?).ok(),
        LinkType::LinuxSll => {
            let protocol = read_u16(data, 14)?;
            slice_ip_payload(protocol, data.get(SLL_HEADER_LEN..)?)
        }
        LinkType::LinuxSll2 => {
            let protocol = read_u16(data, 0)?;
            slice_ip_payload(protocol, data.get(SLL2_HEADER_LEN..)?)
        }
        LinkType::Other(_) => None,
    }
}

fn slice_ip_payload(protocol: u16, payload: &[u8]) -> Option<SlicedPacket<'_>> {
    match protocol {
        ETHERTYPE_IPV4 | ETHERTYPE_IPV6 => SlicedPacket::from_ip(payload).ok(),
        _ => None,
    }
}

fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}
