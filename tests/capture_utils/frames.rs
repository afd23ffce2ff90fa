#![cfg(test)]
#![allow(dead_code)]

use conlister::domain::{Frame, LinkType};
use etherparse::PacketBuilder;

pub fn tcp_frame(src: [u8; 4], sport: u16, dst: [u8; 4], dport: u16) -> Frame {
    let builder = PacketBuilder::ethernet2([0x02, 0, 0, 0, 0, 1], [0x02, 0, 0, 0, 0, 2])
        .ipv4(src, dst, 64)
        .tcp(sport, dport, 1000, 65535);
    let mut data = Vec::with_capacity(builder.size(0));
    builder.write(&mut data, &[]).expect("Failed to build TCP frame");
    Frame::new(LinkType::Ethernet, data)
}

pub fn udp_frame(src: [u8; 4], sport: u16, dst: [u8; 4], dport: u16) -> Frame {
    let builder = PacketBuilder::ethernet2([0x02, 0, 0, 0, 0, 1], [0x02, 0, 0, 0, 0, 2])
        .ipv4(src, dst, 64)
        .udp(sport, dport);
    let payload = [0u8; 16];
    let mut data = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut data, &payload).expect("Failed to build UDP frame");
    Frame::new(LinkType::Ethernet, data)
}
