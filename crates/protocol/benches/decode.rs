//! Benchmarks for devlist record decoding
//!
//! Measures single-record encode/decode and a full exchange over an
//! in-memory peer.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use protocol::{
    DeviceRecord, DevlistHeader, InterfaceRecord, OP_REP_DEVLIST, OpCommon, PROTOCOL_VERSION,
    Speed, request_device_list,
};
use std::io::{self, Cursor, Read, Write};

struct MockPeer {
    reply: Cursor<Vec<u8>>,
}

impl Read for MockPeer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reply.read(buf)
    }
}

impl Write for MockPeer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn sample_device(i: u32) -> DeviceRecord {
    DeviceRecord {
        busid: format!("1-{}", i + 1),
        path: format!("/sys/devices/pci0000:00/0000:00:14.0/usb1/1-{}", i + 1),
        busnum: 1,
        devnum: i + 2,
        speed: Speed::High,
        id_vendor: 0x046d,
        id_product: 0xc000 + i as u16,
        bcd_device: 0x0100,
        device_class: 0x00,
        device_subclass: 0x00,
        device_protocol: 0x00,
        configuration_value: 1,
        num_configurations: 1,
        num_interfaces: 2,
    }
}

fn encode_devlist(ndev: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    OpCommon {
        version: PROTOCOL_VERSION,
        code: OP_REP_DEVLIST,
        status: 0,
    }
    .write_to(&mut buf)
    .unwrap();
    DevlistHeader { ndev }.write_to(&mut buf).unwrap();
    for i in 0..ndev {
        let device = sample_device(i);
        device.write_to(&mut buf).unwrap();
        for _ in 0..device.num_interfaces {
            InterfaceRecord {
                interface_class: 0x03,
                interface_subclass: 0x01,
                interface_protocol: 0x01,
            }
            .write_to(&mut buf)
            .unwrap();
        }
    }
    buf
}

fn benchmark_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");

    let device = sample_device(0);
    group.bench_function("encode_device_record", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(DeviceRecord::WIRE_SIZE);
            black_box(&device).write_to(&mut buf).unwrap();
            buf
        })
    });

    let mut encoded = Vec::new();
    device.write_to(&mut encoded).unwrap();
    group.bench_function("decode_device_record", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&encoded[..]));
            DeviceRecord::read_from(&mut cursor).unwrap()
        })
    });

    group.finish();
}

fn benchmark_devlist(c: &mut Criterion) {
    let mut group = c.benchmark_group("devlist");

    for ndev in [1u32, 16, 128] {
        let reply = encode_devlist(ndev);
        group.bench_function(format!("exchange_{ndev}_devices"), |b| {
            b.iter(|| {
                let mut peer = MockPeer {
                    reply: Cursor::new(reply.clone()),
                };
                request_device_list(&mut peer).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_records, benchmark_devlist);
criterion_main!(benches);
