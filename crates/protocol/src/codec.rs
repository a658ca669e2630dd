//! Blocking codec for the devlist exchange
//!
//! The stream layout is count-driven with no resynchronization markers: a
//! common header, a devlist header declaring the device count, then per
//! device one fixed-size record followed immediately by its declared number
//! of interface records. A failed read anywhere leaves the stream in an
//! unknown position, so every failure aborts the whole exchange and no
//! partial list is ever returned.

use bytes::Buf;
use std::io::{self, Read, Write};

use crate::error::{ProtocolError, Result};
use crate::messages::{DevlistHeader, OP_REP_DEVLIST, OP_REQ_DEVLIST, OpCommon};
use crate::types::{DeviceRecord, InterfaceRecord};

/// One decoded device together with its eagerly-read interfaces, in
/// declared order.
#[derive(Debug, Clone)]
pub struct ExportedDevice {
    pub device: DeviceRecord,
    pub interfaces: Vec<InterfaceRecord>,
}

/// Perform the devlist exchange on `stream`.
///
/// Sends the list request, validates the reply code, then drains the
/// declared number of device records, each with its declared number of
/// interface records. The interface records for a device are read before
/// the next device record; the stream is ambiguous otherwise.
///
/// # Errors
///
/// [`ProtocolError::UnexpectedReply`] if the peer answers with anything but
/// the devlist reply code (nothing further is read), and
/// [`ProtocolError::Truncated`] / [`ProtocolError::Io`] on short reads or
/// transport failures at any point.
pub fn request_device_list<S: Read + Write>(stream: &mut S) -> Result<Vec<ExportedDevice>> {
    OpCommon::request(OP_REQ_DEVLIST).write_to(stream)?;
    stream.flush()?;

    let reply = OpCommon::read_from(stream)?;
    if reply.code != OP_REP_DEVLIST {
        return Err(ProtocolError::UnexpectedReply {
            expected: OP_REP_DEVLIST,
            actual: reply.code,
        });
    }

    let header = DevlistHeader::read_from(stream)?;

    // The count is peer-controlled; cap the pre-allocation, not the list.
    let mut devices = Vec::with_capacity(header.ndev.min(64) as usize);
    for _ in 0..header.ndev {
        let device = DeviceRecord::read_from(stream)?;

        let mut interfaces = Vec::with_capacity(device.num_interfaces as usize);
        for _ in 0..device.num_interfaces {
            interfaces.push(InterfaceRecord::read_from(stream)?);
        }

        devices.push(ExportedDevice { device, interfaces });
    }

    Ok(devices)
}

/// Fill `buf` from `reader`, mapping a short read to [`ProtocolError::Truncated`]
/// for the named record.
pub(crate) fn read_record<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    record: &'static str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => ProtocolError::Truncated {
            record,
            expected: buf.len(),
        },
        _ => ProtocolError::Io(err),
    })
}

/// Consume a NUL-padded fixed-width string field from `buf`.
pub(crate) fn take_fixed_str(buf: &mut impl Buf, len: usize) -> String {
    let mut raw = vec![0u8; len];
    buf.copy_to_slice(&mut raw);

    let end = raw.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Write `value` as a NUL-padded fixed-width field, clamped so the field
/// always ends with at least one NUL.
pub(crate) fn write_fixed_str<W: Write>(writer: &mut W, value: &str, len: usize) -> Result<()> {
    let mut field = vec![0u8; len];
    let bytes = value.as_bytes();
    let n = bytes.len().min(len - 1);
    field[..n].copy_from_slice(&bytes[..n]);
    writer.write_all(&field)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_fixed_str_stops_at_nul() {
        let raw = [b'1', b'-', b'2', 0, b'x', b'y', 0, 0];
        let mut buf = &raw[..];
        assert_eq!(take_fixed_str(&mut buf, raw.len()), "1-2");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_take_fixed_str_without_nul() {
        let raw = [b'a'; 4];
        let mut buf = &raw[..];
        assert_eq!(take_fixed_str(&mut buf, 4), "aaaa");
    }

    #[test]
    fn test_fixed_str_roundtrip() {
        let mut field = Vec::new();
        write_fixed_str(&mut field, "3-4.5", 32).unwrap();
        assert_eq!(field.len(), 32);

        let mut buf = &field[..];
        assert_eq!(take_fixed_str(&mut buf, 32), "3-4.5");
    }
}
