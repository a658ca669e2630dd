//! Operation headers of the devlist exchange
//!
//! The exchange is a single fixed request/reply pair: a common operation
//! header in each direction, then a devlist header carrying the device
//! count. There is no versioning beyond the constant carried in the common
//! header.

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use std::io::{Read, Write};

use crate::codec::read_record;
use crate::error::Result;

/// Protocol version stamped into every common header
pub const PROTOCOL_VERSION: u16 = 0x0111;

/// Request the list of exported devices
pub const OP_REQ_DEVLIST: u16 = 0x8005;
/// Reply carrying the exported device list
pub const OP_REP_DEVLIST: u16 = 0x0005;

/// Common operation header (8 bytes), sent ahead of every message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCommon {
    pub version: u16,
    /// Operation code
    pub code: u16,
    /// Zero on requests; reply status from the peer otherwise
    pub status: u32,
}

impl OpCommon {
    /// Size of the header in bytes
    pub const WIRE_SIZE: usize = 8;

    /// Build a request header for `code`
    pub fn request(code: u16) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            code,
            status: 0,
        }
    }

    /// Read a common header from a reader
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; Self::WIRE_SIZE];
        read_record(reader, &mut raw, "common header")?;

        let mut buf = &raw[..];
        let version = buf.get_u16();
        let code = buf.get_u16();
        let status = buf.get_u32();

        Ok(Self {
            version,
            code,
            status,
        })
    }

    /// Write the header to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<BigEndian>(self.version)?;
        writer.write_u16::<BigEndian>(self.code)?;
        writer.write_u32::<BigEndian>(self.status)?;
        Ok(())
    }
}

/// Devlist reply header (4 bytes): the declared device count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevlistHeader {
    /// Number of device records that follow; zero is a valid empty list
    pub ndev: u32,
}

impl DevlistHeader {
    /// Size of the header in bytes
    pub const WIRE_SIZE: usize = 4;

    /// Read a devlist header from a reader
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; Self::WIRE_SIZE];
        read_record(reader, &mut raw, "devlist header")?;

        let mut buf = &raw[..];
        Ok(Self {
            ndev: buf.get_u32(),
        })
    }

    /// Write the header to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<BigEndian>(self.ndev)?;
        Ok(())
    }
}
