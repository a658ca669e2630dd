//! Wire record definitions
//!
//! Fixed-size binary records of the devlist exchange. Every multi-byte
//! integer is big-endian on the wire and converted to host order as the
//! record is decoded; no field is consumed before conversion. String fields
//! occupy a fixed width and are NUL-padded.

use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;
use std::fmt;
use std::io::Write;

use crate::codec::{read_record, take_fixed_str, write_fixed_str};
use crate::error::Result;

/// Width of the bus-id field in a device record.
pub const BUSID_LEN: usize = 32;
/// Width of the path field in a device record.
pub const PATH_LEN: usize = 256;

/// Link speed of an exported device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Unknown,
    /// 1.5 Mbps
    Low,
    /// 12 Mbps
    Full,
    /// 480 Mbps
    High,
    /// 53.3-480 Mbps
    Wireless,
    /// 5000 Mbps
    Super,
}

impl Speed {
    /// Decode the wire representation. Codes outside the table decode to
    /// `Unknown` rather than failing; the field is informational only.
    pub fn from_wire(value: u32) -> Self {
        match value {
            1 => Speed::Low,
            2 => Speed::Full,
            3 => Speed::High,
            4 => Speed::Wireless,
            5 => Speed::Super,
            _ => Speed::Unknown,
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            Speed::Unknown => 0,
            Speed::Low => 1,
            Speed::Full => 2,
            Speed::High => 3,
            Speed::Wireless => 4,
            Speed::Super => 5,
        }
    }

    /// Parse the `speed` attribute string the local device registry exposes
    /// (megabits per second, e.g. `"480"`).
    pub fn from_sysfs(value: &str) -> Self {
        match value {
            "1.5" => Speed::Low,
            "12" => Speed::Full,
            "480" => Speed::High,
            "53.3-480" => Speed::Wireless,
            "5000" => Speed::Super,
            _ => Speed::Unknown,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Speed::Unknown => "Unknown Speed",
            Speed::Low => "Low Speed(1.5Mbps)",
            Speed::Full => "Full Speed(12Mbps)",
            Speed::High => "High Speed(480Mbps)",
            Speed::Wireless => "Wireless",
            Speed::Super => "Super Speed(5000Mbps)",
        };
        f.write_str(label)
    }
}

/// One exported device as it appears on the wire (312 bytes).
///
/// Exactly `num_interfaces` [`InterfaceRecord`]s follow this record before
/// the next device record; the stream carries no other framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Hierarchical bus position, e.g. `1-2.3`
    pub busid: String,
    /// Device path on the exporting host
    pub path: String,
    pub busnum: u32,
    pub devnum: u32,
    pub speed: Speed,
    pub id_vendor: u16,
    pub id_product: u16,
    /// Device release code (bcdDevice)
    pub bcd_device: u16,
    pub device_class: u8,
    pub device_subclass: u8,
    pub device_protocol: u8,
    /// Active configuration value
    pub configuration_value: u8,
    pub num_configurations: u8,
    pub num_interfaces: u8,
}

impl DeviceRecord {
    /// Size of the record in bytes
    pub const WIRE_SIZE: usize = BUSID_LEN + PATH_LEN + 24;

    /// Read one device record from a reader
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; Self::WIRE_SIZE];
        read_record(reader, &mut raw, "device record")?;

        let mut buf = &raw[..];
        let busid = take_fixed_str(&mut buf, BUSID_LEN);
        let path = take_fixed_str(&mut buf, PATH_LEN);
        let busnum = buf.get_u32();
        let devnum = buf.get_u32();
        let speed = Speed::from_wire(buf.get_u32());
        let id_vendor = buf.get_u16();
        let id_product = buf.get_u16();
        let bcd_device = buf.get_u16();
        let device_class = buf.get_u8();
        let device_subclass = buf.get_u8();
        let device_protocol = buf.get_u8();
        let configuration_value = buf.get_u8();
        let num_configurations = buf.get_u8();
        let num_interfaces = buf.get_u8();

        Ok(Self {
            busid,
            path,
            busnum,
            devnum,
            speed,
            id_vendor,
            id_product,
            bcd_device,
            device_class,
            device_subclass,
            device_protocol,
            configuration_value,
            num_configurations,
            num_interfaces,
        })
    }

    /// Write the record to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_fixed_str(writer, &self.busid, BUSID_LEN)?;
        write_fixed_str(writer, &self.path, PATH_LEN)?;
        writer.write_u32::<BigEndian>(self.busnum)?;
        writer.write_u32::<BigEndian>(self.devnum)?;
        writer.write_u32::<BigEndian>(self.speed.to_wire())?;
        writer.write_u16::<BigEndian>(self.id_vendor)?;
        writer.write_u16::<BigEndian>(self.id_product)?;
        writer.write_u16::<BigEndian>(self.bcd_device)?;
        writer.write_u8(self.device_class)?;
        writer.write_u8(self.device_subclass)?;
        writer.write_u8(self.device_protocol)?;
        writer.write_u8(self.configuration_value)?;
        writer.write_u8(self.num_configurations)?;
        writer.write_u8(self.num_interfaces)?;
        Ok(())
    }
}

/// One interface of an exported device as it appears on the wire (4 bytes).
///
/// The fourth byte is reserved padding and is not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub interface_class: u8,
    pub interface_subclass: u8,
    pub interface_protocol: u8,
}

impl InterfaceRecord {
    /// Size of the record in bytes, padding included
    pub const WIRE_SIZE: usize = 4;

    /// Read one interface record from a reader
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; Self::WIRE_SIZE];
        read_record(reader, &mut raw, "interface record")?;

        Ok(Self {
            interface_class: raw[0],
            interface_subclass: raw[1],
            interface_protocol: raw[2],
        })
    }

    /// Write the record to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.interface_class)?;
        writer.write_u8(self.interface_subclass)?;
        writer.write_u8(self.interface_protocol)?;
        writer.write_u8(0)?;
        Ok(())
    }
}
