//! Devlist wire protocol
//!
//! This crate defines the binary exchange used to query a peer host for the
//! USB devices it exports: operation codes, the fixed-size headers and
//! records, and a blocking codec that drives the request/reply pair over
//! any `Read + Write` stream.
//!
//! # Example
//!
//! ```no_run
//! use protocol::request_device_list;
//! use std::net::TcpStream;
//!
//! let mut stream = TcpStream::connect("remote-host:3240")?;
//! let devices = request_device_list(&mut stream)?;
//! for exported in &devices {
//!     println!("{}: {} interfaces", exported.device.busid, exported.interfaces.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod error;
pub mod messages;
pub mod types;

pub use codec::{ExportedDevice, request_device_list};
pub use error::{ProtocolError, Result};
pub use messages::{DevlistHeader, OP_REP_DEVLIST, OP_REQ_DEVLIST, OpCommon, PROTOCOL_VERSION};
pub use types::{BUSID_LEN, DeviceRecord, InterfaceRecord, PATH_LEN, Speed};
