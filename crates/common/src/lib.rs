//! Common utilities for usbls
//!
//! Shared pieces of the discovery tool: the logical device model produced
//! by both the remote query client and the local enumerator, the caller
//! facing error taxonomy, the USB name database handle, and logging setup.

pub mod device;
pub mod error;
pub mod logging;
pub mod names;
pub mod test_utils;

pub use device::{Device, Interface};
pub use error::{Error, Result};
pub use logging::setup_logging;
pub use names::NamesDb;
