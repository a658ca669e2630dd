//! Local device enumerator
//!
//! Walks the device registry directory, filters entries through the bus-id
//! grammar, and shapes per-device attribute reads into the same logical
//! model the remote path produces. No wire protocol is involved; the
//! registry is read directly.

use common::{Device, Error, Interface, NamesDb, Result};
use protocol::Speed;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Default device registry on Linux.
pub const DEFAULT_REGISTRY: &str = "/sys/bus/usb/devices";

/// Check a directory-entry name against the bus-id grammar: one or more
/// digits, `-`, one or more digits, then zero or more `.digits` groups.
/// Root hubs (`usb1`) and interface directories (`1-1:1.0`) do not match.
pub fn is_bus_id(name: &str) -> bool {
    let Some((bus, ports)) = name.split_once('-') else {
        return false;
    };
    if bus.is_empty() || !bus.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    ports
        .split('.')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

/// Enumerate the devices present in `registry`.
///
/// Ordering follows directory iteration order, which the filesystem does
/// not guarantee to be stable across runs. A device can disappear between
/// the listing and its attribute reads; entries whose attributes cannot be
/// read are skipped with a warning rather than failing the pass. Only a
/// registry that cannot be opened at all is fatal.
pub fn enumerate(registry: &Path, names: &NamesDb) -> Result<Vec<Device>> {
    let entries = fs::read_dir(registry).map_err(|source| Error::RegistryUnavailable {
        path: registry.to_path_buf(),
        source,
    })?;

    let mut devices = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::RegistryUnavailable {
            path: registry.to_path_buf(),
            source,
        })?;

        let name = entry.file_name();
        let Some(busid) = name.to_str() else { continue };
        if !is_bus_id(busid) {
            continue;
        }

        match read_device(&entry.path(), busid, names) {
            Ok(device) => devices.push(device),
            Err(err) => warn!(busid, error = %err, "skipping device"),
        }
    }

    debug!(count = devices.len(), "local devices enumerated");
    Ok(devices)
}

/// Read one device and its interfaces from the registry.
///
/// Configuration value, interface count, and vendor/product ids are
/// required; the remaining attributes are informational and degrade to
/// zero/unknown when absent.
fn read_device(dir: &Path, busid: &str, names: &NamesDb) -> Result<Device> {
    let configuration_value = read_attr_u8(dir, busid, "bConfigurationValue")?;
    let num_interfaces = read_attr_u8(dir, busid, "bNumInterfaces")?;
    let id_vendor = read_attr_hex16(dir, busid, "idVendor")?;
    let id_product = read_attr_hex16(dir, busid, "idProduct")?;

    let busnum = read_attr(dir, busid, "busnum")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let devnum = read_attr(dir, busid, "devnum")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let speed = read_attr(dir, busid, "speed")
        .map(|s| Speed::from_sysfs(&s))
        .unwrap_or(Speed::Unknown);
    let bcd_device = read_attr(dir, busid, "bcdDevice")
        .ok()
        .and_then(|s| u16::from_str_radix(&s, 16).ok())
        .unwrap_or(0);
    let class = read_attr_hex8_or_zero(dir, busid, "bDeviceClass");
    let subclass = read_attr_hex8_or_zero(dir, busid, "bDeviceSubClass");
    let protocol = read_attr_hex8_or_zero(dir, busid, "bDeviceProtocol");

    let mut interfaces = Vec::with_capacity(num_interfaces as usize);
    for index in 0..num_interfaces {
        let if_dir = dir.join(format!("{busid}:{configuration_value}.{index}"));
        let if_class = read_attr_hex8_or_zero(&if_dir, busid, "bInterfaceClass");
        let if_subclass = read_attr_hex8_or_zero(&if_dir, busid, "bInterfaceSubClass");
        let if_protocol = read_attr_hex8_or_zero(&if_dir, busid, "bInterfaceProtocol");

        interfaces.push(Interface {
            class: if_class,
            subclass: if_subclass,
            protocol: if_protocol,
            class_display: names.class_display(if_class, if_subclass, if_protocol),
            driver: Some(read_driver(&if_dir)),
        });
    }

    Ok(Device {
        busid: busid.to_string(),
        path: dir.display().to_string(),
        busnum,
        devnum,
        speed,
        id_vendor,
        id_product,
        bcd_device,
        class,
        subclass,
        protocol,
        configuration_value,
        num_configurations: read_attr_u8(dir, busid, "bNumConfigurations").unwrap_or(1),
        product_display: names.product_display(id_vendor, id_product),
        class_display: names.class_display(class, subclass, protocol),
        interfaces,
    })
}

/// Name of the driver bound to an interface, empty when unbound.
fn read_driver(if_dir: &Path) -> String {
    fs::read_link(if_dir.join("driver"))
        .ok()
        .and_then(|target| {
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

fn read_attr(dir: &Path, busid: &str, attribute: &str) -> Result<String> {
    fs::read_to_string(dir.join(attribute))
        .map(|value| value.trim().to_string())
        .map_err(|source| Error::Attribute {
            busid: busid.to_string(),
            attribute: attribute.to_string(),
            source,
        })
}

/// Decimal attribute; an empty file (an unconfigured device's
/// bConfigurationValue) reads as zero.
fn read_attr_u8(dir: &Path, busid: &str, attribute: &str) -> Result<u8> {
    let value = read_attr(dir, busid, attribute)?;
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| invalid(busid, attribute, &value))
}

fn read_attr_hex16(dir: &Path, busid: &str, attribute: &str) -> Result<u16> {
    let value = read_attr(dir, busid, attribute)?;
    u16::from_str_radix(&value, 16).map_err(|_| invalid(busid, attribute, &value))
}

fn read_attr_hex8_or_zero(dir: &Path, busid: &str, attribute: &str) -> u8 {
    read_attr(dir, busid, attribute)
        .ok()
        .and_then(|value| u8::from_str_radix(&value, 16).ok())
        .unwrap_or(0)
}

fn invalid(busid: &str, attribute: &str, value: &str) -> Error {
    Error::Attribute {
        busid: busid.to_string(),
        attribute: attribute.to_string(),
        source: io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unparseable value {value:?}"),
        ),
    }
}
