//! Logical device model shared by both discovery paths
//!
//! The remote query client shapes decoded wire records into this model;
//! the local enumerator builds it directly from attribute reads. Devices
//! are constructed fresh per discovery pass, never mutated afterwards, and
//! discarded once rendered.

use protocol::{ExportedDevice, Speed};

use crate::names::NamesDb;

/// One interface of a discovered device.
///
/// Ordinal position within the parent device is the vector index; ordering
/// is significant and preserved as declared by the source.
#[derive(Debug, Clone)]
pub struct Interface {
    pub class: u8,
    pub subclass: u8,
    pub protocol: u8,
    /// Display string resolved from the class triple
    pub class_display: String,
    /// Bound kernel driver. `Some` only for locally enumerated interfaces,
    /// with an empty string when no driver is bound.
    pub driver: Option<String>,
}

/// One discovered USB device together with its interfaces.
#[derive(Debug, Clone)]
pub struct Device {
    /// Hierarchical bus position, e.g. `1-2.3`
    pub busid: String,
    /// Device path (on the exporting host, or in the local registry)
    pub path: String,
    pub busnum: u32,
    pub devnum: u32,
    pub speed: Speed,
    pub id_vendor: u16,
    pub id_product: u16,
    /// Device release code (bcdDevice)
    pub bcd_device: u16,
    pub class: u8,
    pub subclass: u8,
    pub protocol: u8,
    /// Active configuration value
    pub configuration_value: u8,
    pub num_configurations: u8,
    /// Display string resolved from vendor/product ids
    pub product_display: String,
    /// Display string resolved from the device class triple
    pub class_display: String,
    pub interfaces: Vec<Interface>,
}

impl Device {
    /// Shape one decoded wire record (with its eagerly-read interfaces)
    /// into the logical model, resolving display strings through `names`.
    pub fn from_exported(exported: &ExportedDevice, names: &NamesDb) -> Self {
        let record = &exported.device;

        let interfaces = exported
            .interfaces
            .iter()
            .map(|interface| Interface {
                class: interface.interface_class,
                subclass: interface.interface_subclass,
                protocol: interface.interface_protocol,
                class_display: names.class_display(
                    interface.interface_class,
                    interface.interface_subclass,
                    interface.interface_protocol,
                ),
                driver: None,
            })
            .collect();

        Self {
            busid: record.busid.clone(),
            path: record.path.clone(),
            busnum: record.busnum,
            devnum: record.devnum,
            speed: record.speed,
            id_vendor: record.id_vendor,
            id_product: record.id_product,
            bcd_device: record.bcd_device,
            class: record.device_class,
            subclass: record.device_subclass,
            protocol: record.device_protocol,
            configuration_value: record.configuration_value,
            num_configurations: record.num_configurations,
            product_display: names.product_display(record.id_vendor, record.id_product),
            class_display: names.class_display(
                record.device_class,
                record.device_subclass,
                record.device_protocol,
            ),
            interfaces,
        }
    }
}
