//! Test utilities shared across crates
//!
//! Builders for logical devices as each discovery path would produce them.

use protocol::Speed;

use crate::device::{Device, Interface};
use crate::names::NamesDb;

/// Build a device as the remote query path shapes it: interfaces carry a
/// class display string and no driver.
pub fn remote_device(busid: &str, product_display: &str, interface_classes: &[u8]) -> Device {
    let names = NamesDb::empty();
    let interfaces = interface_classes
        .iter()
        .map(|&class| Interface {
            class,
            subclass: 0,
            protocol: 0,
            class_display: names.class_display(class, 0, 0),
            driver: None,
        })
        .collect();

    Device {
        busid: busid.to_string(),
        path: format!("/sys/devices/usb/{busid}"),
        busnum: 1,
        devnum: 2,
        speed: Speed::High,
        id_vendor: 0x1234,
        id_product: 0x5678,
        bcd_device: 0x0100,
        class: 0,
        subclass: 0,
        protocol: 0,
        configuration_value: 1,
        num_configurations: 1,
        product_display: product_display.to_string(),
        class_display: names.class_display(0, 0, 0),
        interfaces,
    }
}

/// Build a device as the local enumerator shapes it: one interface per
/// driver name, empty string meaning unbound.
pub fn local_device(
    busid: &str,
    product_display: &str,
    configuration_value: u8,
    drivers: &[&str],
) -> Device {
    let mut device = remote_device(busid, product_display, &vec![0u8; drivers.len()]);
    device.configuration_value = configuration_value;
    for (interface, driver) in device.interfaces.iter_mut().zip(drivers) {
        interface.driver = Some(driver.to_string());
    }
    device
}
