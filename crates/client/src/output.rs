//! Device list rendering
//!
//! Two presentation modes over any writer: a human-readable block per
//! device, and a single `#`-delimited line per device for machine parsing.
//! The parsable field order and delimiter are a frozen contract for
//! downstream tooling.

use common::Device;
use std::io::{self, Write};

/// Field delimiter of the parsable format.
pub const DELIMITER: char = '#';

/// Render `devices` in the selected mode.
pub fn print_devices<W: Write>(out: &mut W, devices: &[Device], parsable: bool) -> io::Result<()> {
    for device in devices {
        if parsable {
            write_parsable(out, device)?;
        } else {
            write_block(out, device)?;
        }
    }
    Ok(())
}

/// Multi-line block: bus id, product, path, class string, one indented
/// line per interface, then a blank separator line.
fn write_block<W: Write>(out: &mut W, device: &Device) -> io::Result<()> {
    writeln!(out, "{:>8}: {}", device.busid, device.product_display)?;
    writeln!(out, "{:>8}: {}", " ", device.path)?;
    writeln!(out, "{:>8}: {}", " ", device.class_display)?;

    for (index, interface) in device.interfaces.iter().enumerate() {
        match interface.driver.as_deref() {
            // Locally enumerated interface: show its bound driver.
            Some(driver) => writeln!(
                out,
                "{:>8}: {}:{}.{} -> {}",
                " ",
                device.busid,
                device.configuration_value,
                index,
                if driver.is_empty() { "none" } else { driver },
            )?,
            None => writeln!(
                out,
                "{:>8}: {:2} - {}",
                " ", index, interface.class_display,
            )?,
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Single line: `busid=<busid>#usbid=<product>#` followed by one
/// `<busid>:<conf>.<idx>=<value>#` field per interface. The value is the
/// bound driver for local devices and the class string for remote ones.
fn write_parsable<W: Write>(out: &mut W, device: &Device) -> io::Result<()> {
    write!(
        out,
        "busid={busid}{DELIMITER}usbid={usbid}{DELIMITER}",
        busid = device.busid,
        usbid = device.product_display,
    )?;

    for (index, interface) in device.interfaces.iter().enumerate() {
        let value = interface
            .driver
            .as_deref()
            .unwrap_or(&interface.class_display);
        write!(
            out,
            "{}:{}.{}={value}{DELIMITER}",
            device.busid, device.configuration_value, index,
        )?;
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::test_utils::{local_device, remote_device};

    fn render(devices: &[Device], parsable: bool) -> String {
        let mut out = Vec::new();
        print_devices(&mut out, devices, parsable).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn blocks_follow_the_declared_shape() {
        // Two devices: the first with one interface, the second with none.
        let devices = vec![
            remote_device("1-1", "Acme Widget (1234:5678)", &[0x03]),
            remote_device("1-2", "Acme Gadget (1234:9abc)", &[]),
        ];

        let text = render(&devices, false);
        let blocks: Vec<&str> = text.trim_end().split("\n\n").collect();
        assert_eq!(blocks.len(), 2);

        let first: Vec<&str> = blocks[0].lines().collect();
        assert_eq!(first.len(), 4);
        assert!(first[0].ends_with("1-1: Acme Widget (1234:5678)"));
        assert!(first[3].contains(" 0 - "));

        // Second device has no interface line.
        assert_eq!(blocks[1].lines().count(), 3);
    }

    #[test]
    fn local_block_shows_bound_drivers() {
        let devices = vec![local_device("1-1", "Acme Widget", 1, &["hub", ""])];

        let text = render(&devices, false);
        assert!(text.contains("1-1:1.0 -> hub"));
        assert!(text.contains("1-1:1.1 -> none"));
    }

    #[test]
    fn parsable_line_layout_is_fixed() {
        let devices = vec![local_device("1-1", "Widget", 1, &["hub"])];

        let text = render(&devices, true);
        assert_eq!(text, "busid=1-1#usbid=Widget#1-1:1.0=hub#\n");
    }

    #[test]
    fn parsable_unbound_driver_is_an_empty_field() {
        let devices = vec![local_device("2-3.1", "Widget", 2, &[""])];

        let text = render(&devices, true);
        assert_eq!(text, "busid=2-3.1#usbid=Widget#2-3.1:2.0=#\n");
    }

    #[test]
    fn parsable_remote_uses_class_strings() {
        let devices = vec![remote_device("1-1", "Widget", &[0x09])];

        let text = render(&devices, true);
        assert_eq!(
            text,
            "busid=1-1#usbid=Widget#1-1:1.0=unknown class / unknown subclass / unknown protocol (09/00/00)#\n"
        );
    }

    #[test]
    fn one_line_per_device() {
        let devices = vec![
            local_device("1-1", "A", 1, &["hub"]),
            local_device("1-2", "B", 1, &[]),
        ];

        let text = render(&devices, true);
        assert_eq!(text.lines().count(), 2);
    }
}
