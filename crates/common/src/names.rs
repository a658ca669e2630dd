//! USB name database
//!
//! Maps raw vendor/product and class/subclass/protocol identifiers to
//! human-readable strings using a `usb.ids`-format database file. The
//! database is a resource handle owned by the caller and passed by
//! reference into the discovery paths; lookups never fail and fall back to
//! placeholder text on a miss.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parsed name database. Immutable after construction; shared-reference
/// lookups are safe from any number of call sites.
#[derive(Debug, Default)]
pub struct NamesDb {
    vendors: HashMap<u16, String>,
    products: HashMap<(u16, u16), String>,
    classes: HashMap<u8, String>,
    subclasses: HashMap<(u8, u8), String>,
    protocols: HashMap<(u8, u8, u8), String>,
}

impl NamesDb {
    /// Empty database; every lookup resolves to placeholders.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and parse a `usb.ids`-format file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Load `path`, degrading to an empty database with a warning when the
    /// file cannot be read. Mirrors the listing tool's behavior of still
    /// producing output without a name database.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(db) => db,
            Err(err) => {
                warn!("failed to open {}: {err}", path.display());
                Self::empty()
            }
        }
    }

    /// Parse `usb.ids` text: vendor lines at column zero with products one
    /// tab deep; `C xx` opens a class section with subclasses one tab deep
    /// and protocols two. Other section keywords (`AT`, `HID`, ...) end the
    /// current section and are otherwise ignored.
    pub fn parse(text: &str) -> Self {
        enum Section {
            None,
            Vendor(u16),
            Class(u8),
        }

        let mut db = Self::default();
        let mut section = Section::None;
        let mut current_subclass: Option<u8> = None;

        for line in text.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("\t\t") {
                if let (Section::Class(class), Some(subclass)) = (&section, current_subclass)
                    && let Some((id, name)) = split_entry(rest)
                    && let Ok(protocol) = u8::from_str_radix(id, 16)
                {
                    db.protocols.insert((*class, subclass, protocol), name.to_string());
                }
            } else if let Some(rest) = line.strip_prefix('\t') {
                match section {
                    Section::Vendor(vendor) => {
                        if let Some((id, name)) = split_entry(rest)
                            && let Ok(product) = u16::from_str_radix(id, 16)
                        {
                            db.products.insert((vendor, product), name.to_string());
                        }
                    }
                    Section::Class(class) => {
                        if let Some((id, name)) = split_entry(rest)
                            && let Ok(subclass) = u8::from_str_radix(id, 16)
                        {
                            db.subclasses.insert((class, subclass), name.to_string());
                            current_subclass = Some(subclass);
                        }
                    }
                    Section::None => {}
                }
            } else if let Some(rest) = line.strip_prefix("C ") {
                current_subclass = None;
                if let Some((id, name)) = split_entry(rest)
                    && let Ok(class) = u8::from_str_radix(id, 16)
                {
                    db.classes.insert(class, name.to_string());
                    section = Section::Class(class);
                } else {
                    section = Section::None;
                }
            } else {
                current_subclass = None;
                // Vendor ids are exactly four hex digits; anything else is
                // another section keyword (AT, HID, ...) and ends parsing of
                // the current section.
                if let Some((id, name)) = split_entry(line)
                    && id.len() == 4
                    && let Ok(vendor) = u16::from_str_radix(id, 16)
                {
                    db.vendors.insert(vendor, name.to_string());
                    section = Section::Vendor(vendor);
                } else {
                    section = Section::None;
                }
            }
        }

        db
    }

    /// `"<vendor> : <product> (vvvv:pppp)"`, with placeholders on a miss.
    pub fn product_display(&self, vendor: u16, product: u16) -> String {
        let vend = self
            .vendors
            .get(&vendor)
            .map(String::as_str)
            .unwrap_or("unknown vendor");
        let prod = self
            .products
            .get(&(vendor, product))
            .map(String::as_str)
            .unwrap_or("unknown product");
        format!("{vend} : {prod} ({vendor:04x}:{product:04x})")
    }

    /// `"<class> / <subclass> / <protocol> (cc/ss/pp)"`, with placeholders
    /// on a miss. The all-zero triple means the class is defined per
    /// interface.
    pub fn class_display(&self, class: u8, subclass: u8, protocol: u8) -> String {
        if class == 0 && subclass == 0 && protocol == 0 {
            return "(Defined at Interface level) (00/00/00)".to_string();
        }

        let c = self
            .classes
            .get(&class)
            .map(String::as_str)
            .unwrap_or("unknown class");
        let s = self
            .subclasses
            .get(&(class, subclass))
            .map(String::as_str)
            .unwrap_or("unknown subclass");
        let p = self
            .protocols
            .get(&(class, subclass, protocol))
            .map(String::as_str)
            .unwrap_or("unknown protocol");
        format!("{c} / {s} / {p} ({class:02x}/{subclass:02x}/{protocol:02x})")
    }
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (id, name) = line.split_once(|c: char| c.is_whitespace())?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
# Sample database
1d6b  Linux Foundation
\t0002  2.0 root hub
\t0003  3.0 root hub
046d  Logitech, Inc.
\tc534  Unifying Receiver

C 03  Human Interface Device
\t01  Boot Interface Subclass
\t\t01  Keyboard
\t\t02  Mouse
C 09  Hub
\t00  Unused
\t\t00  Full speed (or root) hub
AT 01  AT commands: v.25ter
";

    #[test]
    fn test_product_lookup() {
        let db = NamesDb::parse(SAMPLE);
        assert_eq!(
            db.product_display(0x1d6b, 0x0002),
            "Linux Foundation : 2.0 root hub (1d6b:0002)"
        );
    }

    #[test]
    fn test_product_miss_uses_placeholders() {
        let db = NamesDb::parse(SAMPLE);
        assert_eq!(
            db.product_display(0x1d6b, 0x9999),
            "Linux Foundation : unknown product (1d6b:9999)"
        );
        assert_eq!(
            db.product_display(0xdead, 0xbeef),
            "unknown vendor : unknown product (dead:beef)"
        );
    }

    #[test]
    fn test_class_lookup() {
        let db = NamesDb::parse(SAMPLE);
        assert_eq!(
            db.class_display(0x03, 0x01, 0x02),
            "Human Interface Device / Boot Interface Subclass / Mouse (03/01/02)"
        );
    }

    #[test]
    fn test_class_defined_at_interface_level() {
        let db = NamesDb::parse(SAMPLE);
        assert_eq!(
            db.class_display(0, 0, 0),
            "(Defined at Interface level) (00/00/00)"
        );
    }

    #[test]
    fn test_class_miss_uses_placeholders() {
        let db = NamesDb::parse(SAMPLE);
        assert_eq!(
            db.class_display(0x09, 0x00, 0x42),
            "Hub / Unused / unknown protocol (09/00/42)"
        );
    }

    #[test]
    fn test_other_sections_are_ignored() {
        let db = NamesDb::parse(SAMPLE);
        // The "AT 01" line must not register as a vendor or a class.
        assert_eq!(db.vendors.len(), 2);
        assert_eq!(db.classes.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let db = NamesDb::load(file.path()).unwrap();
        assert_eq!(
            db.product_display(0x046d, 0xc534),
            "Logitech, Inc. : Unifying Receiver (046d:c534)"
        );
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let db = NamesDb::load_or_empty(Path::new("/nonexistent/usb.ids"));
        assert_eq!(
            db.product_display(0x1d6b, 0x0002),
            "unknown vendor : unknown product (1d6b:0002)"
        );
    }
}
