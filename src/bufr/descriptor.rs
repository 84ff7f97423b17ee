//! BUFR descriptor handling
//!
//! A BUFR descriptor is a 16-bit F-X-Y triplet: F (2 bits) selects the
//! descriptor class, X (6 bits) the table category, Y (8 bits) the entry.
//! Descriptors are written in 6-digit numeric form (`307080` = F 3, X 07,
//! Y 080) in configuration and in WMO documentation; this module converts
//! between the numeric form, the parts, and the 2-octet wire encoding used
//! in section 3.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Descriptor class, derived from the F value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// F = 0: element descriptor, resolved against Table B
    Element,
    /// F = 1: replication of the following X descriptors Y times
    /// (Y = 0 means delayed replication, count carried in the data)
    Replication,
    /// F = 2: operator descriptor (not used by the synop template)
    Operator,
    /// F = 3: sequence descriptor, resolved against Table D
    Sequence,
}

/// A single F-X-Y descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor {
    f: u8,
    x: u8,
    y: u8,
}

impl Descriptor {
    /// Create a descriptor from its parts
    pub fn new(f: u8, x: u8, y: u8) -> Result<Self> {
        if f > 3 {
            return Err(Error::bufr_encoding(format!("descriptor F value {f} exceeds 3")));
        }
        if x > 63 {
            return Err(Error::bufr_encoding(format!("descriptor X value {x} exceeds 63")));
        }
        Ok(Self { f, x, y })
    }

    /// Create a descriptor from 6-digit numeric form (`307080`, `7030`, ...)
    ///
    /// Leading zeros are implied, so element descriptors appear as values
    /// below 100 000.
    pub fn from_numeric(code: u32) -> Result<Self> {
        if code > 399_999 {
            return Err(Error::bufr_encoding(format!(
                "descriptor code {code} outside the F-XX-YYY range"
            )));
        }
        if (code % 1_000) > 255 {
            return Err(Error::bufr_encoding(format!(
                "descriptor code {code} has Y value {} exceeding 255",
                code % 1_000
            )));
        }
        let f = (code / 100_000) as u8;
        let x = ((code / 1_000) % 100) as u8;
        let y = (code % 1_000) as u8;
        Self::new(f, x, y)
    }

    /// The descriptor in 6-digit numeric form
    pub fn to_numeric(self) -> u32 {
        self.f as u32 * 100_000 + self.x as u32 * 1_000 + self.y as u32
    }

    /// The 2-octet wire form used in section 3: F and X packed into the
    /// first octet, Y in the second
    pub fn to_bytes(self) -> [u8; 2] {
        [(self.f << 6) | self.x, self.y]
    }

    /// Decode a descriptor from its 2-octet wire form
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            f: bytes[0] >> 6,
            x: bytes[0] & 0x3f,
            y: bytes[1],
        }
    }

    /// F value (descriptor class)
    pub fn f(self) -> u8 {
        self.f
    }

    /// X value (category, or descriptor count for replications)
    pub fn x(self) -> u8 {
        self.x
    }

    /// Y value (entry, or replication count for replications)
    pub fn y(self) -> u8 {
        self.y
    }

    /// Classify the descriptor by its F value
    pub fn kind(self) -> DescriptorKind {
        match self.f {
            0 => DescriptorKind::Element,
            1 => DescriptorKind::Replication,
            2 => DescriptorKind::Operator,
            _ => DescriptorKind::Sequence,
        }
    }

    /// True for delayed replications (F = 1, Y = 0), whose count is carried
    /// in the data section by a 0 31 YYY factor element
    pub fn is_delayed_replication(self) -> bool {
        self.f == 1 && self.y == 0
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.to_numeric())
    }
}

impl FromStr for Descriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::bufr_encoding(format!("invalid descriptor '{s}'")))?;
        Self::from_numeric(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_round_trip() {
        let d = Descriptor::from_numeric(307080).unwrap();
        assert_eq!(d.f(), 3);
        assert_eq!(d.x(), 7);
        assert_eq!(d.y(), 80);
        assert_eq!(d.to_numeric(), 307080);
        assert_eq!(d.kind(), DescriptorKind::Sequence);
    }

    #[test]
    fn test_element_leading_zeros() {
        let d = Descriptor::from_numeric(7030).unwrap();
        assert_eq!((d.f(), d.x(), d.y()), (0, 7, 30));
        assert_eq!(d.kind(), DescriptorKind::Element);
        assert_eq!(d.to_string(), "007030");
    }

    #[test]
    fn test_wire_form() {
        let d = Descriptor::from_numeric(307080).unwrap();
        assert_eq!(d.to_bytes(), [0xc7, 0x50]);
        assert_eq!(Descriptor::from_bytes([0xc7, 0x50]), d);
    }

    #[test]
    fn test_replication_classification() {
        let fixed = Descriptor::from_numeric(103002).unwrap();
        assert_eq!(fixed.kind(), DescriptorKind::Replication);
        assert!(!fixed.is_delayed_replication());
        assert_eq!(fixed.x(), 3);
        assert_eq!(fixed.y(), 2);

        let delayed = Descriptor::from_numeric(101000).unwrap();
        assert!(delayed.is_delayed_replication());
        assert_eq!(delayed.x(), 1);
    }

    #[test]
    fn test_parse_from_str() {
        let d: Descriptor = "307080".parse().unwrap();
        assert_eq!(d.to_numeric(), 307080);
        assert!("droplet".parse::<Descriptor>().is_err());
        assert!("407080".parse::<Descriptor>().is_err());
    }

    #[test]
    fn test_invalid_parts_rejected() {
        assert!(Descriptor::from_numeric(64_000).is_err()); // X = 64
        assert!(Descriptor::from_numeric(1_999).is_err()); // Y = 999
    }
}
