//! BUFR message assembly and encoding
//!
//! A [`BufrMessage`] is created from a [`MessageConfig`], which fixes the
//! identification-section fields and the data-description template. Creation
//! expands the template into element slots, all initially missing except the
//! delayed-replication factors, which are preset from the configured counts.
//! Fields are then assigned by ecCodes-style key name — plain (`airTemperature`,
//! meaning the first occurrence) or ranked (`#2#timePeriod`) — and
//! [`BufrMessage::encode`] serializes the complete edition-4 message:
//!
//! - section 0: `BUFR` indicator, total length, edition
//! - section 1: 22-octet identification (centre, category, tables version,
//!   typical date/time)
//! - section 3: subset count, observed/compressed flags, the unexpanded
//!   template descriptor
//! - section 4: bit-packed element values, missing encoded as all ones
//! - section 5: `7777`
//!
//! Assignment validates the packed form immediately, so out-of-range values
//! are reported against the key being set rather than at serialization time.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;

use crate::bufr::bits::{self, BitWriter};
use crate::bufr::descriptor::Descriptor;
use crate::bufr::tables::ElementSpec;
use crate::bufr::template::{self, Slot};
use crate::constants;
use crate::{Error, Result};

/// Maximum encodable message length (section 0 carries a 24-bit total)
const MAX_MESSAGE_LEN: usize = (1 << 24) - 1;

/// A value assigned to a message field
#[derive(Debug, Clone, PartialEq)]
pub enum BufrValue {
    /// Floating-point measurement
    Double(f64),
    /// Integer or code-table value
    Int(i64),
    /// Character data (CCITT IA5 elements only)
    Str(String),
}

impl BufrValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Str(_) => None,
        }
    }
}

impl From<f64> for BufrValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i64> for BufrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for BufrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for BufrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Identification-section fields and expansion parameters for one message
#[derive(Debug, Clone)]
pub struct MessageConfig {
    /// BUFR edition (only 4 is supported)
    pub edition: u8,
    /// Master table number (0 = meteorology)
    pub master_table: u8,
    /// Originating/generating centre
    pub originating_centre: u16,
    /// Originating/generating sub-centre
    pub originating_subcentre: u16,
    /// Update sequence number
    pub update_sequence: u8,
    /// Data category
    pub data_category: u8,
    /// International data sub-category
    pub intl_sub_category: u8,
    /// Local data sub-category
    pub local_sub_category: u8,
    /// Master tables version number
    pub master_tables_version: u8,
    /// Local tables version number
    pub local_tables_version: u8,
    /// Observed-data flag in section 3
    pub observed: bool,
    /// Compressed-data flag in section 3 (only uncompressed is supported)
    pub compressed: bool,
    /// Unexpanded data-description template
    pub template: u32,
    /// Typical date/time of the message content
    pub typical_time: NaiveDateTime,
    /// Counts for the template's delayed replications, in encounter order
    pub delayed_counts: Vec<u32>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            edition: constants::BUFR_EDITION,
            master_table: constants::MASTER_TABLE_NUMBER,
            originating_centre: constants::ORIGINATING_CENTRE,
            originating_subcentre: constants::ORIGINATING_SUBCENTRE,
            update_sequence: constants::UPDATE_SEQUENCE_NUMBER,
            data_category: constants::DATA_CATEGORY,
            intl_sub_category: constants::INTL_DATA_SUBCATEGORY,
            local_sub_category: constants::LOCAL_DATA_SUBCATEGORY,
            master_tables_version: constants::MASTER_TABLES_VERSION,
            local_tables_version: constants::LOCAL_TABLES_VERSION,
            observed: true,
            compressed: false,
            template: constants::SYNOP_LAND_TEMPLATE,
            typical_time: NaiveDate::from_ymd_opt(2000, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            delayed_counts: vec![
                constants::CLOUD_LAYER_COUNT,
                constants::CLOUD_BELOW_STATION_COUNT,
            ],
        }
    }
}

impl MessageConfig {
    /// Create a configuration with the standard synop defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the typical date/time written to section 1
    pub fn with_typical_time(mut self, typical_time: NaiveDateTime) -> Self {
        self.typical_time = typical_time;
        self
    }

    /// Set the unexpanded data-description template
    pub fn with_template(mut self, template: u32) -> Self {
        self.template = template;
        self
    }

    /// Set the originating centre and sub-centre
    pub fn with_centre(mut self, centre: u16, subcentre: u16) -> Self {
        self.originating_centre = centre;
        self.originating_subcentre = subcentre;
        self
    }

    /// Set the delayed replication counts
    pub fn with_delayed_counts(mut self, counts: Vec<u32>) -> Self {
        self.delayed_counts = counts;
        self
    }

    /// Set the remaining identification-section fields
    pub fn with_identification(
        mut self,
        update_sequence: u8,
        data_category: u8,
        intl_sub_category: u8,
        local_sub_category: u8,
        master_tables_version: u8,
        local_tables_version: u8,
    ) -> Self {
        self.update_sequence = update_sequence;
        self.data_category = data_category;
        self.intl_sub_category = intl_sub_category;
        self.local_sub_category = local_sub_category;
        self.master_tables_version = master_tables_version;
        self.local_tables_version = local_tables_version;
        self
    }

    /// Check the configuration against what this encoder supports
    pub fn validate(&self) -> Result<()> {
        if self.edition != 4 {
            return Err(Error::bufr_encoding(format!(
                "unsupported BUFR edition {} (only edition 4 is produced)",
                self.edition
            )));
        }
        if self.compressed {
            return Err(Error::bufr_encoding(
                "compressed data sections are not supported",
            ));
        }
        let year = self.typical_time.year();
        if !(0..=u16::MAX as i32).contains(&year) {
            return Err(Error::bufr_encoding(format!(
                "typical year {year} does not fit section 1"
            )));
        }
        Ok(())
    }
}

/// An assembled BUFR message with one uncompressed data subset
#[derive(Debug)]
pub struct BufrMessage {
    config: MessageConfig,
    slots: Vec<Slot>,
    values: Vec<Option<BufrValue>>,
    name_index: HashMap<&'static str, Vec<usize>>,
}

impl BufrMessage {
    /// Create an all-missing message for the configured template
    pub fn new(config: MessageConfig) -> Result<Self> {
        config.validate()?;
        let slots = template::expand_template(config.template, &config.delayed_counts)?;

        // replication factors carry real counts, never missing
        let mut values: Vec<Option<BufrValue>> = vec![None; slots.len()];
        let mut counts = config.delayed_counts.iter().copied();
        for (idx, slot) in slots.iter().enumerate() {
            if slot.spec.code / 1_000 == 31 {
                if let Some(count) = counts.next() {
                    values[idx] = Some(BufrValue::Int(count as i64));
                }
            }
        }

        let mut name_index: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (idx, slot) in slots.iter().enumerate() {
            name_index.entry(slot.spec.name).or_default().push(idx);
        }

        Ok(Self {
            config,
            slots,
            values,
            name_index,
        })
    }

    /// The message configuration
    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    /// Number of element slots in the expanded template
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when `key` (plain or ranked) resolves against the template
    pub fn contains_key(&self, key: &str) -> bool {
        match parse_key(key) {
            Ok((name, occurrence)) => self.resolve(&name, occurrence).is_ok(),
            Err(_) => false,
        }
    }

    /// Assign a field by key name
    ///
    /// A plain key addresses the first occurrence of the element name; a
    /// ranked key `#n#name` addresses the n-th. The packed form is validated
    /// immediately: unknown keys and out-of-range values are errors and leave
    /// the message unchanged.
    pub fn set(&mut self, key: &str, value: impl Into<BufrValue>) -> Result<()> {
        let (name, occurrence) = parse_key(key)?;
        self.set_at(&name, occurrence, value.into())
    }

    /// Assign the n-th occurrence (1-based) of an element name
    pub fn set_at(&mut self, name: &str, occurrence: usize, value: BufrValue) -> Result<()> {
        let idx = self.resolve(name, occurrence)?;
        pack_field(self.slots[idx].spec, &value)?;
        self.values[idx] = Some(value);
        Ok(())
    }

    /// Current value of a field, if assigned
    pub fn get(&self, key: &str) -> Option<&BufrValue> {
        let (name, occurrence) = parse_key(key).ok()?;
        let idx = self.resolve(&name, occurrence).ok()?;
        self.values[idx].as_ref()
    }

    /// Serialize the complete message
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = BitWriter::new();
        for (slot, value) in self.slots.iter().zip(&self.values) {
            match value {
                Some(value) => match pack_field(slot.spec, value)? {
                    PackedField::Bits(bits) => writer.write_bits(bits, slot.spec.width)?,
                    PackedField::Chars(text) => writer.write_chars(&text, slot.spec.width)?,
                },
                None => writer.write_missing(slot.spec.width)?,
            }
        }
        let data = writer.into_bytes();

        let section1 = build_section1(&self.config);
        let section3 = build_section3(&self.config)?;
        let section4_len = 4 + data.len();
        let total = 8 + section1.len() + section3.len() + section4_len + 4;
        if total > MAX_MESSAGE_LEN {
            return Err(Error::bufr_encoding(format!(
                "message length {total} exceeds the 24-bit section 0 limit"
            )));
        }

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"BUFR");
        push_u24(&mut out, total as u32);
        out.push(self.config.edition);
        out.extend_from_slice(&section1);
        out.extend_from_slice(&section3);
        push_u24(&mut out, section4_len as u32);
        out.push(0);
        out.extend_from_slice(&data);
        out.extend_from_slice(b"7777");
        Ok(out)
    }

    fn resolve(&self, name: &str, occurrence: usize) -> Result<usize> {
        if occurrence == 0 {
            return Err(Error::bufr_encoding("key ranks are 1-based"));
        }
        self.name_index
            .get(name)
            .and_then(|indices| indices.get(occurrence - 1))
            .copied()
            .ok_or_else(|| {
                if occurrence == 1 {
                    Error::key_not_found(name)
                } else {
                    Error::key_not_found(format!("#{occurrence}#{name}"))
                }
            })
    }
}

/// Packed representation of one field
enum PackedField {
    Bits(u64),
    Chars(String),
}

/// Compute the packed form of a value, validating range and type
///
/// Numeric packing is `round(value * 10^scale) - reference`; the all-ones
/// pattern is the missing indicator, so the top of the range is excluded.
fn pack_field(spec: &ElementSpec, value: &BufrValue) -> Result<PackedField> {
    if spec.is_character() {
        return match value {
            BufrValue::Str(text) => Ok(PackedField::Chars(text.clone())),
            _ => Err(Error::bufr_encoding(format!(
                "numeric value assigned to character element {}",
                spec.name
            ))),
        };
    }

    let value = value.as_f64().ok_or_else(|| {
        Error::bufr_encoding(format!(
            "character value assigned to numeric element {}",
            spec.name
        ))
    })?;
    if !value.is_finite() {
        return Err(Error::value_out_of_range(spec.name, value));
    }

    let scaled = (value * 10f64.powi(spec.scale)).round();
    if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
        return Err(Error::value_out_of_range(spec.name, value));
    }
    let offset = scaled as i64 - spec.reference;
    if offset < 0 {
        return Err(Error::value_out_of_range(spec.name, value));
    }
    let packed = offset as u64;
    if packed >= bits::missing_pattern(spec.width) {
        return Err(Error::value_out_of_range(spec.name, value));
    }
    Ok(PackedField::Bits(packed))
}

/// Split an ecCodes-style key into name and 1-based occurrence
fn parse_key(key: &str) -> Result<(String, usize)> {
    static RANKED: OnceLock<Regex> = OnceLock::new();
    let ranked = RANKED.get_or_init(|| Regex::new(r"^#(\d+)#(.+)$").unwrap_or_else(|_| unreachable!()));

    if let Some(captures) = ranked.captures(key) {
        let occurrence: usize = captures[1]
            .parse()
            .map_err(|_| Error::key_not_found(key))?;
        Ok((captures[2].to_string(), occurrence))
    } else {
        Ok((key.to_string(), 1))
    }
}

/// Build the 22-octet edition-4 identification section
fn build_section1(config: &MessageConfig) -> Vec<u8> {
    let typical = &config.typical_time;
    let mut out = Vec::with_capacity(22);
    push_u24(&mut out, 22);
    out.push(config.master_table);
    push_u16(&mut out, config.originating_centre);
    push_u16(&mut out, config.originating_subcentre);
    out.push(config.update_sequence);
    out.push(0); // no optional section 2
    out.push(config.data_category);
    out.push(config.intl_sub_category);
    out.push(config.local_sub_category);
    out.push(config.master_tables_version);
    out.push(config.local_tables_version);
    push_u16(&mut out, typical.year() as u16);
    out.push(typical.month() as u8);
    out.push(typical.day() as u8);
    out.push(typical.hour() as u8);
    out.push(typical.minute() as u8);
    out.push(typical.second() as u8);
    out
}

/// Build the data-description section for one uncompressed subset
fn build_section3(config: &MessageConfig) -> Result<Vec<u8>> {
    let descriptor = Descriptor::from_numeric(config.template)?;
    let mut out = Vec::with_capacity(9);
    push_u24(&mut out, 9);
    out.push(0);
    push_u16(&mut out, 1);
    let mut flags = 0u8;
    if config.observed {
        flags |= 0x80;
    }
    if config.compressed {
        flags |= 0x40;
    }
    out.push(flags);
    out.extend_from_slice(&descriptor.to_bytes());
    Ok(out)
}

fn push_u24(out: &mut Vec<u8>, value: u32) {
    out.push((value >> 16) as u8);
    out.push((value >> 8) as u8);
    out.push(value as u8);
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.push((value >> 8) as u8);
    out.push(value as u8);
}
