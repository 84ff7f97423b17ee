//! Descriptor sequence expansion
//!
//! Expands an unexpanded descriptor list (normally the single template
//! 3 07 080) into the flat, ordered list of element slots that section 4 is
//! packed from. Sequence descriptors recurse through Table D; replication
//! descriptors repeat their group, with delayed replication counts resolved
//! up front from the counts supplied by the message configuration, in the
//! order the delayed replications are encountered.
//!
//! Each slot records the 1-based occurrence of its element name within the
//! whole expansion, which is what ranked keys (`#2#timePeriod`) address.

use std::collections::HashMap;

use crate::bufr::descriptor::{Descriptor, DescriptorKind};
use crate::bufr::tables::{self, ElementSpec};
use crate::{Error, Result};

/// Sequence nesting deeper than this indicates a cycle in the tables
const MAX_NESTING_DEPTH: usize = 32;

/// One element slot in an expanded template
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    /// The Table B entry backing this slot
    pub spec: &'static ElementSpec,
    /// 1-based occurrence of this element name within the expansion
    pub occurrence: usize,
}

/// Expand a descriptor list into ordered element slots
///
/// `delayed_counts` supplies one replication count per delayed replication,
/// in encounter order. Supplying too few counts is an error; extra counts
/// are ignored.
pub fn expand(codes: &[u32], delayed_counts: &[u32]) -> Result<Vec<Slot>> {
    let mut slots = Vec::new();
    let mut delayed = delayed_counts.iter().copied();
    expand_group(codes, &mut delayed, &mut slots, 0)?;
    assign_occurrences(&mut slots);
    Ok(slots)
}

/// Expand a single Table D sequence, normally the message template
pub fn expand_template(template: u32, delayed_counts: &[u32]) -> Result<Vec<Slot>> {
    let seq = tables::find_sequence(template).ok_or_else(|| {
        Error::bufr_encoding(format!("unknown template {template:06}"))
    })?;
    expand(seq.descriptors, delayed_counts)
}

fn expand_group(
    codes: &[u32],
    delayed: &mut impl Iterator<Item = u32>,
    slots: &mut Vec<Slot>,
    depth: usize,
) -> Result<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::bufr_encoding("descriptor nesting exceeds supported depth"));
    }

    let mut i = 0;
    while i < codes.len() {
        let desc = Descriptor::from_numeric(codes[i])?;
        match desc.kind() {
            DescriptorKind::Element => {
                push_element(codes[i], slots)?;
                i += 1;
            }
            DescriptorKind::Sequence => {
                let seq = tables::find_sequence(codes[i]).ok_or_else(|| {
                    Error::bufr_encoding(format!("unknown sequence {:06}", codes[i]))
                })?;
                expand_group(seq.descriptors, delayed, slots, depth + 1)?;
                i += 1;
            }
            DescriptorKind::Replication => {
                let group_len = desc.x() as usize;
                if desc.is_delayed_replication() {
                    // the factor element directly follows the replication
                    let factor = codes.get(i + 1).copied().ok_or_else(|| {
                        Error::bufr_encoding("delayed replication missing its factor element")
                    })?;
                    if factor / 1_000 != 31 {
                        return Err(Error::bufr_encoding(format!(
                            "delayed replication followed by {factor:06}, not a class-31 factor"
                        )));
                    }
                    push_element(factor, slots)?;

                    let count = delayed.next().ok_or_else(|| {
                        Error::bufr_encoding(
                            "no replication count supplied for delayed replication",
                        )
                    })?;
                    let group = group_slice(codes, i + 2, group_len)?;
                    for _ in 0..count {
                        expand_group(group, delayed, slots, depth + 1)?;
                    }
                    i += 2 + group_len;
                } else {
                    let group = group_slice(codes, i + 1, group_len)?;
                    for _ in 0..desc.y() {
                        expand_group(group, delayed, slots, depth + 1)?;
                    }
                    i += 1 + group_len;
                }
            }
            DescriptorKind::Operator => {
                return Err(Error::bufr_encoding(format!(
                    "operator descriptor {:06} is not supported",
                    codes[i]
                )));
            }
        }
    }
    Ok(())
}

fn push_element(code: u32, slots: &mut Vec<Slot>) -> Result<()> {
    let spec = tables::find_element(code)
        .ok_or_else(|| Error::bufr_encoding(format!("unknown element {code:06}")))?;
    slots.push(Slot { spec, occurrence: 0 });
    Ok(())
}

fn group_slice(codes: &[u32], start: usize, len: usize) -> Result<&[u32]> {
    codes.get(start..start + len).ok_or_else(|| {
        Error::bufr_encoding("replication group extends past the end of its sequence")
    })
}

fn assign_occurrences(slots: &mut [Slot]) {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for slot in slots.iter_mut() {
        let count = counts.entry(slot.spec.name).or_insert(0);
        *count += 1;
        slot.occurrence = *count;
    }
}
