use std::iter;

use crate::grib::sections::sect5::ComplexPacking;
use crate::grib::utils::{octet_length, BitwiseIterator};
use crate::grib::{GribError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Group {
    /// X1, added to every value of the group
    pub(crate) reference: u64,
    pub(crate) width: usize,
    pub(crate) length: usize,
}

/// Only general group splitting with at most primary missing values is
/// supported.
pub(crate) fn check_supported(complex: &ComplexPacking) -> Result<()> {
    if complex.group_method != 1 {
        return Err(GribError::UnsupportedFeature(format!(
            "Group splitting method {} (Code Table 5.4)",
            complex.group_method
        )));
    }
    if complex.missing_management > 1 {
        return Err(GribError::UnsupportedFeature(format!(
            "Missing value management {} (Code Table 5.5)",
            complex.missing_management
        )));
    }
    Ok(())
}

/// Reads the group references, widths and lengths blocks, each starting on an
/// octet boundary. Returns the groups and the number of octets consumed.
pub(crate) fn decode(num_bits: usize, complex: &ComplexPacking, slice: &[u8]) -> Result<(Vec<Group>, usize)> {
    check_supported(complex)?;

    let def = &complex.group_definition;
    let num_groups = def.num_groups;
    if num_groups == 0 {
        return Ok((Vec::new(), 0));
    }

    let references_end = octet_length(num_bits, num_groups);
    let widths_end = references_end + octet_length(def.group_width_bits, num_groups);
    let lengths_end = widths_end + octet_length(def.group_length_bits, num_groups);
    if lengths_end > slice.len() {
        return Err(GribError::FormatError(format!(
            "{} group descriptors need {} octets, Section 7 has {}",
            num_groups,
            lengths_end,
            slice.len()
        )));
    }

    let references = BitwiseIterator::new(&slice[..references_end], num_bits).take(num_groups);

    let widths = BitwiseIterator::new(&slice[references_end..widths_end], def.group_width_bits)
        .take(num_groups)
        .map(|v| def.group_width_reference.saturating_add(v));

    let lengths = BitwiseIterator::new(&slice[widths_end..lengths_end], def.group_length_bits)
        .take(num_groups - 1)
        .map(|v| {
            def.group_length_reference
                .saturating_add(def.group_length_increment.saturating_mul(v))
        })
        .chain(iter::once(def.group_length_last as u64));

    let groups: Vec<Group> = references
        .zip(widths)
        .zip(lengths)
        .map(|((reference, width), length)| Group {
            reference,
            width: width as usize,
            length: length as usize,
        })
        .collect();

    if groups.len() != num_groups {
        return Err(GribError::FormatError(format!(
            "Read {} of {} group descriptors",
            groups.len(),
            num_groups
        )));
    }

    Ok((groups, lengths_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grib::sections::sect5::GroupDefinition;
    use crate::grib::utils::pack_bits;

    fn packing(num_groups: usize, last: usize) -> ComplexPacking {
        ComplexPacking {
            group_method: 1,
            missing_management: 0,
            primary_missing: 0,
            secondary_missing: 0,
            group_definition: GroupDefinition {
                num_groups,
                group_width_reference: 1,
                group_width_bits: 4,
                group_length_reference: 2,
                group_length_increment: 3,
                group_length_last: last,
                group_length_bits: 3,
            },
        }
    }

    #[test]
    fn reads_descriptor_blocks() {
        let mut payload = pack_bits(&[10, 200, 7], 8);
        payload.extend(pack_bits(&[0, 3, 1], 4));
        payload.extend(pack_bits(&[1, 2, 0], 3));
        payload.push(0xff);

        let (groups, consumed) = decode(8, &packing(3, 4), &payload).unwrap();

        assert_eq!(consumed, 3 + 2 + 2);
        assert_eq!(
            groups,
            vec![
                Group { reference: 10, width: 1, length: 5 },
                Group { reference: 200, width: 4, length: 8 },
                Group { reference: 7, width: 2, length: 4 },
            ]
        );
    }

    #[test]
    fn truncated_descriptors_are_a_format_error() {
        let payload = pack_bits(&[10, 200, 7], 8);
        assert!(matches!(decode(8, &packing(3, 4), &payload), Err(GribError::FormatError(_))));
    }

    #[test]
    fn other_splitting_methods_are_unsupported() {
        let mut complex = packing(1, 1);
        complex.group_method = 0;
        assert!(matches!(decode(8, &complex, &[0; 8]), Err(GribError::UnsupportedFeature(_))));

        let mut complex = packing(1, 1);
        complex.missing_management = 2;
        assert!(matches!(decode(8, &complex, &[0; 8]), Err(GribError::UnsupportedFeature(_))));
    }
}
