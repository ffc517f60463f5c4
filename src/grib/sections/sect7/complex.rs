use crate::grib::sections::sect5::{ComplexPacking, CompressionContext};
use crate::grib::sections::sect7::groups::{self, Group};
use crate::grib::sections::sect7::simple::SimpleDecoderIterator;
use crate::grib::utils::BitReader;
use crate::grib::{GribError, Result};

pub(crate) fn decode(
    ctx: &CompressionContext,
    complex: &ComplexPacking,
    num_points: usize,
    slice: &[u8],
) -> Result<Vec<Option<f64>>> {
    let (groups, groups_num_bytes) = groups::decode(ctx.num_bits, complex, slice)?;

    let unpacked = unpack(
        &groups,
        ctx.num_bits,
        complex.missing_management,
        num_points,
        &slice[groups_num_bytes..],
    )?;

    Ok(SimpleDecoderIterator::new(unpacked.into_iter(), ctx).collect())
}

/// Reads every group's packed values with one running bit cursor, no
/// realignment between groups, and adds the group reference. With primary
/// missing value management, an all-ones value marks a missing point; so does
/// a zero-width group whose reference is all ones.
pub(crate) fn unpack(
    groups: &[Group],
    num_bits: usize,
    missing_management: u8,
    num_points: usize,
    slice: &[u8],
) -> Result<Vec<Option<i64>>> {
    let total = groups
        .iter()
        .try_fold(0usize, |total, group| total.checked_add(group.length))
        .filter(|total| *total <= num_points)
        .ok_or_else(|| {
            GribError::FormatError(format!(
                "Group lengths add up to more than the {} declared points",
                num_points
            ))
        })?;

    let with_missing = missing_management == 1;
    let mut reader = BitReader::new(slice);
    let mut values = Vec::with_capacity(total);

    for (index, group) in groups.iter().enumerate() {
        if group.width > 64 {
            return Err(GribError::FormatError(format!(
                "Group {} is {} bits wide",
                index, group.width
            )));
        }

        let missing_group =
            with_missing && group.width == 0 && num_bits > 0 && group.reference == all_ones(num_bits);

        for _ in 0..group.length {
            let x2 = reader.read(group.width).ok_or_else(|| {
                GribError::FormatError(format!(
                    "Packed data ends inside group {} at {:?}",
                    index,
                    reader.position()
                ))
            })?;

            let missing = missing_group || (with_missing && group.width > 0 && x2 == all_ones(group.width));
            values.push(if missing {
                None
            } else {
                Some((group.reference as i64).wrapping_add(x2 as i64))
            });
        }
    }

    Ok(values)
}

fn all_ones(width: usize) -> u64 {
    match width {
        0 => 0,
        w if w >= 64 => u64::MAX,
        w => (1u64 << w) - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grib::sections::sect5::GroupDefinition;
    use crate::grib::utils::pack_bits;

    fn ctx() -> CompressionContext {
        CompressionContext {
            reference_value: 100.0,
            binary_scale_factor: 0,
            decimal_scale_factor: 0,
            num_bits: 8,
            original_type: 0,
        }
    }

    fn packing(missing_management: u8, num_groups: usize, last: usize) -> ComplexPacking {
        ComplexPacking {
            group_method: 1,
            missing_management,
            primary_missing: 0,
            secondary_missing: 0,
            group_definition: GroupDefinition {
                num_groups,
                group_width_reference: 0,
                group_width_bits: 8,
                group_length_reference: 0,
                group_length_increment: 1,
                group_length_last: last,
                group_length_bits: 8,
            },
        }
    }

    #[test]
    fn groups_share_one_bit_cursor() {
        // refs [5, 20], widths [3, 2], lengths [3, 2]
        let mut payload = vec![5, 20, 3, 2, 3, 0];
        // 3 x 3 bits then 2 x 2 bits, no realignment
        let mut bits = pack_bits(&[1, 2, 7], 3);
        assert_eq!(bits, vec![0b0010_1011, 0b1000_0000]);
        bits[1] |= 0b0011_1000;
        payload.extend_from_slice(&bits);

        let values = decode(&ctx(), &packing(0, 2, 2), 5, &payload).unwrap();

        assert_eq!(
            values,
            vec![Some(106.0), Some(107.0), Some(112.0), Some(121.0), Some(123.0)]
        );
    }

    #[test]
    fn primary_missing_values_decode_to_none() {
        // group 0: width 2, values [1, 3]; group 1: width 0, reference all ones
        let payload = [7, 255, 2, 0, 2, 0, 0b0111_0000];

        let values = decode(&ctx(), &packing(1, 2, 3), 5, &payload).unwrap();

        assert_eq!(values, vec![Some(108.0), None, None, None, None]);
    }

    #[test]
    fn running_out_of_data_is_a_format_error() {
        let payload = [0, 8, 4];
        let result = decode(&ctx(), &packing(0, 1, 4), 4, &payload);
        assert!(matches!(result, Err(GribError::FormatError(_))));
    }

    #[test]
    fn lengths_beyond_declared_points_are_rejected() {
        let payload = [0, 0, 0];
        let result = decode(&ctx(), &packing(0, 1, 1000), 10, &payload);
        assert!(matches!(result, Err(GribError::FormatError(_))));
    }
}
