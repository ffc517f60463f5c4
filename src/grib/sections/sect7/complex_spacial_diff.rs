use crate::grib::sections::sect5::{ComplexPacking, CompressionContext, SpatialDifferencing};
use crate::grib::sections::sect7::complex::unpack;
use crate::grib::sections::sect7::groups;
use crate::grib::sections::sect7::simple::SimpleDecoderIterator;
use crate::grib::utils::grib_int_from_bytes;
use crate::grib::{GribError, Result};

pub(crate) fn decode(
    ctx: &CompressionContext,
    complex: &ComplexPacking,
    diff: &SpatialDifferencing,
    num_points: usize,
    slice: &[u8],
) -> Result<Vec<Option<f64>>> {
    let order = match diff.order {
        1 | 2 => diff.order as usize,
        n => {
            return Err(GribError::UnsupportedFeature(format!(
                "Spatial differencing of order {} (Code Table 5.6)",
                n
            )))
        }
    };
    let octets = diff.descriptor_octets;
    if !(1..=4).contains(&octets) {
        return Err(GribError::FormatError(format!(
            "Spatial differencing descriptors of {} octets",
            octets
        )));
    }

    // h1 [, h2], then the overall minimum, all sign-regulated
    let descriptors_end = octets * (order + 1);
    let descriptors = slice
        .get(..descriptors_end)
        .ok_or_else(|| GribError::FormatError(String::from("Section 7 too short for spatial differencing")))?;
    let mut extra = descriptors.chunks_exact(octets).filter_map(grib_int_from_bytes);
    let first_values: Vec<i64> = extra.by_ref().take(order).collect();
    let minimum = extra.next().unwrap_or_default();

    let (groups, groups_num_bytes) = groups::decode(ctx.num_bits, complex, &slice[descriptors_end..])?;
    let to_skip = descriptors_end + groups_num_bytes;

    let packed = unpack(
        &groups,
        ctx.num_bits,
        complex.missing_management,
        num_points,
        &slice[to_skip..],
    )?;

    let restored = SpatialDiffDecodeIterator::new(packed.into_iter(), first_values, minimum);

    Ok(SimpleDecoderIterator::new(restored, ctx).collect())
}

/// Undoes first or second order differencing; the order is the number of
/// first values. Missing points pass through without touching the running
/// state.
struct SpatialDiffDecodeIterator<I> {
    iter: I,
    first_values: Vec<i64>,
    minimum: i64,
    count: usize,
    prev1: i64,
    prev2: i64,
}

impl<I> SpatialDiffDecodeIterator<I> {
    fn new(iter: I, first_values: Vec<i64>, minimum: i64) -> Self {
        Self {
            iter,
            first_values,
            minimum,
            count: 0,
            prev1: 0,
            prev2: 0,
        }
    }
}

impl<I: Iterator<Item = Option<i64>>> Iterator for SpatialDiffDecodeIterator<I> {
    type Item = Option<i64>;

    fn next(&mut self) -> Option<Option<i64>> {
        let v = match self.iter.next()? {
            Some(v) => v,
            None => return Some(None),
        };

        let value = match self.first_values.get(self.count) {
            Some(first) => *first,
            None => {
                let g = v.wrapping_add(self.minimum);
                if self.first_values.len() == 1 {
                    g.wrapping_add(self.prev1)
                } else {
                    g.wrapping_add(self.prev1.wrapping_mul(2)).wrapping_sub(self.prev2)
                }
            }
        };

        self.count += 1;
        (self.prev2, self.prev1) = (self.prev1, value);
        Some(Some(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
