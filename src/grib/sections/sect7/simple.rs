use num::ToPrimitive;

use crate::grib::sections::sect5::CompressionContext;
use crate::grib::utils::BitwiseIterator;

pub(crate) fn decode(ctx: &CompressionContext, num_points: usize, slice: &[u8]) -> Vec<Option<f64>> {
    if ctx.num_bits == 0 {
        return vec![Some(ctx.constant()); num_points];
    }

    let packed = BitwiseIterator::new(slice, ctx.num_bits).take(num_points).map(Some);
    SimpleDecoderIterator::new(packed, ctx).collect()
}

/// Applies `Y = (R + X * 2^E) * 10^-D` to each packed value, passing missing
/// values through.
pub(crate) struct SimpleDecoderIterator<I> {
    packed: I,
    reference_value: f64,
    binary_scale: f64,
    decimal_scale: f64,
}

impl<I> SimpleDecoderIterator<I> {
    pub(crate) fn new(packed: I, ctx: &CompressionContext) -> Self {
        Self {
            packed,
            reference_value: f64::from(ctx.reference_value),
            binary_scale: 2_f64.powi(i32::from(ctx.binary_scale_factor)),
            decimal_scale: 10_f64.powi(-i32::from(ctx.decimal_scale_factor)),
        }
    }
}

impl<I: Iterator<Item = Option<N>>, N: ToPrimitive> Iterator for SimpleDecoderIterator<I> {
    type Item = Option<f64>;

    fn next(&mut self) -> Option<Option<f64>> {
        let encoded = self.packed.next()?;
        Some(encoded.and_then(|x| x.to_f64()).map(|x| {
            (self.reference_value + x * self.binary_scale) * self.decimal_scale
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.packed.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grib::utils::pack_bits;

    fn ctx(reference_value: f32, e: i16, d: i16, num_bits: usize) -> CompressionContext {
        CompressionContext {
            reference_value,
            binary_scale_factor: e,
            decimal_scale_factor: d,
            num_bits,
            original_type: 0,
        }
    }

    #[test]
    fn unpacks_across_byte_boundaries() {
        let payload = pack_bits(&[0, 1, 2, 1000, 4095], 12);

        let values = decode(&ctx(0.0, 0, 0, 12), 5, &payload);

        assert_eq!(values, vec![Some(0.0), Some(1.0), Some(2.0), Some(1000.0), Some(4095.0)]);
    }

    #[test]
    fn applies_reference_and_scales() {
        let payload = pack_bits(&[0, 3, 10], 4);

        let values = decode(&ctx(1.5, -1, -1, 4), 3, &payload);

        assert_eq!(values, vec![Some(15.0), Some(30.0), Some(65.0)]);
    }

    #[test]
    fn round_trip_within_packing_precision() {
        let (r, e, d, bits) = (-12.5f32, -3i16, 1i16, 16usize);
        let originals = [-1.25, 0.0, 3.3, 250.75, 812.125, 400.0];
        let binary = 2f64.powi(e as i32);
        let packed: Vec<u64> = originals
            .iter()
            .map(|y: &f64| ((y * 10f64.powi(d as i32) - r as f64) / binary).round() as u64)
            .collect();
        let payload = pack_bits(&packed, bits);

        let values = decode(&ctx(r, e, d, bits), originals.len(), &payload);

        for (decoded, original) in values.iter().zip(originals.iter()) {
            let decoded = decoded.unwrap();
            let tolerance = original.abs().max(1.0) * 2f64.powi(-(bits as i32)) + binary;
            assert!((decoded - original).abs() <= tolerance, "{} vs {}", decoded, original);
        }
    }

    #[test]
    fn zero_width_is_a_constant_field() {
        let values = decode(&ctx(42.0, 5, -1, 0), 3, &[]);
        assert_eq!(values, vec![Some(420.0); 3]);
    }

    #[test]
    fn short_payload_yields_fewer_values() {
        let values = decode(&ctx(0.0, 0, 0, 8), 4, &[1, 2]);
        assert_eq!(values, vec![Some(1.0), Some(2.0)]);
    }
}
