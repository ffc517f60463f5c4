use crate::grib::sections::sect5::IeeePrecision;

/// Big-endian IEEE floats, one per point, no decode formula.
pub(crate) fn decode(precision: IeeePrecision, num_points: usize, slice: &[u8]) -> Vec<Option<f64>> {
    slice
        .chunks_exact(precision.octets())
        .take(num_points)
        .map(|chunk| match precision {
            IeeePrecision::Single => read_as!(f32, chunk, 0).map(f64::from),
            IeeePrecision::Double => read_as!(f64, chunk, 0),
            IeeePrecision::Quad => read_as!(u128, chunk, 0).map(quad_to_f64),
        })
        .collect()
}

/// `f64` value of an IEEE binary128, fraction truncated. Out of range magnitudes
/// become infinities or zeros.
pub(crate) fn quad_to_f64(bits: u128) -> f64 {
    let sign = if bits >> 127 == 1 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 112) & 0x7fff) as i32;
    let fraction = bits & ((1u128 << 112) - 1);
    // top 52 of the 112 fraction bits
    let top = (fraction >> 60) as u64;

    match exponent {
        0x7fff if fraction == 0 => sign * f64::INFINITY,
        0x7fff => f64::NAN,
        0 => sign * 0.0,
        _ => {
            let unbiased = exponent - 16383;
            if unbiased > 1023 {
                sign * f64::INFINITY
            } else if unbiased >= -1022 {
                let biased = (unbiased + 1023) as u64;
                sign * f64::from_bits((biased << 52) | top)
            } else {
                let mantissa = 1.0 + top as f64 / (1u64 << 52) as f64;
                sign * mantissa * 2f64.powi(unbiased)
            }
        }
    }
}
