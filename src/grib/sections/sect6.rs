use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::fields::decode_fields;
use crate::grib::sections::RawSection;
use crate::grib::tables::templates::SECTION6;
use crate::grib::utils::BitwiseIterator;
use crate::grib::{GribError, Result};

const BITMAP_OFFSET: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bitmap<'a> {
    Absent,
    /// One bit per grid point, 1 where a value is packed in Section 7
    Present(&'a [u8]),
}

impl<'a> Bitmap<'a> {
    pub(crate) fn from_section(
        section: Option<&RawSection<'a>>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let section = match section {
            Some(section) => section,
            None => {
                diagnostics.push(
                    DiagnosticKind::MissingSection,
                    "No Section 6, assuming every point has a value",
                );
                return Ok(Bitmap::Absent);
            }
        };

        let bytes: &'a [u8] = section.bytes;
        let fields = decode_fields(SECTION6, bytes)?;
        match fields.uint("bitmap_indicator")? {
            255 => Ok(Bitmap::Absent),
            0 => Ok(Bitmap::Present(&bytes[BITMAP_OFFSET..])),
            254 => Err(GribError::UnsupportedFeature(String::from(
                "Bitmap defined previously in the same message (indicator 254)",
            ))),
            n => Err(GribError::UnsupportedFeature(format!(
                "Predefined bitmap (indicator {})",
                n
            ))),
        }
    }

    /// Presence flag of each of the `num_points` points. A short bitmap is
    /// padded with absent points.
    pub(crate) fn mask(&self, num_points: usize) -> Option<Vec<bool>> {
        match self {
            Bitmap::Absent => None,
            Bitmap::Present(bits) => {
                let mut mask: Vec<bool> = BitwiseIterator::new(bits, 1)
                    .take(num_points)
                    .map(|bit| bit == 1)
                    .collect();
                mask.resize(num_points, false);
                Some(mask)
            }
        }
    }
}

/// Spreads the packed values over the grid: `None` where the bitmap is 0,
/// the next packed value where it is 1. The result always has `num_points`
/// entries.
pub(crate) fn apply(
    packed: Vec<Option<f64>>,
    mask: Option<&[bool]>,
    num_points: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<Option<f64>> {
    match mask {
        None => {
            let mut values = packed;
            if values.len() != num_points {
                diagnostics.push(
                    DiagnosticKind::Inconsistency,
                    format!("{} values decoded for {} grid points", values.len(), num_points),
                );
                values.resize(num_points, None);
            }
            values
        }
        Some(mask) => {
            let expected = mask.iter().filter(|present| **present).count();
            if packed.len() != expected {
                diagnostics.push(
                    DiagnosticKind::Inconsistency,
                    format!(
                        "{} values decoded but the bitmap marks {} points as present",
                        packed.len(),
                        expected
                    ),
                );
            }

            let mut packed = packed.into_iter();
            mask.iter()
                .map(|present| if *present { packed.next().flatten() } else { None })
                .collect()
        }
    }
}
