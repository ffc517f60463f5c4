use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::sect5::{DataRepresentation, Packing};
use crate::grib::Result;

pub(crate) mod complex;
pub(crate) mod complex_spacial_diff;
mod groups;
pub(crate) mod ieee;
pub(crate) mod png;
pub(crate) mod simple;

/// Unpacks the Section 7 payload into `repr.num_points` values, `None` for
/// values marked missing by the packing itself.
pub(crate) fn decode(
    repr: &DataRepresentation,
    payload: &[u8],
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Option<f64>>> {
    let num_points = repr.num_points;

    let values = match &repr.packing {
        Packing::Simple(ctx) => simple::decode(ctx, num_points, payload),
        Packing::Complex(ctx, complex) => complex::decode(ctx, complex, num_points, payload)?,
        Packing::ComplexSpatialDiff(ctx, complex, diff) => {
            complex_spacial_diff::decode(ctx, complex, diff, num_points, payload)?
        }
        Packing::Ieee(precision) => ieee::decode(*precision, num_points, payload),
        Packing::Png(ctx) => png::decode(ctx, num_points, payload)?,
    };

    debug!(
        "Template 5.{} : {} values from {} octets",
        repr.template_number,
        values.len(),
        payload.len()
    );
    if values.len() != num_points {
        diagnostics.push(
            DiagnosticKind::Inconsistency,
            format!(
                "Section 7 holds {} values, Section 5 declares {}",
                values.len(),
                num_points
            ),
        );
    }

    Ok(values)
}
