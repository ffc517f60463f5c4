//! Brings decoded values into north-west origin, row-major order.

use serde::Serialize;

use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::sect3::GridDefinition;
use crate::grib::{GribError, Result};

/// Scanning mode bits this decoder cannot reorder.
const UNSUPPORTED_BITS: [u8; 6] = [0, 2, 3, 4, 5, 7];
const ROWS_SHIFTED: u8 = 6;

/// Grid as it reads once normalized, and whether rows must be flipped to get
/// there.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPlan {
    pub grid: GridDefinition,
    pub flip_rows: bool,
}

pub(crate) fn plan(grid: GridDefinition, diagnostics: &mut Diagnostics) -> Result<ScanPlan> {
    if grid.approximate {
        return Ok(ScanPlan { grid, flip_rows: false });
    }

    let mode = grid.scanning_mode;
    if let Some(bit) = UNSUPPORTED_BITS.iter().find(|bit| mode.bit(**bit)) {
        return Err(GribError::UnsupportedFeature(format!(
            "Scanning mode {:#010b}, flag {} of Flag Table 3.4",
            mode.0,
            bit + 1
        )));
    }

    let mut grid = grid;

    if mode.bit(ROWS_SHIFTED) {
        if let Some(inc_j) = grid.inc_j {
            let shift = if mode.positive_j() { inc_j / 2.0 } else { -inc_j / 2.0 };
            grid.lat_start += shift;
            grid.lat_end = grid.lat_end.map(|lat| lat + shift);
        }
        grid.scanning_mode = grid.scanning_mode.without(ROWS_SHIFTED);
    }

    let flip_rows = match grid.lat_end {
        Some(lat_end) => {
            let south_first = grid.lat_start < lat_end;
            if grid.lat_start != lat_end && south_first != mode.positive_j() {
                diagnostics.push(
                    DiagnosticKind::Inconsistency,
                    format!(
                        "Scanning mode {:#010b} disagrees with latitudes {} -> {}",
                        mode.0, grid.lat_start, lat_end
                    ),
                );
            }
            south_first
        }
        None => mode.positive_j(),
    };

    if flip_rows {
        match grid.lat_end {
            Some(lat_end) => {
                grid.lat_end = Some(grid.lat_start);
                grid.lat_start = lat_end;
                grid.scanning_mode = grid.scanning_mode.without(1);
            }
            // projected grids: the first point of the last row is unknown
            None => grid.origin_last_row = true,
        }
        debug!("Flipping {} rows to north first", grid.ny);
    }

    Ok(ScanPlan { grid, flip_rows })
}

/// Reverses the order of rows of `nx` values: row `r` moves to `ny - 1 - r`.
pub fn flip_rows<T: Clone>(values: &[T], nx: usize) -> Vec<T> {
    if nx == 0 {
        return values.to_vec();
    }
    values.chunks(nx).rev().flatten().cloned().collect()
}

/// Applies `plan` to values laid out as stored in the message.
pub(crate) fn reorder<T: Clone>(plan: &ScanPlan, values: Vec<T>, diagnostics: &mut Diagnostics) -> Vec<T> {
    if !plan.flip_rows {
        return values;
    }

    let (nx, ny) = (plan.grid.nx, plan.grid.ny);
    if values.len() != nx * ny {
        diagnostics.push(
            DiagnosticKind::Inconsistency,
            format!("{} values do not fill a {}x{} grid, rows left as stored", values.len(), nx, ny),
        );
        return values;
    }

    flip_rows(&values, nx)
}
