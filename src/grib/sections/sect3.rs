use serde::Serialize;

use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::fields::{decode_fields, flag_meanings, Fields, Flag};
use crate::grib::sections::resolver::resolve_template;
use crate::grib::sections::RawSection;
use crate::grib::tables::templates::SECTION3_PREFIX;
use crate::grib::{GribError, Result};

const MICRO_DEGREES: f64 = 1e-6;
const ALL_ONES_U32: u64 = 0xffff_ffff;

/// Scanning mode octet (Flag Table 3.4). Bits are numbered 0..7 from the most
/// significant one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    pub fn bit(&self, n: u8) -> bool {
        n < 8 && self.0 & (0x80 >> n) != 0
    }

    /// Points of the first row scan in the -i (westward) direction
    pub fn negative_i(&self) -> bool {
        self.bit(0)
    }

    /// Points of the first column scan in the +j (northward) direction
    pub fn positive_j(&self) -> bool {
        self.bit(1)
    }

    pub(crate) fn without(self, n: u8) -> Self {
        ScanningMode(self.0 & !(0x80 >> n))
    }

    pub fn flags(&self) -> Vec<Flag> {
        flag_meanings("3.4", self.0).unwrap_or_default()
    }
}

/// Grid Definition Template 3.30: Lambert conformal. Parameters are handed
/// over as is; no projection is computed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambertConformal {
    /// Latitude where Dx and Dy are specified
    pub lad: f64,
    /// Longitude of meridian parallel to y-axis along which latitude increases
    pub lov: f64,
    pub latin1: f64,
    pub latin2: f64,
    /// x-direction grid length in metres
    pub dx: f64,
    /// y-direction grid length in metres
    pub dy: f64,
    pub south_pole_lat: f64,
    pub south_pole_lon: f64,
    pub south_pole_on_plane: bool,
    pub bipolar: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDefinition {
    /// Grid Definition Template Number
    pub template_number: u16,
    /// Number of points along a parallel (or x-axis)
    pub nx: usize,
    /// Number of points along a meridian (or y-axis)
    pub ny: usize,
    /// Number of data points
    pub num_points: usize,
    /// Latitude of the first grid point, degrees
    pub lat_start: f64,
    /// Longitude of the first grid point, degrees in (-180, 180]
    pub lon_start: f64,
    pub lat_end: Option<f64>,
    pub lon_end: Option<f64>,
    /// i direction increment, degrees
    pub inc_i: Option<f64>,
    /// j direction increment, degrees
    pub inc_j: Option<f64>,
    pub scanning_mode: ScanningMode,
    /// Shape of the Earth (see Code Table 3.2)
    pub earth_shape: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambert: Option<LambertConformal>,
    /// Geometry guessed from the point count; template not supported
    pub approximate: bool,
    /// Rows were flipped but the first grid point could not be moved with
    /// them: `lat_start`/`lon_start` and the scanning mode still describe the
    /// stored order, so the first point sits at the start of the last row.
    pub origin_last_row: bool,
}

impl GridDefinition {
    /// Output row holding the point at `lat_start`/`lon_start`.
    pub fn first_point_row(&self) -> usize {
        if self.origin_last_row {
            self.ny.saturating_sub(1)
        } else {
            0
        }
    }

    pub(crate) fn from_section(section: &RawSection, diagnostics: &mut Diagnostics) -> Result<Self> {
        let head = decode_fields(SECTION3_PREFIX, section.bytes)?;
        let num_points = head.uint("num_points")? as usize;
        let template_number = head.uint("template_number")? as u16;

        let fields = match resolve_template(SECTION3_PREFIX, 3, template_number) {
            Ok(layout) => decode_fields(&layout, section.bytes)?,
            Err(GribError::UnsupportedTemplate { .. }) => {
                return Ok(Self::approximate(template_number, num_points, diagnostics));
            }
            Err(e) => return Err(e),
        };

        let grid = match template_number {
            0 => Self::lat_lon(&fields, num_points)?,
            30 => Self::lambert_conformal(&fields, num_points)?,
            _ => return Ok(Self::approximate(template_number, num_points, diagnostics)),
        };

        if grid.nx * grid.ny != grid.num_points {
            diagnostics.push(
                DiagnosticKind::Inconsistency,
                format!(
                    "Grid is {}x{} but Section 3 declares {} points",
                    grid.nx, grid.ny, grid.num_points
                ),
            );
        }

        Ok(grid)
    }

    fn lat_lon(fields: &Fields, num_points: usize) -> Result<Self> {
        let unit = angle_unit(
            fields.uint("basic_angle")?,
            fields.uint("basic_angle_subdivisions")?,
        );
        let nx = fields.uint("ni")? as usize;
        let ny = fields.uint("nj")? as usize;
        let la1 = fields.int("la1")? as f64 * unit;
        let lo1 = fields.int("lo1")? as f64 * unit;
        let la2 = fields.int("la2")? as f64 * unit;
        let lo2 = fields.int("lo2")? as f64 * unit;

        let resolution = fields.uint("resolution_flags")?;
        let di = fields.uint("di")?;
        let dj = fields.uint("dj")?;

        let inc_i = if resolution & 0x20 != 0 && di != ALL_ONES_U32 {
            di as f64 * unit
        } else {
            span_increment((lo2 - lo1).rem_euclid(360.0), nx)
        };
        let inc_j = if resolution & 0x10 != 0 && dj != ALL_ONES_U32 {
            dj as f64 * unit
        } else {
            span_increment((la2 - la1).abs(), ny)
        };

        Ok(GridDefinition {
            template_number: 0,
            nx,
            ny,
            num_points,
            lat_start: la1,
            lon_start: normalize_longitude(lo1),
            lat_end: Some(la2),
            lon_end: Some(normalize_longitude(lo2)),
            inc_i: Some(inc_i),
            inc_j: Some(inc_j),
            scanning_mode: ScanningMode(fields.uint("scanning_mode")? as u8),
            earth_shape: Some(fields.uint("earth_shape")? as u8),
            lambert: None,
            approximate: false,
            origin_last_row: false,
        })
    }

    fn lambert_conformal(fields: &Fields, num_points: usize) -> Result<Self> {
        let degrees = |name: &str| fields.int(name).map(|v| v as f64 * MICRO_DEGREES);
        let projection_centre = fields.uint("projection_centre")?;

        Ok(GridDefinition {
            template_number: 30,
            nx: fields.uint("nx")? as usize,
            ny: fields.uint("ny")? as usize,
            num_points,
            lat_start: degrees("la1")?,
            lon_start: normalize_longitude(degrees("lo1")?),
            lat_end: None,
            lon_end: None,
            inc_i: None,
            inc_j: None,
            scanning_mode: ScanningMode(fields.uint("scanning_mode")? as u8),
            earth_shape: Some(fields.uint("earth_shape")? as u8),
            lambert: Some(LambertConformal {
                lad: degrees("lad")?,
                lov: normalize_longitude(degrees("lov")?),
                latin1: degrees("latin1")?,
                latin2: degrees("latin2")?,
                dx: fields.uint("dx")? as f64 / 1000.0,
                dy: fields.uint("dy")? as f64 / 1000.0,
                south_pole_lat: degrees("south_pole_lat")?,
                south_pole_lon: normalize_longitude(degrees("south_pole_lon")?),
                south_pole_on_plane: projection_centre & 0x80 != 0,
                bipolar: projection_centre & 0x40 != 0,
            }),
            approximate: false,
            origin_last_row: false,
        })
    }

    fn approximate(template_number: u16, num_points: usize, diagnostics: &mut Diagnostics) -> Self {
        let side = ceil_sqrt(num_points);
        diagnostics.push(
            DiagnosticKind::ApproximateGrid,
            format!(
                "Grid template 3.{} is not supported, assuming a {}x{} square grid",
                template_number, side, side
            ),
        );

        GridDefinition {
            template_number,
            nx: side,
            ny: side,
            num_points,
            lat_start: 0.0,
            lon_start: 0.0,
            lat_end: None,
            lon_end: None,
            inc_i: None,
            inc_j: None,
            scanning_mode: ScanningMode::default(),
            earth_shape: None,
            lambert: None,
            approximate: true,
            origin_last_row: false,
        }
    }

    /// Latitude of each row, first row first. Only regular lat/lon grids.
    pub fn latitudes(&self) -> Option<Vec<f64>> {
        if self.template_number != 0 || self.approximate {
            return None;
        }
        let lat_end = self.lat_end?;
        let step = if self.ny > 1 {
            (lat_end - self.lat_start) / (self.ny - 1) as f64
        } else {
            0.0
        };
        Some((0..self.ny).map(|j| self.lat_start + step * j as f64).collect())
    }

    /// Longitude of each column in (-180, 180]. Only regular lat/lon grids.
    pub fn longitudes(&self) -> Option<Vec<f64>> {
        if self.template_number != 0 || self.approximate {
            return None;
        }
        let inc_i = self.inc_i?;
        let step = if self.scanning_mode.negative_i() { -inc_i } else { inc_i };
        Some(
            (0..self.nx)
                .map(|i| normalize_longitude(self.lon_start + step * i as f64))
                .collect(),
        )
    }
}

/// Unit of angles in a grid template: micro-degrees unless the basic angle
/// and its subdivisions are both given.
fn angle_unit(basic_angle: u64, subdivisions: u64) -> f64 {
    if basic_angle == 0 || subdivisions == 0 || basic_angle == ALL_ONES_U32 || subdivisions == ALL_ONES_U32 {
        MICRO_DEGREES
    } else {
        basic_angle as f64 / subdivisions as f64
    }
}

fn span_increment(span: f64, points: usize) -> f64 {
    if points > 1 {
        span / (points - 1) as f64
    } else {
        0.0
    }
}

pub fn normalize_longitude(lon: f64) -> f64 {
    let lon = lon.rem_euclid(360.0);
    if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side * side < n {
        side += 1;
    }
    side
}
