use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::fields::Fields;
use crate::grib::sections::resolver::decode_templated;
use crate::grib::sections::sect1::date_time;
use crate::grib::sections::RawSection;
use crate::grib::tables::{self, templates::SECTION4_PREFIX};
use crate::grib::{GribError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    /// Type of fixed surface (see Code Table 4.5)
    pub surface_type: u8,
    pub description: Option<&'static str>,
    /// Scaled value with the scale factor applied, `None` when missing
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Statistical process (see Code Table 4.10)
    pub process: u8,
    pub description: Option<&'static str>,
    /// End of the overall time interval
    pub interval_end: Option<DateTime<Utc>>,
    /// Length of the time range over which the statistic is computed
    pub range_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Product Definition Template Number
    pub template_number: u16,
    /// Discipline from Section 0 (see Code Table 0.0)
    pub discipline: u8,
    /// Parameter category (see Code Table 4.1)
    pub category: u8,
    /// Parameter number (see Code Table 4.2)
    pub parameter_number: u8,
    pub parameter_name: &'static str,
    pub abbrev: &'static str,
    pub units: &'static str,
    /// Type of generating process (see Code Table 4.3)
    pub generating_process: u8,
    pub lead_time_seconds: Option<i64>,
    pub valid_time: Option<DateTime<Utc>>,
    pub first_surface: Option<Surface>,
    pub second_surface: Option<Surface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

impl ProductInfo {
    pub(crate) fn from_section(
        section: &RawSection,
        discipline: u8,
        ref_time: Option<DateTime<Utc>>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let (template_number, fields) = decode_templated(section.bytes, 4, SECTION4_PREFIX)?;
        if template_number != 0 && template_number != 8 {
            return Err(GribError::UnsupportedTemplate {
                section: 4,
                template: template_number,
            });
        }

        let category = fields.uint("parameter_category")? as u8;
        let parameter_number = fields.uint("parameter_number")? as u8;
        let (parameter_name, abbrev, units) =
            match tables::parameter(discipline, category, parameter_number) {
                Some(p) => (p.name, p.abbrev, p.units),
                None => {
                    diagnostics.push(
                        DiagnosticKind::UnknownParameter,
                        format!(
                            "Parameter {}.{}.{} is not in the catalog",
                            discipline, category, parameter_number
                        ),
                    );
                    ("unknown", "unknown", "unknown")
                }
            };

        let time_unit = fields.uint("time_unit")? as u8;
        let forecast_time = fields.uint("forecast_time")?;
        let lead_time = forecast_duration(time_unit, forecast_time);
        if lead_time.is_none() && time_unit != 255 && forecast_time != MISSING_FORECAST_TIME {
            diagnostics.push(
                DiagnosticKind::InvalidTime,
                format!(
                    "Forecast time {} in unit `{}` is not a representable duration",
                    forecast_time, time_unit
                ),
            );
        }

        let valid_time = match (ref_time, lead_time) {
            (Some(t), Some(d)) => {
                let valid_time = t.checked_add_signed(d);
                if valid_time.is_none() {
                    diagnostics.push(
                        DiagnosticKind::InvalidTime,
                        format!("Valid time {} + {}s is out of range", t, d.num_seconds()),
                    );
                }
                valid_time
            }
            _ => None,
        };

        let statistics = if template_number == 8 {
            Some(Statistics::from_fields(&fields)?)
        } else {
            None
        };

        Ok(ProductInfo {
            template_number,
            discipline,
            category,
            parameter_number,
            parameter_name,
            abbrev,
            units,
            generating_process: fields.uint("generating_process")? as u8,
            lead_time_seconds: lead_time.map(|d| d.num_seconds()),
            valid_time,
            first_surface: Surface::from_fields(&fields, "first")?,
            second_surface: Surface::from_fields(&fields, "second")?,
            statistics,
        })
    }
}

impl Surface {
    fn from_fields(fields: &Fields, which: &str) -> Result<Option<Self>> {
        let name = |suffix: &str| format!("{}_surface_{}", which, suffix);

        let surface_type = fields.uint(&name("type"))? as u8;
        if surface_type == 255 {
            return Ok(None);
        }

        let scale = fields.int(&name("scale"))?;
        let scaled_value = fields.int(&name("value"))?;
        // all-ones octets read as -127 / -(2^31 - 1) under sign regulation
        let value = if scale == -127 || scaled_value == -0x7fff_ffff {
            None
        } else {
            Some(scaled_value as f64 * 10f64.powi(-(scale as i32)))
        };

        Ok(Some(Surface {
            surface_type,
            description: fields.code_meaning(&name("type")),
            value,
        }))
    }
}

impl Statistics {
    fn from_fields(fields: &Fields) -> Result<Self> {
        let range_unit = fields.uint("range_unit")? as u8;
        let range_length = fields.uint("range_length")?;

        Ok(Statistics {
            process: fields.uint("statistical_process")? as u8,
            description: fields.code_meaning("statistical_process"),
            interval_end: date_time(fields, "interval_end_")?,
            range_seconds: forecast_duration(range_unit, range_length).map(|d| d.num_seconds()),
        })
    }
}

/// All-ones forecast time, meaning missing.
const MISSING_FORECAST_TIME: u64 = 0xffff_ffff;

/// Duration of `value` time units (Code Table 4.4), `None` for a missing
/// value, an unknown unit or a duration chrono cannot hold.
fn forecast_duration(unit: u8, value: u64) -> Option<Duration> {
    if value == MISSING_FORECAST_TIME {
        return None;
    }
    let value = i64::try_from(value).ok()?;
    match unit {
        0 => Duration::try_minutes(value),
        1 => Duration::try_hours(value),
        2 => Duration::try_days(value),
        3 => Duration::try_days(value.checked_mul(30)?),
        4 => Duration::try_days(value.checked_mul(365)?),
        5 => Duration::try_days(value.checked_mul(10 * 365)?),
        6 => Duration::try_days(value.checked_mul(30 * 365)?),
        7 => Duration::try_days(value.checked_mul(100 * 365)?),
        10 => Duration::try_hours(value.checked_mul(3)?),
        11 => Duration::try_hours(value.checked_mul(6)?),
        12 => Duration::try_hours(value.checked_mul(12)?),
        13 => Duration::try_seconds(value),
        _ => None,
    }
}
