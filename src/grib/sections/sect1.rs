use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::grib::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grib::sections::fields::{decode_fields, Fields};
use crate::grib::sections::RawSection;
use crate::grib::tables::templates::SECTION1;
use crate::grib::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    /// Identification of originating/generating centre (see Common Code Table C-11)
    pub centre_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centre: Option<&'static str>,
    /// Identification of originating/generating sub-centre (allocated by originating/ generating centre)
    pub subcentre_id: u16,
    /// GRIB Master Tables Version Number (see Code Table 1.0)
    pub master_table_version: u8,
    /// GRIB Local Tables Version Number (see Code Table 1.1)
    pub local_table_version: u8,
    /// Significance of Reference Time (see Code Table 1.2)
    pub ref_time_significance: u8,
    /// Reference time of data, `None` when the encoded date does not exist
    pub ref_time: Option<DateTime<Utc>>,
    /// Production status of processed data in this GRIB message
    /// (see Code Table 1.3)
    pub prod_status: u8,
    /// Type of processed data in this GRIB message (see Code Table 1.4)
    pub data_type: u8,
}

impl Identification {
    pub(crate) fn from_section(section: &RawSection, diagnostics: &mut Diagnostics) -> Result<Self> {
        let fields = decode_fields(SECTION1, section.bytes)?;

        let ref_time = date_time(&fields, "")?;
        if ref_time.is_none() {
            diagnostics.push(
                DiagnosticKind::InvalidTime,
                "Section 1 reference time is not a valid date",
            );
        }

        Ok(Identification {
            centre_id: fields.uint("centre")? as u16,
            centre: fields.code_meaning("centre"),
            subcentre_id: fields.uint("subcentre")? as u16,
            master_table_version: fields.uint("master_table_version")? as u8,
            local_table_version: fields.uint("local_table_version")? as u8,
            ref_time_significance: fields.uint("ref_time_significance")? as u8,
            ref_time,
            prod_status: fields.uint("production_status")? as u8,
            data_type: fields.uint("data_type")? as u8,
        })
    }
}

/// Reads `{prefix}year` .. `{prefix}second` as a UTC instant.
pub(crate) fn date_time(fields: &Fields, prefix: &str) -> Result<Option<DateTime<Utc>>> {
    let part = |name: &str| fields.uint(&format!("{}{}", prefix, name));

    let year = part("year")?;
    let (month, day) = (part("month")?, part("day")?);
    let (hour, minute, second) = (part("hour")?, part("minute")?, part("second")?);

    Ok(Utc
        .with_ymd_and_hms(
            year as i32,
            month as u32,
            day as u32,
            hour as u32,
            minute as u32,
            second as u32,
        )
        .single())
}
