use serde::Serialize;

use crate::grib::sections::fields::Fields;
use crate::grib::sections::resolver::decode_templated;
use crate::grib::sections::RawSection;
use crate::grib::tables::templates::SECTION5_PREFIX;
use crate::grib::{GribError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRepresentation {
    /// Number of data points where one or more values are specified in
    /// Section 7 when a bit map is present, total number of data points when
    /// a bit map is absent
    pub num_points: usize,
    /// Data Representation Template Number
    pub template_number: u16,
    pub packing: Packing,
}

/// One variant per supported Data Representation Template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Packing {
    /// 5.0
    Simple(CompressionContext),
    /// 5.2
    Complex(CompressionContext, ComplexPacking),
    /// 5.3
    ComplexSpatialDiff(CompressionContext, ComplexPacking, SpatialDifferencing),
    /// 5.4
    Ieee(IeeePrecision),
    /// 5.41
    Png(CompressionContext),
}

/// Parameters of `Y = (R + X * 2^E) * 10^-D`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionContext {
    /// Reference value (R) (IEEE 32-bit floating-point value)
    pub reference_value: f32,
    /// Binary scale factor (E)
    pub binary_scale_factor: i16,
    /// Decimal scale factor (D)
    pub decimal_scale_factor: i16,
    /// Number of bits used for each packed value
    pub num_bits: usize,
    /// Type of original field values (see Code Table 5.1)
    pub original_type: u8,
}

impl CompressionContext {
    fn from_fields(fields: &Fields) -> Result<Self> {
        let num_bits = fields.uint("num_bits")? as usize;
        if num_bits > 64 {
            return Err(GribError::FormatError(format!(
                "{} bits per value is wider than any integer",
                num_bits
            )));
        }

        Ok(CompressionContext {
            reference_value: fields.float("reference_value")? as f32,
            binary_scale_factor: fields.int("binary_scale_factor")? as i16,
            decimal_scale_factor: fields.int("decimal_scale_factor")? as i16,
            num_bits,
            original_type: fields.uint("original_type")? as u8,
        })
    }

    /// Value of every point when no bits are packed.
    pub fn constant(&self) -> f64 {
        f64::from(self.reference_value) * 10f64.powi(-i32::from(self.decimal_scale_factor))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    /// NG - Number of groups of data values into which field is split
    pub num_groups: usize,
    /// Reference for group widths
    pub group_width_reference: u64,
    /// Number of bits used for the group widths (after the reference value
    /// has been removed)
    pub group_width_bits: usize,
    /// Reference for group lengths
    pub group_length_reference: u64,
    /// Length increment for the group lengths
    pub group_length_increment: u64,
    /// True length of last group
    pub group_length_last: usize,
    /// Number of bits used for the scaled group lengths
    pub group_length_bits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPacking {
    /// Group splitting method used (see Code Table 5.4)
    pub group_method: u8,
    /// Missing value management used (see Code Table 5.5)
    pub missing_management: u8,
    /// Primary missing value substitute
    pub primary_missing: u32,
    /// Secondary missing value substitute
    pub secondary_missing: u32,
    pub group_definition: GroupDefinition,
}

impl ComplexPacking {
    fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(ComplexPacking {
            group_method: fields.uint("group_method")? as u8,
            missing_management: fields.uint("missing_management")? as u8,
            primary_missing: fields.uint("primary_missing")? as u32,
            secondary_missing: fields.uint("secondary_missing")? as u32,
            group_definition: GroupDefinition {
                num_groups: fields.uint("num_groups")? as usize,
                group_width_reference: fields.uint("group_width_reference")?,
                group_width_bits: fields.uint("group_width_bits")? as usize,
                group_length_reference: fields.uint("group_length_reference")?,
                group_length_increment: fields.uint("group_length_increment")?,
                group_length_last: fields.uint("group_length_last")? as usize,
                group_length_bits: fields.uint("group_length_bits")? as usize,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialDifferencing {
    /// Order of spatial differencing (see Code Table 5.6)
    pub order: u8,
    /// Number of octets required in the data section to specify extra
    /// descriptors needed for spatial differencing
    pub descriptor_octets: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IeeePrecision {
    Single,
    Double,
    Quad,
}

impl IeeePrecision {
    fn from_code(code: u64) -> Result<Self> {
        match code {
            1 => Ok(IeeePrecision::Single),
            2 => Ok(IeeePrecision::Double),
            3 => Ok(IeeePrecision::Quad),
            n => Err(GribError::UnsupportedFeature(format!(
                "IEEE precision {} (Code Table 5.7)",
                n
            ))),
        }
    }

    pub fn octets(self) -> usize {
        match self {
            IeeePrecision::Single => 4,
            IeeePrecision::Double => 8,
            IeeePrecision::Quad => 16,
        }
    }
}

impl DataRepresentation {
    pub(crate) fn from_section(section: &RawSection) -> Result<Self> {
        let (template_number, fields) = decode_templated(section.bytes, 5, SECTION5_PREFIX)?;

        let packing = match template_number {
            0 => Packing::Simple(CompressionContext::from_fields(&fields)?),
            2 => Packing::Complex(
                CompressionContext::from_fields(&fields)?,
                ComplexPacking::from_fields(&fields)?,
            ),
            3 => Packing::ComplexSpatialDiff(
                CompressionContext::from_fields(&fields)?,
                ComplexPacking::from_fields(&fields)?,
                SpatialDifferencing {
                    order: fields.uint("spatial_order")? as u8,
                    descriptor_octets: fields.uint("extra_descriptor_octets")? as usize,
                },
            ),
            4 => Packing::Ieee(IeeePrecision::from_code(fields.uint("precision")?)?),
            41 => Packing::Png(CompressionContext::from_fields(&fields)?),
            _ => {
                return Err(GribError::UnsupportedTemplate {
                    section: 5,
                    template: template_number,
                })
            }
        };

        Ok(DataRepresentation {
            num_points: fields.uint("num_points")? as usize,
            template_number,
            packing,
        })
    }
}
