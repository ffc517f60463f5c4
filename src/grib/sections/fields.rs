//! Field decoder: typed values out of a section's octets, driven by
//! [`FieldSpec`] layouts from the template catalog.

use serde::Serialize;

use crate::grib::tables::{self, FieldSpec, FieldType, TableRef};
use crate::grib::utils::{grib_int_from_bytes, uint_from_bytes};
use crate::grib::{GribError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Unsigned(v) => Some(*v),
            FieldValue::Signed(v) => u64::try_from(*v).ok(),
            FieldValue::Float(_) | FieldValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Unsigned(v) => i64::try_from(*v).ok(),
            FieldValue::Signed(v) => Some(*v),
            FieldValue::Float(_) | FieldValue::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Unsigned(v) => Some(*v as f64),
            FieldValue::Signed(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

/// One flag of a flag-table octet; `bit` 1 is the most significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub bit: u8,
    pub set: bool,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Meaning {
    Code(&'static str),
    Flags(Vec<Flag>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedField {
    pub name: &'static str,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<Meaning>,
}

pub(crate) fn decode_field(spec: &FieldSpec, section: &[u8]) -> Result<DecodedField> {
    let range = spec.range();
    let bytes = section.get(range.clone()).ok_or_else(|| {
        GribError::FormatError(format!(
            "Field `{}` (octets {}-{}) lies beyond the {} octets of its section",
            spec.name,
            range.start + 1,
            range.end,
            section.len()
        ))
    })?;

    let value = if spec.sign_regulated {
        grib_int_from_bytes(bytes).map(FieldValue::Signed)
    } else {
        match spec.kind {
            FieldType::U8 | FieldType::U16 | FieldType::U32 | FieldType::U64 => {
                uint_from_bytes(bytes).map(FieldValue::Unsigned)
            }
            FieldType::I8 => read_as!(i8, bytes, 0).map(|v| FieldValue::Signed(v.into())),
            FieldType::I16 => read_as!(i16, bytes, 0).map(|v| FieldValue::Signed(v.into())),
            FieldType::I32 => read_as!(i32, bytes, 0).map(|v| FieldValue::Signed(v.into())),
            FieldType::I64 => read_as!(i64, bytes, 0).map(FieldValue::Signed),
            FieldType::F32 => read_as!(f32, bytes, 0).map(|v| FieldValue::Float(v.into())),
            FieldType::F64 => read_as!(f64, bytes, 0).map(FieldValue::Float),
            FieldType::Text => Some(FieldValue::Text(
                String::from_utf8_lossy(bytes).trim_end_matches('\0').to_owned(),
            )),
        }
    }
    .ok_or_else(|| {
        GribError::FormatError(format!(
            "Field `{}` has {} octets, which does not fit {:?}",
            spec.name, spec.size, spec.kind
        ))
    })?;

    let meaning = spec.table.and_then(|table| resolve_meaning(table, &value));

    Ok(DecodedField {
        name: spec.name,
        value,
        meaning,
    })
}

fn resolve_meaning(table: TableRef, value: &FieldValue) -> Option<Meaning> {
    let code = value.as_u64()?;
    match table {
        TableRef::Code(id) => tables::code_table(id)?.lookup(code).map(Meaning::Code),
        TableRef::Flag(id) => flag_meanings(id, code as u8).map(Meaning::Flags),
    }
}

/// Expands a flag octet into its 8 flags. Bits the table leaves undefined
/// read as `Reserved`.
pub fn flag_meanings(table_id: &str, octet: u8) -> Option<Vec<Flag>> {
    let table = tables::flag_table(table_id)?;
    let flags = (1..=8u8)
        .map(|bit| {
            let set = octet & (0x80 >> (bit - 1)) != 0;
            let meaning = table
                .bit(bit)
                .map_or("Reserved", |flag| if set { flag.set } else { flag.unset });
            Flag { bit, set, meaning }
        })
        .collect();
    Some(flags)
}

pub(crate) fn decode_fields(specs: &[FieldSpec], section: &[u8]) -> Result<Fields> {
    specs
        .iter()
        .map(|spec| decode_field(spec, section))
        .collect::<Result<Vec<_>>>()
        .map(Fields)
}

/// Decoded fields of one section, in layout order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Vec<DecodedField>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.0.iter().find(|field| field.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodedField> {
        self.0.iter()
    }

    pub fn code_meaning(&self, name: &str) -> Option<&'static str> {
        match self.get(name)?.meaning {
            Some(Meaning::Code(meaning)) => Some(meaning),
            _ => None,
        }
    }

    pub(crate) fn uint(&self, name: &str) -> Result<u64> {
        self.value(name)?
            .as_u64()
            .ok_or_else(|| GribError::FormatError(format!("Field `{}` is not an unsigned integer", name)))
    }

    pub(crate) fn int(&self, name: &str) -> Result<i64> {
        self.value(name)?
            .as_i64()
            .ok_or_else(|| GribError::FormatError(format!("Field `{}` is not an integer", name)))
    }

    pub(crate) fn float(&self, name: &str) -> Result<f64> {
        self.value(name)?
            .as_f64()
            .ok_or_else(|| GribError::FormatError(format!("Field `{}` is not numeric", name)))
    }

    fn value(&self, name: &str) -> Result<&FieldValue> {
        self.get(name)
            .map(|field| &field.value)
            .ok_or_else(|| GribError::FormatError(format!("Field `{}` was not decoded", name)))
    }
}
