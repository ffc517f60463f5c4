//! Static catalog of section layouts, templates, code tables and flag tables.
//!
//! Everything here is `'static` and read-only, so the catalog can be shared
//! between decoding threads without synchronisation.

mod codes;
mod params;
pub(crate) mod templates;

pub use params::Parameter;

/// Semantic type of a field; integers and floats are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Text,
}

impl FieldType {
    pub const fn size(self) -> usize {
        match self {
            FieldType::U8 | FieldType::I8 => 1,
            FieldType::U16 | FieldType::I16 => 2,
            FieldType::U32 | FieldType::I32 | FieldType::F32 => 4,
            FieldType::U64 | FieldType::I64 | FieldType::F64 => 8,
            FieldType::Text => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRef {
    Code(&'static str),
    Flag(&'static str),
}

/// Layout of one field: 1-based start octet and size within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub size: usize,
    pub kind: FieldType,
    /// Regulation 92.1.5: first bit is the sign, the rest the magnitude.
    pub sign_regulated: bool,
    pub table: Option<TableRef>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, start: usize, kind: FieldType) -> Self {
        Self {
            name,
            start,
            size: kind.size(),
            kind,
            sign_regulated: false,
            table: None,
        }
    }

    pub const fn text(name: &'static str, start: usize, size: usize) -> Self {
        Self {
            name,
            start,
            size,
            kind: FieldType::Text,
            sign_regulated: false,
            table: None,
        }
    }

    pub const fn signed(self) -> Self {
        Self {
            sign_regulated: true,
            ..self
        }
    }

    pub const fn code(self, table: &'static str) -> Self {
        Self {
            table: Some(TableRef::Code(table)),
            ..self
        }
    }

    pub const fn flags(self, table: &'static str) -> Self {
        Self {
            table: Some(TableRef::Flag(table)),
            ..self
        }
    }

    /// Zero-based octet range of the field inside its section.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.start.saturating_sub(1);
        start..start + self.size
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub section: u8,
    pub number: u16,
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, PartialEq, Eq)]
pub struct CodeTable {
    pub id: &'static str,
    pub entries: &'static [(u64, &'static str)],
}

impl CodeTable {
    pub fn lookup(&self, code: u64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(value, _)| *value == code)
            .map(|(_, meaning)| *meaning)
    }
}

/// One flag of a flag table, numbered 1 (most significant) to 8.
#[derive(Debug, PartialEq, Eq)]
pub struct FlagBit {
    pub bit: u8,
    pub unset: &'static str,
    pub set: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FlagTable {
    pub id: &'static str,
    pub bits: &'static [FlagBit],
}

impl FlagTable {
    pub fn bit(&self, bit: u8) -> Option<&'static FlagBit> {
        self.bits.iter().find(|flag| flag.bit == bit)
    }
}

pub fn template(section: u8, number: u16) -> Option<&'static Template> {
    templates::TEMPLATES
        .iter()
        .find(|t| t.section == section && t.number == number)
}

pub fn code_table(id: &str) -> Option<&'static CodeTable> {
    codes::CODE_TABLES.iter().find(|t| t.id == id)
}

pub fn flag_table(id: &str) -> Option<&'static FlagTable> {
    codes::FLAG_TABLES.iter().find(|t| t.id == id)
}

pub fn parameter(discipline: u8, category: u8, number: u8) -> Option<&'static Parameter> {
    params::PARAMETERS
        .iter()
        .find(|p| p.discipline == discipline && p.category == category && p.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_templates_by_section_and_number() {
        let grid = template(3, 0).expect("template 3.0");
        assert_eq!(grid.name, "Latitude/longitude");
        assert!(grid.fields.iter().any(|f| f.name == "scanning_mode"));

        assert!(template(5, 41).is_some());
        assert!(template(5, 40).is_none());
        assert!(template(4, 0).is_some());
        assert!(template(3, 4).is_none());
    }

    #[test]
    fn template_fields_are_ordered_and_non_overlapping() {
        for t in templates::TEMPLATES {
            for pair in t.fields.windows(2) {
                assert!(
                    pair[0].start + pair[0].size <= pair[1].start,
                    "{}.{}: {} overlaps {}",
                    t.section,
                    t.number,
                    pair[0].name,
                    pair[1].name
                );
            }
        }
    }

    #[test]
    fn every_table_reference_resolves() {
        let prefixes = [
            templates::SECTION1,
            templates::SECTION3_PREFIX,
            templates::SECTION4_PREFIX,
            templates::SECTION5_PREFIX,
            templates::SECTION6,
        ];
        let fields = templates::TEMPLATES
            .iter()
            .flat_map(|t| t.fields.iter())
            .chain(prefixes.iter().flat_map(|p| p.iter()));

        for field in fields {
            match field.table {
                Some(TableRef::Code(id)) => assert!(code_table(id).is_some(), "code table {}", id),
                Some(TableRef::Flag(id)) => assert!(flag_table(id).is_some(), "flag table {}", id),
                None => {}
            }
        }
    }

    #[test]
    fn code_and_flag_lookup() {
        let table = code_table("5.0").unwrap();
        assert_eq!(table.lookup(41), Some("Grid point data - PNG"));
        assert_eq!(table.lookup(9999), None);

        let flags = flag_table("3.4").unwrap();
        assert!(flags.bit(2).unwrap().set.starts_with("Points of first column scan in the +j"));
    }

    #[test]
    fn parameter_lookup() {
        let temperature = parameter(0, 0, 0).unwrap();
        assert_eq!(temperature.abbrev, "TMP");
        assert_eq!(temperature.units, "K");
        assert!(parameter(0, 250, 250).is_none());
    }
}
