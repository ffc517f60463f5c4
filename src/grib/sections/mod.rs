use serde::Serialize;

use crate::grib::{GribError, Result};

pub mod fields;
pub(crate) mod resolver;
pub mod sect1;
pub mod sect3;
pub mod sect4;
pub mod sect5;
pub(crate) mod sect6;
pub(crate) mod sect7;

pub const SECT0_IS_MAGIC: &[u8] = b"GRIB";
pub const SECT0_IS_SIZE: usize = 16;
pub const SECT_HEADER_SIZE: usize = 5;
pub const SECT8_ES_MAGIC: &[u8] = b"7777";
pub const SECT8_ES_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    /// Discipline - GRIB Master Table Number (see Code Table 0.0)
    pub discipline: u8,
    /// GRIB Edition Number
    pub edition: u8,
    /// Total length of GRIB message in octets (including Section 0)
    pub total_length: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    /// Length : Length of the section in octets
    pub size: usize,
    /// Number : Number of the section
    pub number: u8,
}

/// One section of a message, header included, so that template octet
/// numbers index `bytes` directly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawSection<'a> {
    pub(crate) header: SectionHeader,
    /// Offset of the section inside its message
    pub(crate) offset: usize,
    pub(crate) bytes: &'a [u8],
}

impl<'a> RawSection<'a> {
    pub(crate) fn body(&self) -> &'a [u8] {
        &self.bytes[SECT_HEADER_SIZE..]
    }
}

pub(crate) struct Sections<'a> {
    pub(crate) indicator: Indicator,
    pub(crate) sect1: RawSection<'a>,
    pub(crate) sect2: Option<RawSection<'a>>,
    pub(crate) sect3: RawSection<'a>,
    pub(crate) sect4: RawSection<'a>,
    pub(crate) sect5: RawSection<'a>,
    pub(crate) sect6: Option<RawSection<'a>>,
    pub(crate) sect7: RawSection<'a>,
}

pub(crate) fn read_indicator(message: &[u8]) -> Result<Indicator> {
    if !message.starts_with(SECT0_IS_MAGIC) {
        return Err(GribError::NotGRIB());
    }
    if message.len() < SECT0_IS_SIZE {
        return Err(GribError::FormatError(String::from("Truncated Section 0")));
    }

    let edition = message[7];
    if edition != 2 {
        return Err(GribError::GRIBVersionMismatch(edition));
    }

    Ok(Indicator {
        discipline: message[6],
        edition,
        total_length: read_as!(u64, message, 8).unwrap_or_default(),
    })
}

/// Splits one message into its sections. Sections must appear once each, in
/// increasing order; the message has to end exactly on `7777`.
pub(crate) fn split_sections(message: &[u8]) -> Result<Sections<'_>> {
    let indicator = read_indicator(message)?;
    if indicator.total_length != message.len() as u64 {
        return Err(GribError::FormatError(format!(
            "Declared message length {} but {} bytes were given",
            indicator.total_length,
            message.len()
        )));
    }

    let mut found: [Option<RawSection>; 8] = Default::default();
    let mut last_number = 0u8;
    let mut pos = SECT0_IS_SIZE;

    loop {
        let rest = &message[pos..];

        if rest.len() == SECT8_ES_SIZE {
            if rest == SECT8_ES_MAGIC {
                break;
            }
            return Err(GribError::EndSectionMismatch());
        }
        if rest.len() < SECT_HEADER_SIZE {
            return Err(GribError::FormatError(format!(
                "Missing End Section at offset {}",
                pos
            )));
        }

        let size = read_as!(u32, rest, 0).unwrap_or_default() as usize;
        let number = rest[4];

        if size < SECT_HEADER_SIZE || size > rest.len() {
            return Err(GribError::FormatError(format!(
                "Section {} at offset {} declares {} octets, {} remain",
                number,
                pos,
                size,
                rest.len()
            )));
        }
        if !(1..=7).contains(&number) {
            return Err(GribError::UnknownSection(number));
        }
        if number <= last_number {
            return Err(GribError::UnsupportedFeature(format!(
                "Section {} repeated after Section {} at offset {}",
                number, last_number, pos
            )));
        }

        trace!("Section {} at offset {} : {} octets", number, pos, size);
        found[number as usize] = Some(RawSection {
            header: SectionHeader { size, number },
            offset: pos,
            bytes: &rest[..size],
        });
        last_number = number;
        pos += size;
    }

    let required = |number: usize| {
        found[number].ok_or_else(|| GribError::FormatError(format!("Missing Section {}", number)))
    };

    Ok(Sections {
        indicator,
        sect1: required(1)?,
        sect2: found[2],
        sect3: required(3)?,
        sect4: required(4)?,
        sect5: required(5)?,
        sect6: found[6],
        sect7: required(7)?,
    })
}
