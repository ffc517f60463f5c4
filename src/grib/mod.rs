#[macro_use]
mod utils;
mod decoder;
pub mod diagnostics;
pub mod scan;
pub mod sections;
pub mod tables;

use serde::Serialize;

use crate::grib::sections::{SECT0_IS_MAGIC, SECT0_IS_SIZE, SECT8_ES_SIZE};

pub use decoder::{
    decode_all, decode_metadata_only, decode_values, DecodeReport, DecodedGrid, DecodedValues,
    Decoder, MessageError, MessageMetadata, MetadataReport,
};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use sections::sect1::Identification;
pub use sections::sect3::{GridDefinition, LambertConformal, ScanningMode};
pub use sections::sect4::ProductInfo;

/// Location of one message inside a buffer of concatenated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRange {
    /// Position of the message in the buffer, counting rejected ones
    pub index: usize,
    /// Byte offset of `GRIB`
    pub offset: usize,
    /// Total length including Section 0 and `7777`
    pub length: usize,
}

impl MessageRange {
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

/// Finds every message in `buf`. Messages whose header cannot be trusted are
/// reported as failures; framing stops at the first one whose length cannot
/// be used to reach the next message.
pub(crate) fn split_messages(
    buf: &[u8],
    max_messages: Option<usize>,
) -> (Vec<MessageRange>, Vec<MessageError>) {
    let mut ranges = Vec::new();
    let mut failures = Vec::new();
    let mut pos = 0;
    let mut index = 0;

    while pos < buf.len() {
        if max_messages.map_or(false, |max| index >= max) {
            debug!("Stop after {} messages", index);
            break;
        }

        if !buf[pos..].starts_with(SECT0_IS_MAGIC) {
            match find_magic(&buf[pos..]) {
                Some(skip) => {
                    warn!("Skipping {} bytes of non-GRIB data at offset {}", skip, pos);
                    pos += skip;
                    continue;
                }
                None => {
                    debug!("Ignoring {} trailing bytes at offset {}", buf.len() - pos, pos);
                    break;
                }
            }
        }

        if buf.len() - pos < SECT0_IS_SIZE {
            failures.push(MessageError {
                index,
                offset: pos,
                error: GribError::FormatError(String::from("Truncated Section 0")),
            });
            break;
        }

        let edition = buf[pos + 7];
        let length = match edition {
            1 => read_as!(u32, buf, pos + 4).map(|v| (v >> 8) as u64),
            _ => read_as!(u64, buf, pos + 8),
        }
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(usize::MAX);
        let remaining = buf.len() - pos;

        if edition != 2 {
            failures.push(MessageError {
                index,
                offset: pos,
                error: GribError::GRIBVersionMismatch(edition),
            });
            index += 1;
            if length > SECT0_IS_SIZE && length <= remaining {
                pos += length;
                continue;
            }
            break;
        }

        if length < SECT0_IS_SIZE + SECT8_ES_SIZE || length > remaining {
            failures.push(MessageError {
                index,
                offset: pos,
                error: GribError::FormatError(format!(
                    "Declared message length {} does not fit the {} bytes left in the buffer",
                    length, remaining
                )),
            });
            break;
        }

        debug!("Message {} at offset {} : {} bytes", index, pos, length);
        ranges.push(MessageRange { index, offset: pos, length });
        index += 1;
        pos += length;
    }

    (ranges, failures)
}

fn find_magic(buf: &[u8]) -> Option<usize> {
    buf.windows(SECT0_IS_MAGIC.len())
        .position(|window| window == SECT0_IS_MAGIC)
}

pub type Result<T, E = GribError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum GribError {
    #[error("StdError({0})")]
    StdError(#[from] std::io::Error),

    #[error("NotGRIB")]
    NotGRIB(),

    #[error("GRIBVersionMismatch({0})")]
    GRIBVersionMismatch(u8),

    #[error("EndSectionMismatch")]
    EndSectionMismatch(),

    #[error("UnknownSection({0})")]
    UnknownSection(u8),

    #[error("FormatError({0})")]
    FormatError(String),

    #[error("UnsupportedTemplate({section}.{template})")]
    UnsupportedTemplate { section: u8, template: u16 },

    #[error("UnsupportedFeature({0})")]
    UnsupportedFeature(String),

    #[error("ResourceLimit({size} bytes > {limit} bytes), retry in metadata-only mode")]
    ResourceLimit { size: usize, limit: usize },

    #[error("DecodeError({0})")]
    DecodeError(String),
}

/// Coarse classification of [`GribError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Format,
    UnsupportedTemplate,
    UnsupportedFeature,
    ResourceLimit,
    Decode,
    Io,
}

impl GribError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GribError::StdError(_) => ErrorKind::Io,
            GribError::NotGRIB()
            | GribError::GRIBVersionMismatch(_)
            | GribError::EndSectionMismatch()
            | GribError::UnknownSection(_)
            | GribError::FormatError(_) => ErrorKind::Format,
            GribError::UnsupportedTemplate { .. } => ErrorKind::UnsupportedTemplate,
            GribError::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
            GribError::ResourceLimit { .. } => ErrorKind::ResourceLimit,
            GribError::DecodeError(_) => ErrorKind::Decode,
        }
    }
}
