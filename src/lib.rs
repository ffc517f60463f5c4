#[macro_use]
extern crate log;

pub mod config;
mod error;
pub mod grib;

pub use config::{Config, DecoderConfig};
pub use error::{Error, Result};
pub use grib::{
    decode_all, decode_metadata_only, decode_values, DecodeReport, DecodedGrid, DecodedValues,
    Decoder, GribError, MessageRange, MetadataReport,
};
