use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::config::DecoderConfig;
use crate::grib::diagnostics::{Diagnostic, Diagnostics};
use crate::grib::scan::{self, ScanPlan};
use crate::grib::sections::sect1::Identification;
use crate::grib::sections::sect3::GridDefinition;
use crate::grib::sections::sect4::ProductInfo;
use crate::grib::sections::sect5::DataRepresentation;
use crate::grib::sections::sect6::{self, Bitmap};
use crate::grib::sections::{sect7, split_sections, Sections};
use crate::grib::{split_messages, GribError, MessageRange, Result};

/// Bytes held per grid point once decoded.
const BYTES_PER_POINT: usize = std::mem::size_of::<Option<f64>>();

/// One fully decoded message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedGrid {
    pub byte_range: MessageRange,
    pub identification: Identification,
    /// Geometry after scan normalization: first row is the northernmost
    pub grid: GridDefinition,
    pub product: ProductInfo,
    /// Row-major values, `None` where the bitmap or the packing marks a
    /// missing point
    pub values: Vec<Option<f64>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodedGrid {
    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.grid.ny, self.grid.nx)
    }

    /// Value at column `i` of row `j`.
    pub fn value_at(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.grid.nx || j >= self.grid.ny {
            return None;
        }
        self.values.get(j * self.grid.nx + i).copied().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.values.chunks(self.grid.nx.max(1))
    }
}

/// A message that could not be decoded; the other messages of the buffer are
/// unaffected.
#[derive(thiserror::Error, Debug)]
#[error("Message {index} at offset {offset}: {error}")]
pub struct MessageError {
    pub index: usize,
    pub offset: usize,
    #[source]
    pub error: GribError,
}

impl Serialize for MessageError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MessageError", 4)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("offset", &self.offset)?;
        state.serialize_field("kind", &self.error.kind())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DecodeReport {
    pub grids: Vec<DecodedGrid>,
    pub failures: Vec<MessageError>,
}

/// Everything about a message but its values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    pub byte_range: MessageRange,
    pub identification: Identification,
    pub grid: GridDefinition,
    pub product: ProductInfo,
    pub data_representation: DataRepresentation,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default, Serialize)]
pub struct MetadataReport {
    pub messages: Vec<MessageMetadata>,
    pub failures: Vec<MessageError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedValues {
    pub values: Vec<Option<f64>>,
    /// Presence of each point, in the same order as `values`
    pub bitmap: Option<Vec<bool>>,
    pub grid: GridDefinition,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Decoder { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes every message of `buf`. Fails as a whole only when `buf` is
    /// larger than the memory ceiling; broken messages end up in `failures`.
    pub fn decode_all(&self, buf: &[u8]) -> Result<DecodeReport> {
        self.check_ceiling(buf.len())?;

        let (ranges, failures) = split_messages(buf, self.config.max_messages);
        info!("Decoding {} messages from {} bytes", ranges.len(), buf.len());

        let results = self.map_messages(&ranges, |range| self.decode_message(buf, range));
        let (grids, failures) = collect(results, failures);

        info!("Decoded {} grids, {} failures", grids.len(), failures.len());
        Ok(DecodeReport { grids, failures })
    }

    /// Frames every message and decodes sections 1 to 5, leaving the packed
    /// values alone. Use the returned byte ranges with
    /// [`decode_values`](Self::decode_values).
    pub fn decode_metadata_only(&self, buf: &[u8], max_messages: Option<usize>) -> MetadataReport {
        let (ranges, failures) = split_messages(buf, max_messages.or(self.config.max_messages));
        info!("Reading metadata of {} messages", ranges.len());

        let results = self.map_messages(&ranges, |range| read_metadata(buf, range));
        let (messages, failures) = collect(results, failures);

        MetadataReport { messages, failures }
    }

    /// Decodes the values of the single message at `range`.
    pub fn decode_values(&self, buf: &[u8], range: &MessageRange) -> Result<DecodedValues> {
        let message = message_bytes(buf, range)?;
        self.check_ceiling(range.length)?;

        let sections = split_sections(message)?;
        let mut diagnostics = Diagnostics::default();
        let grid = GridDefinition::from_section(&sections.sect3, &mut diagnostics)?;
        let plan = scan::plan(grid, &mut diagnostics)?;
        let (values, bitmap) = self.unpack_values(&sections, &plan, &mut diagnostics)?;

        Ok(DecodedValues {
            values,
            bitmap,
            grid: plan.grid,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Reads and decodes a whole file, refusing it before reading when it
    /// exceeds the memory ceiling.
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<DecodeReport> {
        let path = path.as_ref();
        let size = fs::metadata(path)?.len() as usize;
        self.check_ceiling(size)?;

        debug!("Reading {} ({} bytes)", path.display(), size);
        let buf = fs::read(path)?;
        self.decode_all(&buf)
    }

    fn check_ceiling(&self, size: usize) -> Result<()> {
        if size > self.config.memory_ceiling {
            return Err(GribError::ResourceLimit {
                size,
                limit: self.config.memory_ceiling,
            });
        }
        Ok(())
    }

    fn map_messages<T, F>(&self, ranges: &[MessageRange], f: F) -> Vec<(MessageRange, Result<T>)>
    where
        T: Send,
        F: Fn(&MessageRange) -> Result<T> + Sync + Send,
    {
        if self.config.parallel {
            ranges.par_iter().map(|range| (*range, f(range))).collect()
        } else {
            ranges.iter().map(|range| (*range, f(range))).collect()
        }
    }

    fn decode_message(&self, buf: &[u8], range: &MessageRange) -> Result<DecodedGrid> {
        let sections = split_sections(message_bytes(buf, range)?)?;
        let mut diagnostics = Diagnostics::default();

        let (identification, grid, product) = read_products(&sections, &mut diagnostics)?;
        let plan = scan::plan(grid, &mut diagnostics)?;
        let (values, _) = self.unpack_values(&sections, &plan, &mut diagnostics)?;

        debug!(
            "Message {} : {} ({}) on a {}x{} grid",
            range.index, product.parameter_name, product.units, plan.grid.nx, plan.grid.ny
        );

        Ok(DecodedGrid {
            byte_range: *range,
            identification,
            grid: plan.grid,
            product,
            values,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Sections 5 to 7: values in normalized order and the matching bitmap.
    fn unpack_values(
        &self,
        sections: &Sections,
        plan: &ScanPlan,
        diagnostics: &mut Diagnostics,
    ) -> Result<(Vec<Option<f64>>, Option<Vec<bool>>)> {
        let repr = DataRepresentation::from_section(&sections.sect5)?;
        let num_points = plan.grid.num_points;
        self.check_ceiling(num_points.max(repr.num_points).saturating_mul(BYTES_PER_POINT))?;

        if let Some(local) = &sections.sect2 {
            debug!("Ignoring Section {} : {} octets of local use", local.header.number, local.header.size);
        }
        trace!("Section 7 at octet {} : {} octets", sections.sect7.offset, sections.sect7.header.size);

        let bitmap = Bitmap::from_section(sections.sect6.as_ref(), diagnostics)?;
        let packed = sect7::decode(&repr, sections.sect7.body(), diagnostics)?;

        let mask = bitmap.mask(num_points);
        let values = sect6::apply(packed, mask.as_deref(), num_points, diagnostics);

        let values = scan::reorder(plan, values, diagnostics);
        let mask = mask.map(|mask| scan::reorder(plan, mask, &mut Diagnostics::default()));

        Ok((values, mask))
    }
}

fn message_bytes<'a>(buf: &'a [u8], range: &MessageRange) -> Result<&'a [u8]> {
    buf.get(range.offset..range.end()).ok_or_else(|| {
        GribError::FormatError(format!(
            "Message range {}..{} is outside the {} bytes buffer",
            range.offset,
            range.end(),
            buf.len()
        ))
    })
}

fn read_products(
    sections: &Sections,
    diagnostics: &mut Diagnostics,
) -> Result<(Identification, GridDefinition, ProductInfo)> {
    let identification = Identification::from_section(&sections.sect1, diagnostics)?;
    let grid = GridDefinition::from_section(&sections.sect3, diagnostics)?;
    let product = ProductInfo::from_section(
        &sections.sect4,
        sections.indicator.discipline,
        identification.ref_time,
        diagnostics,
    )?;
    Ok((identification, grid, product))
}

fn read_metadata(buf: &[u8], range: &MessageRange) -> Result<MessageMetadata> {
    let sections = split_sections(message_bytes(buf, range)?)?;
    let mut diagnostics = Diagnostics::default();

    let (identification, grid, product) = read_products(&sections, &mut diagnostics)?;
    let plan = scan::plan(grid, &mut diagnostics)?;
    let data_representation = DataRepresentation::from_section(&sections.sect5)?;

    Ok(MessageMetadata {
        byte_range: *range,
        identification,
        grid: plan.grid,
        product,
        data_representation,
        diagnostics: diagnostics.into_vec(),
    })
}

/// Splits per-message results, keeping failures in message order.
fn collect<T>(
    results: Vec<(MessageRange, Result<T>)>,
    mut failures: Vec<MessageError>,
) -> (Vec<T>, Vec<MessageError>) {
    let mut decoded = Vec::with_capacity(results.len());

    for (range, result) in results {
        match result {
            Ok(value) => decoded.push(value),
            Err(error) => {
                warn!("Message {} at offset {} failed : {}", range.index, range.offset, error);
                failures.push(MessageError {
                    index: range.index,
                    offset: range.offset,
                    error,
                });
            }
        }
    }

    failures.sort_by_key(|failure| failure.index);
    (decoded, failures)
}

/// [`Decoder::decode_all`] with the default configuration.
pub fn decode_all(buf: &[u8]) -> Result<DecodeReport> {
    Decoder::default().decode_all(buf)
}

/// [`Decoder::decode_metadata_only`] with the default configuration.
pub fn decode_metadata_only(buf: &[u8], max_messages: Option<usize>) -> MetadataReport {
    Decoder::default().decode_metadata_only(buf, max_messages)
}

/// [`Decoder::decode_values`] with the default configuration.
pub fn decode_values(buf: &[u8], range: &MessageRange) -> Result<DecodedValues> {
    Decoder::default().decode_values(buf, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grib::sections::sect3::ScanningMode;
    use crate::grib::ErrorKind;

    fn grid(nx: usize, ny: usize) -> GridDefinition {
        GridDefinition {
            template_number: 0,
            nx,
            ny,
            num_points: nx * ny,
            lat_start: 1.0,
            lon_start: 0.0,
            lat_end: Some(0.0),
            lon_end: Some(1.0),
            inc_i: Some(1.0),
            inc_j: Some(1.0),
            scanning_mode: ScanningMode(0),
            earth_shape: None,
            lambert: None,
            approximate: false,
            origin_last_row: false,
        }
    }

    #[test]
    fn ceiling_rejects_large_buffers() {
        let decoder = Decoder::new(DecoderConfig {
            memory_ceiling: 8,
            ..DecoderConfig::default()
        });

        let result = decoder.decode_all(&[0u8; 9]);

        match result {
            Err(e) => assert_eq!(e.kind(), ErrorKind::ResourceLimit),
            Ok(_) => panic!("buffer above the ceiling was decoded"),
        }
        assert!(decoder.decode_all(&[0u8; 8]).is_ok());
    }

    #[test]
    fn range_outside_buffer_is_a_format_error() {
        let range = MessageRange { index: 0, offset: 4, length: 100 };
        let result = decode_values(&[0u8; 16], &range);
        assert!(matches!(result, Err(GribError::FormatError(_))));
    }

    #[test]
    fn failures_are_sorted_by_index() {
        let range = |index| MessageRange { index, offset: index * 10, length: 10 };
        let results: Vec<(MessageRange, Result<u8>)> = vec![
            (range(0), Ok(1)),
            (range(2), Err(GribError::DecodeError(String::from("corrupt")))),
        ];
        let framing = vec![MessageError {
            index: 1,
            offset: 10,
            error: GribError::NotGRIB(),
        }];

        let (decoded, failures) = collect(results, framing);

        assert_eq!(decoded, vec![1]);
        assert_eq!(failures.iter().map(|f| f.index).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn message_error_serializes_kind_and_message() {
        let failure = MessageError {
            index: 3,
            offset: 120,
            error: GribError::UnsupportedTemplate { section: 5, template: 50 },
        };

        let json = serde_json::to_value(&failure).unwrap();

        assert_eq!(json["index"], 3);
        assert_eq!(json["kind"], "unsupportedTemplate");
        assert_eq!(json["message"], "UnsupportedTemplate(5.50)");
    }

    #[test]
    fn grid_helpers() {
        let decoded = DecodedGrid {
            byte_range: MessageRange { index: 0, offset: 0, length: 0 },
            identification: Identification {
                centre_id: 98,
                centre: None,
                subcentre_id: 0,
                master_table_version: 2,
                local_table_version: 0,
                ref_time_significance: 1,
                ref_time: None,
                prod_status: 0,
                data_type: 1,
            },
            grid: grid(3, 2),
            product: ProductInfo {
                template_number: 0,
                discipline: 0,
                category: 0,
                parameter_number: 0,
                parameter_name: "Temperature",
                abbrev: "TMP",
                units: "K",
                generating_process: 2,
                lead_time_seconds: None,
                valid_time: None,
                first_surface: None,
                second_surface: None,
                statistics: None,
            },
            values: vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)],
            diagnostics: Vec::new(),
        };

        assert_eq!(decoded.shape(), (2, 3));
        assert_eq!(decoded.value_at(0, 1), Some(4.0));
        assert_eq!(decoded.value_at(2, 0), None);
        assert_eq!(decoded.value_at(3, 0), None);
        assert_eq!(decoded.rows().count(), 2);
        assert_eq!(decoded.rows().nth(1).unwrap(), &[Some(4.0), Some(5.0), Some(6.0)]);
    }
}
