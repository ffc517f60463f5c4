//! Data Representation Template 5.41: the packed values are the samples of a
//! PNG image, one pixel per point.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::grib::sections::sect5::CompressionContext;
use crate::grib::sections::sect7::simple::SimpleDecoderIterator;
use crate::grib::utils::BitwiseIterator;
use crate::grib::{GribError, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImageHeader {
    width: usize,
    height: usize,
    bit_depth: usize,
    color_type: u8,
    interlace: u8,
}

impl ImageHeader {
    fn parse(data: &[u8]) -> Result<Self> {
        let invalid = || GribError::FormatError(String::from("PNG IHDR chunk is too short"));
        Ok(ImageHeader {
            width: read_as!(u32, data, 0).ok_or_else(invalid)? as usize,
            height: read_as!(u32, data, 4).ok_or_else(invalid)? as usize,
            bit_depth: *data.get(8).ok_or_else(invalid)? as usize,
            color_type: *data.get(9).ok_or_else(invalid)?,
            interlace: *data.get(12).ok_or_else(invalid)?,
        })
    }

    fn channels(&self) -> Result<usize> {
        match self.color_type {
            0 => Ok(1),
            2 => Ok(3),
            4 => Ok(2),
            6 => Ok(4),
            3 => Err(GribError::UnsupportedFeature(String::from("PNG palette images"))),
            n => Err(GribError::FormatError(format!("PNG color type {}", n))),
        }
    }
}

pub(crate) fn decode(ctx: &CompressionContext, num_points: usize, slice: &[u8]) -> Result<Vec<Option<f64>>> {
    let samples = read_samples(slice, num_points)?;
    Ok(SimpleDecoderIterator::new(samples.into_iter().map(Some), ctx).collect())
}

/// Pixels of the image in row order, each read as one big-endian integer of
/// `channels * bit_depth` bits.
fn read_samples(slice: &[u8], max_samples: usize) -> Result<Vec<u64>> {
    let (header, compressed) = read_chunks(slice)?;
    if header.interlace != 0 {
        return Err(GribError::UnsupportedFeature(String::from("Interlaced PNG images")));
    }

    let pixel_bits = header.channels()? * header.bit_depth;
    if pixel_bits == 0 || pixel_bits > 64 {
        return Err(GribError::FormatError(format!("PNG pixels of {} bits", pixel_bits)));
    }
    let too_large = || {
        GribError::FormatError(format!(
            "PNG image of {}x{} pixels of {} bits is too large",
            header.width, header.height, pixel_bits
        ))
    };
    let stride = header
        .width
        .checked_mul(pixel_bits)
        .and_then(|bits| bits.checked_add(7))
        .ok_or_else(too_large)?
        / 8;
    let expected = stride
        .checked_add(1)
        .and_then(|line| line.checked_mul(header.height))
        .ok_or_else(too_large)?;
    let bytes_per_pixel = (pixel_bits / 8).max(1);

    let mut raw = Vec::new();
    ZlibDecoder::new(&compressed[..])
        .take(expected as u64)
        .read_to_end(&mut raw)
        .map_err(|e| GribError::DecodeError(format!("PNG inflate failed: {}", e)))?;

    if raw.len() < expected {
        return Err(GribError::FormatError(format!(
            "PNG image data has {} octets, a {}x{} image needs {}",
            raw.len(),
            header.width,
            header.height,
            expected
        )));
    }

    let mut samples = Vec::with_capacity(max_samples.min(header.width.saturating_mul(header.height)));
    let mut previous = vec![0u8; stride];
    for scanline in raw.chunks_exact(stride + 1).take(header.height) {
        let mut line = scanline[1..].to_vec();
        unfilter(scanline[0], &mut line, &previous, bytes_per_pixel)?;
        samples.extend(BitwiseIterator::new(&line, pixel_bits).take(header.width));
        if samples.len() >= max_samples {
            samples.truncate(max_samples);
            break;
        }
        previous = line;
    }

    Ok(samples)
}

/// Signature, then chunks until `IEND`; CRCs are not checked. Returns the
/// header and the concatenated `IDAT` payloads.
fn read_chunks(slice: &[u8]) -> Result<(ImageHeader, Vec<u8>)> {
    if !slice.starts_with(&PNG_SIGNATURE) {
        return Err(GribError::FormatError(String::from("Section 7 does not hold a PNG stream")));
    }

    let mut header = None;
    let mut compressed = Vec::new();
    let mut pos = PNG_SIGNATURE.len();

    loop {
        let truncated = || GribError::FormatError(format!("Truncated PNG chunk at octet {}", pos));
        let length = read_as!(u32, slice, pos).ok_or_else(truncated)? as usize;
        let kind = slice.get(pos + 4..pos + 8).ok_or_else(truncated)?;
        let end = (pos + 8).checked_add(length).ok_or_else(truncated)?;
        let data = slice.get(pos + 8..end).ok_or_else(truncated)?;

        match kind {
            b"IHDR" => header = Some(ImageHeader::parse(data)?),
            b"IDAT" => compressed.extend_from_slice(data),
            b"IEND" => break,
            _ => trace!("Skipping PNG chunk {}", String::from_utf8_lossy(kind)),
        }
        pos = end + 4;
    }

    let header = header.ok_or_else(|| GribError::FormatError(String::from("PNG stream has no IHDR chunk")))?;
    Ok((header, compressed))
}

/// Reverses the scanline filter in place against the previous scanline.
fn unfilter(filter: u8, line: &mut [u8], previous: &[u8], bpp: usize) -> Result<()> {
    match filter {
        0 => {}
        1 => {
            for i in bpp..line.len() {
                line[i] = line[i].wrapping_add(line[i - bpp]);
            }
        }
        2 => {
            for (byte, above) in line.iter_mut().zip(previous) {
                *byte = byte.wrapping_add(*above);
            }
        }
        3 => {
            for i in 0..line.len() {
                let left = if i >= bpp { u16::from(line[i - bpp]) } else { 0 };
                let average = (left + u16::from(previous[i])) / 2;
                line[i] = line[i].wrapping_add(average as u8);
            }
        }
        4 => {
            for i in 0..line.len() {
                let (left, upper_left) = if i >= bpp { (line[i - bpp], previous[i - bpp]) } else { (0, 0) };
                line[i] = line[i].wrapping_add(paeth(left, previous[i], upper_left));
            }
        }
        n => return Err(GribError::FormatError(format!("PNG filter type {}", n))),
    }
    Ok(())
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    use super::*;

    fn chunk(buf: &mut Vec<u8>, kind: &[u8], data: &[u8]) {
        buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
        buf.extend_from_slice(kind);
        buf.extend_from_slice(data);
        buf.extend_from_slice(&[0; 4]);
    }

    /// PNG stream around already filtered scanlines.
    fn png(width: u32, height: u32, bit_depth: u8, color_type: u8, scanlines: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(scanlines).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut ihdr = width.to_be_bytes().to_vec();
        ihdr.extend_from_slice(&height.to_be_bytes());
        ihdr.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);

        let mut buf = PNG_SIGNATURE.to_vec();
        chunk(&mut buf, b"IHDR", &ihdr);
        let (head, tail) = compressed.split_at(compressed.len() / 2);
        chunk(&mut buf, b"IDAT", head);
        chunk(&mut buf, b"tEXt", b"comment");
        chunk(&mut buf, b"IDAT", tail);
        chunk(&mut buf, b"IEND", &[]);
        buf
    }

    fn ctx(num_bits: usize) -> CompressionContext {
        CompressionContext {
            reference_value: 0.0,
            binary_scale_factor: 0,
            decimal_scale_factor: 0,
            num_bits,
            original_type: 0,
        }
    }

    #[test]
    fn up_filter_against_empty_row() {
        let payload = png(2, 1, 8, 0, &[2, 17, 42]);

        let values = decode(&ctx(8), 2, &payload).unwrap();

        assert_eq!(values, vec![Some(17.0), Some(42.0)]);
    }

    #[test]
    fn sub_and_paeth_filters() {
        let payload = png(2, 2, 8, 0, &[1, 5, 3, 4, 1, 1]);

        let values = decode(&ctx(8), 4, &payload).unwrap();

        assert_eq!(values, vec![Some(5.0), Some(8.0), Some(6.0), Some(9.0)]);
    }

    #[test]
    fn average_filter_and_16_bit_samples() {
        // row 0: [0x0102, 0x0304]; row 1 average-filtered against row 0
        let payload = png(2, 2, 16, 0, &[0, 1, 2, 3, 4, 3, 0, 0, 0, 0]);

        let samples = read_samples(&payload, 4).unwrap();

        // row 1 unfiltered: [1/2, 2/2, (0+3)/2, (1+4)/2] = [0, 1, 1, 2]
        assert_eq!(samples, vec![0x0102, 0x0304, 0x0001, 0x0102]);
    }

    #[test]
    fn sub_byte_and_rgb_pixels() {
        let gray4 = png(3, 1, 4, 0, &[0, 0x1f, 0x30]);
        assert_eq!(read_samples(&gray4, 3).unwrap(), vec![1, 15, 3]);

        let rgb = png(1, 1, 8, 2, &[0, 0x01, 0x02, 0x03]);
        assert_eq!(read_samples(&rgb, 1).unwrap(), vec![0x010203]);
    }

    #[test]
    fn huge_image_header_is_a_format_error() {
        let rgba16 = png(u32::MAX, u32::MAX, 16, 6, &[0; 8]);
        assert!(matches!(read_samples(&rgba16, 4), Err(GribError::FormatError(_))));

        let wide = png(u32::MAX, 1, 8, 0, &[0; 8]);
        assert!(matches!(read_samples(&wide, 4), Err(GribError::FormatError(_))));
    }

    #[test]
    fn chunk_length_past_the_stream_is_truncated() {
        let mut payload = PNG_SIGNATURE.to_vec();
        payload.extend_from_slice(&u32::MAX.to_be_bytes());
        payload.extend_from_slice(b"IDAT");

        assert!(matches!(read_samples(&payload, 1), Err(GribError::FormatError(_))));
    }

    #[test]
    fn rejects_bad_streams() {
        assert!(matches!(decode(&ctx(8), 1, b"not a png"), Err(GribError::FormatError(_))));

        let palette = png(1, 1, 8, 3, &[0, 0]);
        assert!(matches!(decode(&ctx(8), 1, &palette), Err(GribError::UnsupportedFeature(_))));

        let bad_filter = png(1, 1, 8, 0, &[9, 0]);
        assert!(matches!(decode(&ctx(8), 1, &bad_filter), Err(GribError::FormatError(_))));
    }
}
