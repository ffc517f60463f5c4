#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Assembles small GRIB2 messages section by section.
pub struct Grib2Builder {
    discipline: u8,
    sect3: Vec<u8>,
    sect4: Vec<u8>,
    sect5: Vec<u8>,
    sect6: Option<Vec<u8>>,
    sect7: Vec<u8>,
}

impl Default for Grib2Builder {
    fn default() -> Self {
        Grib2Builder::new()
    }
}

impl Grib2Builder {
    /// 2x2 temperature grid from 10N 0E to 9N 1E, every value 0.
    pub fn new() -> Self {
        Grib2Builder {
            discipline: 0,
            sect3: lat_lon(2, 2, 10_000_000, 0, 9_000_000, 1_000_000, 0),
            sect4: product(0, 0, 6),
            sect5: Vec::new(),
            sect6: Some(section(6, &[255])),
            sect7: Vec::new(),
        }
        .simple_packing(0.0, 0, 0, 8, &[0, 0, 0, 0])
    }

    /// Regular lat/lon grid, angles in micro-degrees.
    pub fn grid(mut self, nx: u32, ny: u32, la1: i32, la2: i32, scanning_mode: u8) -> Self {
        self.sect3 = lat_lon(nx, ny, la1, 0, la2, 1_000_000, scanning_mode);
        self
    }

    /// Lambert conformal grid (template 3.30) with its first point at
    /// `la1`/`lo1`, angles in micro-degrees.
    pub fn lambert(mut self, nx: u32, ny: u32, la1: i32, lo1: i32, scanning_mode: u8) -> Self {
        let mut body = vec![0];
        body.extend_from_slice(&(nx * ny).to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(&30u16.to_be_bytes());
        body.push(6);
        body.extend_from_slice(&[0; 15]);
        body.extend_from_slice(&nx.to_be_bytes());
        body.extend_from_slice(&ny.to_be_bytes());
        body.extend_from_slice(&signed32(la1));
        body.extend_from_slice(&signed32(lo1));
        body.push(0x08);
        body.extend_from_slice(&signed32(25_000_000));
        body.extend_from_slice(&signed32(265_000_000));
        body.extend_from_slice(&3_000_000u32.to_be_bytes());
        body.extend_from_slice(&3_000_000u32.to_be_bytes());
        body.extend_from_slice(&[0, scanning_mode]);
        body.extend_from_slice(&signed32(25_000_000));
        body.extend_from_slice(&signed32(25_000_000));
        body.extend_from_slice(&signed32(-90_000_000));
        body.extend_from_slice(&signed32(0));
        self.sect3 = section(3, &body);
        self
    }

    /// Section 3 carrying only the template number.
    pub fn grid_template(mut self, template: u16, num_points: u32) -> Self {
        let mut body = vec![0];
        body.extend_from_slice(&num_points.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(&template.to_be_bytes());
        self.sect3 = section(3, &body);
        self
    }

    pub fn parameter(mut self, discipline: u8, category: u8, number: u8) -> Self {
        self.discipline = discipline;
        self.sect4 = product(category, number, 6);
        self
    }

    /// Template 4.0 at the ground with the forecast time in any unit of
    /// Code Table 4.4.
    pub fn forecast(mut self, unit: u8, value: u32) -> Self {
        self.sect4 = product_in(0, 0, unit, value);
        self
    }

    pub fn simple_packing(mut self, reference: f32, e: i16, d: i16, num_bits: u8, packed: &[u64]) -> Self {
        self.sect5 = scaled_packing(0, packed.len() as u32, reference, e, d, num_bits, &[]);
        self.sect7 = section(7, &pack_bits(packed, num_bits as usize));
        self
    }

    /// Template 5.2, or 5.3 when `spatial` gives the differencing order and
    /// descriptor octets. Groups use 8-bit widths and lengths, reference 0 and
    /// increment 1; `payload` is Section 7 as is.
    pub fn complex_packing(
        mut self,
        num_points: u32,
        num_bits: u8,
        num_groups: u32,
        last_length: u32,
        spatial: Option<(u8, u8)>,
        payload: &[u8],
    ) -> Self {
        let mut groups = vec![1, 0];
        groups.extend_from_slice(&0u32.to_be_bytes());
        groups.extend_from_slice(&0u32.to_be_bytes());
        groups.extend_from_slice(&num_groups.to_be_bytes());
        groups.extend_from_slice(&[0, 8]);
        groups.extend_from_slice(&0u32.to_be_bytes());
        groups.push(1);
        groups.extend_from_slice(&last_length.to_be_bytes());
        groups.push(8);
        let template = match spatial {
            Some((order, octets)) => {
                groups.extend_from_slice(&[order, octets]);
                3
            }
            None => 2,
        };
        self.sect5 = scaled_packing(template, num_points, 0.0, 0, 0, num_bits, &groups);
        self.sect7 = section(7, payload);
        self
    }

    /// Template 5.41 over an 8-bit greyscale PNG of `width` x `height` pixels
    /// built from already filtered scanlines.
    pub fn png_packing(mut self, reference: f32, width: u32, height: u32, scanlines: &[u8]) -> Self {
        self.sect5 = scaled_packing(41, width * height, reference, 0, 0, 8, &[]);
        self.sect7 = section(7, &png_gray8(width, height, scanlines));
        self
    }

    pub fn ieee_single(mut self, values: &[f32]) -> Self {
        let mut body = (values.len() as u32).to_be_bytes().to_vec();
        body.extend_from_slice(&4u16.to_be_bytes());
        body.push(1);
        self.sect5 = section(5, &body);
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        self.sect7 = section(7, &payload);
        self
    }

    /// Section 5 with an arbitrary template number and a zeroed body.
    pub fn data_template(mut self, template: u16) -> Self {
        let mut body = 4u32.to_be_bytes().to_vec();
        body.extend_from_slice(&template.to_be_bytes());
        body.extend_from_slice(&[0; 10]);
        self.sect5 = section(5, &body);
        self
    }

    pub fn bitmap(mut self, present: &[bool]) -> Self {
        let bits: Vec<u64> = present.iter().map(|p| u64::from(*p)).collect();
        let mut body = vec![0];
        body.extend(pack_bits(&bits, 1));
        self.sect6 = Some(section(6, &body));
        self
    }

    pub fn without_section6(mut self) -> Self {
        self.sect6 = None;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut sections = section(1, &identification());
        sections.extend_from_slice(&self.sect3);
        sections.extend_from_slice(&self.sect4);
        sections.extend_from_slice(&self.sect5);
        if let Some(sect6) = &self.sect6 {
            sections.extend_from_slice(sect6);
        }
        sections.extend_from_slice(&self.sect7);

        let total = 16 + sections.len() + 4;
        let mut buf = b"GRIB".to_vec();
        buf.extend_from_slice(&[0, 0, self.discipline, 2]);
        buf.extend_from_slice(&(total as u64).to_be_bytes());
        buf.extend(sections);
        buf.extend_from_slice(b"7777");
        buf
    }
}

/// Header, number and body of one section.
pub fn section(number: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = ((body.len() + 5) as u32).to_be_bytes().to_vec();
    buf.push(number);
    buf.extend_from_slice(body);
    buf
}

/// Centre 98, reference time 2024-01-15 06:00:00 UTC.
fn identification() -> Vec<u8> {
    let mut body = 98u16.to_be_bytes().to_vec();
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&[2, 0, 1]);
    body.extend_from_slice(&2024u16.to_be_bytes());
    body.extend_from_slice(&[1, 15, 6, 0, 0, 0, 1]);
    body
}

fn lat_lon(nx: u32, ny: u32, la1: i32, lo1: i32, la2: i32, lo2: i32, scanning_mode: u8) -> Vec<u8> {
    let mut body = vec![0];
    body.extend_from_slice(&(nx * ny).to_be_bytes());
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&0u16.to_be_bytes());
    body.push(6);
    body.extend_from_slice(&[0; 15]);
    body.extend_from_slice(&nx.to_be_bytes());
    body.extend_from_slice(&ny.to_be_bytes());
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&signed32(la1));
    body.extend_from_slice(&signed32(lo1));
    body.push(0x30);
    body.extend_from_slice(&signed32(la2));
    body.extend_from_slice(&signed32(lo2));
    body.extend_from_slice(&1_000_000u32.to_be_bytes());
    body.extend_from_slice(&1_000_000u32.to_be_bytes());
    body.push(scanning_mode);
    section(3, &body)
}

/// Template 4.0 at the ground, forecast `hours` ahead.
fn product(category: u8, number: u8, hours: u32) -> Vec<u8> {
    product_in(category, number, 1, hours)
}

fn product_in(category: u8, number: u8, unit: u8, forecast: u32) -> Vec<u8> {
    let mut body = 0u16.to_be_bytes().to_vec();
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&[category, number, 2, 0, 0, 0, 0, 0, unit]);
    body.extend_from_slice(&forecast.to_be_bytes());
    body.extend_from_slice(&[1, 0, 0, 0, 0, 0]);
    body.extend_from_slice(&[255, 255, 255, 255, 255, 255]);
    section(4, &body)
}

/// Section 5 for templates sharing the reference value, scale factors and
/// bit count of 5.0, followed by `extra` template octets.
fn scaled_packing(template: u16, num_points: u32, reference: f32, e: i16, d: i16, num_bits: u8, extra: &[u8]) -> Vec<u8> {
    let mut body = num_points.to_be_bytes().to_vec();
    body.extend_from_slice(&template.to_be_bytes());
    body.extend_from_slice(&reference.to_be_bytes());
    body.extend_from_slice(&signed16(e));
    body.extend_from_slice(&signed16(d));
    body.extend_from_slice(&[num_bits, 0]);
    body.extend_from_slice(extra);
    section(5, &body)
}

fn png_chunk(buf: &mut Vec<u8>, kind: &[u8], data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(data);
    buf.extend_from_slice(&[0; 4]);
}

pub fn png_gray8(width: u32, height: u32, scanlines: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(scanlines).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut ihdr = width.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 0, 0, 0, 0]);

    let mut buf = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    png_chunk(&mut buf, b"IHDR", &ihdr);
    png_chunk(&mut buf, b"IDAT", &compressed);
    png_chunk(&mut buf, b"IEND", &[]);
    buf
}

fn signed16(v: i16) -> [u8; 2] {
    let magnitude = v.unsigned_abs();
    (if v < 0 { magnitude | 0x8000 } else { magnitude }).to_be_bytes()
}

fn signed32(v: i32) -> [u8; 4] {
    let magnitude = v.unsigned_abs();
    (if v < 0 { magnitude | 0x8000_0000 } else { magnitude }).to_be_bytes()
}

pub fn pack_bits(values: &[u64], width: usize) -> Vec<u8> {
    let mut out = vec![0u8; (values.len() * width + 7) / 8];
    for (i, value) in values.iter().enumerate() {
        for b in 0..width {
            if value >> (width - 1 - b) & 1 == 1 {
                let pos = i * width + b;
                out[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }
    out
}
