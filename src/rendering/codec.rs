//! PNG decoding and encoding for the CLI harness.

use std::io::Cursor;

use pixel_quant::Raster;

use crate::error::WorkerError;

/// Decode a PNG into an RGBA raster.
///
/// Palette images and bit depths below 8 are expanded, 16-bit channels are
/// stripped to 8, and gray or RGB images get an opaque alpha channel.
/// Images above `max_pixels` are rejected from the header, before any
/// pixel data is allocated.
pub fn decode_png(bytes: &[u8], max_pixels: u64) -> Result<Raster, WorkerError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let header = reader.info();
    let pixels = header.width as u64 * header.height as u64;
    if pixels > max_pixels {
        return Err(WorkerError::TooLarge {
            pixels,
            max: max_pixels,
        });
    }

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(WorkerError::UnsupportedPng(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let pixels = info.width as usize * info.height as usize;
    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => {
            let mut out = Vec::with_capacity(pixels * 4);
            for px in data.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            out
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(pixels * 4);
            for px in data.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
            out
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(pixels * 4);
            for &v in data {
                out.extend_from_slice(&[v, v, v, 255]);
            }
            out
        }
        png::ColorType::Indexed => {
            return Err(WorkerError::UnsupportedPng(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    Ok(Raster::new(info.width as usize, info.height as usize, rgba)?)
}

/// Encode a raster as an 8-bit RGBA PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, WorkerError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width() as u32, raster.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(raster.as_bytes())?;
    }
    Ok(buf.into_inner())
}
