//! Flattening a sketch onto its photo.

use super::geometry::{Point, Segment};
use super::session::{DrawCommand, Sketch};
use crate::error::{AppError, Result};
use crate::import;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Paints `commands` over a copy of `base`. Strokes are opaque and clipped
/// to the image.
pub fn render(base: &RgbaImage, commands: &[DrawCommand]) -> RgbaImage {
    let mut canvas = base.clone();
    for command in commands {
        let color = Rgba(command.color.rgba());
        let radius = command.width.max(1) as f64 / 2.0;
        for segment in command.segments() {
            draw_segment(&mut canvas, segment, radius, color);
        }
    }
    canvas
}

fn draw_segment(canvas: &mut RgbaImage, segment: Segment, radius: f64, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let margin = radius + 1.0;
    let bounds = (
        Point::new(-margin, -margin),
        Point::new(width as f64 + margin, height as f64 + margin),
    );
    // Only the visible stretch is stepped through
    let Some(segment) = segment.clip(bounds.0, bounds.1) else {
        return;
    };
    let length = segment.from.distance(segment.to);
    let steps = length.ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let at = Point::new(
            segment.from.x + (segment.to.x - segment.from.x) * t,
            segment.from.y + (segment.to.y - segment.from.y) * t,
        );
        stamp(canvas, at, radius, color);
    }
}

fn stamp(canvas: &mut RgbaImage, center: Point, radius: f64, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let min_x = (center.x - radius).floor().max(0.0);
    let min_y = (center.y - radius).floor().max(0.0);
    let max_x = (center.x + radius).ceil().min(width as f64 - 1.0);
    let max_y = (center.y + radius).ceil().min(height as f64 - 1.0);
    if max_x < min_x || max_y < min_y {
        return;
    }
    let reach = radius.max(0.5);
    for y in min_y as u32..=max_y as u32 {
        for x in min_x as u32..=max_x as u32 {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            if dx * dx + dy * dy <= reach * reach {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decodes an image `data:` URI into RGBA pixels.
pub fn decode_image(data_uri: &str) -> Result<RgbaImage> {
    let (mime, bytes) = import::decode_data_uri(data_uri)?;
    if !mime.starts_with("image/") {
        return Err(AppError::invalid(format!("{} is not an image", mime)));
    }
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Renders the sketch over the photo and returns the result as a PNG data URI.
///
/// The sketch must have been opened at the photo's size.
pub fn flatten(photo_data_uri: &str, sketch: &Sketch) -> Result<String> {
    let base = decode_image(photo_data_uri)?;
    if base.dimensions() != sketch.size() {
        return Err(AppError::invalid(format!(
            "sketch is {:?} but the photo is {:?}",
            sketch.size(),
            base.dimensions()
        )));
    }
    let flattened = render(&base, &sketch.visible().copied().collect::<Vec<_>>());
    let png = encode_png(&flattened)?;
    log::debug!(
        "Flattened {} annotation commands into {} bytes of PNG",
        sketch.commands().len(),
        png.len()
    );
    Ok(import::encode_data_uri("image/png", &png))
}
