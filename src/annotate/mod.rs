//! Free-hand annotation of site photos.
//!
//! A [`Sketch`] records pointer gestures as draw commands, [`geometry`] holds
//! the arrow math, and [`raster`] flattens the commands onto the photo.

pub mod geometry;
pub mod raster;
pub mod session;

use crate::error::Result;

pub use geometry::{Point, Segment};
pub use session::{Color, DrawCommand, PointerEvent, Sketch, Tool};

/// An uploaded photo waiting to be annotated and saved.
#[derive(Debug, Clone)]
pub struct PendingPhoto {
    image_data_uri: String,
    sketch: Sketch,
}

impl PendingPhoto {
    /// Opens a sketch sized to the decoded image.
    pub fn open(image_data_uri: String) -> Result<Self> {
        let (width, height) = raster::decode_image(&image_data_uri)?.dimensions();
        Ok(Self {
            image_data_uri,
            sketch: Sketch::new(width, height),
        })
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut Sketch {
        &mut self.sketch
    }

    /// The photo as it would be saved right now, arrow preview included.
    pub fn render(&self) -> Result<String> {
        raster::flatten(&self.image_data_uri, &self.sketch)
    }
}
