use serde::Serialize;

use crate::error::{InvitationError, Result};

/// Cadence of the full-screen backdrop on the cover and hero sections
pub const BACKDROP_INTERVAL_MS: u64 = 2400;

/// Cadence of the couple's portrait frames
pub const PORTRAIT_INTERVAL_MS: u64 = 1000;

/// Ordered, non-empty list of image references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePool {
    name: String,
    images: Vec<String>,
}

impl ImagePool {
    /// Creates a pool from image paths
    ///
    /// # Arguments
    /// * `name` - Label used in error messages and logs
    /// * `images` - Image references in display order
    ///
    /// # Errors
    /// * `InvitationError::EmptyPool` if `images` is empty
    pub fn new(name: &str, images: Vec<String>) -> Result<Self> {
        if images.is_empty() {
            return Err(InvitationError::EmptyPool(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            images,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the pool holds no images; never true for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// How unfocused images are drawn underneath the focused one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    /// Opacity percentage of images that are not in focus
    pub dimmed_opacity: u8,
    /// Stacking order of the focused image
    pub focused_z: u8,
}

impl Fade {
    /// Backdrop images stay faintly visible behind the current one
    pub const BACKDROP: Fade = Fade {
        dimmed_opacity: 40,
        focused_z: 10,
    };

    /// Portrait frames hide everything but the current image
    pub const PORTRAIT: Fade = Fade {
        dimmed_opacity: 0,
        focused_z: 10,
    };
}

/// One stacked image layer as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub index: usize,
    pub src: String,
    pub opacity: u8,
    pub z: u8,
    pub focused: bool,
}

/// Cursor over an `ImagePool` that wraps around on every tick
#[derive(Debug, Clone)]
pub struct Carousel {
    pool: ImagePool,
    fade: Fade,
    cursor: usize,
}

impl Carousel {
    pub fn new(pool: ImagePool, fade: Fade) -> Self {
        Self {
            pool,
            fade,
            cursor: 0,
        }
    }

    pub fn pool(&self) -> &ImagePool {
        &self.pool
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Image currently in focus
    pub fn current(&self) -> &str {
        &self.pool.images[self.cursor]
    }

    /// Moves focus to the next image, wrapping to the first after the last
    ///
    /// # Returns
    /// * The new cursor value
    pub fn advance(&mut self) -> usize {
        // pool length is at least one, enforced by ImagePool::new
        self.cursor = (self.cursor + 1) % self.pool.len();
        self.cursor
    }

    /// All layers with the opacity and stacking they should be drawn with
    pub fn layers(&self) -> Vec<Layer> {
        self.pool
            .images
            .iter()
            .enumerate()
            .map(|(index, src)| {
                let focused = index == self.cursor;
                Layer {
                    index,
                    src: src.clone(),
                    opacity: if focused { 100 } else { self.fade.dimmed_opacity },
                    z: if focused { self.fade.focused_z } else { 0 },
                    focused,
                }
            })
            .collect()
    }
}
