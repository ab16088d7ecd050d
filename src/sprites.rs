//! Sprite handles and the art catalog
//!
//! The simulation never touches pixels. An asset loader outside this crate
//! decodes the images and hands over their dimensions plus an opaque handle
//! the renderer can map back to a texture. Entities derive their bounds
//! from these dimensions, so the catalog rejects non-positive sizes up
//! front.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An opaque reference to one decoded sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Renderer-side identifier; meaningless to the simulation
    pub handle: u32,
    /// Pixel dimensions of the decoded image. Always positive.
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(handle: u32, width: f32, height: f32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The whole/sliced art pair for one fruit kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitArt {
    pub whole: Sprite,
    pub sliced: Sprite,
}

/// Every sprite the game can draw.
///
/// `bomb` is optional: when the bomb image fails to load, the spawner
/// simply never produces bombs and the round degrades to fruit-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteCatalog {
    pub fruits: Vec<FruitArt>,
    pub bomb: Option<Sprite>,
    /// Explosion animation frames, in playback order
    pub explosion: Vec<Sprite>,
}

/// Error type for catalog descriptions
#[derive(Debug)]
pub enum CatalogError {
    /// Deserialization failure (invalid JSON, wrong shape)
    Parse(String),
    /// A sprite with non-positive dimensions
    BadDimensions {
        what: String,
        width: f32,
        height: f32,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            CatalogError::BadDimensions {
                what,
                width,
                height,
            } => write!(f, "sprite '{what}' has invalid dimensions {width}x{height}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

impl SpriteCatalog {
    /// Parse a catalog description produced by the asset loader.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the positive-dimension invariant on every sprite.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (i, art) in self.fruits.iter().enumerate() {
            check(format!("fruit {i} whole"), &art.whole)?;
            check(format!("fruit {i} sliced"), &art.sliced)?;
        }
        if let Some(bomb) = &self.bomb {
            check("bomb".to_string(), bomb)?;
        }
        for (i, frame) in self.explosion.iter().enumerate() {
            check(format!("explosion frame {i}"), frame)?;
        }
        Ok(())
    }

    pub fn has_bombs(&self) -> bool {
        self.bomb.is_some()
    }

    /// Catalog matching the stock art sheets: seven fruit kinds cut from a
    /// two-column sheet (the sliced half is 10 px wider), one bomb, and a
    /// 4x4 sheet of explosion frames.
    pub fn standard() -> Self {
        let mut handle = 0;
        let mut next = || {
            handle += 1;
            handle
        };

        let fruits = (0..7)
            .map(|_| FruitArt {
                whole: Sprite::new(next(), 101.0, 85.0),
                sliced: Sprite::new(next(), 111.0, 85.0),
            })
            .collect();
        let bomb = Some(Sprite::new(next(), 80.0, 80.0));
        let explosion = (0..16).map(|_| Sprite::new(next(), 96.0, 96.0)).collect();

        Self {
            fruits,
            bomb,
            explosion,
        }
    }
}

fn check(what: String, sprite: &Sprite) -> Result<(), CatalogError> {
    if sprite.width > 0.0 && sprite.height > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::BadDimensions {
            what,
            width: sprite.width,
            height: sprite.height,
        })
    }
}
