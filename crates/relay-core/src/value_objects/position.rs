//! Position - last known 2-D coordinate of a client's cursor

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for randomly seeded coordinates
const SEED_EXTENT: u32 = 1000;

/// A point on the shared page, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "pagex")]
    pub x: f64,
    #[serde(rename = "pagey")]
    pub y: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Pick a random whole-pixel position in `[0, 1000)` on both axes
    ///
    /// Used to place a new client somewhere visible before its first move.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: f64::from(rng.gen_range(0..SEED_EXTENT)),
            y: f64::from(rng.gen_range(0..SEED_EXTENT)),
        }
    }
}
