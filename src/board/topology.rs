//! Layers, positions and movement.
//!
//! Every layer is walked forward with modular wrap-around; wrapping past the
//! last index completes a lap. The inner layer adds one rule on top: a move
//! that ends exactly on `BRANCH_INDEX` offers an exit to the middle layer.
//! Passing over the branch square offers nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameError, Result};

/// Squares on the inner layer.
pub const INNER_LEN: usize = 10;
/// Squares on the middle layer.
pub const MIDDLE_LEN: usize = 24;
/// Squares on the outer layer.
pub const OUTER_LEN: usize = 32;
/// Inner-layer index of the branch square.
pub const BRANCH_INDEX: usize = 5;

/// One of the three concentric rings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Inner,
    Middle,
    Outer,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Inner, Layer::Middle, Layer::Outer];

    /// Required number of squares.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Layer::Inner => INNER_LEN,
            Layer::Middle => MIDDLE_LEN,
            Layer::Outer => OUTER_LEN,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Layer::Inner => 0,
            Layer::Middle => 1,
            Layer::Outer => 2,
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layer::Inner => "inner",
            Layer::Middle => "middle",
            Layer::Outer => "outer",
        };
        f.write_str(name)
    }
}

/// A square address: layer plus index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardPosition {
    pub layer: Layer,
    pub index: usize,
}

impl BoardPosition {
    #[must_use]
    pub const fn new(layer: Layer, index: usize) -> Self {
        Self { layer, index }
    }

    /// Whether `index` exists on the layer.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index < self.layer.len()
    }
}

impl Default for BoardPosition {
    fn default() -> Self {
        Self::new(Layer::Middle, 0)
    }
}

impl std::fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.layer, self.index)
    }
}

/// Result of walking `steps` squares along one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub layer: Layer,
    pub from: usize,
    pub to: usize,
    pub steps: u32,
    /// Times the walk wrapped past the last index.
    pub laps: u32,
    /// The move ended exactly on the inner branch square.
    pub branch_available: bool,
}

impl Movement {
    #[must_use]
    pub fn destination(&self) -> BoardPosition {
        BoardPosition::new(self.layer, self.to)
    }
}

/// Walk `steps` squares forward from `current` on `layer`.
///
/// `current` must be a valid index on the layer.
pub fn compute_next_position(layer: Layer, current: usize, steps: u32) -> Result<Movement> {
    let len = layer.len();
    if current >= len {
        return Err(GameError::input(format!(
            "position {current} is off the {layer} layer ({len} squares)"
        )));
    }

    let total = current + steps as usize;
    let to = total % len;
    let laps = (total / len) as u32;
    let branch_available = layer == Layer::Inner && to == BRANCH_INDEX && steps > 0;

    Ok(Movement {
        layer,
        from: current,
        to,
        steps,
        laps,
        branch_available,
    })
}

/// A planned move: the walk plus every square the player comes to rest on.
///
/// `stops[0]` is the landing square. A layer-transition square adds the
/// relocation target as a second stop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePath {
    pub movement: Movement,
    pub stops: SmallVec<[BoardPosition; 2]>,
}

impl MovePath {
    /// Where the player ends the move.
    #[must_use]
    pub fn final_position(&self) -> BoardPosition {
        self.stops
            .last()
            .copied()
            .unwrap_or_else(|| self.movement.destination())
    }

    /// Whether a transition square relocated the player.
    #[must_use]
    pub fn transitioned(&self) -> bool {
        self.stops.len() > 1
    }
}
