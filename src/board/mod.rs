//! Board topology: three concentric layers of typed squares.
//!
//! ## Key Types
//!
//! - `Layer`, `BoardPosition`: addressing
//! - `Square`, `SquareKind`, `SquareType`: static square data
//! - `BoardLayout`: unvalidated configuration
//! - `Board`: validated, read-only board shared by all players
//!
//! Moves are planned with `Board::plan_move`, which resolves a landing on a
//! transition square into a relocation before any landing effect runs.

pub mod square;
pub mod topology;

pub use square::{Square, SquareKind, SquareType};
pub use topology::{
    compute_next_position, BoardPosition, Layer, MovePath, Movement, BRANCH_INDEX, INNER_LEN,
    MIDDLE_LEN, OUTER_LEN,
};

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::{GameError, Result};

/// Ordered square lists, one per layer, as loaded from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub inner: Vec<Square>,
    pub middle: Vec<Square>,
    pub outer: Vec<Square>,
}

impl BoardLayout {
    #[must_use]
    pub fn squares(&self, layer: Layer) -> &[Square] {
        match layer {
            Layer::Inner => &self.inner,
            Layer::Middle => &self.middle,
            Layer::Outer => &self.outer,
        }
    }

    /// Check sizes, the branch square and every transition.
    pub fn validate(&self) -> Result<()> {
        for layer in Layer::ALL {
            let squares = self.squares(layer);
            if squares.len() != layer.len() {
                return Err(GameError::config(format!(
                    "{layer} layer needs {} squares, found {}",
                    layer.len(),
                    squares.len()
                )));
            }

            for (index, square) in squares.iter().enumerate() {
                let at = BoardPosition::new(layer, index);
                self.validate_square(at, square)?;
            }
        }
        Ok(())
    }

    fn validate_square(&self, at: BoardPosition, square: &Square) -> Result<()> {
        let is_branch_slot = at.layer == Layer::Inner && at.index == BRANCH_INDEX;
        match &square.kind {
            SquareKind::Branch if !is_branch_slot => {
                return Err(GameError::config(format!("branch square at {at}; only inner:{BRANCH_INDEX} may branch")));
            }
            SquareKind::LayerTransition { target } => {
                if at.layer == Layer::Inner {
                    return Err(GameError::config(format!("transition square at {at} on the inner layer")));
                }
                if !target.is_valid() {
                    return Err(GameError::config(format!("transition at {at} targets missing square {target}")));
                }
                let landing = self.squares(target.layer).get(target.index);
                if landing.map(Square::square_type) == Some(SquareType::LayerTransition) {
                    return Err(GameError::config(format!("transition at {at} targets another transition at {target}")));
                }
            }
            SquareKind::Doodad { min, max, .. } if *min < 0 || min > max => {
                return Err(GameError::config(format!("doodad at {at} has bad range {min}..={max}")));
            }
            SquareKind::Paycheck { bonus } if *bonus < 0 => {
                return Err(GameError::config(format!("paycheck at {at} has negative bonus")));
            }
            SquareKind::Charity { base_amount: Some(base) } if *base < 0 => {
                return Err(GameError::config(format!("charity at {at} has negative base amount")));
            }
            _ => {}
        }

        if is_branch_slot && square.square_type() != SquareType::Branch {
            return Err(GameError::config(format!("inner:{BRANCH_INDEX} must be the branch square")));
        }
        Ok(())
    }
}

/// A validated board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    layout: BoardLayout,
}

impl Board {
    /// Validate a layout and freeze it.
    pub fn from_layout(layout: BoardLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self { layout })
    }

    #[must_use]
    pub fn layer(&self, layer: Layer) -> &[Square] {
        self.layout.squares(layer)
    }

    #[must_use]
    pub fn square(&self, at: BoardPosition) -> Option<&Square> {
        self.layer(at.layer).get(at.index)
    }

    /// Relocation target if `at` is a transition square.
    #[must_use]
    pub fn transition_target(&self, at: BoardPosition) -> Option<BoardPosition> {
        self.square(at).and_then(Square::transition_target)
    }

    /// Plan a move of `steps` squares from `from`.
    pub fn plan_move(&self, from: BoardPosition, steps: u32) -> Result<MovePath> {
        let movement = compute_next_position(from.layer, from.index, steps)?;
        let landing = movement.destination();
        let mut stops: smallvec::SmallVec<[BoardPosition; 2]> = smallvec![landing];
        if let Some(target) = self.transition_target(landing) {
            stops.push(target);
        }
        Ok(MovePath { movement, stops })
    }

    /// Positions of every square of one type.
    pub fn positions_of(&self, square_type: SquareType) -> impl Iterator<Item = BoardPosition> + '_ {
        Layer::ALL.into_iter().flat_map(move |layer| {
            self.layer(layer)
                .iter()
                .enumerate()
                .filter(move |(_, s)| s.square_type() == square_type)
                .map(move |(i, _)| BoardPosition::new(layer, i))
        })
    }
}
