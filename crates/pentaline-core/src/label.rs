//! Label variants and the factory that issues them.
//!
//! A label is the placeable game piece. Its logical owner (who it scores
//! for) and its displayed symbol are independent:
//! - `Normal`: owned by the holder, shows the owner's mark
//! - `Delegated`: owned by the pre-selected opponent of the placer
//! - `Hidden`: owned by the holder, but displays a fixed mask
//!
//! On top of the concrete variants, a label can carry a *secret* face that
//! disguises which variant is in play until the moment of placement. The
//! face is a closed two-state enum, so a secret label always wraps exactly
//! one concrete variant and can never wrap another secret.

use crate::field::Position;
use crate::game::GameError;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Symbol shown for a hidden label, never revealing its owner.
pub const HIDDEN_MASK: &str = "?";

/// Symbol shown for any secret-faced label before it is revealed.
pub const SECRET_MASK: &str = "*";

/// The selectable label kinds. Secrecy is a separate mode, not a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelKind {
    /// Scores for the player placing it
    #[default]
    Normal,
    /// Scores for the opponent of the player placing it
    Delegated,
    /// Scores for the placer, but the board shows only a mask
    Hidden,
}

/// A concrete, non-secret label variant.
///
/// `mark` is the owner's display name, stamped by the factory at creation
/// so a label can render its symbol without a player lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelVariant {
    Normal { owner: PlayerId, mark: String },
    Delegated { owner: PlayerId, mark: String },
    Hidden { owner: PlayerId },
}

impl LabelVariant {
    /// The player this variant scores for.
    pub fn owner(&self) -> PlayerId {
        match self {
            LabelVariant::Normal { owner, .. }
            | LabelVariant::Delegated { owner, .. }
            | LabelVariant::Hidden { owner } => *owner,
        }
    }

    /// The kind tag of this variant.
    pub fn kind(&self) -> LabelKind {
        match self {
            LabelVariant::Normal { .. } => LabelKind::Normal,
            LabelVariant::Delegated { .. } => LabelKind::Delegated,
            LabelVariant::Hidden { .. } => LabelKind::Hidden,
        }
    }

    /// The symbol this variant displays once open.
    pub fn symbol(&self) -> &str {
        match self {
            LabelVariant::Normal { mark, .. } | LabelVariant::Delegated { mark, .. } => mark,
            LabelVariant::Hidden { .. } => HIDDEN_MASK,
        }
    }
}

/// Whether the wrapped variant is visible or still disguised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelFace {
    /// The variant is in plain view
    Open(LabelVariant),
    /// The variant is disguised until revealed at placement
    Secret(LabelVariant),
}

/// A placeable game piece.
///
/// `cell` is the back-link half of the Cell <-> Label relation; it is only
/// written by [`Cell::place_label`](crate::field::Cell::place_label) and
/// [`Cell::remove_label`](crate::field::Cell::remove_label). `placed_by`
/// records who issued the placement, which differs from the owner for
/// delegated labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    face: LabelFace,
    cell: Option<Position>,
    placed_by: Option<PlayerId>,
}

impl Label {
    /// Create an open label from a concrete variant.
    pub fn open(variant: LabelVariant) -> Self {
        Self {
            face: LabelFace::Open(variant),
            cell: None,
            placed_by: None,
        }
    }

    /// Create a secret-faced label wrapping a concrete variant.
    pub fn secret(variant: LabelVariant) -> Self {
        Self {
            face: LabelFace::Secret(variant),
            cell: None,
            placed_by: None,
        }
    }

    /// The player this label scores for. Secrecy never changes ownership.
    pub fn owner(&self) -> PlayerId {
        match &self.face {
            LabelFace::Open(v) | LabelFace::Secret(v) => v.owner(),
        }
    }

    /// The symbol currently displayed for this label.
    pub fn symbol(&self) -> &str {
        match &self.face {
            LabelFace::Open(v) => v.symbol(),
            LabelFace::Secret(_) => SECRET_MASK,
        }
    }

    /// The kind of the underlying variant, looking through a secret face.
    pub fn kind(&self) -> LabelKind {
        match &self.face {
            LabelFace::Open(v) | LabelFace::Secret(v) => v.kind(),
        }
    }

    /// Whether this label still wears a secret face.
    pub fn is_secret(&self) -> bool {
        matches!(self.face, LabelFace::Secret(_))
    }

    /// Position of the cell this label occupies, if placed.
    pub fn cell(&self) -> Option<Position> {
        self.cell
    }

    /// The player who issued the placement, once placed.
    pub fn placed_by(&self) -> Option<PlayerId> {
        self.placed_by
    }

    /// Strip the secret face, exposing the wrapped variant.
    ///
    /// Called exactly once, at placement time; the revealed label is what
    /// ends up in the cell. An already-open label passes through unchanged.
    pub fn reveal(mut self) -> Self {
        if let LabelFace::Secret(v) = self.face {
            self.face = LabelFace::Open(v);
        }
        self
    }

    pub(crate) fn bind_cell(&mut self, pos: Position) {
        self.cell = Some(pos);
    }

    pub(crate) fn unbind_cell(&mut self) {
        self.cell = None;
    }

    pub(crate) fn stamp_placed_by(&mut self, player: PlayerId) {
        self.placed_by = Some(player);
    }
}

/// Constructs the correct label variant for a requesting player, their
/// opponent, and a requested kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFactory;

impl LabelFactory {
    /// Build a label of `kind` owned directly by `owner`.
    pub fn create(&self, owner: &Player, kind: LabelKind) -> Label {
        Label::open(Self::variant_owned_by(owner, kind))
    }

    /// Build a label for the current mover.
    ///
    /// `Delegated` produces a label owned by `opponent`; every other kind
    /// is owned by `current`. Fails if a delegated label is requested
    /// without a distinct opponent.
    pub fn create_for(
        &self,
        current: &Player,
        opponent: &Player,
        kind: LabelKind,
    ) -> Result<Label, GameError> {
        Ok(Label::open(Self::variant_for(current, opponent, kind)?))
    }

    /// Build the same label as [`create_for`](Self::create_for), wrapped
    /// in a secret face.
    pub fn create_secret(
        &self,
        current: &Player,
        opponent: &Player,
        kind: LabelKind,
    ) -> Result<Label, GameError> {
        Ok(Label::secret(Self::variant_for(current, opponent, kind)?))
    }

    fn variant_for(
        current: &Player,
        opponent: &Player,
        kind: LabelKind,
    ) -> Result<LabelVariant, GameError> {
        if kind == LabelKind::Delegated {
            if opponent.id() == current.id() {
                return Err(GameError::InvalidArgument(
                    "delegated label requires a distinct opponent".into(),
                ));
            }
            return Ok(Self::variant_owned_by(opponent, LabelKind::Delegated));
        }
        Ok(Self::variant_owned_by(current, kind))
    }

    fn variant_owned_by(owner: &Player, kind: LabelKind) -> LabelVariant {
        match kind {
            LabelKind::Normal => LabelVariant::Normal {
                owner: owner.id(),
                mark: owner.name().to_string(),
            },
            LabelKind::Delegated => LabelVariant::Delegated {
                owner: owner.id(),
                mark: owner.name().to_string(),
            },
            LabelKind::Hidden => LabelVariant::Hidden { owner: owner.id() },
        }
    }
}
