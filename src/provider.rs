use bevy_ecs::prelude::Resource;

use crate::catalog::PieceKind;
use crate::components::SpriteId;

/// Source of new pieces for a session.
pub trait PieceProvider: Send + Sync {
    fn next_kind(&mut self) -> PieceKind;
    fn next_sprite(&mut self) -> SpriteId;
}

/// Uniform random kinds, with colours drawn independently of the kind.
#[derive(Debug, Default)]
pub struct RandomPieces;

impl PieceProvider for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::random()
    }

    fn next_sprite(&mut self) -> SpriteId {
        SpriteId::random()
    }
}

/// Replays fixed lists of kinds and sprites, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    sprites: Vec<SpriteId>,
    kind_index: usize,
    sprite_index: usize,
}

impl SequencePieces {
    /// # Panics
    ///
    /// Panics if either list is empty.
    #[must_use]
    pub fn new(kinds: Vec<PieceKind>, sprites: Vec<SpriteId>) -> Self {
        assert!(!kinds.is_empty(), "piece sequence needs at least one kind");
        assert!(!sprites.is_empty(), "piece sequence needs at least one sprite");
        Self {
            kinds,
            sprites,
            kind_index: 0,
            sprite_index: 0,
        }
    }

    /// Every piece is `kind`, coloured `sprite`.
    #[must_use]
    pub fn repeat(kind: PieceKind, sprite: SpriteId) -> Self {
        Self::new(vec![kind], vec![sprite])
    }
}

impl PieceProvider for SequencePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.kind_index % self.kinds.len()];
        self.kind_index += 1;
        kind
    }

    fn next_sprite(&mut self) -> SpriteId {
        let sprite = self.sprites[self.sprite_index % self.sprites.len()];
        self.sprite_index += 1;
        sprite
    }
}

#[derive(Resource)]
pub struct PieceSource(pub Box<dyn PieceProvider>);

impl PieceSource {
    pub fn new(provider: impl PieceProvider + 'static) -> Self {
        Self(Box::new(provider))
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(RandomPieces)
    }
}
