//! Piece catalog
//!
//! Ordered list of piece types. Order defines the merge progression: two
//! pieces of kind `i` merge into kind `i + 1`, and the last kind wraps to 0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a piece type within its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceKind(pub usize);

/// A catalog entry (immutable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceType {
    pub name: String,
    pub radius: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub points: u64,
}

impl PieceType {
    pub fn new(name: &str, radius: f32, color: u32, points: u64) -> Self {
        Self {
            name: name.to_string(),
            radius,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one piece type")]
    Empty,
    #[error("piece type `{name}` has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },
}

/// Validated, ordered piece catalog with a precomputed merge table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<PieceType>", into = "Vec<PieceType>")]
pub struct Catalog {
    pieces: Vec<PieceType>,
    next: Vec<PieceKind>,
}

impl Catalog {
    pub fn new(pieces: Vec<PieceType>) -> Result<Self, CatalogError> {
        if pieces.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(bad) = pieces
            .iter()
            .find(|p| !(p.radius.is_finite() && p.radius > 0.0))
        {
            return Err(CatalogError::InvalidRadius {
                name: bad.name.clone(),
                radius: bad.radius,
            });
        }

        Ok(Self::with_merge_table(pieces))
    }

    fn with_merge_table(pieces: Vec<PieceType>) -> Self {
        let len = pieces.len();
        let next = (0..len).map(|i| PieceKind((i + 1) % len)).collect();
        Self { pieces, next }
    }

    /// Look up a piece type. Kinds are only ever produced by this catalog.
    pub fn get(&self, kind: PieceKind) -> &PieceType {
        &self.pieces[kind.0]
    }

    /// Kind produced by merging two pieces of `kind`
    pub fn next(&self, kind: PieceKind) -> PieceKind {
        self.next[kind.0]
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, &PieceType)> {
        self.pieces.iter().enumerate().map(|(i, p)| (PieceKind(i), p))
    }

    /// Find a kind by display name
    pub fn kind_named(&self, name: &str) -> Option<PieceKind> {
        self.pieces.iter().position(|p| p.name == name).map(PieceKind)
    }
}

impl Default for Catalog {
    /// The nine-fruit progression
    fn default() -> Self {
        let pieces = vec![
            PieceType::new("blueberry", 15.0, 0x00008b, 100),
            PieceType::new("cherry", 20.0, 0xff0000, 20),
            PieceType::new("grape", 30.0, 0x800080, 30),
            PieceType::new("orange", 50.0, 0xffa500, 40),
            PieceType::new("peach", 70.0, 0xffc0cb, 50),
            PieceType::new("cantaloupe", 90.0, 0x00ff00, 60),
            PieceType::new("watermelon", 110.0, 0x008000, 70),
            PieceType::new("durian", 150.0, 0xffff00, 80),
            PieceType::new("jackfruit", 200.0, 0xffffe0, 90),
        ];
        Self::with_merge_table(pieces)
    }
}

impl TryFrom<Vec<PieceType>> for Catalog {
    type Error = CatalogError;

    fn try_from(pieces: Vec<PieceType>) -> Result<Self, Self::Error> {
        Self::new(pieces)
    }
}

impl From<Catalog> for Vec<PieceType> {
    fn from(catalog: Catalog) -> Self {
        catalog.pieces
    }
}
