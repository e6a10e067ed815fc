use core::fmt;
use core::str::FromStr;

use serde::Deserialize;
use voxa_geom::{Aabb, IVec3, Vec3};

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Grass,
    #[default]
    Dirt,
    Stone,
    Sand,
    Water,
    Wood,
    Leaves,
    Bedrock,
}

/// Types a player can pick, in slot order. Bedrock is never placeable.
pub const HOTBAR: [BlockType; 7] = [
    BlockType::Grass,
    BlockType::Dirt,
    BlockType::Stone,
    BlockType::Sand,
    BlockType::Wood,
    BlockType::Leaves,
    BlockType::Water,
];

impl BlockType {
    pub const COUNT: usize = 8;

    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Water,
        BlockType::Wood,
        BlockType::Leaves,
        BlockType::Bedrock,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Sand => "sand",
            BlockType::Water => "water",
            BlockType::Wood => "wood",
            BlockType::Leaves => "leaves",
            BlockType::Bedrock => "bedrock",
        }
    }

    /// Whether the physics collaborator should build a collider for this type.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::Water | BlockType::Leaves)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlockType(pub String);

impl fmt::Display for UnknownBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type `{}`", self.0)
    }
}

impl std::error::Error for UnknownBlockType {}

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// Stable block identity.
///
/// Terrain blocks are keyed by their lattice cell so regenerating a column can never
/// produce a second block with the same id. Player placements get a fresh serial.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockId {
    Lattice(IVec3),
    Placed(u64),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Lattice(cell) => write!(f, "{cell}"),
            BlockId::Placed(n) => write!(f, "p{n}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub position: Vec3,
    pub kind: BlockType,
}

impl Block {
    /// Terrain block at `cell`, id derived from the cell.
    #[inline]
    pub fn at_cell(cell: IVec3, kind: BlockType) -> Self {
        Self {
            id: BlockId::Lattice(cell),
            position: cell.center(),
            kind,
        }
    }

    #[inline]
    pub fn cell(&self) -> IVec3 {
        self.position.cell()
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::unit_at(self.position)
    }
}
