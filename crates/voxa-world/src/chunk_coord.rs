use voxa_geom::{IVec3, Vec3};

use super::CHUNK_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk owning the lattice column `(x, z)`.
    #[inline]
    pub const fn of_column(x: i32, z: i32) -> Self {
        Self {
            cx: x.div_euclid(CHUNK_SIZE),
            cz: z.div_euclid(CHUNK_SIZE),
        }
    }

    #[inline]
    pub fn of_cell(cell: IVec3) -> Self {
        Self::of_column(cell.x, cell.z)
    }

    #[inline]
    pub fn of_position(p: Vec3) -> Self {
        Self::of_cell(p.cell())
    }

    /// Chunk under a free-moving point such as the player, by flooring `x / 16`.
    ///
    /// Differs from `of_position` only in the half block before a chunk's low edge.
    #[inline]
    pub fn of_point(p: Vec3) -> Self {
        Self::of_column(p.x.floor() as i32, p.z.floor() as i32)
    }

    #[inline]
    pub const fn base_x(self) -> i32 {
        self.cx * CHUNK_SIZE
    }

    #[inline]
    pub const fn base_z(self) -> i32 {
        self.cz * CHUNK_SIZE
    }

    #[inline]
    pub fn contains_cell(self, cell: IVec3) -> bool {
        Self::of_cell(cell) == self
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }

    /// Square of chunks within `radius` (Chebyshev) of `self`. Negative radius yields nothing.
    pub fn window(self, radius: i32) -> Vec<ChunkCoord> {
        if radius < 0 {
            return Vec::new();
        }
        let side = (2 * radius + 1) as usize;
        let mut out = Vec::with_capacity(side * side);
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                out.push(self.offset(dx, dz));
            }
        }
        out
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_columns_floor_into_previous_chunk() {
        assert_eq!(ChunkCoord::of_column(-1, -16), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::of_column(-17, 15), ChunkCoord::new(-2, 0));
        assert_eq!(ChunkCoord::of_column(16, 0), ChunkCoord::new(1, 0));
    }

    #[test]
    fn points_floor_while_block_positions_round() {
        let p = Vec3::new(15.6, 3.0, -0.2);
        assert_eq!(ChunkCoord::of_point(p), ChunkCoord::new(0, -1));
        assert_eq!(ChunkCoord::of_position(p), ChunkCoord::new(1, 0));
        assert_eq!(ChunkCoord::of_point(Vec3::new(16.0, 0.0, 0.0)), ChunkCoord::new(1, 0));
    }

    #[test]
    fn window_is_square_and_empty_for_negative_radius() {
        let w = ChunkCoord::new(1, 0).window(1);
        assert_eq!(w.len(), 9);
        assert!(w.iter().all(|c| c.chebyshev(ChunkCoord::new(1, 0)) <= 1));
        assert!(ChunkCoord::new(0, 0).window(-1).is_empty());
        assert_eq!(ChunkCoord::new(3, 3).window(0), vec![ChunkCoord::new(3, 3)]);
    }
}
