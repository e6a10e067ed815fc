use hashbrown::HashMap;
use voxa_blocks::Block;

/// Dense grid of column surface heights over the x/z extent of a block set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Heightfield {
    pub min_x: i32,
    pub min_z: i32,
    pub width: usize,
    pub depth: usize,
    /// Row-major by z; `heights[(z - min_z) * width + (x - min_x)]`.
    pub heights: Vec<f32>,
}

impl Heightfield {
    /// Top block center minus half a block per column; 0 where a column is empty.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let Some(first) = blocks.first() else {
            return Self::default();
        };
        let c0 = first.cell();
        let (mut min_x, mut max_x, mut min_z, mut max_z) = (c0.x, c0.x, c0.z, c0.z);
        let mut tops: HashMap<(i32, i32), f32> = HashMap::new();
        for b in blocks {
            let c = b.cell();
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_z = min_z.min(c.z);
            max_z = max_z.max(c.z);
            let top = tops.entry((c.x, c.z)).or_insert(f32::NEG_INFINITY);
            if b.position.y > *top {
                *top = b.position.y;
            }
        }
        let width = (max_x - min_x + 1) as usize;
        let depth = (max_z - min_z + 1) as usize;
        let mut heights = vec![0.0; width * depth];
        for ((x, z), y) in tops {
            heights[(z - min_z) as usize * width + (x - min_x) as usize] = y - 0.5;
        }
        Self {
            min_x,
            min_z,
            width,
            depth,
            heights,
        }
    }

    pub fn get(&self, x: i32, z: i32) -> Option<f32> {
        let lx = usize::try_from(x - self.min_x).ok()?;
        let lz = usize::try_from(z - self.min_z).ok()?;
        if lx >= self.width || lz >= self.depth {
            return None;
        }
        self.heights.get(lz * self.width + lx).copied()
    }
}

/// Center height of the highest block in column `(x, z)`.
pub fn column_top(blocks: &[Block], x: i32, z: i32) -> Option<f32> {
    blocks
        .iter()
        .filter(|b| {
            let c = b.cell();
            c.x == x && c.z == z
        })
        .map(|b| b.position.y)
        .reduce(f32::max)
}

/// Resting height for a body of `radius` dropped onto column `(x, z)`.
pub fn spawn_height(blocks: &[Block], x: i32, z: i32, radius: f32) -> f32 {
    let top = column_top(blocks, x, z).map_or(radius, |y| (y + radius).max(radius));
    top + radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxa_blocks::BlockType;
    use voxa_geom::IVec3;

    fn blocks() -> Vec<Block> {
        vec![
            Block::at_cell(IVec3::new(0, 0, 0), BlockType::Bedrock),
            Block::at_cell(IVec3::new(0, 1, 0), BlockType::Dirt),
            Block::at_cell(IVec3::new(0, 2, 0), BlockType::Grass),
            Block::at_cell(IVec3::new(2, 0, 1), BlockType::Bedrock),
        ]
    }

    #[test]
    fn heightfield_covers_extent_with_zero_gaps() {
        let hf = Heightfield::from_blocks(&blocks());
        assert_eq!((hf.min_x, hf.min_z, hf.width, hf.depth), (0, 0, 3, 2));
        assert_eq!(hf.get(0, 0), Some(2.0));
        assert_eq!(hf.get(2, 1), Some(0.0));
        assert_eq!(hf.get(1, 0), Some(0.0));
        assert_eq!(hf.get(3, 0), None);
        assert_eq!(hf.get(-1, 0), None);
    }

    #[test]
    fn empty_blocks_give_empty_heightfield() {
        let hf = Heightfield::from_blocks(&[]);
        assert_eq!(hf.width, 0);
        assert!(hf.heights.is_empty());
    }

    #[test]
    fn spawn_sits_above_column_top() {
        let b = blocks();
        assert_eq!(column_top(&b, 0, 0), Some(2.5));
        assert_eq!(spawn_height(&b, 0, 0, 0.5), 3.5);
        assert_eq!(column_top(&b, 5, 5), None);
        assert_eq!(spawn_height(&b, 5, 5, 0.5), 1.0);
    }
}
