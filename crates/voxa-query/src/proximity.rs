use voxa_blocks::{Block, BlockId, BlockType};
use voxa_geom::{Aabb, Vec3};

/// Blocks within `radius` of `reference` in the x/z plane. Negative radius matches nothing.
pub fn nearby(blocks: &[Block], reference: Vec3, radius: f32) -> impl Iterator<Item = &Block> {
    let r2 = radius * radius;
    let active = radius >= 0.0;
    blocks
        .iter()
        .filter(move |b| active && b.position.horizontal_distance_sq(reference) <= r2)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhysicsOptions {
    /// Leave out layer 0 for hosts that supply their own infinite ground plane.
    pub skip_ground_layer: bool,
}

/// Static collider for one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsBody {
    pub id: BlockId,
    pub kind: BlockType,
    pub aabb: Aabb,
}

/// Colliders near `reference`. Non-solid types are never included.
pub fn physics_bodies(
    blocks: &[Block],
    reference: Vec3,
    radius: f32,
    opts: PhysicsOptions,
) -> Vec<PhysicsBody> {
    nearby(blocks, reference, radius)
        .filter(|b| b.kind.is_solid())
        .filter(|b| !(opts.skip_ground_layer && b.cell().y == 0))
        .map(|b| PhysicsBody {
            id: b.id,
            kind: b.kind,
            aabb: b.aabb(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxa_geom::IVec3;

    fn row() -> Vec<Block> {
        vec![
            Block::at_cell(IVec3::new(0, 0, 0), BlockType::Bedrock),
            Block::at_cell(IVec3::new(0, 1, 0), BlockType::Water),
            Block::at_cell(IVec3::new(0, 2, 0), BlockType::Leaves),
            Block::at_cell(IVec3::new(3, 1, 4), BlockType::Stone),
            Block::at_cell(IVec3::new(6, 1, 0), BlockType::Stone),
            Block::at_cell(IVec3::new(7, 1, 0), BlockType::Stone),
        ]
    }

    #[test]
    fn radius_is_inclusive_and_ignores_height() {
        let blocks = row();
        let got: Vec<_> = nearby(&blocks, Vec3::new(0.0, 90.0, 0.0), 6.0)
            .map(|b| b.cell())
            .collect();
        assert_eq!(got.len(), 5);
        assert!(got.contains(&IVec3::new(6, 1, 0)));
        assert!(!got.contains(&IVec3::new(7, 1, 0)));
    }

    #[test]
    fn zero_and_negative_radius() {
        let blocks = row();
        assert_eq!(nearby(&blocks, Vec3::new(0.0, 0.0, 0.0), 0.0).count(), 3);
        assert_eq!(nearby(&blocks, Vec3::new(0.0, 0.0, 0.0), -1.0).count(), 0);
    }

    #[test]
    fn physics_skips_fluids_foliage_and_optionally_ground() {
        let blocks = row();
        let all = physics_bodies(&blocks, Vec3::ZERO, 6.0, PhysicsOptions::default());
        let kinds: Vec<_> = all.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockType::Bedrock, BlockType::Stone, BlockType::Stone]);

        let opts = PhysicsOptions {
            skip_ground_layer: true,
        };
        let raised = physics_bodies(&blocks, Vec3::ZERO, 6.0, opts);
        assert_eq!(raised.len(), 2);
        assert_eq!(raised[0].aabb, Aabb::unit_at(Vec3::new(3.0, 1.5, 4.0)));
    }
}
