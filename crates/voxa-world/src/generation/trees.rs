use rand::Rng;
use voxa_blocks::BlockType;
use voxa_geom::IVec3;

use super::ChunkWriter;
use super::surface::surface_block;
use crate::worldgen::TreeParams;

/// Rolls for a tree on a grass column and writes trunk and crown.
///
/// Only eligible columns consume random draws, so the draw sequence depends on terrain.
pub(super) fn grow_tree<R: Rng>(
    out: &mut ChunkWriter,
    params: &TreeParams,
    x: i32,
    z: i32,
    height: i32,
    rng: &mut R,
) {
    if height <= 2 || surface_block(height) != BlockType::Grass {
        return;
    }
    if !rng.gen_bool(params.probability) {
        return;
    }
    let trunk = rng.gen_range(params.trunk_min..=params.trunk_max);
    let surface_y = height - 1;
    for t in 1..=trunk {
        out.push(IVec3::new(x, surface_y + t, z), BlockType::Wood);
    }

    let crown_y = surface_y + trunk;
    let r = params.crown_radius;
    for dx in -r..=r {
        for dz in -r..=r {
            if dx.abs() + dz.abs() > params.crown_reach {
                continue;
            }
            if dx == 0 && dz == 0 {
                continue;
            }
            out.push(IVec3::new(x + dx, crown_y, z + dz), BlockType::Leaves);
        }
    }
}
