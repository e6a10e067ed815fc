use voxa_blocks::BlockType;
use voxa_geom::IVec3;

use super::ChunkWriter;

/// Fills layers `height..sea_level` with water when the column sits below sea level.
pub(super) fn fill_water(out: &mut ChunkWriter, x: i32, z: i32, height: i32, sea_level: i32) {
    for y in height..sea_level {
        out.push(IVec3::new(x, y, z), BlockType::Water);
    }
}
