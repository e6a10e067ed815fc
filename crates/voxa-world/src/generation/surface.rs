use voxa_blocks::BlockType;

/// Surface layers at or below this height are beach sand.
const BEACH_MAX_HEIGHT: i32 = 2;
/// Layers within this distance of the top (surface included) are soil, not stone.
const TOPSOIL_DEPTH: i32 = 3;

/// Block type for layer `y` of a column `height` layers tall.
pub(super) fn layer_block(y: i32, height: i32) -> BlockType {
    if y == 0 {
        BlockType::Bedrock
    } else if y == height - 1 {
        surface_block(height)
    } else if y < height - TOPSOIL_DEPTH {
        BlockType::Stone
    } else {
        BlockType::Dirt
    }
}

#[inline]
pub(super) fn surface_block(height: i32) -> BlockType {
    if height <= BEACH_MAX_HEIGHT {
        BlockType::Sand
    } else {
        BlockType::Grass
    }
}
