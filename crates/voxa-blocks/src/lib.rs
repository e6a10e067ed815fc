//! Block records and the closed set of block types.
#![forbid(unsafe_code)]

pub mod types;

pub use types::{Block, BlockId, BlockType, HOTBAR, UnknownBlockType};
