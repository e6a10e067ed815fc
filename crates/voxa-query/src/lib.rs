//! Read-only views over the world store: render batches, picking, proximity, terrain.
#![forbid(unsafe_code)]

pub mod partition;
pub mod proximity;
pub mod raycast;
pub mod terrain;

pub use partition::{Batch, BatchKey, HitTarget, SpatialIndex};
pub use proximity::{PhysicsBody, PhysicsOptions, nearby, physics_bodies};
pub use raycast::{RayHit, pick};
pub use terrain::{Heightfield, column_top, spawn_height};
