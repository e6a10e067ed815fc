use proptest::prelude::*;
use voxa_blocks::BlockType;
use voxa_geom::{IVec3, Vec3};
use voxa_query::{BatchKey, HitTarget, SpatialIndex, pick};
use voxa_store::WorldStore;
use voxa_world::WorldGenParams;

fn world() -> WorldStore {
    let mut store = WorldStore::new(WorldGenParams::flat(2));
    store.add_block(Vec3::new(4.0, 2.5, 4.0), BlockType::Wood);
    store.add_block(Vec3::new(5.0, 2.5, 4.0), BlockType::Leaves);
    store.add_block(Vec3::new(6.0, 0.5, 6.0), BlockType::Grass);
    store
}

#[test]
fn every_instance_resolves_to_the_block_built_into_it() {
    let store = world();
    let mut index = SpatialIndex::new();
    assert!(index.refresh(&store));
    let mut seen = 0;
    for batch in index.batches() {
        for (i, pos) in batch.positions.iter().enumerate() {
            let id = index
                .resolve(HitTarget::Instance {
                    batch: batch.key,
                    index: i,
                })
                .unwrap();
            let block = store.get(id).unwrap();
            assert_eq!(block.position, *pos);
            assert_eq!(BatchKey::of(block), batch.key);
            seen += 1;
        }
    }
    assert_eq!(seen, store.len());
}

#[test]
fn refresh_only_rebuilds_after_mutation() {
    let mut store = world();
    let mut index = SpatialIndex::new();
    assert!(index.refresh(&store));
    assert!(!index.refresh(&store));
    let id = store.add_block(Vec3::new(1.0, 2.5, 1.0), BlockType::Sand);
    assert!(index.refresh(&store));
    assert_eq!(index.rebuilds(), 2);
    let sand = index.batch(BatchKey::Type(BlockType::Sand)).unwrap();
    assert_eq!(sand.ids, vec![id]);
}

#[test]
fn looking_down_picks_the_top_block_and_its_face() {
    let store = world();
    let mut index = SpatialIndex::new();
    index.refresh(&store);
    let hit = pick(&index, Vec3::new(4.2, 8.0, 3.9), Vec3::new(0.0, -1.0, 0.0), 20.0).unwrap();
    assert_eq!(hit.cell, IVec3::new(4, 2, 4));
    assert_eq!(hit.normal, IVec3::new(0, 1, 0));
    let id = index.resolve(hit.target).unwrap();
    assert_eq!(store.get(id).map(|b| b.kind), Some(BlockType::Wood));
}

#[test]
fn layer_zero_grass_is_picked_from_the_ground_batch() {
    let mut store = WorldStore::new(WorldGenParams::flat(0));
    let id = store.add_block(Vec3::new(6.0, 0.5, 6.0), BlockType::Grass);
    let mut index = SpatialIndex::new();
    index.refresh(&store);
    let hit = pick(&index, Vec3::new(6.0, 3.0, 6.0), Vec3::new(0.0, -1.0, 0.0), 10.0).unwrap();
    assert!(matches!(
        hit.target,
        HitTarget::Instance {
            batch: BatchKey::Ground,
            ..
        }
    ));
    assert_eq!(index.resolve(hit.target), Some(id));
}

#[test]
fn ray_into_empty_sky_misses() {
    let store = world();
    let mut index = SpatialIndex::new();
    index.refresh(&store);
    assert!(pick(&index, Vec3::new(0.0, 8.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 50.0).is_none());
    assert!(pick(&index, Vec3::new(0.0, 8.0, 0.0), Vec3::ZERO, 50.0).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    #[test]
    fn straight_down_hits_flat_floor_top(x in -7i32..=7, z in -7i32..=7, fx in -0.45f32..0.45, fz in -0.45f32..0.45) {
        let store = WorldStore::new(WorldGenParams::flat(2));
        let mut index = SpatialIndex::new();
        index.refresh(&store);
        let origin = Vec3::new(x as f32 + fx, 10.0, z as f32 + fz);
        let hit = pick(&index, origin, Vec3::new(0.0, -1.0, 0.0), 32.0).unwrap();
        prop_assert_eq!(hit.cell, IVec3::new(x, 1, z));
        prop_assert_eq!(hit.normal, IVec3::new(0, 1, 0));
        prop_assert!((hit.distance - 8.0).abs() < 1e-4);
    }
}
