use voxa_geom::{IVec3, Vec3};

use crate::partition::{HitTarget, SpatialIndex};

/// First drawn instance along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub target: HitTarget,
    pub cell: IVec3,
    /// Face of `cell` the ray entered through; zero when the ray starts inside it.
    pub normal: IVec3,
    pub distance: f32,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Walks lattice cells from `origin` along `dir` and returns the first one drawn by `index`.
///
/// Cells span `x-0.5..x+0.5` and `z-0.5..z+0.5` horizontally, so the walk runs in a
/// lattice space shifted by half a block on those axes.
pub fn pick(index: &SpatialIndex, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
    let len = (dir.x * dir.x + dir.y * dir.y + dir.z * dir.z).sqrt();
    if len < 1e-6 {
        return None;
    }
    let d = dir * (1.0 / len);
    let o = Vec3::new(origin.x + 0.5, origin.y, origin.z + 0.5);

    let mut cell = IVec3::new(o.x.floor() as i32, o.y.floor() as i32, o.z.floor() as i32);
    let step = IVec3::new(step_of(d.x), step_of(d.y), step_of(d.z));

    let inv = Vec3::new(inv_or_max(d.x), inv_or_max(d.y), inv_or_max(d.z));
    let tdx = if step.x == 0 { f32::MAX } else { inv.x };
    let tdy = if step.y == 0 { f32::MAX } else { inv.y };
    let tdz = if step.z == 0 { f32::MAX } else { inv.z };

    let first = |o: f32, s: i32, inv: f32| {
        let f = o - o.floor();
        match s {
            1 => (1.0 - f) * inv,
            -1 => f * inv,
            _ => f32::MAX,
        }
    };
    let mut tmx = first(o.x, step.x, inv.x);
    let mut tmy = first(o.y, step.y, inv.y);
    let mut tmz = first(o.z, step.z, inv.z);

    let mut normal = IVec3::default();
    let mut t = 0.0f32;
    for _ in 0..512 {
        if t > max_dist {
            break;
        }
        if let Some((batch, i)) = index.at_cell(cell) {
            return Some(RayHit {
                target: HitTarget::Instance { batch, index: i },
                cell,
                normal,
                distance: t,
            });
        }
        if tmx < tmy {
            if tmx < tmz {
                cell.x += step.x;
                t = tmx;
                tmx += tdx;
                normal = IVec3::new(-step.x, 0, 0);
            } else {
                cell.z += step.z;
                t = tmz;
                tmz += tdz;
                normal = IVec3::new(0, 0, -step.z);
            }
        } else if tmy < tmz {
            cell.y += step.y;
            t = tmy;
            tmy += tdy;
            normal = IVec3::new(0, -step.y, 0);
        } else {
            cell.z += step.z;
            t = tmz;
            tmz += tdz;
            normal = IVec3::new(0, 0, -step.z);
        }
    }
    None
}
