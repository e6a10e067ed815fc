//! Minimal geometry types shared by the world crates.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Sub};

/// World-space position. Block centers sit on integer x/z and on `layer + 0.5` in y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared distance in the x/z plane; y is ignored.
    #[inline]
    pub fn horizontal_distance_sq(self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Lattice cell whose unit cube contains this point.
    ///
    /// Cubes span `x-0.5..x+0.5` horizontally but `y..y+1` vertically.
    #[inline]
    pub fn cell(self) -> IVec3 {
        IVec3::new(
            (self.x + 0.5).floor() as i32,
            self.y.floor() as i32,
            (self.z + 0.5).floor() as i32,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Integer lattice cell `(x, layer, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Block-center position of this cell.
    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32 + 0.5, self.z as f32)
    }
}

impl fmt::Display for IVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Unit cube centered on `center`.
    #[inline]
    pub fn unit_at(center: Vec3) -> Self {
        let half = Vec3::new(0.5, 0.5, 0.5);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab test. Returns the entry distance along `dir` and the entry face normal.
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3) -> Option<(f32, IVec3)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut normal = IVec3::default();
        let axes = [
            (origin.x, dir.x, self.min.x, self.max.x, IVec3::new(1, 0, 0)),
            (origin.y, dir.y, self.min.y, self.max.y, IVec3::new(0, 1, 0)),
            (origin.z, dir.z, self.min.z, self.max.z, IVec3::new(0, 0, 1)),
        ];
        for (o, d, lo, hi, axis) in axes {
            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t0, t1) = ((lo - o) * inv, (hi - o) * inv);
            let (t0, t1, sign) = if t0 <= t1 { (t0, t1, -1) } else { (t1, t0, 1) };
            if t0 > t_near {
                t_near = t0;
                normal = IVec3::new(axis.x * sign, axis.y * sign, axis.z * sign);
            }
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        if t_far < 0.0 {
            return None;
        }
        Some((t_near.max(0.0), normal))
    }
}
