use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::HeightParams;

/// Seeded 2-D coherent noise mapped onto integer column heights.
///
/// Sampling takes `&self`, so one instance can be shared across generator threads.
pub struct HeightNoise {
    noise: FastNoiseLite,
    seed: u32,
    min: i32,
    max: i32,
}

impl HeightNoise {
    pub fn new(seed: u32, params: &HeightParams) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0 / params.scale.max(f32::EPSILON)));
        Self {
            noise,
            seed,
            min: params.min,
            max: params.max.max(params.min),
        }
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw noise in roughly `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: i32, z: i32) -> f32 {
        self.noise.get_noise_2d(x as f32, z as f32)
    }

    /// Column height in `[min, max]`.
    pub fn height(&self, x: i32, z: i32) -> i32 {
        remap_noise_to_height(self.sample(x, z), self.min, self.max)
    }
}

pub(crate) fn remap_noise_to_height(noise: f32, min: i32, max: i32) -> i32 {
    let span = (max - min) as f32;
    let h = (((noise + 1.0) * 0.5) * span).round() as i32 + min;
    h.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_covers_full_range() {
        assert_eq!(remap_noise_to_height(-1.0, 1, 6), 1);
        assert_eq!(remap_noise_to_height(1.0, 1, 6), 6);
        assert_eq!(remap_noise_to_height(0.0, 1, 6), 4);
        // Slight overshoot from the noise backend still clamps.
        assert_eq!(remap_noise_to_height(1.2, 1, 6), 6);
        assert_eq!(remap_noise_to_height(-1.3, 1, 6), 1);
    }
}
