/// Height queries against the host's terrain.
pub trait TerrainSampler: Send + Sync {
    /// Terrain height at world coordinates `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Edge length of the (square) terrain in world units.
    fn size(&self) -> f32;
}

/// Terrain with the same height everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatTerrain {
    pub size: f32,
    pub height: f32,
}

impl FlatTerrain {
    pub const fn new(size: f32, height: f32) -> Self {
        Self { size, height }
    }
}

impl TerrainSampler for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn size(&self) -> f32 {
        self.size
    }
}

/// Square height field sampled at regular intervals.
///
/// `samples` is row-major along x: index `ix * resolution + iz`. Lookups use
/// the nearest sample, clamped to the edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightMap {
    size: f32,
    resolution: usize,
    samples: Vec<f32>,
}

impl HeightMap {
    /// Builds a height map, or `None` if `samples` is not `resolution²` long.
    pub fn new(size: f32, resolution: usize, samples: Vec<f32>) -> Option<Self> {
        if resolution == 0 || samples.len() != resolution * resolution {
            return None;
        }
        Some(Self {
            size,
            resolution,
            samples,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    fn index_for(&self, coord: f32) -> usize {
        if self.resolution == 1 || self.size <= 0.0 {
            return 0;
        }
        let step = self.size / (self.resolution - 1) as f32;
        let raw = (coord / step).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.resolution - 1)
        }
    }
}

impl TerrainSampler for HeightMap {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let ix = self.index_for(x);
        let iz = self.index_for(z);
        self.samples
            .get(ix * self.resolution + iz)
            .copied()
            .unwrap_or_default()
    }

    fn size(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_map_uses_nearest_sample() {
        // 3x3 samples over 100 units: samples at 0, 50, 100.
        let map = HeightMap::new(100.0, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])
            .expect("valid height map");

        assert_eq!(map.height_at(0.0, 0.0), 0.0);
        assert_eq!(map.height_at(0.0, 60.0), 1.0);
        assert_eq!(map.height_at(49.0, 99.0), 5.0);
        assert_eq!(map.height_at(500.0, -20.0), 6.0, "clamped to the edge");
    }

    #[test]
    fn height_map_rejects_wrong_sample_count() {
        assert!(HeightMap::new(10.0, 2, vec![0.0; 3]).is_none());
        assert!(HeightMap::new(10.0, 0, Vec::new()).is_none());
    }
}
