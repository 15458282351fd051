//! Terrain height field loader.

use std::path::Path;

use battle_core::HeightMap;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Height field as written in RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainSpec {
    /// Edge length of the terrain in world units.
    pub size: f32,
    /// Samples per edge.
    pub resolution: usize,
    /// `resolution * resolution` heights, row-major along x.
    pub samples: Vec<f32>,
}

/// Loader for terrain height fields from RON files.
pub struct TerrainLoader;

impl TerrainLoader {
    pub fn load(path: &Path) -> LoadResult<HeightMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HeightMap> {
        let spec: TerrainSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain RON: {}", e))?;

        let expected = spec.resolution * spec.resolution;
        let found = spec.samples.len();
        HeightMap::new(spec.size, spec.resolution, spec.samples).ok_or_else(|| {
            anyhow::anyhow!(
                "terrain needs {} samples for resolution {}, found {}",
                expected,
                spec.resolution,
                found
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::TerrainSampler;

    #[test]
    fn builds_height_map() {
        let map = TerrainLoader::parse("(size: 400.0, resolution: 2, samples: [0.0, 1.0, 2.0, 3.0])")
            .unwrap();

        assert_eq!(map.size(), 400.0);
        assert_eq!(map.height_at(400.0, 400.0), 3.0);
    }

    #[test]
    fn rejects_short_sample_list() {
        let err = TerrainLoader::parse("(size: 400.0, resolution: 2, samples: [0.0])").unwrap_err();
        assert!(err.to_string().contains("needs 4 samples"));
    }
}
