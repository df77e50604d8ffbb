use std::path::Path;

use foundation::Aabb3;
use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

pub mod search;

pub use search::{MatchResult, SearchEngine, SearchPolicy, SearchQuery, TileUrlBuilder};

/// On-disk catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub areaname: String,
    pub origin: Vec<f64>,
    pub modelinfo: Vec<ModelInfo>,
}

/// One tile entry of a [`CatalogFile`]. Positions are `[lat, lon, alt]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub filename: String,
    pub lowerpos: [f64; 3],
    pub upperpos: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelTile {
    pub filename: String,
    pub bounds: Aabb3,
}

/// Immutable, in-memory model catalog for one area.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub area_name: String,
    pub origin: GeoPoint,
    /// Kept in file order; search results follow it.
    pub tiles: Vec<ModelTile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Corrupt(msg) => write!(f, "catalog corrupt: {msg}"),
            CatalogError::Io(msg) => write!(f, "catalog read error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl Catalog {
    pub fn from_file_format(file: CatalogFile) -> Result<Self, CatalogError> {
        let origin = match file.origin.as_slice() {
            [lat, lon] => GeoPoint::new(*lat, *lon, 0.0),
            [lat, lon, alt] => GeoPoint::new(*lat, *lon, *alt),
            other => {
                return Err(CatalogError::Corrupt(format!(
                    "origin must have 2 or 3 components, got {}",
                    other.len()
                )));
            }
        };

        let tiles = file
            .modelinfo
            .into_iter()
            .map(|info| ModelTile {
                filename: info.filename,
                bounds: Aabb3::new(info.lowerpos, info.upperpos),
            })
            .collect();

        Ok(Catalog {
            area_name: file.areaname,
            origin,
            tiles,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file = serde_json::from_str::<CatalogFile>(raw)
            .map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        Self::from_file_format(file)
    }

    /// Read and parse a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "areaname": "sapporo",
        "origin": [43.0621, 141.3544, 17.0],
        "modelinfo": [
            {"filename": "b.glb", "lowerpos": [43.06, 141.35, 0.0], "upperpos": [43.07, 141.36, 90.0]},
            {"filename": "a.glb", "lowerpos": [43.05, 141.34, 5.0], "upperpos": [43.06, 141.35, 60.0]}
        ]
    }"#;

    #[test]
    fn parses_document_in_file_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.area_name, "sapporo");
        assert_eq!(catalog.origin, GeoPoint::new(43.0621, 141.3544, 17.0));
        let names: Vec<&str> = catalog.tiles.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(names, vec!["b.glb", "a.glb"]);
        assert_eq!(
            catalog.tiles[1].bounds,
            Aabb3::new([43.05, 141.34, 5.0], [43.06, 141.35, 60.0])
        );
    }

    #[test]
    fn two_component_origin_defaults_altitude() {
        let catalog = Catalog::from_file_format(CatalogFile {
            areaname: "x".to_string(),
            origin: vec![1.0, 2.0],
            modelinfo: Vec::new(),
        })
        .unwrap();
        assert_eq!(catalog.origin, GeoPoint::new(1.0, 2.0, 0.0));
        assert!(catalog.is_empty());
    }

    #[test]
    fn bad_origin_is_corrupt() {
        let err = Catalog::from_file_format(CatalogFile {
            areaname: "x".to_string(),
            origin: vec![1.0],
            modelinfo: Vec::new(),
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt(_)));
    }

    #[test]
    fn short_position_is_corrupt() {
        let raw = r#"{"areaname":"x","origin":[0,0],"modelinfo":[
            {"filename":"t.glb","lowerpos":[0,0],"upperpos":[1,1,1]}]}"#;
        assert!(matches!(
            Catalog::from_json_str(raw),
            Err(CatalogError::Corrupt(_))
        ));
    }

    #[test]
    fn inverted_bounds_are_kept() {
        let raw = r#"{"areaname":"x","origin":[0,0,0],"modelinfo":[
            {"filename":"t.glb","lowerpos":[1,1,1],"upperpos":[0,0,0]}]}"#;
        let catalog = Catalog::from_json_str(raw).unwrap();
        assert_eq!(catalog.tiles[0].bounds.min, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(err.to_string().starts_with("catalog read error"));
    }

    #[test]
    fn malformed_json_is_corrupt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"areaname\": ").unwrap();
        assert!(matches!(
            Catalog::load(file.path()),
            Err(CatalogError::Corrupt(_))
        ));
    }
}
