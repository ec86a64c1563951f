//! Vertex-set JSON assets
//!
//! An asset is an array of polygons, each an array of `{"x", "y"}` points:
//!
//! ```json
//! [[{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 10}]]
//! ```

use std::fs;
use std::path::Path;

use crate::AssetError;
use snowglobe_math::VertexSet;

/// Parse vertex sets from JSON text
pub fn parse_vertex_sets(json: &str) -> Result<Vec<VertexSet>, AssetError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize vertex sets to JSON text
pub fn to_json(sets: &[VertexSet]) -> Result<String, AssetError> {
    Ok(serde_json::to_string(sets)?)
}

/// Load vertex sets from a JSON file
///
/// Fails with [`AssetError::Empty`] when the file holds no polygon with at
/// least three points, since such an asset cannot form a body.
pub fn load_vertex_sets<P: AsRef<Path>>(path: P) -> Result<Vec<VertexSet>, AssetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let sets = parse_vertex_sets(&contents)?;

    if !sets.iter().any(|set| set.len() >= 3) {
        return Err(AssetError::Empty(path.display().to_string()));
    }

    log::debug!("Loaded {} vertex sets from {}", sets.len(), path.display());
    Ok(sets)
}

/// Save vertex sets to a JSON file
pub fn save_vertex_sets<P: AsRef<Path>>(path: P, sets: &[VertexSet]) -> Result<(), AssetError> {
    fs::write(path, to_json(sets)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowglobe_math::Vec2;

    #[test]
    fn test_parse_vertex_sets() {
        let json = r#"[[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10}],[{"x":1.5,"y":-2}]]"#;
        let sets = parse_vertex_sets(json).unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0][1], Vec2::new(10.0, 0.0));
        assert_eq!(sets[1][0], Vec2::new(1.5, -2.0));
    }

    #[test]
    fn test_to_json_uses_xy_objects() {
        let sets = vec![vec![Vec2::new(1.0, 2.0)]];
        let json = to_json(&sets).unwrap();
        assert_eq!(json, r#"[[{"x":1.0,"y":2.0}]]"#);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            parse_vertex_sets(r#"[{"x":0,"y":0}]"#),
            Err(AssetError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_vertex_sets("does/not/exist.json");
        assert!(matches!(result, Err(AssetError::Io(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("snowglobe_asset_{}.json", std::process::id()));
        let sets = vec![vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 3.0),
        ]];

        save_vertex_sets(&path, &sets).unwrap();
        let loaded = load_vertex_sets(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, sets);
    }

    #[test]
    fn test_load_degenerate_asset() {
        let path = std::env::temp_dir().join(format!("snowglobe_empty_{}.json", std::process::id()));
        std::fs::write(&path, r#"[[{"x":0,"y":0}]]"#).unwrap();
        let result = load_vertex_sets(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AssetError::Empty(_))));
    }
}
