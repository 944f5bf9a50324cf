//! Snapshot codec: whole-forest persistence as a versioned TOML document
//!
//! ```toml
//! format = "forest-snapshot"
//! version = 1
//! name = "Montane"
//! saved_at = "2024-05-01T12:00:00+00:00"
//!
//! [[trees]]
//! species = "Birch"
//! year_planted = 2020
//! height = 15.0
//! growth_rate = 12.0
//! ```
//!
//! Floats are written in their shortest round-trip form, so decoding an
//! encoded forest reproduces every field exactly.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Forest, Tree};

/// Format marker written into every snapshot.
pub const SNAPSHOT_FORMAT: &str = "forest-snapshot";

/// Current snapshot layout version. Other versions are rejected.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    format: String,
    version: u32,
    name: String,
    saved_at: DateTime<Utc>,
    #[serde(default)]
    trees: Vec<Tree>,
}

/// Decoded snapshot contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub trees: Vec<Tree>,
}

/// Serialize the forest's trees.
pub fn encode(forest: &Forest, saved_at: DateTime<Utc>) -> ApplicationResult<String> {
    let doc = SnapshotDocument {
        format: SNAPSHOT_FORMAT.to_string(),
        version: SNAPSHOT_VERSION,
        name: forest.name().to_string(),
        saved_at,
        trees: forest.trees().to_vec(),
    };
    toml::to_string(&doc).map_err(|e| ApplicationError::FormatMismatch {
        path: forest.name().into(),
        message: format!("encode: {}", e),
    })
}

/// Deserialize a snapshot. `path` is only used for error messages.
pub fn decode(content: &str, path: &Path) -> ApplicationResult<Snapshot> {
    let mismatch = |message: String| ApplicationError::FormatMismatch {
        path: path.to_path_buf(),
        message,
    };

    let doc: SnapshotDocument = toml::from_str(content).map_err(|e| mismatch(e.to_string()))?;
    if doc.format != SNAPSHOT_FORMAT {
        return Err(mismatch(format!("unknown format '{}'", doc.format)));
    }
    if doc.version != SNAPSHOT_VERSION {
        return Err(mismatch(format!(
            "unsupported version {} (expected {})",
            doc.version, SNAPSHOT_VERSION
        )));
    }

    Ok(Snapshot {
        name: doc.name,
        saved_at: doc.saved_at,
        trees: doc.trees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Species;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn saved_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_encode_decode_preserves_every_field() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut forest = Forest::new("Montane");
        for _ in 0..20 {
            forest.add_random_tree(&mut rng);
        }
        forest.push(Tree::new(Species::Fir, -3, 0.0, 0.1 + 0.2));
        forest.simulate_year();

        let encoded = encode(&forest, saved_at()).unwrap();
        let snapshot = decode(&encoded, Path::new("Montane.db")).unwrap();

        assert_eq!(snapshot.name, "Montane");
        assert_eq!(snapshot.saved_at, saved_at());
        assert_eq!(snapshot.trees, forest.trees());
    }

    #[test]
    fn test_encode_empty_forest() {
        let forest = Forest::new("Bare");
        let encoded = encode(&forest, saved_at()).unwrap();
        let snapshot = decode(&encoded, Path::new("Bare.db")).unwrap();
        assert!(snapshot.trees.is_empty());
    }

    #[test]
    fn test_decode_rejects_other_version() {
        let content = r#"
format = "forest-snapshot"
version = 2
name = "Future"
saved_at = "2024-05-01T12:00:00Z"
"#;
        let err = decode(content, Path::new("Future.db")).unwrap_err();
        assert!(matches!(err, ApplicationError::FormatMismatch { .. }));
        assert!(err.to_string().contains("unsupported version 2"));
    }

    #[test]
    fn test_decode_rejects_other_format() {
        let content = r#"
format = "something-else"
version = 1
name = "Odd"
saved_at = "2024-05-01T12:00:00Z"
"#;
        let err = decode(content, Path::new("Odd.db")).unwrap_err();
        assert!(err.to_string().contains("unknown format"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("\u{0}\u{1}not toml at all", Path::new("x.db")).unwrap_err();
        assert!(matches!(err, ApplicationError::FormatMismatch { .. }));
    }

    #[test]
    fn test_decode_rejects_unknown_species() {
        let content = r#"
format = "forest-snapshot"
version = 1
name = "Oaks"
saved_at = "2024-05-01T12:00:00Z"

[[trees]]
species = "Oak"
year_planted = 2020
height = 15.0
growth_rate = 12.0
"#;
        let err = decode(content, Path::new("Oaks.db")).unwrap_err();
        assert!(matches!(err, ApplicationError::FormatMismatch { .. }));
    }
}
