//! Level content: the built-in level sequence and JSON loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{LevelRecord, LevelStatus};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level {id} has an empty title")]
    EmptyTitle { id: u32 },
}

/// The five built-in levels, in map order.
pub fn default_levels() -> Vec<LevelRecord> {
    vec![
        LevelRecord::new(1, "The Puddle", LevelStatus::Completed, 0),
        LevelRecord::new(2, "Local Pond", LevelStatus::Completed, -60),
        LevelRecord::new(3, "Rushing River", LevelStatus::Current, 60),
        LevelRecord::new(4, "Misty Lake", LevelStatus::Locked, -30),
        LevelRecord::new(5, "Deep Ocean", LevelStatus::Locked, 0),
    ]
}

/// Parse a JSON array of level records. Input order is kept as map order.
///
/// How many levels are `current` is not checked.
pub fn parse_levels(data: &[u8]) -> Result<Vec<LevelRecord>, ContentError> {
    let levels: Vec<LevelRecord> = serde_json::from_slice(data)?;
    if let Some(level) = levels.iter().find(|l| l.title.trim().is_empty()) {
        return Err(ContentError::EmptyTitle { id: level.id });
    }
    Ok(levels)
}

pub fn load_levels(path: &Path) -> Result<Vec<LevelRecord>, ContentError> {
    let data = std::fs::read(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&data)?;
    tracing::info!(path = %path.display(), count = levels.len(), "loaded levels");
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels_have_one_current() {
        let levels = default_levels();
        assert_eq!(levels.len(), 5);
        assert_eq!(levels.iter().filter(|l| l.is_current()).count(), 1);
        let offsets: Vec<i32> = levels.iter().map(|l| l.vertical_offset).collect();
        assert_eq!(offsets, vec![0, -60, 60, -30, 0]);
    }

    #[test]
    fn parses_and_keeps_order() {
        let json = br#"[
            {"id": 7, "title": "Tide Pool", "status": "current", "yOffset": 10},
            {"id": 2, "title": "Reef", "status": "locked", "verticalOffset": -20}
        ]"#;
        let levels = parse_levels(json).expect("valid levels");
        let ids: Vec<u32> = levels.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![7, 2]);
        assert_eq!(levels[1].vertical_offset, -20);
    }

    #[test]
    fn does_not_enforce_single_current() {
        let json = br#"[
            {"id": 1, "title": "A", "status": "current", "yOffset": 0},
            {"id": 2, "title": "B", "status": "current", "yOffset": 0}
        ]"#;
        assert_eq!(parse_levels(json).expect("valid levels").len(), 2);
    }

    #[test]
    fn rejects_empty_title() {
        let json = br#"[{"id": 9, "title": "  ", "status": "locked", "yOffset": 0}]"#;
        assert!(matches!(
            parse_levels(json),
            Err(ContentError::EmptyTitle { id: 9 })
        ));
    }

    #[test]
    fn rejects_unknown_status() {
        let json = br#"[{"id": 1, "title": "A", "status": "secret", "yOffset": 0}]"#;
        assert!(matches!(parse_levels(json), Err(ContentError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_levels(Path::new("/nonexistent/tidemap-test/levels.json"));
        assert!(matches!(result, Err(ContentError::Io { .. })));
    }
}
