use serde::{Deserialize, Serialize};
use tidemap_protocol::SharedStr;

/// Progress state of a level as shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Locked,
    Current,
    Completed,
}

/// Immutable descriptor of one map node.
///
/// The position of a record in its sequence decides where it is drawn;
/// `id` is only used for identification and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    pub id: u32,
    pub title: SharedStr,
    pub status: LevelStatus,
    /// Displacement from the vertical centre of the track, in pixels.
    #[serde(alias = "yOffset")]
    pub vertical_offset: i32,
}

impl LevelRecord {
    pub fn new(
        id: u32,
        title: impl Into<SharedStr>,
        status: LevelStatus,
        vertical_offset: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            vertical_offset,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == LevelStatus::Locked
    }

    pub fn is_current(&self) -> bool {
        self.status == LevelStatus::Current
    }

    pub fn is_completed(&self) -> bool {
        self.status == LevelStatus::Completed
    }

    /// Short tag drawn in front of the title, e.g. `Lvl 3`.
    pub fn label(&self) -> String {
        format!("Lvl {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_names() {
        let json = serde_json::to_string(&LevelStatus::Completed).expect("serialize");
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn accepts_y_offset_alias() {
        let json = r#"{"id":3,"title":"Rushing River","status":"current","yOffset":60}"#;
        let level: LevelRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(level.id, 3);
        assert_eq!(level.vertical_offset, 60);
        assert!(level.is_current());
    }

    #[test]
    fn label_uses_id() {
        let level = LevelRecord::new(4, "Misty Lake", LevelStatus::Locked, -30);
        assert_eq!(level.label(), "Lvl 4");
        assert!(level.is_locked());
        assert!(!level.is_completed());
    }
}
