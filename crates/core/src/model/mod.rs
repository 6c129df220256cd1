pub mod level;

pub use level::{LevelRecord, LevelStatus};
