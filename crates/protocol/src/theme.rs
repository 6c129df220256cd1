use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    // Connector path
    PathGlow,
    PathDash,

    // Level nodes
    NodeLockedFill,
    NodeLockedBorder,
    NodeCurrentFill,
    NodeCurrentBorder,
    NodeCompletedFill,
    NodeCompletedBorder,
    CurrentRipple,
    NodeGlyph,
    LockGlyph,
    Star,

    // Labels
    LabelBackground,
    LabelBorder,
    LabelText,
    LabelCurrent,

    TextPrimary,
    TextMuted,

    // Settings overlay
    OverlayScrim,
    OverlaySurface,
}
