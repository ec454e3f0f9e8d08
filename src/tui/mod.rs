pub mod key;
pub mod text;
pub mod theme;
pub mod ui;
pub mod viewport;
pub mod widgets;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use key::{Key, KeyOutcome};
pub use theme::Theme;
pub use ui::{render, Popup, Screen, StatusKind, StatusMessage};
pub use viewport::{render_scrollable, ScrollRegion, ScrollablePanel, Window};

/// Which panel sits on the left of the screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Timeline,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::List => "List View",
            ViewMode::Timeline => "Timeline View",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Timeline,
            ViewMode::Timeline => ViewMode::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::List => "list",
            ViewMode::Timeline => "timeline",
        })
    }
}
