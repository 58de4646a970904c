use serde::{Deserialize, Serialize};
use std::fmt;

/// 格式錯誤的資料列要怎麼處理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Treat a bad session count as zero; other defects are skipped.
    Zero,
    /// Abort the parse on the first bad row.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Classic,
    /// Receipt style with computed end times.
    Receipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Log,
    Tutees,
    Billing,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Log, Tab::Tutees, Tab::Billing];

    pub fn is_gated(&self) -> bool {
        matches!(self, Tab::Billing)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Log => "Log",
            Tab::Tutees => "Tutees",
            Tab::Billing => "Billing",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
