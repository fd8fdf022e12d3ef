use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Closed set of material categories. Declaration order is the scoring
/// iteration order and decides ties.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WasteCategory {
    Plastic,
    Paper,
    Glass,
    Metal,
    Organic,
    Electronic,
    Textile,
    Battery,
    Other,
}

/// Collection stream a category is routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WasteStream {
    Recycling,
    Composting,
    SpecialHandling,
    Residual,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 9] = [
        WasteCategory::Plastic,
        WasteCategory::Paper,
        WasteCategory::Glass,
        WasteCategory::Metal,
        WasteCategory::Organic,
        WasteCategory::Electronic,
        WasteCategory::Textile,
        WasteCategory::Battery,
        WasteCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Plastic => "Plastic",
            WasteCategory::Paper => "Paper",
            WasteCategory::Glass => "Glass",
            WasteCategory::Metal => "Metal",
            WasteCategory::Organic => "Organic",
            WasteCategory::Electronic => "Electronic",
            WasteCategory::Textile => "Textile",
            WasteCategory::Battery => "Battery",
            WasteCategory::Other => "Other",
        }
    }

    /// Resolves a free-form name, sending anything outside the closed set
    /// to `Other`.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(WasteCategory::Other)
    }

    pub fn stream(&self) -> WasteStream {
        match self {
            WasteCategory::Plastic
            | WasteCategory::Paper
            | WasteCategory::Glass
            | WasteCategory::Metal => WasteStream::Recycling,
            WasteCategory::Organic => WasteStream::Composting,
            WasteCategory::Electronic | WasteCategory::Battery => WasteStream::SpecialHandling,
            WasteCategory::Textile | WasteCategory::Other => WasteStream::Residual,
        }
    }

    /// Eligible for the standard recycling streams.
    pub fn is_recyclable(&self) -> bool {
        self.stream() == WasteStream::Recycling
    }

    pub fn is_compostable(&self) -> bool {
        self.stream() == WasteStream::Composting
    }

    pub fn needs_special_handling(&self) -> bool {
        self.stream() == WasteStream::SpecialHandling
    }
}

impl Display for WasteCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WasteCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClassifyError::UnknownCategory(s.to_string()))
    }
}
