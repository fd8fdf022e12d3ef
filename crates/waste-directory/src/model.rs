use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteType {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub is_recyclable: bool,
    pub disposal_instructions: String,
    /// Collection stream, e.g. "Recycling", "Composting", "E-Waste".
    pub category: String,
    pub color_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub category: String,
    pub category_color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours_of_operation: Option<String>,
    /// Names of accepted waste types.
    #[serde(default)]
    pub waste_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptedWasteType {
    pub name: String,
    pub color: String,
}

/// A recycling center annotated with its distance from a query point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Miles, rounded to one decimal.
    pub distance: f64,
    pub waste_types: Vec<AcceptedWasteType>,
}

/// On-disk shape of a reference data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub waste_types: Vec<WasteType>,
    pub learning_resources: Vec<LearningResource>,
    pub recycling_centers: Vec<RecyclingCenter>,
}
