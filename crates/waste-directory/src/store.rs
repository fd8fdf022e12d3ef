use crate::geo::distance_miles;
use crate::model::{
    AcceptedWasteType, LearningResource, NearbyCenter, RecyclingCenter, ReferenceData, WasteType,
};
use crate::seed::default_reference_data;
use chrono::Utc;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Query point used when the caller gives no coordinates.
pub const DEFAULT_LATITUDE: f64 = 37.7749;
pub const DEFAULT_LONGITUDE: f64 = -122.4194;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("center {center} accepts unknown waste type {waste_type}")]
    UnknownWasteType { center: String, waste_type: String },
}

/// Read-only access to the static reference data.
pub trait ReferenceStore: Send + Sync {
    /// All waste types, ordered by name.
    fn waste_types(&self) -> Vec<WasteType>;

    /// All learning resources, ordered by id.
    fn learning_resources(&self) -> Vec<LearningResource>;

    fn learning_resource(&self, id: u32) -> Option<LearningResource>;

    fn recycling_center(&self, id: u32) -> Option<RecyclingCenter>;

    /// Centers sorted by distance from (latitude, longitude). `stream`
    /// filters on waste type name or collection stream; `None` or "all"
    /// keeps every center.
    fn nearby_centers(&self, latitude: f64, longitude: f64, stream: Option<&str>) -> Vec<NearbyCenter>;
}

#[derive(Debug, Clone)]
pub struct SeededStore {
    data: ReferenceData,
}

impl Default for SeededStore {
    fn default() -> Self {
        Self {
            data: default_reference_data(Utc::now()),
        }
    }
}

impl SeededStore {
    pub fn new(data: ReferenceData) -> Result<Self, DirectoryError> {
        validate(&data)?;
        Ok(Self { data })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DirectoryError> {
        Self::new(serde_json::from_str(raw)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            waste_types = store.data.waste_types.len(),
            centers = store.data.recycling_centers.len(),
            "loaded reference data"
        );
        Ok(store)
    }

    fn waste_type_by_name(&self, name: &str) -> Option<&WasteType> {
        self.data.waste_types.iter().find(|t| t.name == name)
    }

    fn accepts(&self, center: &RecyclingCenter, stream: &str) -> bool {
        center.waste_types.iter().any(|name| {
            name.eq_ignore_ascii_case(stream)
                || self
                    .waste_type_by_name(name)
                    .map(|t| t.category.eq_ignore_ascii_case(stream))
                    .unwrap_or(false)
        })
    }
}

fn validate(data: &ReferenceData) -> Result<(), DirectoryError> {
    fn unique<I: IntoIterator<Item = u32>>(kind: &'static str, ids: I) -> Result<(), DirectoryError> {
        let mut seen = BTreeSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(DirectoryError::DuplicateId { kind, id });
            }
        }
        Ok(())
    }

    unique("waste type", data.waste_types.iter().map(|t| t.id))?;
    unique("learning resource", data.learning_resources.iter().map(|r| r.id))?;
    unique("recycling center", data.recycling_centers.iter().map(|c| c.id))?;

    for center in &data.recycling_centers {
        for name in &center.waste_types {
            if !data.waste_types.iter().any(|t| &t.name == name) {
                return Err(DirectoryError::UnknownWasteType {
                    center: center.name.clone(),
                    waste_type: name.clone(),
                });
            }
        }
    }
    Ok(())
}

impl ReferenceStore for SeededStore {
    fn waste_types(&self) -> Vec<WasteType> {
        let mut types = self.data.waste_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    fn learning_resources(&self) -> Vec<LearningResource> {
        let mut resources = self.data.learning_resources.clone();
        resources.sort_by_key(|r| r.id);
        resources
    }

    fn learning_resource(&self, id: u32) -> Option<LearningResource> {
        self.data.learning_resources.iter().find(|r| r.id == id).cloned()
    }

    fn recycling_center(&self, id: u32) -> Option<RecyclingCenter> {
        self.data.recycling_centers.iter().find(|c| c.id == id).cloned()
    }

    fn nearby_centers(&self, latitude: f64, longitude: f64, stream: Option<&str>) -> Vec<NearbyCenter> {
        let stream = stream.map(str::trim).filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));

        let mut centers: Vec<NearbyCenter> = self
            .data
            .recycling_centers
            .iter()
            .filter(|c| stream.map(|s| self.accepts(c, s)).unwrap_or(true))
            .map(|c| NearbyCenter {
                id: c.id,
                name: c.name.clone(),
                address: c.address.clone(),
                latitude: c.latitude,
                longitude: c.longitude,
                distance: distance_miles(latitude, longitude, c.latitude, c.longitude),
                waste_types: c
                    .waste_types
                    .iter()
                    .map(|name| AcceptedWasteType {
                        name: name.clone(),
                        color: self
                            .waste_type_by_name(name)
                            .map(|t| t.color_class.clone())
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        centers.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        centers
    }
}
