//! Stage 3: disposal knowledge base. One static entry per category; every
//! lookup is total and falls back to the `Other` entry.

use crate::category::{WasteCategory, WasteStream};
use serde::{Deserialize, Serialize};

/// Upper bound for any recyclability score.
pub const MAX_RECYCLABILITY_SCORE: u8 = 98;

const ORGANIC_SCORE: i64 = 90;
const SPECIAL_HANDLING_SCORE: i64 = 75;
const RESIDUAL_SCORE: i64 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    pub carbon_footprint_kg: f64,
    #[serde(rename = "energyRecoveryPotentialMJ")]
    pub energy_recovery_potential_mj: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    #[serde(rename = "type")]
    pub category: WasteCategory,
    pub category_label: &'static str,
    pub is_recyclable: bool,
    pub disposal_method: &'static str,
    pub recyclability_details: &'static str,
    pub material_composition: &'static [&'static str],
    pub environmental_impact: EnvironmentalImpact,
}

impl KnowledgeEntry {
    pub fn recyclability_score(&self, confidence: f64) -> u8 {
        recyclability_score(self.category, confidence)
    }

    pub fn material_composition(&self) -> Vec<String> {
        self.material_composition.iter().map(|m| m.to_string()).collect()
    }
}

pub fn stream_label(stream: WasteStream) -> &'static str {
    match stream {
        WasteStream::Recycling => "Recycling",
        WasteStream::Composting => "Composting",
        WasteStream::SpecialHandling => "E-Waste",
        WasteStream::Residual => "General Waste",
    }
}

const fn impact(carbon_footprint_kg: f64, energy_recovery_potential_mj: f64) -> EnvironmentalImpact {
    EnvironmentalImpact {
        carbon_footprint_kg,
        energy_recovery_potential_mj,
    }
}

static TABLE: [KnowledgeEntry; 9] = [
    KnowledgeEntry {
        category: WasteCategory::Plastic,
        category_label: "Recycling",
        is_recyclable: true,
        disposal_method: "Clean thoroughly, check recycling code, place in plastics recycling bin. Remove caps and labels if required.",
        recyclability_details: "Recyclable at most facilities, but check the recycling code for local compatibility.",
        material_composition: &["Polymer-based", "Petroleum-derived", "Non-biodegradable", "Lightweight"],
        environmental_impact: impact(6.0, 38.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Paper,
        category_label: "Recycling",
        is_recyclable: true,
        disposal_method: "Keep dry and clean, remove non-paper attachments, place in paper recycling bin. Shred sensitive documents.",
        recyclability_details: "Highly recyclable, but avoid contamination with food or liquids.",
        material_composition: &["Cellulose fiber", "Biodegradable", "Recycled pulp", "Plant-based"],
        environmental_impact: impact(1.1, 16.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Glass,
        category_label: "Recycling",
        is_recyclable: true,
        disposal_method: "Rinse thoroughly, remove lids, place in glass recycling bin. Separate by color if required locally.",
        recyclability_details: "100% recyclable indefinitely without loss of quality.",
        material_composition: &["Silica-based", "Inert material", "Infinitely recyclable", "Heat-resistant"],
        environmental_impact: impact(0.9, 8.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Metal,
        category_label: "Recycling",
        is_recyclable: true,
        disposal_method: "Clean thoroughly, remove non-metal components, place in metal recycling bin. Crush cans if possible.",
        recyclability_details: "Very valuable to recycle and can be reprocessed repeatedly.",
        material_composition: &["Conductive", "Malleable", "High recycling value", "Elemental composition"],
        environmental_impact: impact(4.0, 24.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Organic,
        category_label: "Composting",
        is_recyclable: false,
        disposal_method: "Place in compost or green waste collection. Avoid meat/dairy in home compost. Consider worm composting.",
        recyclability_details: "Fully compostable and returns nutrients to the soil.",
        material_composition: &["Biodegradable", "Compostable", "Carbon-rich", "Natural material"],
        environmental_impact: impact(0.5, 5.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Electronic,
        category_label: "E-Waste",
        is_recyclable: false,
        disposal_method: "Take to e-waste collection center. Do not place in regular trash due to hazardous materials.",
        recyclability_details: "Requires specialised recycling to recover valuable metals and handle hazardous materials.",
        material_composition: &["Circuit boards", "Mixed materials", "Rare elements", "Complex assembly"],
        environmental_impact: impact(12.0, 32.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Textile,
        category_label: "General Waste",
        is_recyclable: false,
        disposal_method: "Donate if still in good condition, or take to a textile recycling center. Some clothing stores accept used textiles for recycling.",
        recyclability_details: "Can be recycled or reused, but requires specialised facilities.",
        material_composition: &["Fabric fibers", "Variable biodegradability", "Often mixed materials"],
        environmental_impact: impact(3.0, 18.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Battery,
        category_label: "E-Waste",
        is_recyclable: false,
        disposal_method: "Do not put in regular trash. Take to a battery collection point or an electronics store that accepts used batteries.",
        recyclability_details: "Must be recycled through dedicated programs to prevent environmental pollution.",
        material_composition: &["Contains heavy metals", "Potentially toxic", "Requires special handling"],
        environmental_impact: impact(8.0, 10.0),
    },
    KnowledgeEntry {
        category: WasteCategory::Other,
        category_label: "General Waste",
        is_recyclable: false,
        disposal_method: "Check local waste authority guidelines for proper disposal.",
        recyclability_details: "Likely not recyclable in current systems; consider alternatives.",
        material_composition: &["Unclassified materials", "Specialized processing may be required"],
        environmental_impact: impact(2.0, 12.0),
    },
];

pub fn entry(category: WasteCategory) -> &'static KnowledgeEntry {
    &TABLE[category as usize]
}

/// Looks up a category by name. Names outside the closed set get the
/// `Other` entry.
pub fn lookup(name: &str) -> &'static KnowledgeEntry {
    entry(WasteCategory::resolve(name))
}

pub fn entries() -> &'static [KnowledgeEntry] {
    &TABLE
}

/// Recyclability score in [0, 98] for a category at a given confidence.
pub fn recyclability_score(category: WasteCategory, confidence: f64) -> u8 {
    let base = match category.stream() {
        WasteStream::Recycling => {
            let scaled = (confidence.clamp(0.0, 1.0) * 100.0).round() as i64;
            match category {
                WasteCategory::Paper => scaled - 5,
                WasteCategory::Glass | WasteCategory::Metal => scaled + 5,
                _ => scaled,
            }
        }
        WasteStream::Composting => ORGANIC_SCORE,
        WasteStream::SpecialHandling => SPECIAL_HANDLING_SCORE,
        WasteStream::Residual => RESIDUAL_SCORE,
    };
    base.clamp(0, MAX_RECYCLABILITY_SCORE as i64) as u8
}
