//! Offline advice used when the generative assistant is unavailable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation: String,
    pub environmental_impact: Vec<String>,
}

struct AdviceEntry {
    key: &'static str,
    recommendation: &'static str,
    impact: [&'static str; 4],
}

static RECOMMENDATIONS: [AdviceEntry; 8] = [
    AdviceEntry {
        key: "Plastic",
        recommendation: "Clean the plastic item and check for a recycling symbol (1-7). Place it in your recycling bin if accepted by your local program. Remove any non-plastic parts or labels if possible.",
        impact: [
            "Recycling one plastic bottle saves enough energy to power a 60W light bulb for 6 hours",
            "Prevents harmful chemicals from leaching into soil and waterways",
            "Reduces dependence on petroleum for new plastic production",
            "Keeps plastic out of oceans where it can harm marine life",
        ],
    },
    AdviceEntry {
        key: "Paper",
        recommendation: "Unfold or flatten paper items and place in your paper recycling bin. Remove any plastic sleeves, windows, or non-paper elements. For shredded paper, check local guidelines as it may need to be bagged separately.",
        impact: [
            "Recycling one ton of paper saves 17 trees and 7,000 gallons of water",
            "Reduces greenhouse gas emissions from paper decomposing in landfills",
            "Saves energy compared to making paper from virgin wood pulp",
            "Decreases the demand for tree harvesting and deforestation",
        ],
    },
    AdviceEntry {
        key: "Glass",
        recommendation: "Rinse glass containers to remove food residue. Remove and separate caps and lids (these are often made of different materials). Place clean glass in your recycling bin.",
        impact: [
            "Glass can be recycled indefinitely without loss of quality",
            "Recycling glass reduces mining of raw materials like sand and limestone",
            "Uses 40% less energy than making new glass from raw materials",
            "Reduces CO2 emissions associated with glass production",
        ],
    },
    AdviceEntry {
        key: "Metal",
        recommendation: "Rinse metal items to remove food residue. For aluminum cans, don't crush them as this can make them harder to sort. For steel cans, remove paper labels if possible.",
        impact: [
            "Recycling aluminum uses 95% less energy than producing new aluminum",
            "Metal can be recycled indefinitely without degrading in quality",
            "Reduces mining of raw ore and associated environmental damage",
            "Saves significant amounts of water compared to primary production",
        ],
    },
    AdviceEntry {
        key: "Organic",
        recommendation: "Compost food scraps, yard waste, and other organic materials in a home compost bin or through municipal composting programs. Avoid composting meat, dairy, and oils in home systems.",
        impact: [
            "Diverts waste from landfills where it would produce methane, a potent greenhouse gas",
            "Creates nutrient-rich soil amendment that reduces need for chemical fertilizers",
            "Improves soil health and water retention in gardens and agriculture",
            "Completes the natural nutrient cycle, returning organic matter to the soil",
        ],
    },
    AdviceEntry {
        key: "Electronic",
        recommendation: "Never dispose of electronics in regular trash. Take them to designated e-waste collection centers, retailer take-back programs, or community e-waste events. Back up and wipe personal data before recycling.",
        impact: [
            "Prevents toxic materials like lead, mercury, and cadmium from entering landfills",
            "Allows recovery of valuable metals like gold, silver, and copper",
            "Reduces environmental damage from mining raw materials for new electronics",
            "Proper e-waste handling prevents hazardous materials from contaminating soil and water",
        ],
    },
    AdviceEntry {
        key: "Hazardous",
        recommendation: "Never dispose of hazardous waste in regular trash or down drains. Take items like batteries, paint, chemicals, and fluorescent bulbs to hazardous waste collection facilities or special collection events.",
        impact: [
            "Prevents toxic substances from contaminating soil, water, and air",
            "Protects waste workers from exposure to dangerous chemicals",
            "Allows for proper neutralization or safe storage of harmful materials",
            "Many hazardous materials can be recycled or repurposed when properly collected",
        ],
    },
    AdviceEntry {
        key: "Other",
        recommendation: "Check with your local waste management authority for specific guidelines on this item. If it cannot be recycled or composted, place it in general waste.",
        impact: [
            "Proper sorting prevents contamination of recycling streams",
            "Following local guidelines ensures the most environmentally appropriate disposal",
            "Some items may have special take-back or recycling programs",
            "When in doubt, research before throwing out to ensure proper disposal",
        ],
    },
];

/// Fallback tips when the assistant could not produce any.
pub const FALLBACK_TIPS: [&str; 3] = [
    "Reduce single-use plastic by bringing your own shopping bag",
    "Separate organic and inorganic waste to make recycling easier",
    "Save energy by switching off electronics when not in use",
];

/// Canned recommendation for a waste type name. Batteries share the
/// hazardous advice; unknown names get the `Other` entry.
pub fn default_recommendation(waste_type: &str) -> Recommendation {
    let wanted = waste_type.trim();
    let key = if wanted.eq_ignore_ascii_case("battery") || wanted.eq_ignore_ascii_case("batteries") {
        "Hazardous"
    } else {
        wanted
    };
    let entry = RECOMMENDATIONS
        .iter()
        .find(|e| e.key.eq_ignore_ascii_case(key))
        .unwrap_or(&RECOMMENDATIONS[RECOMMENDATIONS.len() - 1]);
    Recommendation {
        recommendation: entry.recommendation.to_string(),
        environmental_impact: entry.impact.iter().map(|s| s.to_string()).collect(),
    }
}

const TIP_RULES: [(&[&str], [&str; 3]); 4] = [
    (
        &["plastic", "plastik"],
        [
            "Cut down on single-use plastics",
            "Choose products with recyclable packaging",
            "Bring your own bag when shopping",
        ],
    ),
    (
        &["paper", "kertas"],
        [
            "Print on both sides of the paper",
            "Choose paper products from sustainable sources",
            "Recycle used paper to reduce tree felling",
        ],
    ),
    (
        &["electronic", "elektronik", "gadget"],
        [
            "Do not throw old electronics in the regular trash",
            "Find the nearest electronics recycling center",
            "Consider repairing devices instead of replacing them",
        ],
    ),
    (
        &["organic", "organik", "food", "makanan"],
        [
            "Compost food scraps to reduce waste",
            "Plan meals well to reduce food waste",
            "Store food properly so it lasts longer",
        ],
    ),
];

const GENERAL_TIPS: [&str; 3] = [
    "Apply the 3R principle: Reduce, Reuse, Recycle",
    "Sort waste by type to make recycling easier",
    "Teach others why good waste management matters",
];

/// Three tips chosen by the first keyword rule the message matches.
pub fn environmental_tips(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let tips = TIP_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(*k)))
        .map(|(_, tips)| tips)
        .unwrap_or(&GENERAL_TIPS);
    tips.iter().map(|s| s.to_string()).collect()
}
