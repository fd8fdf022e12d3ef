use crate::category::WasteCategory;
use crate::signals::ImageSignals;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Multiplier applied when the caller reports a sub-threshold model result.
pub const LOW_CONFIDENCE_FACTOR: f64 = 0.8;

const BOOST_CEILING: f64 = 0.05;

/// How the margin between the two best categories becomes a confidence.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceCurve {
    /// clamp(0.65 + diff * 0.5, 0.65, 0.90)
    #[default]
    Conservative,
    /// clamp(0.70 + diff, 0.70, 0.95) plus a random boost below 0.05
    Boosted,
}

impl ConfidenceCurve {
    pub fn base(&self, diff: f64) -> f64 {
        match self {
            ConfidenceCurve::Conservative => (0.65 + diff * 0.5).clamp(0.65, 0.90),
            ConfidenceCurve::Boosted => (0.70 + diff).clamp(0.70, 0.95),
        }
    }

    pub fn ceiling(&self) -> f64 {
        match self {
            ConfidenceCurve::Conservative => 0.90,
            ConfidenceCurve::Boosted => 0.95,
        }
    }
}

impl std::str::FromStr for ConfidenceCurve {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(ConfidenceCurve::Conservative),
            "boosted" => Ok(ConfidenceCurve::Boosted),
            other => Err(format!("unknown confidence curve: {other}")),
        }
    }
}

/// One score per category, in `WasteCategory::ALL` order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryWeights {
    scores: [f64; 9],
}

impl CategoryWeights {
    pub fn from_signals(s: &ImageSignals, low_confidence: bool) -> Self {
        let plastic_penalty = if low_confidence { 0.2 } else { 0.0 };
        let electronic_penalty = if low_confidence { 0.1 } else { 0.0 };

        let plastic = s.colorfulness * 1.8 + s.sharpness * 0.6 - plastic_penalty;
        let paper = (1.0 - s.colorfulness) * 0.9 + s.brightness * 0.8;
        let glass = s.brightness * 1.4 + s.sharpness * 0.9 + s.transparency * 0.5;
        let metal = s.sharpness * 1.7 + (1.0 - s.brightness) * 0.6 + s.reflectivity * 0.4;
        let organic = s.greenness * 2.2 + (1.0 - s.brightness) * 0.9 + s.texture * 0.3;
        let electronic = s.complexity * 1.8 + s.sharpness * 0.7 - electronic_penalty;

        // Textile, Battery and Other have no visual formula.
        Self {
            scores: [plastic, paper, glass, metal, organic, electronic, 0.0, 0.0, 0.0],
        }
    }

    /// Raw per-category scores, e.g. logits from an external model, in
    /// `WasteCategory::ALL` order.
    pub fn from_scores(scores: [f64; 9]) -> Self {
        Self { scores }
    }

    pub fn get(&self, category: WasteCategory) -> f64 {
        self.scores[category as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, f64)> + '_ {
        WasteCategory::ALL.iter().copied().zip(self.scores.iter().copied())
    }

    /// Winner and runner-up weights. The running maximum starts at zero with
    /// `Organic` as the default, and only a strictly greater weight takes
    /// over, so the first maximum in enumeration order wins.
    pub fn ranking(&self) -> (WasteCategory, f64, f64) {
        let mut best = WasteCategory::Organic;
        let mut best_weight = 0.0;
        for (category, weight) in self.iter() {
            if weight > best_weight {
                best_weight = weight;
                best = category;
            }
        }

        let mut runner_up = 0.0;
        for (category, weight) in self.iter() {
            if category != best && weight > runner_up {
                runner_up = weight;
            }
        }

        (best, best_weight, runner_up)
    }
}

/// Scorer output: the chosen category and its heuristic confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub category: WasteCategory,
    pub confidence: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryScorer {
    pub curve: ConfidenceCurve,
}

impl CategoryScorer {
    pub fn new(curve: ConfidenceCurve) -> Self {
        Self { curve }
    }

    /// Deterministic scoring. With the boosted curve the random boost is
    /// left out; use [`CategoryScorer::score_with_rng`] to include it.
    pub fn score(&self, signals: &ImageSignals, low_confidence: bool) -> Verdict {
        let weights = CategoryWeights::from_signals(signals, low_confidence);
        let (category, best, runner_up) = weights.ranking();
        let margin = best - runner_up;
        let confidence = self.curve.base(margin);
        Verdict {
            category,
            confidence: apply_low_confidence(confidence, low_confidence),
            margin,
        }
    }

    pub fn score_with_rng<R: Rng + ?Sized>(
        &self,
        signals: &ImageSignals,
        low_confidence: bool,
        rng: &mut R,
    ) -> Verdict {
        let weights = CategoryWeights::from_signals(signals, low_confidence);
        let (category, best, runner_up) = weights.ranking();
        let margin = best - runner_up;
        let mut confidence = self.curve.base(margin);
        if self.curve == ConfidenceCurve::Boosted {
            let boost = rng.gen_range(0.0..BOOST_CEILING);
            confidence = (confidence + boost).min(self.curve.ceiling());
        }
        Verdict {
            category,
            confidence: apply_low_confidence(confidence, low_confidence),
            margin,
        }
    }
}

fn apply_low_confidence(confidence: f64, low_confidence: bool) -> f64 {
    if low_confidence {
        confidence * LOW_CONFIDENCE_FACTOR
    } else {
        confidence
    }
}

/// Scores with the default conservative curve.
pub fn score(signals: &ImageSignals, low_confidence: bool) -> Verdict {
    CategoryScorer::default().score(signals, low_confidence)
}
