//! Personality configuration
//!
//! A personality tunes the heuristics without changing the pipeline order:
//! weight multipliers per move type, randomization knobs, strategic
//! thresholds and the opening area. Every section falls back to the
//! balanced default when missing from a JSON document.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

/// Weight multipliers applied to the base priority of each move type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub threat_defense: f32,
    pub attack: f32,
    pub border_connection: f32,
    pub fragment_connection: f32,
    pub chain_extension: f32,
    pub gap_fill: f32,
    pub diagonal_extension: f32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            threat_defense: 1.0,
            attack: 1.0,
            border_connection: 1.0,
            fragment_connection: 1.0,
            chain_extension: 1.0,
            gap_fill: 1.0,
            diagonal_extension: 1.0,
        }
    }
}

/// Probabilities in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Randomization {
    /// Chance the opening stone moves off the weighted centre
    pub starting_jitter: f32,
    /// Chance to take the runner-up cell when attacking, filling a gap or
    /// stepping diagonally
    pub move_noise: f32,
    /// Chance to swap the leading fragment's head order, extending from the
    /// head with less ground to cover first
    pub head_selection: f32,
    /// Chance to take the runner-up pattern move in the second move and in
    /// chain extension
    pub pattern_selection: f32,
}

impl Default for Randomization {
    fn default() -> Self {
        Self {
            starting_jitter: 0.5,
            move_noise: 0.1,
            head_selection: 0.3,
            pattern_selection: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    /// Minimum weighted attack priority, in score units
    pub attack_threshold: i32,
    /// Chance the attack step runs at all on a given turn
    pub attack_probability: f32,
    /// Chance to fill a safe gap that no opponent stone touches yet.
    /// Contested gaps are always filled.
    pub defensive_reactivity: f32,
    /// Preference for extending over connecting fragments
    pub independence: f32,
    /// Willingness to play cells an opponent stone could cut
    pub risk_taking: f32,
    pub enable_diagonal_extension: bool,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            attack_threshold: 2000,
            attack_probability: 0.6,
            defensive_reactivity: 0.8,
            independence: 0.5,
            risk_taking: 0.4,
            enable_diagonal_extension: false,
        }
    }
}

/// Opening area on a 15x15 board; clamped for other sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingArea {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
    /// 1.0 always plays the area's centre, 0.0 spreads uniformly
    pub center_weight: f32,
}

impl Default for StartingArea {
    fn default() -> Self {
        Self {
            row_min: 5,
            row_max: 9,
            col_min: 5,
            col_max: 9,
            center_weight: 0.7,
        }
    }
}

impl StartingArea {
    /// Row range clamped to a board of `size`
    pub fn rows(&self, size: usize) -> RangeInclusive<usize> {
        clamp_range(self.row_min, self.row_max, size)
    }

    /// Column range clamped to a board of `size`
    pub fn cols(&self, size: usize) -> RangeInclusive<usize> {
        clamp_range(self.col_min, self.col_max, size)
    }

    pub fn contains(&self, row: usize, col: usize, size: usize) -> bool {
        self.rows(size).contains(&row) && self.cols(size).contains(&col)
    }
}

fn clamp_range(min: usize, max: usize, size: usize) -> RangeInclusive<usize> {
    let last = size.saturating_sub(1);
    let hi = max.min(last);
    let lo = min.min(hi);
    lo..=hi
}

/// Complete personality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personality {
    pub name: String,
    pub priorities: PriorityWeights,
    pub randomization: Randomization,
    pub strategy: Strategy,
    pub starting_area: StartingArea,
}

impl Default for Personality {
    /// The balanced personality
    fn default() -> Self {
        Self {
            name: "balanced".to_string(),
            priorities: PriorityWeights::default(),
            randomization: Randomization::default(),
            strategy: Strategy::default(),
            starting_area: StartingArea::default(),
        }
    }
}

impl Personality {
    /// Attacks early and often, cares less about its own safe gaps
    pub fn aggressive() -> Self {
        Self {
            name: "aggressive".to_string(),
            priorities: PriorityWeights {
                attack: 1.5,
                gap_fill: 0.8,
                ..PriorityWeights::default()
            },
            strategy: Strategy {
                attack_threshold: 1000,
                attack_probability: 0.9,
                defensive_reactivity: 0.5,
                risk_taking: 0.8,
                ..Strategy::default()
            },
            ..Self::default()
        }
    }

    /// Rarely attacks, fills its gaps and plays diagonals to stay solid
    pub fn defensive() -> Self {
        Self {
            name: "defensive".to_string(),
            priorities: PriorityWeights {
                attack: 0.7,
                gap_fill: 1.4,
                ..PriorityWeights::default()
            },
            randomization: Randomization {
                move_noise: 0.05,
                ..Randomization::default()
            },
            strategy: Strategy {
                attack_threshold: 3000,
                attack_probability: 0.3,
                defensive_reactivity: 1.0,
                risk_taking: 0.1,
                enable_diagonal_extension: true,
                ..Strategy::default()
            },
            ..Self::default()
        }
    }

    /// Preset by name (`balanced`, `aggressive`, `defensive`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" | "default" => Some(Self::default()),
            "aggressive" => Some(Self::aggressive()),
            "defensive" => Some(Self::defensive()),
            _ => None,
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let personality: Personality = serde_json::from_str(json)?;
        personality.validate()?;
        Ok(personality)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let personality = Self::from_json_str(&text)?;
        debug!(name = %personality.name, path = %path.display(), "loaded personality");
        Ok(personality)
    }

    /// Load from a file, falling back to the balanced default on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "using default personality");
                Self::default()
            }
        }
    }

    /// Reject probabilities outside [0, 1], negative weights and inverted areas
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("randomization.starting_jitter", self.randomization.starting_jitter),
            ("randomization.move_noise", self.randomization.move_noise),
            ("randomization.head_selection", self.randomization.head_selection),
            ("randomization.pattern_selection", self.randomization.pattern_selection),
            ("strategy.attack_probability", self.strategy.attack_probability),
            ("strategy.defensive_reactivity", self.strategy.defensive_reactivity),
            ("strategy.independence", self.strategy.independence),
            ("strategy.risk_taking", self.strategy.risk_taking),
            ("starting_area.center_weight", self.starting_area.center_weight),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{field} must be within [0, 1], got {value}"
                )));
            }
        }

        let w = &self.priorities;
        let weights = [
            w.threat_defense,
            w.attack,
            w.border_connection,
            w.fragment_connection,
            w.chain_extension,
            w.gap_fill,
            w.diagonal_extension,
        ];
        if weights.iter().any(|&x| !x.is_finite() || x < 0.0) {
            return Err(EngineError::InvalidConfig(
                "priority weights must be finite and non-negative".to_string(),
            ));
        }

        let area = &self.starting_area;
        if area.row_min > area.row_max || area.col_min > area.col_max {
            return Err(EngineError::InvalidConfig(format!(
                "empty starting area rows {}..={} cols {}..={}",
                area.row_min, area.row_max, area.col_min, area.col_max
            )));
        }

        if self.strategy.attack_threshold < 0 {
            return Err(EngineError::InvalidConfig(
                "strategy.attack_threshold must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
