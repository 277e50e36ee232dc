//! Engine configuration: scoring constants, Swiss weighting policy and seeding.

use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};

use crate::championship::errors::{ChampionshipError, ChampionshipResult};

/// Points awarded per match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub win_points: i64,
    pub draw_points: i64,
    pub lose_points: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_points: 3,
            draw_points: 1,
            lose_points: 0,
        }
    }
}

impl ScoringConfig {
    pub fn new(win_points: i64, draw_points: i64, lose_points: i64) -> Self {
        Self {
            win_points,
            draw_points,
            lose_points,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.win_points < self.draw_points {
            return Err(format!(
                "win_points ({}) must be >= draw_points ({})",
                self.win_points, self.draw_points
            ));
        }
        if self.draw_points < self.lose_points {
            return Err(format!(
                "draw_points ({}) must be >= lose_points ({})",
                self.draw_points, self.lose_points
            ));
        }
        Ok(())
    }

    /// Points earned by each side for a match that ended `score_a` to `score_b`
    pub fn points_for(&self, score_a: u32, score_b: u32) -> (i64, i64) {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => (self.win_points, self.lose_points),
            std::cmp::Ordering::Less => (self.lose_points, self.win_points),
            std::cmp::Ordering::Equal => (self.draw_points, self.draw_points),
        }
    }
}

/// Edge weighting used when computing Swiss pairings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwissWeighting {
    /// Prefer opponents with similar scores
    #[default]
    ScoreProximity,
    /// Prefer opponents with the largest score difference
    ScoreGap,
}

impl fmt::Display for SwissWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwissWeighting::ScoreProximity => write!(f, "proximity"),
            SwissWeighting::ScoreGap => write!(f, "gap"),
        }
    }
}

impl FromStr for SwissWeighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proximity" => Ok(SwissWeighting::ScoreProximity),
            "gap" => Ok(SwissWeighting::ScoreGap),
            other => Err(format!("unknown Swiss weighting '{other}'")),
        }
    }
}

/// Per-championship configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChampionshipConfig {
    pub scoring: ScoringConfig,
    pub swiss_weighting: SwissWeighting,
    /// Seed for the elimination seeding shuffle. `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl ChampionshipConfig {
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_swiss_weighting(mut self, weighting: SwissWeighting) -> Self {
        self.swiss_weighting = weighting;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> ChampionshipResult<()> {
        self.scoring.validate().map_err(ChampionshipError::InvalidConfig)
    }

    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `CHAMP_WIN_POINTS`: points for a win (default: 3)
    /// - `CHAMP_DRAW_POINTS`: points for a draw (default: 1)
    /// - `CHAMP_LOSE_POINTS`: points for a loss (default: 0)
    /// - `CHAMP_SWISS_WEIGHTING`: `proximity` or `gap` (default: proximity)
    /// - `CHAMP_SEED`: fixed seed for elimination seeding (default: unset)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the weighting is unknown or the scoring
    /// constants are inconsistent.
    pub fn from_env() -> ChampionshipResult<Self> {
        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            win_points: parse_env_or("CHAMP_WIN_POINTS", defaults.win_points),
            draw_points: parse_env_or("CHAMP_DRAW_POINTS", defaults.draw_points),
            lose_points: parse_env_or("CHAMP_LOSE_POINTS", defaults.lose_points),
        };

        let swiss_weighting = match env::var("CHAMP_SWISS_WEIGHTING") {
            Ok(value) => value.parse().map_err(ChampionshipError::InvalidConfig)?,
            Err(_) => SwissWeighting::default(),
        };

        let seed = env::var("CHAMP_SEED").ok().and_then(|v| v.parse().ok());

        let config = Self {
            scoring,
            swiss_weighting,
            seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
