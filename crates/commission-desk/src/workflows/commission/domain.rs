use serde::{Deserialize, Serialize};

/// Team classifications that compete for ranking bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamClass {
    Ura,
    Discador,
}

impl TeamClass {
    pub const fn ordered() -> [Self; 2] {
        [Self::Ura, Self::Discador]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ura => "URA",
            Self::Discador => "DISCADOR",
        }
    }

    /// Substring a team key must contain to belong to this classification.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Ura => "URA",
            Self::Discador => "DISC",
        }
    }

    pub fn matches(self, team_key: &str) -> bool {
        team_key.contains(self.marker())
    }

    /// First classification in `ordered()` whose marker appears in the key.
    pub fn primary(team_key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|class| class.matches(team_key))
    }

    /// Every classification the key belongs to. Memberships are independent.
    pub fn memberships(team_key: &str) -> Vec<Self> {
        Self::ordered()
            .into_iter()
            .filter(|class| class.matches(team_key))
            .collect()
    }
}

/// One row of the production report after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRecord {
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub completed: f64,
    #[serde(default)]
    pub custom_goal: Option<f64>,
}

impl OperatorRecord {
    pub fn new(name: impl Into<String>, team: impl Into<String>, completed: f64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            team: team.into().trim().to_string(),
            completed,
            custom_goal: None,
        }
    }

    pub fn with_custom_goal(mut self, goal: f64) -> Self {
        self.custom_goal = Some(goal);
        self
    }

    /// Uppercase comparison key used for classification and bonus joins.
    pub fn team_key(&self) -> String {
        team_key(&self.team)
    }

    /// Custom goal when it is usable as an override.
    pub fn valid_custom_goal(&self) -> Option<f64> {
        self.custom_goal
            .filter(|goal| goal.is_finite() && *goal > 0.0)
    }
}

pub fn team_key(team: &str) -> String {
    team.trim().to_uppercase()
}

/// Team-wide default goals supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGoalDefaults")]
pub struct GoalDefaults {
    pub ura: f64,
    pub discador: f64,
}

impl GoalDefaults {
    pub const STANDARD_URA: f64 = 80.0;
    pub const STANDARD_DISCADOR: f64 = 60.0;

    pub fn new(ura: f64, discador: f64) -> Result<Self, GoalDefaultsError> {
        for (class, value) in [(TeamClass::Ura, ura), (TeamClass::Discador, discador)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GoalDefaultsError::NonPositive {
                    team: class.label(),
                    value,
                });
            }
        }

        Ok(Self { ura, discador })
    }

    pub fn for_class(&self, class: TeamClass) -> f64 {
        match class {
            TeamClass::Ura => self.ura,
            TeamClass::Discador => self.discador,
        }
    }

    /// Default goal for a team key; keys outside both classifications use the DISCADOR goal.
    pub fn for_team_key(&self, team_key: &str) -> f64 {
        self.for_class(TeamClass::primary(team_key).unwrap_or(TeamClass::Discador))
    }
}

#[derive(Deserialize)]
struct RawGoalDefaults {
    ura: f64,
    discador: f64,
}

impl TryFrom<RawGoalDefaults> for GoalDefaults {
    type Error = GoalDefaultsError;

    fn try_from(raw: RawGoalDefaults) -> Result<Self, Self::Error> {
        Self::new(raw.ura, raw.discador)
    }
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            ura: Self::STANDARD_URA,
            discador: Self::STANDARD_DISCADOR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GoalDefaultsError {
    #[error("default goal for {team} must be a positive number (found {value})")]
    NonPositive { team: &'static str, value: f64 },
}
