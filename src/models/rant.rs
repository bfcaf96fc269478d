//! Short mood posts shown on the home page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RantMood {
    Angry,
    Happy,
    Sad,
    Neutral,
}

impl RantMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "angry" => Some(Self::Angry),
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Angry => "😡",
            Self::Happy => "😄",
            Self::Sad => "😢",
            Self::Neutral => "😐",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickRant {
    pub id: String,
    pub game: String,
    pub content: String,
    pub mood: RantMood,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuickRant {
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: String,
}

impl NewQuickRant {
    pub fn validate(&self) -> Result<RantMood, ValidationError> {
        required(&self.game, "game")?;
        required(&self.content, "content")?;
        RantMood::from_str(&self.mood)
            .ok_or_else(|| ValidationError(format!("unknown mood: {}", self.mood)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rant_validation() {
        let rant = NewQuickRant {
            game: "Tetris".to_string(),
            content: "one more line".to_string(),
            mood: "happy".to_string(),
        };
        assert_eq!(rant.validate(), Ok(RantMood::Happy));

        let rant = NewQuickRant {
            mood: "excited".to_string(),
            ..rant
        };
        assert!(rant.validate().is_err());
    }
}
