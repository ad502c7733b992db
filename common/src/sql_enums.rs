use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug)]
pub enum ChallengeDifficulty {
    Easy,
    Medium,
    Hard,
}

impl ChallengeDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeDifficulty::Easy => "Easy",
            ChallengeDifficulty::Medium => "Medium",
            ChallengeDifficulty::Hard => "Hard",
        }
    }
}

/// A progress value as it is persisted in `challenge_status`. A pair without a
/// row is not started, see [`ChallengeProgress`].
#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "challenge_progress", rename_all = "kebab-case")
)]
pub enum RecordedProgress {
    Started,
    Submitted,
}

/// Progress of one account on one challenge.
///
/// `NotStarted -> Started -> Submitted`, `Submitted` is terminal.
#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeProgress {
    #[default]
    NotStarted,
    Started,
    Submitted,
}

impl ChallengeProgress {
    pub fn label(self) -> &'static str {
        match self {
            ChallengeProgress::NotStarted => "Not Started",
            ChallengeProgress::Started => "Started",
            ChallengeProgress::Submitted => "Submitted",
        }
    }

    pub fn is_submitted(self) -> bool {
        self == ChallengeProgress::Submitted
    }
}

impl From<RecordedProgress> for ChallengeProgress {
    fn from(value: RecordedProgress) -> Self {
        match value {
            RecordedProgress::Started => ChallengeProgress::Started,
            RecordedProgress::Submitted => ChallengeProgress::Submitted,
        }
    }
}

impl From<Option<RecordedProgress>> for ChallengeProgress {
    fn from(value: Option<RecordedProgress>) -> Self {
        value.map(ChallengeProgress::from).unwrap_or_default()
    }
}
