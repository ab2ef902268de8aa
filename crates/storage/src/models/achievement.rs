use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UnknownVariant;

/// Scoring bucket of an achievement. Each category has its own formula and cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Competition,
    Paper,
    Patent,
    Innovation,
    Volunteer,
    Cadre,
    Honor,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 7] = [
        Self::Competition,
        Self::Paper,
        Self::Patent,
        Self::Innovation,
        Self::Volunteer,
        Self::Cadre,
        Self::Honor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Competition => "competition",
            Self::Paper => "paper",
            Self::Patent => "patent",
            Self::Innovation => "innovation",
            Self::Volunteer => "volunteer",
            Self::Cadre => "cadre",
            Self::Honor => "honor",
        }
    }

    pub fn group(&self) -> ScoreGroup {
        match self {
            Self::Competition | Self::Paper | Self::Patent | Self::Innovation => {
                ScoreGroup::Academic
            }
            Self::Volunteer | Self::Cadre | Self::Honor => ScoreGroup::Performance,
        }
    }

    /// Upper bound of any score granted in this category.
    pub fn cap(&self) -> Decimal {
        match self {
            Self::Competition | Self::Paper | Self::Patent | Self::Innovation => Decimal::from(15),
            Self::Volunteer => Decimal::ONE,
            Self::Cadre | Self::Honor => Decimal::from(2),
        }
    }
}

impl TryFrom<String> for AchievementCategory {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or(UnknownVariant {
                kind: "achievement category",
                value,
            })
    }
}

/// Academic items (competitions, papers, patents, innovation) and performance
/// items (volunteering, cadre roles, honors) are totalled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGroup {
    Academic,
    Performance,
}

impl ScoreGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Performance => "performance",
        }
    }
}

impl TryFrom<String> for ScoreGroup {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "academic" => Ok(Self::Academic),
            "performance" => Ok(Self::Performance),
            _ => Err(UnknownVariant {
                kind: "score group",
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    NationalAPlus,
    NationalA,
    NationalAMinus,
    ProvincialA,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AwardRank {
    First,
    Second,
    Third,
    #[serde(other)]
    Unknown,
}

/// Position within a team or author list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContributorRole {
    Independent,
    First,
    Second,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaperLevel {
    A,
    B,
    C,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CadreRole {
    /// Class monitor or league branch secretary
    Monitor,
    /// Minister of the college student union
    Minister,
    /// Class committee member
    Member,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HonorLevel {
    National,
    Provincial,
    School,
    #[serde(other)]
    Unknown,
}

/// Category-specific attributes of a claimed achievement.
///
/// Serialized with an inline `category` tag, e.g.
/// `{"category": "competition", "level": "national_a", "rank": "first"}`.
/// Unrecognised attribute values deserialize to `unknown` and score 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Achievement {
    Competition {
        level: CompetitionLevel,
        rank: AwardRank,
        #[serde(default)]
        is_group: bool,
        #[serde(default)]
        group_role: Option<ContributorRole>,
    },
    Paper {
        level: PaperLevel,
        author: ContributorRole,
    },
    Patent,
    Innovation,
    Volunteer {
        hours: Decimal,
        /// Hours served at large sporting events or teaching support count half.
        #[serde(default)]
        is_large_event: bool,
    },
    Cadre {
        role: CadreRole,
        /// Supervisor evaluation on a 0-100 scale.
        supervisor_score: i32,
    },
    Honor {
        level: HonorLevel,
    },
}

impl Achievement {
    pub fn category(&self) -> AchievementCategory {
        match self {
            Self::Competition { .. } => AchievementCategory::Competition,
            Self::Paper { .. } => AchievementCategory::Paper,
            Self::Patent => AchievementCategory::Patent,
            Self::Innovation => AchievementCategory::Innovation,
            Self::Volunteer { .. } => AchievementCategory::Volunteer,
            Self::Cadre { .. } => AchievementCategory::Cadre,
            Self::Honor { .. } => AchievementCategory::Honor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_competition_deserializes_with_defaults() {
        let achievement: Achievement = serde_json::from_value(json!({
            "category": "competition",
            "level": "national_a_plus",
            "rank": "second"
        }))
        .unwrap();

        assert_eq!(
            achievement,
            Achievement::Competition {
                level: CompetitionLevel::NationalAPlus,
                rank: AwardRank::Second,
                is_group: false,
                group_role: None,
            }
        );
        assert_eq!(achievement.category(), AchievementCategory::Competition);
    }

    #[test]
    fn test_unknown_attribute_values_fall_back_to_unknown() {
        let achievement: Achievement = serde_json::from_value(json!({
            "category": "honor",
            "level": "galactic"
        }))
        .unwrap();

        assert_eq!(
            achievement,
            Achievement::Honor {
                level: HonorLevel::Unknown
            }
        );
    }

    #[test]
    fn test_volunteer_hours_accept_numbers() {
        let achievement: Achievement = serde_json::from_value(json!({
            "category": "volunteer",
            "hours": 250,
            "is_large_event": true
        }))
        .unwrap();

        assert_eq!(
            achievement,
            Achievement::Volunteer {
                hours: Decimal::from(250),
                is_large_event: true,
            }
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result: Result<Achievement, _> =
            serde_json::from_value(json!({ "category": "scholarship" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_category_round_trips_through_column_text() {
        for category in AchievementCategory::ALL {
            let parsed = AchievementCategory::try_from(category.as_str().to_string()).unwrap();
            assert_eq!(parsed, category);
        }
        assert!(AchievementCategory::try_from("thesis".to_string()).is_err());
    }

    #[test]
    fn test_groups_and_caps() {
        assert_eq!(AchievementCategory::Paper.group(), ScoreGroup::Academic);
        assert_eq!(AchievementCategory::Cadre.group(), ScoreGroup::Performance);
        assert_eq!(AchievementCategory::Competition.cap(), Decimal::from(15));
        assert_eq!(AchievementCategory::Volunteer.cap(), Decimal::ONE);
        assert_eq!(AchievementCategory::Cadre.cap(), Decimal::from(2));
    }
}
