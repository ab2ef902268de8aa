//! Piecewise scoring rules for each achievement category.
//!
//! Every rule is a fixed lookup table of base points, optionally scaled by a
//! team or authorship share, then clamped to `[0, category cap]` and rounded
//! to two decimals. Combinations missing from a table score 0.

use rust_decimal::Decimal;

use crate::models::{
    Achievement, AwardRank, CadreRole, CompetitionLevel, ContributorRole, HonorLevel, PaperLevel,
};

/// Effective volunteer hours needed before any points are granted.
const VOLUNTEER_THRESHOLD_HOURS: i64 = 200;

/// Score an achievement.
pub fn score(achievement: &Achievement) -> Decimal {
    let raw = match achievement {
        Achievement::Competition {
            level,
            rank,
            is_group,
            group_role,
        } => competition_base(*level, *rank) / Decimal::from(team_divisor(*is_group, *group_role)),
        Achievement::Paper { level, author } => paper_base(*level) * author_ratio(*author),
        Achievement::Patent => Decimal::from(2) * Decimal::new(8, 1),
        Achievement::Innovation => Decimal::ONE,
        Achievement::Volunteer {
            hours,
            is_large_event,
        } => volunteer_points(*hours, *is_large_event),
        Achievement::Cadre {
            role,
            supervisor_score,
        } => cadre_coefficient(*role) * Decimal::from(*supervisor_score) / Decimal::from(100),
        Achievement::Honor { level } => honor_points(*level),
    };

    raw.clamp(Decimal::ZERO, achievement.category().cap())
        .round_dp(2)
}

fn competition_base(level: CompetitionLevel, rank: AwardRank) -> Decimal {
    use AwardRank::{First, Second, Third};
    use CompetitionLevel::{NationalA, NationalAMinus, NationalAPlus, ProvincialA};

    let points = match (level, rank) {
        (NationalAPlus, First) => 30,
        (NationalAPlus, Second) => 15,
        (NationalAPlus, Third) => 10,
        (NationalA, First) => 15,
        (NationalA, Second) => 10,
        (NationalA, Third) => 5,
        (NationalAMinus, First) => 10,
        (NationalAMinus, Second) => 5,
        (NationalAMinus, Third) => 2,
        (ProvincialA, First) => 5,
        (ProvincialA, Second) => 2,
        _ => 0,
    };

    Decimal::from(points)
}

/// Individual entries and team leads keep a third, members a quarter,
/// everyone else in a team a fifth.
fn team_divisor(is_group: bool, role: Option<ContributorRole>) -> i64 {
    if !is_group {
        return 3;
    }

    match role {
        Some(ContributorRole::First) => 3,
        Some(ContributorRole::Second) => 4,
        _ => 5,
    }
}

fn paper_base(level: PaperLevel) -> Decimal {
    match level {
        PaperLevel::A => Decimal::from(10),
        PaperLevel::B => Decimal::from(6),
        PaperLevel::C => Decimal::ONE,
        PaperLevel::Unknown => Decimal::ZERO,
    }
}

fn author_ratio(author: ContributorRole) -> Decimal {
    match author {
        ContributorRole::Independent => Decimal::ONE,
        ContributorRole::First => Decimal::new(8, 1),
        ContributorRole::Second => Decimal::new(2, 1),
        ContributorRole::Unknown => Decimal::ZERO,
    }
}

fn volunteer_points(hours: Decimal, is_large_event: bool) -> Decimal {
    let effective = if is_large_event {
        hours / Decimal::from(2)
    } else {
        hours
    };

    let threshold = Decimal::from(VOLUNTEER_THRESHOLD_HOURS);
    if effective < threshold {
        return Decimal::ZERO;
    }

    let extra = (effective - threshold) / Decimal::from(2) * Decimal::new(5, 2);
    Decimal::ONE + extra
}

fn cadre_coefficient(role: CadreRole) -> Decimal {
    match role {
        CadreRole::Monitor => Decimal::ONE,
        CadreRole::Minister => Decimal::new(75, 2),
        CadreRole::Member => Decimal::new(5, 1),
        CadreRole::Unknown => Decimal::ZERO,
    }
}

fn honor_points(level: HonorLevel) -> Decimal {
    match level {
        HonorLevel::National => Decimal::from(2),
        HonorLevel::Provincial => Decimal::ONE,
        HonorLevel::School => Decimal::new(2, 1),
        HonorLevel::Unknown => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn competition(
        level: CompetitionLevel,
        rank: AwardRank,
        is_group: bool,
        group_role: Option<ContributorRole>,
    ) -> Achievement {
        Achievement::Competition {
            level,
            rank,
            is_group,
            group_role,
        }
    }

    #[test]
    fn test_individual_national_a_first_prize() {
        let achievement = competition(CompetitionLevel::NationalA, AwardRank::First, false, None);
        assert_eq!(score(&achievement), dec("5.0"));
    }

    #[test]
    fn test_team_roles_scale_competition_points() {
        let lead = competition(
            CompetitionLevel::NationalAPlus,
            AwardRank::First,
            true,
            Some(ContributorRole::First),
        );
        let member = competition(
            CompetitionLevel::NationalAPlus,
            AwardRank::First,
            true,
            Some(ContributorRole::Second),
        );
        let other = competition(CompetitionLevel::NationalAPlus, AwardRank::First, true, None);

        assert_eq!(score(&lead), dec("10"));
        assert_eq!(score(&member), dec("7.5"));
        assert_eq!(score(&other), dec("6"));
    }

    #[test]
    fn test_competition_rounds_to_two_decimals() {
        let achievement =
            competition(CompetitionLevel::NationalAMinus, AwardRank::First, false, None);
        assert_eq!(score(&achievement), dec("3.33"));
    }

    #[test]
    fn test_unlisted_competition_combination_scores_zero() {
        let provincial_third =
            competition(CompetitionLevel::ProvincialA, AwardRank::Third, false, None);
        let unknown_level = competition(CompetitionLevel::Unknown, AwardRank::First, false, None);

        assert_eq!(score(&provincial_third), Decimal::ZERO);
        assert_eq!(score(&unknown_level), Decimal::ZERO);
    }

    #[test]
    fn test_competition_never_exceeds_cap() {
        let levels = [
            CompetitionLevel::NationalAPlus,
            CompetitionLevel::NationalA,
            CompetitionLevel::NationalAMinus,
            CompetitionLevel::ProvincialA,
            CompetitionLevel::Unknown,
        ];
        let ranks = [AwardRank::First, AwardRank::Second, AwardRank::Third];
        let roles = [
            None,
            Some(ContributorRole::Independent),
            Some(ContributorRole::First),
            Some(ContributorRole::Second),
        ];

        for level in levels {
            for rank in ranks {
                for is_group in [false, true] {
                    for role in roles {
                        let value = score(&competition(level, rank, is_group, role));
                        assert!(value <= Decimal::from(15), "{level:?} {rank:?} -> {value}");
                        assert!(value >= Decimal::ZERO);
                    }
                }
            }
        }
    }

    #[test]
    fn test_paper_scales_by_authorship() {
        let first_a = Achievement::Paper {
            level: PaperLevel::A,
            author: ContributorRole::First,
        };
        let second_b = Achievement::Paper {
            level: PaperLevel::B,
            author: ContributorRole::Second,
        };
        let independent_c = Achievement::Paper {
            level: PaperLevel::C,
            author: ContributorRole::Independent,
        };
        let unknown_author = Achievement::Paper {
            level: PaperLevel::A,
            author: ContributorRole::Unknown,
        };

        assert_eq!(score(&first_a), dec("8"));
        assert_eq!(score(&second_b), dec("1.2"));
        assert_eq!(score(&independent_c), dec("1"));
        assert_eq!(score(&unknown_author), Decimal::ZERO);
    }

    #[test]
    fn test_fixed_scores() {
        assert_eq!(score(&Achievement::Patent), dec("1.6"));
        assert_eq!(score(&Achievement::Innovation), dec("1"));
    }

    #[test]
    fn test_volunteer_hours_above_threshold_are_capped() {
        let achievement = Achievement::Volunteer {
            hours: Decimal::from(250),
            is_large_event: false,
        };
        assert_eq!(score(&achievement), dec("1.0"));
    }

    #[test]
    fn test_volunteer_below_threshold_scores_zero() {
        let achievement = Achievement::Volunteer {
            hours: Decimal::from(199),
            is_large_event: false,
        };
        assert_eq!(score(&achievement), Decimal::ZERO);
    }

    #[test]
    fn test_large_event_hours_count_half() {
        let halved = Achievement::Volunteer {
            hours: Decimal::from(300),
            is_large_event: true,
        };
        let exactly_threshold = Achievement::Volunteer {
            hours: Decimal::from(400),
            is_large_event: true,
        };

        assert_eq!(score(&halved), Decimal::ZERO);
        assert_eq!(score(&exactly_threshold), Decimal::ONE);
    }

    #[test]
    fn test_volunteer_never_exceeds_one() {
        for hours in [0, 150, 200, 201, 1_000, 100_000] {
            for is_large_event in [false, true] {
                let value = score(&Achievement::Volunteer {
                    hours: Decimal::from(hours),
                    is_large_event,
                });
                assert!(value <= Decimal::ONE);
            }
        }
    }

    #[test]
    fn test_cadre_scales_supervisor_score() {
        let monitor = Achievement::Cadre {
            role: CadreRole::Monitor,
            supervisor_score: 90,
        };
        let minister = Achievement::Cadre {
            role: CadreRole::Minister,
            supervisor_score: 80,
        };
        let member = Achievement::Cadre {
            role: CadreRole::Member,
            supervisor_score: 85,
        };
        let unscored = Achievement::Cadre {
            role: CadreRole::Monitor,
            supervisor_score: 0,
        };

        assert_eq!(score(&monitor), dec("0.9"));
        assert_eq!(score(&minister), dec("0.6"));
        assert_eq!(score(&member), dec("0.42"));
        assert_eq!(score(&unscored), Decimal::ZERO);
    }

    #[test]
    fn test_cadre_never_exceeds_two() {
        let achievement = Achievement::Cadre {
            role: CadreRole::Monitor,
            supervisor_score: 1_000,
        };
        assert_eq!(score(&achievement), dec("2"));
    }

    #[test]
    fn test_honor_levels() {
        let national = Achievement::Honor {
            level: HonorLevel::National,
        };
        let school = Achievement::Honor {
            level: HonorLevel::School,
        };
        let unknown = Achievement::Honor {
            level: HonorLevel::Unknown,
        };

        assert_eq!(score(&national), dec("2"));
        assert_eq!(score(&school), dec("0.2"));
        assert_eq!(score(&unknown), Decimal::ZERO);
    }
}
