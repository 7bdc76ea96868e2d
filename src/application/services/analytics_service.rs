//! Analytics report assembly.
//!
//! Produces a single snapshot of three independent metrics over the current
//! event and user data. The metrics have no data dependency on each other,
//! so their repository reads are issued concurrently and joined before the
//! report is assembled. Every call re-scans the full collections; the
//! expected table sizes for a single campus make that cheap.

use std::sync::Arc;

use crate::domain::repositories::{ClubEventCount, EventRepository, RoleCount, UserRepository};
use crate::domain::entities::Role;
use crate::error::AppError;

/// One entry in a club ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubMetric {
    /// Normalized key: display name lowercased, spaces replaced with `_`.
    pub key: String,
    pub count: i64,
    pub display_name: String,
}

/// Account counts per role bucket.
///
/// `students` and `users` are synonyms by current policy: both report the
/// number of accounts with the `user` role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserCensus {
    pub students: i64,
    pub users: i64,
    pub admins: i64,
    pub super_admins: i64,
}

/// The assembled analytics snapshot.
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    /// Clubs ranked by raw event count, descending.
    pub club_activity: Vec<ClubMetric>,
    /// Clubs ranked by the engagement heuristic `round(count * 0.7)`,
    /// descending.
    pub popularity_ranking: Vec<ClubMetric>,
    pub user_census: UserCensus,
}

/// Service computing the analytics report.
///
/// Read-only: fails only if a repository read fails.
pub struct AnalyticsService<E: EventRepository, U: UserRepository> {
    event_repository: Arc<E>,
    user_repository: Arc<U>,
}

impl<E: EventRepository, U: UserRepository> AnalyticsService<E, U> {
    /// Creates a new analytics service.
    pub fn new(event_repository: Arc<E>, user_repository: Arc<U>) -> Self {
        Self {
            event_repository,
            user_repository,
        }
    }

    /// Computes the full report from current data.
    ///
    /// The three underlying reads run concurrently. The two club rankings
    /// intentionally issue separate grouping queries so each metric stays an
    /// independent view of the data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any repository read fails.
    pub async fn get_analytics(&self) -> Result<AnalyticsReport, AppError> {
        let (activity_counts, popularity_counts, role_counts) = tokio::try_join!(
            self.event_repository.count_by_club(),
            self.event_repository.count_by_club(),
            self.user_repository.count_by_role(),
        )?;

        Ok(AnalyticsReport {
            club_activity: rank_clubs(activity_counts, |events| events),
            popularity_ranking: rank_clubs(popularity_counts, popularity_score),
            user_census: build_census(&role_counts),
        })
    }
}

/// Engagement heuristic: event count scaled by 0.7.
///
/// Uses `f64::round`, which rounds half away from zero: a count of 5 yields
/// 3.5 and rounds up to 4. There is no like/favorite entity behind this
/// number; it is purely derived from event counts.
fn popularity_score(events: i64) -> i64 {
    (events as f64 * 0.7).round() as i64
}

/// Maps per-club tallies into ranking entries sorted descending by value.
fn rank_clubs(counts: Vec<ClubEventCount>, score: impl Fn(i64) -> i64) -> Vec<ClubMetric> {
    let mut ranking: Vec<ClubMetric> = counts
        .into_iter()
        .map(|c| ClubMetric {
            key: normalize_key(&c.club_name),
            count: score(c.event_count),
            display_name: c.club_name,
        })
        .collect();

    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// Derives the chart key from a club's display name.
fn normalize_key(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "_")
}

/// Folds role tallies into the fixed census buckets.
///
/// Roles absent from the data contribute zero; the role column is
/// constrained to the three enumerated values, so nothing else can appear.
fn build_census(role_counts: &[RoleCount]) -> UserCensus {
    let mut census = UserCensus::default();

    for rc in role_counts {
        match rc.role {
            Role::User => {
                census.users = rc.count;
                census.students = rc.count;
            }
            Role::Admin => census.admins = rc.count,
            Role::SuperAdmin => census.super_admins = rc.count,
        }
    }

    census
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockEventRepository, MockUserRepository};

    fn club_count(club_id: i64, name: &str, events: i64) -> ClubEventCount {
        ClubEventCount {
            club_id,
            club_name: name.to_string(),
            event_count: events,
        }
    }

    fn service_with(
        counts: Vec<ClubEventCount>,
        roles: Vec<RoleCount>,
    ) -> AnalyticsService<MockEventRepository, MockUserRepository> {
        let mut event_repo = MockEventRepository::new();
        let mut user_repo = MockUserRepository::new();

        // One grouping query per ranking.
        event_repo
            .expect_count_by_club()
            .times(2)
            .returning(move || Ok(counts.clone()));
        user_repo
            .expect_count_by_role()
            .times(1)
            .returning(move || Ok(roles.clone()));

        AnalyticsService::new(Arc::new(event_repo), Arc::new(user_repo))
    }

    #[test]
    fn test_popularity_score_rounds_half_away_from_zero() {
        // 5 * 0.7 = 3.5 -> 4 with f64::round
        assert_eq!(popularity_score(5), 4);
        assert_eq!(popularity_score(10), 7);
        assert_eq!(popularity_score(1), 1); // 0.7 -> 1
        assert_eq!(popularity_score(2), 1); // 1.4 -> 1
        assert_eq!(popularity_score(3), 2); // 2.1 -> 2
        assert_eq!(popularity_score(4), 3); // 2.8 -> 3
        assert_eq!(popularity_score(0), 0);
    }

    #[test]
    fn test_normalize_key_lowercases_and_underscores() {
        assert_eq!(normalize_key("Chess Club"), "chess_club");
        assert_eq!(normalize_key("Robotics"), "robotics");
        assert_eq!(normalize_key("Model United Nations"), "model_united_nations");
    }

    #[tokio::test]
    async fn test_club_activity_sorted_descending_and_sums_to_total() {
        let service = service_with(
            vec![
                club_count(1, "Chess Club", 2),
                club_count(2, "Robotics", 7),
                club_count(3, "Debate", 4),
            ],
            vec![],
        );

        let report = service.get_analytics().await.unwrap();

        let counts: Vec<i64> = report.club_activity.iter().map(|m| m.count).collect();
        assert_eq!(counts, vec![7, 4, 2]);
        assert_eq!(counts.iter().sum::<i64>(), 13);
        assert_eq!(report.club_activity[0].display_name, "Robotics");
        assert_eq!(report.club_activity[0].key, "robotics");
        assert_eq!(report.club_activity[2].key, "chess_club");
    }

    #[tokio::test]
    async fn test_popularity_ranking_scales_counts() {
        let service = service_with(
            vec![club_count(1, "Chess Club", 10), club_count(2, "Debate", 5)],
            vec![],
        );

        let report = service.get_analytics().await.unwrap();

        assert_eq!(report.popularity_ranking[0].count, 7); // 10 * 0.7
        assert_eq!(report.popularity_ranking[1].count, 4); // 5 * 0.7 = 3.5 -> 4
    }

    #[tokio::test]
    async fn test_zero_event_clubs_are_absent() {
        // The repository inner join never reports zero-event clubs; the
        // ranking reflects whatever the join produced, nothing more.
        let service = service_with(vec![club_count(1, "Chess Club", 1)], vec![]);

        let report = service.get_analytics().await.unwrap();

        assert_eq!(report.club_activity.len(), 1);
        assert_eq!(report.popularity_ranking.len(), 1);
    }

    #[tokio::test]
    async fn test_census_maps_roles_and_mirrors_students() {
        let service = service_with(
            vec![],
            vec![
                RoleCount {
                    role: Role::User,
                    count: 12,
                },
                RoleCount {
                    role: Role::Admin,
                    count: 3,
                },
                RoleCount {
                    role: Role::SuperAdmin,
                    count: 1,
                },
            ],
        );

        let report = service.get_analytics().await.unwrap();
        let census = report.user_census;

        assert_eq!(census.users, 12);
        assert_eq!(census.students, census.users);
        assert_eq!(census.admins, 3);
        assert_eq!(census.super_admins, 1);
        assert_eq!(
            census.users + census.admins + census.super_admins,
            16,
            "buckets sum to total user count"
        );
    }

    #[tokio::test]
    async fn test_census_defaults_absent_roles_to_zero() {
        let service = service_with(
            vec![],
            vec![RoleCount {
                role: Role::Admin,
                count: 2,
            }],
        );

        let report = service.get_analytics().await.unwrap();
        let census = report.user_census;

        assert_eq!(census.users, 0);
        assert_eq!(census.students, 0);
        assert_eq!(census.admins, 2);
        assert_eq!(census.super_admins, 0);
    }

    #[tokio::test]
    async fn test_empty_data_produces_empty_report() {
        let service = service_with(vec![], vec![]);

        let report = service.get_analytics().await.unwrap();

        assert!(report.club_activity.is_empty());
        assert!(report.popularity_ranking.is_empty());
        assert_eq!(report.user_census, UserCensus::default());
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut event_repo = MockEventRepository::new();
        let mut user_repo = MockUserRepository::new();

        event_repo
            .expect_count_by_club()
            .returning(|| Err(AppError::internal("Database error", serde_json::json!({}))));
        user_repo
            .expect_count_by_role()
            .returning(|| Ok(vec![]));

        let service = AnalyticsService::new(Arc::new(event_repo), Arc::new(user_repo));

        let result = service.get_analytics().await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
