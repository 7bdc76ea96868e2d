//! DTOs for the analytics report endpoint.

use serde::Serialize;

use crate::application::services::{AnalyticsReport, ClubMetric, UserCensus};

/// One entry in a club ranking chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubMetricDto {
    pub key: String,
    pub count: i64,
    pub display_name: String,
}

impl From<ClubMetric> for ClubMetricDto {
    fn from(metric: ClubMetric) -> Self {
        Self {
            key: metric.key,
            count: metric.count,
            display_name: metric.display_name,
        }
    }
}

/// Account counts per role bucket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCensusDto {
    pub students: i64,
    pub users: i64,
    pub admins: i64,
    pub super_admins: i64,
}

impl From<UserCensus> for UserCensusDto {
    fn from(census: UserCensus) -> Self {
        Self {
            students: census.students,
            users: census.users,
            admins: census.admins,
            super_admins: census.super_admins,
        }
    }
}

/// The full analytics snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub club_activity: Vec<ClubMetricDto>,
    pub popularity_ranking: Vec<ClubMetricDto>,
    pub user_census: UserCensusDto,
}

impl From<AnalyticsReport> for AnalyticsDto {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            club_activity: report.club_activity.into_iter().map(Into::into).collect(),
            popularity_ranking: report
                .popularity_ranking
                .into_iter()
                .map(Into::into)
                .collect(),
            user_census: report.user_census.into(),
        }
    }
}
