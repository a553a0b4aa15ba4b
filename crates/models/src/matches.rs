use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// Status string the provider uses for completed matches.
pub const FINISHED_STATUS: &str = "finished";

/// Raw match record as delivered by the upstream provider.
///
/// Every field is optional. Values of an unexpected JSON type are dropped
/// to `None` during deserialization so a single odd field never rejects
/// the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub parsed_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub bo_type: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub tournament: Option<TournamentSummary>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team1: Option<TeamSummary>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team2: Option<TeamSummary>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team1_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team2_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub bet_updates: Option<serde_json::Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::non_empty", skip_serializing_if = "Option::is_none")]
    pub lineups: Option<Value>,
    #[serde(default, deserialize_with = "lenient::non_empty", skip_serializing_if = "Option::is_none")]
    pub players: Option<Value>,
    #[serde(default, deserialize_with = "lenient::non_empty", skip_serializing_if = "Option::is_none")]
    pub rosters: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummary {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub rank: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentSummary {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub slug: Option<String>,
}

/// Opaque team statistics payload. Its layout differs between provider
/// versions, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TeamStats(pub Value);

/// Which side of a match a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Team1,
    Team2,
}

impl MatchRecord {
    /// Parse a record out of an arbitrary JSON value. Non-object input
    /// yields an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// The one finished-match predicate: `status` or `parsed_status`
    /// equals "finished", ignoring case.
    pub fn is_finished(&self) -> bool {
        [&self.status, &self.parsed_status]
            .into_iter()
            .flatten()
            .any(|s| s.eq_ignore_ascii_case(FINISHED_STATUS))
    }

    pub fn team1_id(&self) -> Option<i64> {
        self.team1_id
            .or_else(|| self.team1.as_ref().and_then(|t| t.id))
    }

    pub fn team2_id(&self) -> Option<i64> {
        self.team2_id
            .or_else(|| self.team2.as_ref().and_then(|t| t.id))
    }

    pub fn team1_slug(&self) -> Option<&str> {
        self.team1
            .as_ref()
            .and_then(|t| t.slug.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn team2_slug(&self) -> Option<&str> {
        self.team2
            .as_ref()
            .and_then(|t| t.slug.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn side_of(&self, team_id: i64) -> Option<Side> {
        if self.team1_id() == Some(team_id) {
            Some(Side::Team1)
        } else if self.team2_id() == Some(team_id) {
            Some(Side::Team2)
        } else {
            None
        }
    }

    /// Id of the other team in this match, if `team_id` took part and the
    /// other id is known.
    pub fn opponent_of(&self, team_id: i64) -> Option<i64> {
        match self.side_of(team_id)? {
            Side::Team1 => self.team2_id(),
            Side::Team2 => self.team1_id(),
        }
    }

    /// Winner inferred from the final score. Needs both team ids and both
    /// scores; a draw or any missing piece means no winner.
    pub fn winner_id(&self) -> Option<i64> {
        let (team1, team2) = (self.team1_id()?, self.team2_id()?);
        let (score1, score2) = (self.team1_score?, self.team2_score?);
        match score1.cmp(&score2) {
            std::cmp::Ordering::Greater => Some(team1),
            std::cmp::Ordering::Less => Some(team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Scores as (own, opponent) from the perspective of `team_id`.
    pub fn scores_for(&self, team_id: i64) -> (Option<i64>, Option<i64>) {
        match self.side_of(team_id) {
            Some(Side::Team2) => (self.team2_score, self.team1_score),
            _ => (self.team1_score, self.team2_score),
        }
    }

    /// Human readable reference used in logs and error messages.
    pub fn reference(&self) -> String {
        match (&self.slug, self.id) {
            (Some(slug), _) => slug.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "<unknown>".to_string(),
        }
    }
}
