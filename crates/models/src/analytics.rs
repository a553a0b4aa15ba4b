use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::matches::{MatchRecord, TeamSummary, TournamentSummary};

/// One finished match in a team's recent form, seen from that team's side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormEntry {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub opponent_id: Option<i64>,
    pub win: bool,
    pub team_score: Option<i64>,
    pub opponent_score: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormResult {
    pub sample_size: usize,
    pub wins: u32,
    pub losses: u32,
    /// Positive for a winning run, negative for a losing run.
    pub streak: i32,
    /// Most recent first.
    pub recent: Vec<FormEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct H2HEntry {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub team1_score: Option<i64>,
    pub team2_score: Option<i64>,
    pub winner_id: Option<i64>,
}

impl From<&MatchRecord> for H2HEntry {
    fn from(record: &MatchRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug.clone(),
            date: record.start_date.clone(),
            team1_id: record.team1_id(),
            team2_id: record.team2_id(),
            team1_score: record.team1_score,
            team2_score: record.team2_score,
            winner_id: record.winner_id(),
        }
    }
}

/// Head-to-head record. `team1`/`team2` follow the enriched match's sides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct H2HResult {
    pub sample_size: usize,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub matches: Vec<H2HEntry>,
}

/// Betting block passed through from the provider untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OddsBlock {
    pub provider: Option<Value>,
    pub markets_count: Option<Value>,
    pub team1: Option<Value>,
    pub team2: Option<Value>,
    pub path: Option<Value>,
}

/// Roster data together with the record field it was found under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupBlock {
    pub source: String,
    pub data: Value,
}

/// Map breakdown found in a stats blob, serialized as `{alias: data}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapWinrate {
    pub alias: String,
    pub data: Value,
}

impl Serialize for MapWinrate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.alias, &self.data)?;
        map.end()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MapWinrateHints {
    pub team1: Option<MapWinrate>,
    pub team2: Option<MapWinrate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamPair<T> {
    pub team1: T,
    pub team2: T,
}

/// Trimmed view of the enriched match.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchSummary {
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub parsed_status: Option<String>,
    pub start_date: Option<String>,
    pub bo_type: Option<i64>,
    pub tournament: Option<TournamentSummary>,
    pub team1: TeamSummary,
    pub team2: TeamSummary,
    pub team1_score: Option<i64>,
    pub team2_score: Option<i64>,
    pub finished: bool,
    pub winner_id: Option<i64>,
    pub streams: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedMatch {
    #[serde(rename = "match")]
    pub summary: MatchSummary,
    pub odds: Option<OddsBlock>,
    pub lineups: Option<LineupBlock>,
    pub form: TeamPair<FormResult>,
    pub h2h: H2HResult,
    pub map_winrate: MapWinrateHints,
}
