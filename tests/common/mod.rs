// Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use insight_models::{MatchRecord, TeamStats, UpstreamError};
use insight_services::UpstreamProvider;
use serde_json::{json, Value};

/// In-memory provider. Unknown keys answer with HTTP 404 and every call is
/// recorded so tests can assert which requests were made.
#[derive(Default)]
pub struct FakeProvider {
    pub matches: HashMap<String, Value>,
    pub histories: HashMap<i64, Vec<Value>>,
    pub stats: HashMap<String, Value>,
    pub failing_histories: HashSet<i64>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn with_match(mut self, identifier: &str, record: Value) -> Self {
        self.matches.insert(identifier.to_string(), record);
        self
    }

    pub fn with_history(mut self, team_id: i64, history: Vec<Value>) -> Self {
        self.histories.insert(team_id, history);
        self
    }

    pub fn with_stats(mut self, slug: &str, stats: Value) -> Self {
        self.stats.insert(slug.to_string(), stats);
        self
    }

    pub fn with_failing_history(mut self, team_id: i64) -> Self {
        self.failing_histories.insert(team_id);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(url: String) -> UpstreamError {
    UpstreamError::Status { url, status: 404 }
}

#[async_trait]
impl UpstreamProvider for FakeProvider {
    async fn fetch_match_details(&self, identifier: &str) -> Result<MatchRecord, UpstreamError> {
        let url = format!("matches/{identifier}");
        self.record_call(url.clone());
        self.matches
            .get(identifier)
            .cloned()
            .map(MatchRecord::from_value)
            .ok_or_else(|| not_found(url))
    }

    async fn fetch_team_match_history(&self, team_id: i64) -> Result<Vec<MatchRecord>, UpstreamError> {
        let url = format!("teams/{team_id}/matches");
        self.record_call(url.clone());
        if self.failing_histories.contains(&team_id) {
            return Err(UpstreamError::Transport {
                url,
                reason: "connection reset".to_string(),
            });
        }
        Ok(self
            .histories
            .get(&team_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(MatchRecord::from_value)
            .collect())
    }

    async fn fetch_team_stats(&self, team_slug: &str) -> Result<TeamStats, UpstreamError> {
        let url = format!("teams/{team_slug}/stats");
        self.record_call(url.clone());
        self.stats
            .get(team_slug)
            .cloned()
            .map(TeamStats)
            .ok_or_else(|| not_found(url))
    }
}

pub const MATCH_SLUG: &str = "alpha-vs-bravo-18-10-2026";

/// Finished 2-0 match between team 1 (alpha) and team 2 (bravo).
pub fn match_record(team2_slug: Option<&str>) -> Value {
    json!({
        "id": 500,
        "slug": MATCH_SLUG,
        "status": "finished",
        "start_date": "2026-10-18T17:00:00Z",
        "bo_type": 3,
        "tournament": { "id": 77, "name": "Autumn Cup", "slug": "autumn-cup" },
        "team1": { "id": 1, "name": "Alpha", "slug": "alpha", "rank": 3 },
        "team2": { "id": 2, "name": "Bravo", "slug": team2_slug, "rank": 8 },
        "team1_id": 1,
        "team2_id": 2,
        "team1_score": 2,
        "team2_score": 0,
        "bet_updates": {
            "provider": "ggbet",
            "markets_count": 12,
            "team_1": { "coeff": 1.55 },
            "team_2": { "coeff": 2.35 },
            "path": "/cs2/alpha-vs-bravo"
        },
        "streams": [{ "platform": "twitch", "url": "https://twitch.tv/autumncup" }],
        "rosters": [{ "team_id": 1, "players": ["a1", "a2"] }]
    })
}

pub fn history_entry() -> Value {
    json!({
        "id": 10,
        "team1_id": 1,
        "team2_id": 2,
        "team1_score": 2,
        "team2_score": 0,
        "status": "finished"
    })
}

pub fn provider_for_match(team2_slug: Option<&str>) -> FakeProvider {
    FakeProvider::default()
        .with_match(MATCH_SLUG, match_record(team2_slug))
        .with_history(1, vec![history_entry()])
        .with_history(2, vec![history_entry()])
        .with_stats("alpha", json!({ "general_stats": { "maps": { "mirage": 0.6 } } }))
        .with_stats("bravo", json!({ "map_stats": [{ "map": "nuke", "winrate": 0.55 }] }))
}

pub fn shared(provider: FakeProvider) -> Arc<FakeProvider> {
    Arc::new(provider)
}
