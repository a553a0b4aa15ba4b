// Match enrichment: fetch, normalize, compute, assemble

use std::sync::Arc;

use insight_models::{
    EnrichedMatch, InsightError, MapWinrate, MapWinrateHints, MatchRecord, MatchSummary, Result,
    TeamPair, TeamStats, UpstreamError,
};
use tracing::{debug, info, warn};

use crate::form::{compute_form, DEFAULT_FORM_TAKE};
use crate::matchup::{
    compute_head_to_head, extract_lineups, extract_map_winrate, extract_odds, DEFAULT_H2H_LIMIT,
};
use crate::provider::UpstreamProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentLimits {
    pub form_limit: usize,
    pub h2h_limit: usize,
}

impl Default for EnrichmentLimits {
    fn default() -> Self {
        Self {
            form_limit: DEFAULT_FORM_TAKE,
            h2h_limit: DEFAULT_H2H_LIMIT,
        }
    }
}

impl EnrichmentLimits {
    /// Bound both limits to `1..=max`.
    pub fn clamped(self, max: usize) -> Self {
        let max = max.max(1);
        Self {
            form_limit: self.form_limit.clamp(1, max),
            h2h_limit: self.h2h_limit.clamp(1, max),
        }
    }
}

/// Outcome of the optional stats fetch for one team.
#[derive(Debug)]
enum StatsOutcome {
    Fetched(TeamStats),
    NoSlug,
    Failed,
}

impl StatsOutcome {
    fn map_winrate(&self) -> Option<MapWinrate> {
        match self {
            StatsOutcome::Fetched(stats) => extract_map_winrate(&stats.0),
            StatsOutcome::NoSlug | StatsOutcome::Failed => None,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            StatsOutcome::Fetched(_) => "no map breakdown in team stats",
            StatsOutcome::NoSlug => "team slug unknown, stats not requested",
            StatsOutcome::Failed => "team stats request failed",
        }
    }
}

/// Resolved identity of both teams of the match being enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Participants {
    team1_id: i64,
    team2_id: i64,
    team1_slug: Option<String>,
    team2_slug: Option<String>,
}

impl Participants {
    fn resolve(record: &MatchRecord) -> Result<Self> {
        let missing = |field: &str| InsightError::MissingData {
            match_ref: record.reference(),
            field: field.to_string(),
        };

        Ok(Self {
            team1_id: record.team1_id().ok_or_else(|| missing("team1 id"))?,
            team2_id: record.team2_id().ok_or_else(|| missing("team2 id"))?,
            team1_slug: record.team1_slug().map(str::to_string),
            team2_slug: record.team2_slug().map(str::to_string),
        })
    }
}

/// Combines upstream calls and the pure form/matchup calculators into one
/// enriched match document.
pub struct EnrichmentService {
    provider: Arc<dyn UpstreamProvider>,
}

impl EnrichmentService {
    pub fn new(provider: Arc<dyn UpstreamProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn UpstreamProvider> {
        &self.provider
    }

    pub async fn enrich(&self, identifier: &str, limits: EnrichmentLimits) -> Result<EnrichedMatch> {
        debug!("🔎 Enriching match {}", identifier);

        let record = self.provider.fetch_match_details(identifier).await?;
        let teams = Participants::resolve(&record)?;

        let (history1, history2, stats1, stats2) = tokio::try_join!(
            self.provider.fetch_team_match_history(teams.team1_id),
            self.provider.fetch_team_match_history(teams.team2_id),
            self.optional_stats(teams.team1_slug.as_deref()),
            self.optional_stats(teams.team2_slug.as_deref()),
        )?;

        let form = TeamPair {
            team1: compute_form(teams.team1_id, &history1, limits.form_limit),
            team2: compute_form(teams.team2_id, &history2, limits.form_limit),
        };
        let h2h = compute_head_to_head(teams.team1_id, teams.team2_id, &history1, limits.h2h_limit);
        let map_winrate = map_winrate_hints(&stats1, &stats2);

        info!(
            "🎯 Enriched {}: form {}-{} / {}-{}, h2h {} matches",
            record.reference(),
            form.team1.wins,
            form.team1.losses,
            form.team2.wins,
            form.team2.losses,
            h2h.sample_size
        );

        Ok(EnrichedMatch {
            summary: summarize(&record),
            odds: extract_odds(&record),
            lineups: extract_lineups(&record),
            form,
            h2h,
            map_winrate,
        })
    }

    /// Stats are optional: a missing slug skips the call and a failed call
    /// degrades to an absent result. Never returns `Err`.
    async fn optional_stats(&self, slug: Option<&str>) -> std::result::Result<StatsOutcome, UpstreamError> {
        let Some(slug) = slug else {
            return Ok(StatsOutcome::NoSlug);
        };

        match self.provider.fetch_team_stats(slug).await {
            Ok(stats) => Ok(StatsOutcome::Fetched(stats)),
            Err(e) => {
                warn!("📉 Team stats for {} unavailable: {}", slug, e);
                Ok(StatsOutcome::Failed)
            }
        }
    }
}

fn map_winrate_hints(team1: &StatsOutcome, team2: &StatsOutcome) -> MapWinrateHints {
    let hints = MapWinrateHints {
        team1: team1.map_winrate(),
        team2: team2.map_winrate(),
        note: None,
    };

    let notes: Vec<String> = [("team1", team1, &hints.team1), ("team2", team2, &hints.team2)]
        .into_iter()
        .filter(|(_, _, hint)| hint.is_none())
        .map(|(side, outcome, _)| format!("{side}: {}", outcome.reason()))
        .collect();

    MapWinrateHints {
        note: (!notes.is_empty()).then(|| notes.join("; ")),
        ..hints
    }
}

fn summarize(record: &MatchRecord) -> MatchSummary {
    let mut team1 = record.team1.clone().unwrap_or_default();
    let mut team2 = record.team2.clone().unwrap_or_default();
    team1.id = record.team1_id();
    team2.id = record.team2_id();

    MatchSummary {
        id: record.id,
        slug: record.slug.clone(),
        status: record.status.clone(),
        parsed_status: record.parsed_status.clone(),
        start_date: record.start_date.clone(),
        bo_type: record.bo_type,
        tournament: record.tournament.clone(),
        team1,
        team2,
        team1_score: record.team1_score,
        team2_score: record.team2_score,
        finished: record.is_finished(),
        winner_id: record.winner_id(),
        streams: record.streams.clone().unwrap_or_default(),
    }
}
