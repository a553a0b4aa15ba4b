// Head-to-head, odds, lineup and map winrate extraction

use insight_models::lenient::is_empty;
use insight_models::{H2HEntry, H2HResult, LineupBlock, MapWinrate, MatchRecord, OddsBlock};
use serde_json::Value;

pub const DEFAULT_H2H_LIMIT: usize = 10;

/// Stats sub-blocks searched after the blob root, in priority order.
pub const STATS_CONTAINERS: [&str; 2] = ["general_stats", "stats"];

/// Field names a map breakdown may appear under, in priority order.
pub const MAP_WINRATE_ALIASES: [&str; 4] = ["maps", "map_stats", "maps_stats", "map_winrates"];

/// Collect finished matches from `team_a_history` played against `team_b`.
///
/// Scanning stops once `limit` matches qualify, so which matches are
/// included depends on the order of the history.
pub fn compute_head_to_head(
    team_a: i64,
    team_b: i64,
    team_a_history: &[MatchRecord],
    limit: usize,
) -> H2HResult {
    let mut result = H2HResult::default();
    if limit == 0 {
        return result;
    }

    for record in team_a_history {
        if !record.is_finished() || record.opponent_of(team_a) != Some(team_b) {
            continue;
        }

        match record.winner_id() {
            Some(winner) if winner == team_a => result.team1_wins += 1,
            Some(winner) if winner == team_b => result.team2_wins += 1,
            _ => {}
        }
        result.matches.push(H2HEntry::from(record));

        if result.matches.len() >= limit {
            break;
        }
    }

    result.sample_size = result.matches.len();
    result
}

/// Pass through the provider's betting block, if the record has one.
pub fn extract_odds(record: &MatchRecord) -> Option<OddsBlock> {
    let bet = record.bet_updates.as_ref()?;
    Some(OddsBlock {
        provider: bet.get("provider").cloned(),
        markets_count: bet.get("markets_count").cloned(),
        team1: bet.get("team_1").cloned(),
        team2: bet.get("team_2").cloned(),
        path: bet.get("path").cloned(),
    })
}

/// First non-empty roster field, checked as `lineups`, `players`, `rosters`.
pub fn extract_lineups(record: &MatchRecord) -> Option<LineupBlock> {
    [
        ("lineups", &record.lineups),
        ("players", &record.players),
        ("rosters", &record.rosters),
    ]
    .into_iter()
    .find_map(|(source, field)| {
        field
            .as_ref()
            .filter(|v| !is_empty(v))
            .map(|data| LineupBlock {
                source: source.to_string(),
                data: data.clone(),
            })
    })
}

/// Best-effort lookup of a per-map breakdown in a team stats blob.
///
/// Containers are tried in order (root, then [`STATS_CONTAINERS`]) and
/// within each container the [`MAP_WINRATE_ALIASES`] in order. Anything
/// that is not a JSON object yields `None`.
pub fn extract_map_winrate(stats: &Value) -> Option<MapWinrate> {
    let root = stats.as_object()?;

    let containers = std::iter::once(root).chain(
        STATS_CONTAINERS
            .iter()
            .filter_map(|name| root.get(*name).and_then(Value::as_object)),
    );

    for container in containers {
        for alias in MAP_WINRATE_ALIASES {
            if let Some(data) = container.get(alias).filter(|v| !is_empty(v)) {
                return Some(MapWinrate {
                    alias: alias.to_string(),
                    data: data.clone(),
                });
            }
        }
    }

    None
}
