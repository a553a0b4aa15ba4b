// Recent form calculation

use insight_models::{FormEntry, FormResult, MatchRecord};

pub const DEFAULT_FORM_TAKE: usize = 10;

/// Summarize a team's recent form.
///
/// `history` is expected most-recent-first. Only finished matches are
/// considered and `take` bounds how many of those are looked at. Matches
/// whose winner cannot be inferred, or that `team_id` did not play, are
/// skipped entirely.
pub fn compute_form(team_id: i64, history: &[MatchRecord], take: usize) -> FormResult {
    let mut result = FormResult::default();

    for record in history.iter().filter(|m| m.is_finished()).take(take) {
        if record.side_of(team_id).is_none() {
            continue;
        }
        let Some(winner) = record.winner_id() else {
            continue;
        };

        let win = winner == team_id;
        if win {
            result.wins += 1;
        } else {
            result.losses += 1;
        }

        let (team_score, opponent_score) = record.scores_for(team_id);
        result.recent.push(FormEntry {
            id: record.id,
            slug: record.slug.clone(),
            date: record.start_date.clone(),
            opponent_id: record.opponent_of(team_id),
            win,
            team_score,
            opponent_score,
        });
    }

    result.sample_size = result.recent.len();
    result.streak = streak(&result.recent);
    result
}

/// Length of the leading run of identical outcomes, signed by outcome.
fn streak(recent: &[FormEntry]) -> i32 {
    let mut streak = 0i32;
    for entry in recent {
        match (streak.signum(), entry.win) {
            (0, true) | (1, true) => streak += 1,
            (0, false) | (-1, false) => streak -= 1,
            _ => break,
        }
    }
    streak
}
