//! Whitelisted passthrough operations.
//!
//! Each operation name maps to a typed parameter struct and a fixed call on
//! the provider or the enrichment service.

use std::fmt;
use std::str::FromStr;

use insight_models::{InsightError, Result};
use insight_services::{EnrichmentLimits, EnrichmentService};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    GetMatchDetails,
    GetTeamMatches,
    GetTeamStats,
    EnrichMatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationSpec {
    pub name: Operation,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown operation: {}", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

#[derive(Debug, Deserialize)]
struct MatchParams {
    identifier: String,
}

#[derive(Debug, Deserialize)]
struct TeamMatchesParams {
    team_id: i64,
}

#[derive(Debug, Deserialize)]
struct TeamStatsParams {
    team_slug: String,
}

#[derive(Debug, Deserialize)]
struct EnrichParams {
    identifier: String,
    form_limit: Option<usize>,
    h2h_limit: Option<usize>,
}

const fn param(name: &'static str, kind: &'static str, required: bool) -> ParamSpec {
    ParamSpec { name, kind, required }
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::GetMatchDetails,
        Operation::GetTeamMatches,
        Operation::GetTeamStats,
        Operation::EnrichMatch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetMatchDetails => "get_match_details",
            Operation::GetTeamMatches => "get_team_matches",
            Operation::GetTeamStats => "get_team_stats",
            Operation::EnrichMatch => "enrich_match",
        }
    }

    pub fn spec(self) -> OperationSpec {
        let params = match self {
            Operation::GetMatchDetails => vec![param("identifier", "string", true)],
            Operation::GetTeamMatches => vec![param("team_id", "integer", true)],
            Operation::GetTeamStats => vec![param("team_slug", "string", true)],
            Operation::EnrichMatch => vec![
                param("identifier", "string", true),
                param("form_limit", "integer", false),
                param("h2h_limit", "integer", false),
            ],
        };
        OperationSpec { name: self, params }
    }

    /// Decode `params` for this operation and run it. Caller supplied
    /// limits are bounded by `max_limit`.
    pub async fn call(
        self,
        service: &EnrichmentService,
        params: Value,
        defaults: EnrichmentLimits,
        max_limit: usize,
    ) -> Result<Value> {
        let provider = service.provider();
        let value = match self {
            Operation::GetMatchDetails => {
                let p: MatchParams = serde_json::from_value(params)?;
                serde_json::to_value(provider.fetch_match_details(&p.identifier).await?)?
            }
            Operation::GetTeamMatches => {
                let p: TeamMatchesParams = serde_json::from_value(params)?;
                serde_json::to_value(provider.fetch_team_match_history(p.team_id).await?)?
            }
            Operation::GetTeamStats => {
                let p: TeamStatsParams = serde_json::from_value(params)?;
                serde_json::to_value(provider.fetch_team_stats(&p.team_slug).await?)?
            }
            Operation::EnrichMatch => {
                let p: EnrichParams = serde_json::from_value(params)?;
                let limits = EnrichmentLimits {
                    form_limit: p.form_limit.unwrap_or(defaults.form_limit),
                    h2h_limit: p.h2h_limit.unwrap_or(defaults.h2h_limit),
                }
                .clamped(max_limit);
                serde_json::to_value(service.enrich(&p.identifier, limits).await?)?
            }
        };
        Ok(value)
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Whether an error came from decoding caller supplied parameters.
pub fn is_param_error(error: &InsightError) -> bool {
    matches!(error, InsightError::Serialization(e) if e.is_data() || e.is_syntax())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_parsing() {
        assert_eq!("get_team_stats".parse::<Operation>(), Ok(Operation::GetTeamStats));
        assert_eq!("enrich_match".parse::<Operation>(), Ok(Operation::EnrichMatch));
        assert_eq!(
            "__class__".parse::<Operation>(),
            Err(UnknownOperation("__class__".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip_through_serde() {
        for op in Operation::ALL {
            assert_eq!(serde_json::to_value(op).unwrap(), Value::String(op.name().to_string()));
        }
    }

    #[test]
    fn test_param_specs() {
        let spec = Operation::EnrichMatch.spec();
        let required: Vec<_> = spec.params.iter().filter(|p| p.required).map(|p| p.name).collect();
        assert_eq!(required, vec!["identifier"]);
        assert_eq!(Operation::GetTeamMatches.spec().params[0].kind, "integer");
    }
}
