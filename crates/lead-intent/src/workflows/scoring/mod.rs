//! Lead scoring: a deterministic rule engine, an AI intent classifier and a final-score
//! aggregator, run per lead by [`ScoringPipeline`] and exposed over HTTP through
//! [`scoring_router`].

pub mod aggregate;
pub mod domain;
pub mod intent;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, MAX_FINAL_SCORE};
pub use domain::{Intent, Lead, Offer, ScoredResult};
pub use intent::{
    parse_response, Classification, ClassificationFailure, IntentClassifier, IntentVerdict,
};
pub use pipeline::{PipelineNode, PipelineState, ScoringPipeline};
pub use repository::{SessionStore, StoreError};
pub use router::scoring_router;
pub use rules::{RuleBreakdown, RuleComponent, RuleEngine, RuleFactor, MAX_RULE_SCORE};
pub use service::{LeadScoringService, ScoringServiceError, ScoringSummary};
