use tracing::debug;

use super::aggregate::aggregate;
use super::domain::{Intent, Lead, Offer, ScoredResult};
use super::intent::{Classification, ClassificationFailure, IntentClassifier, IntentVerdict};
use super::rules::{RuleBreakdown, RuleEngine};

/// Nodes of the scoring pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineNode {
    RuleEngine,
    AiClassification,
    FinalScoreCalculation,
}

impl PipelineNode {
    pub const ORDER: [PipelineNode; 3] = [
        PipelineNode::RuleEngine,
        PipelineNode::AiClassification,
        PipelineNode::FinalScoreCalculation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PipelineNode::RuleEngine => "rule_engine",
            PipelineNode::AiClassification => "ai_classification",
            PipelineNode::FinalScoreCalculation => "final_score_calculation",
        }
    }
}

/// Per-lead state threaded through the pipeline.
///
/// `S` is the stage marker; each node consumes one stage and returns the next, so a
/// field is only reachable once the node producing it has run.
#[derive(Debug)]
pub struct PipelineState<'a, S> {
    lead: &'a Lead,
    offer: &'a Offer,
    stage: S,
}

#[derive(Debug)]
pub struct Submitted;

#[derive(Debug)]
pub struct RuleScored {
    breakdown: RuleBreakdown,
}

#[derive(Debug)]
pub struct Classified {
    rule_score: u8,
    verdict: IntentVerdict,
    failure: Option<ClassificationFailure>,
}

#[derive(Debug)]
pub struct Finalized {
    rule_score: u8,
    verdict: IntentVerdict,
    failure: Option<ClassificationFailure>,
    final_score: u8,
}

impl<'a, S> PipelineState<'a, S> {
    pub fn lead(&self) -> &'a Lead {
        self.lead
    }

    pub fn offer(&self) -> &'a Offer {
        self.offer
    }
}

impl<'a> PipelineState<'a, Submitted> {
    pub fn new(lead: &'a Lead, offer: &'a Offer) -> Self {
        Self {
            lead,
            offer,
            stage: Submitted,
        }
    }

    pub fn score_rules(self, engine: &RuleEngine) -> PipelineState<'a, RuleScored> {
        let breakdown = engine.breakdown(self.lead, self.offer);
        PipelineState {
            lead: self.lead,
            offer: self.offer,
            stage: RuleScored { breakdown },
        }
    }
}

impl<'a> PipelineState<'a, RuleScored> {
    pub fn rule_score(&self) -> u8 {
        self.stage.breakdown.total
    }

    pub fn rule_breakdown(&self) -> &RuleBreakdown {
        &self.stage.breakdown
    }

    pub fn with_classification(self, classification: Classification) -> PipelineState<'a, Classified> {
        let (verdict, failure) = classification.into_parts();
        PipelineState {
            lead: self.lead,
            offer: self.offer,
            stage: Classified {
                rule_score: self.stage.breakdown.total,
                verdict,
                failure,
            },
        }
    }
}

impl<'a> PipelineState<'a, Classified> {
    pub fn rule_score(&self) -> u8 {
        self.stage.rule_score
    }

    pub fn ai_intent(&self) -> Intent {
        self.stage.verdict.intent
    }

    pub fn ai_points(&self) -> u8 {
        self.stage.verdict.points
    }

    pub fn finalize(self) -> PipelineState<'a, Finalized> {
        let Classified {
            rule_score,
            verdict,
            failure,
        } = self.stage;
        let final_score = aggregate(rule_score, verdict.points);

        PipelineState {
            lead: self.lead,
            offer: self.offer,
            stage: Finalized {
                rule_score,
                verdict,
                failure,
                final_score,
            },
        }
    }
}

impl<'a> PipelineState<'a, Finalized> {
    pub fn rule_score(&self) -> u8 {
        self.stage.rule_score
    }

    pub fn ai_intent(&self) -> Intent {
        self.stage.verdict.intent
    }

    pub fn ai_reasoning(&self) -> &str {
        &self.stage.verdict.reasoning
    }

    pub fn ai_points(&self) -> u8 {
        self.stage.verdict.points
    }

    pub fn final_score(&self) -> u8 {
        self.stage.final_score
    }

    pub fn failure(&self) -> Option<&ClassificationFailure> {
        self.stage.failure.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.stage.failure.as_ref().map(ToString::to_string)
    }

    pub fn into_result(self) -> ScoredResult {
        let Finalized {
            verdict,
            final_score,
            ..
        } = self.stage;
        ScoredResult::from_lead(self.lead, verdict.intent, final_score, verdict.reasoning)
    }
}

/// `rule_engine -> ai_classification -> final_score_calculation`, one lead at a time.
#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    rules: RuleEngine,
    classifier: IntentClassifier,
}

impl ScoringPipeline {
    pub fn new(classifier: IntentClassifier) -> Self {
        Self {
            rules: RuleEngine,
            classifier,
        }
    }

    /// Run all three nodes and return the terminal state.
    pub async fn execute<'a>(&self, lead: &'a Lead, offer: &'a Offer) -> PipelineState<'a, Finalized> {
        let [rule_node, ai_node, final_node] = PipelineNode::ORDER;
        let state = PipelineState::new(lead, offer);

        debug!(node = rule_node.label(), lead = %lead.name, "running node");
        let state = state.score_rules(&self.rules);
        for component in &state.rule_breakdown().components {
            debug!(
                node = rule_node.label(),
                lead = %lead.name,
                factor = ?component.factor,
                score = component.score,
                notes = %component.notes,
                "rule component"
            );
        }

        debug!(
            node = ai_node.label(),
            lead = %lead.name,
            rule_score = state.rule_score(),
            "running node"
        );
        let classification = self.classifier.classify(lead, offer).await;
        let state = state.with_classification(classification);

        debug!(
            node = final_node.label(),
            lead = %lead.name,
            ai_points = state.ai_points(),
            "running node"
        );
        state.finalize()
    }

    /// Score one lead. Always produces a result, even when the model is unavailable.
    pub async fn run(&self, lead: &Lead, offer: &Offer) -> ScoredResult {
        self.execute(lead, offer).await.into_result()
    }
}
