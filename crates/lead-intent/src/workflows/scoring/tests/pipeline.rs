use super::common::*;
use crate::workflows::scoring::{
    aggregate, Intent, PipelineNode, PipelineState, RuleEngine, RuleFactor, ScoringPipeline,
    MAX_FINAL_SCORE,
};
use std::sync::Arc;

#[test]
fn nodes_run_in_fixed_order() {
    let labels: Vec<_> = PipelineNode::ORDER.iter().map(PipelineNode::label).collect();
    assert_eq!(
        labels,
        vec!["rule_engine", "ai_classification", "final_score_calculation"]
    );
}

#[test]
fn aggregate_clamps_every_valid_combination() {
    for rule_score in 0..=50u8 {
        for ai_points in [10u8, 30, 50] {
            let expected = (u16::from(rule_score) + u16::from(ai_points)).min(100) as u8;
            let final_score = aggregate(rule_score, ai_points);
            assert_eq!(final_score, expected);
            assert!(final_score <= MAX_FINAL_SCORE);
        }
    }
    assert_eq!(aggregate(u8::MAX, u8::MAX), MAX_FINAL_SCORE);
}

#[tokio::test]
async fn stages_accumulate_fields() {
    let lead = lead();
    let offer = offer();
    let classifier = classifier_with(Arc::new(ScriptedModel::replying(
        "Intent: Medium\nReasoning: Evaluating vendors.",
    )));

    let state = PipelineState::new(&lead, &offer).score_rules(&RuleEngine);
    assert_eq!(state.rule_score(), 50);
    let breakdown = state.rule_breakdown();
    assert_eq!(breakdown.total, 50);
    assert_eq!(breakdown.component(RuleFactor::RoleRelevance), 20);
    assert_eq!(breakdown.components.len(), 3);
    assert!(breakdown.components.iter().all(|c| !c.notes.is_empty()));

    let classification = classifier.classify(state.lead(), state.offer()).await;
    let state = state.with_classification(classification);
    assert_eq!(state.rule_score(), 50);
    assert_eq!(state.ai_intent(), Intent::Medium);
    assert_eq!(state.ai_points(), 30);

    let state = state.finalize();
    assert_eq!(state.final_score(), 80);
    assert_eq!(state.ai_reasoning(), "Evaluating vendors.");
    assert!(state.error_message().is_none());
}

#[tokio::test]
async fn run_combines_rule_and_ai_scores() {
    let pipeline = pipeline_with(Arc::new(ScriptedModel::replying(HIGH_REPLY)));
    let lead = lead();

    let result = pipeline.run(&lead, &offer()).await;

    assert_eq!(result.name, lead.name);
    assert_eq!(result.role, lead.role);
    assert_eq!(result.company, lead.company);
    assert_eq!(result.industry, lead.industry);
    assert_eq!(result.location, lead.location);
    assert_eq!(result.linkedin_bio, lead.linkedin_bio);
    assert_eq!(result.intent, Intent::High);
    assert_eq!(result.score, 100);
    assert_eq!(result.reasoning, "Strong fit with ICP.");
}

#[tokio::test]
async fn model_failure_still_yields_a_result() {
    let pipeline = pipeline_with(Arc::new(FailingModel::unreachable()));
    let lead = lead_with_role("Intern");
    let offer = offer();
    let rule_score = RuleEngine.score(&lead, &offer);

    let state = pipeline.execute(&lead, &offer).await;
    let error_message = state.error_message().expect("failure recorded");
    assert!(error_message.contains("connection refused"));
    assert_eq!(state.rule_score(), rule_score);

    let result = state.into_result();
    assert_eq!(result.intent, Intent::Low);
    assert_eq!(result.score, rule_score + 10);
    assert!(!result.reasoning.is_empty());
}

#[tokio::test]
async fn pipeline_clones_share_the_model() {
    let model = Arc::new(ScriptedModel::replying(HIGH_REPLY));
    let pipeline = ScoringPipeline::new(classifier_with(model.clone()));
    let cloned = pipeline.clone();

    pipeline.run(&lead(), &offer()).await;
    cloned.run(&lead_with_role("Analyst"), &offer()).await;

    assert_eq!(model.prompts().len(), 2);
}
