use super::domain::{Lead, Offer};
use serde::Serialize;
use std::collections::BTreeSet;

pub const MAX_RULE_SCORE: u8 = 50;

const DECISION_MAKER_KEYWORDS: &[&str] = &[
    "head",
    "director",
    "vp",
    "vice president",
    "cxo",
    "ceo",
    "coo",
    "cto",
    "cpo",
    "cmo",
    "founder",
    "owner",
    "lead",
];

const INFLUENCER_KEYWORDS: &[&str] = &["manager", "specialist", "analyst", "coordinator", "associate"];

/// Which heuristic produced a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFactor {
    RoleRelevance,
    IcpOverlap,
    DataCompleteness,
}

/// Single auditable contribution to the rule score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleComponent {
    pub factor: RuleFactor,
    pub score: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleBreakdown {
    pub components: Vec<RuleComponent>,
    pub total: u8,
}

impl RuleBreakdown {
    pub fn component(&self, factor: RuleFactor) -> u8 {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.score)
            .unwrap_or(0)
    }
}

/// Deterministic, side-effect free scorer worth up to [`MAX_RULE_SCORE`] points.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn score(&self, lead: &Lead, offer: &Offer) -> u8 {
        self.breakdown(lead, offer).total
    }

    pub fn breakdown(&self, lead: &Lead, offer: &Offer) -> RuleBreakdown {
        let components = vec![
            role_relevance(&lead.role),
            icp_overlap(&lead.industry, &offer.ideal_use_cases),
            data_completeness(lead),
        ];

        let sum: u16 = components.iter().map(|c| u16::from(c.score)).sum();
        let total = sum.min(u16::from(MAX_RULE_SCORE)) as u8;

        RuleBreakdown { components, total }
    }
}

fn contains_any(text: &str, keywords: &'static [&'static str]) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword))
}

fn role_relevance(role: &str) -> RuleComponent {
    let (score, notes) = if let Some(keyword) = contains_any(role, DECISION_MAKER_KEYWORDS) {
        (20, format!("decision maker title (matched '{keyword}')"))
    } else if let Some(keyword) = contains_any(role, INFLUENCER_KEYWORDS) {
        (10, format!("influencer title (matched '{keyword}')"))
    } else {
        (0, "no buying authority signal in title".to_string())
    };

    RuleComponent {
        factor: RuleFactor::RoleRelevance,
        score,
        notes,
    }
}

fn icp_tokens(ideal_use_cases: &[String]) -> BTreeSet<String> {
    ideal_use_cases
        .iter()
        .flat_map(|use_case| use_case.split_whitespace())
        .map(|token| token.to_lowercase())
        .collect()
}

fn icp_overlap(industry: &str, ideal_use_cases: &[String]) -> RuleComponent {
    let industry = industry.to_lowercase();
    let overlap = icp_tokens(ideal_use_cases)
        .iter()
        .filter(|token| industry.contains(token.as_str()))
        .count();

    let score = match overlap {
        0 => 0,
        1 => 10,
        _ => 20,
    };

    RuleComponent {
        factor: RuleFactor::IcpOverlap,
        score,
        notes: format!("{overlap} ideal use case token(s) found in industry"),
    }
}

fn data_completeness(lead: &Lead) -> RuleComponent {
    let missing = lead
        .fields()
        .iter()
        .filter(|value| value.trim().is_empty())
        .count();

    let (score, notes) = if missing == 0 {
        (10, "all lead fields populated".to_string())
    } else {
        (0, format!("{missing} lead field(s) blank"))
    };

    RuleComponent {
        factor: RuleFactor::DataCompleteness,
        score,
        notes,
    }
}
