use serde::{Deserialize, Serialize};
use std::fmt;

/// Product or offer context that leads are judged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

/// Prospect record as uploaded by sales operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
}

impl Lead {
    pub(crate) fn fields(&self) -> [&str; 6] {
        [
            &self.name,
            &self.role,
            &self.company,
            &self.industry,
            &self.location,
            &self.linkedin_bio,
        ]
    }
}

/// Predicted buying likelihood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    High,
    Medium,
    #[default]
    Low,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::High => "High",
            Intent::Medium => "Medium",
            Intent::Low => "Low",
        }
    }

    /// Score contribution of the AI layer.
    pub fn points(&self) -> u8 {
        match self {
            Intent::High => 50,
            Intent::Medium => 30,
            Intent::Low => 10,
        }
    }

    /// Case-insensitive label lookup. Anything unrecognized is `None`.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Intent::High),
            "medium" => Some(Intent::Medium),
            "low" => Some(Intent::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final, read-only view of one scored lead. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
    pub intent: Intent,
    pub score: u8,
    pub reasoning: String,
}

impl ScoredResult {
    pub(crate) fn from_lead(lead: &Lead, intent: Intent, score: u8, reasoning: String) -> Self {
        Self {
            name: lead.name.clone(),
            role: lead.role.clone(),
            company: lead.company.clone(),
            industry: lead.industry.clone(),
            location: lead.location.clone(),
            linkedin_bio: lead.linkedin_bio.clone(),
            intent,
            score,
            reasoning,
        }
    }
}
