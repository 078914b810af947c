use std::io::Read;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{Offer, ScoredResult};
use super::pipeline::ScoringPipeline;
use super::repository::{SessionStore, StoreError};
use crate::workflows::leads::{export_results, LeadCsvImporter, LeadImportError};

/// Outcome of scoring every uploaded lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringSummary {
    pub total_scored: usize,
    pub degraded: usize,
}

/// Service composing the scoring pipeline with the session store.
pub struct LeadScoringService<S> {
    pipeline: Arc<ScoringPipeline>,
    store: Arc<S>,
}

impl<S> LeadScoringService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(pipeline: Arc<ScoringPipeline>, store: Arc<S>) -> Self {
        Self { pipeline, store }
    }

    /// Replace the active offer.
    pub fn set_offer(&self, offer: Offer) -> Result<Offer, ScoringServiceError> {
        self.store.set_offer(offer.clone())?;
        info!(offer = %offer.name, "offer updated");
        Ok(offer)
    }

    /// Replace the uploaded leads with the rows of a CSV document.
    pub fn upload_leads<R: Read>(&self, reader: R) -> Result<usize, ScoringServiceError> {
        let leads = LeadCsvImporter::from_reader(reader)?;
        let count = leads.len();
        self.store.replace_leads(leads)?;
        info!(count, "leads uploaded");
        Ok(count)
    }

    /// Score every uploaded lead against the active offer, in upload order.
    ///
    /// Each lead yields exactly one result; model failures are absorbed by the pipeline
    /// and only counted here.
    pub async fn score_uploaded(&self) -> Result<ScoringSummary, ScoringServiceError> {
        let offer = self.store.offer()?.ok_or(ScoringServiceError::NoOffer)?;
        let leads = self.store.leads()?;
        if leads.is_empty() {
            return Err(ScoringServiceError::NoLeads);
        }

        let mut results = Vec::with_capacity(leads.len());
        let mut degraded = 0;

        for lead in &leads {
            let state = self.pipeline.execute(lead, &offer).await;
            if let Some(message) = state.error_message() {
                degraded += 1;
                warn!(lead = %lead.name, error = %message, "lead scored with fallback intent");
            }
            results.push(state.into_result());
        }

        let summary = ScoringSummary {
            total_scored: results.len(),
            degraded,
        };
        self.store.replace_results(results)?;

        info!(
            offer = %offer.name,
            total_scored = summary.total_scored,
            degraded = summary.degraded,
            "scoring run complete"
        );
        Ok(summary)
    }

    pub fn results(&self) -> Result<Vec<ScoredResult>, ScoringServiceError> {
        Ok(self.store.results()?)
    }

    /// CSV rendering of the latest results.
    pub fn export_csv(&self) -> Result<Vec<u8>, ScoringServiceError> {
        let results = self.store.results()?;
        if results.is_empty() {
            return Err(ScoringServiceError::NoResults);
        }
        Ok(export_results(&results)?)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("No offer uploaded. POST /offer first.")]
    NoOffer,
    #[error("No leads uploaded. POST /leads/upload first.")]
    NoLeads,
    #[error("No scored leads. POST /score first.")]
    NoResults,
    #[error(transparent)]
    Import(#[from] LeadImportError),
    #[error("failed to write CSV: {0}")]
    Export(#[from] csv::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
