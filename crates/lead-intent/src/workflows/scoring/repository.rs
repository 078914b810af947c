use super::domain::{Lead, Offer, ScoredResult};

/// Process-lifetime holder for the active offer, the last lead upload and the last
/// scoring results. The pipeline itself never touches it.
pub trait SessionStore: Send + Sync {
    fn set_offer(&self, offer: Offer) -> Result<(), StoreError>;
    fn offer(&self) -> Result<Option<Offer>, StoreError>;
    fn replace_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError>;
    fn leads(&self) -> Result<Vec<Lead>, StoreError>;
    fn replace_results(&self, results: Vec<ScoredResult>) -> Result<(), StoreError>;
    fn results(&self) -> Result<Vec<ScoredResult>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
