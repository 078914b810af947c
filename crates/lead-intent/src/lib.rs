//! Buying-intent scoring for sales leads.
//!
//! Each lead is scored against the active offer by a rule engine (up to 50 points) and
//! a language-model intent classifier (10, 30 or 50 points); the sum is clamped to 100.

pub mod config;
pub mod error;
pub mod llm;
pub mod telemetry;
pub mod workflows;
