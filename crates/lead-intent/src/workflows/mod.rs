pub mod leads;
pub mod scoring;
