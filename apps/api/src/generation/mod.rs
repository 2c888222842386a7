// Request orchestration for every use case.
// Handlers own validation and uploads; all model calls go through the pipeline.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod upload;
