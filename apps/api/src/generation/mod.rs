// Outreach sequence generation.
// Implements: tone normalization, prompt building, response resolution, and the
// pipeline that ties them to profile extraction and the provider.
// All provider calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod resolver;
pub mod tone;
