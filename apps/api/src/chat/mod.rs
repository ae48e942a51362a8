// Chat domain: request validation and the completion endpoint.
// All LLM calls go through llm_client — no direct upstream calls here.

pub mod handlers;
pub mod validation;
