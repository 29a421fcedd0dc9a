// Candidate screening: a simulated text interview and a pass/fail decision.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod handlers;
pub mod prompts;
pub mod screener;
