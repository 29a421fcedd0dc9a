use std::time::Instant;

use tracing::{error, info};

use crate::llm_client::repair::parse_json_lenient;
use crate::llm_client::LanguageModel;
use crate::media::short_label;
use crate::scoring::prompts::{scoring_system, single_parts};
use crate::scoring::reconcile::reconcile_single;
use crate::scoring::{ResumeInput, ScoredResume};

/// Scores one resume with its own LLM call. Never fails: errors become a zero score.
pub async fn score_single(
    llm: &dyn LanguageModel,
    job_description: &str,
    resume: &ResumeInput,
) -> ScoredResume {
    let label = short_label(&resume.uri);
    info!("Scoring {} individually: {}", resume.label, label);

    let started = Instant::now();
    let outcome = llm
        .complete(&scoring_system(), &single_parts(job_description, resume))
        .await
        .and_then(|text| parse_json_lenient(&text));
    let elapsed_ms = started.elapsed().as_millis();

    match outcome {
        Ok(output) => {
            let result = reconcile_single(resume, output);
            info!(
                "Scored {} in {}ms: {}/100",
                resume.label, elapsed_ms, result.score
            );
            result
        }
        Err(e) => {
            error!("Single resume scoring failed for {label} after {elapsed_ms}ms: {e}");
            resume.fallback(format!(
                "Error during single resume analysis: {e}. Please review manually."
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::LlmError;
    use crate::scoring::reconcile::INCOMPLETE_SINGLE_REASON;
    use crate::scoring::tests::{text_input, JD};

    #[tokio::test]
    async fn test_fenced_response_is_scored() {
        let model = ScriptedModel::fixed(
            "```json\n{\"resume_id\": \"resume-1\", \"score\": 78.2, \"reason\": \"Relevant Rust work\"}\n```",
        );
        let resume = text_input(0, "Rust, Tokio, gRPC");
        let result = score_single(&model, JD, &resume).await;
        assert_eq!(result.score, 78);
        assert_eq!(result.reason, "Relevant Rust work");
        assert_eq!(result.resume_data_uri, resume.uri);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_contains_resume_text() {
        let model = ScriptedModel::fixed(r#"{"score": 50, "reason": "ok"}"#);
        score_single(&model, JD, &text_input(0, "Kubernetes operator author")).await;
        let prompt = &model.prompts()[0];
        assert!(prompt.contains("Kubernetes operator author"));
        assert!(prompt.contains(JD));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_zero_score() {
        let model = ScriptedModel::new(|_, _| {
            Err(LlmError::Api {
                status: 400,
                message: "bad request".to_string(),
            })
        });
        let result = score_single(&model, JD, &text_input(0, "cv")).await;
        assert_eq!(result.score, 0);
        assert!(result
            .reason
            .starts_with("Error during single resume analysis: API error (status 400): bad request"));
        assert!(result.reason.ends_with("Please review manually."));
    }

    #[tokio::test]
    async fn test_unparseable_response_becomes_zero_score() {
        let model = ScriptedModel::fixed("I'd rate this candidate highly.");
        let result = score_single(&model, JD, &text_input(0, "cv")).await;
        assert_eq!(result.score, 0);
        assert!(result.reason.contains("malformed output"));
    }

    #[tokio::test]
    async fn test_incomplete_response_uses_placeholder_reason() {
        let model = ScriptedModel::fixed(r#"{"score": 64}"#);
        let result = score_single(&model, JD, &text_input(0, "cv")).await;
        assert_eq!(result.score, 64);
        assert_eq!(result.reason, INCOMPLETE_SINGLE_REASON);
    }

    #[tokio::test]
    async fn test_truncated_response_is_not_scored() {
        let model = ScriptedModel::fixed(r#"{"resume_id": "resume-1", "score": 8"#);
        let result = score_single(&model, JD, &text_input(0, "cv")).await;
        assert_eq!(result.score, 0);
        assert!(result
            .reason
            .starts_with("Error during single resume analysis: LLM returned malformed output"));
    }
}
