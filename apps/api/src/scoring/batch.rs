use std::time::Instant;

use tracing::{error, info};

use crate::llm_client::repair::parse_json_lenient;
use crate::llm_client::LanguageModel;
use crate::media::short_label;
use crate::scoring::prompts::{batch_parts, scoring_system};
use crate::scoring::reconcile::reconcile_batch;
use crate::scoring::{ResumeInput, ScoredResume};

/// Scores a chunk of resumes with one LLM call.
///
/// Returns one result per resume in `chunk`, in chunk order. A failed call
/// yields a zero score for every resume in the chunk.
pub async fn score_batch(
    llm: &dyn LanguageModel,
    job_description: &str,
    chunk: &[ResumeInput],
    chunk_number: usize,
    total_chunks: usize,
) -> Vec<ScoredResume> {
    if chunk.is_empty() {
        return Vec::new();
    }

    let first = short_label(&chunk[0].uri);
    info!(
        "Processing chunk {} of {}, size: {}, first resume: {}",
        chunk_number,
        total_chunks,
        chunk.len(),
        first
    );

    let started = Instant::now();
    let outcome = llm
        .complete(&scoring_system(), &batch_parts(job_description, chunk))
        .await
        .and_then(|text| parse_json_lenient(&text));
    let elapsed_ms = started.elapsed().as_millis();

    match outcome {
        Ok(output) => {
            let results = reconcile_batch(chunk, output);
            info!(
                "Finished chunk {} in {}ms. Results in chunk: {}",
                chunk_number,
                elapsed_ms,
                results.len()
            );
            results
        }
        Err(e) => {
            error!(
                "Batch scoring failed for chunk {} (first resume {}) after {}ms: {}",
                chunk_number, first, elapsed_ms, e
            );
            chunk
                .iter()
                .map(|resume| {
                    resume.fallback(format!(
                        "Error during batch resume analysis for chunk {chunk_number}: {e}. \
                        Please review manually."
                    ))
                })
                .collect()
        }
    }
}
