//! Resume scoring pipeline — picks a calling strategy per request.
//!
//! - no resumes: nothing to do
//! - up to `parallel_threshold` resumes: one call per resume, all in flight together
//! - more: consecutive chunks of `chunk_size`, one batch call per chunk,
//!   at most `chunk_concurrency` chunks in flight
//!
//! Output always has one entry per input, in input order.

use std::time::Instant;

use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};
use tracing::info;

use crate::llm_client::LanguageModel;
use crate::scoring::batch::score_batch;
use crate::scoring::single::score_single;
use crate::scoring::{ResumeInput, ScoredResume, ScoringConfig};

/// How a request of a given size is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Empty,
    ParallelSingles,
    ChunkedBatches { chunks: usize },
}

pub fn choose_strategy(config: &ScoringConfig, count: usize) -> Strategy {
    if count == 0 {
        Strategy::Empty
    } else if count <= config.parallel_threshold {
        Strategy::ParallelSingles
    } else {
        Strategy::ChunkedBatches {
            chunks: count.div_ceil(config.chunk_size.max(1)),
        }
    }
}

pub async fn score_resumes(
    llm: &dyn LanguageModel,
    config: &ScoringConfig,
    job_description: &str,
    resumes: &[ResumeInput],
) -> Vec<ScoredResume> {
    let started = Instant::now();
    let total = resumes.len();
    info!("Received request to score {} resumes", total);

    let results = match choose_strategy(config, total) {
        Strategy::Empty => {
            info!("No resumes provided, returning empty result");
            Vec::new()
        }
        Strategy::ParallelSingles => {
            info!(
                "Processing {} resumes individually in parallel (threshold: {})",
                total, config.parallel_threshold
            );
            join_all(
                resumes
                    .iter()
                    .map(|resume| score_single(llm, job_description, resume)),
            )
            .await
        }
        Strategy::ChunkedBatches { chunks } => {
            info!(
                "Processing {} resumes in {} chunks of up to {} ({} in flight)",
                total, chunks, config.chunk_size, config.chunk_concurrency
            );
            let batches: Vec<_> = resumes
                .chunks(config.chunk_size.max(1))
                .enumerate()
                .map(|(i, chunk)| score_batch(llm, job_description, chunk, i + 1, chunks))
                .collect();
            stream::iter(batches)
                .buffered(config.chunk_concurrency.max(1))
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .flatten()
                .collect()
        }
    };

    info!(
        "Finished scoring {} resumes in {}ms. Total results: {}",
        total,
        started.elapsed().as_millis(),
        results.len()
    );
    results
}
