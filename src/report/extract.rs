//! Single pass over a result set collecting incorrect predictions per tier.

use crate::granularity::GranularityScorer;
use crate::models::{Category, Example, OriginInput, ResolvedParams, Result};
use crate::results::ResultAccess;
use tracing::{debug, info, warn};

/// Incorrect predictions collected for one tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBucket {
    /// Every incorrect prediction assigned to this tier
    pub found: usize,

    /// Retained examples, capped at `max_examples`
    pub examples: Vec<Example>,
}

/// Outcome of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Predictions scanned
    pub total: usize,

    /// Predictions judged incorrect
    pub incorrect: usize,

    /// Buckets in `Category::ALL` order
    pub buckets: [CategoryBucket; 3],
}

impl Report {
    pub fn bucket(&self, category: Category) -> &CategoryBucket {
        &self.buckets[category.ordinal()]
    }

    /// Tiers paired with their buckets, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryBucket)> {
        Category::ALL.into_iter().zip(self.buckets.iter())
    }
}

/// Expected answer as displayed: the segment after the last `#### `, trimmed.
///
/// Falls back to the whole answer when the delimiter is missing.
pub fn expected_answer(idx: usize, origin: &OriginInput) -> String {
    match origin.gold_answer() {
        Some(gold) => gold.to_string(),
        None => {
            warn!(index = idx, "Reference answer has no '####' delimiter, using it whole");
            origin.answer.trim().to_string()
        }
    }
}

/// Collect incorrect predictions, bucketed by granularity tier.
pub fn extract_incorrect<R, S>(results: &R, scorer: &S, params: &ResolvedParams) -> Result<Report>
where
    R: ResultAccess + ?Sized,
    S: GranularityScorer + ?Sized,
{
    let mut report = Report {
        total: results.len(),
        ..Report::default()
    };

    info!(
        total = report.total,
        mode = %params.mode,
        k = params.k,
        k2 = params.k2,
        max_examples = params.max_examples,
        "Scanning predictions"
    );

    for idx in 0..results.len() {
        let origin = results.get_origin_input(idx)?;
        let granularity = scorer.granularity(origin);

        if results.judge_correct(idx, params.mode)? {
            continue;
        }

        let category = Category::classify(granularity, params.k, params.k2);
        debug!(index = idx, granularity, %category, "Incorrect prediction");

        report.incorrect += 1;
        let bucket = &mut report.buckets[category.ordinal()];
        bucket.found += 1;

        if bucket.examples.len() < params.max_examples {
            bucket.examples.push(Example {
                index: idx,
                question: origin.question.clone(),
                expected_answer: expected_answer(idx, origin),
                model_response: results.get_last_pred_text(idx)?,
                predicted_answer: results.get_text_answer(idx)?.trim().to_string(),
                granularity,
            });
        }
    }

    info!(
        incorrect = report.incorrect,
        cfrb = report.bucket(Category::Cfrb).found,
        pfrb = report.bucket(Category::Pfrb).found,
        cirb = report.bucket(Category::Cirb).found,
        "Scan complete"
    );

    Ok(report)
}
