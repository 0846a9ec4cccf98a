use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use quiz_core::model::{Question, QuestionId, QuestionKind, RunSettings};

use crate::error::SessionError;

//
// ─── RUN BUILDER ───────────────────────────────────────────────────────────────
//

/// Builds the ordered question subset for a run.
///
/// The builder owns a copy of the subject pool, so shuffling never mutates
/// the bank's data; repeated runs over the same subject start from the same
/// source order.
pub struct RunBuilder {
    pool: Vec<Question>,
    count: usize,
    settings: RunSettings,
}

impl RunBuilder {
    #[must_use]
    pub fn new(pool: Vec<Question>, count: usize) -> Self {
        Self {
            pool,
            count,
            settings: RunSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the run with the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the pool is empty.
    pub fn build(self) -> Result<Run, SessionError> {
        self.build_with_rng(&mut rand::rng())
    }

    /// Builds the run with a caller-provided RNG (deterministic in tests).
    ///
    /// The requested count is clamped to `[1, pool.len()]`. With shuffling
    /// enabled the full pool is permuted (Fisher–Yates) before truncation,
    /// so any question can land in any run.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the pool is empty.
    pub fn build_with_rng(self, rng: &mut impl Rng) -> Result<Run, SessionError> {
        if self.pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut questions = self.pool;
        if self.settings.shuffle_questions() {
            questions.shuffle(rng);
        }
        let count = self.count.clamp(1, questions.len());
        questions.truncate(count);

        Ok(Run {
            questions,
            settings: self.settings,
            display_orders: HashMap::new(),
        })
    }
}

//
// ─── RUN ───────────────────────────────────────────────────────────────────────
//

/// The active quiz instance: a fixed ordered question subset plus per-run
/// option display orders.
///
/// Display orders live in a side table keyed by question id rather than on
/// the question itself, keeping the bank's records immutable.
#[derive(Debug, Clone)]
pub struct Run {
    questions: Vec<Question>,
    settings: RunSettings,
    display_orders: HashMap<QuestionId, Vec<usize>>,
}

impl Run {
    /// Number of questions in the run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    #[must_use]
    pub fn question(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Option display order for the question at `position`, as indices into
    /// the question's original option list.
    ///
    /// Computed lazily on first request and cached for the run's lifetime,
    /// so navigating back to an answered question keeps the order the user
    /// saw. Boolean questions have no option indices (their two fixed
    /// options come from subject labels) and yield an empty order.
    pub fn display_order_with_rng(
        &mut self,
        position: usize,
        rng: &mut impl Rng,
    ) -> Option<&[usize]> {
        let question = self.questions.get(position)?;
        let id = question.id();
        let option_count = question.options().len();
        let shuffle = matches!(question.kind(), QuestionKind::Multiple);

        let order = self.display_orders.entry(id).or_insert_with(|| {
            let mut order: Vec<usize> = (0..option_count).collect();
            if shuffle {
                order.shuffle(rng);
            }
            order
        });
        Some(order.as_slice())
    }

    /// Convenience wrapper over [`Run::display_order_with_rng`] using the
    /// thread-local RNG.
    pub fn display_order(&mut self, position: usize) -> Option<&[usize]> {
        self.display_order_with_rng(position, &mut rand::rng())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn pool(n: u64) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::multiple(
                    QuestionId::new(i),
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    (i % 4) as usize,
                    None,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let source = pool(20);
        let source_ids: BTreeSet<QuestionId> = source.iter().map(Question::id).collect();

        let mut rng = StdRng::seed_from_u64(7);
        let run = RunBuilder::new(source, 20)
            .with_settings(RunSettings::default().with_shuffle(true))
            .build_with_rng(&mut rng)
            .unwrap();

        let run_ids: BTreeSet<QuestionId> = run.questions().iter().map(Question::id).collect();
        assert_eq!(run_ids, source_ids);
    }

    #[test]
    fn unshuffled_run_keeps_source_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let run = RunBuilder::new(pool(5), 3)
            .with_settings(RunSettings::default().with_shuffle(false))
            .build_with_rng(&mut rng)
            .unwrap();

        let ids: Vec<u64> = run.questions().iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn count_is_clamped_to_pool_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let run = RunBuilder::new(pool(5), 50)
            .build_with_rng(&mut rng)
            .unwrap();
        assert_eq!(run.total(), 5);

        let mut rng = StdRng::seed_from_u64(1);
        let run = RunBuilder::new(pool(5), 0).build_with_rng(&mut rng).unwrap();
        assert_eq!(run.total(), 1);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = RunBuilder::new(Vec::new(), 5)
            .build_with_rng(&mut rng)
            .unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn display_order_is_stable_across_revisits() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut run = RunBuilder::new(pool(3), 3)
            .with_settings(RunSettings::default().with_shuffle(false))
            .build_with_rng(&mut rng)
            .unwrap();

        let first: Vec<usize> = run
            .display_order_with_rng(0, &mut rng)
            .unwrap()
            .to_vec();
        // Visit another question, then come back.
        let _ = run.display_order_with_rng(1, &mut rng);
        let second: Vec<usize> = run
            .display_order_with_rng(0, &mut rng)
            .unwrap()
            .to_vec();

        assert_eq!(first, second);
        let as_set: BTreeSet<usize> = first.iter().copied().collect();
        assert_eq!(as_set, (0..4).collect::<BTreeSet<usize>>());
    }

    #[test]
    fn boolean_questions_have_empty_display_order() {
        let q = Question::boolean(QuestionId::new(1), "Q", true, None).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut run = RunBuilder::new(vec![q], 1).build_with_rng(&mut rng).unwrap();
        assert!(run.display_order_with_rng(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_position_has_no_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut run = RunBuilder::new(pool(2), 2).build_with_rng(&mut rng).unwrap();
        assert!(run.display_order_with_rng(9, &mut rng).is_none());
    }
}
