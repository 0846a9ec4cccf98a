use quiz_core::model::{AnswerRecord, AnswerValue, CorrectionMode, Question};

/// Per-position answer slots for a run.
///
/// One slot per question, all `None` at run start. Submission semantics
/// depend on the correction mode:
///
/// - `Instant`: a slot locks once filled; further submissions are no-ops.
/// - `Final`: resubmitting the same value clears the slot (deselect),
///   a different value overwrites it.
///
/// Score counters are always derived by scanning the slots, so they cannot
/// drift from the recorded answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerLedger {
    slots: Vec<Option<AnswerRecord>>,
    mode: CorrectionMode,
}

impl AnswerLedger {
    #[must_use]
    pub fn new(total: usize, mode: CorrectionMode) -> Self {
        Self {
            slots: vec![None; total],
            mode,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn mode(&self) -> CorrectionMode {
        self.mode
    }

    #[must_use]
    pub fn record(&self, position: usize) -> Option<&AnswerRecord> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_answered(&self, position: usize) -> bool {
        self.record(position).is_some()
    }

    /// Records a selection for `position`, applying the mode's mutability
    /// rules. Returns the slot content after the operation; out-of-bounds
    /// positions are ignored.
    pub fn submit(
        &mut self,
        position: usize,
        question: &Question,
        selected: AnswerValue,
    ) -> Option<AnswerRecord> {
        let slot = self.slots.get_mut(position)?;

        match (self.mode, slot.as_ref()) {
            // Instant answers are immutable once given.
            (CorrectionMode::Instant, Some(existing)) => Some(*existing),
            // Final mode: same value toggles the answer off.
            (CorrectionMode::Final, Some(existing)) if existing.selected() == selected => {
                *slot = None;
                None
            }
            _ => {
                let record = AnswerRecord::evaluate(question, selected);
                *slot = Some(record);
                Some(record)
            }
        }
    }

    /// Clears a single slot back to unanswered.
    pub fn clear(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = None;
        }
    }

    /// Clears every slot (run restart).
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Ordered view of all slots.
    #[must_use]
    pub fn snapshot(&self) -> &[Option<AnswerRecord>] {
        &self.slots
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.is_some_and(|r| r.is_correct()))
            .count()
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.is_some_and(|r| !r.is_correct()))
            .count()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
