/// Review subset filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFilter {
    /// Every position of the run.
    All,
    /// Positions answered wrong or skipped, in ascending original order.
    Wrong,
}

/// Outcome of an advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved,
    /// Already at the last addressed position; the caller decides what an
    /// end-of-space advance means (finish request, review exit).
    AtEnd,
}

/// Cursor over the currently addressed index space: the full run in normal
/// mode, or an explicit list of original positions during review.
///
/// All moves are defensively idempotent: out-of-bounds targets and boundary
/// moves are no-ops, never errors, regardless of caller discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    cursor: usize,
    total: usize,
    review: Option<Vec<usize>>,
}

impl Navigator {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            cursor: 0,
            total,
            review: None,
        }
    }

    /// Position within the addressed space (not necessarily an original
    /// run position; see [`Navigator::current_position`]).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the space the cursor currently ranges over.
    #[must_use]
    pub fn addressed_len(&self) -> usize {
        self.review.as_ref().map_or(self.total, Vec::len)
    }

    /// Original run position the cursor points at.
    #[must_use]
    pub fn current_position(&self) -> usize {
        match &self.review {
            // Invariant: cursor < list.len() whenever a review list is set.
            Some(list) => list.get(self.cursor).copied().unwrap_or(0),
            None => self.cursor,
        }
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.cursor + 1 < self.addressed_len() {
            self.cursor += 1;
            AdvanceOutcome::Moved
        } else {
            AdvanceOutcome::AtEnd
        }
    }

    /// Moves back one position; no-op at the start boundary.
    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Jumps to a position within the addressed space; out-of-bounds
    /// targets are ignored.
    pub fn jump(&mut self, target: usize) {
        if target < self.addressed_len() {
            self.cursor = target;
        }
    }

    /// Switches addressing to an explicit review list of original
    /// positions. The caller guarantees a non-empty, strictly ascending,
    /// in-bounds list; an empty list is ignored.
    pub fn enter_review(&mut self, positions: Vec<usize>) {
        if positions.is_empty() {
            return;
        }
        self.review = Some(positions);
        self.cursor = 0;
    }

    /// Restores full-run addressing.
    pub fn exit_review(&mut self) {
        self.review = None;
        self.cursor = 0;
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.review.is_some()
    }

    #[must_use]
    pub fn review_positions(&self) -> Option<&[usize]> {
        self.review.as_deref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
