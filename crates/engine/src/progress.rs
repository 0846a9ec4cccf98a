/// Aggregated view of run progress, useful for UI.
///
/// Progress is answered-over-total in both correction modes; whether
/// correctness is shown alongside it is a separate display concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
