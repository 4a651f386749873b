/// Track lifecycle state.
///
/// Retirement is modeled as removal from the tracker's active set rather
/// than a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Newly created or recently missed track, not yet reportable on its
    /// hit streak alone
    #[default]
    Tentative,
    /// Track confirmed by a sufficient streak of consecutive matches
    Confirmed,
}
