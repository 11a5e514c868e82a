use salesguard_core::{DomainResult, UserId};
use salesguard_events::Listeners;

use crate::ledger::OnHand;
use crate::moves::StockMove;

/// Moves that transitioned to done in one completion call.
pub struct MoveCompletion<'a> {
    /// Only the moves completed by this call (already-done moves are excluded).
    pub moves: &'a [StockMove],
    /// User who validated the moves.
    pub actor: UserId,
    /// Committed on-hand quantities, including all of `moves`.
    pub on_hand: &'a dyn OnHand,
}

/// Extension point: stock moves were completed.
///
/// Runs once per completion call, after the new quantities are committed and
/// the moves marked done. An error is logged by the host; the completion
/// stands and the moves are not handed to listeners again.
pub trait MoveDoneListener: Send + Sync {
    fn on_moves_done(&self, completion: &MoveCompletion<'_>) -> DomainResult<()>;
}

/// Registered inventory lifecycle listeners.
#[derive(Debug, Clone, Default)]
pub struct InventoryHooks {
    pub moves_done: Listeners<dyn MoveDoneListener>,
}

impl InventoryHooks {
    pub fn new() -> Self {
        Self::default()
    }
}
