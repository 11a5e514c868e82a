use std::collections::HashSet;

use salesguard_core::{DomainError, DomainResult, UserId};
use salesguard_products::ProductId;

use crate::hooks::{InventoryHooks, MoveCompletion};
use crate::ledger::{OnHand, StockLedger};
use crate::moves::{MoveId, Picking, StockMove};

/// Owns the on-hand ledger and runs the move-completion lifecycle.
///
/// Quantities are committed and moves marked done before any listener runs,
/// so listeners observe the committed state and a completed move is never
/// handed to them twice. Over-deliveries may leave the on-hand negative.
#[derive(Debug, Default)]
pub struct StockService {
    ledger: StockLedger,
    hooks: InventoryHooks,
}

impl StockService {
    pub fn new(hooks: InventoryHooks) -> Self {
        Self {
            ledger: StockLedger::new(),
            hooks,
        }
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    /// Set the on-hand quantity directly (initial inventory). No listeners run.
    pub fn set_on_hand(&mut self, product: ProductId, quantity: f64) -> DomainResult<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation("on-hand quantity must be a finite, non-negative number"));
        }
        self.ledger.set(product, quantity);
        Ok(())
    }

    /// Validate every pending move of a picking.
    pub fn validate_picking(&mut self, picking: &mut Picking, actor: UserId) -> DomainResult<Vec<MoveId>> {
        let done = self.complete(picking.moves_mut(), actor)?;
        tracing::info!(picking = %picking.name(), completed = done.len(), "picking validated");
        Ok(done)
    }

    /// Complete the given moves. Moves already done are skipped, so calling
    /// this again with the same moves is a no-op. Returns the ids of the moves
    /// completed by this call.
    ///
    /// Listener failures are logged; they do not undo the completion.
    pub fn complete(&mut self, moves: &mut [StockMove], actor: UserId) -> DomainResult<Vec<MoveId>> {
        let pending: Vec<usize> = moves
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_done())
            .map(|(i, _)| i)
            .collect();
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen: HashSet<MoveId> = HashSet::new();
        for &i in &pending {
            if !seen.insert(moves[i].id_typed()) {
                return Err(DomainError::conflict(format!(
                    "move {} listed twice in one completion",
                    moves[i].id_typed()
                )));
            }
        }

        for &i in &pending {
            self.ledger.add(moves[i].product(), moves[i].on_hand_delta());
            moves[i].mark_done();
        }
        let completed: Vec<StockMove> = pending.iter().map(|&i| moves[i].clone()).collect();
        for m in &completed {
            let on_hand = self.ledger.on_hand(m.product());
            if on_hand < 0.0 {
                tracing::warn!(product_id = %m.product(), on_hand, "on-hand quantity went negative");
            }
        }

        let completion = MoveCompletion {
            moves: &completed,
            actor,
            on_hand: &self.ledger,
        };
        for listener in self.hooks.moves_done.iter() {
            if let Err(err) = listener.on_moves_done(&completion) {
                tracing::error!(error = %err, "move-done listener failed");
            }
        }

        Ok(completed.iter().map(StockMove::id_typed).collect())
    }
}

impl OnHand for StockService {
    fn on_hand(&self, product: ProductId) -> f64 {
        self.ledger.on_hand(product)
    }
}
