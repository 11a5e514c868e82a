use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};
use salesguard_products::ProductId;

uuid_id!(
    /// Stock move identifier.
    MoveId,
    "MoveId"
);

uuid_id!(
    /// Transfer (picking) identifier.
    PickingId,
    "PickingId"
);

/// Kind of location a move goes from/to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Own warehouse stock; counts towards on-hand.
    Internal,
    Customer,
    Supplier,
    /// Inventory adjustment / loss.
    Adjustment,
}

impl Location {
    pub fn is_internal(self) -> bool {
        self == Location::Internal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    Draft,
    Done,
}

/// A quantity of one product moving between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMove {
    id: MoveId,
    product: ProductId,
    quantity: f64,
    source: Location,
    destination: Location,
    picking: Option<PickingId>,
    state: MoveState,
}

impl StockMove {
    pub fn new(
        id: MoveId,
        product: ProductId,
        quantity: f64,
        source: Location,
        destination: Location,
    ) -> DomainResult<Self> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation("move quantity must be a finite, positive number"));
        }
        Ok(Self {
            id,
            product,
            quantity,
            source,
            destination,
            picking: None,
            state: MoveState::Draft,
        })
    }

    pub fn id_typed(&self) -> MoveId {
        self.id
    }

    pub fn product(&self) -> ProductId {
        self.product
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn picking(&self) -> Option<PickingId> {
        self.picking
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == MoveState::Done
    }

    /// Signed effect of this move on the on-hand quantity.
    pub fn on_hand_delta(&self) -> f64 {
        match (self.source.is_internal(), self.destination.is_internal()) {
            (true, false) => -self.quantity,
            (false, true) => self.quantity,
            _ => 0.0,
        }
    }

    pub(crate) fn mark_done(&mut self) {
        self.state = MoveState::Done;
    }
}

impl Entity for StockMove {
    type Id = MoveId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A transfer grouping several moves (receipt, delivery, internal transfer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picking {
    id: PickingId,
    name: String,
    moves: Vec<StockMove>,
}

impl Picking {
    pub fn new(id: PickingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            moves: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> PickingId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn moves(&self) -> &[StockMove] {
        &self.moves
    }

    pub(crate) fn moves_mut(&mut self) -> &mut [StockMove] {
        &mut self.moves
    }

    /// Attach a draft move to this picking.
    pub fn add_move(&mut self, mut stock_move: StockMove) -> DomainResult<()> {
        if stock_move.is_done() {
            return Err(DomainError::invariant("cannot attach a completed move"));
        }
        if self.moves.iter().any(|m| m.same_record(&stock_move)) {
            return Err(DomainError::conflict(format!("move {} already attached", stock_move.id)));
        }
        stock_move.picking = Some(self.id);
        self.moves.push(stock_move);
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        !self.moves.is_empty() && self.moves.iter().all(StockMove::is_done)
    }
}

impl Entity for Picking {
    type Id = PickingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
