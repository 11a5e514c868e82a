//! Records with a stable identity (customers, invoices, stock moves).

/// Anything addressed by id rather than by value.
///
/// Two entities with the same id are the same record, even if their other
/// fields differ (e.g. a stock move before and after completion).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn same_record(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
