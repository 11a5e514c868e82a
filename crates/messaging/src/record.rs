use salesguard_core::Uuid;

/// Address of a host record that can carry messages: `(model, id)`.
///
/// Model names are the host's stable technical names
/// (e.g. `"stock.picking"`, `"product.product"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    model: &'static str,
    res_id: Uuid,
}

impl RecordRef {
    pub fn new(model: &'static str, res_id: impl Into<Uuid>) -> Self {
        Self {
            model,
            res_id: res_id.into(),
        }
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    pub fn res_id(&self) -> Uuid {
        self.res_id
    }
}

impl core::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.model, self.res_id)
    }
}
