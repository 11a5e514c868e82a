//! Listener registry for host lifecycle extension points.
//!
//! A host subsystem (invoicing, sales, inventory) owns a lifecycle and exposes
//! a listener trait for it. Add-ons register implementations here; the host
//! calls them in registration order. Add-ons never own the lifecycle itself.

use std::sync::Arc;

/// Ordered set of listeners of one kind (usually `dyn SomeListener`).
pub struct Listeners<L: ?Sized> {
    items: Vec<Arc<L>>,
}

impl<L: ?Sized> Listeners<L> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a listener. It runs after every listener registered before it.
    pub fn register(&mut self, listener: Arc<L>) {
        self.items.push(listener);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<L>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<L: ?Sized> Default for Listeners<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> Clone for Listeners<L> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<L: ?Sized> core::fmt::Debug for Listeners<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.items.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    trait Greeter: Send + Sync {
        fn greet(&self, log: &Mutex<Vec<&'static str>>);
    }

    struct Named(&'static str);

    impl Greeter for Named {
        fn greet(&self, log: &Mutex<Vec<&'static str>>) {
            log.lock().unwrap().push(self.0);
        }
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let mut listeners: Listeners<dyn Greeter> = Listeners::new();
        listeners.register(Arc::new(Named("first")));
        listeners.register(Arc::new(Named("second")));

        let log = Mutex::new(Vec::new());
        for l in listeners.iter() {
            l.greet(&log);
        }

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn empty_by_default() {
        let listeners: Listeners<dyn Greeter> = Listeners::default();
        assert!(listeners.is_empty());
    }
}
