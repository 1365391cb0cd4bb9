//! Change notification.
//!
//! Callers register an observer for an address and are called back with the
//! address that changed after every successful mutation that concerns them.
//! Scoping follows [`Address::covers`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use petstore_core::Address;

/// Receives change notifications.
pub trait ChangeObserver: Send + Sync {
    fn on_change(&self, changed: &Address);
}

impl<F> ChangeObserver for F
where
    F: Fn(&Address) + Send + Sync,
{
    fn on_change(&self, changed: &Address) {
        self(changed)
    }
}

/// Handle returned by registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    address: Address,
    notify_for_descendants: bool,
    observer: Arc<dyn ChangeObserver>,
}

/// Registry of observers.
pub struct ChangeNotifier {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `observer` for changes to `address`.
    pub fn register(
        &self,
        address: Address,
        notify_for_descendants: bool,
        observer: Arc<dyn ChangeObserver>,
    ) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                id,
                address,
                notify_for_descendants,
                observer,
            });
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut registrations = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }

    /// Deliver a change of `changed` to every concerned observer.
    ///
    /// Observers run on the calling thread, outside the registry lock, so an
    /// observer may register or unregister. Returns how many were called.
    pub fn notify(&self, changed: &Address) -> usize {
        let targets: Vec<Arc<dyn ChangeObserver>> = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.address.covers(changed, r.notify_for_descendants))
            .map(|r| Arc::clone(&r.observer))
            .collect();

        for observer in &targets {
            observer.on_change(changed);
        }
        targets.len()
    }

    pub fn observer_count(&self) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstore_core::PetId;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<Address>>>, Arc<dyn ChangeObserver>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer: Arc<dyn ChangeObserver> =
            Arc::new(move |a: &Address| sink.lock().unwrap().push(*a));
        (seen, observer)
    }

    #[test]
    fn test_collection_change_reaches_item_observers() {
        let notifier = ChangeNotifier::new();
        let (seen, observer) = recorder();
        notifier.register(Address::item(PetId(3)), false, observer);

        assert_eq!(notifier.notify(&Address::Collection), 1);
        assert_eq!(notifier.notify(&Address::item(PetId(4))), 0);
        assert_eq!(*seen.lock().unwrap(), vec![Address::Collection]);
    }

    #[test]
    fn test_descendants_flag() {
        let notifier = ChangeNotifier::new();
        let (shallow, a) = recorder();
        let (deep, b) = recorder();
        notifier.register(Address::Collection, false, a);
        notifier.register(Address::Collection, true, b);

        notifier.notify(&Address::item(PetId(1)));
        assert!(shallow.lock().unwrap().is_empty());
        assert_eq!(*deep.lock().unwrap(), vec![Address::item(PetId(1))]);
    }

    #[test]
    fn test_unregister() {
        let notifier = ChangeNotifier::new();
        let (seen, observer) = recorder();
        let id = notifier.register(Address::Collection, true, observer);
        assert_eq!(notifier.observer_count(), 1);

        assert!(notifier.unregister(id));
        assert!(!notifier.unregister(id));
        notifier.notify(&Address::Collection);
        assert!(seen.lock().unwrap().is_empty());
    }
}
