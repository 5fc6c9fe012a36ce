//! Cart store: holds the latest cart and tells observers when it changes.
//!
//! All transition logic lives in [`Cart::apply`]. The store only keeps the
//! current snapshot, serializes dispatches behind a mutex and fans the new
//! snapshot out to observers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cart::{Cart, CartAction, CartSummary};
use crate::money::Money;

/// Callback invoked after every dispatch with the new cart and the action
/// that produced it.
pub type Observer = Box<dyn Fn(&Cart, &CartAction) + Send + Sync>;

/// Single-writer holder of the current cart.
pub struct CartStore {
    cart: Mutex<Cart>,
    observers: Mutex<Vec<Observer>>,
}

impl CartStore {
    /// Create a store with an empty cart.
    pub fn new() -> Self {
        Self::with_cart(Cart::new())
    }

    /// Create a store starting from an existing cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer. Observers run in subscription order.
    ///
    /// Observers run outside the cart lock, so they may read the store, but
    /// must not subscribe further observers or dispatch.
    pub fn subscribe(&self, observer: impl Fn(&Cart, &CartAction) + Send + Sync + 'static) {
        lock(&self.observers).push(Box::new(observer));
    }

    /// Apply an action and return the resulting snapshot.
    ///
    /// The observer list stays locked from apply through notification, so
    /// observers see snapshots in the order the actions were applied. The
    /// cart lock is released first, leaving [`CartStore::snapshot`] usable
    /// from inside an observer.
    pub fn dispatch(&self, action: CartAction) -> Cart {
        let observers = lock(&self.observers);
        let next = {
            let mut cart = lock(&self.cart);
            let next = cart.apply(&action);
            *cart = next.clone();
            next
        };

        debug!(
            action = action.name(),
            product = action.product_id().map(|id| id.as_str()),
            entries = next.len(),
            item_count = next.item_count(),
            subtotal_cents = next.subtotal().amount_cents,
            "cart updated"
        );

        for observer in observers.iter() {
            observer(&next, &action);
        }

        next
    }

    /// Current cart.
    pub fn snapshot(&self) -> Cart {
        lock(&self.cart).clone()
    }

    /// Current subtotal.
    pub fn subtotal(&self) -> Money {
        lock(&self.cart).subtotal()
    }

    /// Current item count.
    pub fn item_count(&self) -> u64 {
        lock(&self.cart).item_count()
    }

    /// Current display summary.
    pub fn summary(&self) -> CartSummary {
        lock(&self.cart).summary()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*lock(&self.cart))
            .field("observers", &lock(&self.observers).len())
            .finish()
    }
}

// A panicking observer cannot leave a half-applied cart behind: the stored
// value is only ever replaced whole.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ids::ProductId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_dispatch_updates_snapshot() {
        let catalog = Catalog::demo();
        let laptop = catalog.get(&ProductId::new("laptop")).unwrap();
        let store = CartStore::new();

        let returned = store.dispatch(CartAction::AddItem(Arc::clone(&laptop)));
        assert_eq!(returned, store.snapshot());
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.subtotal(), Money::new(129_999));
    }

    #[test]
    fn test_observers_notified_once_per_dispatch() {
        let catalog = Catalog::demo();
        let sneakers = catalog.get(&ProductId::new("sneakers")).unwrap();
        let store = CartStore::new();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen_counts = Arc::new(Mutex::new(Vec::new()));
        {
            let calls = Arc::clone(&calls);
            let seen_counts = Arc::clone(&seen_counts);
            store.subscribe(move |cart, _action| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen_counts.lock().unwrap().push(cart.item_count());
            });
        }

        store.dispatch(CartAction::AddItem(Arc::clone(&sneakers)));
        store.dispatch(CartAction::IncrementQty(sneakers.id.clone()));
        store.dispatch(CartAction::RemoveItem(ProductId::new("ghost")));

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(*seen_counts.lock().unwrap(), vec![1, 2, 2]);
    }

    #[test]
    fn test_concurrent_adds_keep_invariants() {
        let catalog = Catalog::demo();
        let laptop = catalog.get(&ProductId::new("laptop")).unwrap();
        let store = Arc::new(CartStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let laptop = Arc::clone(&laptop);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.dispatch(CartAction::AddItem(Arc::clone(&laptop)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cart = store.snapshot();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 200);
    }

    #[test]
    fn test_observers_see_snapshots_in_apply_order() {
        let catalog = Catalog::demo();
        let laptop = catalog.get(&ProductId::new("laptop")).unwrap();

        for _ in 0..50 {
            let store = Arc::new(CartStore::new());
            let seen = Arc::new(Mutex::new(Vec::new()));
            {
                let seen = Arc::clone(&seen);
                store.subscribe(move |cart, _| seen.lock().unwrap().push(cart.item_count()));
            }

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let laptop = Arc::clone(&laptop);
                    thread::spawn(move || {
                        for _ in 0..50 {
                            store.dispatch(CartAction::AddItem(Arc::clone(&laptop)));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let seen = seen.lock().unwrap();
            let expected: Vec<u64> = (1..=200).collect();
            assert_eq!(*seen, expected);
            assert_eq!(store.item_count(), 200);
        }
    }

    #[test]
    fn test_observer_can_read_snapshot() {
        let catalog = Catalog::demo();
        let sneakers = catalog.get(&ProductId::new("sneakers")).unwrap();
        let store = Arc::new(CartStore::new());

        let matched = Arc::new(AtomicUsize::new(0));
        {
            let reader = Arc::clone(&store);
            let matched = Arc::clone(&matched);
            store.subscribe(move |cart, _| {
                if reader.snapshot() == *cart {
                    matched.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        store.dispatch(CartAction::AddItem(Arc::clone(&sneakers)));
        store.dispatch(CartAction::IncrementQty(sneakers.id.clone()));
        assert_eq!(matched.load(Ordering::SeqCst), 2);
    }
}
