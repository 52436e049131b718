//! Change listeners with scoped registration.
//!
//! Everything runs on the thread delivering input events, so the registry is
//! `Rc<RefCell<..>>` rather than anything lock based.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(T)>>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

pub struct Listeners<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T: Copy + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` until the returned handle is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, f: impl FnMut(T) + 'static) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let callback: Callback<T> = Rc::new(RefCell::new(f));
        registry.entries.push((id, callback));

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn emit(&self, value: T) {
        // Snapshot first so a listener may drop its own subscription.
        let callbacks: Vec<Callback<T>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            (&mut *cb.borrow_mut())(value);
        }
    }
}

/// Handle for a registered listener. Unregisters on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the listener registered for as long as the registry lives.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
