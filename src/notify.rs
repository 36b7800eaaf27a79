//! Change notification for observable properties.
//!
//! Every observable property of the watcher and of [`crate::InputMethod`] owns one
//! [`Signal`]. Handlers run synchronously on the thread that emits, in the order
//! they were connected. None of this is `Send`: properties live on the UI thread.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one connected handler so it can be disconnected again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SignalHandle(u64);

type Handler<T> = Rc<dyn Fn(T)>;

/// A list of callbacks invoked with the new value of a property.
pub struct Signal<T: Copy> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SignalHandle, Handler<T>)>>,
}

impl<T: Copy> Signal<T> {
    /// Creates a signal with no handlers.
    pub fn new() -> Self {
        Signal {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Registers `handler`; it is called on every subsequent [`Signal::emit`].
    pub fn connect<F>(&self, handler: F) -> SignalHandle
    where
        F: Fn(T) + 'static,
    {
        let handle = SignalHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.handlers.borrow_mut().push((handle, Rc::new(handler)));
        handle
    }

    /// Removes the handler behind `handle`. Returns `false` if it was already gone.
    pub fn disconnect(&self, handle: SignalHandle) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != handle);
        handlers.len() != before
    }

    /// Calls every connected handler with `value`.
    ///
    /// Handlers connected or disconnected while emitting take effect on the next emission.
    pub fn emit(&self, value: T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(value);
        }
    }

    /// Number of currently connected handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl<T: Copy> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handler_count())
            .finish()
    }
}
