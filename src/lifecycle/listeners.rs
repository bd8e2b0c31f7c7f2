//! Lifecycle listener registry.
//!
//! # Design Decisions
//! - Listeners run in insertion order, once per matching emit
//! - One-shot listeners are dropped after their first run
//! - `clear` drops every registration at once; it is the only cancellation

/// Events emitted by the page lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A page configuration became current.
    Configured { page: String },
    /// The page-ready signal fired.
    PageReady { page: String },
    /// The eager queue was handed to the loader.
    EagerQueueDispatched { entries: usize },
    /// The conditional queue was handed to the loader.
    ConditionalQueueDispatched { entries: usize },
}

/// Discriminant used to subscribe to a [`LifecycleEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEventKind {
    Configured,
    PageReady,
    EagerQueueDispatched,
    ConditionalQueueDispatched,
}

impl LifecycleEvent {
    pub fn kind(&self) -> LifecycleEventKind {
        match self {
            LifecycleEvent::Configured { .. } => LifecycleEventKind::Configured,
            LifecycleEvent::PageReady { .. } => LifecycleEventKind::PageReady,
            LifecycleEvent::EagerQueueDispatched { .. } => LifecycleEventKind::EagerQueueDispatched,
            LifecycleEvent::ConditionalQueueDispatched { .. } => {
                LifecycleEventKind::ConditionalQueueDispatched
            }
        }
    }
}

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&LifecycleEvent)>;

struct Listener {
    id: ListenerId,
    kind: LifecycleEventKind,
    once: bool,
    callback: Callback,
}

/// Ordered collection of lifecycle callbacks.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on every `kind` event until cleared.
    pub fn register<F>(&mut self, kind: LifecycleEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&LifecycleEvent) + 'static,
    {
        self.push(kind, false, Box::new(callback))
    }

    /// Run `callback` on the next `kind` event only.
    pub fn register_once<F>(&mut self, kind: LifecycleEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&LifecycleEvent) + 'static,
    {
        self.push(kind, true, Box::new(callback))
    }

    fn push(&mut self, kind: LifecycleEventKind, once: bool, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            once,
            callback,
        });
        id
    }

    /// Drop a single registration. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke matching listeners in insertion order. Returns how many ran.
    pub fn emit(&mut self, event: &LifecycleEvent) -> usize {
        let kind = event.kind();
        let mut invoked = 0;

        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(event);
            invoked += 1;
        }
        self.listeners.retain(|l| !(l.once && l.kind == kind));

        tracing::trace!(?kind, invoked, "Lifecycle event emitted");
        invoked
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
