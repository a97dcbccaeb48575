//! Change notifications for rendering surfaces.
//!
//! Surfaces register a callback and are told about every effective mutation
//! of the window set after it has been applied. Operations that turn into
//! no-ops do not notify.

use std::fmt;

use crate::registry::AppId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmEvent {
    Opened { id: AppId, z_index: u64 },
    Focused { id: AppId, z_index: u64 },
    Minimized { id: AppId },
    Updated { id: AppId },
    Closed { id: AppId },
}

impl WmEvent {
    pub fn id(&self) -> &AppId {
        match self {
            WmEvent::Opened { id, .. }
            | WmEvent::Focused { id, .. }
            | WmEvent::Minimized { id }
            | WmEvent::Updated { id }
            | WmEvent::Closed { id } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&WmEvent)>;

#[derive(Default)]
pub struct Subscribers {
    entries: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&WmEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &WmEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
