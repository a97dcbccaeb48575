//! Content loading on the rendering side.
//!
//! A window exists as soon as it is opened, whether or not its content has
//! arrived. Surfaces keep one load per open window here; when a window goes
//! away its load is dropped, in flight or not, so nothing outlives the record.

use std::collections::BTreeMap;
use std::fmt;

use futures_util::FutureExt;

use crate::registry::AppId;
use crate::renderable::{LoadError, SharedLoad, View};
use crate::window::WindowManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Loading,
    Ready(View),
    /// Load failed; the window stays open with empty content.
    Placeholder(LoadError),
}

struct Slot {
    load: SharedLoad,
    state: ContentState,
}

#[derive(Default)]
pub struct SurfaceLoads {
    slots: BTreeMap<AppId, Slot>,
}

impl SurfaceLoads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loads for newly opened windows and drop loads of closed ones.
    pub fn sync(&mut self, windows: &WindowManager) {
        self.slots.retain(|id, slot| {
            let keep = windows.contains(id.as_str());
            if !keep && slot.state == ContentState::Loading {
                tracing::debug!(app_id = %id, "discarding in-flight content load");
            }
            keep
        });
        for window in windows.windows() {
            self.slots.entry(window.id().clone()).or_insert_with(|| Slot {
                load: window.renderable().load(),
                state: ContentState::Loading,
            });
        }
    }

    /// Advance pending loads without blocking. Returns how many settled.
    pub fn poll(&mut self) -> usize {
        let mut settled = 0;
        for (id, slot) in &mut self.slots {
            if slot.state != ContentState::Loading {
                continue;
            }
            let Some(outcome) = slot.load.clone().now_or_never() else {
                continue;
            };
            slot.state = match outcome {
                Ok(view) => ContentState::Ready(view),
                Err(err) => {
                    tracing::warn!(app_id = %id, error = %err, "content failed to load");
                    ContentState::Placeholder(err)
                }
            };
            settled += 1;
        }
        settled
    }

    pub fn state(&self, id: &str) -> Option<&ContentState> {
        self.slots.get(id).map(|slot| &slot.state)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for SurfaceLoads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(id, slot)| (id, &slot.state)))
            .finish()
    }
}
