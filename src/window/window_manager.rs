use super::{WindowPatch, WindowRecord, ZOrder};
use crate::config::WmConfig;
use crate::events::{Subscribers, SubscriptionId, WmEvent};
use crate::registry::AppDescriptor;

/// What [`WindowManager::open_app`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Focused,
}

/// Sole owner of the open windows and of the stacking counter.
///
/// Windows are keyed by app id, so an app has at most one window. Every
/// operation is total: asking for a window that is not open is a no-op,
/// since a close and a focus can legitimately race within one tick.
#[derive(Debug, Default)]
pub struct WindowManager {
    // append order; stacking is decided by `z_index` alone
    windows: Vec<WindowRecord>,
    z_order: ZOrder,
    config: WmConfig,
    subscribers: Subscribers,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::with_config(WmConfig::default())
    }

    pub fn with_config(config: WmConfig) -> Self {
        Self {
            windows: Vec::new(),
            z_order: ZOrder::new(),
            config,
            subscribers: Subscribers::new(),
        }
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&WmEvent) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Open windows in the order they were opened.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Every window, back to front.
    pub fn draw_order(&self) -> Vec<&WindowRecord> {
        let mut order: Vec<&WindowRecord> = self.windows.iter().collect();
        order.sort_by_key(|w| w.z_index);
        order
    }

    /// Non-minimized windows, back to front.
    pub fn visible_draw_order(&self) -> Vec<&WindowRecord> {
        let mut order = self.draw_order();
        order.retain(|w| !w.minimized);
        order
    }

    /// Topmost window that is not minimized.
    pub fn frontmost(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
    }

    /// Open a window for `app`, or focus it if one is already open.
    pub fn open_app(&mut self, app: &AppDescriptor) -> OpenOutcome {
        if self.contains(app.id().as_str()) {
            self.focus_window(app.id().as_str());
            return OpenOutcome::Focused;
        }
        let z_index = self.z_order.allocate();
        let record = WindowRecord::from_descriptor(app, &self.config, z_index);
        tracing::debug!(
            app_id = %record.id,
            z = z_index,
            width = record.rect.width,
            height = record.rect.height,
            "opened window"
        );
        let id = record.id.clone();
        self.windows.push(record);
        self.subscribers.notify(&WmEvent::Opened { id, z_index });
        OpenOutcome::Opened
    }

    /// Remove the window. Returns whether it was open.
    pub fn close_window(&mut self, id: &str) -> bool {
        let Some(pos) = self.windows.iter().position(|w| w.id == id) else {
            tracing::debug!(app_id = id, "close ignored, window not open");
            return false;
        };
        let record = self.windows.remove(pos);
        tracing::debug!(app_id = %record.id, "closed window");
        self.subscribers.notify(&WmEvent::Closed { id: record.id });
        true
    }

    /// Raise the window above every other and restore it if minimized.
    pub fn focus_window(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            tracing::debug!(app_id = id, "focus ignored, window not open");
            return false;
        }
        let z_index = self.z_order.allocate();
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.z_index = z_index;
        window.minimized = false;
        let id = window.id.clone();
        tracing::debug!(app_id = %id, z = z_index, "focused window");
        self.subscribers.notify(&WmEvent::Focused { id, z_index });
        true
    }

    /// Hide the window without touching its stacking position.
    pub fn minimize_window(&mut self, id: &str) -> bool {
        let Some(window) = self.get_mut(id) else {
            tracing::debug!(app_id = id, "minimize ignored, window not open");
            return false;
        };
        if window.minimized {
            return true;
        }
        window.minimized = true;
        let id = window.id.clone();
        tracing::debug!(app_id = %id, "minimized window");
        self.subscribers.notify(&WmEvent::Minimized { id });
        true
    }

    /// Overwrite the fields named in `patch`. This is how drag and resize
    /// results reach the window set.
    pub fn update_window(&mut self, id: &str, patch: WindowPatch) -> bool {
        let Some(window) = self.get_mut(id) else {
            tracing::debug!(app_id = id, "update ignored, window not open");
            return false;
        };
        if patch.is_empty() {
            return true;
        }
        window.apply(patch);
        let id = window.id.clone();
        self.subscribers.notify(&WmEvent::Updated { id });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn calc() -> AppDescriptor {
        AppDescriptor::new("calc", "Calculator", "/img/icons/apps/calculator.png")
            .with_default_size(300, 550)
    }

    fn notes() -> AppDescriptor {
        AppDescriptor::new("notes", "Notepad", "/img/icons/apps/notepad.png")
    }

    #[test]
    fn open_creates_record_from_descriptor() {
        let mut wm = WindowManager::new();
        assert_eq!(wm.open_app(&calc()), OpenOutcome::Opened);
        assert_eq!(wm.len(), 1);
        let w = wm.get("calc").unwrap();
        assert_eq!(w.title(), "Calculator");
        assert_eq!(w.icon(), "/img/icons/apps/calculator.png");
        assert_eq!((w.x(), w.y(), w.width(), w.height()), (50, 50, 300, 550));
        assert!(!w.minimized());
        assert_eq!(w.z_index(), 2);
    }

    #[test]
    fn reopen_focuses_instead_of_duplicating() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        let first = wm.get("calc").unwrap().z_index();
        assert_eq!(wm.open_app(&calc()), OpenOutcome::Focused);
        assert_eq!(wm.len(), 1);
        assert!(wm.get("calc").unwrap().z_index() > first);
    }

    #[test]
    fn missing_dimensions_fall_back_to_config() {
        let mut wm = WindowManager::new();
        wm.open_app(&notes());
        let w = wm.get("notes").unwrap();
        assert_eq!((w.width(), w.height()), (1024, 768));

        let partial = AppDescriptor::new("half", "Half", "/h.png").with_default_width(640);
        wm.open_app(&partial);
        let w = wm.get("half").unwrap();
        assert_eq!((w.width(), w.height()), (640, 768));
    }

    #[test]
    fn custom_config_drives_new_windows() {
        let config = WmConfig::default()
            .with_default_size(800, 600)
            .with_origin(10, 20);
        let mut wm = WindowManager::with_config(config);
        wm.open_app(&notes());
        let w = wm.get("notes").unwrap();
        assert_eq!((w.x(), w.y(), w.width(), w.height()), (10, 20, 800, 600));
    }

    #[test]
    fn operations_on_absent_ids_are_noops() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        let before: Vec<(String, u64, bool)> = wm
            .windows()
            .iter()
            .map(|w| (w.id().to_string(), w.z_index(), w.minimized()))
            .collect();

        assert!(!wm.close_window("ghost"));
        assert!(!wm.focus_window("ghost"));
        assert!(!wm.minimize_window("ghost"));
        assert!(!wm.update_window("ghost", WindowPatch::new().width(1)));

        let after: Vec<(String, u64, bool)> = wm
            .windows()
            .iter()
            .map(|w| (w.id().to_string(), w.z_index(), w.minimized()))
            .collect();
        assert_eq!(before, after);
        assert_eq!(wm.get("calc").unwrap().width(), 300);
    }

    #[test]
    fn noop_focus_does_not_consume_z_values() {
        let mut wm = WindowManager::new();
        wm.focus_window("ghost");
        wm.open_app(&calc());
        assert_eq!(wm.get("calc").unwrap().z_index(), 2);
    }

    #[test]
    fn focus_and_open_allocate_strictly_increasing_z() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        wm.open_app(&notes());
        let mut last = wm.get("notes").unwrap().z_index();
        for id in ["calc", "notes", "calc", "calc"] {
            wm.focus_window(id);
            let z = wm.get(id).unwrap().z_index();
            assert!(z > last);
            last = z;
        }
    }

    #[test]
    fn minimize_keeps_z_and_focus_restores() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        let z = wm.get("calc").unwrap().z_index();
        assert!(wm.minimize_window("calc"));
        let w = wm.get("calc").unwrap();
        assert!(w.minimized());
        assert_eq!(w.z_index(), z);

        wm.focus_window("calc");
        assert!(!wm.get("calc").unwrap().minimized());
    }

    #[test]
    fn update_changes_only_named_fields() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        let z = wm.get("calc").unwrap().z_index();
        assert!(wm.update_window("calc", WindowPatch::new().width(500)));
        let w = wm.get("calc").unwrap();
        assert_eq!(w.width(), 500);
        assert_eq!(w.height(), 550);
        assert_eq!((w.x(), w.y()), (50, 50));
        assert_eq!(w.z_index(), z);
        assert!(!w.minimized());
        assert_eq!(w.title(), "Calculator");

        wm.update_window("calc", WindowPatch::new().position(-20, 300).minimized(true));
        let w = wm.get("calc").unwrap();
        assert_eq!((w.x(), w.y()), (-20, 300));
        assert!(w.minimized());
        assert_eq!(w.z_index(), z);
    }

    #[test]
    fn close_removes_and_reopen_starts_fresh() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        wm.update_window("calc", WindowPatch::new().position(400, 400));
        assert!(wm.close_window("calc"));
        assert!(wm.is_empty());
        assert!(!wm.close_window("calc"));

        wm.open_app(&calc());
        let w = wm.get("calc").unwrap();
        assert_eq!((w.x(), w.y()), (50, 50));
        assert_eq!(w.z_index(), 3);
    }

    #[test]
    fn draw_order_sorts_by_z_not_open_order() {
        let mut wm = WindowManager::new();
        wm.open_app(&calc());
        wm.open_app(&notes());
        wm.focus_window("calc");
        let ids: Vec<&str> = wm.draw_order().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, ["notes", "calc"]);
        let open: Vec<&str> = wm.windows().iter().map(|w| w.id().as_str()).collect();
        assert_eq!(open, ["calc", "notes"]);
        assert_eq!(wm.frontmost().unwrap().id().as_str(), "calc");

        wm.minimize_window("calc");
        let visible: Vec<&str> = wm
            .visible_draw_order()
            .iter()
            .map(|w| w.id().as_str())
            .collect();
        assert_eq!(visible, ["notes"]);
        assert_eq!(wm.frontmost().unwrap().id().as_str(), "notes");
        assert_eq!(wm.draw_order().len(), 2);
    }

    #[test]
    fn window_keeps_snapshot_of_descriptor() {
        let mut wm = WindowManager::new();
        let app = calc();
        wm.open_app(&app);
        let renamed = AppDescriptor::new("calc", "Renamed", "/other.png");
        wm.open_app(&renamed);
        let w = wm.get("calc").unwrap();
        assert_eq!(w.title(), "Calculator");
        assert!(w.renderable().ptr_eq(app.renderable()));
    }

    #[test]
    fn subscribers_see_effective_mutations_only() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        let sink = events.clone();
        let sub = wm.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        wm.open_app(&calc());
        wm.open_app(&calc());
        wm.minimize_window("calc");
        wm.minimize_window("calc");
        wm.update_window("calc", WindowPatch::new());
        wm.update_window("calc", WindowPatch::new().height(10));
        wm.focus_window("ghost");
        wm.close_window("calc");
        wm.close_window("calc");

        let id = crate::registry::AppId::from("calc");
        assert_eq!(
            *events.borrow(),
            vec![
                WmEvent::Opened {
                    id: id.clone(),
                    z_index: 2
                },
                WmEvent::Focused {
                    id: id.clone(),
                    z_index: 3
                },
                WmEvent::Minimized { id: id.clone() },
                WmEvent::Updated { id: id.clone() },
                WmEvent::Closed { id },
            ]
        );

        assert!(wm.unsubscribe(sub));
        wm.open_app(&notes());
        assert_eq!(events.borrow().len(), 5);
    }

    #[test]
    fn independent_managers_do_not_share_state() {
        let mut a = WindowManager::new();
        let mut b = WindowManager::new();
        a.open_app(&calc());
        a.open_app(&notes());
        b.open_app(&notes());
        assert_eq!(b.len(), 1);
        assert_eq!(b.get("notes").unwrap().z_index(), 2);
        assert_eq!(a.get("notes").unwrap().z_index(), 3);
    }
}
