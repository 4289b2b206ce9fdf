//! Runtime binding one editor model to one surface

use tracing::{debug, warn};

use super::input::handle_key;
use super::queue::TaskQueue;
use crate::commands::Cmd;
use crate::keymap::{default_bindings, Keymap, Keystroke};
use crate::messages::{EditorMsg, LoadPayload, Msg, SlotId};
use crate::model::{FilterModel, RestoreError};
use crate::surface::{SlotHandle, Surface};
use crate::update::{try_load, update};

/// Turns `run_until_idle` allows before giving up on a focus loop
const MAX_TURNS: usize = 64;

/// Drives a [`FilterModel`] and keeps a [`Surface`] in step with it
///
/// `handles[i]` is the surface slot of committed term `i`.
#[derive(Debug)]
pub struct Runtime<S: Surface> {
    model: FilterModel,
    surface: S,
    keymap: Keymap,
    handles: Vec<SlotHandle>,
    tasks: TaskQueue,
    destroyed: bool,
}

impl<S: Surface> Runtime<S> {
    /// Attach `model` to `surface` with the built-in keybindings
    pub fn new(model: FilterModel, surface: S) -> Self {
        Self::with_keymap(model, surface, Keymap::with_bindings(default_bindings()))
    }

    pub fn with_keymap(model: FilterModel, surface: S, keymap: Keymap) -> Self {
        let mut runtime = Self {
            model,
            surface,
            keymap,
            handles: Vec::new(),
            tasks: TaskQueue::new(),
            destroyed: false,
        };
        runtime.attach();
        runtime
    }

    pub fn model(&self) -> &FilterModel {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of deferred commands waiting for the next turn
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// The serialized search string
    pub fn value(&self) -> &str {
        self.model.serialized()
    }

    /// Text currently shown in a slot
    pub fn slot_value(&self, slot: SlotId) -> Option<String> {
        self.handle(slot).map(|h| self.surface.read_value(h))
    }

    /// Run `update` for `msg` and apply what it returns
    pub fn dispatch(&mut self, msg: Msg) {
        if self.destroyed {
            return;
        }

        if let Msg::Editor(EditorMsg::Load(payload)) = msg {
            // Errors are logged by `load`
            let _ = self.load(payload);
            return;
        }

        if let Some(cmd) = update(&mut self.model, msg) {
            self.apply(cmd);
        }
    }

    /// Restore the committed terms from `payload`
    ///
    /// `Slots` payloads adopt the surface's pre-rendered slots in order and
    /// must describe exactly as many slots as the surface shows.
    /// A malformed payload leaves both model and surface untouched.
    pub fn load(&mut self, payload: LoadPayload) -> Result<(), RestoreError> {
        if self.destroyed {
            return Ok(());
        }

        let adopted = match &payload {
            LoadPayload::Slots(metas) => {
                let handles: Vec<_> = self
                    .surface
                    .prerendered()
                    .into_iter()
                    .map(|(handle, _)| handle)
                    .collect();
                if handles.len() != metas.len() {
                    let e = RestoreError::IndexMismatch {
                        expected: handles.len(),
                        found: metas.len(),
                    };
                    warn!("Load rejected: {}", e);
                    return Err(e);
                }
                Some(handles)
            }
            _ => None,
        };

        match try_load(&mut self.model, payload) {
            Ok(cmd) => {
                if let Some(adopted) = adopted {
                    for stale in self.handles.iter().filter(|h| !adopted.contains(h)) {
                        self.surface.remove_slot(*stale);
                    }
                    self.handles = adopted;
                }
                if let Some(cmd) = cmd {
                    self.apply(cmd);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Load rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Route a keystroke through the keymap; returns whether it did anything
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> bool {
        if self.destroyed {
            return false;
        }

        let msgs = handle_key(&self.model, &self.keymap, keystroke);
        let handled = !msgs.is_empty();
        for msg in msgs {
            self.dispatch(msg);
        }
        handled
    }

    /// Type `text` into the focused slot one character at a time
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.dispatch(Msg::insert_char(ch));
        }
    }

    /// Execute the deferred commands queued before this turn started
    ///
    /// Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }

        let turn = self.tasks.take_turn();
        let count = turn.len();
        for cmd in turn {
            if self.destroyed {
                break;
            }
            self.execute(cmd);
        }
        count
    }

    /// Run turns until the queue is empty
    pub fn run_until_idle(&mut self) {
        for _ in 0..MAX_TURNS {
            if self.tasks.is_empty() || self.destroyed {
                return;
            }
            self.run_pending();
        }
        warn!(
            pending = self.tasks.len(),
            "deferred tasks still queued after {} turns",
            MAX_TURNS
        );
    }

    /// Swap in a freshly rendered surface and re-attach to it
    ///
    /// Returns the previous surface.
    pub fn refresh(&mut self, surface: S) -> S {
        let previous = std::mem::replace(&mut self.surface, surface);
        self.handles.clear();
        self.tasks.clear();
        self.attach();
        previous
    }

    /// Detach from the surface; later messages and turns are ignored
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.tasks.clear();
        debug!("runtime destroyed");
    }

    /// Bring the surface in line with the model
    fn attach(&mut self) {
        if self.model.has_terms() {
            self.dispatch(Msg::Editor(EditorMsg::Refresh));
            return;
        }

        let prerendered = self.surface.prerendered();
        if prerendered.is_empty() {
            self.dispatch(Msg::Editor(EditorMsg::Reset));
        } else {
            let metas = prerendered.into_iter().map(|(_, meta)| meta).collect();
            let _ = self.load(LoadPayload::Slots(metas));
        }
    }

    fn handle(&self, slot: SlotId) -> Option<SlotHandle> {
        match slot {
            SlotId::Input => Some(self.surface.input()),
            SlotId::Term(index) => self.handles.get(index).copied(),
        }
    }

    fn apply(&mut self, cmd: Cmd) {
        for cmd in cmd.flatten() {
            if cmd.is_deferred() {
                self.tasks.push(cmd);
            } else {
                self.execute(cmd);
            }
        }
    }

    fn execute(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::RenderTerm { index, term } => match self.handles.get(index) {
                Some(&handle) => self.surface.update_term(handle, &term),
                None => {
                    let handle = self.surface.render_term(&term, index);
                    let at = index.min(self.handles.len());
                    self.handles.insert(at, handle);
                }
            },
            Cmd::UpdateTerm { index, term } => {
                if let Some(&handle) = self.handles.get(index) {
                    self.surface.update_term(handle, &term);
                }
            }
            Cmd::RemoveSlot(index) => {
                if index < self.handles.len() {
                    let handle = self.handles.remove(index);
                    self.surface.remove_slot(handle);
                }
            }
            Cmd::WriteValue { slot, value } => {
                if let Some(handle) = self.handle(slot) {
                    self.surface.write_value(handle, &value);
                }
            }
            Cmd::SyncValue(value) => self.surface.sync_value(&value),
            Cmd::RenderPreview(label) => self.surface.render_preview(label.as_deref()),
            Cmd::SetPlaceholder(text) => self.surface.set_placeholder(&text),
            Cmd::SetRequired(required) => self.surface.set_required(required),
            Cmd::SetSelected { index, selected } => {
                if let Some(&handle) = self.handles.get(index) {
                    self.surface.set_selected(handle, selected);
                }
            }
            Cmd::SetValidity { slot, message } => {
                if let Some(handle) = self.handle(slot) {
                    self.surface.set_validity(handle, message.as_deref());
                }
            }
            Cmd::ReportValidity(slot) => {
                if let Some(handle) = self.handle(slot) {
                    self.surface.report_validity(handle);
                }
            }
            Cmd::Focus(slot) => match self.handle(slot) {
                Some(handle) => {
                    self.surface.focus(handle);
                    self.dispatch(Msg::focused(slot));
                }
                None => debug!(?slot, "focus target no longer rendered"),
            },
            Cmd::Notify(event) => self.surface.notify(&event),
            Cmd::Submit { value } => self.surface.submit(&value),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::EditorEvent;
    use crate::config::EditorConfig;
    use crate::filter::Filter;
    use crate::model::Term;
    use crate::surface::MemorySurface;

    fn runtime() -> Runtime<MemorySurface> {
        Runtime::new(
            FilterModel::filter(EditorConfig::default()),
            MemorySurface::new(),
        )
    }

    fn commit(rt: &mut Runtime<MemorySurface>, text: &str) {
        rt.type_text(text);
        rt.dispatch(Msg::exchange());
    }

    #[test]
    fn test_attach_empty_sets_placeholder_state() {
        let rt = runtime();
        assert!(rt.surface().slots().is_empty());
        assert_eq!(rt.surface().synced, "");
        assert_eq!(rt.pending_tasks(), 0);
    }

    #[test]
    fn test_attach_renders_existing_terms() {
        let model =
            FilterModel::from_filter(EditorConfig::default(), &Filter::condition("host", "=", "web"));
        let rt = Runtime::new(model, MemorySurface::new());
        assert_eq!(rt.surface().labels(), vec!["host", "=", "web"]);
        assert_eq!(rt.surface().synced, "host = web");
    }

    #[test]
    fn test_attach_adopts_prerendered_slots() {
        let terms = vec![Term::column("host"), Term::operator("=")];
        let surface = MemorySurface::with_prerendered(&terms);
        let rt = Runtime::new(FilterModel::filter(EditorConfig::default()), surface);

        assert_eq!(rt.model().terms.len(), 2);
        assert_eq!(rt.surface().slots().len(), 2);
        assert_eq!(rt.slot_value(SlotId::Term(1)).as_deref(), Some("="));
    }

    #[test]
    fn test_notifications_wait_for_turn() {
        let mut rt = runtime();
        commit(&mut rt, "host");

        assert_eq!(rt.model().terms.len(), 1);
        assert!(rt.pending_tasks() > 0);
        assert!(rt.surface().events.is_empty());

        rt.run_until_idle();
        assert!(rt
            .surface()
            .events
            .iter()
            .any(|e| matches!(e, EditorEvent::ResetCompletion)));
    }

    #[test]
    fn test_destroy_drops_pending_work() {
        let mut rt = runtime();
        commit(&mut rt, "host");
        rt.destroy();

        assert_eq!(rt.run_pending(), 0);
        rt.type_text("=");
        assert_eq!(rt.model().terms.len(), 1);
    }

    #[test]
    fn test_malformed_load_keeps_state() {
        let mut rt = runtime();
        commit(&mut rt, "host");
        let result = rt.load(LoadPayload::Json("not json".into()));
        assert!(matches!(result, Err(RestoreError::InvalidJson(_))));
        assert_eq!(rt.surface().labels(), vec!["host"]);
    }

    #[test]
    fn test_refresh_rerenders_on_new_surface() {
        let mut rt = runtime();
        commit(&mut rt, "host");
        let old = rt.refresh(MemorySurface::new());

        assert_eq!(old.labels(), vec!["host"]);
        assert_eq!(rt.surface().labels(), vec!["host"]);
        assert_eq!(rt.surface().synced, "host");
    }
}
