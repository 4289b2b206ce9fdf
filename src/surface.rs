//! Rendering surface boundary
//!
//! The editor never draws anything itself. A [`Surface`] keeps one editable
//! slot per committed term plus the trailing input, and is kept in lockstep
//! with the model by the runtime applying [`Cmd`](crate::commands::Cmd)s.
//! [`MemorySurface`] records everything in memory for tests and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commands::EditorEvent;
use crate::model::term::{Term, TermType};

/// Opaque reference to a slot rendered by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(pub u64);

/// Metadata a surface keeps for each rendered term slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMeta {
    pub index: usize,
    pub label: String,
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub term_type: Option<TermType>,
}

impl SlotMeta {
    pub fn from_term(index: usize, term: &Term) -> Self {
        Self {
            index,
            label: term.label.clone(),
            search: term.search.clone(),
            class: term.class.clone(),
            term_type: term.term_type,
        }
    }

    pub fn to_term(&self) -> Term {
        Term {
            label: self.label.clone(),
            search: self.search.clone(),
            class: self.class.clone(),
            term_type: self.term_type,
        }
    }
}

/// An ordered list of editable slots
pub trait Surface {
    /// Handle of the trailing input
    fn input(&self) -> SlotHandle;

    /// Render a slot for `term`, positioned before any slot currently at `index`
    fn render_term(&mut self, term: &Term, index: usize) -> SlotHandle;

    /// Replace the metadata and text of a rendered term slot
    fn update_term(&mut self, handle: SlotHandle, term: &Term);

    fn remove_slot(&mut self, handle: SlotHandle);

    fn focus(&mut self, handle: SlotHandle);

    fn read_value(&self, handle: SlotHandle) -> String;

    fn write_value(&mut self, handle: SlotHandle, value: &str);

    /// Set (`Some`) or clear (`None`) the validation message of a slot
    fn set_validity(&mut self, handle: SlotHandle, message: Option<&str>);

    /// Show the validation message of a slot to the user
    fn report_validity(&mut self, handle: SlotHandle);

    fn render_preview(&mut self, label: Option<&str>);

    fn set_placeholder(&mut self, text: &str);

    fn set_required(&mut self, required: bool);

    fn set_selected(&mut self, handle: SlotHandle, selected: bool);

    /// Write the serialized search string to the value sink
    fn sync_value(&mut self, value: &str);

    fn notify(&mut self, event: &EditorEvent);

    fn submit(&mut self, value: &str);

    /// Term slots that were rendered before the editor attached, in order
    fn prerendered(&self) -> Vec<(SlotHandle, SlotMeta)> {
        Vec::new()
    }
}

/// A term slot of a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySlot {
    pub handle: SlotHandle,
    pub term: Term,
    pub value: String,
    pub validity: Option<String>,
    pub selected: bool,
}

type Listener = Box<dyn FnMut(&EditorEvent)>;

const INPUT_HANDLE: SlotHandle = SlotHandle(0);

/// In-memory surface recording everything applied to it
#[derive(Default)]
pub struct MemorySurface {
    next_handle: u64,
    slots: Vec<MemorySlot>,
    prerendered: Vec<(SlotHandle, SlotMeta)>,
    listeners: Vec<(String, Listener)>,
    pub input_value: String,
    pub input_validity: Option<String>,
    pub preview: Option<String>,
    pub placeholder: String,
    pub required: bool,
    pub synced: String,
    pub focused: Option<SlotHandle>,
    pub events: Vec<EditorEvent>,
    pub reported: Vec<SlotHandle>,
    pub submitted: Vec<String>,
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("slots", &self.slots)
            .field("input_value", &self.input_value)
            .field("preview", &self.preview)
            .field("synced", &self.synced)
            .field("focused", &self.focused)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that already shows `terms`, as if rendered by a server
    pub fn with_prerendered(terms: &[Term]) -> Self {
        let mut surface = Self::new();
        for (index, term) in terms.iter().enumerate() {
            let handle = surface.render_term(term, index);
            surface
                .prerendered
                .push((handle, SlotMeta::from_term(index, term)));
        }
        surface
    }

    /// Call `callback` for every notification named `name` (`complete`, `reset`, `abort`)
    pub fn subscribe(&mut self, name: &str, callback: impl FnMut(&EditorEvent) + 'static) {
        self.listeners.push((name.to_string(), Box::new(callback)));
    }

    pub fn slots(&self) -> &[MemorySlot] {
        &self.slots
    }

    pub fn slot(&self, handle: SlotHandle) -> Option<&MemorySlot> {
        self.slots.iter().find(|s| s.handle == handle)
    }

    /// Rendered term labels in slot order
    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.value.as_str()).collect()
    }

    fn slot_mut(&mut self, handle: SlotHandle) -> Option<&mut MemorySlot> {
        self.slots.iter_mut().find(|s| s.handle == handle)
    }
}

impl Surface for MemorySurface {
    fn input(&self) -> SlotHandle {
        INPUT_HANDLE
    }

    fn render_term(&mut self, term: &Term, index: usize) -> SlotHandle {
        self.next_handle += 1;
        let handle = SlotHandle(self.next_handle);
        let slot = MemorySlot {
            handle,
            term: term.clone(),
            value: term.label.clone(),
            validity: None,
            selected: false,
        };
        let at = index.min(self.slots.len());
        self.slots.insert(at, slot);
        handle
    }

    fn update_term(&mut self, handle: SlotHandle, term: &Term) {
        if let Some(slot) = self.slot_mut(handle) {
            slot.term = term.clone();
            slot.value = term.label.clone();
        }
    }

    fn remove_slot(&mut self, handle: SlotHandle) {
        self.slots.retain(|s| s.handle != handle);
        if self.focused == Some(handle) {
            self.focused = None;
        }
    }

    fn focus(&mut self, handle: SlotHandle) {
        self.focused = Some(handle);
    }

    fn read_value(&self, handle: SlotHandle) -> String {
        if handle == INPUT_HANDLE {
            return self.input_value.clone();
        }
        self.slot(handle).map(|s| s.value.clone()).unwrap_or_default()
    }

    fn write_value(&mut self, handle: SlotHandle, value: &str) {
        if handle == INPUT_HANDLE {
            self.input_value = value.to_string();
        } else if let Some(slot) = self.slot_mut(handle) {
            slot.value = value.to_string();
        }
    }

    fn set_validity(&mut self, handle: SlotHandle, message: Option<&str>) {
        let message = message.map(str::to_string);
        if handle == INPUT_HANDLE {
            self.input_validity = message;
        } else if let Some(slot) = self.slot_mut(handle) {
            slot.validity = message;
        }
    }

    fn report_validity(&mut self, handle: SlotHandle) {
        self.reported.push(handle);
    }

    fn render_preview(&mut self, label: Option<&str>) {
        self.preview = label.map(str::to_string);
    }

    fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }

    fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    fn set_selected(&mut self, handle: SlotHandle, selected: bool) {
        if let Some(slot) = self.slot_mut(handle) {
            slot.selected = selected;
        }
    }

    fn sync_value(&mut self, value: &str) {
        self.synced = value.to_string();
    }

    fn notify(&mut self, event: &EditorEvent) {
        self.events.push(event.clone());
        for (name, listener) in self.listeners.iter_mut() {
            if name == event.name() {
                listener(event);
            }
        }
    }

    fn submit(&mut self, value: &str) {
        self.submitted.push(value.to_string());
    }

    fn prerendered(&self) -> Vec<(SlotHandle, SlotMeta)> {
        self.prerendered
            .iter()
            .filter(|(handle, _)| self.slot(*handle).is_some())
            .cloned()
            .collect()
    }
}
