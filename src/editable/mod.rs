//! Single-line text editing for editor slots.
//!
//! Both the trailing input and the draft of a focused term slot are a
//! [`SlotInput`]: one line of text with a character-indexed cursor.
//!
//! # Example
//!
//! ```ignore
//! use term_filter::editable::SlotInput;
//!
//! let mut input = SlotInput::from_text("hst");
//! input.move_left();
//! input.move_left();
//! input.insert_char('o');
//!
//! assert_eq!(input.text(), "host");
//! ```

mod state;

pub use state::SlotInput;
