//! Runtime module - binds an editor to a surface
//!
//! - `app` - the `Runtime`: dispatch, command application, attach/refresh/destroy
//! - `input` - keystroke to message mapping
//! - `queue` - deferred commands run on the next turn

pub mod app;
pub mod input;
pub mod queue;

pub use app::Runtime;
pub use queue::TaskQueue;
