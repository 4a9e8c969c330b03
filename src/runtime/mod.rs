pub mod command;
pub mod event;
pub mod key_bindings;

pub use command::{FocusMove, PickerCommand, TextAction};
pub use event::{InteractionResult, PickerAction, RejectReason};
pub use key_bindings::{KeyBinding, KeyBindings};
