//! Headless model of the tag-entry input.
//!
//! The tag list itself is owned by the caller and passed in through
//! [`TagInputProps`] on every event; the model only keeps the text being typed
//! and whether the suggestion dropdown is open. Any change to the list is
//! emitted through the `on_change` callback as a whole new list.

mod operations;
mod state;

pub use operations::{add_tag, filter_suggestions, fold, normalize_tag, remove_last, remove_tag};
pub use state::{
    BlurTicket, CommitOutcome, Key, TagInput, TagInputProps, TagInputView, BLUR_HIDE_DELAY,
    DEFAULT_MAX_TAGS,
};
