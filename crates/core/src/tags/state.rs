use std::time::Duration;

use super::operations::{add_tag, filter_suggestions, remove_last, remove_tag};

/// Maximum number of tags when the caller does not set one.
pub const DEFAULT_MAX_TAGS: usize = 10;

/// Delay between losing focus and hiding suggestions, so that a pointer click
/// on a suggestion lands before the dropdown goes away.
pub const BLUR_HIDE_DELAY: Duration = Duration::from_millis(200);

/// Externally supplied data the input renders from.
#[derive(Debug, Clone, Copy)]
pub struct TagInputProps<'a> {
    pub tags: &'a [String],
    pub placeholder: Option<&'a str>,
    pub label: Option<&'a str>,
    pub suggestions: &'a [String],
    pub max_tags: usize,
}

impl<'a> TagInputProps<'a> {
    /// Props with no placeholder, label or suggestions and the default maximum.
    pub fn new(tags: &'a [String]) -> Self {
        Self {
            tags,
            placeholder: None,
            label: None,
            suggestions: &[],
            max_tags: DEFAULT_MAX_TAGS,
        }
    }

    pub fn with_suggestions(mut self, suggestions: &'a [String]) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Whether the list has reached its maximum.
    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.max_tags
    }
}

/// Keys the input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Other,
}

/// What happened to a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Added,
    Rejected,
}

/// Handle returned by [`TagInput::blur`]; only the latest one can hide suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurTicket(u64);

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInputView<'a> {
    pub label: Option<&'a str>,
    pub tags: &'a [String],
    pub draft: &'a str,
    pub placeholder: Option<&'a str>,
    pub disabled: bool,
    pub remaining: usize,
    pub suggestions: Vec<&'a str>,
}

/// Transient state of the input: the draft text and the dropdown flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    draft: String,
    suggestions_visible: bool,
    focus_generation: u64,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    /// The draft changed; suggestions show iff it is non-empty.
    pub fn text_changed(&mut self, value: impl Into<String>) {
        self.draft = value.into();
        self.suggestions_visible = !self.draft.is_empty();
    }

    /// Commits `candidate` as a new tag.
    ///
    /// Rejected candidates leave the state untouched and do not call `on_change`.
    pub fn commit<F>(
        &mut self,
        candidate: &str,
        props: &TagInputProps<'_>,
        on_change: F,
    ) -> CommitOutcome
    where
        F: FnOnce(Vec<String>),
    {
        match add_tag(props.tags, candidate, props.max_tags) {
            Some(next) => {
                on_change(next);
                self.draft.clear();
                self.suggestions_visible = false;
                CommitOutcome::Added
            }
            None => CommitOutcome::Rejected,
        }
    }

    /// Handles a key press in the text field.
    pub fn key_down<F>(&mut self, key: Key, props: &TagInputProps<'_>, on_change: F)
    where
        F: FnOnce(Vec<String>),
    {
        match key {
            Key::Enter => {
                let candidate = self.draft.clone();
                self.commit(&candidate, props, on_change);
            }
            Key::Backspace if self.draft.is_empty() => {
                if let Some(next) = remove_last(props.tags) {
                    on_change(next);
                }
            }
            Key::Backspace | Key::Other => {}
        }
    }

    /// A suggestion was picked from the dropdown.
    pub fn select_suggestion<F>(
        &mut self,
        suggestion: &str,
        props: &TagInputProps<'_>,
        on_change: F,
    ) -> CommitOutcome
    where
        F: FnOnce(Vec<String>),
    {
        self.commit(suggestion, props, on_change)
    }

    /// The remove control of a displayed tag was used.
    pub fn remove<F>(&self, tag: &str, props: &TagInputProps<'_>, on_change: F)
    where
        F: FnOnce(Vec<String>),
    {
        if let Some(next) = remove_tag(props.tags, tag) {
            on_change(next);
        }
    }

    /// The field gained focus. Invalidates any pending blur.
    pub fn focus(&mut self) {
        self.focus_generation += 1;
        self.suggestions_visible = !self.draft.is_empty();
    }

    /// The field lost focus. Call [`TagInput::blur_elapsed`] with the ticket
    /// after [`BLUR_HIDE_DELAY`].
    pub fn blur(&mut self) -> BlurTicket {
        self.focus_generation += 1;
        BlurTicket(self.focus_generation)
    }

    /// Hides suggestions unless focus changed since the ticket was issued.
    pub fn blur_elapsed(&mut self, ticket: BlurTicket) {
        if ticket.0 == self.focus_generation {
            self.suggestions_visible = false;
        }
    }

    /// Suggestions to display, recomputed from the current draft.
    pub fn filtered_suggestions<'a>(&self, props: &TagInputProps<'a>) -> Vec<&'a str> {
        if !self.suggestions_visible {
            return Vec::new();
        }
        filter_suggestions(props.suggestions, &self.draft, props.tags)
    }

    /// Builds the renderable view for the current state.
    pub fn view<'a>(&'a self, props: &TagInputProps<'a>) -> TagInputView<'a> {
        let disabled = props.is_full();
        TagInputView {
            label: props.label,
            tags: props.tags,
            draft: &self.draft,
            placeholder: if disabled { None } else { props.placeholder },
            disabled,
            remaining: props.max_tags.saturating_sub(props.tags.len()),
            suggestions: self.filtered_suggestions(props),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Runs one event against `current`, applying any emitted list the way the
    /// owning form would. Returns the emitted list, if any.
    fn emit(
        current: &mut Vec<String>,
        event: impl FnOnce(&[String], &mut dyn FnMut(Vec<String>)),
    ) -> Option<Vec<String>> {
        let mut emitted = None;
        let snapshot = current.clone();
        event(&snapshot, &mut |next: Vec<String>| emitted = Some(next));
        if let Some(next) = &emitted {
            *current = next.clone();
        }
        emitted
    }

    #[test]
    fn test_initial_state() {
        let input = TagInput::new();
        assert_eq!(input.draft(), "");
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn test_text_changed_toggles_suggestions() {
        let mut input = TagInput::new();
        input.text_changed("w");
        assert!(input.suggestions_visible());
        input.text_changed("");
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn test_enter_commits_and_clears() {
        let mut input = TagInput::new();
        let mut current = Vec::new();

        input.text_changed("Web");
        let emitted = emit(&mut current, |t, cb| {
            input.key_down(Key::Enter, &TagInputProps::new(t), cb)
        });

        assert_eq!(emitted, Some(tags(&["web"])));
        assert_eq!(input.draft(), "");
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn test_adding_same_tag_twice_keeps_one() {
        let mut input = TagInput::new();
        let mut current = Vec::new();

        input.text_changed("Web");
        emit(&mut current, |t, cb| {
            input.key_down(Key::Enter, &TagInputProps::new(t), cb)
        });
        input.text_changed("web");
        let emitted = emit(&mut current, |t, cb| {
            input.key_down(Key::Enter, &TagInputProps::new(t), cb)
        });

        assert_eq!(emitted, None);
        assert_eq!(current, tags(&["web"]));
        // Rejection leaves the draft alone.
        assert_eq!(input.draft(), "web");
    }

    #[test]
    fn test_third_tag_rejected_at_max_two() {
        let mut input = TagInput::new();
        let mut current = tags(&["a", "b"]);

        input.text_changed("c");
        let emitted = emit(&mut current, |t, cb| {
            let props = TagInputProps::new(t).with_max_tags(2);
            assert_eq!(input.commit("c", &props, cb), CommitOutcome::Rejected);
        });

        assert_eq!(emitted, None);
        assert_eq!(current, tags(&["a", "b"]));
        assert!(input.view(&TagInputProps::new(&current).with_max_tags(2)).disabled);
    }

    #[test]
    fn test_backspace_on_empty_draft_removes_last() {
        let mut input = TagInput::new();
        let mut current = tags(&["a", "b"]);

        let emitted = emit(&mut current, |t, cb| {
            input.key_down(Key::Backspace, &TagInputProps::new(t), cb)
        });

        assert_eq!(emitted, Some(tags(&["a"])));
        assert_eq!(current, tags(&["a"]));
    }

    #[test]
    fn test_backspace_with_draft_does_nothing() {
        let mut input = TagInput::new();
        let mut current = tags(&["a", "b"]);

        input.text_changed("x");
        let emitted = emit(&mut current, |t, cb| {
            input.key_down(Key::Backspace, &TagInputProps::new(t), cb)
        });

        assert_eq!(emitted, None);
        assert_eq!(current, tags(&["a", "b"]));
    }

    #[test]
    fn test_backspace_with_no_tags_does_nothing() {
        let mut input = TagInput::new();
        let mut current = Vec::new();
        let emitted = emit(&mut current, |t, cb| {
            input.key_down(Key::Backspace, &TagInputProps::new(t), cb)
        });
        assert_eq!(emitted, None);
    }

    #[test]
    fn test_remove_specific_tag() {
        let input = TagInput::new();
        let mut current = tags(&["a", "b", "c"]);

        let emitted = emit(&mut current, |t, cb| {
            input.remove("a", &TagInputProps::new(t), cb)
        });

        assert_eq!(emitted, Some(tags(&["b", "c"])));
    }

    #[test]
    fn test_select_suggestion_commits() {
        let mut input = TagInput::new();
        let suggestions = tags(&["Design"]);
        let mut current = Vec::new();

        input.text_changed("de");
        let emitted = emit(&mut current, |t, cb| {
            let props = TagInputProps::new(t).with_suggestions(&suggestions);
            input.select_suggestion("Design", &props, cb);
        });

        assert_eq!(emitted, Some(tags(&["design"])));
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn test_filtered_suggestions_follow_draft() {
        let mut input = TagInput::new();
        let suggestions = tags(&["web", "design", "développement"]);
        let current: Vec<String> = Vec::new();
        let props = TagInputProps::new(&current).with_suggestions(&suggestions);

        input.text_changed("de");
        assert_eq!(input.filtered_suggestions(&props), vec!["design", "développement"]);

        input.text_changed("w");
        assert_eq!(input.filtered_suggestions(&props), vec!["web"]);
    }

    #[test]
    fn test_blur_hides_after_delay() {
        let mut input = TagInput::new();
        input.text_changed("de");

        let ticket = input.blur();
        assert!(input.suggestions_visible());
        input.blur_elapsed(ticket);
        assert!(!input.suggestions_visible());
    }

    #[test]
    fn test_focus_supersedes_pending_blur() {
        let mut input = TagInput::new();
        input.text_changed("de");

        let ticket = input.blur();
        input.focus();
        input.blur_elapsed(ticket);
        assert!(input.suggestions_visible());
    }

    #[test]
    fn test_view() {
        let input = TagInput::new();
        let current = tags(&["a"]);
        let props = TagInputProps::new(&current)
            .with_max_tags(3)
            .with_label("Tags")
            .with_placeholder("Add a tag");

        let view = input.view(&props);
        assert_eq!(view.label, Some("Tags"));
        assert_eq!(view.placeholder, Some("Add a tag"));
        assert_eq!(view.remaining, 2);
        assert!(!view.disabled);
        assert!(view.suggestions.is_empty());
    }
}
