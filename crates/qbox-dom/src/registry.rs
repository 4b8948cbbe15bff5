//! Element Registry
//!
//! Fixed mapping from logical UI element names to stable ids. Higher
//! components resolve elements only through the registry, never by direct
//! lookup, so tests can substitute a different document.

use std::collections::HashMap;

use crate::document::Document;
use crate::NodeId;

/// Logical UI elements of the Q&A page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiElement {
    QuestionForm,
    QuestionInput,
    SubmitButton,
    PlaceholderOverlay,
    LoadingIndicator,
    ResponseContainer,
    QuestionDisplay,
    AnswerDisplay,
    ActionButtons,
    CopyAnswerButton,
    CopyQaButton,
    CopyLinkButton,
    TweetLink,
    UpstreamLink,
    NewQuestionButton,
    LanguageSelector,
    ThemeToggle,
    HelpButton,
    HelpModal,
    HelpCloseButton,
    Toast,
}

impl UiElement {
    /// Default element id for this slot
    pub fn default_id(&self) -> &'static str {
        match self {
            Self::QuestionForm => "question-form",
            Self::QuestionInput => "question-input",
            Self::SubmitButton => "submit-button",
            Self::PlaceholderOverlay => "placeholder-overlay",
            Self::LoadingIndicator => "loading-indicator",
            Self::ResponseContainer => "response-container",
            Self::QuestionDisplay => "question-display",
            Self::AnswerDisplay => "answer-display",
            Self::ActionButtons => "action-buttons",
            Self::CopyAnswerButton => "copy-answer-button",
            Self::CopyQaButton => "copy-qa-button",
            Self::CopyLinkButton => "copy-link-button",
            Self::TweetLink => "tweet-link",
            Self::UpstreamLink => "upstream-link",
            Self::NewQuestionButton => "new-question-button",
            Self::LanguageSelector => "language-selector",
            Self::ThemeToggle => "theme-toggle",
            Self::HelpButton => "help-button",
            Self::HelpModal => "help-modal",
            Self::HelpCloseButton => "help-close-button",
            Self::Toast => "toast",
        }
    }

    /// All logical elements
    pub fn all() -> &'static [UiElement] {
        &[
            Self::QuestionForm,
            Self::QuestionInput,
            Self::SubmitButton,
            Self::PlaceholderOverlay,
            Self::LoadingIndicator,
            Self::ResponseContainer,
            Self::QuestionDisplay,
            Self::AnswerDisplay,
            Self::ActionButtons,
            Self::CopyAnswerButton,
            Self::CopyQaButton,
            Self::CopyLinkButton,
            Self::TweetLink,
            Self::UpstreamLink,
            Self::NewQuestionButton,
            Self::LanguageSelector,
            Self::ThemeToggle,
            Self::HelpButton,
            Self::HelpModal,
            Self::HelpCloseButton,
            Self::Toast,
        ]
    }
}

/// Registry of logical element bindings
#[derive(Debug)]
pub struct ElementRegistry {
    bindings: HashMap<UiElement, String>,
}

impl ElementRegistry {
    /// Registry with the default id for every slot
    pub fn new() -> Self {
        let bindings = UiElement::all()
            .iter()
            .map(|el| (*el, el.default_id().to_string()))
            .collect();
        Self { bindings }
    }

    /// Rebind a slot to a different element id
    pub fn bind(&mut self, element: UiElement, id: &str) {
        self.bindings.insert(element, id.to_string());
    }

    /// Bound id for a slot
    pub fn id_of(&self, element: UiElement) -> Option<&str> {
        self.bindings.get(&element).map(|s| s.as_str())
    }

    /// Resolve a slot against a document. Missing bindings and missing
    /// elements both resolve to None; callers treat that as a no-op.
    pub fn resolve(&self, doc: &Document, element: UiElement) -> Option<NodeId> {
        self.id_of(element).and_then(|id| doc.element_by_id(id))
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
