//! View State
//!
//! Named UI transitions over the question form, loading indicator, and
//! response view. No other code path flips this visibility directly, so
//! the exclusivity invariant (exactly one of form/response visible) holds
//! by construction. The current state is derived from the document, not
//! stored.

use tracing::debug;

use qbox_dom::{
    primitives, DeferredWrites, Document, ElementRegistry, FrameOp, PageLocation, UiElement,
};

/// Delay before a submit-button state write lands. Writing immediately
/// races other near-simultaneous writes to the same element.
pub const SUBMIT_STATE_DELAY_MS: u64 = 10;

/// Derived view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Form,
    Loading,
    Success,
    Error,
}

/// Outbound share-link targets populated on success
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLinks {
    pub tweet: String,
    pub upstream: String,
}

/// View-state controller
#[derive(Debug, Default)]
pub struct ViewController;

impl ViewController {
    pub fn new() -> Self {
        Self
    }

    /// Current state, derived from element visibility
    pub fn state(&self, doc: &Document, registry: &ElementRegistry) -> ViewState {
        let loading = registry.resolve(doc, UiElement::LoadingIndicator);
        if primitives::is_shown(doc, loading) {
            return ViewState::Loading;
        }
        let response = registry.resolve(doc, UiElement::ResponseContainer);
        if primitives::is_shown(doc, response) {
            let buttons = registry.resolve(doc, UiElement::ActionButtons);
            if primitives::is_shown(doc, buttons) {
                ViewState::Success
            } else {
                ViewState::Error
            }
        } else {
            ViewState::Form
        }
    }

    /// Whether the response view is visible
    pub fn response_visible(&self, doc: &Document, registry: &ElementRegistry) -> bool {
        let response = registry.resolve(doc, UiElement::ResponseContainer);
        primitives::is_shown(doc, response)
    }

    /// Show the loading indicator and hide the response container
    pub fn show_loading(&self, doc: &mut Document, registry: &ElementRegistry) {
        let loading = registry.resolve(doc, UiElement::LoadingIndicator);
        let response = registry.resolve(doc, UiElement::ResponseContainer);
        primitives::show(doc, loading);
        primitives::hide(doc, response);
        debug!("view: loading");
    }

    /// Hide the loading indicator only
    pub fn hide_loading(&self, doc: &mut Document, registry: &ElementRegistry) {
        let loading = registry.resolve(doc, UiElement::LoadingIndicator);
        primitives::hide(doc, loading);
    }

    /// Show the error view: the question (if given) with the fallback
    /// error message in place of an answer, and no action buttons.
    pub fn show_error(
        &self,
        doc: &mut Document,
        registry: &ElementRegistry,
        question: Option<&str>,
        message: &str,
    ) {
        self.hide_loading(doc, registry);

        let form = registry.resolve(doc, UiElement::QuestionForm);
        let question_display = registry.resolve(doc, UiElement::QuestionDisplay);
        let answer_display = registry.resolve(doc, UiElement::AnswerDisplay);
        let buttons = registry.resolve(doc, UiElement::ActionButtons);
        let response = registry.resolve(doc, UiElement::ResponseContainer);

        primitives::hide(doc, form);
        if let Some(question) = question {
            primitives::set_text(doc, question_display, question);
        }
        primitives::set_text(doc, answer_display, message);
        primitives::hide(doc, buttons);
        primitives::show(doc, response);
        debug!("view: error");
    }

    /// Show the success view: question and answer text, populated share
    /// links, and all action buttons.
    pub fn show_success(
        &self,
        doc: &mut Document,
        registry: &ElementRegistry,
        question: &str,
        answer: &str,
        links: &ShareLinks,
    ) {
        self.hide_loading(doc, registry);

        let form = registry.resolve(doc, UiElement::QuestionForm);
        let question_display = registry.resolve(doc, UiElement::QuestionDisplay);
        let answer_display = registry.resolve(doc, UiElement::AnswerDisplay);
        let tweet = registry.resolve(doc, UiElement::TweetLink);
        let upstream = registry.resolve(doc, UiElement::UpstreamLink);
        let buttons = registry.resolve(doc, UiElement::ActionButtons);
        let response = registry.resolve(doc, UiElement::ResponseContainer);

        primitives::hide(doc, form);
        primitives::set_text(doc, question_display, question);
        primitives::set_text(doc, answer_display, answer);
        primitives::set_attribute(doc, tweet, "href", &links.tweet);
        primitives::set_attribute(doc, upstream, "href", &links.upstream);
        primitives::show(doc, buttons);
        primitives::show(doc, response);
        debug!("view: success");
    }

    /// Return to the empty form: clear input and answer, hide the
    /// response, disable submit, and replace the URL with the site root.
    pub fn reset(
        &self,
        doc: &mut Document,
        registry: &ElementRegistry,
        writes: &mut DeferredWrites,
        location: &mut PageLocation,
        now_ms: u64,
    ) {
        let input = registry.resolve(doc, UiElement::QuestionInput);
        let question_display = registry.resolve(doc, UiElement::QuestionDisplay);
        let answer_display = registry.resolve(doc, UiElement::AnswerDisplay);
        let response = registry.resolve(doc, UiElement::ResponseContainer);
        let loading = registry.resolve(doc, UiElement::LoadingIndicator);
        let buttons = registry.resolve(doc, UiElement::ActionButtons);
        let form = registry.resolve(doc, UiElement::QuestionForm);

        primitives::set_value(doc, input, "");
        primitives::set_text(doc, answer_display, "");
        primitives::set_text(doc, question_display, "");
        primitives::hide(doc, response);
        primitives::hide(doc, loading);
        primitives::hide(doc, buttons);
        primitives::show(doc, form);

        self.set_submit_enabled(doc, registry, writes, false, now_ms);
        location.replace_path("/");
        debug!("view: reset");
    }

    /// Enable or disable the submit control. The write is deliberately
    /// deferred by a short delay; see `SUBMIT_STATE_DELAY_MS`.
    pub fn set_submit_enabled(
        &self,
        doc: &Document,
        registry: &ElementRegistry,
        writes: &mut DeferredWrites,
        enabled: bool,
        now_ms: u64,
    ) {
        if let Some(node) = registry.resolve(doc, UiElement::SubmitButton) {
            writes.schedule(
                now_ms + SUBMIT_STATE_DELAY_MS,
                FrameOp::SetDisabled {
                    node,
                    disabled: !enabled,
                },
            );
        }
    }
}
