//! Application
//!
//! The page's managers wired together, driven by host events and ticks.
//! Boot order: localization first (nothing paints untranslated), then the
//! UI managers, then any question embedded in the URL.

use std::collections::HashMap;

use log::{info, warn};

use qbox_a11y::announcer::ScreenReaderAnnouncer;
use qbox_a11y::focus::{FocusManager, TRIGGER_ATTR};
use qbox_a11y::keyboard::{self, Shortcut, ShortcutContext};
use qbox_dom::events::{Key, KeyEvent};
use qbox_dom::url::{path_for_question, question_from_path};
use qbox_dom::{
    primitives, DeferredWrites, Document, ElementRegistry, KeyValueStorage, MediaPrefs, NodeId,
    PageLocation, Rect, UiElement,
};
use qbox_i18n::{detect_language, I18nEvent, LazyTranslator, LocalizationEngine, SetLanguage};
use qbox_ui::view::ShareLinks;
use qbox_ui::{
    share, AnimationKind, AnimationOptions, Animator, PlaceholderRotator, ThemeController,
    ToastManager, ViewController,
};

use crate::api::{self, AskOutcome, AskRequest, QuestionTransport};
use crate::backend::LocaleFetcher;
use crate::clipboard::Clipboard;
use crate::config::AppConfig;
use crate::page;
use crate::AppError;

/// Host-provided services, borrowed per call so tests keep ownership
pub struct Services<'a> {
    pub storage: &'a mut dyn KeyValueStorage,
    pub locales: &'a mut dyn LocaleFetcher,
    pub transport: &'a mut dyn QuestionTransport,
    pub clipboard: &'a mut dyn Clipboard,
}

/// The application
pub struct App {
    pub config: AppConfig,
    pub doc: Document,
    pub registry: ElementRegistry,
    pub location: PageLocation,
    pub media: MediaPrefs,
    browser_languages: Vec<String>,

    pub i18n: LocalizationEngine,
    pub focus: FocusManager,
    pub view: ViewController,
    pub theme: ThemeController,
    pub rotator: PlaceholderRotator,
    pub animator: Animator,
    pub announcer: ScreenReaderAnnouncer,
    pub toasts: ToastManager,
    pub lazy: LazyTranslator,
    deferred: DeferredWrites,

    current_question: Option<String>,
    current_answer: Option<String>,
    current_share_id: Option<String>,
    /// Last external URL an action asked the host to open
    pub last_opened_url: Option<String>,
}

impl App {
    /// Build the page and its managers. Nothing runs until `bootstrap`.
    pub fn new(
        config: AppConfig,
        href: &str,
        browser_languages: Vec<String>,
        media: MediaPrefs,
    ) -> Result<Self, AppError> {
        let doc = page::build_page(&config);
        let location = PageLocation::parse(href)?;
        let i18n = LocalizationEngine::new(
            config.supported_languages.clone(),
            &config.default_language,
            config.rtl_languages.clone(),
        );

        Ok(Self {
            config,
            doc,
            registry: ElementRegistry::new(),
            location,
            media,
            browser_languages,
            i18n,
            focus: FocusManager::new(),
            view: ViewController::new(),
            theme: ThemeController::default(),
            rotator: PlaceholderRotator::new(),
            animator: Animator::new(),
            announcer: ScreenReaderAnnouncer::new(),
            toasts: ToastManager::new(),
            lazy: LazyTranslator::new(),
            deferred: DeferredWrites::new(),
            current_question: None,
            current_answer: None,
            current_share_id: None,
            last_opened_url: None,
        })
    }

    /// Initialize everything and process a URL-embedded question
    pub fn bootstrap(&mut self, services: &mut Services, now_ms: u64) {
        // Localization resolves before anything paint-affecting
        let override_code = self.location.query_param("lang");
        let detected = detect_language(
            override_code.as_deref(),
            services.storage,
            &self.browser_languages,
            &self.config.supported_languages,
            &self.config.default_language,
        );
        let outcome = self.i18n.set_language(&mut self.doc, services.storage, &detected);
        self.drive_locale(services, outcome);

        self.theme = ThemeController::load(services.storage);
        self.theme.apply(&mut self.doc, self.media);

        self.lazy.observe_tagged(&self.doc);
        let path = self.location.path().to_string();
        self.rotator
            .initialize(&mut self.doc, &self.registry, &self.i18n, &path, now_ms);

        info!(
            "booted: language={} theme={}",
            self.i18n.current_language(),
            self.theme.mode().as_str()
        );

        if let Some(question) = question_from_path(&path) {
            self.submit(services, &question, now_ms);
        }
    }

    /// Advance timers: deferred writes, announcements, toasts, rotation,
    /// and animation safety timeouts.
    pub fn tick(&mut self, now_ms: u64) {
        self.deferred.flush(&mut self.doc, now_ms);
        self.announcer.tick(&mut self.doc, now_ms);
        self.toasts.tick(&mut self.doc, &self.registry, now_ms);
        self.rotator.tick(&mut self.doc, &self.registry, now_ms);
        self.animator.update(&mut self.doc, now_ms);
    }

    // === Submission ===

    /// Submit the input's current value
    pub fn submit_current(&mut self, services: &mut Services, now_ms: u64) -> bool {
        let question = primitives::value(&self.doc, self.slot(UiElement::QuestionInput))
            .unwrap_or_default()
            .to_string();
        self.submit(services, &question, now_ms)
    }

    /// Validate and submit a question, driving the view through
    /// loading and into success or error.
    pub fn submit(&mut self, services: &mut Services, question: &str, now_ms: u64) -> bool {
        let request = match AskRequest::new(question, self.config.question_max_len) {
            Ok(request) => request,
            Err(err) => {
                warn!("rejected submission: {err}");
                return false;
            }
        };

        self.view.show_loading(&mut self.doc, &self.registry);
        self.view
            .set_submit_enabled(&self.doc, &self.registry, &mut self.deferred, false, now_ms);
        self.announce("aria.loading", now_ms);

        let outcome = match services.transport.ask(&self.config.ask_endpoint, &request) {
            Ok(response) => api::parse_outcome(&response),
            Err(err) => {
                warn!("submission transport failed: {err}");
                AskOutcome::Failure
            }
        };

        match outcome {
            AskOutcome::Success(success) => {
                let question = request.question;
                let link = share::share_url(&self.location.origin(), &question);
                let links = ShareLinks {
                    tweet: share::tweet_intent_url(&share::tweet_text(&question, &link)),
                    upstream: self.config.upstream_url.clone(),
                };
                self.view
                    .show_success(&mut self.doc, &self.registry, &question, &success.answer, &links);
                self.location.replace_path(&path_for_question(&question));

                self.current_question = Some(question);
                self.current_answer = Some(success.answer);
                self.current_share_id = Some(success.share_id);
                self.announce("aria.answerReady", now_ms);
            }
            AskOutcome::Failure => {
                let message = self.i18n.translate("response.error").to_string();
                self.view
                    .show_error(&mut self.doc, &self.registry, Some(&request.question), &message);
                self.current_question = Some(request.question);
                self.current_answer = None;
                self.current_share_id = None;
                self.announce("aria.answerFailed", now_ms);
            }
        }

        let response = self.slot(UiElement::ResponseContainer);
        self.animator.animate(
            &mut self.doc,
            self.media,
            response,
            AnimationKind::FadeIn,
            AnimationOptions::default(),
            now_ms,
        );
        true
    }

    /// Share id of the last successful answer
    pub fn share_id(&self) -> Option<&str> {
        self.current_share_id.as_deref()
    }

    /// Return to the empty home state
    pub fn reset(&mut self, now_ms: u64) {
        self.view.reset(
            &mut self.doc,
            &self.registry,
            &mut self.deferred,
            &mut self.location,
            now_ms,
        );
        self.rotator.reset(&mut self.doc, &self.registry, now_ms);
        self.current_question = None;
        self.current_answer = None;
        self.current_share_id = None;
    }

    // === Localization ===

    /// Switch languages (selector change or shortcut)
    pub fn select_language(&mut self, services: &mut Services, code: &str) {
        let outcome = self.i18n.set_language(&mut self.doc, services.storage, code);
        self.drive_locale(services, outcome);
    }

    /// Perform fetches handed out by the engine until the change settles,
    /// then react to the resulting locale-change notifications.
    fn drive_locale(&mut self, services: &mut Services, outcome: SetLanguage) {
        let mut next = match outcome {
            SetLanguage::Fetch(request) => Some(request),
            _ => None,
        };
        while let Some(request) = next {
            let path = request.path(&self.config.locales_base);
            let resolution = match services.locales.fetch(&path) {
                Ok(body) => {
                    self.i18n
                        .complete_load(&mut self.doc, services.storage, &request.code, Ok(&body))
                }
                Err(err) => self.i18n.complete_load(
                    &mut self.doc,
                    services.storage,
                    &request.code,
                    Err(err),
                ),
            };
            next = resolution.next;
        }

        for event in self.i18n.take_events() {
            let I18nEvent::LocaleChanged { code } = event;
            info!("locale changed: {code}");
            self.rotator
                .on_locale_changed(&mut self.doc, &self.registry, &self.i18n);
            let selector = self.slot(UiElement::LanguageSelector);
            primitives::set_value(&mut self.doc, selector, &code);
        }
    }

    // === Input events ===

    /// Input content changed: submit enablement and overlay state follow
    pub fn handle_input_changed(&mut self, now_ms: u64) {
        let empty = primitives::value(&self.doc, self.slot(UiElement::QuestionInput))
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        self.view
            .set_submit_enabled(&self.doc, &self.registry, &mut self.deferred, !empty, now_ms);
        self.rotator.refresh(&mut self.doc, &self.registry);
    }

    /// Input gained focus
    pub fn handle_input_focus(&mut self) {
        self.rotator.refresh(&mut self.doc, &self.registry);
    }

    /// Input lost focus
    pub fn handle_input_blur(&mut self) {
        self.rotator.refresh(&mut self.doc, &self.registry);
    }

    /// OS preference flip from the host's media-query listener
    pub fn on_media_change(&mut self, media: MediaPrefs) {
        self.media = media;
        self.theme.on_media_change(&mut self.doc, media);
    }

    /// Viewport scroll/resize: lazily translate whatever became visible
    pub fn process_viewport(&mut self, viewport: Rect, layout: &HashMap<NodeId, Rect>) -> usize {
        self.lazy
            .process(&mut self.doc, &self.i18n, viewport, layout)
    }

    /// Route a keyboard event. Returns true when consumed.
    pub fn handle_key(&mut self, services: &mut Services, event: KeyEvent, now_ms: u64) -> bool {
        if event.key == Key::Escape && self.help_open() {
            self.close_help(now_ms);
            return true;
        }
        if event.key == Key::Tab && self.focus.is_trapped() {
            return self.focus.handle_tab(&mut self.doc, event.shift);
        }
        if matches!(
            event.key,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        ) {
            return self.focus.handle_arrow(&mut self.doc, event.key);
        }
        if event.key == Key::Enter {
            if let Some(target) = self.focus.enter_target(&self.doc) {
                return self.activate(services, target, now_ms);
            }
            if self.doc.active_element() == self.slot(UiElement::QuestionInput) {
                return self.submit_current(services, now_ms);
            }
            return false;
        }

        let ctx = self.shortcut_context();
        match keyboard::route(&event, &ctx) {
            Some(shortcut) => {
                self.perform(services, shortcut, now_ms);
                true
            }
            None => false,
        }
    }

    /// Click on an element (or Enter activating it)
    pub fn activate(&mut self, services: &mut Services, target: NodeId, now_ms: u64) -> bool {
        if Some(target) == self.slot(UiElement::SubmitButton) {
            return self.submit_current(services, now_ms);
        }
        if Some(target) == self.slot(UiElement::NewQuestionButton) {
            self.reset(now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::ThemeToggle) {
            self.perform(services, Shortcut::ToggleTheme, now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::HelpButton) {
            self.open_help(now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::HelpCloseButton) {
            self.close_help(now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::CopyAnswerButton) {
            self.perform(services, Shortcut::CopyAnswer, now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::CopyQaButton) {
            self.perform(services, Shortcut::CopyQuestionAnswer, now_ms);
            return true;
        }
        if Some(target) == self.slot(UiElement::CopyLinkButton) {
            self.perform(services, Shortcut::CopyShareLink, now_ms);
            return true;
        }
        // Links hand their destination to the host
        if let Some(href) = primitives::attribute(&self.doc, Some(target), "href") {
            self.last_opened_url = Some(href.to_string());
            return true;
        }
        false
    }

    /// Execute a routed shortcut
    pub fn perform(&mut self, services: &mut Services, shortcut: Shortcut, now_ms: u64) {
        match shortcut {
            Shortcut::FocusInput => {
                let input = self.slot(UiElement::QuestionInput);
                primitives::focus(&mut self.doc, input);
                self.rotator.refresh(&mut self.doc, &self.registry);
            }
            Shortcut::OpenHelp => self.open_help(now_ms),
            Shortcut::ToggleTheme => {
                self.theme.toggle(&mut self.doc, services.storage, self.media)
            }
            Shortcut::CopyAnswer => {
                if let Some(answer) = self.current_answer.clone() {
                    self.copy(services, &share::answer_only(&answer), now_ms);
                }
            }
            Shortcut::CopyQuestionAnswer => {
                if let (Some(question), Some(answer)) =
                    (self.current_question.clone(), self.current_answer.clone())
                {
                    self.copy(services, &share::question_and_answer(&question, &answer), now_ms);
                }
            }
            Shortcut::CopyShareLink => {
                if let Some(question) = self.current_question.clone() {
                    let url = share::share_url(&self.location.origin(), &question);
                    self.copy(services, &url, now_ms);
                }
            }
            Shortcut::OpenUpstream => {
                self.last_opened_url = Some(self.config.upstream_url.clone());
            }
        }
    }

    // === Help modal ===

    /// Whether the help modal is visible
    pub fn help_open(&self) -> bool {
        primitives::is_shown(&self.doc, self.slot(UiElement::HelpModal))
    }

    /// Open the help modal and trap focus inside it
    pub fn open_help(&mut self, now_ms: u64) {
        let modal = self.slot(UiElement::HelpModal);
        let trigger_id = self
            .doc
            .active_element()
            .and_then(|id| self.doc.element(id))
            .and_then(|data| data.id.clone());

        primitives::show(&mut self.doc, modal);
        if let Some(trigger_id) = trigger_id {
            primitives::set_attribute(&mut self.doc, modal, TRIGGER_ATTR, &trigger_id);
        }
        self.focus.trap_focus(&mut self.doc, modal);
        self.announce("aria.helpOpened", now_ms);
    }

    /// Close the help modal, releasing the trap and restoring focus
    pub fn close_help(&mut self, now_ms: u64) {
        let modal = self.slot(UiElement::HelpModal);
        primitives::hide(&mut self.doc, modal);
        self.focus.release_trap(&mut self.doc);
        self.announce("aria.helpClosed", now_ms);
    }

    // === Helpers ===

    fn slot(&self, element: UiElement) -> Option<NodeId> {
        self.registry.resolve(&self.doc, element)
    }

    fn shortcut_context(&self) -> ShortcutContext {
        let typing = self
            .doc
            .active_element()
            .and_then(|id| self.doc.element(id))
            .map(|data| data.kind.is_text_entry())
            .unwrap_or(false);
        ShortcutContext {
            typing,
            modal_open: self.help_open() || self.focus.is_trapped(),
            response_visible: self.view.response_visible(&self.doc, &self.registry),
        }
    }

    fn copy(&mut self, services: &mut Services, text: &str, now_ms: u64) {
        let key = if services.clipboard.write_text(text) {
            "toast.copied"
        } else {
            warn!("clipboard write denied");
            "toast.copyFailed"
        };
        let message = self.i18n.translate(key).to_string();
        self.toasts
            .show(&mut self.doc, &self.registry, &message, now_ms);
    }

    fn announce(&mut self, key: &str, now_ms: u64) {
        let message = self.i18n.translate(key).to_string();
        self.announcer.announce(&mut self.doc, &message, now_ms);
    }
}
