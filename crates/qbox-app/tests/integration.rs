//! End-to-end tests driving the full app against in-memory backends.

use qbox_app::app::Services;
use qbox_app::{App, AppConfig, MemoryBackend, MemoryClipboard};
use qbox_dom::events::{Key, KeyEvent};
use qbox_dom::{primitives, KeyValueStorage, MediaPrefs, MemoryStorage, TextDirection, UiElement};
use qbox_ui::placeholder::ROTATION_INTERVAL_MS;
use qbox_ui::ViewState;

const EN: &str = r#"{
    "header": { "title": "Ask one question" },
    "form": { "submit": "Ask" },
    "response": { "error": "Something went wrong. Please try again." },
    "help": { "faq": "Answers are generated and may be wrong." },
    "placeholders": { "generic": "Ask me anything...", "examples": ["What is Rust?", "Why is the sky blue?"] },
    "aria": { "loading": "Loading answer", "answerReady": "Answer ready", "answerFailed": "The answer failed to load", "helpOpened": "Help opened", "helpClosed": "Help closed" },
    "toast": { "copied": "Copied to clipboard", "copyFailed": "Could not copy" }
}"#;

const ES: &str = r#"{
    "header": { "title": "Haz una pregunta" },
    "form": { "submit": "Preguntar" },
    "response": { "error": "Algo ha fallado." },
    "placeholders": { "generic": "Pregunta lo que quieras...", "examples": ["Que es Rust?"] },
    "aria": { "loading": "Cargando", "answerReady": "Respuesta lista", "answerFailed": "Fallo la respuesta", "helpOpened": "Ayuda abierta", "helpClosed": "Ayuda cerrada" },
    "toast": { "copied": "Copiado", "copyFailed": "No se pudo copiar" }
}"#;

const AR: &str = r#"{ "header": { "title": "اسأل سؤالا" } }"#;

struct Harness {
    storage: MemoryStorage,
    locales: MemoryBackend,
    transport: MemoryBackend,
    clipboard: MemoryClipboard,
    app: App,
}

impl Harness {
    fn new(href: &str) -> Self {
        let mut locales = MemoryBackend::new();
        locales.add_locale("en", EN).add_locale("es", ES).add_locale("ar", AR);
        let mut transport = MemoryBackend::new();
        transport.respond_with(200, r#"{"answer":"42","shareId":"abc"}"#);

        let app = App::new(
            AppConfig::default(),
            href,
            vec!["en-US".into()],
            MediaPrefs::new(),
        )
        .expect("valid href");

        Self {
            storage: MemoryStorage::new(),
            locales,
            transport,
            clipboard: MemoryClipboard::new(),
            app,
        }
    }

    fn booted(href: &str) -> Self {
        let mut harness = Self::new(href);
        harness.with(|app, services| app.bootstrap(services, 0));
        harness
    }

    fn with<R>(&mut self, f: impl FnOnce(&mut App, &mut Services) -> R) -> R {
        let mut services = Services {
            storage: &mut self.storage,
            locales: &mut self.locales,
            transport: &mut self.transport,
            clipboard: &mut self.clipboard,
        };
        f(&mut self.app, &mut services)
    }

    fn state(&self) -> ViewState {
        self.app.view.state(&self.app.doc, &self.app.registry)
    }

    fn text_of(&self, element: UiElement) -> String {
        primitives::text(&self.app.doc, self.app.registry.resolve(&self.app.doc, element))
            .unwrap_or_default()
            .to_string()
    }

    fn shown(&self, element: UiElement) -> bool {
        primitives::is_shown(&self.app.doc, self.app.registry.resolve(&self.app.doc, element))
    }

    fn type_question(&mut self, text: &str, now: u64) {
        let input = self.app.registry.resolve(&self.app.doc, UiElement::QuestionInput);
        primitives::focus(&mut self.app.doc, input);
        primitives::set_value(&mut self.app.doc, input, text);
        self.app.handle_input_changed(now);
    }
}

#[test]
fn successful_submission_shows_answer_and_rewrites_url() {
    let mut harness = Harness::booted("https://example.com/");

    harness.with(|app, services| {
        app.submit(services, "What is the meaning of life?", 100);
    });

    assert_eq!(harness.state(), ViewState::Success);
    assert_eq!(
        harness.text_of(UiElement::QuestionDisplay),
        "What is the meaning of life?"
    );
    assert_eq!(harness.text_of(UiElement::AnswerDisplay), "42");
    assert!(harness.shown(UiElement::ActionButtons));
    assert!(!harness.shown(UiElement::QuestionForm));
    assert_eq!(harness.app.share_id(), Some("abc"));

    // Doubly encoded question in the replaced URL
    assert!(harness
        .app
        .location
        .href()
        .ends_with("/%2FWhat%2520is%2520the%2520meaning%2520of%2520life%253F"));
}

#[test]
fn failed_submission_shows_fallback_error() {
    let mut harness = Harness::booted("https://example.com/");
    harness.transport.respond_with(500, "internal error");

    harness.with(|app, services| {
        app.submit(services, "why?", 100);
    });

    assert_eq!(harness.state(), ViewState::Error);
    assert_eq!(
        harness.text_of(UiElement::AnswerDisplay),
        "Something went wrong. Please try again."
    );
    assert!(!harness.shown(UiElement::QuestionForm));
    assert!(!harness.shown(UiElement::ActionButtons));
    assert_eq!(harness.app.share_id(), None);
}

#[test]
fn malformed_success_body_is_an_error() {
    let mut harness = Harness::booted("https://example.com/");
    harness.transport.respond_with(200, r#"{"unexpected":"shape"}"#);

    harness.with(|app, services| {
        app.submit(services, "why?", 100);
    });
    assert_eq!(harness.state(), ViewState::Error);
}

#[test]
fn url_question_is_decoded_and_auto_submitted() {
    let harness = Harness::booted("https://example.com/What%20is%20the%20meaning%20of%20life%3F");

    assert_eq!(
        harness.transport.questions,
        vec!["What is the meaning of life?".to_string()]
    );
    assert_eq!(harness.state(), ViewState::Success);

    // The URL question also suppresses placeholder rotation entirely
    assert!(!harness.app.rotator.is_rotating());
    assert!(!harness.shown(UiElement::PlaceholderOverlay));
}

#[test]
fn locale_loads_are_cached_and_deduplicated() {
    let mut harness = Harness::booted("https://example.com/");
    assert_eq!(harness.locales.fetch_count("en"), 1);

    harness.with(|app, services| app.select_language(services, "es"));
    assert_eq!(harness.app.i18n.current_language(), "es");
    assert_eq!(harness.text_of(UiElement::SubmitButton), "Preguntar");
    assert_eq!(harness.locales.fetch_count("es"), 1);

    // Switching to the same language again fetches nothing
    harness.with(|app, services| app.select_language(services, "es"));
    assert_eq!(harness.locales.fetch_count("es"), 1);

    // Returning to a cached language fetches nothing either
    harness.with(|app, services| app.select_language(services, "en"));
    assert_eq!(harness.locales.fetch_count("en"), 1);
}

#[test]
fn unsupported_language_resolves_to_default() {
    let mut harness = Harness::booted("https://example.com/");

    harness.with(|app, services| app.select_language(services, "xx"));
    assert_eq!(harness.app.i18n.current_language(), "en");
    // Already current and translated: nothing fetched
    assert_eq!(harness.locales.locale_requests.len(), 1);
}

#[test]
fn missing_locale_file_falls_back_to_default() {
    let mut harness = Harness::booted("https://example.com/");

    // fr is supported but its file is missing from the backend
    harness.with(|app, services| app.select_language(services, "fr"));
    assert_eq!(harness.locales.fetch_count("fr"), 1);
    assert_eq!(harness.app.i18n.current_language(), "en");
}

#[test]
fn url_language_override_sticks() {
    let harness = Harness::booted("https://example.com/?lang=ar");

    assert_eq!(harness.app.i18n.current_language(), "ar");
    assert_eq!(harness.storage.get("userLanguage"), Some("ar".to_string()));
    assert_eq!(harness.app.doc.direction(), TextDirection::Rtl);
    // The visible selector follows the override
    let selector = harness.app.registry.resolve(&harness.app.doc, UiElement::LanguageSelector);
    assert_eq!(primitives::value(&harness.app.doc, selector), Some("ar"));
}

#[test]
fn reset_reproduces_the_fresh_page() {
    let mut harness = Harness::booted("https://example.com/");

    harness.type_question("why?", 10);
    harness.with(|app, services| app.submit(services, "why?", 20));
    assert_eq!(harness.state(), ViewState::Success);

    harness.app.reset(30);
    harness.app.tick(100);
    assert_eq!(harness.state(), ViewState::Form);
    assert_eq!(harness.app.location.path(), "/");
    assert_eq!(harness.text_of(UiElement::AnswerDisplay), "");
    assert!(harness.app.rotator.is_rotating());

    // Same flow again lands in the same visible state
    harness.with(|app, services| app.submit(services, "why?", 200));
    assert_eq!(harness.state(), ViewState::Success);
    assert_eq!(harness.text_of(UiElement::AnswerDisplay), "42");
}

#[test]
fn copy_shortcuts_only_with_visible_response() {
    let mut harness = Harness::booted("https://example.com/");

    // No response yet: 'c' does nothing
    harness.with(|app, services| {
        assert!(!app.handle_key(services, KeyEvent::plain(Key::Char('c')), 10));
    });
    assert_eq!(harness.clipboard.contents, None);

    harness.with(|app, services| {
        app.submit(services, "why?", 20);
        assert!(app.handle_key(services, KeyEvent::plain(Key::Char('c')), 30));
    });
    assert_eq!(harness.clipboard.contents.as_deref(), Some("42"));

    harness.with(|app, services| {
        app.handle_key(services, KeyEvent::plain(Key::Char('q')), 40);
    });
    assert_eq!(
        harness.clipboard.contents.as_deref(),
        Some("Q: why?\n\nA: 42")
    );

    harness.with(|app, services| {
        app.handle_key(services, KeyEvent::plain(Key::Char('s')), 50);
    });
    assert_eq!(
        harness.clipboard.contents.as_deref(),
        Some("https://example.com/%2Fwhy%253F")
    );
}

#[test]
fn denied_clipboard_reports_through_toast() {
    let mut harness = Harness::booted("https://example.com/");
    harness.clipboard.deny = true;

    harness.with(|app, services| {
        app.submit(services, "why?", 10);
        app.handle_key(services, KeyEvent::plain(Key::Char('c')), 20);
    });

    assert!(harness.app.toasts.is_visible());
    assert_eq!(harness.text_of(UiElement::Toast), "Could not copy");
}

#[test]
fn shortcuts_suppressed_while_typing() {
    let mut harness = Harness::booted("https://example.com/");
    harness.with(|app, services| app.submit(services, "why?", 10));

    let input = harness.app.registry.resolve(&harness.app.doc, UiElement::QuestionInput);
    primitives::focus(&mut harness.app.doc, input);

    harness.with(|app, services| {
        assert!(!app.handle_key(services, KeyEvent::plain(Key::Char('c')), 20));
    });
    assert_eq!(harness.clipboard.contents, None);
}

#[test]
fn help_modal_traps_and_restores_focus() {
    let mut harness = Harness::booted("https://example.com/");

    let help_button = harness.app.registry.resolve(&harness.app.doc, UiElement::HelpButton);
    primitives::focus(&mut harness.app.doc, help_button);

    harness.with(|app, services| {
        assert!(app.handle_key(services, KeyEvent::plain(Key::Char('h')), 10));
    });
    assert!(harness.app.help_open());
    assert!(harness.app.focus.is_trapped());

    // Tab cycles inside the modal only
    let modal = harness.app.registry.resolve(&harness.app.doc, UiElement::HelpModal).unwrap();
    for i in 0..8u64 {
        harness.with(|app, services| {
            let event = if i % 3 == 0 {
                KeyEvent::shifted(Key::Tab)
            } else {
                KeyEvent::plain(Key::Tab)
            };
            app.handle_key(services, event, 20 + i);
        });
        let active = harness.app.doc.active_element().unwrap();
        assert!(harness.app.doc.contains(modal, active));
    }

    // Escape closes and focus returns to the trigger
    harness.with(|app, services| {
        assert!(app.handle_key(services, KeyEvent::plain(Key::Escape), 100));
    });
    assert!(!harness.app.help_open());
    assert_eq!(harness.app.doc.active_element(), help_button);
}

#[test]
fn theme_shortcut_toggles_and_persists() {
    let mut harness = Harness::booted("https://example.com/");

    harness.with(|app, services| {
        app.handle_key(services, KeyEvent::plain(Key::Char('t')), 10);
    });
    assert_eq!(harness.storage.get("theme"), Some("dark".to_string()));
    assert_eq!(
        primitives::attribute(&harness.app.doc, Some(qbox_dom::NodeId::ROOT), "data-theme"),
        Some("dark")
    );
}

#[test]
fn rotation_pauses_while_question_present() {
    let mut harness = Harness::booted("https://example.com/");

    let before = harness.text_of(UiElement::PlaceholderOverlay);
    harness.type_question("typed", 10);

    for i in 1..6 {
        harness.app.tick(i * ROTATION_INTERVAL_MS);
    }
    assert_eq!(harness.text_of(UiElement::PlaceholderOverlay), before);

    // Clearing the input lets the next due tick rotate again
    harness.type_question("", 20_000);
    let input = harness.app.registry.resolve(&harness.app.doc, UiElement::QuestionInput);
    primitives::blur(&mut harness.app.doc, input);
    harness.app.handle_input_blur();

    harness.app.tick(6 * ROTATION_INTERVAL_MS + 20_000);
    assert_ne!(harness.text_of(UiElement::PlaceholderOverlay), before);
}

#[test]
fn enter_submits_from_the_input() {
    let mut harness = Harness::booted("https://example.com/");
    harness.type_question("why?", 10);

    harness.with(|app, services| {
        assert!(app.handle_key(services, KeyEvent::plain(Key::Enter), 20));
    });
    assert_eq!(harness.transport.questions, vec!["why?".to_string()]);
    assert_eq!(harness.state(), ViewState::Success);
}

#[test]
fn open_upstream_hands_url_to_host() {
    let mut harness = Harness::booted("https://example.com/");
    harness.with(|app, services| {
        app.submit(services, "why?", 10);
        app.handle_key(services, KeyEvent::plain(Key::Char('g')), 20);
    });
    assert_eq!(
        harness.app.last_opened_url.as_deref(),
        Some("https://chat.example.com/")
    );
}

#[test]
fn flagged_faq_translates_lazily() {
    use std::collections::HashMap;
    use qbox_dom::Rect;

    let mut harness = Harness::booted("https://example.com/");

    // Deferred elements are skipped by the eager document translation
    let faq = harness
        .app
        .doc
        .all_elements()
        .into_iter()
        .find(|id| {
            harness
                .app
                .doc
                .element(*id)
                .and_then(|d| d.attr("data-i18n"))
                .map(|k| k == "help.faq")
                .unwrap_or(false)
        })
        .expect("faq element");
    assert_eq!(primitives::text(&harness.app.doc, Some(faq)), Some(""));

    // Scrolled into view, it translates exactly once
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut layout = HashMap::new();
    layout.insert(faq, Rect::new(0.0, 100.0, 400.0, 40.0));
    assert_eq!(harness.app.process_viewport(viewport, &layout), 1);
    assert_eq!(
        primitives::text(&harness.app.doc, Some(faq)),
        Some("Answers are generated and may be wrong.")
    );
    assert_eq!(harness.app.process_viewport(viewport, &layout), 0);
}

#[test]
fn oversized_question_is_rejected_locally() {
    let mut harness = Harness::booted("https://example.com/");
    let huge = "x".repeat(10_001);

    let accepted = harness.with(|app, services| app.submit(services, &huge, 10));
    assert!(!accepted);
    assert!(harness.transport.questions.is_empty());
    assert_eq!(harness.state(), ViewState::Form);
}
