//! qbox Demo
//!
//! Boots the engine against in-memory backends and runs a scripted
//! session: auto-submit from the URL, a language switch, a theme toggle,
//! and a copy action. State transitions land in the log.

use log::info;

use qbox_app::app::Services;
use qbox_app::{App, AppConfig, MemoryBackend, MemoryClipboard};
use qbox_dom::events::{Key, KeyEvent};
use qbox_dom::{MediaPrefs, MemoryStorage};

const EN: &str = r#"{
    "header": { "title": "Ask one question", "tagline": "One question, one answer", "themeToggle": "Theme", "help": "Help" },
    "form": { "submit": "Ask" },
    "loading": { "text": "Thinking..." },
    "response": { "error": "Something went wrong. Please try again." },
    "actions": {
        "copyAnswer": "Copy answer", "copyQa": "Copy Q&A", "copyLink": "Copy link",
        "tweet": "Tweet", "upstream": "Keep chatting", "newQuestion": "Ask another"
    },
    "help": { "title": "Keyboard shortcuts", "shortcuts": "<kbd>?</kbd> focus <kbd>t</kbd> theme", "faq": "Answers are generated and may be wrong.", "close": "Close" },
    "placeholders": {
        "generic": "Ask me anything...",
        "examples": ["What is the meaning of life?", "Why is the sky blue?"]
    },
    "aria": {
        "loading": "Loading answer",
        "answerReady": "Answer ready",
        "answerFailed": "The answer failed to load",
        "helpOpened": "Help dialog opened",
        "helpClosed": "Help dialog closed"
    },
    "toast": { "copied": "Copied to clipboard", "copyFailed": "Could not copy" },
    "footer": { "credit": "Built on <a href=\"https://example.com\">qbox</a>" }
}"#;

const ES: &str = r#"{
    "header": { "title": "Haz una pregunta", "tagline": "Una pregunta, una respuesta", "themeToggle": "Tema", "help": "Ayuda" },
    "form": { "submit": "Preguntar" },
    "loading": { "text": "Pensando..." },
    "response": { "error": "Algo ha fallado. Intentalo de nuevo." },
    "actions": {
        "copyAnswer": "Copiar respuesta", "copyQa": "Copiar P+R", "copyLink": "Copiar enlace",
        "tweet": "Tuitear", "upstream": "Seguir charlando", "newQuestion": "Otra pregunta"
    },
    "help": { "title": "Atajos de teclado", "shortcuts": "<kbd>?</kbd> enfocar <kbd>t</kbd> tema", "faq": "Las respuestas son generadas y pueden ser incorrectas.", "close": "Cerrar" },
    "placeholders": {
        "generic": "Pregunta lo que quieras...",
        "examples": ["Cual es el sentido de la vida?", "Por que el cielo es azul?"]
    },
    "aria": {
        "loading": "Cargando respuesta",
        "answerReady": "Respuesta lista",
        "answerFailed": "No se pudo cargar la respuesta",
        "helpOpened": "Ayuda abierta",
        "helpClosed": "Ayuda cerrada"
    },
    "toast": { "copied": "Copiado al portapapeles", "copyFailed": "No se pudo copiar" },
    "footer": { "credit": "Construido sobre <a href=\"https://example.com\">qbox</a>" }
}"#;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut storage = MemoryStorage::new();
    let mut locales = MemoryBackend::new();
    locales.add_locale("en", EN).add_locale("es", ES);
    let mut transport = MemoryBackend::new();
    transport.respond_with(200, r#"{"answer":"42","shareId":"demo-1"}"#);
    let mut clipboard = MemoryClipboard::new();

    let mut app = App::new(
        AppConfig::default(),
        "https://qbox.example.com/What%20is%20the%20meaning%20of%20life%3F",
        vec!["en-US".into()],
        MediaPrefs::new(),
    )
    .expect("valid page URL");

    let mut now = 0;
    {
        let mut services = Services {
            storage: &mut storage,
            locales: &mut locales,
            transport: &mut transport,
            clipboard: &mut clipboard,
        };

        app.bootstrap(&mut services, now);
        info!("view after bootstrap: {:?}", app.view.state(&app.doc, &app.registry));
        info!("page URL: {}", app.location.href());

        // Copy the answer via its shortcut
        now += 100;
        app.handle_key(&mut services, KeyEvent::plain(Key::Char('c')), now);

        // Toggle the theme and switch languages
        now += 100;
        app.handle_key(&mut services, KeyEvent::plain(Key::Char('t')), now);
        app.select_language(&mut services, "es");
    }
    app.tick(now + 200);

    info!("clipboard: {:?}", clipboard.contents);
    info!("theme: {}", app.theme.mode().as_str());
    info!("language: {}", app.i18n.current_language());
    info!("locale fetches: {:?}", locales.locale_requests);
}
