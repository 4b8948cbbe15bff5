//! Page Skeleton
//!
//! Builds the Q&A page the managers operate on: form, response view, help
//! modal, toast. Element ids match the registry defaults; translation keys
//! ride on the i18n attributes.

use qbox_dom::{primitives, Document, NodeId, UiElement};
use qbox_i18n::{I18N_ATTR, I18N_HTML_ATTR, I18N_LAZY_ATTR};

use crate::config::AppConfig;

/// Build the page document
pub fn build_page(config: &AppConfig) -> Document {
    let mut doc = Document::new();
    let body = doc.create_element("body");
    doc.append_child(NodeId::ROOT, body);

    build_header(&mut doc, body);
    build_form(&mut doc, body);
    build_loading(&mut doc, body);
    build_response(&mut doc, body, config);
    build_help_modal(&mut doc, body);
    build_toast(&mut doc, body);
    build_footer(&mut doc, body);
    build_faq(&mut doc, body);

    doc
}

fn tagged(doc: &mut Document, parent: NodeId, tag: &str, key: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.append_child(parent, node);
    primitives::set_attribute(doc, Some(node), I18N_ATTR, key);
    node
}

fn identified(doc: &mut Document, parent: NodeId, tag: &str, element: UiElement) -> NodeId {
    let node = doc.create_element(tag);
    doc.append_child(parent, node);
    doc.set_id(node, element.default_id());
    node
}

fn build_header(doc: &mut Document, body: NodeId) {
    let header = doc.create_element("header");
    doc.append_child(body, header);

    tagged(doc, header, "h1", "header.title");
    tagged(doc, header, "p", "header.tagline");

    let selector = identified(doc, header, "select", UiElement::LanguageSelector);
    primitives::set_attribute(doc, Some(selector), "aria-label", "Language");

    let theme = identified(doc, header, "button", UiElement::ThemeToggle);
    primitives::set_attribute(doc, Some(theme), I18N_ATTR, "header.themeToggle");

    let help = identified(doc, header, "button", UiElement::HelpButton);
    primitives::set_attribute(doc, Some(help), I18N_ATTR, "header.help");
}

fn build_form(doc: &mut Document, body: NodeId) {
    let form = identified(doc, body, "form", UiElement::QuestionForm);

    let input = identified(doc, form, "input", UiElement::QuestionInput);
    primitives::set_attribute(doc, Some(input), "type", "text");
    primitives::set_attribute(doc, Some(input), "autocomplete", "off");

    let overlay = identified(doc, form, "div", UiElement::PlaceholderOverlay);
    primitives::set_attribute(doc, Some(overlay), "aria-hidden", "true");

    let submit = identified(doc, form, "button", UiElement::SubmitButton);
    primitives::set_attribute(doc, Some(submit), I18N_ATTR, "form.submit");
    primitives::set_disabled(doc, Some(submit), true);
}

fn build_loading(doc: &mut Document, body: NodeId) {
    let loading = identified(doc, body, "div", UiElement::LoadingIndicator);
    primitives::set_attribute(doc, Some(loading), I18N_ATTR, "loading.text");
    primitives::hide(doc, Some(loading));
}

fn build_response(doc: &mut Document, body: NodeId, config: &AppConfig) {
    let response = identified(doc, body, "section", UiElement::ResponseContainer);
    primitives::hide(doc, Some(response));

    identified(doc, response, "p", UiElement::QuestionDisplay);
    identified(doc, response, "div", UiElement::AnswerDisplay);

    let actions = identified(doc, response, "div", UiElement::ActionButtons);
    primitives::hide(doc, Some(actions));

    let copy_answer = identified(doc, actions, "button", UiElement::CopyAnswerButton);
    primitives::set_attribute(doc, Some(copy_answer), I18N_ATTR, "actions.copyAnswer");

    let copy_qa = identified(doc, actions, "button", UiElement::CopyQaButton);
    primitives::set_attribute(doc, Some(copy_qa), I18N_ATTR, "actions.copyQa");

    let copy_link = identified(doc, actions, "button", UiElement::CopyLinkButton);
    primitives::set_attribute(doc, Some(copy_link), I18N_ATTR, "actions.copyLink");

    let tweet = identified(doc, actions, "a", UiElement::TweetLink);
    primitives::set_attribute(doc, Some(tweet), I18N_ATTR, "actions.tweet");
    primitives::set_attribute(doc, Some(tweet), "target", "_blank");

    let upstream = identified(doc, actions, "a", UiElement::UpstreamLink);
    primitives::set_attribute(doc, Some(upstream), I18N_ATTR, "actions.upstream");
    primitives::set_attribute(doc, Some(upstream), "href", &config.upstream_url);
    primitives::set_attribute(doc, Some(upstream), "target", "_blank");

    let again = identified(doc, actions, "button", UiElement::NewQuestionButton);
    primitives::set_attribute(doc, Some(again), I18N_ATTR, "actions.newQuestion");
}

fn build_help_modal(doc: &mut Document, body: NodeId) {
    let modal = identified(doc, body, "dialog", UiElement::HelpModal);
    primitives::set_attribute(doc, Some(modal), "aria-modal", "true");
    primitives::hide(doc, Some(modal));

    tagged(doc, modal, "h2", "help.title");

    // Shortcut reference carries markup (kbd elements)
    let shortcuts = doc.create_element("div");
    doc.append_child(modal, shortcuts);
    primitives::set_attribute(doc, Some(shortcuts), I18N_HTML_ATTR, "help.shortcuts");

    let close = identified(doc, modal, "button", UiElement::HelpCloseButton);
    primitives::set_attribute(doc, Some(close), I18N_ATTR, "help.close");
}

/// Long-form notes below the fold; translated only once scrolled into view
fn build_faq(doc: &mut Document, body: NodeId) {
    let section = doc.create_element("section");
    doc.append_child(body, section);

    let faq = tagged(doc, section, "p", "help.faq");
    primitives::set_attribute(doc, Some(faq), I18N_LAZY_ATTR, "");
}

fn build_toast(doc: &mut Document, body: NodeId) {
    let toast = identified(doc, body, "div", UiElement::Toast);
    primitives::set_attribute(doc, Some(toast), "role", "status");
    primitives::hide(doc, Some(toast));
}

fn build_footer(doc: &mut Document, body: NodeId) {
    let footer = doc.create_element("footer");
    doc.append_child(body, footer);
    let credit = doc.create_element("p");
    doc.append_child(footer, credit);
    primitives::set_attribute(doc, Some(credit), I18N_HTML_ATTR, "footer.credit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbox_dom::ElementRegistry;

    #[test]
    fn test_every_registry_slot_resolves() {
        let doc = build_page(&AppConfig::default());
        let registry = ElementRegistry::new();

        for element in UiElement::all() {
            assert!(
                registry.resolve(&doc, *element).is_some(),
                "unresolved slot: {element:?}"
            );
        }
    }

    #[test]
    fn test_initial_visibility() {
        let doc = build_page(&AppConfig::default());
        let registry = ElementRegistry::new();

        assert!(primitives::is_shown(
            &doc,
            registry.resolve(&doc, UiElement::QuestionForm)
        ));
        for hidden in [
            UiElement::LoadingIndicator,
            UiElement::ResponseContainer,
            UiElement::HelpModal,
            UiElement::Toast,
        ] {
            assert!(
                !primitives::is_shown(&doc, registry.resolve(&doc, hidden)),
                "expected hidden: {hidden:?}"
            );
        }
        assert!(primitives::is_disabled(
            &doc,
            registry.resolve(&doc, UiElement::SubmitButton)
        ));
    }
}
