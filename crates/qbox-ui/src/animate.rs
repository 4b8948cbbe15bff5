//! Animation Helper
//!
//! One-shot animations and CSS-property transitions with a completion
//! signal. When the user prefers reduced motion, both short-circuit to an
//! immediate synchronous apply, skipping the animation class path
//! entirely. A safety timeout slightly longer than the requested duration
//! guards against the end notification never firing.

use tracing::warn;

use qbox_dom::{primitives, Document, MediaPrefs, NodeId};

use crate::UiError;

/// Extra wait beyond the requested duration before a missing end
/// notification is assumed lost
pub const SAFETY_MARGIN_MS: u64 = 50;

/// Named one-shot animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    FadeIn,
    FadeOut,
    SlideUp,
    SlideDown,
    Shake,
}

impl AnimationKind {
    /// Parse an animation name
    pub fn parse(s: &str) -> Result<Self, UiError> {
        Ok(match s {
            "fade-in" => Self::FadeIn,
            "fade-out" => Self::FadeOut,
            "slide-up" => Self::SlideUp,
            "slide-down" => Self::SlideDown,
            "shake" => Self::Shake,
            other => return Err(UiError::UnknownAnimation(other.to_string())),
        })
    }

    /// Class that triggers the animation
    pub fn class(&self) -> &'static str {
        match self {
            Self::FadeIn => "anim-fade-in",
            Self::FadeOut => "anim-fade-out",
            Self::SlideUp => "anim-slide-up",
            Self::SlideDown => "anim-slide-down",
            Self::Shake => "anim-shake",
        }
    }

    /// Styles describing the settled end state, applied directly under
    /// reduced motion
    fn end_state(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::FadeIn | Self::SlideUp | Self::SlideDown => &[("opacity", "1")],
            Self::FadeOut => &[("opacity", "0")],
            Self::Shake => &[],
        }
    }
}

/// Easing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Timing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOptions {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::Ease,
        }
    }
}

/// Handle for a pending animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

/// Completion signal returned by `animate`/`transition`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Applied synchronously (reduced motion, missing element, bad input)
    Immediate,
    /// Resolves via `notify_end` or the safety timeout in `update`
    Pending(AnimationHandle),
}

#[derive(Debug)]
struct Running {
    handle: AnimationHandle,
    node: NodeId,
    cleanup_class: Option<&'static str>,
    deadline_ms: u64,
}

/// Animation manager
#[derive(Debug, Default)]
pub struct Animator {
    running: Vec<Running>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a named animation on an element
    pub fn animate(
        &mut self,
        doc: &mut Document,
        media: MediaPrefs,
        node: Option<NodeId>,
        kind: AnimationKind,
        options: AnimationOptions,
        now_ms: u64,
    ) -> Completion {
        let Some(node) = node else {
            return Completion::Immediate;
        };

        if media.reduced_motion {
            for (prop, value) in kind.end_state() {
                primitives::set_style(doc, Some(node), prop, value);
            }
            return Completion::Immediate;
        }

        self.set_timing_properties(doc, node, options);
        primitives::restart_animation(doc, Some(node), kind.class());
        self.track(node, Some(kind.class()), options, now_ms)
    }

    /// Run an animation by name; unknown names are logged and ignored
    pub fn animate_named(
        &mut self,
        doc: &mut Document,
        media: MediaPrefs,
        node: Option<NodeId>,
        name: &str,
        options: AnimationOptions,
        now_ms: u64,
    ) -> Completion {
        match AnimationKind::parse(name) {
            Ok(kind) => self.animate(doc, media, node, kind, options, now_ms),
            Err(err) => {
                warn!(%err, "ignoring animation request");
                Completion::Immediate
            }
        }
    }

    /// Transition style properties to target values
    pub fn transition(
        &mut self,
        doc: &mut Document,
        media: MediaPrefs,
        node: Option<NodeId>,
        properties: &[(&str, &str)],
        options: AnimationOptions,
        now_ms: u64,
    ) -> Completion {
        let Some(node) = node else {
            return Completion::Immediate;
        };

        if media.reduced_motion {
            for (prop, value) in properties {
                primitives::set_style(doc, Some(node), prop, value);
            }
            return Completion::Immediate;
        }

        self.set_timing_properties(doc, node, options);
        primitives::add_class(doc, Some(node), "transitioning");
        for (prop, value) in properties {
            primitives::set_style(doc, Some(node), prop, value);
        }
        self.track(node, Some("transitioning"), options, now_ms)
    }

    /// End notification from the host (animationend/transitionend)
    pub fn notify_end(&mut self, doc: &mut Document, handle: AnimationHandle) {
        if let Some(pos) = self.running.iter().position(|r| r.handle == handle) {
            let finished = self.running.remove(pos);
            if let Some(class) = finished.cleanup_class {
                primitives::remove_class(doc, Some(finished.node), class);
            }
        }
    }

    /// Force-complete everything whose safety timeout has expired; returns
    /// the handles resolved this tick.
    pub fn update(&mut self, doc: &mut Document, now_ms: u64) -> Vec<AnimationHandle> {
        let expired: Vec<AnimationHandle> = self
            .running
            .iter()
            .filter(|r| now_ms >= r.deadline_ms)
            .map(|r| r.handle)
            .collect();
        for handle in &expired {
            self.notify_end(doc, *handle);
        }
        expired
    }

    /// Whether a handle is still unresolved
    pub fn is_pending(&self, handle: AnimationHandle) -> bool {
        self.running.iter().any(|r| r.handle == handle)
    }

    fn set_timing_properties(&self, doc: &mut Document, node: NodeId, options: AnimationOptions) {
        primitives::set_style(
            doc,
            Some(node),
            "--anim-duration",
            &format!("{}ms", options.duration_ms),
        );
        primitives::set_style(doc, Some(node), "--anim-easing", options.easing.as_str());
    }

    fn track(
        &mut self,
        node: NodeId,
        cleanup_class: Option<&'static str>,
        options: AnimationOptions,
        now_ms: u64,
    ) -> Completion {
        self.next_id += 1;
        let handle = AnimationHandle(self.next_id);
        self.running.push(Running {
            handle,
            node,
            cleanup_class,
            deadline_ms: now_ms + options.duration_ms + SAFETY_MARGIN_MS,
        });
        Completion::Pending(handle)
    }
}
