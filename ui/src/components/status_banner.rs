//! Single status channel for the whole app.
//!
//! Every view reports outcomes through one shared `Signal<StatusMessage>`
//! rendered by `StatusBanner`; a new message simply replaces the previous
//! one. Errors also land on the console so they survive the next overwrite.

use dioxus::prelude::*;

use crate::core::platform;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn report_info(mut status: Signal<StatusMessage>, text: impl Into<String>) {
    status.set(StatusMessage::info(text));
}

pub fn report_error(mut status: Signal<StatusMessage>, text: impl Into<String>) {
    let message = StatusMessage::error(text);
    platform::log_error(&message.text);
    status.set(message);
}

#[component]
pub fn StatusBanner() -> Element {
    let status = use_context::<Signal<StatusMessage>>();
    let current = status.read().clone();

    if current.is_empty() {
        return rsx! {};
    }

    rsx! {
        p {
            class: if current.is_error { "status status--error" } else { "status status--info" },
            "{current.text}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_read_as_empty() {
        assert!(StatusMessage::default().is_empty());
        assert!(!StatusMessage::info("marked").is_empty());
    }

    #[test]
    fn constructors_set_the_level() {
        assert!(!StatusMessage::info("ok").is_error);
        assert!(StatusMessage::error("no camera").is_error);
    }
}
