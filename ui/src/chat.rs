//! Floating assistant chat.
//!
//! A small transcript widget that relays questions to the backend assistant
//! over the role-matched endpoint. Hidden entirely until a session token
//! exists, since the relay rejects anonymous queries anyway.

use dioxus::prelude::*;

use crate::core::session::Session;

#[derive(Debug, Clone, PartialEq)]
struct ChatLine {
    from_user: bool,
    text: String,
}

#[component]
pub fn ChatWidget() -> Element {
    let session = use_context::<Signal<Session>>();
    let mut open = use_signal(|| false);
    let mut input = use_signal(String::new);
    let mut transcript = use_signal(Vec::<ChatLine>::new);
    let mut busy = use_signal(|| false);

    if !session.read().is_authenticated() {
        return rsx! {};
    }

    let mut send = move || {
        let query = input.read().trim().to_string();
        if query.is_empty() || busy() {
            return;
        }
        input.set(String::new());
        transcript.write().push(ChatLine {
            from_user: true,
            text: query.clone(),
        });
        busy.set(true);

        let current = session.read().clone();
        spawn(async move {
            let reply = current
                .client()
                .chat(current.chat_endpoint(), &query)
                .await;
            let text = match reply {
                Ok(reply) => reply.text().to_string(),
                Err(err) => format!("Assistant unavailable: {err}"),
            };
            transcript.write().push(ChatLine {
                from_user: false,
                text,
            });
            busy.set(false);
        });
    };

    rsx! {
        div { class: "chat",
            button {
                class: "chat__toggle",
                onclick: move |_| {
                    let now_open = open();
                    open.set(!now_open);
                },
                if open() { "✕" } else { "💬" }
            }
            if open() {
                div { class: "chat__panel",
                    div { class: "chat__log",
                        for (index, line) in transcript.read().iter().enumerate() {
                            p {
                                key: "{index}",
                                class: if line.from_user { "chat__line chat__line--user" } else { "chat__line chat__line--bot" },
                                "{line.text}"
                            }
                        }
                        if busy() {
                            p { class: "chat__line chat__line--bot", "…" }
                        }
                    }
                    div { class: "chat__compose",
                        input {
                            class: "chat__input",
                            placeholder: "Ask about attendance…",
                            value: "{input}",
                            oninput: move |event| input.set(event.value()),
                            onkeydown: move |event| {
                                if event.key() == Key::Enter {
                                    send();
                                }
                            },
                        }
                        button { class: "chat__send", onclick: move |_| send(), "Send" }
                    }
                }
            }
        }
    }
}
