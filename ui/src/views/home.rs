//! Landing page with the admin sign-in form.

use dioxus::prelude::*;

use crate::components::{report_error, report_info, StatusMessage};
use crate::core::session::Session;

#[component]
pub fn Home() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let status = use_context::<Signal<StatusMessage>>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let sign_in = move |event: FormEvent| {
        event.prevent_default();
        if busy() {
            return;
        }
        let name = username.read().trim().to_string();
        let pass = password.read().clone();
        if name.is_empty() || pass.is_empty() {
            report_error(status, "Enter the admin name and password");
            return;
        }
        busy.set(true);

        spawn(async move {
            let client = session.read().client();
            match client.login("admin", &name, Some(&pass)).await {
                Ok(reply) if reply.succeeded() => {
                    let token = reply.token.clone().unwrap_or_default();
                    let role = reply.role.clone().unwrap_or_else(|| "admin".to_string());
                    let user_info = reply
                        .user_info
                        .as_ref()
                        .and_then(|info| serde_json::to_string(info).ok());
                    session.write().sign_in(token, role, user_info);
                    session.write().admin_password = Some(pass);
                    report_info(status, "Authenticated! Redirecting…");

                    #[cfg(target_arch = "wasm32")]
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Ok(reply) => {
                    let message = reply
                        .message
                        .unwrap_or_else(|| "Invalid credentials".to_string());
                    report_error(status, format!("Error: {message}"));
                }
                Err(err) => report_error(status, format!("Connection error: {err}")),
            }
            busy.set(false);
        });
    };

    rsx! {
        section { class: "page page-home",
            h1 { "Rollcall" }
            p { class: "page-home__tagline",
                "Face-recognition attendance for the whole class, straight from the browser."
            }
            ul { class: "page-home__features",
                li { "Scan the room and mark attendance automatically" }
                li { "Period-by-period reports with month filters" }
                li { "Per-student profiles, analytics, and an assistant chat" }
            }

            if session.read().is_authenticated() {
                p { class: "page-home__signed-in", "You are signed in." }
            } else {
                form { class: "page-home__login", onsubmit: sign_in,
                    h2 { "Admin sign-in" }
                    input {
                        placeholder: "Admin name",
                        value: "{username}",
                        oninput: move |event| username.set(event.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        value: "{password}",
                        oninput: move |event| password.set(event.value()),
                    }
                    button { r#type: "submit", disabled: busy(), "Sign in" }
                }
            }
        }
    }
}
