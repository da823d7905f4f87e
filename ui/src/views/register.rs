//! Student registration: capture one face frame and enroll it.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::capture::Camera;
use crate::components::{report_error, report_info, StatusMessage};
use crate::core::session::Session;

const VIDEO_ID: &str = "register-video";

#[component]
pub fn Register() -> Element {
    let session = use_context::<Signal<Session>>();
    let status = use_context::<Signal<StatusMessage>>();
    let mut name = use_signal(String::new);
    let mut details = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let camera = use_hook(|| Rc::new(RefCell::new(Camera::new(VIDEO_ID))));

    // The preview starts as soon as the page mounts, matching the scan page.
    use_effect({
        let camera = Rc::clone(&camera);
        move || {
            let camera = Rc::clone(&camera);
            spawn(async move {
                if let Err(message) = camera.borrow_mut().start().await {
                    report_error(status, message);
                }
            });
        }
    });

    use_drop({
        let camera = Rc::clone(&camera);
        move || camera.borrow_mut().release()
    });

    let submit = {
        let camera = Rc::clone(&camera);
        move |event: FormEvent| {
            event.prevent_default();
            if busy() {
                return;
            }
            let student_name = name.read().trim().to_string();
            if student_name.is_empty() {
                report_error(status, "Please enter student name");
                return;
            }
            let student_details = details.read().trim().to_string();

            let image = match camera.borrow().capture_frame() {
                Ok(image) => image,
                Err(message) => {
                    report_error(status, message);
                    return;
                }
            };
            busy.set(true);

            spawn(async move {
                let client = session.read().client();
                match client
                    .register_student(&student_name, &image, &student_details)
                    .await
                {
                    Ok(ack) => {
                        let message = ack
                            .message
                            .unwrap_or_else(|| "Student registered".to_string());
                        report_info(status, message);
                        name.set(String::new());
                        details.set(String::new());
                    }
                    Err(err) => report_error(status, format!("Registration failed: {err}")),
                }
                busy.set(false);
            });
        }
    };

    rsx! {
        section { class: "page page-register",
            h1 { "Register a student" }
            video {
                id: VIDEO_ID,
                class: "page-register__preview",
                autoplay: true,
                muted: true,
                "playsinline": "true",
            }
            form { class: "page-register__form", onsubmit: submit,
                input {
                    placeholder: "Full name",
                    value: "{name}",
                    oninput: move |event| name.set(event.value()),
                }
                input {
                    placeholder: "Details (roll number, notes)",
                    value: "{details}",
                    oninput: move |event| details.set(event.value()),
                }
                button { r#type: "submit", disabled: busy(), "Capture & register" }
            }
        }
    }
}
