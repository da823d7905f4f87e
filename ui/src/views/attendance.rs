//! The live scan page: camera preview plus the start/stop scan loop.
//!
//! While scanning, a frame is captured and submitted every three seconds.
//! Each submission is independent; a failed one is simply retried by the
//! next tick. Leaving the page stops the loop, releases the camera, and
//! tells the backend the session ended.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::capture::Camera;
use crate::components::{report_error, report_info, StatusMessage};
use crate::core::schedule::RepeatingTask;
use crate::core::session::Session;
use crate::core::{platform, timing};

const SCAN_INTERVAL_MS: u64 = 3_000;
const VIDEO_ID: &str = "scan-video";

#[component]
pub fn Attendance() -> Element {
    let session = use_context::<Signal<Session>>();
    let status = use_context::<Signal<StatusMessage>>();
    let mut scanning = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let camera = use_hook(|| Rc::new(RefCell::new(Camera::new(VIDEO_ID))));
    let scan_task = use_hook(|| Rc::new(RefCell::new(Option::<RepeatingTask>::None)));

    let start = {
        let camera = Rc::clone(&camera);
        let scan_task = Rc::clone(&scan_task);
        move |_| {
            if scanning() || busy() {
                return;
            }
            busy.set(true);
            let camera = Rc::clone(&camera);
            let scan_task = Rc::clone(&scan_task);

            spawn(async move {
                let client = session.read().client();

                if let Err(message) = camera.borrow_mut().start().await {
                    report_error(status, message);
                    busy.set(false);
                    return;
                }

                match client.start_session().await {
                    Ok(ack) => {
                        let message = ack
                            .message
                            .unwrap_or_else(|| "Attendance started".to_string());
                        report_info(status, message);
                    }
                    Err(err) => {
                        camera.borrow_mut().release();
                        report_error(status, format!("Failed to start: {err}"));
                        busy.set(false);
                        return;
                    }
                }

                scanning.set(true);
                busy.set(false);

                // First scan fires immediately; the task covers the rest.
                scan_once(Rc::clone(&camera), session, status).await;

                let tick_camera = Rc::clone(&camera);
                let task = RepeatingTask::spawn(SCAN_INTERVAL_MS, move || {
                    scan_once(Rc::clone(&tick_camera), session, status)
                });
                *scan_task.borrow_mut() = Some(task);
            });
        }
    };

    let stop = {
        let camera = Rc::clone(&camera);
        let scan_task = Rc::clone(&scan_task);
        move |_| {
            if !scanning() || busy() {
                return;
            }
            busy.set(true);
            scan_task.borrow_mut().take();
            camera.borrow_mut().release();
            scanning.set(false);

            spawn(async move {
                let client = session.read().client();
                match client.stop_session().await {
                    Ok(ack) => {
                        let message = ack
                            .message
                            .unwrap_or_else(|| "Attendance stopped".to_string());
                        report_info(status, message);
                    }
                    Err(err) => report_error(status, format!("Failed to stop: {err}")),
                }
                busy.set(false);
            });
        }
    };

    // Navigation away must not leave the webcam light on or the loop ticking.
    use_drop({
        let camera = Rc::clone(&camera);
        let scan_task = Rc::clone(&scan_task);
        move || {
            scan_task.borrow_mut().take();
            camera.borrow_mut().release();
            if scanning() {
                let client = session.read().client();
                platform::spawn_future(async move {
                    let _ = client.stop_session().await;
                });
            }
        }
    });

    rsx! {
        section { class: "page page-attendance",
            h1 { "Live attendance" }
            div {
                class: if scanning() { "scan-state scan-state--live" } else { "scan-state" },
                if scanning() { "Scanning…" } else { "Idle" }
            }
            video {
                id: VIDEO_ID,
                class: "page-attendance__preview",
                autoplay: true,
                muted: true,
                "playsinline": "true",
            }
            div { class: "page-attendance__controls",
                button {
                    disabled: scanning() || busy(),
                    onclick: start,
                    "Start scanning"
                }
                button {
                    disabled: !scanning() || busy(),
                    onclick: stop,
                    "Stop"
                }
            }
        }
    }
}

/// One capture-and-submit cycle. Capture failures and transport errors are
/// deliberately quiet; the loop keeps going and the next tick tries again.
async fn scan_once(
    camera: Rc<RefCell<Camera>>,
    session: Signal<Session>,
    status: Signal<StatusMessage>,
) {
    let frame = camera.borrow().capture_frame();
    let image = match frame {
        Ok(image) => image,
        Err(message) => {
            platform::log_warn(&message);
            return;
        }
    };

    let client = session.read().client();
    match client.submit_frame(&image).await {
        Ok(response) => {
            let names = response.known_names();
            if !names.is_empty() {
                report_info(
                    status,
                    format!("Marked: {} at {}", names.join(", "), timing::now_local_hms()),
                );
            }
        }
        Err(err) => platform::log_warn(&format!("frame submission failed: {err}")),
    }
}
