//! Per-student profile: search, attendance summary, and the admin editor.
//!
//! Searching a student as a visitor also signs them in with a student-scoped
//! token so the assistant chat works immediately. An admin keeps their admin
//! session; the edit card below the profile renames students, updates
//! details, and corrects daily records through the password-gated endpoints.

use api::types::{AttendanceEdit, StudentProfile as ProfileData};
use dioxus::prelude::*;

use crate::chat::ChatWidget;
use crate::components::{report_error, report_info, StatusMessage};
use crate::core::session::Session;
use crate::core::{format, timing};
use crate::report::roster::CLASS_ROSTER;

/// One editable daily record row: original date, edited date, edited time.
#[derive(Debug, Clone, PartialEq)]
struct RecordEdit {
    original_date: String,
    date: String,
    time: String,
}

#[component]
pub fn Profile() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let status = use_context::<Signal<StatusMessage>>();
    let mut search = use_signal(String::new);
    let profile = use_signal(|| Option::<ProfileData>::None);
    let record_edits = use_signal(Vec::<RecordEdit>::new);
    let mut new_name = use_signal(String::new);
    let mut edit_details = use_signal(String::new);
    let mut password_input = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let run_search = move |_| {
        let name = search.read().trim().to_string();
        if name.is_empty() {
            report_error(status, "Enter student name");
            return;
        }
        if busy() {
            return;
        }
        busy.set(true);
        spawn(async move {
            load_profile(&name, session, profile, record_edits, status).await;
            if let Some(data) = profile.read().as_ref() {
                edit_details.set(data.details.clone());
                new_name.set(String::new());
            }
            busy.set(false);
        });
    };

    let save_student = move |_| {
        let Some(current_name) = profile.read().as_ref().map(|data| data.name.clone()) else {
            report_error(status, "Search student first");
            return;
        };
        let Some(password) = admin_password(session, &password_input.read()) else {
            report_error(status, "Admin password required");
            return;
        };
        let renamed = new_name.read().trim().to_string();
        let renamed = (!renamed.is_empty()).then_some(renamed);
        let details = edit_details.read().trim().to_string();

        spawn(async move {
            let client = session.read().client();
            let result = client
                .update_student(&password, &current_name, renamed.as_deref(), &details)
                .await;
            match result {
                Ok(ack) => {
                    let message = ack.message.unwrap_or_else(|| "Student updated".to_string());
                    report_info(status, message);
                    let reload = renamed.unwrap_or(current_name);
                    search.set(reload.clone());
                    load_profile(&reload, session, profile, record_edits, status).await;
                }
                Err(err) => report_error(status, format!("Update failed: {err}")),
            }
        });
    };

    let apply_edit = move |edit: AttendanceEdit| {
        let Some(password) = admin_password(session, &password_input.read()) else {
            report_error(status, "Admin password required");
            return;
        };
        spawn(async move {
            let client = session.read().client();
            match client.update_attendance(&password, &edit).await {
                Ok(ack) => {
                    let message = ack
                        .message
                        .unwrap_or_else(|| "Daily attendance updated".to_string());
                    report_info(status, message);
                    load_profile(&edit.name, session, profile, record_edits, status).await;
                }
                Err(err) => report_error(status, format!("Attendance update failed: {err}")),
            }
        });
    };

    let current = profile.read().clone();
    let is_admin = session.read().is_admin();
    let edits = record_edits.read().clone();

    rsx! {
        section { class: "page page-profile",
            h1 { "Student profile" }

            div { class: "page-profile__search",
                input {
                    list: "class-roster",
                    placeholder: "Student name",
                    value: "{search}",
                    oninput: move |event| search.set(event.value()),
                }
                datalist { id: "class-roster",
                    for name in CLASS_ROSTER {
                        option { key: "{name}", value: "{name}" }
                    }
                }
                button { disabled: busy(), onclick: run_search, "Search" }
            }

            if let Some(data) = current {
                ProfileCard { data: data.clone() }

                if is_admin {
                    section { class: "profile-edit",
                        h2 { "Edit student" }
                        input {
                            r#type: "password",
                            placeholder: "Admin password",
                            value: "{password_input}",
                            oninput: move |event| password_input.set(event.value()),
                        }
                        input {
                            placeholder: "New name (leave blank to keep)",
                            value: "{new_name}",
                            oninput: move |event| new_name.set(event.value()),
                        }
                        input {
                            placeholder: "Details",
                            value: "{edit_details}",
                            oninput: move |event| edit_details.set(event.value()),
                        }
                        button { onclick: save_student, "Save" }

                        h2 { "Daily records" }
                        RecordEditor {
                            student: data.name.clone(),
                            edits: edits,
                            record_edits: record_edits,
                            on_apply: apply_edit,
                        }
                    }
                }
            }

            ChatWidget {}
        }
    }
}

#[component]
fn ProfileCard(data: ProfileData) -> Element {
    let leave_text = if data.leave_dates.is_empty() {
        "No leave records".to_string()
    } else {
        data.leave_dates.join(", ")
    };
    let percent_class = if data.low_attendance {
        "profile-card__percent profile-card__percent--low"
    } else {
        "profile-card__percent"
    };
    let details = if data.details.is_empty() {
        "Not provided"
    } else {
        &data.details
    };
    let attendance_line = format!(
        "Attendance: {} ({}/{})",
        format::format_percent(data.percentage),
        data.present,
        data.total
    );
    let record_lines: Vec<(String, String)> = data
        .records
        .iter()
        .map(|record| {
            (
                record.date.clone(),
                format!("{} time(s): {}", record.times.len(), record.times.join(", ")),
            )
        })
        .collect();

    rsx! {
        article { class: "profile-card",
            h3 { "{data.name}" }
            p { "Details: {details}" }
            p { class: percent_class, "{attendance_line}" }
            p { "Leave dates: {leave_text}" }
            if data.records.is_empty() {
                p { "No attendance records" }
            } else {
                ul { class: "profile-card__records",
                    for (date, line) in record_lines {
                        li { key: "{date}",
                            strong { "{date}" }
                            " {line}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordEditor(
    student: String,
    edits: Vec<RecordEdit>,
    record_edits: Signal<Vec<RecordEdit>>,
    on_apply: EventHandler<AttendanceEdit>,
) -> Element {
    let add_today = {
        let student = student.clone();
        move |_| {
            let today = timing::format_date(timing::today_local());
            on_apply.call(AttendanceEdit {
                name: student.clone(),
                date: today.clone(),
                time: timing::now_local_hms(),
                new_date: today,
                new_time: timing::now_local_hms(),
                present: true,
            });
        }
    };

    rsx! {
        table { class: "record-editor",
            thead {
                tr {
                    th { "Original date" }
                    th { "New date" }
                    th { "Time" }
                    th { "Action" }
                }
            }
            tbody {
                if edits.is_empty() {
                    tr { td { colspan: 4, "No attendance records yet" } }
                }
                for (index, edit) in edits.into_iter().enumerate() {
                    RecordRow {
                        key: "{edit.original_date}",
                        student: student.clone(),
                        index: index,
                        edit: edit,
                        record_edits: record_edits,
                        on_apply: on_apply,
                    }
                }
            }
        }
        button { class: "record-editor__add", onclick: add_today, "Add today attendance" }
    }
}

#[component]
fn RecordRow(
    student: String,
    index: usize,
    edit: RecordEdit,
    record_edits: Signal<Vec<RecordEdit>>,
    on_apply: EventHandler<AttendanceEdit>,
) -> Element {
    let mut edits_signal = record_edits;

    let save = {
        let student = student.clone();
        let edit = edit.clone();
        move |_| {
            on_apply.call(AttendanceEdit {
                name: student.clone(),
                date: edit.original_date.clone(),
                time: fallback_time(&edit.time),
                new_date: if edit.date.is_empty() {
                    edit.original_date.clone()
                } else {
                    edit.date.clone()
                },
                new_time: fallback_time(&edit.time),
                present: true,
            });
        }
    };

    // Marking leave removes the record instead of moving it.
    let mark_leave = {
        let student = student.clone();
        let edit = edit.clone();
        move |_| {
            on_apply.call(AttendanceEdit {
                name: student.clone(),
                date: edit.original_date.clone(),
                time: fallback_time(&edit.time),
                new_date: edit.original_date.clone(),
                new_time: fallback_time(&edit.time),
                present: false,
            });
        }
    };

    rsx! {
        tr {
            td { "{edit.original_date}" }
            td {
                input {
                    r#type: "date",
                    value: "{edit.date}",
                    oninput: move |event| {
                        if let Some(row) = edits_signal.write().get_mut(index) {
                            row.date = event.value();
                        }
                    },
                }
            }
            td {
                input {
                    r#type: "time",
                    step: "1",
                    value: "{edit.time}",
                    oninput: move |event| {
                        if let Some(row) = edits_signal.write().get_mut(index) {
                            row.time = event.value();
                        }
                    },
                }
            }
            td {
                button { onclick: save, "Save" }
                button { onclick: mark_leave, "Mark leave" }
            }
        }
    }
}

/// Fetches the profile and, for anonymous visitors, signs the student in so
/// the chat relay accepts them. Admin sessions are left untouched.
async fn load_profile(
    name: &str,
    mut session: Signal<Session>,
    mut profile: Signal<Option<ProfileData>>,
    mut record_edits: Signal<Vec<RecordEdit>>,
    status: Signal<StatusMessage>,
) {
    let client = session.read().client();
    let data = match client.student_profile(name).await {
        Ok(data) => data,
        Err(err) => {
            profile.set(None);
            record_edits.set(Vec::new());
            report_error(status, format!("{err}"));
            return;
        }
    };

    if !session.read().is_admin() && !session.read().is_authenticated() {
        if let Ok(reply) = client.login("student", &data.name, None).await {
            if reply.succeeded() {
                let token = reply.token.clone().unwrap_or_default();
                let role = reply.role.unwrap_or_else(|| "student".to_string());
                session.write().sign_in(token, role, None);
                report_info(status, format!("Welcome {}! Student identity verified.", data.name));
            }
        }
    } else {
        report_info(status, "Profile loaded");
    }

    record_edits.set(
        data.records
            .iter()
            .map(|record| RecordEdit {
                original_date: record.date.clone(),
                date: record.date.clone(),
                time: record
                    .times
                    .first()
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect(),
    );
    profile.set(Some(data));
}

/// The password used for admin edits: the field on this page wins, falling
/// back to the one cached at sign-in.
fn admin_password(session: Signal<Session>, typed: &str) -> Option<String> {
    let typed = typed.trim();
    if !typed.is_empty() {
        return Some(typed.to_string());
    }
    session.read().admin_password.clone()
}

fn fallback_time(time: &str) -> String {
    if time.is_empty() {
        "09:00:00".to_string()
    } else {
        time.to_string()
    }
}
