//! Shared navbar rendered on every page.
//!
//! The platform crate registers a `NavBuilder` so this crate does not need to
//! know the router's `Route` enum: each closure returns a fully constructed
//! `Link` containing the label it is given. Links for the admin-only pages
//! are skipped while signed out.

use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::session::Session;

pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub attendance: fn(label: &str) -> Element,
    pub register: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
    pub profile: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// Call once from the platform crate before rendering the root.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let signed_in = session.read().is_authenticated();

    let links: Option<VNode> = NAV_BUILDER.get().map(|builder| {
        rsx! {
            nav { class: "navbar__links",
                {(builder.home)("Home")}
                {(builder.attendance)("Attendance")}
                {(builder.register)("Register")}
                if signed_in {
                    {(builder.dashboard)("Dashboard")}
                    {(builder.profile)("Profile")}
                }
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    let log_out = move |_| {
        session.write().clear();
        // Back to the landing page; a plain location change also drops any
        // in-flight page state.
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    };

    rsx! {
        header { class: "navbar",
            span { class: "navbar__brand", "Rollcall" }
            {links}
            if signed_in {
                button { class: "navbar__logout", onclick: log_out, "Log out" }
            }
        }
    }
}
