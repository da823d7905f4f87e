use dioxus::prelude::*;

use ui::components::{register_nav, AppNavbar, NavBuilder, StatusBanner, StatusMessage};
use ui::core::session::Session;
use ui::views::{Attendance, Dashboard, Home, Profile, Register};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/attendance")]
    Attendance {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/profile")]
    Profile {},
}

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_attendance(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Attendance {},
        "{label}"
    })
}
fn nav_register(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Register {},
        "{label}"
    })
}
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}
fn nav_profile(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Profile {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        attendance: nav_attendance,
        register: nav_register,
        dashboard: nav_dashboard,
        profile: nav_profile,
    });

    use_context_provider(|| Signal::new(Session::load()));
    use_context_provider(|| Signal::new(StatusMessage::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Shared page chrome plus the auth guard: the dashboard is admin-only, so
/// an anonymous visitor landing there is bounced back to the home page.
#[component]
fn Shell() -> Element {
    let session = use_context::<Signal<Session>>();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    use_effect(move || {
        let guarded = matches!(route, Route::Dashboard {});
        if guarded && !session.read().is_authenticated() {
            navigator.replace(Route::Home {});
        }
    });

    rsx! {
        AppNavbar {}
        StatusBanner {}
        Outlet::<Route> {}
    }
}
