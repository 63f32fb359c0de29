use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{BackupView, BoardView, LogView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", BoardView)] Board {},
        #[route("/log", LogView)] Log {},
        #[route("/backup", BackupView)] Backup {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        nav { class: "sidebar",
            h1 { "Study Rounds" }
            ul {
                li { Link { to: Route::Board {}, "Progress" } }
                li { Link { to: Route::Log {}, "Change log" } }
                li { Link { to: Route::Backup {}, "Backup" } }
            }
            p { class: "sidebar-footer", "Data: {ctx.data_file_label()}" }
        }
    }
}
