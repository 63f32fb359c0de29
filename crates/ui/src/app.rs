use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

const STYLE: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; background: #F8FAFC; color: #0F172A; }
.app { display: flex; min-height: 100vh; }
.sidebar { width: 200px; padding: 16px; background: #0F172A; color: #E2E8F0; }
.sidebar h1 { font-size: 18px; margin: 0 0 16px; }
.sidebar ul { list-style: none; padding: 0; margin: 0; }
.sidebar li { margin-bottom: 8px; }
.sidebar a { color: inherit; text-decoration: none; }
.sidebar-footer { margin-top: 24px; font-size: 12px; color: #94A3B8; word-break: break-all; }
.content { flex: 1; padding: 24px; overflow-x: auto; }
.field { display: flex; flex-direction: column; gap: 4px; }
.record-form { display: flex; align-items: flex-end; gap: 12px; flex-wrap: wrap; margin-bottom: 12px; }
.btn { padding: 6px 12px; border: 1px solid #CBD5E1; border-radius: 6px; background: #FFFFFF; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: default; }
.btn-primary { background: #2563EB; border-color: #2563EB; color: #FFFFFF; }
.btn-danger { background: #EF4444; border-color: #EF4444; color: #FFFFFF; }
.btn-small { padding: 2px 6px; font-size: 12px; }
.notice { margin: 8px 0; }
.notice-ok { color: #059669; }
.notice-error { color: #DC2626; }
.kpi { font-size: 20px; font-weight: 600; }
.board { display: flex; gap: 8px; align-items: flex-end; padding: 12px 0; }
.board-column { display: flex; flex-direction: column; align-items: center; width: 48px; }
.board-track { height: 240px; width: 28px; display: flex; align-items: flex-end; background: #E2E8F0; border-radius: 4px; }
.board-bar { width: 100%; border-radius: 4px; }
.board-count { font-size: 12px; }
.board-label { font-size: 12px; margin-top: 4px; white-space: nowrap; }
.board-actions { display: flex; flex-direction: column; gap: 2px; margin-top: 4px; }
.board-footer { margin-top: 12px; }
.backup-actions { display: flex; gap: 8px; margin-top: 12px; }
.log-table { border-collapse: collapse; }
.log-table th, .log-table td { padding: 4px 12px; border-bottom: 1px solid #E2E8F0; text-align: left; }
.log-delta { font-variant-numeric: tabular-nums; }
.log-delta-down { color: #DC2626; }
.modal-overlay { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.4); display: flex; align-items: center; justify-content: center; }
.modal { background: #FFFFFF; padding: 20px; border-radius: 8px; max-width: 360px; }
.modal-actions { display: flex; justify-content: flex-end; gap: 8px; }
.modal-error { color: #DC2626; }
";

#[component]
pub fn App() -> Element {
    rsx! {
        style { "{STYLE}" }

        // Stable OS/window title.
        document::Title { "Study Rounds" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
