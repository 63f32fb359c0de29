use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LogRowVm, map_log_rows};

/// How many of the most recent entries the change log shows.
pub const LOG_PAGE_LIMIT: usize = 200;

#[component]
pub fn LogView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let entries = progress
                .recent_log(LOG_PAGE_LIMIT)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_log_rows(&entries))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Change log" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No changes recorded yet." }
                    } else {
                        table { class: "log-table",
                            thead {
                                tr {
                                    th { "Date" }
                                    th { "Topic" }
                                    th { "Change" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    LogRow { row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn LogRow(row: LogRowVm) -> Element {
    let delta_class = if row.is_decrement {
        "log-delta log-delta-down"
    } else {
        "log-delta"
    };

    rsx! {
        tr {
            td { "{row.date}" }
            td { "{row.topic}" }
            td { class: delta_class, "{row.delta}" }
        }
    }
}
