use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ActionStatus, ViewError, ViewState, view_state_from_resource};
use crate::vm::{BoardColumnVm, confirmation_message, map_board, parse_record_form};

#[component]
pub fn BoardView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let progress_for_resource = progress.clone();
    let topics: Vec<String> = progress.catalog().topics().to_vec();
    let clears_log = progress.settings().reset_policy().clears_log();

    let mut topic = use_signal(|| topics.first().cloned().unwrap_or_default());
    let mut quantity = use_signal(|| "1".to_string());
    let mut date = use_signal(|| progress.today().to_string());
    let record_status = use_signal(|| ActionStatus::Idle);
    let mut show_reset_modal = use_signal(|| false);
    let mut reset_status = use_signal(|| ActionStatus::Idle);

    let resource = use_resource(move || {
        let progress = progress_for_resource.clone();
        async move {
            let board = progress
                .board()
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_board(&board))
        }
    });
    let state = view_state_from_resource(&resource);

    let on_record = {
        let progress = progress.clone();
        let topics = topics.clone();
        use_callback(move |()| {
            let mut record_status = record_status;
            let input = match parse_record_form(&topics, &topic(), &quantity(), &date()) {
                Ok(input) => input,
                Err(err) => {
                    record_status.set(ActionStatus::Failed(err));
                    return;
                }
            };
            let progress = progress.clone();
            let mut resource = resource;
            spawn(async move {
                record_status.set(ActionStatus::Working);
                match progress
                    .add_rounds(&input.topic, input.delta, input.date)
                    .await
                {
                    Ok(_) => {
                        record_status.set(ActionStatus::Done(confirmation_message(
                            &input.topic,
                            input.delta,
                        )));
                        resource.restart();
                    }
                    Err(err) => {
                        record_status.set(ActionStatus::Failed(ViewError::from(&err)));
                    }
                }
            });
        })
    };

    let on_adjust = {
        let progress = progress.clone();
        use_callback(move |(topic, delta): (String, i64)| {
            let progress = progress.clone();
            let mut record_status = record_status;
            let mut resource = resource;
            spawn(async move {
                match progress.add_rounds_today(&topic, delta).await {
                    Ok(_) => {
                        record_status.set(ActionStatus::Done(confirmation_message(&topic, delta)));
                        resource.restart();
                    }
                    Err(err) => {
                        record_status.set(ActionStatus::Failed(ViewError::from(&err)));
                    }
                }
            });
        })
    };

    let selected_topic = topic();
    let record_state = record_status();

    rsx! {
        div { class: "page board-page",
            h2 { "Progress" }

            section { class: "record-form",
                div { class: "field",
                    label { r#for: "record-topic", "Topic" }
                    select {
                        id: "record-topic",
                        value: "{selected_topic}",
                        onchange: move |evt| topic.set(evt.value()),
                        for name in topics.iter() {
                            option {
                                key: "{name}",
                                value: "{name}",
                                selected: *name == selected_topic,
                                "{name}"
                            }
                        }
                    }
                }
                div { class: "field",
                    label { r#for: "record-quantity", "Rounds" }
                    input {
                        id: "record-quantity",
                        r#type: "number",
                        step: "1",
                        value: "{quantity}",
                        oninput: move |evt| quantity.set(evt.value()),
                    }
                }
                div { class: "field",
                    label { r#for: "record-date", "Date" }
                    input {
                        id: "record-date",
                        r#type: "date",
                        value: "{date}",
                        oninput: move |evt| date.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: record_state.is_working(),
                    onclick: move |_| on_record.call(()),
                    "Record"
                }
            }
            if let ActionStatus::Done(message) = &record_state {
                p { class: "notice notice-ok", "{message}" }
            }
            if let ActionStatus::Failed(err) = &record_state {
                p { class: "notice notice-error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(board) => rsx! {
                    p { class: "kpi", "Total rounds: {board.total}" }
                    div { class: "board",
                        for column in board.columns {
                            BoardColumnView { key: "{column.topic}", column, on_adjust }
                        }
                    }
                    div { class: "board-footer",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| show_reset_modal.set(true),
                            "Reset all counts"
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

            if show_reset_modal() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| {
                        show_reset_modal.set(false);
                        reset_status.set(ActionStatus::Idle);
                    },
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Reset all counts?" }
                        p { class: "modal-body",
                            if clears_log {
                                "Every topic goes back to zero and the change log is cleared."
                            } else {
                                "Every topic goes back to zero. The change log is kept."
                            }
                        }
                        if let ActionStatus::Failed(err) = reset_status() {
                            p { class: "modal-error", "{err.message()}" }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| {
                                    show_reset_modal.set(false);
                                    reset_status.set(ActionStatus::Idle);
                                },
                                "Cancel"
                            }
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                disabled: reset_status().is_working(),
                                onclick: move |_| {
                                    let progress = progress.clone();
                                    let mut reset_status = reset_status;
                                    let mut show_reset_modal = show_reset_modal;
                                    let mut record_status = record_status;
                                    let mut resource = resource;
                                    spawn(async move {
                                        reset_status.set(ActionStatus::Working);
                                        match progress.reset_all().await {
                                            Ok(_) => {
                                                reset_status.set(ActionStatus::Idle);
                                                show_reset_modal.set(false);
                                                record_status.set(ActionStatus::Done(
                                                    "All counts reset".to_string(),
                                                ));
                                                resource.restart();
                                            }
                                            Err(err) => {
                                                reset_status.set(ActionStatus::Failed(
                                                    ViewError::from(&err),
                                                ));
                                            }
                                        }
                                    });
                                },
                                "Reset"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BoardColumnView(column: BoardColumnVm, on_adjust: EventHandler<(String, i64)>) -> Element {
    let topic_up = column.topic.clone();
    let topic_down = column.topic.clone();

    rsx! {
        div { class: "board-column", title: "{column.topic}",
            span { class: "board-count", "{column.count}" }
            div { class: "board-track",
                div { class: "board-bar", style: "{column.bar_style}" }
            }
            span { class: "board-label", "{column.short_label}" }
            div { class: "board-actions",
                button {
                    class: "btn btn-small",
                    r#type: "button",
                    onclick: move |_| on_adjust.call((topic_up.clone(), 1)),
                    "+1"
                }
                button {
                    class: "btn btn-small",
                    r#type: "button",
                    onclick: move |_| on_adjust.call((topic_down.clone(), -1)),
                    "-1"
                }
            }
        }
    }
}
