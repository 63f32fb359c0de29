use std::path::PathBuf;

use dioxus::prelude::*;
use services::{BACKUP_FILE_NAME, ExportFormat};

use crate::context::AppContext;
use crate::views::{ActionStatus, ViewError};
use crate::vm::import_message;

fn parse_path(raw: &str) -> Result<PathBuf, ViewError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ViewError::InvalidPath);
    }
    Ok(PathBuf::from(trimmed))
}

#[component]
pub fn BackupView() -> Element {
    let ctx = use_context::<AppContext>();
    let backup = ctx.backup();

    let mut path = use_signal(|| BACKUP_FILE_NAME.to_string());
    let status = use_signal(|| ActionStatus::Idle);

    let on_export = {
        let backup = backup.clone();
        use_callback(move |format: ExportFormat| {
            let mut status = status;
            let target = match parse_path(&path()) {
                Ok(target) => target,
                Err(err) => {
                    status.set(ActionStatus::Failed(err));
                    return;
                }
            };
            let backup = backup.clone();
            spawn(async move {
                status.set(ActionStatus::Working);
                match backup.export_to_path(&target, format).await {
                    Ok(()) => {
                        status.set(ActionStatus::Done(format!(
                            "Exported to {}",
                            target.display()
                        )));
                    }
                    Err(err) => status.set(ActionStatus::Failed(ViewError::from(&err))),
                }
            });
        })
    };

    let on_import = {
        let backup = backup.clone();
        use_callback(move |()| {
            let mut status = status;
            let source = match parse_path(&path()) {
                Ok(source) => source,
                Err(err) => {
                    status.set(ActionStatus::Failed(err));
                    return;
                }
            };
            let backup = backup.clone();
            spawn(async move {
                status.set(ActionStatus::Working);
                match backup.import_from_path(&source).await {
                    Ok(summary) => status.set(ActionStatus::Done(import_message(&summary))),
                    Err(err) => status.set(ActionStatus::Failed(ViewError::from(&err))),
                }
            });
        })
    };

    let current = status();
    let busy = current.is_working();

    rsx! {
        div { class: "page",
            h2 { "Backup" }
            p {
                "Export writes the full progress snapshot. Import replaces everything with the chosen file; a file that is not a valid backup changes nothing."
            }

            div { class: "field",
                label { r#for: "backup-path", "File" }
                input {
                    id: "backup-path",
                    r#type: "text",
                    value: "{path}",
                    oninput: move |evt| path.set(evt.value()),
                }
            }
            div { class: "backup-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_export.call(ExportFormat::Json { bom: true }),
                    "Export JSON"
                }
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_export.call(ExportFormat::Csv { bom: true }),
                    "Export CSV"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_import.call(()),
                    "Import"
                }
            }

            match current {
                ActionStatus::Working => rsx! {
                    p { class: "notice", "Working..." }
                },
                ActionStatus::Done(message) => rsx! {
                    p { class: "notice notice-ok", "{message}" }
                },
                ActionStatus::Failed(err) => rsx! {
                    p { class: "notice notice-error", "{err.message()}" }
                },
                ActionStatus::Idle => rsx! {},
            }
        }
    }
}
