use crate::api::BackendHandle;
use crate::session::{ChatSession, upload_picked};
use crate::types::PdfFile;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use std::path::Path;
use std::sync::Arc;

const SIZE_HINT: &str = "Note: PDF should be of size less than 300kb for faster processing....";

/// Desktop pickers hand back full paths; the backend only needs the file name.
pub fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn selection_summary(paths: &[String]) -> String {
    match paths {
        [] => "No files selected".to_string(),
        [only] => display_name(only),
        _ => format!("{} files selected", paths.len()),
    }
}

async fn read_selection(engine: Arc<dyn FileEngine>) -> Vec<PdfFile> {
    let mut files = Vec::new();
    for path in engine.files() {
        match engine.read_file(&path).await {
            Some(bytes) => files.push(PdfFile::new(display_name(&path), bytes)),
            None => tracing::warn!(file = %path, "could not read selected file"),
        }
    }
    files
}

#[component]
pub fn UploadPanel(session: Signal<ChatSession>) -> Element {
    let backend = use_context::<BackendHandle>();
    // file contents are only read once upload is clicked
    let mut picked = use_signal(|| None::<Arc<dyn FileEngine>>);
    let progress = session.read().upload_progress();

    let on_pick = move |evt: FormEvent| picked.set(evt.files());

    let on_upload = move |_| {
        let engine = picked();
        let backend = backend.clone();
        let mut session = session;
        // Tied to the root scope so closing the panel does not drop the request.
        spawn_forever(async move {
            let pick = async move {
                match engine {
                    Some(engine) => read_selection(engine).await,
                    None => Vec::new(),
                }
            };
            upload_picked(&mut session, &*backend, pick).await;
        });
    };

    let summary = picked
        .read()
        .as_ref()
        .map(|engine| selection_summary(&engine.files()))
        .unwrap_or_else(|| selection_summary(&[]));

    rsx! {
        div { class: "card",
            h4 { class: "card-title", "Upload PDF Files" }
            p { class: "size-hint", "{SIZE_HINT}" }
            input {
                class: "file-input",
                r#type: "file",
                accept: ".pdf",
                multiple: true,
                onchange: on_pick,
            }
            p { class: "selection", "{summary}" }
            button { class: "btn btn-upload", r#type: "button", onclick: on_upload, "Upload PDFs" }
            if progress.is_active() {
                div { class: "progress",
                    div { class: "progress-track",
                        div { class: "progress-fill", style: "width: {progress.percent()}%" }
                    }
                    p { class: "progress-label", "{progress.percent()}%" }
                }
            }
        }
    }
}
