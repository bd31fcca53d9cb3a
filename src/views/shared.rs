use crate::session::{ChatSession, Panel};
use dioxus::prelude::*;

pub fn toggle_label(panel: Panel, is_open: bool) -> &'static str {
    match (panel, is_open) {
        (Panel::Upload, false) => "Upload PDF Files",
        (Panel::Upload, true) => "Close PDF Upload",
        (Panel::Chat, false) => "Open Chat",
        (Panel::Chat, true) => "Close Chat",
    }
}

fn toggle_class(panel: Panel) -> &'static str {
    match panel {
        Panel::Upload => "toggle toggle-upload",
        Panel::Chat => "toggle toggle-chat",
    }
}

#[component]
pub fn PanelToggle(session: Signal<ChatSession>, panel: Panel) -> Element {
    let mut session = session;
    let is_open = session.read().panels().is_open(panel);
    rsx! {
        button {
            class: toggle_class(panel),
            r#type: "button",
            aria_expanded: is_open.to_string(),
            onclick: move |_| {
                session.with_mut(|s| {
                    s.toggle_panel(panel);
                });
            },
            "{toggle_label(panel, is_open)}"
        }
    }
}

/// Modal for the notice at the front of the queue; "OK" moves on to the next one.
#[component]
pub fn NoticeDialog(session: Signal<ChatSession>) -> Element {
    let mut session = session;
    let notice = session.read().current_notice().cloned();
    let Some(notice) = notice else {
        return rsx! {};
    };
    let tone = if notice.is_error() { "error" } else { "info" };

    rsx! {
        div { class: "notice-overlay",
            div { class: format_args!("notice {}", tone), role: "alertdialog",
                p { class: "notice-text", "{notice}" }
                button {
                    class: "btn",
                    r#type: "button",
                    autofocus: true,
                    onclick: move |_| {
                        session.with_mut(|s| {
                            s.dismiss_notice();
                        });
                    },
                    "OK"
                }
            }
        }
    }
}
