use crate::api::{BackendHandle, HttpBackend};
use crate::config::AppConfig;
use crate::session::{ChatSession, Panel, SessionStore};
use crate::views::{ChatPanel, NoticeDialog, PanelToggle, UploadPanel};
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/pdfchat.css");

impl SessionStore for Signal<ChatSession> {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatSession) -> R) -> R {
        self.with_mut(f)
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| {
        let config = AppConfig::resolve();
        tracing::info!(api_base = config.api_base(), "using PDF chat backend");
        BackendHandle::new(HttpBackend::new(config))
    });
    let session = use_signal(ChatSession::new);

    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        div { class: "page",
            div { class: "column",
                h1 { class: "title", "CHAT WITH PDFS" }
                PanelSlot { session, panel: Panel::Upload }
                PanelSlot { session, panel: Panel::Chat }
            }
        }
        NoticeDialog { session }
    }
}

#[component]
fn PanelSlot(session: Signal<ChatSession>, panel: Panel) -> Element {
    let is_open = session.read().panels().is_open(panel);
    let class_suffix = match panel {
        Panel::Upload => "spaced",
        Panel::Chat => "",
    };
    rsx! {
        div { class: format_args!("panel-slot {}", class_suffix),
            PanelToggle { session, panel }
            if is_open {
                {match panel {
                    Panel::Upload => rsx! { UploadPanel { session } },
                    Panel::Chat => rsx! { ChatPanel { session } },
                }}
            }
        }
    }
}
