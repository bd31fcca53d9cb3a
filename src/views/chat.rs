use crate::api::BackendHandle;
use crate::session::{ChatSession, ask_question};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_BOTTOM: &str = r#"
const list = document.getElementById("chat-list");
if (list) { list.scrollTop = list.scrollHeight; }
"#;

/// Empties the input buffer and hands back what was typed.
pub fn take_question(buffer: &mut String) -> String {
    std::mem::take(buffer)
}

#[component]
pub fn ChatPanel(session: Signal<ChatSession>) -> Element {
    let backend = use_context::<BackendHandle>();
    let mut question = use_signal(String::new);

    use_effect(move || {
        let _ = session.read().messages().len();
        document::eval(SCROLL_TO_BOTTOM);
    });

    let messages = session.read().messages().to_vec();

    rsx! {
        div { class: "card",
            div { id: "chat-list", class: "chatbox",
                for (i, message) in messages.iter().enumerate() {
                    div {
                        key: "{i}",
                        class: format_args!("message {}", message.origin.css_class()),
                        "{message.text}"
                    }
                }
            }
            div { class: "input-container",
                input {
                    class: "question-input",
                    r#type: "text",
                    placeholder: "Type your question here...",
                    value: "{question}",
                    oninput: move |ev| question.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() != Key::Enter {
                            return;
                        }
                        ev.prevent_default();
                        // cleared now, whatever the request ends up doing
                        let text = question.with_mut(take_question);

                        let backend = backend.clone();
                        let mut session = session;
                        spawn_forever(async move {
                            ask_question(&mut session, &*backend, &text).await;
                        });
                    },
                }
            }
        }
    }
}
