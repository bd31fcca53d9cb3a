//! View state for the chat client and the two operations that drive it.
//!
//! [`ChatSession`] is plain data; the UI keeps it in a signal and tests keep
//! it on the stack. [`upload_files`] and [`ask_question`] work against any
//! [`SessionStore`], so both paths run the same state transitions.

use crate::api::{ApiResult, PdfChatBackend, ProgressSink, TransferProgress};
use crate::types::{Message, PdfFile};
use futures::StreamExt;
use futures::future::{self, Either};
use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Upload,
    Chat,
}

/// Which collapsible panel is showing. At most one is open at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    UploadOpen,
    ChatOpen,
}

impl PanelState {
    pub fn toggle(self, target: Panel) -> Self {
        match (self, target) {
            (PanelState::UploadOpen, Panel::Upload) | (PanelState::ChatOpen, Panel::Chat) => {
                PanelState::Closed
            }
            (_, Panel::Upload) => PanelState::UploadOpen,
            (_, Panel::Chat) => PanelState::ChatOpen,
        }
    }

    pub fn is_open(self, panel: Panel) -> bool {
        matches!(
            (self, panel),
            (PanelState::UploadOpen, Panel::Upload) | (PanelState::ChatOpen, Panel::Chat)
        )
    }
}

/// Upload completion in whole percent, `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }
}

/// Something the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NoFilesSelected,
    EmptyQuestion,
    Uploaded(String),
    UploadFailed,
    AskFailed,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Uploaded(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoFilesSelected => write!(f, "Please select at least one PDF file."),
            Notice::EmptyQuestion => write!(f, "Please enter a question."),
            Notice::Uploaded(message) => write!(f, "{message}"),
            Notice::UploadFailed => write!(
                f,
                "Error uploading PDFs. Please check the console for more details."
            ),
            Notice::AskFailed => write!(
                f,
                "Error getting response. Please check the console for more details."
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<Message>,
    panels: PanelState,
    upload_progress: UploadProgress,
    notices: VecDeque<Notice>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn panels(&self) -> PanelState {
        self.panels
    }

    pub fn upload_progress(&self) -> UploadProgress {
        self.upload_progress
    }

    pub fn toggle_panel(&mut self, panel: Panel) -> PanelState {
        self.panels = self.panels.toggle(panel);
        self.panels
    }

    /// The notice currently on screen, oldest first.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Validates the question and logs it as the user's message.
    ///
    /// Returns the text to send, or `None` when nothing should go out.
    pub fn begin_question(&mut self, text: &str) -> Option<String> {
        if text.is_empty() {
            self.notify(Notice::EmptyQuestion);
            return None;
        }
        self.messages.push(Message::user(text));
        Some(text.to_string())
    }

    /// Folds the answer into the log. A failure leaves the user's message in place.
    pub fn finish_question(&mut self, result: ApiResult<String>) {
        match result {
            Ok(answer) => self.messages.push(Message::bot(answer)),
            Err(err) => {
                tracing::error!(error = %err, "failed to get an answer");
                self.notify(Notice::AskFailed);
            }
        }
    }

    pub fn begin_upload(&mut self, files: Vec<PdfFile>) -> Option<Vec<PdfFile>> {
        if files.is_empty() {
            self.notify(Notice::NoFilesSelected);
            return None;
        }
        self.upload_progress = UploadProgress::default();
        Some(files)
    }

    pub fn record_progress(&mut self, progress: TransferProgress) {
        if let Some(percent) = progress.percent() {
            self.upload_progress = UploadProgress(percent);
        }
    }

    pub fn finish_upload(&mut self, result: ApiResult<String>) {
        match result {
            Ok(message) => {
                tracing::info!(%message, "PDF upload accepted");
                self.upload_progress = UploadProgress::default();
                self.notify(Notice::Uploaded(message));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to upload PDFs");
                self.notify(Notice::UploadFailed);
            }
        }
    }
}

/// Somewhere a [`ChatSession`] lives and can be updated in place.
pub trait SessionStore {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatSession) -> R) -> R;
}

impl SessionStore for ChatSession {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChatSession) -> R) -> R {
        f(self)
    }
}

/// Uploads the picked files, streaming progress into the session as it arrives.
pub async fn upload_files<S, B>(store: &mut S, backend: &B, files: Vec<PdfFile>)
where
    S: SessionStore,
    B: PdfChatBackend + ?Sized,
{
    let Some(files) = store.update(|session| session.begin_upload(files)) else {
        return;
    };

    let (sink, mut events) = ProgressSink::channel();
    let mut upload = backend.upload_pdfs(files, sink);
    let result = loop {
        match future::select(upload, events.next()).await {
            Either::Left((result, _)) => break result,
            Either::Right((Some(progress), pending)) => {
                store.update(|session| session.record_progress(progress));
                upload = pending;
            }
            Either::Right((None, pending)) => break pending.await,
        }
    };
    // reports sent just before the response landed
    while let Ok(Some(progress)) = events.try_next() {
        store.update(|session| session.record_progress(progress));
    }

    store.update(|session| session.finish_upload(result));
}

/// Waits for the picked files to be read, then uploads them.
///
/// The pick is resolved inside the task, so clicking upload right after
/// choosing files still sends them.
pub async fn upload_picked<S, B, P>(store: &mut S, backend: &B, pick: P)
where
    S: SessionStore,
    B: PdfChatBackend + ?Sized,
    P: Future<Output = Vec<PdfFile>>,
{
    let files = pick.await;
    upload_files(store, backend, files).await;
}

/// Logs the question, sends it and appends the answer.
pub async fn ask_question<S, B>(store: &mut S, backend: &B, text: &str)
where
    S: SessionStore,
    B: PdfChatBackend + ?Sized,
{
    let Some(question) = store.update(|session| session.begin_question(text)) else {
        return;
    };
    let result = backend.ask_question(&question).await;
    store.update(|session| session.finish_question(result));
}
