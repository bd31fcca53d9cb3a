pub mod chat;
pub mod shared;
pub mod upload;

pub use chat::ChatPanel;
pub use shared::{NoticeDialog, PanelToggle};
pub use upload::UploadPanel;
