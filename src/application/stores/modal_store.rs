//! Modal Store
//!
//! State of the single alert/confirm dialog. Showing a dialog returns a
//! [`ModalReply`] that resolves once the UI answers through
//! [`ModalStore::on_confirm`] or [`ModalStore::on_cancel`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::oneshot;

pub const DEFAULT_CONFIRM_TEXT: &str = "OK";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
    Confirm,
}

/// What the dialog currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalView {
    pub visible: bool,
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for ModalView {
    fn default() -> Self {
        Self {
            visible: false,
            kind: ModalKind::Info,
            title: String::new(),
            message: String::new(),
            confirm_text: DEFAULT_CONFIRM_TEXT.into(),
            cancel_text: DEFAULT_CANCEL_TEXT.into(),
        }
    }
}

/// Button labels for a confirm dialog.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
}

/// Answer to a dialog: `true` on confirm.
///
/// Resolves to `false` on cancel, when the dialog is hidden, or when another
/// dialog replaces it.
#[derive(Debug)]
pub struct ModalReply(oneshot::Receiver<bool>);

impl Future for ModalReply {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.0).poll(cx).map(|answer| answer.unwrap_or(false))
    }
}

#[derive(Debug, Default)]
struct ModalState {
    view: ModalView,
    resolver: Option<oneshot::Sender<bool>>,
}

/// Store for the dialog.
#[derive(Debug, Default)]
pub struct ModalStore {
    state: Mutex<ModalState>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_alert(&self, message: impl Into<String>, kind: ModalKind, title: impl Into<String>) -> ModalReply {
        let mut state = self.state.lock();
        state.view = ModalView {
            visible: true,
            kind,
            title: title.into(),
            message: message.into(),
            confirm_text: DEFAULT_CONFIRM_TEXT.into(),
            cancel_text: state.view.cancel_text.clone(),
        };
        Self::arm(&mut state)
    }

    pub fn show_confirm(&self, message: impl Into<String>, title: impl Into<String>, options: ConfirmOptions) -> ModalReply {
        let mut state = self.state.lock();
        state.view = ModalView {
            visible: true,
            kind: ModalKind::Confirm,
            title: title.into(),
            message: message.into(),
            confirm_text: options.confirm_text.unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.into()),
            cancel_text: options.cancel_text.unwrap_or_else(|| DEFAULT_CANCEL_TEXT.into()),
        };
        Self::arm(&mut state)
    }

    pub fn show_success(&self, message: impl Into<String>) -> ModalReply {
        self.show_alert(message, ModalKind::Success, "Success")
    }

    pub fn show_error(&self, message: impl Into<String>) -> ModalReply {
        self.show_alert(message, ModalKind::Error, "Error")
    }

    pub fn show_warning(&self, message: impl Into<String>) -> ModalReply {
        self.show_alert(message, ModalKind::Warning, "Warning")
    }

    /// Hide the dialog. A pending reply resolves to `false`.
    pub fn hide_modal(&self) {
        let mut state = self.state.lock();
        state.view.visible = false;
        state.resolver = None;
    }

    pub fn on_confirm(&self) {
        self.answer(true);
    }

    pub fn on_cancel(&self) {
        self.answer(false);
    }

    pub fn view(&self) -> ModalView {
        self.state.lock().view.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().view.visible
    }

    fn answer(&self, confirmed: bool) {
        let mut state = self.state.lock();
        if let Some(resolver) = state.resolver.take() {
            // the caller may have dropped its reply
            let _ = resolver.send(confirmed);
        }
        state.view.visible = false;
    }

    /// Install a new resolver; the previous one is dropped, resolving its reply to `false`.
    fn arm(state: &mut ModalState) -> ModalReply {
        let (tx, rx) = oneshot::channel();
        state.resolver = Some(tx);
        ModalReply(rx)
    }
}
