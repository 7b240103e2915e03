// ── Toast notifier ──

use std::str::FromStr;

use tokio_util::sync::CancellationToken;

use crate::config::Timings;
use crate::error::CoreError;
use crate::page::ToastPage;
use crate::time::sleep_or_cancel;

/// Exit animation applied once the visible duration is over.
pub const EXIT_ANIMATION: &str = "slideOut 0.3s ease";

/// Severity of a toast; picks its background.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    /// Parse a level name; anything unrecognized is `Info`.
    pub fn parse_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "#22c55e",
            Self::Error => "#ef4444",
            Self::Warning => "#f59e0b",
            Self::Info => "#3b82f6",
        }
    }
}

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastSpec {
    pub message: String,
    pub level: ToastLevel,
}

impl ToastSpec {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.level)
    }

    /// Inline style of the panel: fixed bottom-right, level background,
    /// entry animation.
    pub fn inline_style(&self) -> String {
        format!(
            "position: fixed; bottom: 2rem; right: 2rem; padding: 1rem 1.5rem; \
             border-radius: 8px; background: {}; color: white; font-weight: 500; \
             z-index: 9999; animation: slideIn 0.3s ease;",
            self.level.background()
        )
    }
}

/// Show a toast for its lifetime: visible for `toast_duration`, then the
/// exit animation for `toast_exit`, then removed.
///
/// Cancellation removes the toast immediately.
pub async fn run_toast<P: ToastPage + ?Sized>(
    page: &P,
    spec: &ToastSpec,
    timings: &Timings,
    cancel: &CancellationToken,
) -> Result<(), CoreError> {
    let toast = page.mount_toast(spec)?;
    if sleep_or_cancel(timings.toast_duration, cancel).await {
        page.start_toast_exit(&toast);
        sleep_or_cancel(timings.toast_exit, cancel).await;
    }
    page.remove_toast(toast);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::page::HeadlessPage;

    #[test]
    fn level_parsing_and_colors() {
        assert_eq!(ToastLevel::parse_lossy("success"), ToastLevel::Success);
        assert_eq!(ToastLevel::parse_lossy("error"), ToastLevel::Error);
        assert_eq!(ToastLevel::parse_lossy("warning"), ToastLevel::Warning);
        assert_eq!(ToastLevel::parse_lossy("loud"), ToastLevel::Info);
        assert_eq!(ToastLevel::Success.background(), "#22c55e");
        assert_eq!(ToastLevel::Error.background(), "#ef4444");
        assert_eq!(ToastLevel::Info.background(), "#3b82f6");
    }

    #[test]
    fn spec_markup() {
        let spec = ToastSpec::new("Lab started", ToastLevel::Success);
        assert_eq!(spec.class_name(), "toast toast-success");
        let style = spec.inline_style();
        assert!(style.contains("background: #22c55e"));
        assert!(style.contains("z-index: 9999"));
        assert!(style.contains("animation: slideIn 0.3s ease"));
    }

    #[tokio::test(start_paused = true)]
    async fn toast_lifecycle() {
        let page = HeadlessPage::new();
        let timings = Timings::default();
        let cancel = CancellationToken::new();
        let spec = ToastSpec::new("saved", ToastLevel::Success);

        let mut task = tokio_test::task::spawn(run_toast(&page, &spec, &timings, &cancel));
        tokio_test::assert_pending!(task.poll());
        assert_eq!(page.toasts().len(), 1);
        assert!(!page.toasts()[0].exiting);

        tokio::time::advance(Duration::from_millis(3_000)).await;
        tokio_test::assert_pending!(task.poll());
        assert!(page.toasts()[0].exiting);

        tokio::time::advance(Duration::from_millis(300)).await;
        tokio_test::assert_ready_ok!(task.poll());
        assert!(page.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_removes_immediately() {
        let page = HeadlessPage::new();
        let timings = Timings::default();
        let cancel = CancellationToken::new();
        let spec = ToastSpec::new("bye", ToastLevel::Info);

        let mut task = tokio_test::task::spawn(run_toast(&page, &spec, &timings, &cancel));
        tokio_test::assert_pending!(task.poll());
        cancel.cancel();
        tokio_test::assert_ready_ok!(task.poll());
        assert!(page.toasts().is_empty());
    }
}
