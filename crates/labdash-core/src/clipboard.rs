// ── Clipboard copy helper ──

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::CoreError;
use crate::page::CopyPage;
use crate::time::sleep_or_cancel;

/// Async text sink backed by the system clipboard.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), CoreError>;
}

/// Label state of a copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyFeedback {
    Idle,
    Copied,
    Failed,
}

impl CopyFeedback {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Copy",
            Self::Copied => "Copied!",
            Self::Failed => "Error",
        }
    }

    /// Whether the button carries the `copied` class.
    pub fn is_copied(self) -> bool {
        self == Self::Copied
    }

    /// Class toggled on success.
    pub const COPIED_CLASS: &'static str = "copied";
}

/// Copy the text preceding `trigger` and report on the trigger.
///
/// On success the button reads `Copied!` until `revert_delay` has passed,
/// then `Copy` again. On failure it reads `Error` and stays that way.
pub async fn copy_code<P, C>(
    page: &P,
    clipboard: &C,
    trigger: &P::Trigger,
    revert_delay: Duration,
    cancel: &CancellationToken,
) -> Result<(), CoreError>
where
    P: CopyPage + ?Sized,
    C: Clipboard + ?Sized,
{
    let result = match page.preceding_text(trigger) {
        Some(text) => clipboard.write_text(&text).await,
        None => Err(CoreError::PageUnavailable {
            what: "code block before copy button".into(),
        }),
    };

    if let Err(e) = result {
        warn!(error = %e, "failed to copy");
        page.show_copy_feedback(trigger, CopyFeedback::Failed);
        return Err(e);
    }

    page.show_copy_feedback(trigger, CopyFeedback::Copied);
    if sleep_or_cancel(revert_delay, cancel).await {
        page.show_copy_feedback(trigger, CopyFeedback::Idle);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::page::HeadlessPage;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: RefCell<Option<String>>,
        reject: bool,
    }

    impl Clipboard for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), CoreError> {
            if self.reject {
                return Err(CoreError::Clipboard {
                    message: "NotAllowedError".into(),
                });
            }
            *self.contents.borrow_mut() = Some(text.to_owned());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn success_reverts_after_delay() {
        let page = HeadlessPage::new();
        let trigger = page.add_copy_button(Some("nmap -sS 10.0.0.2"));
        let clipboard = MemoryClipboard::default();
        let cancel = CancellationToken::new();

        let mut task = tokio_test::task::spawn(copy_code(
            &page,
            &clipboard,
            &trigger,
            Duration::from_millis(1_500),
            &cancel,
        ));
        tokio_test::assert_pending!(task.poll());
        assert_eq!(clipboard.contents.borrow().as_deref(), Some("nmap -sS 10.0.0.2"));
        let button = page.copy_button(trigger).unwrap();
        assert_eq!(button.label, "Copied!");
        assert!(button.copied);

        tokio::time::advance(Duration::from_millis(1_500)).await;
        tokio_test::assert_ready_ok!(task.poll());
        let button = page.copy_button(trigger).unwrap();
        assert_eq!(button.label, "Copy");
        assert!(!button.copied);
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_keeps_error_label() {
        let page = HeadlessPage::new();
        let trigger = page.add_copy_button(Some("echo hi"));
        let clipboard = MemoryClipboard {
            reject: true,
            ..Default::default()
        };
        let cancel = CancellationToken::new();

        let err = copy_code(&page, &clipboard, &trigger, Duration::from_millis(1_500), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Clipboard { .. }));

        tokio::time::advance(Duration::from_secs(10)).await;
        let button = page.copy_button(trigger).unwrap();
        assert_eq!(button.label, "Error");
        assert!(!button.copied);
    }

    #[tokio::test]
    async fn missing_code_block_is_an_error() {
        let page = HeadlessPage::new();
        let trigger = page.add_copy_button(None);
        let clipboard = MemoryClipboard::default();
        let cancel = CancellationToken::new();

        let err = copy_code(&page, &clipboard, &trigger, Duration::ZERO, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PageUnavailable { .. }));
        assert_eq!(page.copy_button(trigger).unwrap().label, "Error");
        assert!(clipboard.contents.borrow().is_none());
    }
}
