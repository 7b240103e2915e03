// ── Page styling shared by the widgets ──

/// `id` of the injected `<style>` element; injection is skipped when present.
pub const STYLE_ELEMENT_ID: &str = "labdash-style";

/// Status indicator colors. The page stylesheet defines the variables.
pub const ACCENT_GREEN: &str = "var(--accent-green)";
pub const ACCENT_RED: &str = "var(--accent-red)";

/// Toast animations and the copy button success state.
pub const STYLE_SHEET: &str = "\
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
.copy-btn.copied {
    background: #22c55e !important;
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_sheet_declares_both_animations() {
        assert!(STYLE_SHEET.contains("@keyframes slideIn"));
        assert!(STYLE_SHEET.contains("@keyframes slideOut"));
        assert!(STYLE_SHEET.contains(".copy-btn.copied"));
    }
}
