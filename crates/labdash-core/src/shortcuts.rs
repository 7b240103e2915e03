// ── Keyboard shortcut router ──

use tracing::debug;

use crate::model::AlertSource;
use crate::page::ShortcutPage;

/// The parts of a `keydown` event the router looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// `KeyboardEvent.key`.
    pub key: String,
    pub ctrl: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }
}

/// A bound shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Start the lab of one IDS.
    StartLab(AlertSource),
}

impl Shortcut {
    /// Selector of the control the shortcut clicks.
    pub fn control_selector(self) -> String {
        match self {
            Self::StartLab(lab) => format!("[hx-post=\"/lab/start/{}\"]", lab.id()),
        }
    }
}

/// Map a chord to its shortcut: `Ctrl+1..3` start the snort, suricata and
/// zeek labs.
pub fn resolve(chord: &KeyChord) -> Option<Shortcut> {
    if !chord.ctrl {
        return None;
    }
    let lab = match chord.key.as_str() {
        "1" => AlertSource::Snort,
        "2" => AlertSource::Suricata,
        "3" => AlertSource::Zeek,
        _ => return None,
    };
    Some(Shortcut::StartLab(lab))
}

/// Handle a key press. Returns `true` when the chord is bound, in which
/// case the caller must suppress the browser default.
pub fn handle_key<P: ShortcutPage + ?Sized>(page: &P, chord: &KeyChord) -> bool {
    let Some(shortcut) = resolve(chord) else {
        return false;
    };
    let selector = shortcut.control_selector();
    if !page.click(&selector) {
        debug!(%selector, "shortcut control not on page");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HeadlessPage;

    #[test]
    fn ctrl_digits_resolve_to_labs() {
        assert_eq!(
            resolve(&KeyChord::ctrl("1")),
            Some(Shortcut::StartLab(AlertSource::Snort))
        );
        assert_eq!(
            resolve(&KeyChord::ctrl("2")),
            Some(Shortcut::StartLab(AlertSource::Suricata))
        );
        assert_eq!(
            resolve(&KeyChord::ctrl("3")),
            Some(Shortcut::StartLab(AlertSource::Zeek))
        );
        assert_eq!(resolve(&KeyChord::ctrl("4")), None);
        assert_eq!(resolve(&KeyChord::new("1", false)), None);
    }

    #[test]
    fn bound_chord_clicks_control() {
        let page = HeadlessPage::new().with_control("[hx-post=\"/lab/start/suricata\"]");
        assert!(handle_key(&page, &KeyChord::ctrl("2")));
        assert_eq!(page.clicks("[hx-post=\"/lab/start/suricata\"]"), 1);
    }

    #[test]
    fn missing_control_still_prevents_default() {
        let page = HeadlessPage::new();
        assert!(handle_key(&page, &KeyChord::ctrl("3")));
    }

    #[test]
    fn unbound_chords_are_ignored() {
        let page = HeadlessPage::new().with_control("[hx-post=\"/lab/start/snort\"]");
        assert!(!handle_key(&page, &KeyChord::new("1", false)));
        assert!(!handle_key(&page, &KeyChord::ctrl("s")));
        assert_eq!(page.clicks("[hx-post=\"/lab/start/snort\"]"), 0);
    }
}
