//! User-visible message translation through gettext.
//!
//! The application calls [`init_translations`] once at startup, before the
//! core is initialized. Messages without a catalog entry come back
//! untranslated.

use crate::domain::Result;
use crate::APP_NAME;
use gettextrs::{bind_textdomain_codeset, bindtextdomain, gettext, setlocale, textdomain, LocaleCategory};
use std::path::Path;

/// Gettext domain holding this crate's messages.
pub const GETTEXT_PACKAGE: &str = APP_NAME;

/// Selects the user's locale and binds [`GETTEXT_PACKAGE`] to `locale_dir`.
///
/// # Parameters
///
/// * `locale_dir` - Directory containing `<lang>/LC_MESSAGES/mpv-mirror.mo`
///
/// # Errors
///
/// Returns [`SyncError::Io`](crate::SyncError::Io) if the text domain cannot
/// be bound or selected.
pub fn init_translations(locale_dir: &Path) -> Result<()> {
    if setlocale(LocaleCategory::LcAll, "").is_none() {
        tracing::debug!("locale from environment unavailable, keeping C locale");
    }

    bindtextdomain(GETTEXT_PACKAGE, locale_dir)?;
    bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8")?;
    textdomain(GETTEXT_PACKAGE)?;

    tracing::debug!(domain = GETTEXT_PACKAGE, locale_dir = %locale_dir.display(), "translations bound");
    Ok(())
}

/// Translates `msgid`.
#[must_use]
pub fn i18n(msgid: &str) -> String {
    gettext(msgid)
}

/// Translates `format` and substitutes each `{}` with the next argument.
///
/// Placeholders without a matching argument are left as they are.
///
/// # Parameters
///
/// * `format` - Message id containing `{}` placeholders
/// * `args` - Values substituted in order
///
/// # Returns
///
/// The translated message with every matched placeholder replaced.
///
/// # Example
///
/// ```
/// use mpv_mirror::i18n::i18n_f;
///
/// assert_eq!(
///     i18n_f("Playback was terminated abnormally. Reason: {}.", &["loading failed"]),
///     "Playback was terminated abnormally. Reason: loading failed."
/// );
/// ```
#[must_use]
pub fn i18n_f(format: &str, args: &[&str]) -> String {
    let translated = i18n(format);
    let mut out = String::with_capacity(translated.len());
    let mut args = args.iter();
    let mut rest = translated.as_str();

    while let Some(at) = rest.find("{}") {
        out.push_str(&rest[..at]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);

    out
}
