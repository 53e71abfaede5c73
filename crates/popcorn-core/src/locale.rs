/// Language used when the environment names none.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Config value that means "follow the system locale".
pub const AUTO: &str = "auto";

/// Two-letter language code of the process locale.
///
/// Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in that order.
pub fn system_language() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_from_locale(&value))
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Resolve a configured language: `auto` follows the system locale.
pub fn resolve_language(configured: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() || configured.eq_ignore_ascii_case(AUTO) {
        system_language()
    } else {
        configured.to_lowercase()
    }
}

/// Extract the language part of a POSIX locale string (`ru_RU.UTF-8` -> `ru`).
/// Returns `None` for empty, `C` and `POSIX` locales.
pub fn language_from_locale(locale: &str) -> Option<String> {
    let lang = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .trim();

    if lang.is_empty() || lang == "C" || lang == "POSIX" {
        return None;
    }
    Some(lang.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_locale() {
        assert_eq!(language_from_locale("ru_RU.UTF-8").as_deref(), Some("ru"));
        assert_eq!(language_from_locale("de_DE@euro").as_deref(), Some("de"));
        assert_eq!(language_from_locale("en").as_deref(), Some("en"));
        assert_eq!(language_from_locale("pt-BR").as_deref(), Some("pt"));
        assert_eq!(language_from_locale("C.UTF-8"), None);
        assert_eq!(language_from_locale("POSIX"), None);
        assert_eq!(language_from_locale(""), None);
    }

    #[test]
    fn test_resolve_explicit_language() {
        assert_eq!(resolve_language("FR"), "fr");
        assert_eq!(resolve_language(" ja "), "ja");
    }

    #[test]
    fn test_resolve_auto_is_never_empty() {
        assert!(!resolve_language("auto").is_empty());
        assert!(!resolve_language("").is_empty());
    }
}
