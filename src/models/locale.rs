// Locale Model
// Supported interface languages and their canonical tags

/// Languages the application ships translations for. Persisted by canonical
/// language tag; an absent tag means "follow the device locale".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLocale {
    De,
    En,
    Es,
    Fr,
    It,
    Ja,
    Ko,
    Nl,
    Pl,
    PtBr,
    Ru,
    Tr,
    Uk,
    ZhHans,
}

impl AppLocale {
    pub fn language_tag(&self) -> &'static str {
        match self {
            AppLocale::De => "de",
            AppLocale::En => "en",
            AppLocale::Es => "es",
            AppLocale::Fr => "fr",
            AppLocale::It => "it",
            AppLocale::Ja => "ja",
            AppLocale::Ko => "ko",
            AppLocale::Nl => "nl",
            AppLocale::Pl => "pl",
            AppLocale::PtBr => "pt-BR",
            AppLocale::Ru => "ru",
            AppLocale::Tr => "tr",
            AppLocale::Uk => "uk",
            AppLocale::ZhHans => "zh-Hans",
        }
    }

    /// Decode a stored tag. Unknown tags return `None`, which callers treat
    /// as "follow the device locale".
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        match tag {
            "de" => Some(AppLocale::De),
            "en" => Some(AppLocale::En),
            "es" => Some(AppLocale::Es),
            "fr" => Some(AppLocale::Fr),
            "it" => Some(AppLocale::It),
            "ja" => Some(AppLocale::Ja),
            "ko" => Some(AppLocale::Ko),
            "nl" => Some(AppLocale::Nl),
            "pl" => Some(AppLocale::Pl),
            "pt-BR" => Some(AppLocale::PtBr),
            "ru" => Some(AppLocale::Ru),
            "tr" => Some(AppLocale::Tr),
            "uk" => Some(AppLocale::Uk),
            "zh-Hans" => Some(AppLocale::ZhHans),
            _ => None,
        }
    }

    pub fn all() -> &'static [AppLocale] {
        &[
            AppLocale::De,
            AppLocale::En,
            AppLocale::Es,
            AppLocale::Fr,
            AppLocale::It,
            AppLocale::Ja,
            AppLocale::Ko,
            AppLocale::Nl,
            AppLocale::Pl,
            AppLocale::PtBr,
            AppLocale::Ru,
            AppLocale::Tr,
            AppLocale::Uk,
            AppLocale::ZhHans,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for locale in AppLocale::all() {
            assert_eq!(AppLocale::from_language_tag(locale.language_tag()), Some(*locale));
        }
    }

    #[test]
    fn test_unknown_tag_is_none() {
        assert_eq!(AppLocale::from_language_tag("tlh"), None);
        assert_eq!(AppLocale::from_language_tag("EN"), None);
    }
}
