// Alias Generator
// Human-readable random display names

use std::sync::Arc;

use rand::Rng;

use crate::models::AppLocale;
use crate::services::LocaleCatalog;

/// Produces a fresh display name. Implementations draw on the active locale,
/// which is why initialization resolves the locale first.
pub trait AliasGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Adjective + fruit pairs from per-locale word lists. Locales without their
/// own lists fall back to English.
pub struct WordlistAliasGenerator {
    locales: Arc<dyn LocaleCatalog>,
}

const ADJECTIVES_EN: &[&str] = &[
    "Big", "Bold", "Bright", "Calm", "Clever", "Cool", "Fancy", "Fast", "Gentle", "Good",
    "Happy", "Hot", "Little", "Lucky", "Mighty", "Nice", "Proud", "Quiet", "Swift", "Wise",
];

const FRUITS_EN: &[&str] = &[
    "Apple", "Avocado", "Banana", "Blueberry", "Cherry", "Coconut", "Grape", "Kiwi", "Lemon",
    "Lime", "Mango", "Melon", "Orange", "Papaya", "Peach", "Pear", "Pineapple", "Plum",
    "Raspberry", "Strawberry",
];

const ADJECTIVES_DE: &[&str] = &[
    "Edle", "Fixe", "Flinke", "Frohe", "Gute", "Helle", "Kluge", "Kleine", "Leise", "Mutige",
    "Nette", "Ruhige", "Sanfte", "Schlaue", "Schnelle", "Starke", "Stille", "Stolze", "Tapfere",
    "Weise",
];

const FRUITS_DE: &[&str] = &[
    "Ananas", "Banane", "Birne", "Erdbeere", "Himbeere", "Kirsche", "Kiwi", "Kokosnuss",
    "Limette", "Mango", "Melone", "Orange", "Papaya", "Pflaume", "Traube", "Zitrone",
];

const ADJECTIVES_ES: &[&str] = &[
    "Alegre", "Amable", "Audaz", "Brillante", "Fuerte", "Grande", "Lista", "Noble", "Rapida",
    "Sabia", "Serena", "Tranquila", "Valiente", "Veloz",
];

const FRUITS_ES: &[&str] = &[
    "Cereza", "Fresa", "Limon", "Mango", "Manzana", "Melon", "Naranja", "Papaya", "Pera",
    "Pina", "Platano", "Sandia", "Uva",
];

impl WordlistAliasGenerator {
    pub fn new(locales: Arc<dyn LocaleCatalog>) -> Self {
        Self { locales }
    }

    fn word_lists(locale: AppLocale) -> (&'static [&'static str], &'static [&'static str]) {
        match locale {
            AppLocale::De => (ADJECTIVES_DE, FRUITS_DE),
            AppLocale::Es => (ADJECTIVES_ES, FRUITS_ES),
            _ => (ADJECTIVES_EN, FRUITS_EN),
        }
    }
}

impl AliasGenerator for WordlistAliasGenerator {
    fn generate(&self) -> String {
        let (adjectives, fruits) = Self::word_lists(self.locales.active());
        let mut rng = rand::thread_rng();
        let adjective = adjectives[rng.gen_range(0..adjectives.len())];
        let fruit = fruits[rng.gen_range(0..fruits.len())];
        format!("{adjective} {fruit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DeviceLocaleCatalog;

    #[test]
    fn test_alias_is_a_known_word_pair() {
        let catalog = Arc::new(DeviceLocaleCatalog::new());
        catalog.set_locale_raw(AppLocale::En);
        let generator = WordlistAliasGenerator::new(catalog);

        let alias = generator.generate();
        let (adjective, fruit) = alias.split_once(' ').unwrap();
        assert!(ADJECTIVES_EN.contains(&adjective));
        assert!(FRUITS_EN.contains(&fruit));
    }

    #[test]
    fn test_alias_follows_the_active_locale() {
        let catalog = Arc::new(DeviceLocaleCatalog::new());
        catalog.set_locale_raw(AppLocale::De);
        let generator = WordlistAliasGenerator::new(catalog);

        let alias = generator.generate();
        let (adjective, fruit) = alias.split_once(' ').unwrap();
        assert!(ADJECTIVES_DE.contains(&adjective));
        assert!(FRUITS_DE.contains(&fruit));
    }
}
