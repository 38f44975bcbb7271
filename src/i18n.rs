//! Translation lookup injected into the pages.
//!
//! Strings live in static per-locale tables. Lookups fall back to Japanese,
//! then to the key itself, so a missing entry is visible instead of blank.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English.
    En,
    /// Japanese, the fallback language.
    #[default]
    Ja,
}

impl Locale {
    /// Parses tags such as `en`, `ja_JP.UTF-8` or `en-US`.
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag
            .split(|c: char| c == '_' || c == '-' || c == '.')
            .next()?
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "ja" => Some(Locale::Ja),
            _ => None,
        }
    }

    /// Picks a locale from an explicit setting, then `LC_ALL`, then `LANG`,
    /// falling back to Japanese.
    pub fn detect(explicit: Option<&str>) -> Self {
        let env_all = std::env::var("LC_ALL").ok();
        let env_lang = std::env::var("LANG").ok();
        let candidates = [explicit, env_all.as_deref(), env_lang.as_deref()];
        Self::first_supported(&candidates)
    }

    /// First parseable tag among `candidates`, or the fallback locale.
    fn first_supported(candidates: &[Option<&str>]) -> Self {
        candidates
            .iter()
            .flatten()
            .find_map(|tag| Locale::parse(tag))
            .unwrap_or_default()
    }
}

type Table = HashMap<&'static str, &'static str>;

static EN: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("appTitle", "Complexes"),
        ("loading", "Loading..."),
        ("errorPrefix", "Error: "),
        ("noComplexesFound", "No complexes yet. Press n to add one."),
        ("addNewComplex", "new"),
        ("category", "Category"),
        ("content", "Content"),
        ("createdAt", "Created"),
        ("updatedAt", "Updated"),
        ("goals", "Goals"),
        ("noGoals", "No goals yet."),
        ("surfaceGoal", "Surface goal"),
        ("underlyingGoal", "Underlying goal"),
        ("newComplexTitle", "New complex"),
        ("submit", "save"),
        ("cancel", "cancel"),
        ("back", "back"),
        ("open", "open"),
        ("next", "next"),
        ("prev", "prev"),
        ("refresh", "refresh"),
        ("quit", "quit"),
        ("delete", "delete"),
        ("nextField", "next field"),
        ("saving", "Saving..."),
        ("deleting", "Deleting..."),
        ("deleteConfirmation", "Delete complex {{id}}? (y/n)"),
        ("contentRequired", "Content is required."),
        ("categoryRequired", "Category is required."),
        ("notFound", "Complex {{id}} not found."),
    ])
});

static JA: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("appTitle", "コンプレックス"),
        ("loading", "読み込み中..."),
        ("errorPrefix", "エラー: "),
        ("noComplexesFound", "コンプレックスはまだありません。n で追加できます。"),
        ("addNewComplex", "新規"),
        ("category", "カテゴリ"),
        ("content", "内容"),
        ("createdAt", "作成日時"),
        ("updatedAt", "更新日時"),
        ("goals", "目標"),
        ("noGoals", "目標はまだありません。"),
        ("surfaceGoal", "表面的な目標"),
        ("underlyingGoal", "本当の目標"),
        ("newComplexTitle", "新しいコンプレックス"),
        ("submit", "保存"),
        ("cancel", "キャンセル"),
        ("back", "戻る"),
        ("open", "開く"),
        ("next", "次へ"),
        ("prev", "前へ"),
        ("refresh", "更新"),
        ("quit", "終了"),
        ("delete", "削除"),
        ("nextField", "次の項目"),
        ("saving", "保存中..."),
        ("deleting", "削除中..."),
        ("deleteConfirmation", "コンプレックス {{id}} を削除しますか？ (y/n)"),
        ("contentRequired", "内容を入力してください。"),
        ("categoryRequired", "カテゴリを入力してください。"),
        ("notFound", "コンプレックス {{id}} が見つかりません。"),
    ])
});

/// Looks up UI strings for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    /// Creates a translator for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Active locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translates `key`.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table: &Table = match self.locale {
            Locale::En => &EN,
            Locale::Ja => &JA,
        };
        let found: Option<&'a str> = table.get(key).or_else(|| JA.get(key)).copied();
        found.unwrap_or(key)
    }

    /// Translates `key`, replacing each `{{name}}` with its value.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{{{name}}}}}"), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_per_locale() {
        assert_eq!(Translator::new(Locale::En).t("loading"), "Loading...");
        assert_eq!(Translator::new(Locale::Ja).t("loading"), "読み込み中...");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(Translator::new(Locale::En).t("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_interpolation() {
        let t = Translator::new(Locale::En);
        assert_eq!(
            t.t_with("deleteConfirmation", &[("id", "12")]),
            "Delete complex 12? (y/n)"
        );
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("en_US.UTF-8"), Some(Locale::En));
        assert_eq!(Locale::parse("ja-JP"), Some(Locale::Ja));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn test_explicit_locale_wins() {
        assert_eq!(Locale::detect(Some("en")), Locale::En);
    }

    #[test]
    fn test_detection_order_skips_unsupported() {
        assert_eq!(
            Locale::first_supported(&[None, Some("fr_FR.UTF-8"), Some("en_US.UTF-8")]),
            Locale::En
        );
        assert_eq!(Locale::first_supported(&[Some("de"), None]), Locale::Ja);
    }

    #[test]
    fn test_tables_share_keys() {
        for key in EN.keys() {
            assert!(JA.contains_key(key), "missing ja entry for {key}");
        }
    }
}
