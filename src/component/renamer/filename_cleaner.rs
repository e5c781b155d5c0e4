//! 描述文字清理
//!
//! 把模型給的描述轉成可放進檔名的 slug

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// slug 最大長度（字元）
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

static REGEX_DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid regex"));

static REGEX_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("Invalid regex"));

static REGEX_MULTIPLE_HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("Invalid regex"));

/// 以 NFKD 分解後移除組合符號（é → e）
#[must_use]
pub fn fold_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// 清理描述
///
/// 結果只含小寫字母、數字與單一連字號，頭尾沒有連字號，長度不超過 50
#[must_use]
pub fn sanitize_description(text: &str) -> String {
    let folded = fold_diacritics(text).to_lowercase();
    let stripped = REGEX_DISALLOWED_CHARS.replace_all(&folded, "");
    let hyphenated = REGEX_SEPARATORS.replace_all(&stripped, "-");
    let collapsed = REGEX_MULTIPLE_HYPHENS.replace_all(&hyphenated, "-");

    let truncated: String = collapsed
        .trim_matches('-')
        .chars()
        .take(MAX_DESCRIPTION_LENGTH)
        .collect();

    // 截斷可能剛好停在連字號上
    truncated.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_accents() {
        assert_eq!(sanitize_description("contrôle qualité"), "controle-qualite");
        assert_eq!(fold_diacritics("Février Août"), "Fevrier Aout");
    }

    #[test]
    fn test_removes_special_chars() {
        assert_eq!(sanitize_description("hello@world!#2024"), "helloworld2024");
        assert_eq!(sanitize_description("@#$%^&*!"), "");
        assert_eq!(sanitize_description(""), "");
    }

    #[test]
    fn test_replaces_spaces_with_hyphens() {
        assert_eq!(
            sanitize_description("contrat location moto"),
            "contrat-location-moto"
        );
        assert_eq!(sanitize_description("  FACTURE   MARS "), "facture-mars");
        assert_eq!(sanitize_description("a - - b"), "a-b");
    }

    #[test]
    fn test_underscores_are_dropped() {
        assert_eq!(sanitize_description("rapport_mensuel"), "rapportmensuel");
    }

    #[test]
    fn test_max_50_chars() {
        assert_eq!(sanitize_description(&"a".repeat(100)).len(), 50);
    }

    #[test]
    fn test_truncation_never_leaves_trailing_hyphen() {
        let text = format!("{} suite", "a".repeat(49));
        let result = sanitize_description(&text);
        assert_eq!(result, "a".repeat(49));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "Contrat de location «Cocody» 2024",
            "  --Résumé   général--  ",
            "facture_électricité N°42 / mars",
            "ÉTAT DES BATTERIES (station Plateau)",
            &"mot ".repeat(30),
            "x-",
        ];
        for input in inputs {
            let once = sanitize_description(input);
            assert_eq!(sanitize_description(&once), once, "input: {input}");
            assert!(once.chars().count() <= MAX_DESCRIPTION_LENGTH);
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            );
            assert!(!once.starts_with('-') && !once.ends_with('-'));
            assert!(!once.contains("--"));
        }
    }
}
