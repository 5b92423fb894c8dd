
use deunicode::deunicode_char;
use unicode_normalization::UnicodeNormalization;

/// Fold `text` to lowercase ASCII without accents and trim it.
///
/// Input goes through compatibility composition first, so decomposed accents
/// reach the transliteration tables as whole letters and fullwidth forms
/// become plain ones. Every script is transliterated (`đ` to `d`,
/// `мир` to `mir`); pictographs and characters with no table entry are
/// dropped. The output is pure ASCII, so `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkc() {
        fold_char(c, &mut out);
    }
    out.make_ascii_lowercase();
    out.trim().to_string()
}

fn fold_char(c: char, out: &mut String) {
    if c.is_ascii() {
        out.push(c);
    } else if c.is_whitespace() {
        out.push(' ');
    } else if !is_pictograph(c) {
        out.push_str(deunicode_char(c).unwrap_or(""));
    }
}

// emoji, dingbats and their joiners carry no words
fn is_pictograph(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF | 0xFE00..=0xFE0F | 0x200D
    )
}

/// Split normalized text into word-like tokens.
///
/// Chunks are separated by whitespace runs; inside a chunk every character that
/// is not alphanumeric, `_` or `#` is removed, and chunks left empty vanish.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|chunk| {
            let tok: String = chunk.chars().filter(|c| is_token_char(*c)).collect();
            if tok.is_empty() { None } else { Some(tok) }
        })
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '#'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_diacritics() {
        assert_eq!(normalize("Sản phẩm rất tốt"), "san pham rat tot");
        assert_eq!(normalize("Đường ngập lụt"), "duong ngap lut");
        assert_eq!(normalize("KHÔNG tốt"), "khong tot");
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("   Hello World \t\n"), "hello world");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn drops_unmappable_characters() {
        assert_eq!(normalize("tốt 😊👍"), "tot");
        assert_eq!(normalize("vui\u{00a0}qua"), "vui qua");
        assert_eq!(normalize("ＡＢＣ"), "abc");
    }

    #[test]
    fn transliterates_other_scripts() {
        assert_eq!(normalize("Спасибо"), "spasibo");
        assert_eq!(normalize("khong a мир b tot"), "khong a mir b tot");
        let cjk = normalize("北京 tot");
        assert!(cjk.is_ascii());
        assert!(tokenize(&cjk).len() >= 2);
    }

    #[test]
    fn decomposed_accents_fold_like_composed() {
        assert_eq!(normalize("to\u{0302}\u{0301}t"), normalize("tốt"));
        assert_eq!(normalize("to\u{0302}\u{0301}t"), "tot");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Sản phẩm rất tốt!!",
            "  Ngập LỤT nguy hiểm 😡 ",
            "ß Æ œ ø Đ",
            "Спасибо 北京 ❤️",
            "#tag_1 k0 ổn",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
            assert!(once.is_ascii());
        }
    }

    #[test]
    fn tokenize_strips_punctuation() {
        assert_eq!(tokenize("san pham rat tot!!"), vec!["san", "pham", "rat", "tot"]);
        assert_eq!(tokenize("hello, world... !!! ?"), vec!["hello", "world"]);
    }

    #[test]
    fn tokenize_keeps_hash_and_underscore() {
        assert_eq!(tokenize("#bao_lu a-bit k0"), vec!["#bao_lu", "abit", "k0"]);
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t ").is_empty());
        assert!(tokenize("... --- !!!").is_empty());
    }
}
