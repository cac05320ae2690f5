//! Splitting of camel-joined multi-valued fields.
//!
//! Scraped country and language cells concatenate names without a
//! separator, e.g. `United StatesUnited Kingdom`. A new name starts at an
//! uppercase letter, except directly after a space, where the letter
//! continues the current name (`United States` stays whole).

/// Splits a camel-joined field into its names, in order of appearance.
///
/// # Examples
///
/// ```
/// use movrank_engine::split::split_multi_valued;
///
/// assert_eq!(
///     split_multi_valued("United StatesUnited Kingdom"),
///     vec!["United States", "United Kingdom"],
/// );
/// assert_eq!(split_multi_valued("EnglishFrench"), vec!["English", "French"]);
/// ```
#[must_use]
pub fn split_multi_valued(text: &str) -> Vec<String> {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut current = String::from(first);
    let mut after_space = false;
    for c in chars {
        if after_space {
            // a space protects exactly one following char
            after_space = false;
        } else {
            if c.is_uppercase() {
                names.push(std::mem::take(&mut current));
            }
            after_space = c == ' ';
        }
        current.push(c);
    }
    names.push(current);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field() {
        assert!(split_multi_valued("").is_empty());
    }

    #[test]
    fn test_capital_after_space_does_not_split() {
        assert_eq!(
            split_multi_valued("United StatesUnited Kingdom"),
            vec!["United States", "United Kingdom"]
        );
        assert_eq!(
            split_multi_valued("New ZealandUnited States"),
            vec!["New Zealand", "United States"]
        );
    }

    #[test]
    fn test_single_name_is_idempotent() {
        for name in ["France", "United States", "West Germany", "Hong Kong"] {
            let once = split_multi_valued(name);
            assert_eq!(once, vec![name]);
            assert_eq!(split_multi_valued(&once[0]), once);
        }
    }

    #[test]
    fn test_many_languages() {
        assert_eq!(
            split_multi_valued("EnglishItalianSpanishLatinSicilian"),
            vec!["English", "Italian", "Spanish", "Latin", "Sicilian"]
        );
    }

    #[test]
    fn test_acronyms_split_per_letter() {
        // positional heuristic: no dictionary knowledge of acronyms
        assert_eq!(split_multi_valued("USA"), vec!["U", "S", "A"]);
    }

    #[test]
    fn test_only_first_char_after_space_is_protected() {
        assert_eq!(split_multi_valued("Sign LanguageEnglish"), vec!["Sign Language", "English"]);
        assert_eq!(split_multi_valued("A BCd"), vec!["A B", "Cd"]);
    }

    #[test]
    fn test_double_space_protects_only_one_char() {
        assert_eq!(split_multi_valued("A  BC"), vec!["A  ", "B", "C"]);
    }
}
