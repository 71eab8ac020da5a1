///! Path ordering for the gallery
use crate::config::SortOrder;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two gallery paths under the given order
///
/// Both orders fall back to accents, then case (lowercase first), then code
/// points, so only identical strings compare equal.
pub fn compare_paths(order: SortOrder, a: &str, b: &str) -> Ordering {
    let ordering = match order {
        SortOrder::Locale => locale_cmp(a, b),
        SortOrder::Natural => natural_sort_cmp(a, b).then_with(|| locale_cmp(a, b)),
    };
    ordering.then_with(|| a.cmp(b))
}

/// Multi-level comparison in the manner of `localeCompare`
///
/// Base characters decide first: whitespace, then punctuation and symbols,
/// then digits, then letters, ignoring accents and case. Remaining ties are
/// broken by accents (unaccented first) and then by case (lowercase first).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let a = collation_elements(a);
    let b = collation_elements(b);

    a.iter()
        .map(|e| e.primary)
        .cmp(b.iter().map(|e| e.primary))
        .then_with(|| a.iter().map(|e| &e.marks).cmp(b.iter().map(|e| &e.marks)))
        .then_with(|| a.iter().map(|e| e.upper).cmp(b.iter().map(|e| e.upper)))
}

/// Natural sort comparison using natord, so `img2` sorts before `img10`
pub fn natural_sort_cmp(a: &str, b: &str) -> Ordering {
    natord::compare_ignore_case(a, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

/// One base character with its accents
#[derive(Debug)]
struct Element {
    primary: (CharClass, char),
    marks: Vec<char>,
    upper: bool,
}

fn collation_elements(s: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::with_capacity(s.len());

    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = elements.last_mut() {
                last.marks.push(c);
                continue;
            }
        }

        let class = if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Punctuation
        };

        elements.push(Element {
            primary: (class, c.to_lowercase().next().unwrap_or(c)),
            marks: Vec::new(),
            upper: c.is_uppercase(),
        });
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(order: SortOrder, paths: &[&'static str]) -> Vec<&'static str> {
        let mut paths = paths.to_vec();
        paths.sort_by(|a, b| compare_paths(order, a, b));
        paths
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple.jpg", "Banana.jpg"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra.png", "apple.png"), Ordering::Greater);
        assert_eq!(locale_cmp("a.png", "A.png"), Ordering::Less);
        assert_eq!(locale_cmp("a.png", "a.png"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_digits_are_characters() {
        assert_eq!(locale_cmp("page10.jpg", "page2.jpg"), Ordering::Less);
    }

    #[test]
    fn test_accented_letters_sort_with_base_letter() {
        assert_eq!(
            sorted(SortOrder::Locale, &["zebra.gif", "éclair.gif", "eagle.gif"]),
            vec!["eagle.gif", "éclair.gif", "zebra.gif"]
        );
        assert_eq!(locale_cmp("resume.png", "résumé.png"), Ordering::Less);
        assert_eq!(locale_cmp("Résumé.png", "resume.png"), Ordering::Greater);
        // Precomposed and decomposed forms collate the same
        assert_eq!(locale_cmp("e\u{301}t\u{e9}.png", "\u{e9}t\u{e9}.png"), Ordering::Equal);
    }

    #[test]
    fn test_punctuation_before_digits_before_letters() {
        assert_eq!(
            sorted(SortOrder::Locale, &["a1.gif", "ab.gif", "a_b.gif", "a b.gif"]),
            vec!["a b.gif", "a_b.gif", "a1.gif", "ab.gif"]
        );
    }

    #[test]
    fn test_natural_sort_cmp() {
        assert_eq!(natural_sort_cmp("page1.jpg", "page2.jpg"), Ordering::Less);
        assert_eq!(natural_sort_cmp("page2.jpg", "page10.jpg"), Ordering::Less);
        assert_eq!(
            natural_sort_cmp("page10.jpg", "page2.jpg"),
            Ordering::Greater
        );
        assert_eq!(natural_sort_cmp("apple.jpg", "banana.jpg"), Ordering::Less);
    }

    #[test]
    fn test_compare_paths_tie_break() {
        // Case-equal strings still get a fixed order, lowercase first
        assert_eq!(
            sorted(SortOrder::Locale, &["A.gif", "a.gif"]),
            vec!["a.gif", "A.gif"]
        );
        assert_eq!(compare_paths(SortOrder::Natural, "a.png", "A.png"), Ordering::Less);
        assert_eq!(compare_paths(SortOrder::Locale, "a.png", "a.png"), Ordering::Equal);
    }

    #[test]
    fn test_compare_paths_folders() {
        assert_eq!(
            sorted(SortOrder::Locale, &["trip/b.png", "Trip/a.png", "album/z.png"]),
            vec!["album/z.png", "Trip/a.png", "trip/b.png"]
        );
    }
}
