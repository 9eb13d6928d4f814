/// Cosmetic clean-up of a question for display.
///
/// Lower-cases, collapses whitespace and drops ASCII punctuation other than
/// `?`. The result is only ever echoed back to the user; the model always
/// receives the original text.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = join_words(&lowered);

    let stripped: String = collapsed
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || *c == '?')
        .collect();

    // dropping a standalone token like "-" leaves a double space behind
    join_words(&stripped)
}

// Unicode White_Space plus the ASCII information separators U+001C..=U+001F
fn is_word_break(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn join_words(text: &str) -> String {
    text.split(is_word_break)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn test_arithmetic_question() {
        assert_eq!(normalize("What is 2+2?"), "what is 22?");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize("  Where   is\tthe \n Eiffel Tower? "),
            "where is the eiffel tower?"
        );
    }

    #[test]
    fn test_information_separators_break_words() {
        assert_eq!(normalize("a\u{1c}b\u{1d}c\u{1e}d\u{1f}e"), "a b c d e");
        assert_eq!(normalize("\u{1f}Why\u{1c}?"), "why ?");
    }

    #[test]
    fn test_standalone_punctuation() {
        assert_eq!(normalize("cats - and - dogs!"), "cats and dogs");
        assert_eq!(normalize("... ?"), "?");
    }

    #[test]
    fn test_keeps_non_ascii_letters() {
        assert_eq!(normalize("Qu'est-ce que C'EST?"), "questce que cest?");
        assert_eq!(normalize("Über Straße"), "über straße");
    }

    #[test]
    fn test_output_shape() {
        let samples = [
            "Hello, World!!",
            "  (a) [b] {c}  ",
            "What's the time?? Now!",
            "tabs\tand\nnewlines\r\nhere",
            "\"quoted\" `code` ~tilde~ @at #hash $dollar %pct ^caret &amp *star",
            "under_score / back\\slash | pipe ; semi : colon < > = +",
            "ALL CAPS QUESTION?",
        ];

        for sample in samples {
            let out = normalize(sample);
            assert!(
                out.chars().all(|c| !c.is_ascii_punctuation() || c == '?'),
                "punctuation left in {:?}",
                out
            );
            assert_eq!(out, out.trim());
            assert!(!out.contains("  "), "doubled space in {:?}", out);
            assert!(out.chars().all(|c| !c.is_whitespace() || c == ' '));
            assert_eq!(out, out.to_lowercase());
        }
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "What is 2+2?",
            "  Mixed   CASE, with; punctuation...  ",
            "a - b - c",
            "???",
            "İstanbul nüfusu nedir?",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
