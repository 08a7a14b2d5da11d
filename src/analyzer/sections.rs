/// The line the game prints between tooltip blocks.
pub const SEPARATOR: &str = "--------";

pub type Section<'a> = Vec<&'a str>;

/// Splits a clipboard dump into its separator-delimited sections.
///
/// Every separator closes the current section, even an empty one, and the
/// trailing section is always kept, so a dump with `n` separators yields
/// `n + 1` sections.
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if line == SEPARATOR {
            sections.push(std::mem::take(&mut current));
            continue;
        }
        current.push(line);
    }
    sections.push(current);

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_basic_dump() {
        let lines = ["Rarity: Currency", "Exalted Orb", "--------", "Stack Size: 1/10"];
        let sections = split_sections(&lines);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], vec!["Rarity: Currency", "Exalted Orb"]);
        assert_eq!(sections[1], vec!["Stack Size: 1/10"]);
    }

    #[test]
    fn test_split_keeps_empty_sections() {
        let lines = ["a", "--------", "--------", "b", "--------"];
        let sections = split_sections(&lines);
        assert_eq!(sections.len(), 4);
        assert!(sections[1].is_empty());
        assert!(sections[3].is_empty());
    }

    #[test]
    fn test_separator_must_match_exactly() {
        let lines = ["a", "-------- ", "---------", "b"];
        assert_eq!(split_sections(&lines).len(), 1);
    }

    fn dump_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(SEPARATOR.to_string()),
            "[A-Za-z0-9:+% -]{0,24}",
        ]
    }

    proptest! {
        #[test]
        fn test_split_is_lossless(lines in proptest::collection::vec(dump_line(), 0..40)) {
            let sections = split_sections(&lines);

            let separators = lines.iter().filter(|l| l.as_str() == SEPARATOR).count();
            prop_assert_eq!(sections.len(), separators + 1);

            let rejoined: Vec<&str> = sections.into_iter().flatten().collect();
            let expected: Vec<&str> = lines
                .iter()
                .map(String::as_str)
                .filter(|l| *l != SEPARATOR)
                .collect();
            prop_assert_eq!(rejoined, expected);
        }
    }
}
