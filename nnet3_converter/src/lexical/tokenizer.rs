//! Whitespace tokenizer over a single line
//!
//! Tokens are maximal runs of non-whitespace characters. Offsets are byte
//! offsets into the line and always land on character boundaries.

/// Minimum length of a component type tag such as `<NoOpComponent>`
pub const MIN_TYPE_TAG_LEN: usize = 13;

/// Suffix every component type tag carries
pub const TYPE_TAG_SUFFIX: &str = "Component>";

/// Read the next token starting at `pos`.
///
/// Returns the token and the offset just past it, or `None` when only
/// whitespace remains. An exhausted line never pulls new input.
///
/// `pos` and the returned offset count bytes, not characters, so on a line
/// such as `"é x"` the token `é` ends at offset 2. Use `line[..pos]` to
/// recover the consumed prefix; callers that need a character column can
/// take `line[..pos].chars().count()`.
pub fn next_token(line: &str, pos: usize) -> (Option<&str>, usize) {
    let rest = match line.get(pos..) {
        Some(rest) => rest,
        None => return (None, pos),
    };

    let start = match rest.char_indices().find(|(_, c)| !c.is_whitespace()) {
        Some((index, _)) => pos + index,
        None => return (None, line.len().max(pos)),
    };

    let end = line[start..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(index, _)| start + index)
        .unwrap_or(line.len());

    (Some(&line[start..end]), end)
}

/// Skip whitespace from `pos`, reporting whether a line feed was crossed
pub fn skip_whitespace(line: &str, pos: usize) -> (bool, usize) {
    let rest = match line.get(pos..) {
        Some(rest) => rest,
        None => return (false, pos),
    };

    let mut saw_newline = false;
    for (index, c) in rest.char_indices() {
        if !c.is_whitespace() {
            return (saw_newline, pos + index);
        }
        if c == '\n' {
            saw_newline = true;
        }
    }

    (saw_newline, line.len())
}

/// Check the shape of a component type tag: `<`, a name, `Component>`
pub fn is_component_type_tag(token: &str) -> bool {
    token.chars().count() >= MIN_TYPE_TAG_LEN
        && token.starts_with('<')
        && token.ends_with(TYPE_TAG_SUFFIX)
}

/// Strip the angle brackets from a tag: `<AffineComponent>` becomes `AffineComponent`
pub fn tag_name(tag: &str) -> &str {
    tag.trim_start_matches('<').trim_end_matches('>')
}

/// Closing form of an opening tag: `<AffineComponent>` becomes `</AffineComponent>`
pub fn closing_tag(tag: &str) -> String {
    format!("</{}>", tag_name(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_token_skips_leading_whitespace() {
        assert_eq!(next_token("  <Dim> 3", 0), (Some("<Dim>"), 7));
        assert_eq!(next_token("  <Dim> 3", 7), (Some("3"), 9));
    }

    #[test]
    fn test_next_token_at_end_of_line() {
        let line = "<Dim> 3  \n";
        let (token, pos) = next_token(line, 7);
        assert_eq!(token, None);
        assert_eq!(pos, line.len());

        assert_eq!(next_token("", 0), (None, 0));
        assert_eq!(next_token("abc", 10), (None, 10));
    }

    #[test]
    fn test_next_token_handles_multibyte_text() {
        let line = "é ü\tx";
        let (first, pos) = next_token(line, 0);
        assert_eq!(first, Some("é"));
        let (second, pos) = next_token(line, pos);
        assert_eq!(second, Some("ü"));
        assert_eq!(next_token(line, pos).0, Some("x"));
    }

    #[test]
    fn test_offsets_are_bytes() {
        let line = "é x";
        let (token, pos) = next_token(line, 0);
        assert_eq!(token, Some("é"));
        assert_eq!(pos, 2);
        assert_eq!(line[..pos].chars().count(), 1);
        assert_eq!(next_token(line, pos), (Some("x"), 4));
    }

    #[test]
    fn test_tokens_cover_line_exactly() {
        let lines = [
            "",
            "   ",
            "<Dim> 3",
            "  <LinearParams>  [\n",
            "\t1 2\t\t3 \r\n",
            "a\u{a0}b  c\u{2003}d",
            "  <ComponentName> tdnn1.affine <NaturalGradientAffineComponent> <MaxChange> 0.75 ",
            "x",
            " é  ü\tдим ] ",
        ];

        for line in lines {
            let mut tokens = Vec::new();
            let mut pos = 0;
            while let (Some(token), next) = next_token(line, pos) {
                assert!(next > pos, "no progress on {:?}", line);
                tokens.push(token);
                pos = next;
            }

            let expected: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(tokens, expected, "line {:?}", line);
            assert_eq!(tokens.concat(), expected.concat());
        }
    }

    #[test]
    fn test_skip_whitespace_reports_line_feed() {
        assert_eq!(skip_whitespace(" 1", 0), (false, 1));
        assert_eq!(skip_whitespace(" \n 3", 0), (true, 3));
        assert_eq!(skip_whitespace("2 \n", 1), (true, 3));
    }

    #[test]
    fn test_component_type_tag_shape() {
        assert!(is_component_type_tag("<AffineComponent>"));
        assert!(is_component_type_tag("<NoOpComponent>"));
        assert!(!is_component_type_tag("<Affine>"));
        assert!(!is_component_type_tag("AffineComponent>"));
        assert!(!is_component_type_tag("<Component>"));
    }

    #[test]
    fn test_tag_helpers() {
        assert_eq!(tag_name("<BatchNormComponent>"), "BatchNormComponent");
        assert_eq!(closing_tag("<BatchNormComponent>"), "</BatchNormComponent>");
    }
}
