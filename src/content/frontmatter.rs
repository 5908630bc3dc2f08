//! Front-matter splitting and decoding

use serde::{Deserialize, Deserializer};

/// Line that opens and closes a front-matter block
const MARKER: &str = "---";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata declared at the top of a post
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub draft: bool,
    pub summary: Option<String>,
}

impl FrontMatter {
    /// Split `content` and decode its metadata block.
    ///
    /// Returns the decoded front matter and the body. A file without a
    /// complete block decodes to the default front matter with the whole
    /// file as body.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let (block, body) = split(content);
        Ok((Self::decode(block)?, body))
    }

    /// Decode a metadata block. Blank blocks yield the default.
    pub fn decode(block: &str) -> Result<Self, serde_yaml::Error> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(block)
    }
}

/// Split a file into `(metadata, body)`.
///
/// The first non-blank line must be exactly `---` (surrounding whitespace
/// ignored) and a later line must close the block the same way. The
/// metadata is the text strictly between the two marker lines; the body is
/// everything after the closing one. Without both markers the metadata is
/// empty and the body is the untouched input.
pub fn split(content: &str) -> (&str, &str) {
    let mut lines = LineOffsets::new(content);

    let block_start = loop {
        match lines.next() {
            Some((_, line, _)) if line.trim().is_empty() => continue,
            Some((_, line, next)) if line.trim() == MARKER => break next,
            _ => return ("", content),
        }
    };

    for (start, line, next) in lines {
        if line.trim() == MARKER {
            let block = content[block_start..start].trim_end_matches(['\n', '\r']);
            return (block, &content[next..]);
        }
    }

    ("", content)
}

/// Iterator over `(start, line, next_start)` for every line of a string
struct LineOffsets<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> LineOffsets<'a> {
    fn new(content: &'a str) -> Self {
        Self { content, pos: 0 }
    }
}

impl<'a> Iterator for LineOffsets<'a> {
    type Item = (usize, &'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.content.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.content[start..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], start + i + 1),
            None => (rest, self.content.len()),
        };
        self.pos = next;
        Some((start, line, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: custom-slug
date: 2024-01-15 10:30
tags:
  - rust
  - Go
draft: true
summary: A short one.
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.slug.as_deref(), Some("custom-slug"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15 10:30"));
        assert_eq!(fm.tags, vec!["rust", "Go"]);
        assert!(fm.draft);
        assert_eq!(fm.summary.as_deref(), Some("A short one."));
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_unquoted_date_stays_a_string() {
        let (fm, _) = FrontMatter::parse("---\ndate: 2025-08-02\n---\nx").unwrap();
        assert_eq!(fm.date.as_deref(), Some("2025-08-02"));
    }

    #[test]
    fn test_single_string_tag() {
        let (fm, _) = FrontMatter::parse("---\ntags: notes\n---\nx").unwrap();
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_no_front_matter() {
        let content = "# Just a heading\n\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_marker_is_body() {
        let content = "---\ntitle: nope\nstill body";
        let (block, body) = split(content);
        assert_eq!(block, "");
        assert_eq!(body, content);

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_marker_must_be_whole_line() {
        let content = "---not a marker\ntitle: x\n---\nbody";
        assert_eq!(split(content), ("", content));
    }

    #[test]
    fn test_leading_blank_lines_and_crlf() {
        let content = "\r\n\n---\r\ntitle: Win\r\n---\r\nbody\r\n";
        let (block, body) = split(content);
        assert_eq!(block, "title: Win");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(FrontMatter::parse("---\ntitle: [unclosed\n---\nbody").is_err());
        assert!(FrontMatter::parse("---\ndraft: maybe\n---\nbody").is_err());
    }
}
