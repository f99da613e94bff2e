//! Splitting one rendered template into many output files.
//!
//! ## Delimiter convention
//!
//! A line starting with one or more `=` followed by `>` begins a new file;
//! the rest of that line, trimmed, is the file name:
//!
//! ```text
//! anything up here is ignored
//! ==> WidgetApi.md
//!
//! # WidgetApi
//! ==> WidgetApi/getWidget.md
//! ...
//! ```
//!
//! The first such line fixes the exact delimiter (`==>` above) for the whole
//! blob. Later boundaries must start with that exact run; `=>` or `===>` lines
//! are ordinary content.

use once_cell::sync::Lazy;
use regex::Regex;

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^=+>").expect("valid delimiter regex")
});

static INDENT_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[ \t]+").expect("valid indent regex")
});

/// A generated file: a relative path and its newline-normalized text.
///
/// The name is passed through as written in the template (trimmed); callers
/// that touch the file system must validate it as a safe relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    name: String,
    text: String,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How split files are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSettings {
    /// Written after every line, including the last.
    pub newline: String,
    /// When set, leading indentation is re-expressed in units of this text.
    /// The template's own unit is whatever the first indented line uses.
    pub indent_text: Option<String>,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            newline: "\n".to_string(),
            indent_text: None,
        }
    }
}

/// Partition a rendered blob into named files.
///
/// Returns no files when the blob has no delimiter line.
#[must_use]
pub fn split_output(text: &str, settings: &SplitSettings) -> Vec<OutputFile> {
    let mut lines = text.lines();

    let Some((delimiter, mut name)) = find_first_boundary(&mut lines) else {
        return Vec::new();
    };

    let mut remapper = settings.indent_text.as_deref().map(IndentRemapper::new);
    let mut files = Vec::new();

    loop {
        let mut body = Vec::new();
        let mut next_name = None;
        for line in lines.by_ref() {
            if let Some(rest) = line.strip_prefix(delimiter) {
                next_name = Some(rest);
                break;
            }
            let line = line.trim_end();
            body.push(match remapper.as_mut() {
                Some(r) => r.remap(line),
                None => line.to_string(),
            });
        }

        trim_blank_lines(&mut body);

        let mut file_text = String::new();
        for line in &body {
            file_text.push_str(line);
            file_text.push_str(&settings.newline);
        }
        let file_name = name.trim();
        tracing::debug!(file = file_name, lines = body.len(), "split output file");
        files.push(OutputFile::new(file_name, file_text));

        match next_name {
            Some(n) => name = n,
            None => break,
        }
    }

    files
}

/// Skip to the first delimiter line, returning the delimiter and the raw
/// remainder of that line.
fn find_first_boundary<'t>(lines: &mut std::str::Lines<'t>) -> Option<(&'t str, &'t str)> {
    lines.find_map(|line| {
        DELIMITER_RE
            .find(line)
            .map(|m| (m.as_str(), &line[m.end()..]))
    })
}

/// Drop one leading blank line (so a template may put a blank line after a
/// delimiter) and every trailing blank line.
fn trim_blank_lines(lines: &mut Vec<String>) {
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

struct IndentRemapper<'s> {
    indent_text: &'s str,
    template_unit: Option<usize>,
}

impl<'s> IndentRemapper<'s> {
    fn new(indent_text: &'s str) -> Self {
        Self {
            indent_text,
            template_unit: None,
        }
    }

    fn remap(&mut self, line: &str) -> String {
        let Some(m) = INDENT_RE.find(line) else {
            return line.to_string();
        };
        let unit = *self.template_unit.get_or_insert(m.len());
        let levels = m.len() / unit;
        let mut out = self.indent_text.repeat(levels);
        out.push_str(&line[unit * levels..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> SplitSettings {
        SplitSettings {
            newline: "\n".to_string(),
            indent_text: Some("\t".to_string()),
        }
    }

    #[test]
    fn test_no_delimiter_yields_no_files() {
        assert!(split_output("just\ntext\n", &SplitSettings::default()).is_empty());
        assert!(split_output("", &SplitSettings::default()).is_empty());
    }

    #[test]
    fn test_lines_before_first_boundary_are_dropped() {
        let files = split_output("preamble\n==> a.md\nbody\n", &SplitSettings::default());
        assert_eq!(files, vec![OutputFile::new("a.md", "body\n")]);
    }

    #[test]
    fn test_single_equals_delimiter() {
        let files = split_output("=> a.md\nx\n=> b.md\ny\n", &SplitSettings::default());
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].name(), "b.md");
        assert_eq!(files[1].text(), "y\n");
    }

    #[test]
    fn test_indent_remap_uses_first_indent_as_unit() {
        let blob = "==> a\nroot\n  one\n    two\n     two-and-a-bit\n x\n";
        let files = split_output(blob, &tabs());
        assert_eq!(files[0].text(), "root\n\tone\n\t\ttwo\n\t\t two-and-a-bit\n x\n");
    }

    #[test]
    fn test_indent_unit_carries_across_files() {
        let blob = "==> a\n    four\n==> b\n        eight\n";
        let files = split_output(blob, &tabs());
        assert_eq!(files[0].text(), "\tfour\n");
        assert_eq!(files[1].text(), "\t\teight\n");
    }

    #[test]
    fn test_indent_untouched_without_setting() {
        let files = split_output("==> a\n  keep\n", &SplitSettings::default());
        assert_eq!(files[0].text(), "  keep\n");
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let files = split_output("==> a\nline   \t\n", &SplitSettings::default());
        assert_eq!(files[0].text(), "line\n");
    }

    #[test]
    fn test_crlf_newline() {
        let settings = SplitSettings {
            newline: "\r\n".to_string(),
            indent_text: None,
        };
        let files = split_output("==> a\r\none\r\ntwo\r\n", &settings);
        assert_eq!(files[0].text(), "one\r\ntwo\r\n");
    }
}
