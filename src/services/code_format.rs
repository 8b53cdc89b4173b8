//! Turns a pasted chat message into a tidy fenced code block.

use std::borrow::Cow;
use std::ops::RangeInclusive;

/// Fence tags recognized as a leading language hint
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "actionscript", "angelscript", "arcade", "arduino", "aspectj", "autohotkey", "autoit", "cal",
    "capnproto", "ceylon", "clean", "coffeescript", "cpp", "crystal", "c", "cs", "csharp", "css",
    "d", "dart", "diff", "dos", "dts", "glsl", "gml", "go", "gradle", "groovy", "haxe", "hsp",
    "http", "java", "js", "json", "kotlin", "leaf", "less", "lisp", "livescript", "lsl", "lua",
    "mathematica", "matlab", "mel", "perl", "n1ql", "nginx", "nix", "objectivec", "openscad",
    "php", "powershell", "processing", "protobuff", "puppet", "qml", "r", "reasonml", "roboconf",
    "rsl", "rust", "scala", "scss", "sql", "stan", "swift", "tcl", "thrift", "typescript", "vala",
    "zephir",
];

/// Language assumed when the message names none
pub const DEFAULT_LANGUAGE: &str = "cs";

/// Comments the Unity script template puts above `Start` and `Update`
const TEMPLATE_COMMENTS: [&str; 2] = [
    "// Start is called before the first frame update",
    "// Update is called once per frame",
];

const INDENT: &str = "    ";

/// Language-aware code layout
pub trait PrettyPrinter: Send + Sync {
    fn pretty_print(&self, code: &str, language: &str) -> String;
}

/// Re-indents brace-delimited code by nesting depth and collapses runs of
/// blank lines. Braces inside string literals and `//` comments are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceFormatter;

impl PrettyPrinter for BraceFormatter {
    fn pretty_print(&self, code: &str, _language: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut depth: usize = 0;

        for line in code.lines().map(str::trim) {
            if line.is_empty() {
                if out.last().is_some_and(|l| !l.is_empty()) {
                    out.push(String::new());
                }
                continue;
            }

            let (opens, closes) = count_braces(line);
            let dedent = usize::from(line.starts_with(['}', ')', ']']));
            out.push(format!("{}{}", INDENT.repeat(depth.saturating_sub(dedent)), line));
            depth = (depth + opens).saturating_sub(closes);
        }

        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }
        out.join("\n")
    }
}

fn count_braces(line: &str) -> (usize, usize) {
    let (mut opens, mut closes) = (0, 0);
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                chars.next();
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '/') if chars.peek() == Some(&'/') => break,
            (None, '{' | '(' | '[') => opens += 1,
            (None, '}' | ')' | ']') => closes += 1,
            (None, _) => {}
        }
    }
    (opens, closes)
}

fn is_supported(word: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&word)
}

/// Drop a leading language word, returning the language and the rest
fn split_language(code: &str) -> (Option<&str>, &str) {
    let first = code.split(' ').next().unwrap_or_default();
    if is_supported(first) {
        let rest = code.get(first.len() + 1..).unwrap_or_default();
        (Some(first), rest)
    } else {
        (None, code)
    }
}

/// Strip a surrounding ``` fence, returning the fence's language tag if any.
/// Once a tagged fence is stripped, any backticks left in the body are
/// blanked so they cannot close the output block early. An untagged fence
/// keeps only the text up to its closing fence.
fn strip_fence(code: &str) -> (Option<&str>, Cow<'_, str>) {
    let Some(inner) = code.trim().strip_prefix("```") else {
        return (None, Cow::Borrowed(code));
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    let (first_line, rest) = inner.split_once('\n').unwrap_or((inner, ""));
    if is_supported(first_line.trim()) {
        (Some(first_line.trim()), Cow::Owned(rest.replace('`', " ")))
    } else {
        let body = inner.split_once("```").map_or(inner, |(body, _)| body);
        (None, Cow::Borrowed(body))
    }
}

/// Find the first `void` method whose body holds nothing, including a stock
/// template comment directly above it
fn find_empty_method(lines: &[&str]) -> Option<RangeInclusive<usize>> {
    let mut start = None;

    for (i, line) in lines.iter().enumerate() {
        if line.contains("void") {
            match line.split_once('{').map(|(_, body)| body.trim()) {
                Some("}") => return Some(with_template_comment(lines, i)..=i),
                Some("") => start = Some(i),
                Some(_) => start = None,
                None if line.trim_end().ends_with(';') => start = None,
                None => start = Some(i),
            }
            continue;
        }

        let Some(s) = start else { continue };
        match line.trim() {
            "" | "{" => {}
            rest if rest.starts_with('}') => return Some(with_template_comment(lines, s)..=i),
            _ => start = None,
        }
    }

    None
}

fn with_template_comment(lines: &[&str], start: usize) -> usize {
    match start.checked_sub(1) {
        Some(prev) if TEMPLATE_COMMENTS.contains(&lines[prev].trim()) => prev,
        _ => start,
    }
}

/// Remove empty `void` methods, e.g. untouched `Start`/`Update` stubs
pub fn remove_empty_methods(code: &str) -> String {
    let mut lines: Vec<&str> = code.split('\n').collect();
    while let Some(range) = find_empty_method(&lines) {
        lines.drain(range);
    }
    lines.join("\n")
}

/// Clean up `code` and wrap it in a fenced block
pub fn create_codeblock(code: &str, printer: &dyn PrettyPrinter) -> String {
    let (word_language, code) = split_language(code);
    let (fence_language, code) = strip_fence(code);
    let language = word_language.or(fence_language).unwrap_or(DEFAULT_LANGUAGE);

    let trimmed = remove_empty_methods(&code);
    let formatted = printer.pretty_print(&trimmed, language);
    format!("```{language}\n{formatted}\n```")
}
