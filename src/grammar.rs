//! Lexical operations on slash-separated paths.
//!
//! Nothing here knows about schemes, hosts or volumes: both policies hand
//! these functions the bare path (with any volume already split off) and
//! get plain strings back. No function touches the filesystem.

use crate::error::{owned, PatternError};

pub const SEPARATOR: char = '/';

#[inline]
pub fn is_abs(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Returns the shortest path equivalent to `path` by purely lexical
/// processing.
///
/// Repeated separators collapse, `.` segments disappear, `..` eliminates
/// the preceding segment and never climbs above a root. Trailing separators
/// are dropped except for the root itself. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = is_abs(path);

    let mut segments: Vec<&str> = Vec::new();
    // leading `..` segments of a relative path that cannot be popped
    let mut floor = 0;
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.len() > floor {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                    floor = segments.len();
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Joins the non-empty elements with a separator and cleans the result.
/// Returns an empty string when every element is empty.
pub fn join<I, S>(elems: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();
    for elem in elems {
        let elem = elem.as_ref();
        if elem.is_empty() {
            continue;
        }
        if !buf.is_empty() {
            buf.push(SEPARATOR);
        }
        buf.push_str(elem);
    }
    if buf.is_empty() {
        buf
    } else {
        clean(&buf)
    }
}

/// Splits immediately after the final separator. The directory keeps its
/// trailing separator; `dir + file == path` always holds.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    }
}

pub fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind(SEPARATOR) {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

pub fn dir(path: &str) -> String {
    clean(split(path).0)
}

/// The suffix of the final segment starting at its last `.`.
///
/// A segment whose only dot is its first character (`.bashrc`) and the
/// `..` segment have no extension.
pub fn ext(path: &str) -> &str {
    let (_, file) = split(path);
    if file == ".." {
        return "";
    }
    match file.rfind('.') {
        None | Some(0) => "",
        Some(i) => &file[i..],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BadPattern;

/// Shell-style glob matching against the whole of `name`.
///
/// `*` matches any run of non-separator characters, `?` exactly one
/// non-separator character, `[...]` a character class (`^` negates,
/// `a-z` ranges) and `\` escapes the next character. A malformed pattern
/// is reported even when the match fails before reaching the bad part.
pub fn matches(pattern: &str, name: &str) -> Result<bool, PatternError> {
    match_pattern(pattern, name).map_err(|BadPattern| PatternError {
        pattern: owned(pattern),
    })
}

fn match_pattern(mut pattern: &str, mut name: &str) -> Result<bool, BadPattern> {
    'pattern: while !pattern.is_empty() {
        let (star, chunk, rest) = scan_chunk(pattern);
        pattern = rest;
        if star && chunk.is_empty() {
            return Ok(!name.contains(SEPARATOR));
        }

        // the last chunk has to consume the rest of the name
        match match_chunk(chunk, name)? {
            Some(tail) if tail.is_empty() || !pattern.is_empty() => {
                name = tail;
                continue;
            }
            _ => {}
        }

        if star {
            let candidate = name;
            for (i, c) in candidate.char_indices() {
                if c == SEPARATOR {
                    break;
                }
                if let Some(tail) = match_chunk(chunk, &candidate[i + c.len_utf8()..])? {
                    if pattern.is_empty() && !tail.is_empty() {
                        continue;
                    }
                    name = tail;
                    continue 'pattern;
                }
            }
        }

        while !pattern.is_empty() {
            let (_, chunk, rest) = scan_chunk(pattern);
            pattern = rest;
            match_chunk(chunk, "")?;
        }
        return Ok(false);
    }
    Ok(name.is_empty())
}

/// Splits off the leading stars and the literal chunk up to the next star
/// outside of a character class.
fn scan_chunk(pattern: &str) -> (bool, &str, &str) {
    let trimmed = pattern.trim_start_matches('*');
    let star = trimmed.len() != pattern.len();

    let bytes = trimmed.as_bytes();
    let mut in_range = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if i + 1 < bytes.len() {
                    i += 1;
                }
            }
            b'[' => in_range = true,
            b']' => in_range = false,
            b'*' if !in_range => break,
            _ => {}
        }
        i += 1;
    }
    (star, &trimmed[..i], &trimmed[i..])
}

/// Matches `chunk` against the start of `s`, returning what is left of `s`.
/// Once the match has failed the rest of the chunk is still walked so that
/// syntax errors surface.
fn match_chunk<'a>(mut chunk: &str, mut s: &'a str) -> Result<Option<&'a str>, BadPattern> {
    let mut failed = false;
    while let Some(head) = chunk.chars().next() {
        if !failed && s.is_empty() {
            failed = true;
        }
        match head {
            '[' => {
                let mut r = '\0';
                if !failed {
                    if let Some(c) = s.chars().next() {
                        r = c;
                        s = &s[c.len_utf8()..];
                    }
                }
                chunk = &chunk[1..];
                let negated = chunk.starts_with('^');
                if negated {
                    chunk = &chunk[1..];
                }

                let mut matched = false;
                let mut ranges = 0;
                loop {
                    if ranges > 0 && chunk.starts_with(']') {
                        chunk = &chunk[1..];
                        break;
                    }
                    let (lo, rest) = get_esc(chunk)?;
                    chunk = rest;
                    let mut hi = lo;
                    if let Some(rest) = chunk.strip_prefix('-') {
                        let (upper, rest) = get_esc(rest)?;
                        hi = upper;
                        chunk = rest;
                    }
                    if lo <= r && r <= hi {
                        matched = true;
                    }
                    ranges += 1;
                }
                if matched == negated {
                    failed = true;
                }
            }
            '?' => {
                if !failed {
                    if let Some(c) = s.chars().next() {
                        if c == SEPARATOR {
                            failed = true;
                        }
                        s = &s[c.len_utf8()..];
                    }
                }
                chunk = &chunk[1..];
            }
            '\\' => {
                chunk = &chunk[1..];
                let literal = chunk.chars().next().ok_or(BadPattern)?;
                match_literal(literal, &mut s, &mut failed);
                chunk = &chunk[literal.len_utf8()..];
            }
            literal => {
                match_literal(literal, &mut s, &mut failed);
                chunk = &chunk[literal.len_utf8()..];
            }
        }
    }
    Ok(if failed { None } else { Some(s) })
}

fn match_literal(literal: char, s: &mut &str, failed: &mut bool) {
    if *failed {
        return;
    }
    match s.chars().next() {
        Some(c) => {
            if c != literal {
                *failed = true;
            }
            *s = &s[c.len_utf8()..];
        }
        None => *failed = true,
    }
}

/// Reads one possibly escaped character of a class. A class bound can
/// never be `-` or `]` unescaped, and the class must continue afterwards.
fn get_esc(chunk: &str) -> Result<(char, &str), BadPattern> {
    let chunk = match chunk.chars().next() {
        None | Some('-') | Some(']') => return Err(BadPattern),
        Some('\\') => &chunk[1..],
        Some(_) => chunk,
    };
    let c = chunk.chars().next().ok_or(BadPattern)?;
    let rest = &chunk[c.len_utf8()..];
    if rest.is_empty() {
        return Err(BadPattern);
    }
    Ok((c, rest))
}
