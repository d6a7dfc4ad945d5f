use std::borrow::Cow;

use nom::{
    bytes::complete::{tag, take_till, take_while},
    character::complete::{self, satisfy},
    combinator::recognize,
    error::context,
    sequence::{pair, preceded, terminated},
    IResult, Parser,
};
use percent_encoding::percent_decode_str;

use crate::{
    error::{owned, ParseError},
    PathUrl,
};

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

fn is_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._:~!$&'()*+,;=%@".contains(c)
}

fn is_host_char(c: char) -> bool {
    !c.is_ascii() || c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:[]<>\"%".contains(c)
}

fn is_valid_optional_port(port: &str) -> bool {
    match port.strip_prefix(':') {
        Some(digits) => digits.chars().all(|c| c.is_ascii_digit()),
        None => port.is_empty(),
    }
}

pub fn parse_scheme(input: &str) -> IResult<&str, &str> {
    context(
        "scheme",
        terminated(
            recognize(pair(
                satisfy(|c: char| c.is_ascii_alphabetic()),
                take_while(is_scheme_char),
            )),
            complete::char(':'),
        ),
    )
    .parse(input)
}

pub fn parse_authority(input: &str) -> IResult<&str, &str> {
    context(
        "authority",
        preceded(tag("//"), take_till(|c: char| c == '/')),
    )
    .parse(input)
}

/// Parses `input` with the generic URL grammar: `scheme://host/path`,
/// `scheme:path`, `//host/path` or a bare path.
///
/// The query and fragment are dropped. The path is percent-decoded but not
/// cleaned.
pub fn parse_url(input: &str) -> Result<PathUrl, ParseError> {
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(ParseError::InvalidControlCharacter {
            input: owned(input),
        });
    }

    let (rest, fragment) = input.split_once('#').unwrap_or((input, ""));
    unescape(input, fragment)?;

    if rest == "*" {
        return Ok(PathUrl::from_path(rest));
    }
    if rest.starts_with(':') {
        return Err(ParseError::MissingScheme {
            input: owned(input),
        });
    }

    let (rest, scheme) = match parse_scheme(rest) {
        Ok((rest, scheme)) => (rest, scheme.to_ascii_lowercase()),
        Err(_) => (rest, String::new()),
    };
    let rest = rest.split_once('?').map_or(rest, |(path, _)| path);

    if !rest.starts_with('/') {
        if !scheme.is_empty() {
            // `scheme:opaque`, the opaque part is kept as a relative path
            let path = unescape(input, rest)?;
            return Ok(PathUrl::new(scheme, "", path));
        }
        let first = rest.split_once('/').map_or(rest, |(first, _)| first);
        if first.contains(':') {
            return Err(ParseError::ColonInFirstSegment {
                input: owned(input),
            });
        }
    }

    let (rest, host) = match parse_authority(rest) {
        Ok((path, authority)) if !scheme.is_empty() || !rest.starts_with("///") => {
            (path, parse_authority_host(input, authority)?)
        }
        _ => (rest, String::new()),
    };

    let path = unescape(input, rest)?;
    tracing::trace!(input, scheme = %scheme, host = %host, path = %path, "parsed url-like path");
    Ok(PathUrl::new(scheme, host, path))
}

fn parse_authority_host(input: &str, authority: &str) -> Result<String, ParseError> {
    let host = match authority.rsplit_once('@') {
        Some((userinfo, host)) => {
            if !userinfo.chars().all(is_userinfo_char) {
                return Err(ParseError::InvalidUserInfo {
                    input: owned(input),
                });
            }
            host
        }
        None => authority,
    };

    let port = if host.starts_with('[') {
        match host.rfind(']') {
            Some(end) => &host[end + 1..],
            None => {
                return Err(ParseError::MissingIpv6Bracket {
                    input: owned(input),
                    host: owned(host),
                })
            }
        }
    } else {
        host.rfind(':').map_or("", |i| &host[i..])
    };
    if !is_valid_optional_port(port) {
        return Err(ParseError::InvalidPort {
            input: owned(input),
            port: owned(port),
        });
    }

    if !host.chars().all(is_host_char) {
        return Err(ParseError::InvalidHostCharacter {
            input: owned(input),
            host: owned(host),
        });
    }
    // only `%25` and escapes of non-ASCII bytes are allowed in a host
    for (i, _) in host.match_indices('%') {
        let escape = host.get(i..i + 3).unwrap_or(&host[i..]);
        let is_ascii = u8::from_str_radix(&escape[1..], 16).is_ok_and(|b| b < 0x80);
        if is_ascii && escape != "%25" {
            return Err(ParseError::InvalidEscape {
                input: owned(input),
                escape: owned(escape),
            });
        }
    }
    unescape(input, host)
}

fn unescape(input: &str, s: &str) -> Result<String, ParseError> {
    let bytes = s.as_bytes();
    for (i, _) in s.match_indices('%') {
        let valid = bytes.len() >= i + 3
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            let end = (i + 3).min(s.len());
            return Err(ParseError::InvalidEscape {
                input: owned(input),
                escape: owned(s.get(i..end).unwrap_or(&s[i..])),
            });
        }
    }
    percent_decode_str(s)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ParseError::InvalidUtf8 {
            input: owned(input),
        })
}
