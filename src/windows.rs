use std::borrow::Cow;

use nom::{
    bytes::complete::tag,
    character::complete::{self, satisfy},
    combinator::recognize,
    error::context,
    sequence::{pair, preceded},
    IResult, Parser,
};

use crate::{
    error::ParseError,
    grammar,
    parse::parse_url,
    policy::{is_url_reserved, Policy},
    PathUrl,
};

pub fn is_backslash(c: char) -> bool {
    c == '\\'
}

pub fn parse_drive(path: &str) -> IResult<&str, char> {
    context("drive", satisfy(|c: char| c.is_ascii_alphabetic())).parse(path)
}

/// Recognizes a leading volume such as `C:`, keeping the drive letter's
/// case.
pub fn parse_volume(path: &str) -> IResult<&str, &str> {
    context("volume", recognize(pair(parse_drive, complete::char(':')))).parse(path)
}

fn parse_verbatim(path: &str) -> IResult<&str, &str> {
    context("verbatim", tag("//?/")).parse(path)
}

fn parse_verbatim_unc(path: &str) -> IResult<&str, &str> {
    context("verbatim unc", preceded(parse_verbatim, tag("UNC/"))).parse(path)
}

/// Drops a verbatim marker (`\\?\`, already slashed) in front of a drive or
/// a UNC share, so `//?/C:/x` reads as `C:/x` and `//?/UNC/srv/share` as
/// `//srv/share`. Other verbatim and device paths are left alone.
pub fn strip_verbatim(path: &str) -> Cow<'_, str> {
    if let Ok((share, _)) = parse_verbatim_unc(path) {
        return Cow::Owned(format!("//{share}"));
    }
    match parse_verbatim(path) {
        Ok((rest, _)) if parse_volume(rest).is_ok() => Cow::Borrowed(rest),
        _ => Cow::Borrowed(path),
    }
}

/// Drive-letter paths alongside URLs.
///
/// Backslashes read as forward slashes. An input starting with a volume is
/// never handed to the URL parser (`C:` would read as a scheme); it is kept
/// verbatim with the volume as its first segment. A scheme, a host, a volume
/// or a leading `/` each make a path absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Windows;

impl Policy for Windows {
    fn parse(input: &str) -> Result<PathUrl, ParseError> {
        let slashed: String = input
            .chars()
            .map(|c| if is_backslash(c) { '/' } else { c })
            .collect();
        let input = strip_verbatim(&slashed);

        if let Ok((_, volume)) = parse_volume(&input) {
            tracing::trace!(input = %input, volume, "volume path bypasses url parsing");
            return Ok(PathUrl::from_path(format!("/{input}")));
        }
        parse_url(&input)
    }

    fn is_abs_url(url: &PathUrl) -> bool {
        url.is_qualified()
            || Self::volume_name(url.path()).is_some()
            || grammar::is_abs(url.path())
    }

    fn volume_name(path: &str) -> Option<&str> {
        let (_, volume) = parse_volume(path.strip_prefix('/')?).ok()?;
        Some(volume)
    }

    fn must_escape(c: char) -> bool {
        is_url_reserved(c) || is_backslash(c)
    }
}
