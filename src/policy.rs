use std::borrow::Cow;

use percent_encoding::percent_encode_byte;

use crate::{
    error::{MatchError, ParseError},
    grammar,
    parse::parse_url,
    PathUrl,
};

/// Characters that would not survive another trip through the URL parser.
#[inline]
pub(crate) fn is_url_reserved(c: char) -> bool {
    c.is_ascii_control() || matches!(c, '%' | '?' | '#')
}

/// A decoded host may hold a literal `%` (from `%25`), which is written
/// back escaped.
pub(crate) fn escape_host(host: &str) -> Cow<'_, str> {
    if host.contains('%') {
        Cow::Owned(host.replace('%', "%25"))
    } else {
        Cow::Borrowed(host)
    }
}

fn reattach(volume: &str, rest: String) -> String {
    if volume.is_empty() {
        rest
    } else if rest.is_empty() || rest == "." {
        volume.to_string()
    } else {
        format!("{volume}{rest}")
    }
}

/// The platform rules for reading, writing and locating URL-like paths.
///
/// Implementors supply parsing and the absoluteness test, plus the volume
/// rule when the platform has one. Every path operation is provided on top
/// of those and applies [`grammar`] to the path with any volume split off,
/// so a volume survives cleaning, joining and taking a directory.
pub trait Policy: Sized {
    fn parse(input: &str) -> Result<PathUrl, ParseError>;

    fn is_abs_url(url: &PathUrl) -> bool;

    /// The volume (`C:`) leading a stored path, which then starts with
    /// `/` + volume. The returned slice must begin at index 1 of `path`.
    fn volume_name(_path: &str) -> Option<&str> {
        None
    }

    fn must_escape(c: char) -> bool {
        is_url_reserved(c)
    }

    /// Splits a stored path into its `/`-prefixed volume and the rest.
    fn split_volume(path: &str) -> (&str, &str) {
        match Self::volume_name(path) {
            Some(volume) => path.split_at(volume.len() + 1),
            None => ("", path),
        }
    }

    /// Whether `url` locates itself: a scheme, a host or a volume.
    fn is_located(url: &PathUrl) -> bool {
        url.is_qualified() || Self::volume_name(url.path()).is_some()
    }

    /// The cleaned path, with a volume written as `C:/...` rather than the
    /// stored `/C:/...`.
    fn local_path(url: &PathUrl) -> String {
        let (volume, rest) = Self::split_volume(url.path());
        let rest = grammar::clean(rest);
        match volume.strip_prefix('/') {
            Some(volume) if rest == "." => volume.to_string(),
            Some(volume) => format!("{volume}{rest}"),
            None => rest,
        }
    }

    fn escape(path: &str) -> Cow<'_, str> {
        if !path.chars().any(Self::must_escape) {
            return Cow::Borrowed(path);
        }
        let mut escaped = String::with_capacity(path.len() + 8);
        for c in path.chars() {
            if Self::must_escape(c) {
                escaped.push_str(percent_encode_byte(c as u8));
            } else {
                escaped.push(c);
            }
        }
        Cow::Owned(escaped)
    }

    fn serialize(url: &PathUrl) -> String {
        let local = Self::local_path(url);
        if !url.scheme().is_empty() {
            let rooted = grammar::join(["/", local.as_str()]);
            format!(
                "{}://{}{}",
                url.scheme(),
                escape_host(url.host()),
                Self::escape(&rooted)
            )
        } else if !url.host().is_empty() {
            let rooted = grammar::join(["/", local.as_str()]);
            format!("//{}{}", escape_host(url.host()), Self::escape(&rooted))
        } else if Self::volume_name(url.path()).is_some() {
            // read back verbatim, never through the URL parser
            local
        } else {
            let escaped = Self::escape(&local);
            let first = escaped.split_once('/').map_or(&*escaped, |(first, _)| first);
            if first.contains(':') {
                format!("./{escaped}")
            } else {
                escaped.into_owned()
            }
        }
    }

    /// Applies a grammar operation to the path below the volume.
    fn map_path<F>(path: &str, f: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        let (volume, rest) = Self::split_volume(path);
        reattach(volume, f(rest))
    }

    /// Resolves `path` against the working directory `wd` (`/` when empty).
    ///
    /// A located `path` keeps its own scheme, host and volume. Otherwise it
    /// takes the scheme and host of `wd`, and a relative path is joined onto
    /// the path of `wd`.
    fn abs(path: &str, wd: &str) -> Result<String, ParseError> {
        let wd = if wd.is_empty() { "/" } else { wd };
        let url = Self::parse(path)?;
        let wd = Self::parse(wd)?;

        let resolved = if Self::is_located(&url) {
            let cleaned = Self::map_path(url.path(), grammar::clean);
            url.with_path(cleaned)
        } else if grammar::is_abs(url.path()) {
            let cleaned = grammar::clean(url.path());
            url.with_path(cleaned).with_origin_of(&wd)
        } else {
            let joined = Self::map_path(wd.path(), |base| {
                grammar::join(["/", base, url.path()])
            });
            url.with_path(joined).with_origin_of(&wd)
        };
        tracing::trace!(
            scheme = %resolved.scheme(),
            host = %resolved.host(),
            path = %resolved.path(),
            "resolved against working directory"
        );
        Ok(Self::serialize(&resolved))
    }

    fn base(path: &str) -> Result<String, ParseError> {
        let url = Self::parse(path)?;
        let (_, rest) = Self::split_volume(url.path());
        Ok(grammar::base(rest).to_string())
    }

    fn dir(path: &str) -> Result<String, ParseError> {
        let url = Self::parse(path)?;
        let dir = Self::map_path(url.path(), grammar::dir);
        Ok(Self::serialize(&url.with_path(dir)))
    }

    fn ext(path: &str) -> Result<String, ParseError> {
        let url = Self::parse(path)?;
        let (_, rest) = Self::split_volume(url.path());
        Ok(grammar::ext(rest).to_string())
    }

    fn clean(path: &str) -> Result<String, ParseError> {
        let url = Self::parse(path)?;
        let cleaned = Self::map_path(url.path(), grammar::clean);
        Ok(Self::serialize(&url.with_path(cleaned)))
    }

    fn is_abs(path: &str) -> Result<bool, ParseError> {
        Ok(Self::is_abs_url(&Self::parse(path)?))
    }

    /// Joins the paths of all elements onto the first one, which alone
    /// supplies the scheme, host and volume. No elements joins to `.`, and
    /// a bare volume is joined onto its root as in [`Policy::abs`].
    fn join<I, S>(elems: I) -> Result<String, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut elems = elems.into_iter();
        let Some(first) = elems.next() else {
            return Ok(Self::serialize(&PathUrl::default()));
        };
        let first = Self::parse(first.as_ref())?;

        let (volume, rest) = Self::split_volume(first.path());
        let mut joined = rest.to_string();
        for elem in elems {
            let url = Self::parse(elem.as_ref())?;
            joined = grammar::join([joined.as_str(), url.path()]);
        }
        if !volume.is_empty() && rest.is_empty() && !joined.is_empty() {
            joined = grammar::join(["/", joined.as_str()]);
        }
        let joined = reattach(volume, joined);
        Ok(Self::serialize(&first.with_path(joined)))
    }

    /// Splits after the final separator into the directory, which keeps the
    /// scheme, host and volume, and the file name. The file name is escaped
    /// like a serialized path, so `%` comes back as `%25` and joining the
    /// two parts gives the cleaned input. A bare volume path is never
    /// decoded and its file name is returned as written.
    fn split(path: &str) -> Result<(String, String), ParseError> {
        let url = Self::parse(path)?;
        let (volume, rest) = Self::split_volume(url.path());
        let (dir, file) = grammar::split(rest);
        let file = if volume.is_empty() || url.is_qualified() {
            Self::escape(file).into_owned()
        } else {
            file.to_string()
        };
        let dir = reattach(volume, dir.to_string());
        Ok((Self::serialize(&url.with_path(dir)), file))
    }

    /// Matches the serialized form of `name` against a glob `pattern`.
    fn matches(pattern: &str, name: &str) -> Result<bool, MatchError> {
        let name = Self::serialize(&Self::parse(name)?);
        Ok(grammar::matches(pattern, &name)?)
    }

    /// The cleaned path without scheme or host. A `file` URL or a
    /// schemeless path with a host keeps the host as a `//host` prefix.
    fn path(path: &str) -> Result<String, ParseError> {
        let url = Self::parse(path)?;
        let local = Self::local_path(&url);
        let keeps_host = url.scheme().is_empty() || url.scheme() == "file";
        if url.host().is_empty() || !keeps_host {
            return Ok(local);
        }
        Ok(format!(
            "//{}{}",
            escape_host(url.host()),
            grammar::join(["/", local.as_str()])
        ))
    }

    /// A [`url::Url`](::url::Url) for a located path; see [`crate::to_url`].
    #[cfg(feature = "url")]
    fn to_url(path: &str) -> Result<::url::Url, crate::ToUrlError> {
        crate::url::to_url::<Self>(path)
    }
}

/// Plain URLs and slash paths; only a scheme or a leading `/` makes a path
/// absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Posix;

impl Policy for Posix {
    #[inline]
    fn parse(input: &str) -> Result<PathUrl, ParseError> {
        parse_url(input)
    }

    #[inline]
    fn is_abs_url(url: &PathUrl) -> bool {
        !url.scheme().is_empty() || grammar::is_abs(url.path())
    }
}
