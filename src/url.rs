use std::borrow::Cow;

use ::url::Url;
use percent_encoding::{percent_encode, AsciiSet, CONTROLS};

use crate::{
    error::{owned, ParseError},
    grammar,
    policy::{escape_host, Policy},
};

const URL_FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');
const URL_PATH: &AsciiSet = &URL_FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');
const URL_PATH_SEGMENT: &AsciiSet = &URL_PATH.add(b'/').add(b'%');

#[derive(thiserror::Error, Debug)]
pub enum ToUrlError {
    #[error(transparent)]
    UrlParseError(#[from] ::url::ParseError),
    #[error(transparent)]
    PathParseError(#[from] ParseError),
    #[error("PathNotAbsoluteError {{ path = {path} }}")]
    PathNotAbsoluteError { path: Cow<'static, str> },
}

/// Converts a located path into a [`Url`]. Schemeless paths become `file`
/// URLs, with a host for UNC-style paths and `/C:` for volumes.
pub(crate) fn to_url<P: Policy>(input: &str) -> Result<Url, ToUrlError> {
    let url = P::parse(input)?;
    if !P::is_abs_url(&url) && !P::is_located(&url) {
        return Err(ToUrlError::PathNotAbsoluteError {
            path: owned(input),
        });
    }

    let scheme = if url.scheme().is_empty() {
        "file"
    } else {
        url.scheme()
    };
    let rooted = grammar::join(["/", P::local_path(&url).as_str()]);

    let mut serialization = format!("{scheme}://{}", escape_host(url.host()));
    for segment in rooted.split(grammar::SEPARATOR).skip(1) {
        serialization.push('/');
        serialization.extend(percent_encode(segment.as_bytes(), URL_PATH_SEGMENT));
    }
    Ok(Url::parse(&serialization)?)
}

#[cfg(test)]
mod tests {
    use super::ToUrlError;
    use crate::{Policy, Posix, Windows};

    #[test]
    fn test_to_url() {
        let posix = |source: &str| -> Result<String, ToUrlError> {
            Ok(Posix::to_url(source)?.to_string())
        };
        let windows = |source: &str| -> Result<String, ToUrlError> {
            Ok(Windows::to_url(source)?.to_string())
        };

        assert_eq!(
            posix("/home/user/a b.txt").expect("parse success"),
            "file:///home/user/a%20b.txt"
        );
        assert_eq!(
            posix("mem:///home/user/../test.txt").expect("parse success"),
            "mem:///home/test.txt"
        );
        assert_eq!(
            posix("http://localhost:8118").expect("parse success"),
            "http://localhost:8118/"
        );
        assert_eq!(
            windows(r"C:\home\user").expect("parse success"),
            "file:///C:/home/user"
        );
        assert_eq!(
            windows(r"\\server\share\path").expect("parse success"),
            "file://server/share/path"
        );
        assert!(matches!(
            posix("relative/path"),
            Err(ToUrlError::PathNotAbsoluteError { .. })
        ));
        assert!(matches!(
            posix("/a%zz"),
            Err(ToUrlError::PathParseError(..))
        ));
    }
}
