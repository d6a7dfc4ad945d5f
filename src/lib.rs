//! Path operations over strings that may be plain paths, `file://` URLs,
//! `scheme://host/path` URLs or drive-letter paths such as `C:/home/user`.
//!
//! Every operation parses its inputs with the platform [`Policy`], applies
//! slash-path rules from [`grammar`] to the path component only, and writes
//! the result back without losing the scheme, host or volume.
//!
//! ```
//! assert_eq!(
//!     quirks_urlpath::abs("../test.txt", "mem:///home/user").unwrap(),
//!     "mem:///home/test.txt"
//! );
//! assert_eq!(
//!     quirks_urlpath::clean("http://localhost:8118/a/./b/..").unwrap(),
//!     "http://localhost:8118/a"
//! );
//! ```
//!
//! The crate-level functions use [`Native`], chosen when compiling. The
//! [`Posix`] and [`Windows`] policies can also be called directly on any
//! target.

pub mod error;
pub mod grammar;
mod parse;
mod path_url;
mod policy;
#[cfg(feature = "url")]
mod url;
pub mod windows;

pub use error::{MatchError, ParseError, PatternError};
pub use path_url::PathUrl;
pub use policy::{Policy, Posix};
pub use windows::Windows;

#[cfg(feature = "url")]
pub use crate::url::ToUrlError;

#[cfg(windows)]
pub type Native = Windows;

#[cfg(not(windows))]
pub type Native = Posix;

/// Resolves `path` against the working directory `wd`; an empty `wd`
/// means `/`.
pub fn abs<P: AsRef<str>, W: AsRef<str>>(path: P, wd: W) -> Result<String, ParseError> {
    Native::abs(path.as_ref(), wd.as_ref())
}

pub fn base<P: AsRef<str>>(path: P) -> Result<String, ParseError> {
    Native::base(path.as_ref())
}

pub fn dir<P: AsRef<str>>(path: P) -> Result<String, ParseError> {
    Native::dir(path.as_ref())
}

pub fn ext<P: AsRef<str>>(path: P) -> Result<String, ParseError> {
    Native::ext(path.as_ref())
}

pub fn clean<P: AsRef<str>>(path: P) -> Result<String, ParseError> {
    Native::clean(path.as_ref())
}

pub fn is_abs<P: AsRef<str>>(path: P) -> Result<bool, ParseError> {
    Native::is_abs(path.as_ref())
}

/// Joins the paths of `elems` onto the first element, which supplies the
/// scheme and host of the result.
pub fn join<I, S>(elems: I) -> Result<String, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Native::join(elems)
}

pub fn split<P: AsRef<str>>(path: P) -> Result<(String, String), ParseError> {
    Native::split(path.as_ref())
}

/// Glob-matches `pattern` against the cleaned, serialized form of `name`.
pub fn matches<P: AsRef<str>, N: AsRef<str>>(pattern: P, name: N) -> Result<bool, MatchError> {
    Native::matches(pattern.as_ref(), name.as_ref())
}

pub fn path<P: AsRef<str>>(path: P) -> Result<String, ParseError> {
    Native::path(path.as_ref())
}

#[cfg(feature = "url")]
pub fn to_url<P: AsRef<str>>(path: P) -> Result<::url::Url, ToUrlError> {
    Native::to_url(path.as_ref())
}

#[cfg(test)]
mod tests {
    use crate::{grammar, Policy, Posix, Windows};

    const INPUTS: &[&str] = &[
        "",
        ".",
        "/",
        "test.txt",
        "./a/b/../c",
        "/home/user/",
        "mem:///home/user/../test.txt",
        "mem:notes/today",
        "http://localhost:8118",
        "http://localhost:8118/a/./b",
        "//127.0.0.1/share/x",
        "file://127.0.0.1/home/user/test.txt",
        "file:///C:/home/user/test.txt",
        "C:/home/../x",
        r"C:\home\user\test.txt",
        "/a%25b",
        "http://[fe80::1%25en0]/a",
        "//%C3%A9/share",
    ];

    const WORKING_DIRS: &[&str] = &["", "/", "mem:///home/user", "relative/dir", "C:/home"];

    fn check_properties<P: Policy>() {
        for input in INPUTS {
            let cleaned = P::clean(input).expect("clean should succeed");
            assert_eq!(
                P::clean(&cleaned).as_deref(),
                Ok(cleaned.as_str()),
                "clean is not idempotent on {input:?}"
            );

            for wd in WORKING_DIRS {
                let abs = P::abs(input, wd).expect("abs should succeed");
                assert_eq!(
                    P::is_abs(&abs),
                    Ok(true),
                    "abs({input:?}, {wd:?}) = {abs:?} is not absolute"
                );
            }

            let (dir, file) = P::split(input).expect("split should succeed");
            assert_eq!(
                P::join([dir.as_str(), file.as_str()]).as_deref(),
                Ok(cleaned.as_str()),
                "split of {input:?} does not join back"
            );
        }

        for (a, b, c) in [("a", "b", "c"), ("/a", "../b", "c/"), ("x/y", "", "z")] {
            let nested = P::join([P::join([a, b]).expect("join should succeed").as_str(), c]);
            assert_eq!(nested, P::join([a, b, c]), "join({a:?}, {b:?}, {c:?})");
        }

        for url in [
            crate::PathUrl::new("mem", "", "/home/user"),
            crate::PathUrl::new("http", "localhost:8118", "/a"),
            crate::PathUrl::new("", "127.0.0.1", "/share"),
            crate::PathUrl::from_path("/a b"),
            crate::PathUrl::from_path("/what?"),
            crate::PathUrl::from_path("rel/x"),
        ] {
            let parsed = P::parse(&P::serialize(&url)).expect("parse should succeed");
            assert_eq!(parsed.scheme(), url.scheme());
            assert_eq!(parsed.host(), url.host());
            assert_eq!(grammar::clean(parsed.path()), grammar::clean(url.path()));
        }
    }

    #[test]
    fn test_posix_properties() {
        check_properties::<Posix>();
    }

    #[test]
    fn test_windows_properties() {
        check_properties::<Windows>();
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(
            crate::abs("test.txt", "mem:///home/user").as_deref(),
            Ok("mem:///home/user/test.txt")
        );
        assert_eq!(
            crate::abs("../test.txt", "mem:///home/user").as_deref(),
            Ok("mem:///home/test.txt")
        );
        assert_eq!(crate::base("http://localhost:8118").as_deref(), Ok("."));
        assert_eq!(
            crate::clean("mem:///home/user/../test.txt").as_deref(),
            Ok("mem:///home/test.txt")
        );
        assert_eq!(
            crate::matches("*:///home/user/test.txt", "mem:///home/user/test.txt"),
            Ok(true)
        );
        assert_eq!(
            Windows::dir("C:/home/user/test.txt").as_deref(),
            Ok("C:/home/user")
        );
        assert_eq!(crate::ext("/home/user/test.txt").as_deref(), Ok(".txt"));
        assert_eq!(
            crate::split("mem:///home/user/test.txt"),
            Ok(("mem:///home/user".to_string(), "test.txt".to_string()))
        );
        assert_eq!(
            crate::join(["mem:///home/user", "a", "../b"]).as_deref(),
            Ok("mem:///home/user/b")
        );
        assert_eq!(
            crate::path("file://127.0.0.1/home/user/test.txt").as_deref(),
            Ok("//127.0.0.1/home/user/test.txt")
        );
        assert_eq!(crate::is_abs("mem:///x"), Ok(true));
    }
}
