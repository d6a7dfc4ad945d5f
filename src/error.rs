use std::borrow::Cow;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("InvalidControlCharacterError {{ input = {input:?} }}")]
    InvalidControlCharacter { input: Cow<'static, str> },
    #[error("MissingSchemeError {{ input = {input} }}")]
    MissingScheme { input: Cow<'static, str> },
    #[error("ColonInFirstSegmentError {{ input = {input} }}")]
    ColonInFirstSegment { input: Cow<'static, str> },
    #[error("InvalidUserInfoError {{ input = {input} }}")]
    InvalidUserInfo { input: Cow<'static, str> },
    #[error("MissingIpv6BracketError {{ input = {input}, host = {host} }}")]
    MissingIpv6Bracket {
        input: Cow<'static, str>,
        host: Cow<'static, str>,
    },
    #[error("InvalidPortError {{ input = {input}, port = {port} }}")]
    InvalidPort {
        input: Cow<'static, str>,
        port: Cow<'static, str>,
    },
    #[error("InvalidHostCharacterError {{ input = {input}, host = {host} }}")]
    InvalidHostCharacter {
        input: Cow<'static, str>,
        host: Cow<'static, str>,
    },
    #[error("InvalidEscapeError {{ input = {input}, escape = {escape} }}")]
    InvalidEscape {
        input: Cow<'static, str>,
        escape: Cow<'static, str>,
    },
    #[error("InvalidUtf8Error {{ input = {input} }}")]
    InvalidUtf8 { input: Cow<'static, str> },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("BadPatternError {{ pattern = {pattern} }}")]
pub struct PatternError {
    pub pattern: Cow<'static, str>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    PatternError(#[from] PatternError),
}

pub(crate) fn owned(s: &str) -> Cow<'static, str> {
    Cow::Owned(s.to_string())
}
