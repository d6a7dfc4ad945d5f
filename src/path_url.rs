/// A parsed URL-like path: a scheme, a host and a slash-separated path.
///
/// An empty scheme means a plain path. The path always uses forward
/// slashes and is stored exactly as parsed; cleaning is left to each
/// operation. Values are immutable; every transformation returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathUrl {
    scheme: String,
    host: String,
    path: String,
}

impl PathUrl {
    pub fn new<S, H, P>(scheme: S, host: H, path: P) -> PathUrl
    where
        S: Into<String>,
        H: Into<String>,
        P: Into<String>,
    {
        PathUrl {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    pub fn from_path<P: Into<String>>(path: P) -> PathUrl {
        PathUrl {
            path: path.into(),
            ..PathUrl::default()
        }
    }

    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a scheme or a host locates this value as a resource rather
    /// than a bare path.
    #[inline]
    pub fn is_qualified(&self) -> bool {
        !self.scheme.is_empty() || !self.host.is_empty()
    }

    pub fn with_path<P: Into<String>>(self, path: P) -> PathUrl {
        PathUrl {
            path: path.into(),
            ..self
        }
    }

    /// Takes the scheme and host of `origin`, keeping this path.
    pub fn with_origin_of(self, origin: &PathUrl) -> PathUrl {
        PathUrl {
            scheme: origin.scheme.clone(),
            host: origin.host.clone(),
            path: self.path,
        }
    }
}
