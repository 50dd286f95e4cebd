use std::borrow::Cow;
use std::fmt;

/// Query parameter carrying the guest's name, as in `/?to=Budi+Santoso`
pub const GUEST_PARAM: &str = "to";

/// Display name of the invited guest
///
/// The name is free text taken from the page URL. It is never validated or
/// trimmed; templates escape it when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestName(String);

impl GuestName {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Reads the guest name from a raw URL query string
    ///
    /// # Arguments
    /// * `query` - Query string without the leading `?`, if the URL had one
    /// * `default` - Name used when the parameter is missing or empty
    ///
    /// # Examples
    /// ```
    /// use undangan::guest::GuestName;
    ///
    /// let guest = GuestName::from_query(Some("to=Budi+%26+Sari"), "Tamu Undangan");
    /// assert_eq!(guest.as_str(), "Budi & Sari");
    ///
    /// let guest = GuestName::from_query(None, "Tamu Undangan");
    /// assert_eq!(guest.as_str(), "Tamu Undangan");
    /// ```
    pub fn from_query(query: Option<&str>, default: &str) -> Self {
        let raw = query.and_then(|q| {
            q.trim_start_matches('?')
                .split('&')
                .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
                .find(|(key, _)| decode_component(key) == GUEST_PARAM)
                .map(|(_, value)| value)
        });

        match raw.map(decode_component) {
            Some(name) if !name.is_empty() => Self(name.into_owned()),
            _ => Self::new(default),
        }
    }

    /// Takes an already decoded parameter value, falling back to `default`
    pub fn from_param(value: Option<&str>, default: &str) -> Self {
        match value {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Self::new(default),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Query string that carries this name to another page
    pub fn to_query(&self) -> String {
        format!("{}={}", GUEST_PARAM, urlencoding::encode(&self.0))
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decodes a form-encoded query component
///
/// `+` becomes a space before percent-decoding. Broken escapes or invalid
/// UTF-8 are decoded lossily rather than rejected.
pub fn decode_component(raw: &str) -> Cow<'_, str> {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => {
            let bytes = urlencoding::decode_binary(spaced.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
