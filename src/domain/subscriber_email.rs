use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display};

// Local part allows letters, digits and `._%-`; domain allows letters,
// digits and `.-`; top-level segment is 2-4 letters. Plus-addressing is
// deliberately not accepted.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,4}$";

/// A mailing list address, lowercase-normalized at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<SubscriberEmail, String> {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

        if RE.is_match(&s) {
            Ok(Self(s.to_lowercase()))
        } else {
            Err(format!("`{s}` email has invalid format"))
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
