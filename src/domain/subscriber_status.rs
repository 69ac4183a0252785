#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubscriberStatus {
    Active,
    Trash,
}

impl AsRef<str> for SubscriberStatus {
    fn as_ref(&self) -> &'static str {
        match self {
            SubscriberStatus::Active => "active",
            SubscriberStatus::Trash => "trash",
        }
    }
}

impl TryFrom<String> for SubscriberStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_ref() {
            "active" => Ok(SubscriberStatus::Active),
            "trash" => Ok(SubscriberStatus::Trash),
            other => Err(format!(
                "`{other}` is not a valid variant of SubscriberStatus",
            )),
        }
    }
}

/// Listing filter. `all` (or an absent/empty parameter) returns every row;
/// any other value is compared verbatim against the stored status.
#[derive(Debug)]
pub enum StatusFilter {
    All,
    Only(String),
}

impl From<Option<String>> for StatusFilter {
    fn from(s: Option<String>) -> Self {
        match s.as_deref() {
            None | Some("") | Some("all") => StatusFilter::All,
            Some(status) => StatusFilter::Only(status.to_string()),
        }
    }
}
