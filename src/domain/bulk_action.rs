/// Bulk verbs accepted by the admin list management screen.
#[derive(Debug, PartialEq)]
pub enum BulkAction {
    Active,
    Trash,
    Delete,
}

impl AsRef<str> for BulkAction {
    fn as_ref(&self) -> &'static str {
        match self {
            BulkAction::Active => "active",
            BulkAction::Trash => "trash",
            BulkAction::Delete => "delete",
        }
    }
}

impl TryFrom<&str> for BulkAction {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "active" => Ok(BulkAction::Active),
            "trash" => Ok(BulkAction::Trash),
            "delete" => Ok(BulkAction::Delete),
            other => Err(format!("`{other}` is not a valid variant of BulkAction")),
        }
    }
}
