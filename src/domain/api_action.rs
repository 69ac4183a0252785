/// Actions accepted by the public mailing list API. Anything outside this
/// enum is rejected at the boundary before the store is touched.
#[derive(Debug, PartialEq)]
pub enum ApiAction {
    Save,
    Unsubscribe,
}

impl TryFrom<&str> for ApiAction {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "save" => Ok(ApiAction::Save),
            "unsubscribe" => Ok(ApiAction::Unsubscribe),
            other => Err(format!("`{other}` is not a valid variant of ApiAction")),
        }
    }
}
