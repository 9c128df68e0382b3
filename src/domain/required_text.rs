/// Free text that was supplied and is not empty.
///
/// The content is otherwise opaque: no trimming, no length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(value: Option<String>) -> Result<RequiredText, String> {
        match value {
            Some(s) if !s.is_empty() => Ok(Self(s)),
            Some(_) => Err("value is empty".to_string()),
            None => Err("value is missing".to_string()),
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
