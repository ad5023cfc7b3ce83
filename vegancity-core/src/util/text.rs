/// Trims the text and maps blank input to `None`.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
