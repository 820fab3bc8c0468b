/// Pure string processing utilities

/// Replace literal \n with actual newlines
pub fn process_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Treat blank values as absent
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
