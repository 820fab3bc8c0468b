/// Pure functions for birthday email formatting
use crate::constants::DEFAULT_MAIL_SIGNATURE;
use crate::utils::string_utils::process_newlines;

/// Default subject line
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "Happy Birthday, {user}!";

/// Default email body
pub const DEFAULT_BODY_TEMPLATE: &str = "Dear {user},\n\n\
Congratulations on your {ordinal} birthday!\n\n\
We wish you a wonderful day filled with joy and happiness.\n\n\
Best regards,\n{signature}";

/// Subject and body templates for birthday emails.
///
/// Placeholders: `{user}`, `{years}`, `{ordinal}`, `{date}`, `{signature}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayTemplates {
    pub subject: String,
    pub body: String,
    pub signature: String,
}

impl Default for BirthdayTemplates {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT_TEMPLATE.to_string(),
            body: DEFAULT_BODY_TEMPLATE.to_string(),
            signature: DEFAULT_MAIL_SIGNATURE.to_string(),
        }
    }
}

/// A rendered email, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEmail {
    pub subject: String,
    pub body: String,
}

/// English ordinal suffix for a number (1st, 2nd, 3rd, 11th, ...)
pub fn ordinal_suffix(n: i32) -> &'static str {
    let n = n.unsigned_abs();
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Number followed by its ordinal suffix
pub fn format_ordinal(n: i32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Replace placeholders in a message template
pub fn apply_message_template(
    template: &str,
    user_name: &str,
    years: i32,
    date: &str,
    signature: &str,
) -> String {
    // {user} goes last so names containing braces are left untouched
    let result = template
        .replace("{ordinal}", &format_ordinal(years))
        .replace("{years}", &years.to_string())
        .replace("{date}", date)
        .replace("{signature}", signature)
        .replace("{user}", user_name);
    process_newlines(&result)
}

/// Render the subject and body for one user
pub fn build_birthday_email(
    templates: &BirthdayTemplates,
    user_name: &str,
    years: i32,
    date: &str,
) -> BirthdayEmail {
    BirthdayEmail {
        subject: apply_message_template(&templates.subject, user_name, years, date, &templates.signature),
        body: apply_message_template(&templates.body, user_name, years, date, &templates.signature),
    }
}
