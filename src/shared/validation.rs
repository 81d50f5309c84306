use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating display names supplied at login.
    /// Must start and end with an alphanumeric character; interior characters
    /// may also be spaces, underscores, dots, and hyphens.
    /// - Valid: "alice", "Bob Smith", "user_42", "j.doe"
    /// - Invalid: " alice", "bob-", "", "a//b"
    pub static ref DISPLAY_NAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9 ._-]*[a-zA-Z0-9])?$").unwrap();
}
