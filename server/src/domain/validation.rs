//! Declarative validation of raw user form input.
//!
//! Every rule is one row of a (field, message, outcome) table evaluated
//! uniformly: all applicable rules run, so a single field can collect
//! several errors, and the error order always follows the table. A run
//! with no failures yields a [`UserDraft`] ready for the store.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::user::UserDraft;

/// Raw field values as submitted, before any normalisation.
///
/// HTML forms post every input, so optional fields arrive as empty strings
/// rather than being absent; a blank-after-trim optional field is treated
/// as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub bio: String,
}

impl From<&crate::domain::user::User> for UserInput {
    /// Raw field values for pre-filling an update form from a stored record.
    fn from(user: &crate::domain::user::User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }
}

/// A validation failure tied to one named form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub const FIRST_NAME_LETTERS: &str = "First name must only contain letters.";
pub const FIRST_NAME_LENGTH: &str = "First name must be between 1 and 10 characters.";
pub const LAST_NAME_LETTERS: &str = "Last name must only contain letters.";
pub const LAST_NAME_LENGTH: &str = "Last name must be between 1 and 10 characters.";
pub const EMAIL_INVALID: &str = "Email must be a valid email address.";
pub const AGE_RANGE: &str = "Age must be a number between 18 and 120.";
pub const BIO_LENGTH: &str = "Bio must be a maximum of 200 characters.";

/// Inclusive age bounds for the optional age field.
pub const AGE_MIN: u32 = 18;
/// Inclusive upper age bound.
pub const AGE_MAX: u32 = 120;
/// Maximum character count for the optional bio field.
pub const BIO_MAX: usize = 200;

static LETTERS_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn letters_only(value: &str) -> bool {
    let re = LETTERS_RE.get_or_init(|| {
        Regex::new("^[A-Za-z]+$")
            .unwrap_or_else(|error| panic!("letters regex failed to compile: {error}"))
    });
    re.is_match(value)
}

fn email_syntax(value: &str) -> bool {
    // One "@" with a non-empty local part and a dotted, space-free domain.
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    });
    re.is_match(value)
}

fn name_length_ok(value: &str) -> bool {
    (1..=10).contains(&value.chars().count())
}

/// Parse the raw age field: blank means absent, otherwise an integer in
/// `[AGE_MIN, AGE_MAX]`.
fn parse_age(raw: &str) -> Result<Option<u32>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(age) if (AGE_MIN..=AGE_MAX).contains(&age) => Ok(Some(age)),
        _ => Err(()),
    }
}

fn parse_bio(raw: &str) -> Result<Option<String>, ()> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    if raw.chars().count() > BIO_MAX {
        return Err(());
    }
    Ok(Some(raw.to_owned()))
}

/// Validate raw input against the rule table.
///
/// Returns the accepted draft, or every failed rule in table order. Names
/// are stored trimmed; the email is kept verbatim.
///
/// # Examples
/// ```
/// use roster::domain::{validate, UserInput};
///
/// let input = UserInput {
///     first_name: "Ada".into(),
///     last_name: "Lovelace".into(),
///     email: "ada@example.com".into(),
///     ..UserInput::default()
/// };
/// let draft = validate(&input).expect("valid input");
/// assert_eq!(draft.first_name, "Ada");
/// assert_eq!(draft.age, None);
/// ```
pub fn validate(input: &UserInput) -> Result<UserDraft, Vec<FieldError>> {
    let first = input.first_name.trim();
    let last = input.last_name.trim();

    let rules = [
        ("firstName", FIRST_NAME_LETTERS, letters_only(first)),
        ("firstName", FIRST_NAME_LENGTH, name_length_ok(first)),
        ("lastName", LAST_NAME_LETTERS, letters_only(last)),
        ("lastName", LAST_NAME_LENGTH, name_length_ok(last)),
        ("email", EMAIL_INVALID, email_syntax(&input.email)),
        ("age", AGE_RANGE, parse_age(&input.age).is_ok()),
        ("bio", BIO_LENGTH, parse_bio(&input.bio).is_ok()),
    ];

    let errors: Vec<FieldError> = rules
        .into_iter()
        .filter(|&(_, _, passed)| !passed)
        .map(|(field, message, _)| FieldError { field, message })
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    // The table already vouched for both optional fields.
    let age = parse_age(&input.age).unwrap_or_default();
    let bio = parse_bio(&input.bio).unwrap_or_default();
    Ok(UserDraft {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: input.email.clone(),
        age,
        bio,
    })
}
