//! Drupal username validation.
//!
//! Mirrors the checks of Drupal 7's `user_validate_name()` so malformed
//! usernames are rejected locally, before a login round trip.

/// ASCII punctuation allowed in usernames besides letters, digits and space.
const ALLOWED_ASCII_PUNCTUATION: &[char] = &['@', '+', '_', '.', '\'', '-'];

/// Returns `true` if `name` is an acceptable Drupal username.
///
/// A username is rejected when it:
///
/// - is empty
/// - starts or ends with a space, or contains two consecutive spaces
/// - contains an ASCII character other than letters, digits, space and `@+_.'-`
/// - contains a control, zero-width, bidi, no-break, soft hyphen, byte order
///   mark, fullwidth or Unicode "specials" code point
///
/// Any other non-ASCII character is accepted so international names work.
///
/// # Example
///
/// ```rust
/// use drupal_services::auth::validate_username;
///
/// assert!(validate_username("jane.doe@example.com"));
/// assert!(validate_username("Zoë O'Brien"));
/// assert!(!validate_username(" jane"));
/// assert!(!validate_username("jane  doe"));
/// assert!(!validate_username("jane\u{200B}doe"));
/// ```
#[must_use]
pub fn validate_username(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.starts_with(' ') || name.ends_with(' ') || name.contains("  ") {
        return false;
    }
    name.chars().all(|c| is_permitted(c) && !is_disallowed(c))
}

fn is_permitted(c: char) -> bool {
    if !c.is_ascii() {
        return true;
    }
    c.is_ascii_alphanumeric() || c == ' ' || ALLOWED_ASCII_PUNCTUATION.contains(&c)
}

fn is_disallowed(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{1F}'
            | '\u{80}'..='\u{A0}'
            | '\u{AD}'
            | '\u{2000}'..='\u{200F}'
            | '\u{2028}'..='\u{202F}'
            | '\u{205F}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FF01}'..='\u{FF60}'
            | '\u{FFF9}'..='\u{FFFD}'
    )
}
