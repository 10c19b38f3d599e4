use shared::{domain::PostDraft, error::ValidationError};

/// Sign-in form checks: a syntactically plausible email and a password of at
/// least six characters. Errors name the field they belong to so the shell
/// can surface them inline.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::new("email", "Please enter a valid email"));
    }
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Post form checks: title and body must both be non-empty.
pub fn validate_draft(draft: &PostDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    if draft.body.trim().is_empty() {
        return Err(ValidationError::new("body", "Body is required"));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.contains('.')
}
