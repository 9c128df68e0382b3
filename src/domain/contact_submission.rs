use crate::domain::{EmailAddress, RequiredText};

/// A validated inquiry from the contact form.
///
/// Submissions are not unique: the same address may write in any number of times.
#[derive(Debug)]
pub struct NewContactSubmission {
    pub name: RequiredText,
    pub email: EmailAddress,
    pub role: RequiredText,
    pub message: String,
}
