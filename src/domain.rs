mod contact_submission;
mod email_address;
mod form_value;
mod required_text;
mod waitlist_entry;

pub use contact_submission::NewContactSubmission;
pub use email_address::EmailAddress;
pub use form_value::FormValue;
pub use required_text::RequiredText;
pub use waitlist_entry::NewWaitlistEntry;
