use crate::domain::EmailAddress;

#[derive(Debug)]
pub struct NewWaitlistEntry {
    pub email: EmailAddress,
}
