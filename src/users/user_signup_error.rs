/// Failures specific to the signup flow that callers are expected to
/// branch on.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum UserSignupError {
    #[error("user with this email is already registered")]
    EmailAlreadyRegistered,
}
