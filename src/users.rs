mod database_ext;
mod user;
mod user_id;
mod user_signup_error;

pub use self::{user::User, user_id::UserId, user_signup_error::UserSignupError};
