mod secrets_create;
mod secrets_delete;
mod secrets_export;
mod secrets_update;
mod security_signin;
mod security_signup;
mod status_get;

pub use self::{
    secrets_create::secrets_create, secrets_delete::secrets_delete,
    secrets_export::secrets_export, secrets_update::secrets_update,
    security_signin::security_signin, security_signup::security_signup, status_get::status_get,
};
