pub mod delete_account;
pub mod login;
pub mod opaque_token;
pub mod request_password_reset;
pub mod reset_password;
pub mod signup;
pub mod verify_email;
