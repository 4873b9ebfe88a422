mod delete_account;
mod forgot_password;
mod login;
mod reset_password;
mod signup;
mod verify_email;

pub use delete_account::delete_account_handler;
pub use forgot_password::forgot_password_handler;
pub use login::login_handler;
pub use reset_password::reset_password_handler;
pub use signup::signup_handler;
pub use verify_email::verify_email_handler;

pub use delete_account::__path_delete_account_handler;
pub use forgot_password::__path_forgot_password_handler;
pub use login::__path_login_handler;
pub use reset_password::__path_reset_password_handler;
pub use signup::__path_signup_handler;
pub use verify_email::__path_verify_email_handler;

pub use forgot_password::ForgotPasswordRequest;
pub use login::LoginRequest;
pub use reset_password::ResetPasswordRequest;
pub use signup::{SignupRequest, SignupResponse, SignupUser};
