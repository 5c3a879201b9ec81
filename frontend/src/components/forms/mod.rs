pub mod login_form;
pub mod register_form;
pub mod text_field;

pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use text_field::TextField;
