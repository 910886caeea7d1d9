pub mod login_form;
pub mod navigation_bar;
pub mod register_form;
pub mod session_form;
