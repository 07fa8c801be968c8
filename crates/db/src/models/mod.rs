pub mod account;
pub mod login_history;
pub mod password_reset;
pub mod product;
pub mod session;
