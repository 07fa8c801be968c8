pub mod account_repo;
pub mod login_history_repo;
pub mod password_reset_repo;
pub mod product_repo;
pub mod session_repo;

pub use account_repo::AccountRepo;
pub use login_history_repo::LoginHistoryRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use product_repo::ProductRepo;
pub use session_repo::SessionRepo;
