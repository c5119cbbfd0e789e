pub mod health_handler;
pub mod user_handler;

pub use health_handler::health_check;
pub use user_handler::{create_user, delete_user, get_user, list_users, update_user};
