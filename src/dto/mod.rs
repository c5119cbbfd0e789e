pub mod user_dto;

pub use user_dto::{MessageResponse, UserRequest, UserResponse};
