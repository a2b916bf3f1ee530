mod requests;
mod responses;

pub use requests::{LoginRequest, SignupRequest, TextRequest};
pub use responses::{AuthResponse, MessageResponse, UserResponse};
