pub mod request;
pub mod response;

pub use request::ApiRequest;
pub use response::{parse_body, ApiResponse};
