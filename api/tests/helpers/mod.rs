pub mod app;
pub mod multipart;

pub use app::{json_body, make_test_app, make_test_app_with_limits};
pub use multipart::MultipartBody;
