pub mod chapters;
pub mod text_cleanup;
