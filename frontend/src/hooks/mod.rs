pub mod use_rows;
pub mod use_submission;

pub use use_rows::use_rows;
pub use use_submission::use_submission;
