pub mod resume;

pub use resume::{FieldValue, ResumeRecord};
