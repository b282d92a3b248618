mod email;

pub use email::{normalize_email, validate_email, ValidationError};
