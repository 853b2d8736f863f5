pub mod doctor;
pub mod error;

pub use doctor::{DoctorId, DoctorRecord};
pub use error::AppError;
