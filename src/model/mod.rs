pub mod email;
pub mod grading;
pub mod grading_record;
pub mod rubric;
pub mod scenario;
