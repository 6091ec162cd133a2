pub mod attempt_row;
pub mod mastery;
pub mod material;
pub mod question;

pub use attempt_row::AttemptRow;
pub use mastery::{AttemptMode, AttemptRecord, AttemptSubmission, MasteryState, QuestionStats};
pub use material::StudyMaterial;
pub use question::Question;
