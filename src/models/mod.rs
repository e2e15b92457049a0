pub mod analysis;
pub mod diary;
pub mod diary_input;

pub use analysis::{AnalysisDefaults, AnalysisReport};
pub use diary::DiaryRecord;
pub use diary_input::{DiaryFormResponse, DiaryMutationResponse};
