pub mod loaders;
pub mod paper;

pub use loaders::load_id_list;
pub use paper::{ExtractedText, LocalArtifact, PaperRef, ProcessingResult, SummaryRecord};
