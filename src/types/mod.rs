pub mod job;
pub mod request;
pub mod response;

pub use job::{seed_jobs, Job};
pub use request::{AnalysisRequest, PdfFile, PDF_MIME};
pub use response::{AnalysisResult, StructuredAnalysis};
