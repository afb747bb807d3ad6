pub mod job_handlers;
pub mod pdf_handlers;
pub mod system_handlers;
pub mod upload;

pub use job_handlers::*;
pub use pdf_handlers::*;
pub use system_handlers::*;
