pub mod completion;
pub mod extractor;
pub mod pdf;
pub mod speech;
