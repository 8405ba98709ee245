//! Report output: the prompt and the generated summary, side by side.

mod writer;

pub use writer::SummaryWriter;
