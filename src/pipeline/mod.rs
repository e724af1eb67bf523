pub mod extraction;
pub mod summarizing;
pub mod tokenizer;
