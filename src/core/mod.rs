pub mod ad_copy_prompt;
pub mod brief_prompt;
pub mod engine;
pub mod input;
pub mod parser;
pub mod requester;
