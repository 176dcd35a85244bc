pub mod cli;
pub mod codegen;
pub mod spec;
