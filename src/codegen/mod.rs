//! Translation of test models into executable Selenium scripts.

pub mod emitter;
pub mod error;
pub mod locator;
pub mod python;
pub mod step;
pub mod translator;

pub use error::{Result, TranslateError};
pub use python::LookupApi;
pub use translator::{translate, Translator};
