pub mod spec_model;
