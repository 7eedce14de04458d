pub mod settings;
pub mod validations;
