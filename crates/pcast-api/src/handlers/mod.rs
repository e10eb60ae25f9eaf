pub mod edit;
pub mod form;
pub mod health;
