pub mod expense;
pub mod ledger;
pub mod settings;
pub mod summary;
pub mod view;
