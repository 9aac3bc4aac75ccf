pub mod ledger_service;
pub mod render_service;
pub mod summary_service;
