pub mod policy_model;
pub mod run_summary;
