pub mod analysis_executor;
