pub mod audit;
pub mod db;
pub mod ingest;
pub mod remediation;
pub mod scoring;
pub mod settings;
