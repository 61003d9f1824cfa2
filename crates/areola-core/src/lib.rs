pub mod controller;
pub mod report;
pub mod service;
pub mod store;
pub mod sweep;

pub use controller::{
    AuditController, Navigator, NoopNavigator, Route, EXIT_TRANSITION_DELAY,
};
pub use report::{render_summary, render_table, OutputFormat, WAITING_PLACEHOLDER};
pub use service::{http::HttpSweepService, ServiceSettings, SweepError, SweepService};
pub use store::{
    file_store::FileStore, load_audit_data, save_audit_data, KeyValueStore, MemoryStore,
    AUDIT_DATA_KEY,
};
pub use sweep::{
    aggregate, export::encode_csv, export::export_filename, filter::filter, AnomalyRecord,
    RecordValidationError, SweepResponse, SweepResult, SweepStats,
};
