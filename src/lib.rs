pub mod asset;
pub mod config;
pub mod output;
pub mod scanner;
pub mod ui;

pub use asset::{Asset, AssetError, Endpoint, HttpEndpoint, ProbeOutcome, ProbeStatus, Prober};
pub use config::Config;
pub use scanner::{CancelFlag, ProgressEvent, ProgressObserver, ScanError, ScanReport, Scanner};
