pub mod content;
pub mod endpoint;
pub mod error;
pub mod probe;

pub use content::{decode_data_uri, Asset};
pub use endpoint::{Endpoint, HttpEndpoint};
pub use error::AssetError;
pub use probe::{FailureCause, ProbeOutcome, ProbeStatus, Prober};
