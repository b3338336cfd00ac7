use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::asset::endpoint::Endpoint;
use crate::asset::error::AssetError;

/// One Google Earth View asset, addressed by its numeric identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub id: u32,
}

impl Asset {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Downloads and parses the asset metadata document.
    pub fn metadata<E: Endpoint>(&self, endpoint: &E) -> Result<Value, AssetError> {
        let raw = endpoint.body(self.id)?;
        serde_json::from_slice(&raw).map_err(|source| AssetError::Metadata {
            id: self.id,
            source,
        })
    }

    /// Downloads the asset image: metadata first, then the base64 payload
    /// of its `dataUri` field.
    pub fn content<E: Endpoint>(&self, endpoint: &E) -> Result<Vec<u8>, AssetError> {
        let metadata = self.metadata(endpoint)?;
        decode_data_uri(&metadata)
    }
}

/// Extracts the image bytes from a metadata document. The `dataUri` field
/// holds `<meta>,<base64>`; everything after the last comma is the payload.
pub fn decode_data_uri(metadata: &Value) -> Result<Vec<u8>, AssetError> {
    let data_uri = metadata
        .get("dataUri")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if data_uri.is_empty() {
        return Err(AssetError::MissingDataUri);
    }

    let encoded = data_uri.rsplit(',').next().unwrap_or_default();
    if encoded.is_empty() {
        return Err(AssetError::EmptyPayload);
    }

    Ok(STANDARD.decode(encoded)?)
}
