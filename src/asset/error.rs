use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("[{id}] fetch failed: asset not found")]
    NotFound { id: u32 },
    #[error("[{id}] fetch failed: received HTTP {status}")]
    HttpStatus { id: u32, status: u16 },
    #[error("[{id}] fetch failed: {source}")]
    Transport {
        id: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("[{id}] fetch failed: error while reading response body: {source}")]
    Body {
        id: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("[{id}] invalid metadata: {source}")]
    Metadata {
        id: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing 'dataUri' field on asset metadata")]
    MissingDataUri,
    #[error("failed to decode image: empty payload")]
    EmptyPayload,
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] base64::DecodeError),
}
