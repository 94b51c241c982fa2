//! OBS relay error abstractions.

use thiserror::Error;

/// Failure modes of a single EP pipeline-result API call.
#[derive(Debug, Error)]
pub enum EpError {
    /// The EP API call exceeded its timeout.
    #[error("EP API call timed out (gateway timeout), check connectivity to the EP host")]
    Timeout,
    /// The EP API rejected the presented bearer token.
    #[error("EP API authentication failed (status {0}), the stored token appears invalid, supply a fresh token")]
    Auth(u16),
    /// Any other upstream failure: non-2xx status, transport error, or an undecodable body.
    #[error("EP API call failed: {0}")]
    Upstream(String),
}

/// Request-level failure modes which abort the whole upload flow.
///
/// Each of these is surfaced to the caller as one `status: "error"` entry per
/// requested product; they are never raised as HTTP-level errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No usable EP API token could be resolved for the request.
    #[error("no usable EP API token is available, supply a fresh token with the request")]
    NoToken,
    /// Dynamic products were requested without a pipeline URL.
    #[error("dynamic products were requested but no pipeline URL was provided")]
    MissingPipelineUrl,
    /// The pipeline URL does not carry a recognizable task id.
    #[error("the pipeline URL is malformed, unable to parse a task id")]
    MalformedPipelineUrl,
    /// The single shared EP fetch failed, aborting all dynamic products.
    #[error(transparent)]
    Ep(#[from] EpError),
}
