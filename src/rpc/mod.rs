//! JSON-RPC module for studio communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown
//! - `theme`, `encode_wav`, `list_templates`, `apply_template`: local
//!   methods that work without an API key
//! - `extract_brand`, `brand_kit`, `social_posts`, `social_headers`,
//!   `generate_logo`, `branded_asset`, `mockup`, `brand_guidelines`,
//!   `jingle`, `brand_chat`: model-backed flows
//!
//! Flow params and results use the camelCase field names of the flow records.

pub mod methods;
pub mod server;
pub mod types;

pub use server::{run_server, ServerState};
pub use types::{
    rpc_code, EncodeWavParams, EncodeWavResult, JsonRpcError, JsonRpcErrorData,
    JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, ListTemplatesResult, RequestId,
    ThemeParams,
};
