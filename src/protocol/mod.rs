pub mod request;
pub mod response;

pub use request::{
    parse_payload, JsonRpcRequest, PayloadError, RpcId, RpcPayload, StartConversationParams,
    ToolCallParams,
};
pub use response::{JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};
