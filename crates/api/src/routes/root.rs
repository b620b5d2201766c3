use rocket::serde::json::Json;
use serde::Serialize;

/// # Node Information
#[derive(Serialize, Debug, schemars::JsonSchema)]
pub struct NodeInfo {
    /// Server version
    pub version: String,
    /// URL pointing to the client serving this node
    pub app: String,
}

/// # Query Node
///
/// Fetch information about which features are enabled on the remote node.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn root() -> Json<NodeInfo> {
    let config = beacon_config::config().await;

    Json(NodeInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        app: config.hosts.app,
    })
}
