//! VMess links: `vmess://BASE64(JSON body)`.

use super::LinkError;
use crate::models::V2rayValues;
use crate::utils::base64::{base64_decode, base64_encode};

/// Field cleanup applied before the body is serialized.
///
/// tcp and kcp transports carry no header obfuscation except the tcp+http
/// combination, path only means something for ws/h2/grpc/kcp, and flow never
/// applies to vmess (it only survives on vless with xtls).
fn normalized(values: &V2rayValues) -> V2rayValues {
    let mut body = values.clone();

    if matches!(body.net.as_str(), "tcp" | "kcp")
        && !(body.net == "tcp" && body.fake_type == "http")
    {
        body.fake_type = String::new();
    }
    if !matches!(body.net.as_str(), "ws" | "h2" | "grpc" | "kcp") {
        body.path = String::new();
    }
    body.flow = String::new();

    body
}

/// Generate a VMess share link from form values.
pub fn generate_vmess(values: &V2rayValues) -> String {
    let body = normalized(values);
    let json = serde_json::to_string(&body).unwrap_or_default();
    format!("vmess://{}", base64_encode(&json))
}

/// Resolve a VMess share link back into form values.
pub fn resolve_vmess(link: &str) -> Result<V2rayValues, LinkError> {
    let encoded = link
        .strip_prefix("vmess://")
        .ok_or_else(|| LinkError::invalid("vmess", "missing vmess:// prefix"))?;

    let decoded = base64_decode(encoded.trim_end_matches('/'))
        .ok_or_else(|| LinkError::invalid("vmess", "body is not valid base64"))?;

    let mut values: V2rayValues = serde_json::from_str(&decoded)
        .map_err(|e| LinkError::invalid("vmess", format!("body is not valid JSON: {}", e)))?;

    // Links produced by other clients routinely omit these.
    if values.tls.is_empty() {
        values.tls = "none".to_string();
    }
    if values.fake_type.is_empty() {
        values.fake_type = "none".to_string();
    }
    if values.scy.is_empty() {
        values.scy = "auto".to_string();
    }

    Ok(values)
}
