//! ShadowsocksR links: the whole payload after `ssr://` is base64.
//!
//! Decoded form: `server:port:protocol:method:obfs:BASE64(password)/?remarks=
//! BASE64&protoparam=BASE64&obfsparam=BASE64`.

use super::LinkError;
use crate::models::SsrValues;
use crate::utils::base64::{base64_decode, base64_encode};

/// Generate a ShadowsocksR share link from form values.
pub fn generate_ssr(values: &SsrValues) -> String {
    let inner = format!(
        "{}:{}:{}:{}:{}:{}/?remarks={}&protoparam={}&obfsparam={}",
        values.server,
        values.port,
        values.protocol,
        values.method,
        values.obfs,
        base64_encode(&values.password),
        base64_encode(&values.name),
        base64_encode(&values.protocol_param),
        base64_encode(&values.obfs_param),
    );
    format!("ssr://{}", base64_encode(&inner))
}

/// Resolve a ShadowsocksR share link back into form values.
pub fn resolve_ssr(link: &str) -> Result<SsrValues, LinkError> {
    let encoded = link
        .strip_prefix("ssr://")
        .ok_or_else(|| LinkError::invalid("ssr", "missing ssr:// prefix"))?;

    let decoded = base64_decode(encoded)
        .ok_or_else(|| LinkError::invalid("ssr", "payload is not valid base64"))?;

    let (main, query) = decoded
        .split_once("/?")
        .map(|(main, query)| (main.to_string(), Some(query.to_string())))
        .unwrap_or_else(|| (decoded.trim_end_matches('/').to_string(), None));

    // The server itself may contain colons (IPv6), so everything beyond the
    // last five fields folds back into the host.
    let parts: Vec<&str> = main.split(':').collect();
    if parts.len() < 6 {
        return Err(LinkError::invalid("ssr", "payload has fewer than 6 fields"));
    }
    let tail = &parts[parts.len() - 5..];
    let server = parts[..parts.len() - 5].join(":");

    let port: u16 = tail[0]
        .parse()
        .map_err(|_| LinkError::invalid("ssr", format!("bad port {:?}", tail[0])))?;
    let password = base64_decode(tail[4])
        .ok_or_else(|| LinkError::invalid("ssr", "password is not valid base64"))?;

    let mut values = SsrValues {
        server,
        port,
        password,
        protocol: tail[1].to_string(),
        method: tail[2].to_string(),
        obfs: tail[3].to_string(),
        ..SsrValues::default()
    };

    if let Some(query) = query {
        for segment in query.split('&') {
            let Some((key, value)) = segment.split_once('=') else {
                continue;
            };
            let decoded = base64_decode(value).unwrap_or_default();
            match key {
                "remarks" => values.name = decoded,
                "protoparam" => values.protocol_param = decoded,
                "obfsparam" => values.obfs_param = decoded,
                _ => {}
            }
        }
    }

    Ok(values)
}
