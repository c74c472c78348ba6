//! VLESS links: standard URIs with the transport encoded in query params.

use super::{format_query, query_flag, LinkError};
use crate::models::VlessValues;
use crate::utils::url::{parse_url, url_encode};

/// The query parameter that carries the path-like value depends on the
/// transport: grpc smuggles it as the service name, kcp as the seed.
fn path_param(net: &str) -> &'static str {
    match net {
        "grpc" => "serviceName",
        "kcp" => "seed",
        _ => "path",
    }
}

/// Generate a VLESS share link from form values.
pub fn generate_vless(values: &VlessValues) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("type", values.net.clone()),
        ("security", values.security.clone()),
    ];

    if !values.path.is_empty() {
        params.push((path_param(&values.net), values.path.clone()));
    }
    if !values.host.is_empty() {
        params.push(("host", values.host.clone()));
    }
    if !values.header_type.is_empty() && values.header_type != "none" {
        params.push(("headerType", values.header_type.clone()));
    }
    if !values.sni.is_empty() {
        params.push(("sni", values.sni.clone()));
    }
    if !values.flow.is_empty() && values.flow != "none" {
        params.push(("flow", values.flow.clone()));
    }
    params.push(("allowInsecure", values.allow_insecure.to_string()));
    if !values.alpn.is_empty() {
        params.push(("alpn", values.alpn.clone()));
    }

    let mut link = format!(
        "vless://{}@{}:{}?{}",
        url_encode(&values.id),
        values.server,
        values.port,
        format_query(&params)
    );
    if !values.name.is_empty() {
        link.push('#');
        link.push_str(&url_encode(&values.name));
    }
    link
}

/// Resolve a VLESS share link back into form values.
pub fn resolve_vless(link: &str) -> Result<VlessValues, LinkError> {
    let url = parse_url(link);
    if url.protocol != "vless" {
        return Err(LinkError::invalid("vless", "missing vless:// prefix"));
    }
    if url.host.is_empty() {
        return Err(LinkError::invalid("vless", "missing host"));
    }
    if url.username.is_empty() {
        return Err(LinkError::invalid("vless", "missing user id"));
    }

    let param = |key: &str| url.params.get(key).cloned().unwrap_or_default();
    let net = {
        let net = param("type");
        if net.is_empty() {
            "tcp".to_string()
        } else {
            net
        }
    };

    let header_type = {
        let header_type = param("headerType");
        if header_type.is_empty() {
            "none".to_string()
        } else {
            header_type
        }
    };
    let security = {
        let security = param("security");
        if security.is_empty() {
            "none".to_string()
        } else {
            security
        }
    };
    let flow = {
        let flow = param("flow");
        if flow.is_empty() {
            "none".to_string()
        } else {
            flow
        }
    };

    Ok(VlessValues {
        name: url.hash.clone(),
        server: url.host.clone(),
        port: url.port,
        id: url.username.clone(),
        flow,
        security,
        sni: param("sni"),
        host: param("host"),
        // symmetric with generate: the transport picks the param name
        path: param(path_param(&net)),
        header_type,
        alpn: param("alpn"),
        allow_insecure: query_flag(url.params.get("allowInsecure")),
        net,
    })
}
