//! Trojan links, including the trojan-go extension.
//!
//! A node that layers shadowsocks encryption or websocket obfuscation on top
//! of plain trojan switches the scheme to `trojan-go://` and moves those
//! options into query parameters.

use super::{format_query, query_flag, LinkError};
use crate::models::TrojanValues;
use crate::utils::url::{parse_url, url_encode};

/// Generate a Trojan share link from form values.
pub fn generate_trojan(values: &TrojanValues) -> String {
    let extended = values.method != "origin" || values.obfs != "none";
    let mut params: Vec<(&str, String)> = Vec::new();

    let scheme = if extended {
        if !values.peer.is_empty() {
            params.push(("sni", values.peer.clone()));
        }
        params.push((
            "type",
            if values.obfs == "none" {
                "original".to_string()
            } else {
                "ws".to_string()
            },
        ));
        if values.obfs == "websocket" {
            if !values.host.is_empty() {
                params.push(("host", values.host.clone()));
            }
            if !values.path.is_empty() {
                params.push(("path", values.path.clone()));
            }
        }
        if values.method == "shadowsocks" {
            // trojan-go spells the ss layer as encryption=ss;cipher;password
            params.push((
                "encryption",
                format!("ss;{};{}", values.ss_cipher, values.password),
            ));
        }
        // the -go variant does not carry allowInsecure
        "trojan-go"
    } else {
        if !values.peer.is_empty() {
            params.push(("sni", values.peer.clone()));
        }
        params.push(("allowInsecure", values.allow_insecure.to_string()));
        "trojan"
    };

    let mut link = format!(
        "{}://{}@{}:{}",
        scheme,
        url_encode(&values.password),
        values.server,
        values.port
    );
    if !params.is_empty() {
        link.push('?');
        link.push_str(&format_query(&params));
    }
    if !values.name.is_empty() {
        link.push('#');
        link.push_str(&url_encode(&values.name));
    }
    link
}

/// Resolve a Trojan or trojan-go share link back into form values.
pub fn resolve_trojan(link: &str) -> Result<TrojanValues, LinkError> {
    let url = parse_url(link);
    if url.protocol != "trojan" && url.protocol != "trojan-go" {
        return Err(LinkError::invalid("trojan", "missing trojan:// prefix"));
    }
    if url.host.is_empty() {
        return Err(LinkError::invalid("trojan", "missing host"));
    }
    if url.username.is_empty() {
        return Err(LinkError::invalid("trojan", "missing password"));
    }

    let mut values = TrojanValues {
        name: url.hash.clone(),
        server: url.host.clone(),
        port: url.port,
        password: url.username.clone(),
        peer: url.params.get("sni").cloned().unwrap_or_default(),
        allow_insecure: query_flag(url.params.get("allowInsecure")),
        ..TrojanValues::default()
    };

    // Extended trojan-go options are decoded unconditionally; plain links
    // simply carry none of them.
    if url.params.get("type").map(String::as_str) == Some("ws") {
        values.obfs = "websocket".to_string();
        values.host = url.params.get("host").cloned().unwrap_or_default();
        values.path = url.params.get("path").cloned().unwrap_or_default();
    }
    if let Some(encryption) = url.params.get("encryption") {
        if let Some(rest) = encryption.strip_prefix("ss;") {
            values.method = "shadowsocks".to_string();
            if let Some((cipher, _password)) = rest.split_once(';') {
                values.ss_cipher = cipher.to_string();
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_values() -> TrojanValues {
        TrojanValues {
            name: "plain".to_string(),
            server: "example.com".to_string(),
            port: 443,
            password: "hunter2".to_string(),
            peer: "sni.example.com".to_string(),
            allow_insecure: true,
            ..TrojanValues::default()
        }
    }

    #[test]
    fn test_plain_trojan_scheme() {
        let link = generate_trojan(&plain_values());
        assert!(link.starts_with("trojan://"), "{}", link);
        assert!(link.contains("allowInsecure=true"));
    }

    #[test]
    fn test_plain_trojan_roundtrip() {
        let values = plain_values();
        assert_eq!(resolve_trojan(&generate_trojan(&values)).unwrap(), values);
    }

    #[test]
    fn test_websocket_switches_to_trojan_go() {
        let values = TrojanValues {
            obfs: "websocket".to_string(),
            host: "cdn.example.com".to_string(),
            path: "/ws".to_string(),
            ..plain_values()
        };
        let link = generate_trojan(&values);
        assert!(link.starts_with("trojan-go://"), "{}", link);
        assert!(link.contains("type=ws"));
        // allowInsecure is dropped for the -go variant
        assert!(!link.contains("allowInsecure"));
    }

    #[test]
    fn test_trojan_go_websocket_roundtrip() {
        let values = TrojanValues {
            obfs: "websocket".to_string(),
            host: "cdn.example.com".to_string(),
            path: "/ws".to_string(),
            allow_insecure: false,
            ..plain_values()
        };
        assert_eq!(resolve_trojan(&generate_trojan(&values)).unwrap(), values);
    }

    #[test]
    fn test_shadowsocks_layer_roundtrip() {
        let values = TrojanValues {
            method: "shadowsocks".to_string(),
            ss_cipher: "aes-256-gcm".to_string(),
            allow_insecure: false,
            ..plain_values()
        };
        let link = generate_trojan(&values);
        assert!(link.starts_with("trojan-go://"));
        assert!(link.contains("encryption=ss%3Baes-256-gcm%3Bhunter2"));
        assert_eq!(resolve_trojan(&link).unwrap(), values);
    }

    #[test]
    fn test_resolve_extended_options_on_plain_scheme() {
        // extended options are decoded even under the plain scheme
        let link = "trojan://hunter2@example.com:443?type=ws&host=h.example.com&path=%2Fws";
        let values = resolve_trojan(link).unwrap();
        assert_eq!(values.obfs, "websocket");
        assert_eq!(values.host, "h.example.com");
        assert_eq!(values.path, "/ws");
    }

    #[test]
    fn test_resolve_rejects_missing_password() {
        assert!(resolve_trojan("trojan://example.com:443").is_err());
    }
}
