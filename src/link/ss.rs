//! Shadowsocks links: `ss://BASE64(method:password)@host:port/?plugin=...#name`.

use super::LinkError;
use crate::models::SsValues;
use crate::utils::base64::{base64_decode, base64_encode};
use crate::utils::url::{parse_url, url_encode};

/// Generate a Shadowsocks share link from form values.
pub fn generate_ss(values: &SsValues) -> String {
    let userinfo = base64_encode(&format!("{}:{}", values.method, values.password));
    let mut link = format!("ss://{}@{}:{}/", userinfo, values.server, values.port);

    if !values.plugin.is_empty() {
        let mut opts = vec![values.plugin.clone()];
        if values.plugin == "v2ray-plugin" {
            if values.tls == "tls" {
                opts.push("tls".to_string());
            }
            if values.mode != "websocket" {
                opts.push(format!("mode={}", values.mode));
            }
            if !values.host.is_empty() {
                opts.push(format!("host={}", values.host));
            }
            if !values.path.is_empty() {
                let path = if values.path.starts_with('/') {
                    values.path.clone()
                } else {
                    format!("/{}", values.path)
                };
                opts.push(format!("path={}", path));
            }
        } else {
            opts.push(format!("obfs={}", values.obfs));
            if !values.host.is_empty() {
                opts.push(format!("obfs-host={}", values.host));
            }
            if values.obfs == "http" && !values.path.is_empty() {
                opts.push(format!("obfs-path={}", values.path));
            }
        }
        if !values.plugin_impl.is_empty() {
            opts.push(format!("impl={}", values.plugin_impl));
        }
        link.push_str(&format!("?plugin={}", url_encode(&opts.join(";"))));
    }

    if !values.name.is_empty() {
        link.push('#');
        link.push_str(&url_encode(&values.name));
    }
    link
}

/// Splits base64 `method:password` userinfo; the password keeps any further
/// colons it contains.
fn split_userinfo(decoded: &str) -> Option<(String, String)> {
    let (method, password) = decoded.split_once(':')?;
    Some((method.to_string(), password.to_string()))
}

/// Older tools wrote several spellings of the simple-obfs plugin name.
fn normalize_plugin(name: &str) -> String {
    match name {
        "obfs-local" | "simpleobfs" => "simple-obfs".to_string(),
        other => other.to_string(),
    }
}

/// Resolve a Shadowsocks share link back into form values.
pub fn resolve_ss(link: &str) -> Result<SsValues, LinkError> {
    let url = parse_url(link);
    if url.protocol != "ss" {
        return Err(LinkError::invalid("ss", "missing ss:// prefix"));
    }
    if url.host.is_empty() {
        return Err(LinkError::invalid("ss", "missing host"));
    }

    let mut values = SsValues {
        name: url.hash.clone(),
        server: url.host.clone(),
        port: url.port,
        ..SsValues::default()
    };

    if url.password.is_empty() {
        // SIP002 userinfo: base64 of method:password
        let decoded = base64_decode(&url.username)
            .ok_or_else(|| LinkError::invalid("ss", "userinfo is not valid base64"))?;
        let (method, password) = split_userinfo(&decoded)
            .ok_or_else(|| LinkError::invalid("ss", "userinfo carries no password"))?;
        values.method = method;
        values.password = password;
    } else {
        values.method = url.username.clone();
        values.password = url.password.clone();
    }

    if let Some(plugin) = url.params.get("plugin") {
        let mut tokens = plugin.split(';');
        values.plugin = normalize_plugin(tokens.next().unwrap_or_default());

        if values.plugin == "v2ray-plugin" {
            values.mode = "websocket".to_string();
            for token in tokens {
                match token.split_once('=') {
                    Some(("mode", mode)) => values.mode = mode.to_string(),
                    Some(("host", host)) => values.host = host.to_string(),
                    Some(("path", path)) => values.path = path.to_string(),
                    Some(("impl", imp)) => values.plugin_impl = imp.to_string(),
                    None if token == "tls" => values.tls = "tls".to_string(),
                    _ => {}
                }
            }
        } else {
            for token in tokens {
                match token.split_once('=') {
                    Some(("obfs", obfs)) => values.obfs = obfs.to_string(),
                    Some(("obfs-host", host)) => values.host = host.to_string(),
                    Some(("obfs-path", path)) => values.path = path.to_string(),
                    Some(("impl", imp)) => values.plugin_impl = imp.to_string(),
                    _ => {}
                }
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ss_v2ray_plugin() {
        // BASE64("aes-128-gcm:hunter2") with an url-encoded plugin list
        let link = "ss://YWVzLTEyOC1nY206aHVudGVyMg==@example.com:8388/\
                    ?plugin=v2ray-plugin%3Btls%3Bhost%3Dcdn.example.com#MyNode";
        let values = resolve_ss(link).unwrap();

        assert_eq!(values.method, "aes-128-gcm");
        assert_eq!(values.password, "hunter2");
        assert_eq!(values.server, "example.com");
        assert_eq!(values.port, 8388);
        assert_eq!(values.tls, "tls");
        assert_eq!(values.host, "cdn.example.com");
        assert_eq!(values.name, "MyNode");
        assert_eq!(values.mode, "websocket");
        assert_eq!(values.plugin, "v2ray-plugin");
    }

    #[test]
    fn test_resolve_ss_password_with_colons() {
        // BASE64("chacha20-ietf-poly1305:pa:ss:wd")
        let link = format!(
            "ss://{}@example.com:8388/",
            base64_encode("chacha20-ietf-poly1305:pa:ss:wd")
        );
        let values = resolve_ss(&link).unwrap();
        assert_eq!(values.method, "chacha20-ietf-poly1305");
        assert_eq!(values.password, "pa:ss:wd");
    }

    #[test]
    fn test_resolve_ss_plain_userinfo() {
        let values = resolve_ss("ss://aes-256-gcm:hunter2@example.com:8388/").unwrap();
        assert_eq!(values.method, "aes-256-gcm");
        assert_eq!(values.password, "hunter2");
    }

    #[test]
    fn test_resolve_ss_legacy_plugin_name() {
        let link = "ss://YWVzLTEyOC1nY206aHVudGVyMg==@example.com:8388/\
                    ?plugin=obfs-local%3Bobfs%3Dhttp%3Bobfs-host%3Dwww.example.com";
        let values = resolve_ss(link).unwrap();
        assert_eq!(values.plugin, "simple-obfs");
        assert_eq!(values.obfs, "http");
        assert_eq!(values.host, "www.example.com");
    }

    #[test]
    fn test_ss_roundtrip_v2ray_plugin() {
        let values = SsValues {
            name: "My Node".to_string(),
            server: "example.com".to_string(),
            port: 8388,
            password: "hunter2".to_string(),
            method: "aes-128-gcm".to_string(),
            plugin: "v2ray-plugin".to_string(),
            tls: "tls".to_string(),
            host: "cdn.example.com".to_string(),
            path: "/upgrade".to_string(),
            ..SsValues::default()
        };
        assert_eq!(resolve_ss(&generate_ss(&values)).unwrap(), values);
    }

    #[test]
    fn test_ss_roundtrip_simple_obfs() {
        let values = SsValues {
            server: "example.com".to_string(),
            port: 8388,
            password: "hunter2".to_string(),
            plugin: "simple-obfs".to_string(),
            obfs: "http".to_string(),
            host: "www.example.com".to_string(),
            path: "/favicon.ico".to_string(),
            plugin_impl: "chained".to_string(),
            ..SsValues::default()
        };
        assert_eq!(resolve_ss(&generate_ss(&values)).unwrap(), values);
    }

    #[test]
    fn test_ss_roundtrip_without_plugin() {
        let values = SsValues {
            name: "bare".to_string(),
            server: "example.com".to_string(),
            port: 8388,
            password: "hunter2".to_string(),
            ..SsValues::default()
        };
        assert_eq!(resolve_ss(&generate_ss(&values)).unwrap(), values);
    }

    #[test]
    fn test_resolve_ss_rejects_undecodable_userinfo() {
        assert!(matches!(
            resolve_ss("ss://@example.com:8388/"),
            Err(LinkError::Invalid { scheme: "ss", .. })
        ));
    }
}
