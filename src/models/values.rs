//! Per-protocol form value records.
//!
//! One record shape per protocol, holding every field needed to render an
//! edit form and regenerate a share link. Serde names follow the wire/form
//! conventions of each protocol (the VMess record doubles as the JSON body
//! of `vmess://` links).

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeNumber {
    Num(u64),
    Str(String),
}

/// VMess bodies in the wild carry ports and alter ids as either JSON
/// numbers or strings; accept both, falling back to 0.
fn de_flexible_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match MaybeNumber::deserialize(deserializer)? {
        MaybeNumber::Num(n) => u16::try_from(n).unwrap_or(0),
        MaybeNumber::Str(s) => s.trim().parse().unwrap_or(0),
    })
}

fn de_flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match MaybeNumber::deserialize(deserializer)? {
        MaybeNumber::Num(n) => n.to_string(),
        MaybeNumber::Str(s) => s,
    })
}

/// VMess form values; also the exact JSON body of a `vmess://` link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct V2rayValues {
    /// Display name ("ps" in the vmess body).
    pub ps: String,
    /// Server address ("add").
    pub add: String,
    #[serde(deserialize_with = "de_flexible_u16")]
    pub port: u16,
    /// User UUID.
    pub id: String,
    /// Alter id.
    #[serde(deserialize_with = "de_flexible_u16")]
    pub aid: u16,
    /// Transport: tcp, kcp, ws, h2, grpc.
    pub net: String,
    /// Header obfuscation type.
    #[serde(rename = "type")]
    pub fake_type: String,
    pub host: String,
    /// Path for ws/h2/grpc, seed for kcp.
    pub path: String,
    pub tls: String,
    pub sni: String,
    pub alpn: String,
    /// Encryption method ("scy").
    pub scy: String,
    /// Body format version.
    #[serde(deserialize_with = "de_flexible_string")]
    pub v: String,
    pub flow: String,
    pub allow_insecure: bool,
}

impl Default for V2rayValues {
    fn default() -> Self {
        V2rayValues {
            ps: String::new(),
            add: String::new(),
            port: 0,
            id: String::new(),
            aid: 0,
            net: "tcp".to_string(),
            fake_type: "none".to_string(),
            host: String::new(),
            path: String::new(),
            tls: "none".to_string(),
            sni: String::new(),
            alpn: String::new(),
            scy: "auto".to_string(),
            v: "2".to_string(),
            flow: String::new(),
            allow_insecure: false,
        }
    }
}

/// VLESS form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VlessValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    /// User UUID.
    pub id: String,
    pub flow: String,
    pub security: String,
    pub sni: String,
    /// Transport: tcp, kcp, ws, h2, grpc.
    pub net: String,
    pub host: String,
    /// Path for ws/h2, serviceName for grpc, seed for kcp.
    pub path: String,
    pub header_type: String,
    pub alpn: String,
    pub allow_insecure: bool,
}

impl Default for VlessValues {
    fn default() -> Self {
        VlessValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            id: String::new(),
            flow: "none".to_string(),
            security: "none".to_string(),
            sni: String::new(),
            net: "tcp".to_string(),
            host: String::new(),
            path: String::new(),
            header_type: "none".to_string(),
            alpn: String::new(),
            allow_insecure: false,
        }
    }
}

/// Shadowsocks form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SsValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub password: String,
    pub method: String,
    /// Empty, "v2ray-plugin" or "simple-obfs".
    pub plugin: String,
    /// v2ray-plugin transport mode.
    pub mode: String,
    /// "tls" when v2ray-plugin runs over TLS, empty otherwise.
    pub tls: String,
    /// simple-obfs flavor: "http" or "tls".
    pub obfs: String,
    pub host: String,
    pub path: String,
    /// Plugin implementation selector.
    #[serde(rename = "impl")]
    pub plugin_impl: String,
}

impl Default for SsValues {
    fn default() -> Self {
        SsValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            password: String::new(),
            method: "aes-128-gcm".to_string(),
            plugin: String::new(),
            mode: "websocket".to_string(),
            tls: String::new(),
            obfs: "http".to_string(),
            host: String::new(),
            path: String::new(),
            plugin_impl: String::new(),
        }
    }
}

/// ShadowsocksR form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SsrValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub password: String,
    pub method: String,
    pub protocol: String,
    pub protocol_param: String,
    pub obfs: String,
    pub obfs_param: String,
}

impl Default for SsrValues {
    fn default() -> Self {
        SsrValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            password: String::new(),
            method: "aes-128-cfb".to_string(),
            protocol: "origin".to_string(),
            protocol_param: String::new(),
            obfs: "plain".to_string(),
            obfs_param: String::new(),
        }
    }
}

/// Trojan / trojan-go form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrojanValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub password: String,
    /// SNI of the TLS layer.
    pub peer: String,
    pub allow_insecure: bool,
    /// "origin", or "shadowsocks" for the ss-over-trojan variant.
    pub method: String,
    /// Cipher of the shadowsocks layer; the trojan password doubles as its key.
    pub ss_cipher: String,
    /// "none" or "websocket".
    pub obfs: String,
    pub host: String,
    pub path: String,
}

impl Default for TrojanValues {
    fn default() -> Self {
        TrojanValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            password: String::new(),
            peer: String::new(),
            allow_insecure: false,
            method: "origin".to_string(),
            ss_cipher: "aes-128-gcm".to_string(),
            obfs: "none".to_string(),
            host: String::new(),
            path: String::new(),
        }
    }
}

/// HTTP / HTTPS proxy form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpValues {
    /// "http" or "https".
    pub protocol: String,
    pub name: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for HttpValues {
    fn default() -> Self {
        HttpValues {
            protocol: "http".to_string(),
            name: String::new(),
            server: String::new(),
            port: 0,
            username: String::new(),
            password: String::new(),
        }
    }
}

/// SOCKS5 proxy form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Socks5Values {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// TUIC form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TuicValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub uuid: String,
    pub password: String,
    pub congestion_control: String,
    pub alpn: String,
    pub sni: String,
    pub allow_insecure: bool,
    pub disable_sni: bool,
    pub udp_relay_mode: String,
}

impl Default for TuicValues {
    fn default() -> Self {
        TuicValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            uuid: String::new(),
            password: String::new(),
            congestion_control: "bbr".to_string(),
            alpn: String::new(),
            sni: String::new(),
            allow_insecure: false,
            disable_sni: false,
            udp_relay_mode: "native".to_string(),
        }
    }
}

/// Juicity form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JuicityValues {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub uuid: String,
    pub password: String,
    pub congestion_control: String,
    pub sni: String,
    pub allow_insecure: bool,
    pub pinned_certchain_sha256: String,
}

impl Default for JuicityValues {
    fn default() -> Self {
        JuicityValues {
            name: String::new(),
            server: String::new(),
            port: 0,
            uuid: String::new(),
            password: String::new(),
            congestion_control: "bbr".to_string(),
            sni: String::new(),
            allow_insecure: false,
            pinned_certchain_sha256: String::new(),
        }
    }
}
