//! Per-protocol validation schemas and default form values.
//!
//! The registry is static and immutable for the process lifetime. The form
//! layer validates against it before a link is ever generated; resolvers rely
//! on the same defaults when a link encodes an optional field ambiguously.

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    HttpValues, JuicityValues, NodeType, NodeValues, Socks5Values, SsValues, SsrValues,
    TrojanValues, TuicValues, V2rayValues, VlessValues,
};

pub const SS_METHODS: &[&str] = &[
    "aes-128-gcm",
    "aes-256-gcm",
    "chacha20-poly1305",
    "chacha20-ietf-poly1305",
    "plain",
    "none",
];
pub const SS_PLUGINS: &[&str] = &["", "v2ray-plugin", "simple-obfs"];
pub const SS_MODES: &[&str] = &["websocket", "quic"];
pub const SS_OBFS: &[&str] = &["http", "tls"];
pub const SS_IMPLS: &[&str] = &["", "chained", "transport"];

pub const SSR_METHODS: &[&str] = &[
    "aes-128-cfb",
    "aes-192-cfb",
    "aes-256-cfb",
    "aes-128-ctr",
    "aes-192-ctr",
    "aes-256-ctr",
    "rc4-md5",
    "chacha20-ietf",
    "xchacha20",
    "none",
];
pub const SSR_PROTOCOLS: &[&str] = &[
    "origin",
    "verify_sha1",
    "auth_sha1_v4",
    "auth_aes128_md5",
    "auth_aes128_sha1",
    "auth_chain_a",
    "auth_chain_b",
];
pub const SSR_OBFS: &[&str] = &[
    "plain",
    "http_simple",
    "http_post",
    "random_head",
    "tls1.2_ticket_auth",
];

pub const V2RAY_NETWORKS: &[&str] = &["tcp", "kcp", "ws", "h2", "grpc"];
pub const V2RAY_FAKE_TYPES: &[&str] = &[
    "none",
    "http",
    "srtp",
    "utp",
    "wechat-video",
    "dtls",
    "wireguard",
];
pub const V2RAY_CIPHERS: &[&str] = &["auto", "aes-128-gcm", "chacha20-poly1305", "none", "zero"];
pub const VMESS_TLS: &[&str] = &["none", "tls"];

pub const VLESS_FLOWS: &[&str] = &[
    "none",
    "xtls-rprx-origin",
    "xtls-rprx-origin-udp443",
    "xtls-rprx-vision",
    "xtls-rprx-vision-udp443",
];
pub const VLESS_SECURITY: &[&str] = &["none", "tls", "xtls"];

pub const TROJAN_METHODS: &[&str] = &["origin", "shadowsocks"];
pub const TROJAN_OBFS: &[&str] = &["none", "websocket"];
pub const TROJAN_SS_CIPHERS: &[&str] =
    &["aes-128-gcm", "aes-256-gcm", "chacha20-ietf-poly1305"];

pub const HTTP_PROTOCOLS: &[&str] = &["http", "https"];
pub const QUIC_CONGESTION: &[&str] = &["bbr", "cubic", "new_reno"];
pub const TUIC_RELAY_MODES: &[&str] = &["native", "quic"];

/// Constraint attached to a single form field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Numeric, must stay within 0..=65535; required means non-zero.
    Port,
    /// Must parse as a UUID when present.
    Uuid,
    /// Must be a member of the given set (empty allowed when optional).
    Enum(&'static [&'static str]),
    /// Boolean switch.
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// Declarative validation contract of one protocol's form.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolSchema {
    pub node_type: NodeType,
    pub fields: &'static [FieldRule],
}

const fn required(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        required: false,
        kind,
    }
}

static VMESS_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::VMess,
    fields: &[
        optional("ps", FieldKind::Text),
        required("add", FieldKind::Text),
        required("port", FieldKind::Port),
        required("id", FieldKind::Uuid),
        optional("aid", FieldKind::Port),
        required("net", FieldKind::Enum(V2RAY_NETWORKS)),
        optional("type", FieldKind::Enum(V2RAY_FAKE_TYPES)),
        optional("host", FieldKind::Text),
        optional("path", FieldKind::Text),
        optional("tls", FieldKind::Enum(VMESS_TLS)),
        optional("sni", FieldKind::Text),
        optional("alpn", FieldKind::Text),
        optional("scy", FieldKind::Enum(V2RAY_CIPHERS)),
        optional("v", FieldKind::Text),
        optional("flow", FieldKind::Text),
        optional("allowInsecure", FieldKind::Flag),
    ],
};

static VLESS_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Vless,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("id", FieldKind::Uuid),
        optional("flow", FieldKind::Enum(VLESS_FLOWS)),
        optional("security", FieldKind::Enum(VLESS_SECURITY)),
        optional("sni", FieldKind::Text),
        required("net", FieldKind::Enum(V2RAY_NETWORKS)),
        optional("host", FieldKind::Text),
        optional("path", FieldKind::Text),
        optional("headerType", FieldKind::Enum(V2RAY_FAKE_TYPES)),
        optional("alpn", FieldKind::Text),
        optional("allowInsecure", FieldKind::Flag),
    ],
};

static SS_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Shadowsocks,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("password", FieldKind::Text),
        required("method", FieldKind::Enum(SS_METHODS)),
        optional("plugin", FieldKind::Enum(SS_PLUGINS)),
        optional("mode", FieldKind::Enum(SS_MODES)),
        optional("tls", FieldKind::Text),
        optional("obfs", FieldKind::Enum(SS_OBFS)),
        optional("host", FieldKind::Text),
        optional("path", FieldKind::Text),
        optional("impl", FieldKind::Enum(SS_IMPLS)),
    ],
};

static SSR_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::ShadowsocksR,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("password", FieldKind::Text),
        required("method", FieldKind::Enum(SSR_METHODS)),
        required("protocol", FieldKind::Enum(SSR_PROTOCOLS)),
        optional("protocolParam", FieldKind::Text),
        required("obfs", FieldKind::Enum(SSR_OBFS)),
        optional("obfsParam", FieldKind::Text),
    ],
};

static TROJAN_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Trojan,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("password", FieldKind::Text),
        optional("peer", FieldKind::Text),
        optional("allowInsecure", FieldKind::Flag),
        required("method", FieldKind::Enum(TROJAN_METHODS)),
        optional("ssCipher", FieldKind::Enum(TROJAN_SS_CIPHERS)),
        required("obfs", FieldKind::Enum(TROJAN_OBFS)),
        optional("host", FieldKind::Text),
        optional("path", FieldKind::Text),
    ],
};

static HTTP_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Http,
    fields: &[
        required("protocol", FieldKind::Enum(HTTP_PROTOCOLS)),
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        optional("username", FieldKind::Text),
        optional("password", FieldKind::Text),
    ],
};

static SOCKS5_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Socks5,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        optional("username", FieldKind::Text),
        optional("password", FieldKind::Text),
    ],
};

static TUIC_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Tuic,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("uuid", FieldKind::Uuid),
        required("password", FieldKind::Text),
        optional("congestionControl", FieldKind::Enum(QUIC_CONGESTION)),
        optional("alpn", FieldKind::Text),
        optional("sni", FieldKind::Text),
        optional("allowInsecure", FieldKind::Flag),
        optional("disableSni", FieldKind::Flag),
        optional("udpRelayMode", FieldKind::Enum(TUIC_RELAY_MODES)),
    ],
};

static JUICITY_SCHEMA: ProtocolSchema = ProtocolSchema {
    node_type: NodeType::Juicity,
    fields: &[
        optional("name", FieldKind::Text),
        required("server", FieldKind::Text),
        required("port", FieldKind::Port),
        required("uuid", FieldKind::Uuid),
        required("password", FieldKind::Text),
        optional("congestionControl", FieldKind::Enum(QUIC_CONGESTION)),
        optional("sni", FieldKind::Text),
        optional("allowInsecure", FieldKind::Flag),
        optional("pinnedCertchainSha256", FieldKind::Text),
    ],
};

/// Looks up the static schema of a protocol.
pub fn schema_for(node_type: NodeType) -> &'static ProtocolSchema {
    match node_type {
        NodeType::VMess => &VMESS_SCHEMA,
        NodeType::Vless => &VLESS_SCHEMA,
        NodeType::Shadowsocks => &SS_SCHEMA,
        NodeType::ShadowsocksR => &SSR_SCHEMA,
        NodeType::Trojan => &TROJAN_SCHEMA,
        NodeType::Http => &HTTP_SCHEMA,
        NodeType::Socks5 => &SOCKS5_SCHEMA,
        NodeType::Tuic => &TUIC_SCHEMA,
        NodeType::Juicity => &JUICITY_SCHEMA,
    }
}

/// Default form values of a protocol: typed constraints (enums, flags)
/// already satisfied, user-supplied fields (server, credentials) left blank.
pub fn default_values(node_type: NodeType) -> NodeValues {
    match node_type {
        NodeType::VMess => NodeValues::VMess(V2rayValues::default()),
        NodeType::Vless => NodeValues::Vless(VlessValues::default()),
        NodeType::Shadowsocks => NodeValues::Shadowsocks(SsValues::default()),
        NodeType::ShadowsocksR => NodeValues::ShadowsocksR(SsrValues::default()),
        NodeType::Trojan => NodeValues::Trojan(TrojanValues::default()),
        NodeType::Http => NodeValues::Http(HttpValues::default()),
        NodeType::Socks5 => NodeValues::Socks5(Socks5Values::default()),
        NodeType::Tuic => NodeValues::Tuic(TuicValues::default()),
        NodeType::Juicity => NodeValues::Juicity(JuicityValues::default()),
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Schema mismatch report, one entry per offending field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(FieldError::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid form values: {}", joined)
    }
}

impl std::error::Error for ValidationError {}

fn field_json(values: &NodeValues) -> serde_json::Map<String, Value> {
    let value = match values {
        NodeValues::VMess(v) => serde_json::to_value(v),
        NodeValues::Vless(v) => serde_json::to_value(v),
        NodeValues::Shadowsocks(v) => serde_json::to_value(v),
        NodeValues::ShadowsocksR(v) => serde_json::to_value(v),
        NodeValues::Trojan(v) => serde_json::to_value(v),
        NodeValues::Http(v) => serde_json::to_value(v),
        NodeValues::Socks5(v) => serde_json::to_value(v),
        NodeValues::Tuic(v) => serde_json::to_value(v),
        NodeValues::Juicity(v) => serde_json::to_value(v),
    };
    match value {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

/// Validates form values against their protocol's schema.
///
/// Reports every offending field at once so a form can annotate them all in
/// a single pass. `generate` assumes its input already passed this check.
pub fn validate(values: &NodeValues) -> Result<(), ValidationError> {
    let schema = schema_for(values.node_type());
    let fields = field_json(values);
    let mut errors = Vec::new();

    for rule in schema.fields {
        let value = fields.get(rule.name).cloned().unwrap_or(Value::Null);
        check_field(rule, &value, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn check_field(rule: &FieldRule, value: &Value, errors: &mut Vec<FieldError>) {
    let fail = |errors: &mut Vec<FieldError>, message: &str| {
        errors.push(FieldError {
            field: rule.name.to_string(),
            message: message.to_string(),
        });
    };

    match rule.kind {
        FieldKind::Text => {
            let text = value.as_str().unwrap_or_default();
            if rule.required && text.is_empty() {
                fail(errors, "required");
            }
        }
        FieldKind::Port => match value.as_u64() {
            Some(0) if rule.required => fail(errors, "required"),
            Some(n) if n > 65535 => fail(errors, "must be within 0-65535"),
            Some(_) => {}
            None => fail(errors, "must be a number"),
        },
        FieldKind::Uuid => {
            let text = value.as_str().unwrap_or_default();
            if text.is_empty() {
                if rule.required {
                    fail(errors, "required");
                }
            } else if Uuid::parse_str(text).is_err() {
                fail(errors, "must be a UUID");
            }
        }
        FieldKind::Enum(set) => {
            let text = value.as_str().unwrap_or_default();
            if text.is_empty() && !rule.required && !set.contains(&"") {
                return;
            }
            if rule.required && text.is_empty() {
                fail(errors, "required");
            } else if !set.contains(&text) {
                fail(errors, "not an allowed value");
            }
        }
        FieldKind::Flag => {
            if !value.is_boolean() {
                fail(errors, "must be a boolean");
            }
        }
    }
}
