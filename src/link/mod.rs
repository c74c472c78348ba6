//! Share-link codecs, one module per protocol, plus scheme dispatch.
//!
//! Every codec is a pure `generate`/`resolve` pair: `generate` turns
//! schema-valid form values into a scheme-prefixed link string, `resolve`
//! parses such a link back into form values. Dispatch selects the codec from
//! the token before `://`; unknown schemes are a reported error, never a
//! guess.

pub mod http;
pub mod juicity;
pub mod socks;
pub mod ss;
pub mod ssr;
pub mod trojan;
pub mod tuic;
pub mod vless;
pub mod vmess;

use log::debug;
use thiserror::Error;

use crate::models::{NodeType, NodeValues};
use crate::utils::url::url_encode;

/// Joins query pairs into `k=v&k=v` form with percent-encoded values.
pub(crate) fn format_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, url_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Truthy query-parameter values for boolean switches.
pub(crate) fn query_flag(value: Option<&String>) -> bool {
    matches!(value.map(String::as_str), Some("true") | Some("1"))
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkError {
    #[error("unsupported protocol: {0:?}")]
    UnsupportedScheme(String),

    #[error("invalid {scheme} link: {reason}")]
    Invalid {
        scheme: &'static str,
        reason: String,
    },

    #[error("resolving {0} links is not implemented")]
    ResolveUnimplemented(&'static str),
}

impl LinkError {
    pub(crate) fn invalid(scheme: &'static str, reason: impl Into<String>) -> Self {
        LinkError::Invalid {
            scheme,
            reason: reason.into(),
        }
    }
}

/// Extracts the scheme token before `://`, lowercased.
pub fn detect_scheme(link: &str) -> Option<String> {
    link.split_once("://")
        .map(|(scheme, _)| scheme.trim().to_ascii_lowercase())
}

/// Parses a share link of any supported protocol into form values.
pub fn resolve_link(link: &str) -> Result<NodeValues, LinkError> {
    let link = link.trim();
    let scheme = detect_scheme(link).ok_or_else(|| {
        LinkError::UnsupportedScheme(link.chars().take(32).collect())
    })?;

    let node_type = NodeType::from_scheme(&scheme).ok_or_else(|| {
        debug!("no resolver registered for scheme {:?}", scheme);
        LinkError::UnsupportedScheme(scheme.clone())
    })?;

    match node_type {
        NodeType::VMess => vmess::resolve_vmess(link).map(NodeValues::VMess),
        NodeType::Vless => vless::resolve_vless(link).map(NodeValues::Vless),
        NodeType::Shadowsocks => ss::resolve_ss(link).map(NodeValues::Shadowsocks),
        NodeType::ShadowsocksR => ssr::resolve_ssr(link).map(NodeValues::ShadowsocksR),
        NodeType::Trojan => trojan::resolve_trojan(link).map(NodeValues::Trojan),
        NodeType::Http => http::resolve_http(link).map(NodeValues::Http),
        NodeType::Socks5 => socks::resolve_socks5(link).map(NodeValues::Socks5),
        NodeType::Tuic => tuic::resolve_tuic(link).map(NodeValues::Tuic),
        NodeType::Juicity => juicity::resolve_juicity(link).map(NodeValues::Juicity),
    }
}

/// Builds the share link of a node from its form values.
///
/// Deterministic and side-effect-free; assumes the values already passed
/// schema validation.
pub fn generate_link(values: &NodeValues) -> String {
    match values {
        NodeValues::VMess(v) => vmess::generate_vmess(v),
        NodeValues::Vless(v) => vless::generate_vless(v),
        NodeValues::Shadowsocks(v) => ss::generate_ss(v),
        NodeValues::ShadowsocksR(v) => ssr::generate_ssr(v),
        NodeValues::Trojan(v) => trojan::generate_trojan(v),
        NodeValues::Http(v) => http::generate_http(v),
        NodeValues::Socks5(v) => socks::generate_socks5(v),
        NodeValues::Tuic(v) => tuic::generate_tuic(v),
        NodeValues::Juicity(v) => juicity::generate_juicity(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_scheme() {
        assert_eq!(detect_scheme("ss://abc").as_deref(), Some("ss"));
        assert_eq!(detect_scheme("Trojan-Go://x").as_deref(), Some("trojan-go"));
        assert_eq!(detect_scheme("no scheme here"), None);
    }

    #[test]
    fn test_resolve_link_unknown_scheme() {
        let err = resolve_link("telnet://example.com:23").unwrap_err();
        assert_eq!(err, LinkError::UnsupportedScheme("telnet".to_string()));
    }

    #[test]
    fn test_resolve_link_garbage_is_reported_not_panicked() {
        let err = resolve_link("certainly not a link").unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedScheme(_)));
    }
}
