//! Node type identification and the form-value union.

use super::values::{
    HttpValues, JuicityValues, Socks5Values, SsValues, SsrValues, TrojanValues, TuicValues,
    V2rayValues, VlessValues,
};

/// Represents the protocol of a proxy node.
/// This is the canonical enum used for protocol identification across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    VMess,
    Vless,
    Shadowsocks,
    ShadowsocksR,
    Trojan,
    Http,
    Socks5,
    Tuic,
    Juicity,
}

impl NodeType {
    /// Human-readable protocol name.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::VMess => "VMess",
            NodeType::Vless => "VLESS",
            NodeType::Shadowsocks => "SS",
            NodeType::ShadowsocksR => "SSR",
            NodeType::Trojan => "Trojan",
            NodeType::Http => "HTTP",
            NodeType::Socks5 => "SOCKS5",
            NodeType::Tuic => "TUIC",
            NodeType::Juicity => "Juicity",
        }
    }

    /// Maps a link scheme (the token before `://`, lowercased) to a node type.
    ///
    /// Alias schemes collapse onto their protocol: `trojan-go` is Trojan,
    /// `https` is HTTP.
    pub fn from_scheme(scheme: &str) -> Option<NodeType> {
        match scheme {
            "vmess" => Some(NodeType::VMess),
            "vless" => Some(NodeType::Vless),
            "ss" => Some(NodeType::Shadowsocks),
            "ssr" => Some(NodeType::ShadowsocksR),
            "trojan" | "trojan-go" => Some(NodeType::Trojan),
            "http" | "https" => Some(NodeType::Http),
            "socks5" => Some(NodeType::Socks5),
            "tuic" => Some(NodeType::Tuic),
            "juicity" => Some(NodeType::Juicity),
            _ => None,
        }
    }
}

/// Form values for one node, tagged by protocol.
///
/// Each variant carries the record its protocol's edit form works on. Only
/// the share link generated from these values is ever persisted; the values
/// themselves are transient.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValues {
    VMess(V2rayValues),
    Vless(VlessValues),
    Shadowsocks(SsValues),
    ShadowsocksR(SsrValues),
    Trojan(TrojanValues),
    Http(HttpValues),
    Socks5(Socks5Values),
    Tuic(TuicValues),
    Juicity(JuicityValues),
}

impl NodeValues {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeValues::VMess(_) => NodeType::VMess,
            NodeValues::Vless(_) => NodeType::Vless,
            NodeValues::Shadowsocks(_) => NodeType::Shadowsocks,
            NodeValues::ShadowsocksR(_) => NodeType::ShadowsocksR,
            NodeValues::Trojan(_) => NodeType::Trojan,
            NodeValues::Http(_) => NodeType::Http,
            NodeValues::Socks5(_) => NodeType::Socks5,
            NodeValues::Tuic(_) => NodeType::Tuic,
            NodeValues::Juicity(_) => NodeType::Juicity,
        }
    }

    /// Display name of the node, whatever field the protocol keeps it in.
    pub fn name(&self) -> &str {
        match self {
            NodeValues::VMess(v) => &v.ps,
            NodeValues::Vless(v) => &v.name,
            NodeValues::Shadowsocks(v) => &v.name,
            NodeValues::ShadowsocksR(v) => &v.name,
            NodeValues::Trojan(v) => &v.name,
            NodeValues::Http(v) => &v.name,
            NodeValues::Socks5(v) => &v.name,
            NodeValues::Tuic(v) => &v.name,
            NodeValues::Juicity(v) => &v.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scheme_aliases() {
        assert_eq!(NodeType::from_scheme("trojan-go"), Some(NodeType::Trojan));
        assert_eq!(NodeType::from_scheme("https"), Some(NodeType::Http));
        assert_eq!(NodeType::from_scheme("vmess"), Some(NodeType::VMess));
        assert_eq!(NodeType::from_scheme("telnet"), None);
    }
}
