//! SOCKS5 proxy links.

use super::http::userinfo;
use super::LinkError;
use crate::models::Socks5Values;
use crate::utils::url::{parse_url, url_encode};

/// Generate a SOCKS5 proxy share link from form values.
pub fn generate_socks5(values: &Socks5Values) -> String {
    let mut link = format!(
        "socks5://{}{}:{}",
        userinfo(&values.username, &values.password),
        values.server,
        values.port
    );
    if !values.name.is_empty() {
        link.push('#');
        link.push_str(&url_encode(&values.name));
    }
    link
}

/// Resolve a SOCKS5 proxy share link back into form values.
pub fn resolve_socks5(link: &str) -> Result<Socks5Values, LinkError> {
    let url = parse_url(link);
    if url.protocol != "socks5" {
        return Err(LinkError::invalid("socks5", "missing socks5:// prefix"));
    }
    if url.host.is_empty() {
        return Err(LinkError::invalid("socks5", "missing host"));
    }

    Ok(Socks5Values {
        name: url.hash.clone(),
        server: url.host.clone(),
        port: url.port,
        username: url.username.clone(),
        password: url.password.clone(),
    })
}
