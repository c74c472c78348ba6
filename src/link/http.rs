//! HTTP and HTTPS proxy links: plain authenticated URLs, no query params.

use super::LinkError;
use crate::models::HttpValues;
use crate::utils::url::{parse_url, url_encode};

pub(crate) fn userinfo(username: &str, password: &str) -> String {
    if username.is_empty() && password.is_empty() {
        return String::new();
    }
    if password.is_empty() {
        format!("{}@", url_encode(username))
    } else {
        format!("{}:{}@", url_encode(username), url_encode(password))
    }
}

/// Generate an HTTP(S) proxy share link from form values.
pub fn generate_http(values: &HttpValues) -> String {
    let mut link = format!(
        "{}://{}{}:{}",
        values.protocol,
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

/// Resolve an HTTP(S) proxy share link back into form values.
pub fn resolve_http(link: &str) -> Result<HttpValues, LinkError> {
    let url = parse_url(link);
    if url.protocol != "http" && url.protocol != "https" {
        return Err(LinkError::invalid("http", "missing http(s):// prefix"));
    }
    if url.host.is_empty() {
        return Err(LinkError::invalid("http", "missing host"));
    }

    Ok(HttpValues {
        protocol: url.protocol.clone(),
        name: url.hash.clone(),
        server: url.host.clone(),
        port: url.port,
        username: url.username.clone(),
        password: url.password.clone(),
    })
}
