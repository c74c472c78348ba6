use nodelink::models::{
    HttpValues, JuicityValues, Socks5Values, SsValues, SsrValues, TrojanValues, TuicValues,
    V2rayValues, VlessValues,
};
use nodelink::{generate_link, resolve_link, validate, LinkError, NodeValues};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every protocol with both directions implemented must reproduce its form
/// values across generate → resolve, field for field.
#[test]
fn test_roundtrip_law_across_dispatch() -> anyhow::Result<()> {
    init_logging();

    let nodes = vec![
        NodeValues::VMess(V2rayValues {
            ps: "vmess ws".to_string(),
            add: "example.com".to_string(),
            port: 443,
            id: "b0dd1911-4a00-4a64-bc9a-9a4a45eef1b1".to_string(),
            net: "ws".to_string(),
            host: "cdn.example.com".to_string(),
            path: "/ws".to_string(),
            tls: "tls".to_string(),
            ..V2rayValues::default()
        }),
        NodeValues::Vless(VlessValues {
            name: "vless grpc".to_string(),
            server: "example.com".to_string(),
            port: 443,
            id: "b0dd1911-4a00-4a64-bc9a-9a4a45eef1b1".to_string(),
            security: "tls".to_string(),
            net: "grpc".to_string(),
            path: "svc".to_string(),
            ..VlessValues::default()
        }),
        NodeValues::Shadowsocks(SsValues {
            name: "ss plugin".to_string(),
            server: "example.com".to_string(),
            port: 8388,
            password: "hunter2".to_string(),
            plugin: "v2ray-plugin".to_string(),
            tls: "tls".to_string(),
            host: "cdn.example.com".to_string(),
            ..SsValues::default()
        }),
        NodeValues::ShadowsocksR(SsrValues {
            name: "ssr".to_string(),
            server: "example.com".to_string(),
            port: 8388,
            password: "hunter2".to_string(),
            method: "aes-256-cfb".to_string(),
            protocol: "auth_aes128_md5".to_string(),
            protocol_param: "64".to_string(),
            obfs: "tls1.2_ticket_auth".to_string(),
            obfs_param: "cloudfront.net".to_string(),
        }),
        NodeValues::Trojan(TrojanValues {
            name: "trojan go".to_string(),
            server: "example.com".to_string(),
            port: 443,
            password: "hunter2".to_string(),
            peer: "sni.example.com".to_string(),
            obfs: "websocket".to_string(),
            host: "cdn.example.com".to_string(),
            path: "/ws".to_string(),
            ..TrojanValues::default()
        }),
        NodeValues::Http(HttpValues {
            protocol: "https".to_string(),
            name: "http proxy".to_string(),
            server: "proxy.example.com".to_string(),
            port: 8443,
            username: "user".to_string(),
            password: "pass".to_string(),
        }),
        NodeValues::Socks5(Socks5Values {
            name: "socks".to_string(),
            server: "example.com".to_string(),
            port: 1080,
            username: "user".to_string(),
            password: "pass".to_string(),
        }),
        NodeValues::Juicity(JuicityValues {
            name: "juicity".to_string(),
            server: "example.com".to_string(),
            port: 443,
            uuid: "b0dd1911-4a00-4a64-bc9a-9a4a45eef1b1".to_string(),
            password: "hunter2".to_string(),
            ..JuicityValues::default()
        }),
    ];

    for values in nodes {
        validate(&values)?;
        let link = generate_link(&values);
        let resolved = resolve_link(&link)
            .map_err(|e| anyhow::anyhow!("resolving {} failed: {}", link, e))?;
        assert_eq!(resolved, values, "round-trip mismatch for {}", link);
        assert_eq!(resolved.node_type(), values.node_type());
        assert_eq!(resolved.name(), values.name());
        assert!(!resolved.node_type().as_str().is_empty());
    }

    Ok(())
}

#[test]
fn test_shadowsocks_documented_vector() {
    init_logging();

    let link = "ss://YWVzLTEyOC1nY206aHVudGVyMg==@example.com:8388/\
                ?plugin=v2ray-plugin%3Btls%3Bhost%3Dcdn.example.com#MyNode";
    let resolved = resolve_link(link).unwrap();

    let NodeValues::Shadowsocks(values) = resolved else {
        panic!("expected a shadowsocks node");
    };
    assert_eq!(values.method, "aes-128-gcm");
    assert_eq!(values.password, "hunter2");
    assert_eq!(values.server, "example.com");
    assert_eq!(values.port, 8388);
    assert_eq!(values.tls, "tls");
    assert_eq!(values.host, "cdn.example.com");
    assert_eq!(values.name, "MyNode");
    assert_eq!(values.mode, "websocket");
}

#[test]
fn test_ssr_multi_colon_server_survives() {
    init_logging();

    let values = NodeValues::ShadowsocksR(SsrValues {
        server: "2001:db8::1".to_string(),
        port: 8388,
        password: "pw".to_string(),
        ..SsrValues::default()
    });
    let resolved = resolve_link(&generate_link(&values)).unwrap();
    let NodeValues::ShadowsocksR(resolved) = resolved else {
        panic!("expected an ssr node");
    };
    assert_eq!(resolved.server, "2001:db8::1");
    assert_eq!(resolved.port, 8388);
    assert_eq!(resolved.method, SsrValues::default().method);
}

#[test]
fn test_vless_grpc_service_name_mapping() {
    init_logging();

    let values = NodeValues::Vless(VlessValues {
        server: "example.com".to_string(),
        port: 443,
        id: "b0dd1911-4a00-4a64-bc9a-9a4a45eef1b1".to_string(),
        net: "grpc".to_string(),
        path: "my-service".to_string(),
        ..VlessValues::default()
    });
    let link = generate_link(&values);
    assert!(link.contains("serviceName=my-service"));

    let NodeValues::Vless(resolved) = resolve_link(&link).unwrap() else {
        panic!("expected a vless node");
    };
    assert_eq!(resolved.path, "my-service");
    assert_eq!(resolved.host, "");
}

#[test]
fn test_unknown_scheme_is_reported() {
    init_logging();

    assert!(matches!(
        resolve_link("gopher://example.com:70"),
        Err(LinkError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        resolve_link("complete garbage"),
        Err(LinkError::UnsupportedScheme(_))
    ));
}

#[test]
fn test_tuic_generates_but_does_not_resolve() {
    init_logging();

    let values = NodeValues::Tuic(TuicValues {
        server: "example.com".to_string(),
        port: 443,
        uuid: "b0dd1911-4a00-4a64-bc9a-9a4a45eef1b1".to_string(),
        password: "pw".to_string(),
        ..TuicValues::default()
    });
    let link = generate_link(&values);
    assert!(link.starts_with("tuic://"));
    assert_eq!(
        resolve_link(&link),
        Err(LinkError::ResolveUnimplemented("tuic"))
    );
}

#[test]
fn test_corrupt_payloads_error_instead_of_panicking() {
    init_logging();

    for link in [
        "vmess://#####",
        "ssr://@@@@",
        "ss://!!!@:0/",
        "vless://:443",
        "trojan://",
    ] {
        assert!(resolve_link(link).is_err(), "expected error for {}", link);
    }
}
