//! End-to-end fetch behaviour against a scripted transport.

mod helpers;

use go2web::app::fetch_page;
use go2web::{ErrorKind, RedirectResolver, StatusClass};
use helpers::{ok, redirect, MockTransport};

#[test]
fn test_moved_permanently_then_ok() {
    let transport = MockTransport::new([
        "HTTP/1.1 301 Moved Permanently\r\nLocation: https://example.com/home\r\nConnection: close\r\n\r\n",
        "HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n<html><body>Hi</body></html>",
    ]);
    let resolver = RedirectResolver::new(&transport);

    let target = go2web::app::parse_target("example.com/").unwrap();
    let response = resolver.fetch_target(target).unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_class, StatusClass::Success);
    assert!(String::from_utf8_lossy(&response.body).contains("<html><body>Hi</body></html>"));
    assert_eq!(
        transport.requests(),
        vec![
            "GET / HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n",
            "GET /home HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n",
        ]
    );
}

#[test]
fn test_success_returns_exact_body() {
    let body = "line one\r\n\r\nline two after a blank line";
    let transport = MockTransport::new([ok(body)]);
    let resolver = RedirectResolver::new(&transport);

    let response = resolver.fetch("example.com", "/").unwrap();

    assert_eq!(response.status_class, StatusClass::Success);
    assert_eq!(response.body, body.as_bytes());
}

#[test]
fn test_each_hop_opens_a_fresh_connection_to_the_new_host() {
    let transport = MockTransport::new([
        redirect(301, "https://a.example/1"),
        redirect(302, "https://b.example/2"),
        redirect(307, "https://c.example/3"),
        ok("done"),
    ]);
    let resolver = RedirectResolver::new(&transport);

    let response = resolver.fetch("start.example", "/").unwrap();

    assert_eq!(response.body, b"done");
    assert_eq!(
        transport.hosts(),
        vec!["start.example", "a.example", "b.example", "c.example"]
    );
}

#[test]
fn test_redirect_loop_degrades_to_last_response() {
    // Far more redirects than the default bound of 5.
    let replies: Vec<String> = (0..20)
        .map(|i| redirect(302, &format!("https://loop.example/{i}")))
        .collect();
    let transport = MockTransport::new(replies);
    let resolver = RedirectResolver::new(&transport);

    let response = resolver.fetch("loop.example", "/").unwrap();

    assert_eq!(transport.connections(), 6);
    assert_eq!(response.status_class, StatusClass::Redirect);
    assert_eq!(response.location(), Some("https://loop.example/5"));
}

#[test]
fn test_garbage_status_line_is_reported() {
    let transport = MockTransport::new(["GARBAGE not a status\r\n\r\n"]);
    let resolver = RedirectResolver::new(&transport);

    let err = resolver.fetch("example.com", "/").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedStatusLine);
    assert!(err.to_string().contains("GARBAGE not a status"));
}

#[test]
fn test_fetch_page_renders_content() {
    let transport = MockTransport::new([ok(
        "<html><body><h2>News</h2><p>Hello there</p><a href=\"/more\">more</a></body></html>",
    )]);
    let resolver = RedirectResolver::new(&transport);

    let rendered = fetch_page("https://example.com/news", &resolver).unwrap();

    assert_eq!(rendered, "\nNews\n----\n\nHello there\n\nLink: /more\n");
    assert_eq!(transport.hosts(), vec!["example.com"]);
}

#[test]
fn test_fetch_page_rejects_bad_url_without_connecting() {
    let transport = MockTransport::new(Vec::<String>::new());
    let resolver = RedirectResolver::new(&transport);

    let err = fetch_page("ftp://example.com/", &resolver).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    assert_eq!(transport.connections(), 0);
}
