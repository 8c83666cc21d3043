use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, header};
use gpt_gateway::api::parsing::{
    decode_url_component, form_value, is_form_urlencoded, parse_ask_request, parse_form_data,
    parse_multipart_form,
};

fn form_headers(content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    headers
}

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world"), "hello world");
    assert_eq!(decode_url_component("hello+world"), "hello world");
    assert_eq!(
        decode_url_component("test%40example.com%26param%3Dvalue"),
        "test@example.com&param=value"
    );
    // An encoded plus stays a plus
    assert_eq!(decode_url_component("a%2Bb"), "a+b");
    // Malformed escapes are kept as-is
    assert_eq!(decode_url_component("100%"), "100%");
    assert_eq!(decode_url_component("%zz"), "%zz");
}

#[test]
fn test_parse_form_data_keeps_order_and_duplicates() {
    let pairs = parse_form_data("key=a&command=hi+there&key=b&flag&&empty=");
    assert_eq!(
        pairs,
        vec![
            ("key".to_string(), "a".to_string()),
            ("command".to_string(), "hi there".to_string()),
            ("key".to_string(), "b".to_string()),
            ("flag".to_string(), String::new()),
            ("empty".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_form_value_precedence() {
    let query = parse_form_data("key=from-query&command=");
    let body = parse_form_data("key=from-body&command=from-body");
    let sources: [&[(String, String)]; 2] = [&query, &body];

    assert_eq!(form_value(&sources, "key"), "from-query");
    // Empty query value falls through to the body
    assert_eq!(form_value(&sources, "command"), "from-body");
    assert_eq!(form_value(&sources, "missing"), "");
}

#[test]
fn test_first_duplicate_wins() {
    let query = parse_form_data("key=first&key=second");
    let sources: [&[(String, String)]; 1] = [&query];
    assert_eq!(form_value(&sources, "key"), "first");
}

#[test]
fn test_is_form_urlencoded() {
    assert!(is_form_urlencoded(&form_headers(
        "application/x-www-form-urlencoded"
    )));
    assert!(is_form_urlencoded(&form_headers(
        "Application/X-WWW-Form-Urlencoded; charset=UTF-8"
    )));
    assert!(!is_form_urlencoded(&form_headers("application/json")));
    assert!(!is_form_urlencoded(&HeaderMap::new()));
}

#[tokio::test]
async fn test_parse_ask_request_from_body() {
    let request = parse_ask_request(
        None,
        &form_headers("application/x-www-form-urlencoded"),
        Bytes::from_static(b"key=s3cret&command=what%27s+up%3F"),
    )
    .await;
    assert_eq!(request.key, "s3cret");
    assert_eq!(request.command, "what's up?");
}

#[tokio::test]
async fn test_parse_ask_request_ignores_non_form_body() {
    let request = parse_ask_request(
        Some("key=s3cret"),
        &form_headers("application/json"),
        Bytes::from_static(br#"{"command":"hi"}"#),
    )
    .await;
    assert_eq!(request.key, "s3cret");
    assert_eq!(request.command, "");
}

#[tokio::test]
async fn test_parse_ask_request_missing_fields() {
    let request = parse_ask_request(None, &HeaderMap::new(), Bytes::new()).await;
    assert_eq!(request.key, "");
    assert_eq!(request.command, "");
}

#[tokio::test]
async fn test_parse_ask_request_query_wins_over_multipart() {
    let body = "--b1\r\n\
                Content-Disposition: form-data; name=\"key\"\r\n\r\n\
                from-body\r\n\
                --b1\r\n\
                Content-Disposition: form-data; name=\"command\"\r\n\r\n\
                line one\nline two\r\n\
                --b1--\r\n";
    let request = parse_ask_request(
        Some("key=from-query"),
        &form_headers("multipart/form-data; boundary=b1"),
        Bytes::from_static(body.as_bytes()),
    )
    .await;

    assert_eq!(request.key, "from-query");
    assert_eq!(request.command, "line one\nline two");
}

#[tokio::test]
async fn test_parse_multipart_form_truncated_body_keeps_earlier_parts() {
    let body = "--b1\r\n\
                Content-Disposition: form-data; name=\"key\"\r\n\r\n\
                s3cret\r\n\
                --b1\r\n\
                Content-Disposition: form-data; name=\"command\"\r\n\r\n\
                never finished";
    let pairs = parse_multipart_form(
        &form_headers("multipart/form-data; boundary=b1"),
        Bytes::from_static(body.as_bytes()),
    )
    .await;

    assert_eq!(pairs, vec![("key".to_string(), "s3cret".to_string())]);
}

#[tokio::test]
async fn test_parse_multipart_form_requires_multipart_content_type() {
    let pairs = parse_multipart_form(
        &form_headers("text/plain"),
        Bytes::from_static(b"--b1\r\n"),
    )
    .await;
    assert!(pairs.is_empty());
}
