use std::convert::Infallible;

use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use percent_encoding::percent_decode_str;
use tracing::warn;

use crate::core::models::AskRequest;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Decodes one URL-encoded form component. `+` becomes a space before
/// percent escapes are resolved, so an encoded `%2B` survives as `+`.
/// Malformed escapes are kept verbatim and invalid UTF-8 is replaced.
///
/// # Examples
///
/// ```
/// use gpt_gateway::api::parsing::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world"), "hello world");
/// assert_eq!(decode_url_component("1+%2B+1"), "1 + 1");
/// ```
#[must_use]
pub fn decode_url_component(input: &str) -> String {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Splits URL-encoded form data into decoded `(name, value)` pairs,
/// preserving order and duplicates. A pair without `=` has an empty value.
#[must_use]
pub fn parse_form_data(form_data: &str) -> Vec<(String, String)> {
    form_data
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (decode_url_component(name), decode_url_component(value)),
            None => (decode_url_component(pair), String::new()),
        })
        .collect()
}

/// Looks `name` up in each source in turn. Within a source the first pair
/// with that name is used; an empty value falls through to the next source.
/// Returns an empty string when no source has a non-empty value.
#[must_use]
pub fn form_value(sources: &[&[(String, String)]], name: &str) -> String {
    sources
        .iter()
        .filter_map(|pairs| pairs.iter().find(|(k, _)| k == name))
        .map(|(_, v)| v)
        .find(|v| !v.is_empty())
        .cloned()
        .unwrap_or_default()
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

#[must_use]
pub fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    content_type(headers)
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// Collects the text parts of a `multipart/form-data` body as
/// `(name, value)` pairs. File parts are skipped. A malformed body yields
/// the parts read before the error; a non-multipart body yields nothing.
pub async fn parse_multipart_form(headers: &HeaderMap, body: Bytes) -> Vec<(String, String)> {
    let Some(boundary) = content_type(headers).and_then(|ct| multer::parse_boundary(ct).ok())
    else {
        return Vec::new();
    };

    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut pairs = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                break;
            }
        };

        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match field.text().await {
            Ok(value) => pairs.push((name, value)),
            Err(e) => {
                warn!("Failed to read multipart field {}: {}", name, e);
                break;
            }
        }
    }

    pairs
}

/// Reads `key` and `command` from the query string, then from a
/// form-urlencoded body, then from a multipart body. Any other body type is
/// ignored.
pub async fn parse_ask_request(query: Option<&str>, headers: &HeaderMap, body: Bytes) -> AskRequest {
    let query_pairs = query.map(parse_form_data).unwrap_or_default();
    let (body_pairs, multipart_pairs) = if is_form_urlencoded(headers) {
        (parse_form_data(&String::from_utf8_lossy(&body)), Vec::new())
    } else {
        (Vec::new(), parse_multipart_form(headers, body).await)
    };

    let sources: [&[(String, String)]; 3] = [&query_pairs, &body_pairs, &multipart_pairs];

    AskRequest {
        key: form_value(&sources, "key"),
        command: form_value(&sources, "command"),
    }
}
