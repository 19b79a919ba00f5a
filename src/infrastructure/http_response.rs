// HTTP response utilities for HTML pages with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
};
use tokio::io::AsyncReadExt;

/// Whether the client advertises Brotli in `Accept-Encoding` with a non-zero `q`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(|entry| coding_quality(entry, "br") > 0.0))
        .unwrap_or(false)
}

/// Quality of `coding` in one `Accept-Encoding` entry, 0 when it names another coding.
fn coding_quality(entry: &str, coding: &str) -> f64 {
    let mut parts = entry.split(';');
    let name = parts.next().unwrap_or_default().trim();
    if !name.eq_ignore_ascii_case(coding) {
        return 0.0;
    }

    parts
        .find_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("q") {
                value.trim().parse::<f64>().ok()
            } else {
                None
            }
        })
        .unwrap_or(1.0)
}

/// Build a `text/html` response, compressing the body with Brotli when asked.
pub async fn html_response(html: String, compress: bool) -> Result<Response<Body>, StatusCode> {
    let page_bytes = html.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let original = page_bytes.len();
        let compressed = brotli_compress(page_bytes).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed page: {} -> {} bytes", original, compressed.len());
        (compressed, Some("br"))
    } else {
        (page_bytes, None)
    };

    let content_length = HeaderValue::from_str(&body_bytes.len().to_string()).map_err(|e| {
        tracing::error!("Invalid content length: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CONTENT_LENGTH, content_length);

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn brotli_compress(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(bytes);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br;q=1.0"));
        assert!(accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("BR"));
        assert!(accepts_brotli(&headers));
    }

    #[test]
    fn test_brotli_refused_with_zero_quality() {
        let mut headers = HeaderMap::new();

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br;q=0"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br; q=0.000, gzip"));
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br;q=0.2"));
        assert!(accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("brotli"));
        assert!(!accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_plain_html_response() {
        let response = html_response("<p>hi</p>".to_string(), false).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "9");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_brotli_html_response_round_trips() {
        let page = "<html>".repeat(200);
        let response = html_response(page.clone(), true).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.len() < page.len());

        let mut decoder = BrotliDecoder::new(std::io::Cursor::new(body.to_vec()));
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).await.unwrap();
        assert_eq!(decoded, page);
    }
}
