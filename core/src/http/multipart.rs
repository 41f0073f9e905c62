//! `multipart/form-data` request bodies.

use super::error::HttpError;
use super::request::{HttpRequest, RequestBody};
use bytes::Bytes;
use std::convert::Infallible;

const MALFORMED: &str = "Malformed multipart section";

/// One section of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multipart {
    /// Form field name, from `Content-Disposition`.
    pub name: Option<String>,
    /// Original file name, from `Content-Disposition`.
    pub filename: Option<String>,
    /// The section's `Content-Type`.
    pub content_type: Option<String>,
    /// Section payload, byte for byte.
    pub data: Bytes,
}

/// Split a `multipart/form-data` request into its sections, in body order.
///
/// A body containing no delimiter has no sections.
///
/// # Errors
///
/// Returns a bad request when the `Content-Type` header is missing or is not
/// `multipart/form-data`, when the boundary is missing or empty, when the body
/// is not raw bytes, or when a section cannot be parsed.
pub async fn parse_multipart(req: &HttpRequest) -> Result<Vec<Multipart>, HttpError> {
    let content_type = req
        .header("content-type")
        .ok_or_else(|| HttpError::bad_request("Missing Content-Type header"))?;

    if !content_type
        .to_ascii_lowercase()
        .contains("multipart/form-data")
    {
        return Err(HttpError::bad_request(
            "Content-Type must be multipart/form-data",
        ));
    }

    let boundary = boundary(content_type)?;

    let RequestBody::Bytes(body) = &req.body else {
        return Err(HttpError::bad_request(
            "Multipart body must be a raw byte buffer",
        ));
    };

    let body = body.clone();
    let stream = futures::stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // No opening delimiter anywhere in the body.
            Err(multer::Error::IncompleteStream) if parts.is_empty() => break,
            Err(err) => {
                tracing::debug!(error = %err, "rejecting multipart body");
                return Err(HttpError::bad_request(MALFORMED));
            }
        };

        let name = field.name().map(ToString::to_string);
        let filename = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|_| HttpError::bad_request(MALFORMED))?;

        parts.push(Multipart {
            name,
            filename,
            content_type,
            data,
        });
    }

    Ok(parts)
}

fn boundary(content_type: &str) -> Result<String, HttpError> {
    match multer::parse_boundary(content_type) {
        Ok(boundary) if !boundary.is_empty() => Ok(boundary),
        Err(multer::Error::NoMultipart) => Err(HttpError::bad_request(
            "Content-Type must be multipart/form-data",
        )),
        _ => Err(HttpError::bad_request("Missing or empty multipart boundary")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request(content_type: &str, body: &'static [u8]) -> HttpRequest {
        HttpRequest::new("/upload")
            .with_method(HttpMethod::Post)
            .with_header("Content-Type", content_type)
            .with_body(RequestBody::Bytes(Bytes::from_static(body)))
    }

    #[tokio::test]
    async fn test_missing_header() {
        let req = HttpRequest::new("/upload");
        assert_eq!(
            parse_multipart(&req).await.unwrap_err().message(),
            "Missing Content-Type header"
        );
    }

    #[tokio::test]
    async fn test_wrong_content_type() {
        let err = parse_multipart(&request("application/json", b"{}"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Content-Type must be multipart/form-data");
        assert_eq!(err.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_missing_boundary() {
        for content_type in [
            "multipart/form-data",
            "multipart/form-data; boundary=",
            r#"multipart/form-data; boundary="""#,
        ] {
            let err = parse_multipart(&request(content_type, b""))
                .await
                .unwrap_err();
            assert_eq!(
                err.message(),
                "Missing or empty multipart boundary",
                "{content_type}"
            );
        }
    }

    #[tokio::test]
    async fn test_body_must_be_bytes() {
        let req = HttpRequest::new("/upload")
            .with_header("content-type", "multipart/form-data; boundary=x")
            .with_body(RequestBody::Json(serde_json::json!({ "a": 1 })));

        assert_eq!(
            parse_multipart(&req).await.unwrap_err().message(),
            "Multipart body must be a raw byte buffer"
        );
    }

    #[tokio::test]
    async fn test_no_delimiter_means_no_parts() {
        let req = request("multipart/form-data; boundary=XXA", b"my request body...");
        assert!(parse_multipart(&req).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quoted_boundary_and_binary_data() {
        let parts = parse_multipart(&request(
            r#"multipart/form-data; boundary="b-1""#,
            b"--b-1\r\nContent-Disposition: form-data; name=\"blob\"\r\n\r\n\x00\xff\r\n\r\n--b-1--\r\n",
        ))
        .await
        .unwrap();

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name.as_deref(), Some("blob"));
        assert_eq!(parts[0].filename, None);
        assert_eq!(parts[0].content_type, None);
        assert_eq!(parts[0].data, Bytes::from_static(b"\x00\xff\r\n"));
    }

    #[tokio::test]
    async fn test_boundary_inside_a_line_is_data() {
        let parts = parse_multipart(&request(
            "multipart/form-data; boundary=xyz",
            b"--xyz\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nbefore--xyzafter\r\n--xyz--",
        ))
        .await
        .unwrap();

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name.as_deref(), Some("note"));
        assert_eq!(parts[0].data, Bytes::from_static(b"before--xyzafter"));
    }

    #[tokio::test]
    async fn test_section_without_separator() {
        let err = parse_multipart(&request(
            "multipart/form-data; boundary=x",
            b"--x\r\nContent-Disposition: form-data; name=\"a\"\r\n--x--",
        ))
        .await
        .unwrap_err();

        assert_eq!(err.message(), "Malformed multipart section");
    }
}
