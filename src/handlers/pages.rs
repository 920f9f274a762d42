use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

/// The query contract produced by the upload handler's redirects.
#[derive(Debug, Deserialize)]
pub struct OutcomeParams {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub msg: String,
}

pub async fn index() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html><head><title>upldr</title></head>
<body>
<h1>upldr</h1>
<p>A small gateway that relays browser uploads to object storage.</p>
<p><a href="/upload">Upload a file</a></p>
</body></html>"#,
    )
}

pub async fn upload_form() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html><head><title>upldr - upload</title></head>
<body>
<h1>Upload</h1>
<form action="/upldr" method="post" enctype="multipart/form-data">
  <p><input type="file" name="upldr-file"></p>
  <p><input type="text" name="upldr-bucket" placeholder="bucket (optional)"></p>
  <p><input type="text" name="upldr-path" placeholder="path (optional)"></p>
  <p><input type="text" name="upldr-name" placeholder="name (optional)"></p>
  <p><button type="submit">Upload</button></p>
</form>
</body></html>"#,
    )
}

pub async fn success(Query(params): Query<OutcomeParams>) -> Html<String> {
    Html(outcome_page(
        "Success",
        &format!(
            "The request succeeded - code {}, status {}, message: {}",
            escape(&params.code),
            escape(&params.status),
            escape(&params.msg),
        ),
    ))
}

pub async fn fail(Query(params): Query<OutcomeParams>) -> Html<String> {
    Html(outcome_page(
        "Fail",
        &format!(
            "The request failed - code {}, status {}, message: {}",
            escape(&params.code),
            escape(&params.status),
            escape(&params.msg),
        ),
    ))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn outcome_page(title: &str, message: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><title>upldr - {title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n<p>{message}</p>\n\
         <p><a href=\"/upload\">Upload another file</a></p>\n</body></html>"
    )
}

/// Minimal HTML escaping for values interpolated from the query string.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("plain"), "plain");
    }
}
