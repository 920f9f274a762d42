use std::path::Path;

use axum::extract::State;
use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::http::{Method, StatusCode};
use axum::response::Redirect;
use bytes::Bytes;
use tracing::{error, info};

use crate::AppState;
use crate::models::{Outcome, UploadTarget};
use crate::utils::sniff::detect_content_type;

/// Form field names posted by the upload page.
const FILE_FIELD: &str = "upldr-file";
const BUCKET_FIELD: &str = "upldr-bucket";
const PATH_FIELD: &str = "upldr-path";
const NAME_FIELD: &str = "upldr-name";

/// Relay one browser upload to object storage.
///
/// Every path out of this handler is a see-other redirect to the configured
/// success or failure page with the outcome in the query string; it never
/// answers with a bare error status.
pub async fn relay_upload(
    method: Method,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Redirect {
    let outcome = handle(method, &state, multipart).await;
    let base = if outcome.is_success() {
        &state.config.success_url
    } else {
        &state.config.fail_url
    };
    let url = outcome.redirect_url(base);
    info!("redirecting: {}", url);
    Redirect::to(&url)
}

async fn handle(
    method: Method,
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Outcome {
    if method != Method::POST {
        return Outcome::new(StatusCode::METHOD_NOT_ALLOWED, "Must be a POST request");
    }

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return Outcome::new(
                StatusCode::BAD_REQUEST,
                format!("could not parse multipart form: {}", rejection.body_text()),
            );
        }
    };

    // Drain the whole form first so overrides apply regardless of field
    // order, then stage under the resolved name.
    let form = match UploadForm::read(&mut multipart).await {
        Ok(form) => form,
        Err(outcome) => return outcome,
    };

    let Some((original_name, data)) = form.file else {
        return Outcome::new(
            StatusCode::BAD_REQUEST,
            format!(
                "no file posted: the {FILE_FIELD} field is required. \
                 Maybe use some js to make sure a file is selected."
            ),
        );
    };

    let target = UploadTarget::resolve(
        &state.config.default_bucket,
        &original_name,
        form.bucket,
        form.path,
        form.name,
    );
    info!(
        "upload target: bucket={} path={} name={}",
        target.bucket, target.path, target.name
    );

    let staged = match state.stager.stage(&target.name, &data[..]).await {
        Ok(staged) => staged,
        Err(err) => {
            error!("staging failed: {}", err);
            return Outcome::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };
    info!(
        "uploaded file '{}' staged as '{}' - length: {}",
        original_name, target.name, staged.bytes_written
    );

    if !state.config.credentials_ok() {
        return Outcome::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "bad credentials: access key or secret key is blank",
        );
    }

    // Read the staged copy back; its metadata supplies the content length.
    let (payload, content_length) = match read_staged(&staged.path).await {
        Ok(pair) => pair,
        Err(err) => {
            error!("could not read staged file back: {}", err);
            return Outcome::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("err opening file: {err}"),
            );
        }
    };

    let content_type = detect_content_type(&payload);
    let key = target.key();
    let result = state
        .storage
        .put_object(&target.bucket, &key, payload, content_length, &content_type)
        .await;

    // The staged copy is no longer needed once the put attempt has run.
    staged.remove().await;

    match result {
        Ok(()) => {
            info!("put_object ok: {}:{} ({})", target.bucket, key, content_type);
            Outcome::new(
                StatusCode::OK,
                format!("Uploaded to {}:{}", target.bucket, key),
            )
        }
        Err(err) => {
            error!("put_object failed: {:#}", err);
            Outcome::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("bad response: {err}"),
            )
        }
    }
}

struct UploadForm {
    file: Option<(String, Bytes)>,
    bucket: Option<String>,
    path: Option<String>,
    name: Option<String>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, Outcome> {
        let mut form = Self {
            file: None,
            bucket: None,
            path: None,
            name: None,
        };

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    return Err(Outcome::new(
                        StatusCode::BAD_REQUEST,
                        format!("could not parse multipart form: {err}"),
                    ));
                }
            };

            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                FILE_FIELD => {
                    let original_name = field.file_name().unwrap_or("unnamed").to_string();
                    let data = field.bytes().await.map_err(|err| {
                        Outcome::new(
                            StatusCode::BAD_REQUEST,
                            format!("could not read the {FILE_FIELD} field: {err}"),
                        )
                    })?;
                    form.file = Some((original_name, data));
                }
                BUCKET_FIELD => form.bucket = Some(text(field).await?),
                PATH_FIELD => form.path = Some(text(field).await?),
                NAME_FIELD => form.name = Some(text(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn text(field: Field<'_>) -> Result<String, Outcome> {
    field.text().await.map_err(|err| {
        Outcome::new(
            StatusCode::BAD_REQUEST,
            format!("could not read form field: {err}"),
        )
    })
}

async fn read_staged(path: &Path) -> std::io::Result<(Vec<u8>, i64)> {
    let metadata = tokio::fs::metadata(path).await?;
    let payload = tokio::fs::read(path).await?;
    Ok((payload, metadata.len() as i64))
}
