use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::api::fetch::js_error_message;
use crate::api::types::GeneratedForm;
use crate::api::{ApiClient, HttpTransport};
use crate::error::AppError;
use crate::session::{SessionProgress, FORM_GENERATION_THRESHOLD};

pub const PDF_MIME: &str = "application/pdf";

/// Hands a finished file to the user.
pub trait FileSaver {
    fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), AppError>;
}

/// Saves through a temporary object URL and a hidden `<a download>` click.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

impl FileSaver for BrowserDownload {
    fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), AppError> {
        let js_err = |e: wasm_bindgen::JsValue| AppError::Download(js_error_message(&e));

        let window = web_sys::window().ok_or_else(|| AppError::Download("No window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| AppError::Download("No document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| AppError::Download("No document body".to_string()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| AppError::Download("Could not create link".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.set_hidden(true);

        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        let removed = body.remove_child(&anchor).map(|_| ());
        let revoked = Url::revoke_object_url(&url);
        removed.and(revoked).map_err(js_err)
    }
}

/// Name the saved PDF after the visa type and form id.
pub fn download_filename(form: &GeneratedForm) -> String {
    let visa = if form.visa_type.trim().is_empty() {
        "form".to_string()
    } else {
        sanitize_component(&form.visa_type)
    };
    format!("USCIS_{}_{}.pdf", visa, sanitize_component(&form.form_id))
}

fn sanitize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Ask the backend to fill the USCIS form for `session`.
///
/// Refuses locally, without a request, while the session is below the
/// generation threshold.
pub async fn generate_form<T: HttpTransport>(
    client: &ApiClient<T>,
    session: &SessionProgress,
) -> Result<GeneratedForm, String> {
    if !session.can_generate_form() {
        return Err(format!(
            "Complete at least {}% of your application to generate the form",
            FORM_GENERATION_THRESHOLD
        ));
    }

    let form = client
        .generate_form(&session.id)
        .await
        .map_err(|e| e.user_message("Form generation failed. Please try again."))?;
    log::info!("Generated {} form {} for session {}", form.form_type, form.form_id, session.id);
    Ok(form)
}

/// Fetch the PDF for `form` and save it once. Returns the filename used.
pub async fn download_form<T: HttpTransport, F: FileSaver>(
    client: &ApiClient<T>,
    saver: &F,
    form: &GeneratedForm,
) -> Result<String, String> {
    let bytes = client
        .download_form(&form.form_id)
        .await
        .map_err(|e| e.user_message("Download failed. Please try again."))?;
    if bytes.is_empty() {
        return Err("The generated form was empty".to_string());
    }

    let filename = download_filename(form);
    saver
        .save(&filename, &bytes, PDF_MIME)
        .map_err(|e| e.user_message("Could not save the file"))?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::http::Method;
    use crate::api::mock::MockTransport;

    #[derive(Default)]
    struct RecordingSaver {
        saved: RefCell<Vec<(String, usize, String)>>,
    }

    impl FileSaver for RecordingSaver {
        fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), AppError> {
            self.saved
                .borrow_mut()
                .push((filename.to_string(), bytes.len(), mime.to_string()));
            Ok(())
        }
    }

    fn session(pct: u8) -> SessionProgress {
        SessionProgress {
            id: "sess-7".to_string(),
            visa_type: "H1-B".to_string(),
            completion_percentage: pct,
            answers: BTreeMap::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn form(visa: &str, id: &str) -> GeneratedForm {
        GeneratedForm {
            form_id: id.to_string(),
            visa_type: visa.to_string(),
            form_type: "I-129".to_string(),
            completion_percentage: 80,
            generated_at: None,
            download_url: None,
        }
    }

    #[test]
    fn test_filename_from_visa_and_id() {
        assert_eq!(download_filename(&form("H1-B", "f-123")), "USCIS_H1-B_f-123.pdf");
        assert_eq!(download_filename(&form("B1/B2", "a b")), "USCIS_B1_B2_a_b.pdf");
        assert_eq!(download_filename(&form("", "9")), "USCIS_form_9.pdf");
    }

    #[test]
    fn test_generate_refused_below_threshold() {
        let client = ApiClient::new(MockTransport::new(), "");
        let err = block_on(generate_form(&client, &session(49))).unwrap_err();
        assert!(err.contains("50%"));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_generate_then_download_saves_once() {
        let client = ApiClient::new(MockTransport::new(), "").with_token(Some("tok".to_string()));
        client.transport().push_json(
            200,
            json!({"form": {
                "form_id": "f-123",
                "visa_type": "H1-B",
                "form_type": "I-129",
                "completion_percentage": 75,
                "generated_at": "2026-10-01T09:30:00Z",
                "download_url": "/api/owl-agent/download-form/f-123"
            }}),
        );
        client.transport().push_raw(200, b"%PDF-1.7 fake".to_vec());
        let saver = RecordingSaver::default();

        let generated = block_on(generate_form(&client, &session(50))).unwrap();
        let filename = block_on(download_form(&client, &saver, &generated)).unwrap();

        assert_eq!(filename, "USCIS_H1-B_f-123.pdf");
        let saved = saver.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], ("USCIS_H1-B_f-123.pdf".to_string(), 13, PDF_MIME.to_string()));

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "/api/owl-agent/generate-uscis-form");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"session_id":"sess-7"}"#));
        assert_eq!(sent[1].method, Method::Get);
        assert_eq!(sent[1].url, "/api/owl-agent/download-form/f-123");
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok"));
        assert_eq!(sent[1].header_value("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_failed_download_saves_nothing() {
        let client = ApiClient::new(MockTransport::new(), "");
        client
            .transport()
            .push_json(404, json!({"detail": "Form not found"}));
        let saver = RecordingSaver::default();

        let err = block_on(download_form(&client, &saver, &form("F1", "gone"))).unwrap_err();

        assert_eq!(err, "Form not found");
        assert!(saver.saved.borrow().is_empty());
    }

    #[test]
    fn test_empty_pdf_is_an_error() {
        let client = ApiClient::new(MockTransport::new(), "");
        client.transport().push_raw(200, Vec::new());
        let saver = RecordingSaver::default();

        assert!(block_on(download_form(&client, &saver, &form("F1", "x"))).is_err());
        assert!(saver.saved.borrow().is_empty());
    }
}
