use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::AppError;

/// `HttpTransport` backed by the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let window = web_sys::window().ok_or_else(|| AppError::Network("No window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = &request.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &opts).map_err(network_error)?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(network_error)?;
        }

        let response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(network_error)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| AppError::Network("fetch did not return a Response".to_string()))?;

        let buffer = JsFuture::from(response.array_buffer().map_err(network_error)?)
            .await
            .map_err(network_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| "Unknown error".to_string())
}

fn network_error(value: JsValue) -> AppError {
    AppError::Network(js_error_message(&value))
}
