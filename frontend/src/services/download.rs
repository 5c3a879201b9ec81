use shared::export::{Downloader, ExportArtifact, ExportError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Saves exports through a temporary object URL and a synthetic link click
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownloader;

fn js_error(context: &str, err: JsValue) -> ExportError {
    ExportError::Download(format!("{context}: {err:?}"))
}

impl Downloader for BrowserDownloader {
    fn download(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(&artifact.content));

        let props = BlobPropertyBag::new();
        props.set_type(artifact.mime_type);

        let blob = Blob::new_with_str_sequence_and_options(&parts, &props)
            .map_err(|e| js_error("Failed to create blob", e))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| js_error("Failed to create URL", e))?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Download("no document".to_string()))?;
        let link = document
            .create_element("a")
            .map_err(|e| js_error("Failed to create link", e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| js_error("Failed to cast link", e.into()))?;

        link.set_href(&url);
        link.set_download(&artifact.filename);
        link.click();

        Url::revoke_object_url(&url).map_err(|e| js_error("Failed to revoke URL", e))
    }
}
