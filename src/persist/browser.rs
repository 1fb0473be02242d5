use js_sys::Array;
use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Storage, Url};

use super::{ArchitectureFile, StorageError};
use crate::config::STORAGE_KEY;
use crate::graph::GraphStore;

fn storage() -> Result<Storage, StorageError> {
	web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.ok_or(StorageError::Unavailable)
}

/// Writes the diagram to `localStorage`.
pub fn save_to_storage(store: &GraphStore) -> Result<(), StorageError> {
	let json = serde_json::to_string(&ArchitectureFile::from_store(store))?;
	storage()?
		.set_item(STORAGE_KEY, &json)
		.map_err(|_| StorageError::Write)?;
	info!("saved {} nodes to local storage", store.nodes().len());
	Ok(())
}

/// Reads the diagram saved by [`save_to_storage`], if there is one.
pub fn load_saved() -> Result<Option<ArchitectureFile>, StorageError> {
	saved_document(storage()?.get_item(STORAGE_KEY))
}

/// Turns a raw `getItem` result into the saved document. A refused read
/// (e.g. a security error) counts as unavailable storage, not as "nothing saved".
fn saved_document<E>(read: Result<Option<String>, E>) -> Result<Option<ArchitectureFile>, StorageError> {
	let Some(text) = read.map_err(|_| StorageError::Unavailable)? else {
		debug!("nothing saved under {STORAGE_KEY}");
		return Ok(None);
	};
	Ok(Some(ArchitectureFile::parse(&text)?))
}

/// Offers `text` to the user as a JSON download named `file_name`.
pub fn download_json(file_name: &str, text: &str) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let bag = BlobPropertyBag::new();
	bag.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&Array::of1(&JsValue::from_str(text)), &bag)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

/// Reads a picked file as UTF-8 text.
pub async fn read_file_text(file: File) -> Result<String, JsValue> {
	let text = JsFuture::from(file.text()).await?;
	text.as_string()
		.ok_or_else(|| JsValue::from_str("file contents are not text"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn refused_read_is_unavailable() {
		let err = saved_document(Err(())).unwrap_err();
		assert!(matches!(err, StorageError::Unavailable));
	}

	#[test]
	fn missing_key_is_nothing_saved() {
		assert!(saved_document::<()>(Ok(None)).unwrap().is_none());
	}

	#[test]
	fn stored_text_is_parsed() {
		let doc = saved_document::<()>(Ok(Some(r#"{"nodes":[],"edges":[]}"#.into())))
			.unwrap()
			.unwrap();
		assert!(doc.nodes.is_empty());

		let err = saved_document::<()>(Ok(Some("{".into()))).unwrap_err();
		assert!(matches!(err, StorageError::Corrupt(_)));
	}
}
