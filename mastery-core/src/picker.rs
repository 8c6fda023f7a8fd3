use async_trait::async_trait;

use crate::{CardForm, CoreError, DeckForm, ImageTarget};

/// Something that can hand back picture bytes, e.g. a photo picker or a file.
///
/// `Ok(None)` means the user backed out without choosing.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn request_image(&self) -> Result<Option<Vec<u8>>, CoreError>;
}

/// Asks `source` for an image. Failures are logged and treated as "nothing picked".
pub async fn fetch_image<S: ImageSource + ?Sized>(source: &S) -> Option<Vec<u8>> {
    match source.request_image().await {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(error = %e, "image request failed, ignoring");
            None
        }
    }
}

/// Loads an image into the named side of a card form. Returns whether anything was set.
pub async fn load_card_image<S: ImageSource + ?Sized>(
    source: &S,
    form: &mut CardForm,
    target: ImageTarget,
) -> bool {
    match fetch_image(source).await {
        Some(data) => {
            form.set_image(target, data);
            true
        }
        None => false,
    }
}

pub async fn load_deck_image<S: ImageSource + ?Sized>(source: &S, form: &mut DeckForm) -> bool {
    match fetch_image(source).await {
        Some(data) => {
            form.set_image(data);
            true
        }
        None => false,
    }
}
