//! Image selection for the note form.

use store::{BackendError, ImagePicker, PickedImages};

/// An [`ImagePicker`] fed from a text field of whitespace-separated image URLs.
/// An empty field counts as cancelling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlPicker {
    input: String,
}

impl UrlPicker {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl ImagePicker for UrlPicker {
    async fn pick_images(&self) -> Result<PickedImages, BackendError> {
        let uris: Vec<String> = self.input.split_whitespace().map(str::to_string).collect();
        if uris.is_empty() {
            Ok(PickedImages::Cancelled)
        } else {
            Ok(PickedImages::Selected(uris))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_input_cancels() {
        assert_eq!(UrlPicker::new("  ").pick_images().await, Ok(PickedImages::Cancelled));
    }

    #[tokio::test]
    async fn test_splits_urls() {
        let picked = UrlPicker::new("https://a/1.jpg\n https://a/2.jpg").pick_images().await;
        assert_eq!(
            picked,
            Ok(PickedImages::Selected(vec![
                "https://a/1.jpg".to_string(),
                "https://a/2.jpg".to_string()
            ]))
        );
    }
}
