use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::invoice::{
  ChannelKind, InvoiceError, MessagingChannel, MessagingReceipt,
};

lazy_static! {
  static ref NON_DIGITS: Regex = Regex::new(r"[^0-9]").expect("valid regex");
}

/// WhatsApp chat deep links (`https://wa.me/<number>?text=<body>`).
///
/// Assisted delivery: the link is opened for the user, who confirms the send
/// inside the chat app. A success therefore means "chat opened with the
/// message prefilled", never "message delivered".
pub struct WhatsAppChannel {
  country_code: String,
}

impl WhatsAppChannel {
  pub fn new(country_code: impl Into<String>) -> Self {
    Self {
      country_code: country_code.into(),
    }
  }

  /// Keeps digits only and strips a single leading zero, the local-dialing
  /// prefix the country code replaces.
  fn normalize_phone(&self, raw: &str) -> String {
    let digits = NON_DIGITS.replace_all(raw, "");
    digits
      .strip_prefix('0')
      .map(str::to_string)
      .unwrap_or_else(|| digits.into_owned())
  }

  fn deep_link(&self, phone: &str, body: &str) -> String {
    format!(
      "https://wa.me/{}{}?text={}",
      self.country_code,
      phone,
      urlencoding::encode(body)
    )
  }
}

#[async_trait]
impl MessagingChannel for WhatsAppChannel {
  async fn open_chat(&self, phone: &str, body: &str) -> Result<MessagingReceipt, InvoiceError> {
    let normalized = self.normalize_phone(phone);
    if normalized.is_empty() {
      return Err(InvoiceError::channel(
        ChannelKind::Messaging,
        "phone number has no digits",
      ));
    }

    let deep_link = self.deep_link(&normalized, body);
    tracing::info!(%deep_link, "opening chat deep link");
    Ok(MessagingReceipt { deep_link })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn channel() -> WhatsAppChannel {
    WhatsAppChannel::new("91")
  }

  #[tokio::test]
  async fn test_single_leading_zero_is_stripped() {
    let receipt = channel().open_chat("09876543210", "hello").await.unwrap();
    assert!(receipt.deep_link.starts_with("https://wa.me/919876543210?text="));
  }

  #[tokio::test]
  async fn test_only_one_leading_zero_is_stripped() {
    let receipt = channel().open_chat("009876", "hello").await.unwrap();
    assert!(receipt.deep_link.starts_with("https://wa.me/9109876?text="));
  }

  #[tokio::test]
  async fn test_formatting_characters_are_dropped() {
    let receipt = channel()
      .open_chat("(0) 98765-43210", "hello")
      .await
      .unwrap();
    assert!(receipt.deep_link.starts_with("https://wa.me/919876543210?text="));
  }

  #[tokio::test]
  async fn test_message_body_is_url_encoded() {
    let receipt = channel()
      .open_chat("9876543210", "Hi Asha, invoice #5 & more")
      .await
      .unwrap();
    assert_eq!(
      receipt.deep_link,
      "https://wa.me/919876543210?text=Hi%20Asha%2C%20invoice%20%235%20%26%20more"
    );
  }

  #[tokio::test]
  async fn test_digitless_phone_is_a_channel_error() {
    let result = channel().open_chat("n/a", "hello").await;
    assert!(matches!(
      result,
      Err(InvoiceError::ChannelDelivery {
        channel: ChannelKind::Messaging,
        ..
      })
    ));
  }
}
