//! Delivery channel
//!
//! Orders leave the storefront as a deep link into a chat application, with
//! the message carried in the `text` query parameter.

use std::io;

use thiserror::Error;
use tracing::info;
use url::Url;

use crate::checkout::CompletedOrder;

/// Default base link: the store's WhatsApp contact.
pub const DEFAULT_CHANNEL_URL: &str = "https://api.whatsapp.com/send/?phone=5582993862545&text&type=phone_number&app_absent=0&utm_source=ig";

const TEXT_PARAM: &str = "text";

/// Errors raised while delivering an order.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The configured base address is not a valid URL.
    #[error("invalid channel url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Writing the link failed.
    #[error("failed to write order link: {0}")]
    Io(#[from] io::Error),
}

/// Builds message deep links from a configured base address.
#[derive(Debug, Clone)]
pub struct DeepLink {
    base: Url,
}

impl DeepLink {
    /// Parse the base address.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidUrl`] if `base` does not parse.
    pub fn new(base: &str) -> Result<Self, ChannelError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    /// The base address links are derived from.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Link carrying `message` in its `text` parameter.
    ///
    /// An existing `text` parameter is replaced where it stands and any
    /// further `text` parameters are dropped; without one, it is appended.
    pub fn for_message(&self, message: &str) -> Url {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;

        for (key, value) in self.base.query_pairs() {
            if key == TEXT_PARAM {
                if !replaced {
                    pairs.push((key.into_owned(), message.to_string()));
                    replaced = true;
                }
            } else {
                pairs.push((key.into_owned(), value.into_owned()));
            }
        }

        if !replaced {
            pairs.push((TEXT_PARAM.to_string(), message.to_string()));
        }

        let mut url = self.base.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);

        url
    }
}

/// Somewhere completed orders are sent.
pub trait OrderChannel {
    /// Deliver a completed order.
    ///
    /// # Errors
    ///
    /// Returns a [`ChannelError`] if delivery fails.
    fn deliver(&mut self, order: &CompletedOrder<'_>) -> Result<(), ChannelError>;
}

/// Writes the order deep link, one per line, to any writer.
#[derive(Debug)]
pub struct LinkWriter<W> {
    link: DeepLink,
    out: W,
}

impl<W: io::Write> LinkWriter<W> {
    /// Create a writer for `link` that writes to `out`.
    pub fn new(link: DeepLink, out: W) -> Self {
        Self { link, out }
    }

    /// Consume the writer and return the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> OrderChannel for LinkWriter<W> {
    fn deliver(&mut self, order: &CompletedOrder<'_>) -> Result<(), ChannelError> {
        let url = self.link.for_message(order.message.text());

        writeln!(self.out, "{url}")?;
        self.out.flush()?;

        info!(host = url.host_str().unwrap_or_default(), "order link dispatched");

        Ok(())
    }
}
