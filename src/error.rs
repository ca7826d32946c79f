use crate::screen::Notice;

/// Failures talking to the persistent key-value store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Sled(#[from] sled::Error),
    #[error("stored value could not be (de)serialised: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("stored value under {key:?} is not valid utf-8")]
    Encoding {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

#[derive(thiserror::Error, Debug)]
pub enum CheckoutError {
    #[error("Your cart is empty. Add items before checkout.")]
    EmptyCart,
    #[error("failed to generate an order id: {0}")]
    OrderId(#[from] OrderIdError),
}

#[derive(thiserror::Error, Debug)]
pub enum OrderIdError {
    #[error("invalid human readable prefix: {0}")]
    Hrp(#[from] bech32::primitives::hrp::Error),
    #[error("bech32 encoding failed: {0}")]
    Encode(#[from] bech32::EncodeError),
}

impl CheckoutError {
    /// The notice shown to the user when checkout is refused.
    pub fn notice(&self) -> Notice {
        match self {
            CheckoutError::EmptyCart => Notice::empty_cart(),
            CheckoutError::OrderId(_) => Notice::new("Checkout Failed", self.to_string()),
        }
    }
}
