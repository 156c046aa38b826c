//! Uploads Module
//!
//! Storage for profile pictures and chat image attachments.
//!
//! - **`store`** - `ImageStore` trait, the local filesystem implementation
//!   and data URI decoding

/// Image store trait and implementations
pub mod store;

pub use store::{
    discard, is_data_uri, ImageStore, LocalImageStore, StoredImage, UploadError, AVATARS_FOLDER,
    CHAT_IMAGES_FOLDER,
};
