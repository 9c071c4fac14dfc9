pub mod data_uri;
pub mod error;
pub mod link;
pub mod store;
pub mod types;

pub use data_uri::decode_data_uri;
pub use error::StoreError;
pub use link::{FileLink, download_link, encode_filename};
pub use store::UploadStore;
pub use types::UploadedFile;
