use bytes::Bytes;

/// A file held in the upload store: its original name and decoded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename, unique within the upload directory.
    pub name: String,
    /// The decoded file content.
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
