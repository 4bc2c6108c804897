use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Input file, relative to the storage root.
    fn input_path(&self) -> &str;
    fn delimiter(&self) -> u8;
    /// Export directory; `None` disables export.
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

/// Existence lookup used for foreign-key checks against the person registry.
pub trait PersonDirectory {
    fn exists(&self, document: &str) -> bool;
}
