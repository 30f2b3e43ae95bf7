use crate::core::encoding::OutputStyle;
use crate::domain::model::{ActionDocument, Axis, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, used in logs and errors.
    fn display_path(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn base_dir(&self) -> &str;
    fn base_name(&self) -> &str;
    fn axis_key(&self, axis: Axis) -> &str;
    fn strict_keys(&self) -> bool;
    fn output_style(&self) -> OutputStyle;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ActionDocument>;
    async fn transform(&self, document: ActionDocument) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
