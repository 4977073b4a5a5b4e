//! exodus-import 命令行入口
//! 无参数运行：读取 blocker-rules.json，拉取 Exodus 列表，写出 general.json

use anyhow::Context;
use tracing::error;
use tracing_subscriber::EnvFilter;

use exodus_import::{ConfigManager, ImportPipeline};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let pipeline = ImportPipeline::new(ConfigManager::get_default());
    let result = pipeline
        .run()
        .await
        .context("Exodus 规则导入失败");

    if let Err(e) = result {
        let kind = e
            .downcast_ref::<exodus_import::ExodusError>()
            .map(|inner| inner.kind().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        error!("[{}] {:#}", kind, e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
