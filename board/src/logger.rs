use flexi_logger::{detailed_format, Cleanup, Criterion, FileSpec, Logger, Naming};
use std::path::Path;

const LOG_BASENAME: &str = "board";
const TAIL_LINES: usize = 200;

pub fn setup_logging(
    app_data_dir: &Path,
    level: &str,
) -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
    let log_dir = app_data_dir.join("logs");
    let file_spec = FileSpec::default().directory(log_dir).basename(LOG_BASENAME);

    Logger::try_with_str(level)?
        .log_to_file(file_spec)
        .format_for_files(detailed_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(1),
        )
        .duplicate_to_stderr(if cfg!(debug_assertions) {
            flexi_logger::Duplicate::Info
        } else {
            flexi_logger::Duplicate::None
        })
        .start()
}

pub async fn read_logs(app_data_dir: &Path) -> String {
    let log_path = app_data_dir
        .join("logs")
        .join(format!("{}_rCURRENT.log", LOG_BASENAME));
    match tokio::fs::read_to_string(log_path).await {
        Ok(content) => tail(&content, TAIL_LINES),
        Err(e) => format!("Failed to read log file: {}", e),
    }
}

fn tail(content: &str, count: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
