//! 程式啟動時的全域初始化

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Once;

/// 日誌檔名
pub const LOG_FILE_NAME: &str = "pipeline.log";

static INIT: Once = Once::new();

/// 同時寫到 stderr 與日誌檔
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// 設定日誌，整個行程只會生效一次
///
/// 預設等級為 info，可用 `RUST_LOG` 覆寫。給定 `log_dir` 時另外寫入 `<log_dir>/pipeline.log`
pub fn init_logging(log_dir: Option<&Path>) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.module_path().unwrap_or("-"),
                record.args()
            )
        });

        if let Some(file) = log_dir.and_then(open_log_file) {
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
        }

        if let Err(e) = builder.try_init() {
            eprintln!("無法初始化日誌: {e}");
        }
    });
}

fn open_log_file(log_dir: &Path) -> Option<File> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("無法建立日誌資料夾 {}: {e}", log_dir.display());
        return None;
    }

    let path = log_dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| eprintln!("無法開啟日誌檔 {}: {e}", path.display()))
        .ok()
}
