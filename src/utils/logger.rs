// 日誌工具
// 日誌寫到 stderr；TUI 模式下預設只輸出錯誤，避免干擾畫面

pub fn init_logger(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };

    // 測試或重複初始化時忽略錯誤
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init();
}
