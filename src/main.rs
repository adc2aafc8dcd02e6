mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;


use config::AppConfig;

fn main() {
    let config = match AppConfig::resolve() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("無法取得設定：{err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = dioxus::logger::init(config.log_level) {
        eprintln!("failed to initialize logger: {err}");
    }

    let webview_data_dir = match config.webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!("failed to prepare webview data dir: {err:#}");
            std::process::exit(1);
        }
    };
    tracing::info!(db_path = %config.db_path.display(), "starting vidtable");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("影片管理"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(app::App);
}
