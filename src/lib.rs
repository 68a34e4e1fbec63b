// 機能モジュール構造
pub mod features;
pub mod shared;

use features::departments::api_commands as department_commands;
use features::packet_events::api_commands as packet_event_commands;
use features::packet_events::PacketEventsState;
use log::{info, warn};
use shared::config::environment::{
    initialize_logging_system, load_environment_variables, EnvironmentConfig,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|_app| {
            // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
            load_environment_variables();

            // ログシステムを初期化（.envファイル読み込み後）
            initialize_logging_system();

            info!("アプリケーション初期化を開始します...");

            // API設定を検証（失敗時は起動を中断）
            let api_config = shared::config::environment::ApiConfig::from_env()
                .map_err(|e| format!("API設定の読み込みに失敗しました: {e}"))?;
            api_config
                .validate()
                .map_err(|e| format!("API設定が不正です: {e}"))?;

            // 本番環境でlocalhostを指している場合は設定ミスの可能性が高い
            let env_config = EnvironmentConfig::from_env();
            if env_config.is_production() && api_config.is_localhost() {
                warn!(
                    "本番環境でlocalhostのAPIサーバーが設定されています: {}",
                    api_config.base_url
                );
            }

            info!("アプリケーション初期化が完了しました");
            Ok(())
        })
        .manage(PacketEventsState::default())
        .invoke_handler(tauri::generate_handler![
            packet_event_commands::reload_packet_events,
            packet_event_commands::search_packet_events,
            packet_event_commands::change_packet_events_page,
            packet_event_commands::create_packet_event,
            packet_event_commands::update_packet_event,
            packet_event_commands::request_packet_event_delete,
            packet_event_commands::cancel_packet_event_delete,
            packet_event_commands::confirm_packet_event_delete,
            department_commands::get_departments,
            department_commands::get_department_events,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
