/// 部署・イベント参照機能モジュール
///
/// パケットイベントのエディタが必要とする参照データ
/// （部署一覧、部署ごとの公開イベント一覧）を提供します。
pub mod api_commands;
pub mod models;

// 公開インターフェース
pub use api_commands::{get_department_events, get_departments};
pub use models::{Department, EventOption};
