/// 共有モジュール
///
/// アプリケーション全体で使用される共通機能（APIクライアント、設定、
/// エラー型、ユーティリティ）を提供します。
pub mod api_client;
pub mod config;
pub mod errors;
pub mod utils;
