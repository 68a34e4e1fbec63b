/// 共通ユーティリティモジュール
pub mod field_id;
