/// 設定管理モジュール
///
/// 環境変数の読み込み、ログシステムの初期化、API設定の管理を提供します。
pub mod environment;
