/// 機能別モジュール
///
/// このモジュールは、アプリケーションの機能を機能別に整理したモジュール群を提供します。
/// 各機能モジュールは、その機能に関連するすべてのコード（モデル、コマンド、クライアント、状態管理）
/// を含む自己完結型のユニットです。
// 機能モジュールの宣言
pub mod departments;
pub mod packet_events;
