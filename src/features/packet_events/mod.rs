/// パケットイベント（支払いタイプ）機能モジュール
///
/// このモジュールは、パケットイベント管理に関連するすべての機能を提供します：
/// - リモートコレクションに対する一覧取得・作成・更新・削除
/// - ワイヤ形式の揺れを吸収する正規化境界
/// - 絞り込み・ページネーションと一覧状態の整合（古いレスポンスの破棄）
/// - 作成・編集ドラフトのバリデーション
/// - 削除確認の二段階コミット
pub mod api_commands;
pub mod client;
pub mod delete_confirm;
pub mod editor;
pub mod list_state;
pub mod models;

// 公開インターフェース
pub use api_commands::{
    cancel_packet_event_delete, change_packet_events_page, confirm_packet_event_delete,
    create_packet_event, reload_packet_events, request_packet_event_delete,
    search_packet_events, update_packet_event, PacketEventsState,
};

pub use client::PacketEventsClient;
pub use delete_confirm::DeleteConfirmation;
pub use editor::{RecordDraft, NO_FIXED_PRICE_SENTINEL};
pub use list_state::{ListSnapshot, ListState, ViewState};
pub use models::{
    CustomField, CustomFieldType, EventFilter, EventPayload, EventRecord, ListPage,
};
