/// パケットイベント操作のTauriコマンド
///
/// 一覧の再読み込みは全てrun_reload()という単一の入口を通る。
/// マウント時・絞り込み変更・ページ変更・作成/更新/削除の成功シグナルの
/// いずれも同じ経路で再フェッチするため、ビューの状態が分岐することはない。
///
/// 絞り込み条件と一覧状態はViewStateとしてひとつのロックで守られており、
/// 条件の変更と再読み込みチケットの発行は同一クリティカルセクションで
/// 行われる。後から発行された条件が必ず新しいチケットを持つため、
/// コマンドが並行して割り込んでも表示は最後に発行された条件を反映する。
use crate::features::packet_events::client::PacketEventsClient;
use crate::features::packet_events::delete_confirm::DeleteConfirmation;
use crate::features::packet_events::editor::RecordDraft;
use crate::features::packet_events::list_state::{ListSnapshot, ViewState};
use crate::features::packet_events::models::{EventFilter, EventRecord};
use crate::shared::errors::{AppError, AppResult};
use log::{info, warn};
use std::sync::{Mutex, MutexGuard};
use tauri::State;

/// パケットイベント画面の管理状態
///
/// ロックはawaitをまたいで保持しない。ネットワーク待ちの間は
/// チケット（シーケンス番号）だけを持ち、結果の反映時に再取得する。
#[derive(Default)]
pub struct PacketEventsState {
    pub view: Mutex<ViewState>,
    pub pending_delete: Mutex<DeleteConfirmation>,
}

/// ロック取得のヘルパー（ポイズンされたロックはエラーに変換）
fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e| AppError::concurrency(format!("状態ロックの取得に失敗しました: {e}")))
}

/// 一覧再読み込みの単一の入口
///
/// 条件とチケットは呼び出し側がViewStateのクリティカルセクション内で
/// 取得済みのものを渡す。失敗時は直前の一覧を保持したままIdleへ戻り、
/// エラーを返す。
async fn run_reload(
    state: &PacketEventsState,
    client: &PacketEventsClient,
    filter: EventFilter,
    seq: u64,
) -> AppResult<ListSnapshot> {
    match client.list(&filter).await {
        Ok(page) => {
            let mut view = lock(&state.view)?;
            view.apply_success(seq, page);
            Ok(view.snapshot())
        }
        Err(e) => {
            lock(&state.view)?.apply_failure(seq);
            warn!("一覧の再読み込みに失敗しました: {}", e.details());
            Err(e)
        }
    }
}

/// 現在の条件のまま再読み込みする（マウント時と変更成功シグナルで使用）
async fn reload_current_view(
    state: &PacketEventsState,
    client: &PacketEventsClient,
) -> AppResult<ListSnapshot> {
    let (filter, seq) = lock(&state.view)?.begin_reload();
    run_reload(state, client, filter, seq).await
}

/// 現在の絞り込み条件で一覧を再読み込みする（初回マウント時にも使用）
#[tauri::command]
pub async fn reload_packet_events(
    state: State<'_, PacketEventsState>,
) -> Result<ListSnapshot, String> {
    let client = PacketEventsClient::new()?;
    reload_current_view(&state, &client).await.map_err(Into::into)
}

/// 検索条件を変更して一覧を再読み込みする
///
/// # 引数
/// * `event_name` - 名称の部分一致フィルター（オプション）
/// * `department` - 部署フィルター（オプション）
#[tauri::command]
pub async fn search_packet_events(
    event_name: Option<String>,
    department: Option<String>,
    state: State<'_, PacketEventsState>,
) -> Result<ListSnapshot, String> {
    info!("パケットイベント検索: event_name={event_name:?}, department={department:?}");
    let client = PacketEventsClient::new()?;

    // 条件変更とチケット発行を不可分に行う
    let (filter, seq) = lock(&state.view)?.set_criteria(event_name, department);
    run_reload(&state, &client, filter, seq).await.map_err(Into::into)
}

/// ページネーションを変更して一覧を再読み込みする
#[tauri::command]
pub async fn change_packet_events_page(
    page: u64,
    size: u64,
    state: State<'_, PacketEventsState>,
) -> Result<ListSnapshot, String> {
    let client = PacketEventsClient::new()?;

    let (filter, seq) = lock(&state.view)?.set_page(page, size);
    run_reload(&state, &client, filter, seq).await.map_err(Into::into)
}

/// パケットイベントを作成する
///
/// バリデーションに失敗した場合はネットワークに到達せず、ドラフトは
/// 呼び出し側（エディタ）に保持されたままエラーメッセージが返る。
/// 成功時は単一の再読み込み経路で一覧を更新する。
///
/// # 戻り値
/// 作成されたレコード、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn create_packet_event(
    draft: RecordDraft,
    state: State<'_, PacketEventsState>,
) -> Result<EventRecord, String> {
    let client = PacketEventsClient::new()?;

    // ローカルバリデーション（失敗時はここで終了）
    let payload = draft.create_payload(client.link_mode())?;

    let record = client.create(&payload).await?;

    // 作成自体は成功しているため、再読み込みの失敗でコマンドは失敗させない
    if let Err(e) = reload_current_view(&state, &client).await {
        warn!("作成後の再読み込みに失敗しました: {}", e.details());
    }

    Ok(record)
}

/// パケットイベントを更新する
///
/// # 引数
/// * `id` - 更新対象のレコードID
/// * `draft` - 編集済みドラフト
#[tauri::command]
pub async fn update_packet_event(
    id: String,
    draft: RecordDraft,
    state: State<'_, PacketEventsState>,
) -> Result<EventRecord, String> {
    info!("パケットイベント更新処理開始: id={id}");
    let client = PacketEventsClient::new()?;

    let payload = draft.update_payload(client.link_mode())?;

    let record = client.update(&id, &payload).await?;

    if let Err(e) = reload_current_view(&state, &client).await {
        warn!("更新後の再読み込みに失敗しました: {}", e.details());
    }

    Ok(record)
}

/// レコードを削除保留にし、確認プロンプトを開く
#[tauri::command]
pub fn request_packet_event_delete(
    record: EventRecord,
    state: State<'_, PacketEventsState>,
) -> Result<(), String> {
    lock(&state.pending_delete)?.request(record);
    Ok(())
}

/// 削除確認をキャンセルする（リクエストは発行されない）
#[tauri::command]
pub fn cancel_packet_event_delete(state: State<'_, PacketEventsState>) -> Result<(), String> {
    lock(&state.pending_delete)?.cancel();
    Ok(())
}

/// 保留中の削除を確定する
///
/// 削除成功時のみ一覧を再読み込みする。失敗時は行をそのまま残す
/// （楽観的な削除表示は行わない）。
#[tauri::command]
pub async fn confirm_packet_event_delete(
    state: State<'_, PacketEventsState>,
) -> Result<ListSnapshot, String> {
    let id = lock(&state.pending_delete)?
        .confirm()
        .ok_or_else(|| AppError::validation("削除対象のレコードがありません"))?;

    info!("パケットイベント削除処理開始: id={id}");
    let client = PacketEventsClient::new()?;
    client.delete(&id).await?;

    reload_current_view(&state, &client).await.map_err(Into::into)
}
