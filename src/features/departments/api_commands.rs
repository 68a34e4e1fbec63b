/// 部署・イベント参照のTauriコマンド
///
/// エディタの依存選択（部署 → その部署のイベント）のための参照系コマンド。
use crate::features::departments::models::{
    into_event_options, Department, DepartmentsResponse, EventOption, WireDepartmentEvent,
};
use crate::shared::api_client::ApiClient;
use log::info;

/// 部署一覧を取得する
///
/// # 戻り値
/// 部署一覧、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn get_departments() -> Result<Vec<Department>, String> {
    let api_client = ApiClient::new()?;

    let response: DepartmentsResponse = api_client.get("/departments").await?;
    let departments = response.into_departments();

    info!("部署一覧取得成功: count={}", departments.len());
    Ok(departments)
}

/// 指定した部署の公開イベント一覧を取得する
///
/// idまたはtitleを欠くイベントは選択肢から除外される。
///
/// # 引数
/// * `department_id` - 部署ID
#[tauri::command]
pub async fn get_department_events(department_id: String) -> Result<Vec<EventOption>, String> {
    let api_client = ApiClient::new()?;

    let endpoint = format!(
        "/events/public/{}",
        urlencoding::encode(&department_id)
    );
    let events: Vec<WireDepartmentEvent> = api_client.get(&endpoint).await?;
    let options = into_event_options(events);

    info!(
        "公開イベント一覧取得成功: department_id={department_id}, count={}",
        options.len()
    );
    Ok(options)
}
