/// パケットイベントコレクションのリモートクライアント
///
/// 汎用APIクライアントの上に、コレクションエンドポイントへの
/// list/create/update/deleteを提供する。フェッチ直後にワイヤ形式を
/// 正規化し、UI層には正規形だけを渡す。
use crate::features::packet_events::models::{
    EventFilter, EventPayload, EventRecord, ListPage, ListResponse, WireEventRecord,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppError;
use log::info;

pub struct PacketEventsClient {
    api: ApiClient,
}

impl PacketEventsClient {
    /// 環境設定からクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new()?,
        })
    }

    /// 既存のAPIクライアントを包む（テスト・再利用のため）
    pub fn with_api(api: ApiClient) -> Self {
        Self { api }
    }

    /// コレクションのベースパスを取得
    fn collection_path(&self) -> &str {
        &self.api.config().packet_events_path
    }

    /// 部署との紐付けモードを取得
    pub fn link_mode(&self) -> crate::shared::config::environment::DepartmentLinkMode {
        self.api.config().department_link
    }

    /// 絞り込み条件に従って一覧を取得する
    ///
    /// 該当レコードが無い場合は空ページが返る（エラーにはならない）。
    pub async fn list(&self, filter: &EventFilter) -> Result<ListPage, AppError> {
        let endpoint = format!("{}{}", self.collection_path(), filter.to_query_string());
        let response: ListResponse = self.api.get(&endpoint).await?;
        let page = response.into_page();
        info!(
            "パケットイベント一覧取得成功: count={}, total={}",
            page.records.len(),
            page.total
        );
        Ok(page)
    }

    /// パケットイベントを作成する
    pub async fn create(&self, payload: &EventPayload) -> Result<EventRecord, AppError> {
        let wire: WireEventRecord = self.api.post(self.collection_path(), payload).await?;
        let record = wire.normalize();
        info!(
            "パケットイベント作成成功: id={}",
            record.id.as_deref().unwrap_or("(未採番)")
        );
        Ok(record)
    }

    /// パケットイベントを更新する
    pub async fn update(&self, id: &str, payload: &EventPayload) -> Result<EventRecord, AppError> {
        let endpoint = format!("{}/{id}", self.collection_path());
        let wire: WireEventRecord = self.api.put(&endpoint, payload).await?;
        info!("パケットイベント更新成功: id={id}");
        Ok(wire.normalize())
    }

    /// パケットイベントを削除する
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let endpoint = format!("{}/{id}", self.collection_path());
        self.api.delete(&endpoint).await?;
        info!("パケットイベント削除成功: id={id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::environment::{ApiConfig, DepartmentLinkMode};

    fn test_client() -> PacketEventsClient {
        let config = ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            packet_events_path: "/event-payment-types".to_string(),
            timeout_seconds: 5,
            max_retries: 0,
            department_link: DepartmentLinkMode::ById,
        };
        PacketEventsClient::with_api(ApiClient::with_config(config).unwrap())
    }

    #[test]
    fn test_collection_path_is_configuration() {
        // コレクションパスはデプロイ設定から取られる
        let client = test_client();
        assert_eq!(client.collection_path(), "/event-payment-types");
    }
}
