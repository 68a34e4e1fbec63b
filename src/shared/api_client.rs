/// 汎用APIクライアント
///
/// APIサーバーとの通信を行う汎用的なクライアント。
/// パケットイベント、部署、イベント参照など全てのエンドポイントで使用可能。
/// 通信エラーは常にAppError::ExternalServiceとして呼び出し側に返り、
/// コマンド境界の外には伝播しない。
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppError;
use log::{info, warn};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス（FastAPI形式）
///
/// バックエンドはエラー時に `{"detail": "..."}` を返す。
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境設定からAPIクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        let config = ApiConfig::from_env()
            .map_err(|e| AppError::Configuration(format!("API設定の読み込み失敗: {e}")))?;
        Self::with_config(config)
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// クライアントが使用しているAPI設定を取得
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GETリクエストを送信し、レスポンスボディをデシリアライズする
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.client.get(self.url(endpoint));
        let response = self.execute_with_retry(request, "GET", endpoint).await?;
        Self::decode_body(response).await
    }

    /// POSTリクエストを送信し、レスポンスボディをデシリアライズする
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).json(body);
        let response = self.execute_with_retry(request, "POST", endpoint).await?;
        Self::decode_body(response).await
    }

    /// PUTリクエストを送信し、レスポンスボディをデシリアライズする
    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");
        let request = self.client.put(self.url(endpoint)).json(body);
        let response = self.execute_with_retry(request, "PUT", endpoint).await?;
        Self::decode_body(response).await
    }

    /// DELETEリクエストを送信する
    ///
    /// DELETEは通常レスポンスボディを持たないため、成功ステータスのみチェックする。
    pub async fn delete(&self, endpoint: &str) -> Result<(), AppError> {
        info!("DELETEリクエスト送信: endpoint={endpoint}");
        let request = self.client.delete(self.url(endpoint));
        self.execute_with_retry(request, "DELETE", endpoint).await?;
        Ok(())
    }

    /// エンドポイントから完全なURLを組み立てる
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// リトライ付きでリクエストを実行し、成功レスポンスを返す
    ///
    /// トランスポート障害は指数バックオフでリトライする。
    /// 非成功ステータスはリトライせず、即座にエラーへ変換する。
    async fn execute_with_retry(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<Response, AppError> {
        let mut attempts = 0;
        loop {
            let cloned = request.try_clone().ok_or_else(|| {
                AppError::ExternalService("リクエストのクローンに失敗しました".to_string())
            })?;

            match cloned.send().await {
                Ok(response) if response.status().is_success() => {
                    info!("{method}リクエスト成功: endpoint={endpoint}");
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    let detail = extract_error_detail(status, &body);
                    warn!(
                        "{method}リクエスト失敗: endpoint={endpoint}, status={}, detail={detail}",
                        status.as_u16()
                    );
                    return Err(AppError::ExternalService(format!(
                        "APIサーバーエラー ({}): {detail}",
                        status.as_u16()
                    )));
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        return Err(AppError::ExternalService(format!(
                            "APIサーバーへの接続に失敗しました: {e}"
                        )));
                    }
                }
            }
        }
    }

    /// 成功レスポンスのボディをデシリアライズする
    async fn decode_body<T>(response: Response) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("レスポンス解析エラー: {e}")))
    }
}

/// エラーレスポンスボディから人間可読なエラー詳細を抽出する
///
/// バックエンドの `{"detail": "..."}` 形式を優先し、解析できない場合は
/// HTTPステータスに応じた汎用メッセージにフォールバックする。
pub fn extract_error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(error_body) = serde_json::from_str::<ErrorBody>(body) {
        return error_body.detail;
    }
    status_fallback_message(status.as_u16()).to_string()
}

/// HTTPステータスコードに応じた汎用エラーメッセージを返す
fn status_fallback_message(status_code: u16) -> &'static str {
    match status_code {
        400 => "リクエストの形式が正しくありません",
        401 => "認証に失敗しました。再度ログインしてください",
        403 => "この操作を実行する権限がありません",
        404 => "指定されたリソースが見つかりません",
        409 => "リソースの競合が発生しました",
        422 => "送信されたデータがバックエンドの検証に失敗しました",
        429 => "リクエストが多すぎます。しばらく待ってから再試行してください",
        500 => "サーバー内部エラーが発生しました",
        502 => "APIサーバーとの通信でエラーが発生しました",
        503 => "APIサーバーが一時的に利用できません",
        504 => "APIサーバーからの応答がタイムアウトしました",
        _ => "不明なエラーが発生しました",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::environment::DepartmentLinkMode;

    fn test_config() -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            packet_events_path: "/packet-events".to_string(),
            timeout_seconds: 5,
            max_retries: 0,
            department_link: DepartmentLinkMode::ById,
        }
    }

    #[test]
    fn test_client_creation_with_config() {
        let client = ApiClient::with_config(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_rejects_invalid_config() {
        // 不正なベースURLでは初期化に失敗する
        let mut config = test_config();
        config.base_url = "not a url".to_string();
        assert!(ApiClient::with_config(config).is_err());
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::with_config(test_config()).unwrap();
        assert_eq!(
            client.url("/packet-events?page=0"),
            "http://localhost:3000/packet-events?page=0"
        );
    }

    #[test]
    fn test_extract_error_detail_from_fastapi_body() {
        // FastAPI形式のエラーボディはdetailをそのまま使う
        let detail = extract_error_detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "price must be positive"}"#,
        );
        assert_eq!(detail, "price must be positive");
    }

    #[test]
    fn test_extract_error_detail_fallback_for_plain_body() {
        // JSONでないボディはステータスに応じた汎用メッセージにフォールバック
        let detail = extract_error_detail(StatusCode::NOT_FOUND, "<html>Not Found</html>");
        assert_eq!(detail, "指定されたリソースが見つかりません");

        let detail = extract_error_detail(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(detail, "サーバー内部エラーが発生しました");
    }

    #[test]
    fn test_status_fallback_message_unknown_status() {
        assert_eq!(
            status_fallback_message(418),
            "不明なエラーが発生しました"
        );
    }
}
