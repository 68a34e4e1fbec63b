use serde::{Deserialize, Serialize};

/// カスタムフィールドの型
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    Text,
    Number,
    Email,
}

/// パケットイベントに付随するカスタムフィールド
///
/// `id`はクライアント側で採番する一意性トークン（nanoid）。
/// バックエンドはこれをエコーするだけで意味を解釈しない。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomField {
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
}

/// パケットイベント（支払いタイプ）の正規化済みデータモデル
///
/// ワイヤ上の揺れ（title/event_name等）はWireEventRecord::normalizeで
/// 吸収済みであり、UI層はこの形だけを扱う。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventRecord {
    /// 永続化後にのみ存在するID（ドラフトでは未設定）
    pub id: Option<String>,
    pub event_id: Option<String>,
    pub event_name: String,
    pub department_id: Option<String>,
    pub department: String,
    pub email: String,
    pub category: Option<String>,
    /// 現地通貨（KZT）の価格
    pub price_local: f64,
    /// 外貨（USD）の価格
    pub price_foreign: f64,
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// APIサーバーが返す生のパケットイベント
///
/// バックエンドはバージョンによって異なるキー名を返してきた履歴があるため、
/// 揺れの全バリエーションを受理し、normalize()で正規形に写像する。
/// 正規化はフェッチ直後の境界で一度だけ行い、揺れをUI層に持ち込まない。
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WireEventRecord {
    pub id: Option<String>,
    pub event_name: Option<String>,
    /// `event_name`の代わりに`title`が返ることがある
    pub title: Option<String>,
    pub event_id: Option<String>,
    pub department: Option<String>,
    /// `department`の代わりに`department_name`が返ることがある
    pub department_name: Option<String>,
    pub department_id: Option<String>,
    #[serde(default)]
    pub email: String,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// `price`の代わりに`amount_kzt`が返ることがある
    pub amount_kzt: Option<f64>,
    pub price_usd: Option<f64>,
    /// `price_usd`の代わりに`amount_usd`が返ることがある
    pub amount_usd: Option<f64>,
    pub active: Option<bool>,
    /// `active`の代わりに`event_active`が返ることがある
    pub event_active: Option<bool>,
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    /// `period_to`の代わりに`period_till`が返ることがある
    pub period_till: Option<String>,
    /// 期間なしを示すフラグを返すバリエーションがある
    pub without_period: Option<bool>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

impl WireEventRecord {
    /// ワイヤ形式を正規化済みのEventRecordへ写像する
    ///
    /// 優先順位は「新しいキー > 古いキー」。どちらも無い場合は
    /// 文字列は空、価格は0.0、activeはtrueにフォールバックする。
    /// `without_period`が真の場合、期間の両端は無しとして扱う。
    pub fn normalize(self) -> EventRecord {
        let without_period = self.without_period.unwrap_or(false);
        EventRecord {
            id: self.id,
            event_id: self.event_id,
            event_name: self.title.or(self.event_name).unwrap_or_default(),
            department_id: self.department_id,
            department: self.department_name.or(self.department).unwrap_or_default(),
            email: self.email,
            category: self.category.filter(|c| !c.is_empty()),
            price_local: self.price.or(self.amount_kzt).unwrap_or(0.0),
            price_foreign: self.price_usd.or(self.amount_usd).unwrap_or(0.0),
            period_from: self.period_from.filter(|_| !without_period),
            period_to: self.period_to.or(self.period_till).filter(|_| !without_period),
            active: self.active.or(self.event_active).unwrap_or(true),
            custom_fields: self.custom_fields,
        }
    }
}

/// パケットイベント作成・更新用のリクエストペイロード
///
/// 作成時はIDを持たず、更新時のIDはURLパスで運ぶ。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventPayload {
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub department: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    pub price_usd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_to: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub custom_fields: Vec<CustomField>,
}

/// 一覧取得の絞り込み条件とページネーション
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventFilter {
    pub event_name: Option<String>,
    pub department: Option<String>,
    pub page: u64,
    pub size: u64,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            event_name: None,
            department: None,
            page: 0,
            size: 10,
        }
    }
}

impl EventFilter {
    /// 検索条件を変更する（ページは先頭に戻る）
    pub fn set_criteria(&mut self, event_name: Option<String>, department: Option<String>) {
        self.event_name = event_name.filter(|s| !s.is_empty());
        self.department = department.filter(|s| !s.is_empty());
        self.page = 0;
    }

    /// ページネーションを変更する（検索条件は維持する）
    pub fn set_page(&mut self, page: u64, size: u64) {
        self.page = page;
        if size > 0 {
            self.size = size;
        }
    }

    /// クエリ文字列を組み立てる（先頭の?を含む、条件が無ければ空文字列）
    ///
    /// 存在しない条件はパラメータを追加しない。値はパーセントエンコードする。
    pub fn to_query_string(&self) -> String {
        let mut params = vec![];

        if let Some(name) = &self.event_name {
            params.push(format!("eventName={}", urlencoding::encode(name)));
        }
        if let Some(department) = &self.department {
            params.push(format!("department={}", urlencoding::encode(department)));
        }
        params.push(format!("page={}", self.page));
        params.push(format!("size={}", self.size));

        format!("?{}", params.join("&"))
    }
}

/// 一覧取得レスポンス
///
/// バックエンドは素の配列を返すことも `{data, total}` を返すこともある。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paged {
        data: Vec<WireEventRecord>,
        total: u64,
    },
    Bare(Vec<WireEventRecord>),
}

/// 正規化済みの一覧ページ
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListPage {
    pub records: Vec<EventRecord>,
    pub total: u64,
}

impl ListResponse {
    /// レスポンスを正規化済みのページへ変換する
    ///
    /// 素の配列の場合、totalは配列長とする。
    pub fn into_page(self) -> ListPage {
        match self {
            ListResponse::Paged { data, total } => ListPage {
                records: data.into_iter().map(WireEventRecord::normalize).collect(),
                total,
            },
            ListResponse::Bare(data) => {
                let records: Vec<EventRecord> =
                    data.into_iter().map(WireEventRecord::normalize).collect();
                let total = records.len() as u64;
                ListPage { records, total }
            }
        }
    }
}
