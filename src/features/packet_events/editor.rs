/// パケットイベントの作成・編集ドラフト
///
/// ドラフトはUI入力で項目ごとに更新され、送信時にバリデーションを通過した
/// 場合のみリクエストペイロードへ変換される。バリデーションエラーは
/// ローカルで完結し、ネットワークには一切到達しない。
use crate::features::packet_events::models::{CustomField, CustomFieldType, EventPayload, EventRecord};
use crate::shared::config::environment::DepartmentLinkMode;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::field_id::{generate_field_id, is_valid_field_id};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 「固定価格なし」選択時に送信される価格
///
/// バックエンドは0以下の価格を拒否してきた履歴があるため、ゼロではなく
/// 最小の正値を規約として送信する。「価格未設定」と「明示的に無料」の
/// 区別はこの規約値で行う。
pub const NO_FIXED_PRICE_SENTINEL: f64 = 1.0;

/// メールアドレス形式の簡易チェック
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("メール正規表現が不正"));

/// 編集中のドラフトレコード
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RecordDraft {
    pub email: String,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    pub event_id: Option<String>,
    pub event_name: Option<String>,
    pub category: Option<String>,
    pub price_local: f64,
    pub price_foreign: f64,
    /// 「固定価格なし」が選択されているか
    pub no_fixed_price: bool,
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

fn default_active() -> bool {
    true
}

impl RecordDraft {
    /// 空のドラフトを作成する
    pub fn new() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }

    /// 既存レコードから編集用ドラフトを作成する
    ///
    /// 両価格が規約値と一致する場合は「固定価格なし」を選択済みとして扱う。
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            email: record.email.clone(),
            department_id: record.department_id.clone(),
            department_name: if record.department.is_empty() {
                None
            } else {
                Some(record.department.clone())
            },
            event_id: record.event_id.clone(),
            event_name: if record.event_name.is_empty() {
                None
            } else {
                Some(record.event_name.clone())
            },
            category: record.category.clone(),
            price_local: record.price_local,
            price_foreign: record.price_foreign,
            no_fixed_price: record.price_local == NO_FIXED_PRICE_SENTINEL
                && record.price_foreign == NO_FIXED_PRICE_SENTINEL,
            period_from: record.period_from.clone(),
            period_to: record.period_to.clone(),
            active: record.active,
            custom_fields: record.custom_fields.clone(),
        }
    }

    /// 部署を選択する
    ///
    /// イベントは必ず1つの部署に属するため、部署の変更は選択済みイベントを
    /// 常にリセットする。部署とイベントの不整合な組み合わせは送信されない。
    pub fn set_department(&mut self, id: String, name: String) {
        self.department_id = Some(id);
        self.department_name = Some(name);
        self.event_id = None;
        self.event_name = None;
    }

    /// イベントを選択する
    pub fn set_event(&mut self, id: String, title: String) {
        self.event_id = Some(id);
        self.event_name = Some(title);
    }

    /// カスタムフィールドを追加する（IDはクライアント側で採番）
    pub fn add_custom_field(
        &mut self,
        name: String,
        value: String,
        field_type: CustomFieldType,
    ) -> String {
        let id = generate_field_id();
        self.custom_fields.push(CustomField {
            id: id.clone(),
            name,
            value,
            field_type,
        });
        id
    }

    /// カスタムフィールドを削除する
    pub fn remove_custom_field(&mut self, id: &str) {
        self.custom_fields.retain(|field| field.id != id);
    }

    /// 新規作成用のペイロードを構築する
    ///
    /// # バリデーション
    /// 1. メール・部署・イベントの選択が必須
    /// 2. 「固定価格なし」でない限り両価格は正値
    /// 3. 「固定価格なし」の場合、両価格は規約値で上書きされる
    /// 4. 名前または値が空のカスタムフィールドは送信から除外される
    /// 5. 期間は両端がある場合 from <= to
    pub fn create_payload(&self, link: DepartmentLinkMode) -> AppResult<EventPayload> {
        let event_id = self
            .event_id
            .clone()
            .ok_or_else(|| AppError::validation("イベントを選択してください"))?;
        if self.department_id.is_none() && self.department_name.is_none() {
            return Err(AppError::validation("部署を選択してください"));
        }

        let mut payload = self.base_payload(link)?;
        payload.event_id = Some(event_id);
        Ok(payload)
    }

    /// 更新用のペイロードを構築する
    ///
    /// 作成時と同じ価格・期間・カスタムフィールドの規則を適用する。
    /// 部署・イベントは既存レコードから引き継がれている前提のため、
    /// 選択必須のチェックは行わない。
    pub fn update_payload(&self, link: DepartmentLinkMode) -> AppResult<EventPayload> {
        let mut payload = self.base_payload(link)?;
        payload.event_id = self.event_id.clone();
        Ok(payload)
    }

    /// 共通バリデーションを適用してペイロードの骨格を構築する
    fn base_payload(&self, link: DepartmentLinkMode) -> AppResult<EventPayload> {
        self.validate_email()?;
        self.validate_prices()?;
        self.validate_period()?;

        let (price, price_usd) = self.submitted_prices();

        Ok(EventPayload {
            event_name: self.event_name.clone().unwrap_or_default(),
            event_id: None,
            department: self.department_value(link),
            email: self.email.trim().to_string(),
            category: self
                .category
                .clone()
                .filter(|c| !c.trim().is_empty()),
            price,
            price_usd,
            period_from: self.period_from.clone(),
            period_to: self.period_to.clone(),
            active: self.active,
            custom_fields: self.submitted_custom_fields(),
        })
    }

    /// 紐付けモードに応じた部署フィールドの値を返す
    fn department_value(&self, link: DepartmentLinkMode) -> String {
        match link {
            DepartmentLinkMode::ById => self
                .department_id
                .clone()
                .or_else(|| self.department_name.clone())
                .unwrap_or_default(),
            DepartmentLinkMode::ByName => self
                .department_name
                .clone()
                .or_else(|| self.department_id.clone())
                .unwrap_or_default(),
        }
    }

    /// 実際に送信される価格ペアを返す
    ///
    /// 「固定価格なし」の場合、入力値に関わらず両価格とも規約値になる。
    pub fn submitted_prices(&self) -> (f64, f64) {
        if self.no_fixed_price {
            (NO_FIXED_PRICE_SENTINEL, NO_FIXED_PRICE_SENTINEL)
        } else {
            (self.price_local, self.price_foreign)
        }
    }

    /// 送信対象のカスタムフィールドを返す
    ///
    /// 名前または値が空白のみのフィールドは除外する。部分的な
    /// カスタムフィールドはバックエンドに到達しない。
    /// IDはクライアント採番の一意性トークンであるため、外部から
    /// 渡されたドラフトのIDが不正な形式の場合は採番し直す。
    pub fn submitted_custom_fields(&self) -> Vec<CustomField> {
        self.custom_fields
            .iter()
            .filter(|field| !field.name.trim().is_empty() && !field.value.trim().is_empty())
            .cloned()
            .map(|mut field| {
                if !is_valid_field_id(&field.id) {
                    field.id = generate_field_id();
                }
                field
            })
            .collect()
    }

    fn validate_email(&self) -> AppResult<()> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AppError::validation("メールアドレスを入力してください"));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(AppError::validation("メールアドレスの形式が正しくありません"));
        }
        Ok(())
    }

    fn validate_prices(&self) -> AppResult<()> {
        if self.no_fixed_price {
            return Ok(());
        }
        if !(self.price_local > 0.0) {
            return Err(AppError::validation("KZT価格は0より大きい値を入力してください"));
        }
        if !(self.price_foreign > 0.0) {
            return Err(AppError::validation("USD価格は0より大きい値を入力してください"));
        }
        Ok(())
    }

    fn validate_period(&self) -> AppResult<()> {
        let (from, to) = match (&self.period_from, &self.period_to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Ok(()),
        };

        let from = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .map_err(|_| AppError::validation("開始日の形式が正しくありません"))?;
        let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .map_err(|_| AppError::validation("終了日の形式が正しくありません"))?;

        if from > to {
            return Err(AppError::validation(
                "期間の開始日は終了日以前である必要があります",
            ));
        }
        Ok(())
    }
}
