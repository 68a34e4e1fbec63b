use serde::{Deserialize, Serialize};

/// 部署データモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// 部署一覧レスポンス
///
/// バックエンドは素の配列を返すことも `{data: [...]}` を返すこともある。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DepartmentsResponse {
    Wrapped { data: Vec<Department> },
    Bare(Vec<Department>),
}

impl DepartmentsResponse {
    pub fn into_departments(self) -> Vec<Department> {
        match self {
            DepartmentsResponse::Wrapped { data } => data,
            DepartmentsResponse::Bare(data) => data,
        }
    }
}

/// 部署に属する公開イベント（ワイヤ形式）
///
/// idまたはtitleを欠くレコードは選択肢として使えないため除外する。
#[derive(Debug, Deserialize, Clone)]
pub struct WireDepartmentEvent {
    pub id: Option<String>,
    pub title: Option<String>,
    pub active: Option<bool>,
}

/// エディタの選択肢として使える公開イベント
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventOption {
    pub id: String,
    pub title: String,
    pub active: bool,
}

/// ワイヤ形式のイベント一覧から有効な選択肢だけを取り出す
pub fn into_event_options(events: Vec<WireDepartmentEvent>) -> Vec<EventOption> {
    events
        .into_iter()
        .filter_map(|event| {
            let id = event.id.filter(|id| !id.is_empty())?;
            let title = event.title.filter(|title| !title.is_empty())?;
            Some(EventOption {
                id,
                title,
                active: event.active.unwrap_or(true),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departments_response_wrapped() {
        let response: DepartmentsResponse =
            serde_json::from_str(r#"{"data": [{"id": "dep-1", "name": "文化部"}]}"#).unwrap();
        let departments = response.into_departments();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].name, "文化部");
    }

    #[test]
    fn test_departments_response_bare() {
        let response: DepartmentsResponse =
            serde_json::from_str(r#"[{"id": "dep-1", "name": "文化部"}]"#).unwrap();
        assert_eq!(response.into_departments().len(), 1);
    }

    #[test]
    fn test_event_options_filter_incomplete_records() {
        // idまたはtitleの無いイベントは選択肢にならない
        let events: Vec<WireDepartmentEvent> = serde_json::from_str(
            r#"[
                {"id": "ev-1", "title": "コンサート"},
                {"id": "ev-2"},
                {"title": "タイトルのみ"},
                {"id": "", "title": "空ID"},
                {"id": "ev-3", "title": "マラソン", "active": false}
            ]"#,
        )
        .unwrap();

        let options = into_event_options(events);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, "ev-1");
        assert!(options[0].active);
        assert!(!options[1].active);
    }
}
