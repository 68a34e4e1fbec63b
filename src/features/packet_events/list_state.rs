/// 一覧ビューの状態管理
///
/// 再読み込みのたびに単調増加するシーケンス番号（チケット）を発行し、
/// 最後に発行されたチケットのレスポンスだけを反映する。これにより、
/// 遅延した古いリクエストが新しい結果を上書きすることはない。
/// 表示される一覧は常に最後に発行された絞り込み条件を反映する。
use crate::features::packet_events::models::{EventFilter, EventRecord, ListPage};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// UIに渡す一覧のスナップショット
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListSnapshot {
    pub records: Vec<EventRecord>,
    pub total: u64,
    pub loading: bool,
}

impl Default for ListSnapshot {
    fn default() -> Self {
        Self {
            records: vec![],
            total: 0,
            loading: false,
        }
    }
}

/// 一覧状態（Idle → Loading → Idle の状態機械）
///
/// 失敗時も必ずIdleに戻る。失敗したレスポンスは一覧を壊さず、
/// 直前のレコードをそのまま保持する。
#[derive(Debug, Default)]
pub struct ListState {
    snapshot: ListSnapshot,
    /// 最後に発行した再読み込みチケット
    issued_seq: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のスナップショットを取得する
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshot.clone()
    }

    /// 再読み込みを開始し、チケットを発行する
    ///
    /// 複数の再読み込みが同時に走る場合、それぞれが独立したチケットを持ち、
    /// 最後に発行されたものだけが反映される。
    pub fn begin_reload(&mut self) -> u64 {
        self.issued_seq += 1;
        self.snapshot.loading = true;
        debug!("再読み込み開始: seq={}", self.issued_seq);
        self.issued_seq
    }

    /// 成功レスポンスを反映する
    ///
    /// # 戻り値
    /// 反映された場合はtrue。より新しいチケットが既に発行されている場合は
    /// 何も変更せずfalseを返す（古いレスポンスの破棄）。
    pub fn apply_success(&mut self, seq: u64, page: ListPage) -> bool {
        if seq != self.issued_seq {
            info!(
                "古いレスポンスを破棄: seq={seq}, latest={}",
                self.issued_seq
            );
            return false;
        }

        self.snapshot.records = page.records;
        self.snapshot.total = page.total;
        self.snapshot.loading = false;
        debug!(
            "一覧を更新: seq={seq}, count={}, total={}",
            self.snapshot.records.len(),
            self.snapshot.total
        );
        true
    }

    /// 失敗レスポンスを反映する
    ///
    /// 直前のレコードは保持し、ローディング状態だけを解除する。
    /// 部分的に削除されたように見える一覧を出さないため、失敗時に
    /// レコードを消すことはしない。
    pub fn apply_failure(&mut self, seq: u64) {
        if seq != self.issued_seq {
            info!(
                "古い失敗レスポンスを破棄: seq={seq}, latest={}",
                self.issued_seq
            );
            return;
        }
        self.snapshot.loading = false;
    }
}

/// 絞り込み条件と一覧状態をひとつのロック単位にまとめたビュー状態
///
/// 条件の変更とチケットの発行は同一クリティカルセクションで行う。
/// 後から発行された条件は必ず新しいチケットを持つため、条件変更と
/// チケット発行の間に別の再読み込みが割り込むことはなく、表示は
/// 常に最後に発行された条件を反映する。
#[derive(Debug, Default)]
pub struct ViewState {
    filter: EventFilter,
    list: ListState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の絞り込み条件を取得する
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// 検索条件を変更し、その条件の再読み込みチケットを発行する
    ///
    /// # 戻り値
    /// フェッチに使う条件のコピーと、発行されたチケット
    pub fn set_criteria(
        &mut self,
        event_name: Option<String>,
        department: Option<String>,
    ) -> (EventFilter, u64) {
        self.filter.set_criteria(event_name, department);
        (self.filter.clone(), self.list.begin_reload())
    }

    /// ページネーションを変更し、その条件の再読み込みチケットを発行する
    pub fn set_page(&mut self, page: u64, size: u64) -> (EventFilter, u64) {
        self.filter.set_page(page, size);
        (self.filter.clone(), self.list.begin_reload())
    }

    /// 現在の条件のまま再読み込みチケットを発行する
    /// （初回マウント時と作成・更新・削除の成功シグナルで使用）
    pub fn begin_reload(&mut self) -> (EventFilter, u64) {
        (self.filter.clone(), self.list.begin_reload())
    }

    /// 成功レスポンスを反映する（古いチケットのレスポンスは破棄）
    pub fn apply_success(&mut self, seq: u64, page: ListPage) -> bool {
        self.list.apply_success(seq, page)
    }

    /// 失敗レスポンスを反映する
    pub fn apply_failure(&mut self, seq: u64) {
        self.list.apply_failure(seq)
    }

    /// 現在のスナップショットを取得する
    pub fn snapshot(&self) -> ListSnapshot {
        self.list.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::packet_events::models::{EventRecord, ListPage};

    fn record(id: &str, name: &str) -> EventRecord {
        EventRecord {
            id: Some(id.to_string()),
            event_id: None,
            event_name: name.to_string(),
            department_id: None,
            department: "dep".to_string(),
            email: "a@b.com".to_string(),
            category: None,
            price_local: 1000.0,
            price_foreign: 5.0,
            period_from: None,
            period_to: None,
            active: true,
            custom_fields: vec![],
        }
    }

    fn page(names: &[&str]) -> ListPage {
        ListPage {
            records: names
                .iter()
                .enumerate()
                .map(|(i, n)| record(&format!("pe-{i}"), n))
                .collect(),
            total: names.len() as u64,
        }
    }

    #[test]
    fn test_reload_success_cycle() {
        // Idle → Loading → Idle の基本サイクル
        let mut state = ListState::new();
        assert!(!state.snapshot().loading);

        let seq = state.begin_reload();
        assert!(state.snapshot().loading);

        assert!(state.apply_success(seq, page(&["A"])));
        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.total, 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        // 2つの検索（name="foo" → name="bar"）で、先に発行したリクエストが
        // 後から解決しても、表示は最後に発行した条件の結果のままになる
        let mut state = ListState::new();

        let seq_foo = state.begin_reload();
        let seq_bar = state.begin_reload();

        // barのレスポンスが先に到着
        assert!(state.apply_success(seq_bar, page(&["bar-1", "bar-2"])));

        // fooのレスポンスが遅れて到着しても破棄される
        assert!(!state.apply_success(seq_foo, page(&["foo-1"])));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].event_name, "bar-1");
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_later_criteria_always_hold_later_ticket() {
        // 条件の変更とチケットの発行は同一クリティカルセクションで行われるため、
        // 後から発行した条件が古いチケットを持つことはない。"foo"の検索が
        // "bar"より先に条件を確定した場合、チケット順も必ず foo < bar になる
        let mut view = ViewState::new();

        let (filter_foo, seq_foo) = view.set_criteria(Some("foo".to_string()), None);
        let (filter_bar, seq_bar) = view.set_criteria(Some("bar".to_string()), None);

        assert_eq!(filter_foo.event_name.as_deref(), Some("foo"));
        assert_eq!(filter_bar.event_name.as_deref(), Some("bar"));
        assert!(seq_bar > seq_foo);

        // barのレスポンスが先に到着して反映される
        assert!(view.apply_success(seq_bar, page(&["bar-1"])));

        // fooのレスポンスが遅れて到着しても破棄され、
        // 表示は最後に発行した条件（bar）の結果のまま
        assert!(!view.apply_success(seq_foo, page(&["foo-1"])));

        let snapshot = view.snapshot();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].event_name, "bar-1");
        assert_eq!(view.filter().event_name.as_deref(), Some("bar"));
    }

    #[test]
    fn test_view_state_page_change_keeps_criteria() {
        let mut view = ViewState::new();
        let (_, _) = view.set_criteria(Some("foo".to_string()), Some("dep-1".to_string()));

        let (filter, seq) = view.set_page(2, 20);
        assert_eq!(filter.page, 2);
        assert_eq!(filter.size, 20);
        assert_eq!(filter.event_name.as_deref(), Some("foo"));

        assert!(view.apply_success(seq, page(&["A"])));
        assert!(!view.snapshot().loading);
    }

    #[test]
    fn test_view_state_reload_uses_current_criteria() {
        // 変更成功シグナル経由の再読み込みは現在の条件をそのまま使う
        let mut view = ViewState::new();
        view.set_criteria(None, Some("dep-1".to_string()));

        let (filter, seq) = view.begin_reload();
        assert_eq!(filter.department.as_deref(), Some("dep-1"));
        assert!(view.snapshot().loading);
        view.apply_failure(seq);
        assert!(!view.snapshot().loading);
    }

    #[test]
    fn test_failure_keeps_previous_records() {
        // 失敗時は直前のレコードを保持したままIdleに戻る
        let mut state = ListState::new();
        let seq = state.begin_reload();
        state.apply_success(seq, page(&["A", "B"]));

        let seq = state.begin_reload();
        state.apply_failure(seq);

        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.records.len(), 2);
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading() {
        // 新しい再読み込みが進行中なら、古い失敗はローディングを解除しない
        let mut state = ListState::new();
        let seq_old = state.begin_reload();
        let _seq_new = state.begin_reload();

        state.apply_failure(seq_old);
        assert!(state.snapshot().loading);
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        // 0件の結果は空一覧として反映される
        let mut state = ListState::new();
        let seq = state.begin_reload();
        assert!(state.apply_success(seq, page(&[])));

        let snapshot = state.snapshot();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.total, 0);
        assert!(!snapshot.loading);
    }
}
