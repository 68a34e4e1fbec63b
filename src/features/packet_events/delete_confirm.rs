/// 削除確認の二段階コミット
///
/// 行の削除選択は対象レコードを「保留」として保存するだけで、実際の
/// 削除リクエストは明示的な確認操作でのみ発行される。楽観的な行削除は
/// 行わない。削除が実際に失敗した場合に、消えたように見えた行が
/// 再読み込みで静かに復活する表示バグを避けるためである。
use crate::features::packet_events::models::EventRecord;
use log::debug;

#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    pending: Option<EventRecord>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 削除対象を保留し、確認プロンプトを開く
    pub fn request(&mut self, record: EventRecord) {
        debug!(
            "削除確認を開始: id={}",
            record.id.as_deref().unwrap_or("(未採番)")
        );
        self.pending = Some(record);
    }

    /// 確認プロンプトが開いているか
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// 保留中のレコードを取得する
    pub fn pending(&self) -> Option<&EventRecord> {
        self.pending.as_ref()
    }

    /// 削除を確定し、リクエストすべきIDを返す
    ///
    /// 保留中のレコードが永続化済み（IDを持つ）の場合のみIDを返す。
    /// 呼び出し後、保留状態はクリアされる。
    pub fn confirm(&mut self) -> Option<String> {
        self.pending.take().and_then(|record| record.id)
    }

    /// 確認をキャンセルする（リクエストは発行されない）
    pub fn cancel(&mut self) {
        if self.pending.is_some() {
            debug!("削除確認をキャンセル");
        }
        self.pending = None;
    }
}
