use nanoid::nanoid;

/// カスタムフィールドID用のnanoIdを生成する
///
/// IDはクライアント側で採番する一意性トークンであり、バックエンドは
/// そのままエコーするだけで意味を持たない。
///
/// # 戻り値
/// 21文字のURL-safeなnanoId
pub fn generate_field_id() -> String {
    nanoid!()
}

/// カスタムフィールドIDが有効な形式かどうかを検証する
///
/// # 検証条件
/// - 空でない
/// - URL-safe文字（A-Za-z0-9_-）のみを含む
pub fn is_valid_field_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_field_id_length() {
        let id = generate_field_id();
        assert_eq!(id.len(), 21);
    }

    #[test]
    fn test_generate_field_id_uniqueness() {
        let id1 = generate_field_id();
        let id2 = generate_field_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_is_valid_field_id() {
        // 生成したIDは常に有効
        assert!(is_valid_field_id(&generate_field_id()));

        // 空のIDは無効
        assert!(!is_valid_field_id(""));

        // 無効な文字を含むIDは無効
        assert!(!is_valid_field_id("has space"));
        assert!(!is_valid_field_id("bad@char"));
    }
}
