//! ユーティリティ関数を提供するモジュール
//!
//! ソースファイル上のレンマ表記(空白をアンダースコアで表す形式)と、
//! 利用者に見せるレンマ表記との相互変換を行います。

/// ファイルに格納されたレンマを表示用の形式に変換する
///
/// アンダースコアを空白に置き換えます。変換後のレンマが`)`で終わる場合は、
/// 末尾の3文字(`(a)`のような曖昧性解消用のマーカー)を取り除きます。
///
/// # 引数
///
/// * `stored` - ファイル上のレンマ
///
/// # 戻り値
///
/// 表示用のレンマ
///
/// # 例
///
/// ```
/// # use wordnet_rkyv::utils::read_stored_lemma;
/// assert_eq!(read_stored_lemma("hot_dog"), "hot dog");
/// assert_eq!(read_stored_lemma("galore(a)"), "galore");
/// ```
pub fn read_stored_lemma(stored: &str) -> String {
    let mut spaced = stored.replace('_', " ");
    if spaced.ends_with(')') {
        let cut = spaced
            .char_indices()
            .rev()
            .nth(2)
            .map_or(0, |(i, _)| i);
        spaced.truncate(cut);
    }
    spaced
}

/// 表示用のレンマをファイル上の形式に変換する
///
/// 空白をアンダースコアに置き換えます。
///
/// # 例
///
/// ```
/// # use wordnet_rkyv::utils::write_stored_lemma;
/// assert_eq!(write_stored_lemma("hot dog"), "hot_dog");
/// ```
pub fn write_stored_lemma(lemma: &str) -> String {
    lemma.replace(' ', "_")
}

/// 検索キーを正規化する
///
/// 小文字化し、アンダースコアを空白に置き換えます。すべての参照操作はこの形式の
/// キーで行われるため、`"Hot_Dog"`と`"hot dog"`は同じエントリに一致します。
pub fn normalize_query(lemma: &str) -> String {
    lemma.to_lowercase().replace('_', " ")
}

#[cfg(test)]
/// HashMapリテラルを簡潔に記述するためのマクロ
///
/// # 例
///
/// ```ignore
/// let map = hashmap! {
///     "key1" => "value1",
///     "key2" => "value2",
/// };
/// ```
macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

#[cfg(test)]
pub(crate) use hashmap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_stored_lemma() {
        assert_eq!(read_stored_lemma("canis_familiaris"), "canis familiaris");
        assert_eq!(read_stored_lemma("dog"), "dog");
        assert_eq!(read_stored_lemma("ruined(p)"), "ruined");
        assert_eq!(read_stored_lemma("(a)"), "");
        assert_eq!(read_stored_lemma(""), "");
    }

    #[test]
    fn test_write_stored_lemma() {
        assert_eq!(write_stored_lemma("chase after"), "chase_after");
        assert_eq!(write_stored_lemma(&read_stored_lemma("chase_after")), "chase_after");
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Canis_Familiaris"), "canis familiaris");
        assert_eq!(normalize_query("DOG"), "dog");
    }
}
