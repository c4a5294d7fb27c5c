//! 辞書ディレクトリの探索
//!
//! 環境変数と既定のインストール先から、WordNetの辞書ディレクトリを探します。
//! ライブラリの読み込み処理がこのモジュールを暗黙に呼び出すことはありません。
//! 呼び出し側が明示的に使用し、得られたパスを[`Dictionary::from_dir`](crate::Dictionary::from_dir)に渡します。

use std::env;
use std::path::PathBuf;

use log::debug;

use crate::errors::{Result, WordNetError};

/// 辞書ディレクトリを指す環境変数(`$WNHOME/dict`として参照されます)
pub const WNHOME: &str = "WNHOME";

/// 辞書ディレクトリそのものを指す環境変数
pub const WNSEARCHDIR: &str = "WNSEARCHDIR";

const SYSTEM_PREFIXES: [&str; 8] = [
    "/usr",
    "/usr/share",
    "/usr/local",
    "/usr/local/share",
    "/opt",
    "/opt/share",
    "/opt/local",
    "/opt/local/share",
];

/// 既定の候補パスを優先順に返します。
///
/// `$WNHOME/dict`、`$WNSEARCHDIR`、続いてWordNet 3.0と3.1の既定のインストール先です。
/// 設定されていない環境変数は候補に含まれません。
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![];
    if let Some(home) = env::var_os(WNHOME) {
        candidates.push(PathBuf::from(home).join("dict"));
    }
    if let Some(dir) = env::var_os(WNSEARCHDIR) {
        candidates.push(PathBuf::from(dir));
    }
    for minor in 0..=1 {
        for prefix in SYSTEM_PREFIXES {
            candidates.push(PathBuf::from(format!("{prefix}/WordNet-3.{minor}/dict")));
        }
    }
    candidates
}

/// 候補パスのうち、最初に存在するディレクトリを返します。
///
/// # エラー
///
/// どの候補も存在しない場合は[`WordNetError::DictionaryNotFound`]を返します。
pub fn find_dict_dir_in<I, P>(candidates: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    for candidate in candidates {
        let candidate = candidate.into();
        if candidate.is_dir() {
            debug!("Found WordNet dictionary at {}", candidate.display());
            return Ok(candidate);
        }
    }
    Err(WordNetError::DictionaryNotFound)
}

/// 既定の候補から辞書ディレクトリを探します。
///
/// # エラー
///
/// 見つからない場合は[`WordNetError::DictionaryNotFound`]を返します。
pub fn find_dict_dir() -> Result<PathBuf> {
    find_dict_dir_in(default_candidates())
}
