//! エラー型の定義
//!
//! このモジュールは、WordNetデータベースの読み込みと参照で使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// WordNet専用のResult型
///
/// エラー型としてデフォルトで[`WordNetError`]を使用します。
pub type Result<T, E = WordNetError> = std::result::Result<T, E>;

/// WordNetのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
/// 読み込み中のエラーはすべて致命的であり、部分的に読み込まれた辞書が返されることはありません。
#[derive(Debug, thiserror::Error)]
pub enum WordNetError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// ソースファイルの文法違反を表します。[`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 参照整合性エラー
    ///
    /// ポインタやセンスエントリが存在しないシンセットを参照している場合に発生します。
    /// [`IntegrityError`]のエラーバリアント。
    #[error(transparent)]
    Integrity(IntegrityError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// ソースファイルのオープンまたは読み込みの失敗
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        /// 失敗したファイルのパス
        path: PathBuf,

        /// 根本原因
        #[source]
        source: std::io::Error,
    },

    /// 辞書ディレクトリが見つからない
    ///
    /// [`discovery`](crate::discovery)ヘルパーがどの候補パスも見つけられなかった場合に発生します。
    #[error("Can't find WordNet dictionary")]
    DictionaryNotFound,

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl WordNetError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `file` - ファイル名(例: `index.noun`)
    /// * `line` - 1始まりの行番号
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(file: &'static str, line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            file,
            line,
            msg: msg.into(),
        })
    }

    /// 参照整合性エラーを生成します
    ///
    /// # 引数
    ///
    /// * `file` - 参照元のファイル名
    /// * `msg` - エラーメッセージ
    pub(crate) fn integrity<S>(file: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Integrity(IntegrityError {
            file,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// ファイルパス付きのI/Oエラーを生成します
    pub(crate) fn io<P>(path: P, source: std::io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// ファイル名
    pub(crate) file: &'static str,

    /// 1始まりの行番号
    pub(crate) line: usize,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl InvalidFormatError {
    /// エラーが発生したファイル名を返します。
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// エラーが発生した行番号(1始まり)を返します。
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InvalidFormatError: {}:{}: {}",
            self.file, self.line, self.msg
        )
    }
}

impl Error for InvalidFormatError {}

/// 参照が解決できない場合に使用されるエラー
#[derive(Debug)]
pub struct IntegrityError {
    /// 参照元のファイル名
    pub(crate) file: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl IntegrityError {
    /// 参照元のファイル名を返します。
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IntegrityError: {}: {}", self.file, self.msg)
    }
}

impl Error for IntegrityError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}
