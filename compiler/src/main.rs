//! WordNet辞書コンパイラのメインエントリーポイント
//!
//! このモジュールは、WordNetの辞書ディレクトリからコンパイル済み辞書を作成する
//! サブコマンドと、辞書ディレクトリやコンパイル済み辞書を検査するサブコマンドを提供します。

mod build;
mod verify;

use clap::Parser;
use thiserror::Error;

use crate::{build::BuildError, verify::VerifyError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// 辞書ディレクトリからコンパイル済み辞書を構築します
    ///
    /// 出力ファイル名が`.zst`で終わる場合はZstandardで圧縮します。
    Build(build::Args),

    /// 辞書を読み込み、整合性を検査して統計を表示します
    Verify(verify::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 辞書検査中のエラー
    #[error(transparent)]
    VerifyError(#[from] VerifyError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Verify(args) => Ok(verify::run(args)?),
    }
}
