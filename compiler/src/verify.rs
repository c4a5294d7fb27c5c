//! 辞書の検査モジュール
//!
//! 辞書ディレクトリまたはコンパイル済み辞書を読み込みます。読み込みの時点で
//! ポインタと語義の参照がすべて検査されるため、成功した場合は統計を表示します。

use std::path::{Path, PathBuf};

use clap::Parser;
use wordnet_rkyv::errors::WordNetError;
use wordnet_rkyv::{Dictionary, PartOfSpeech};

/// 検査コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "verify", about = "A program to verify a WordNet dictionary.")]
pub struct Args {
    /// WordNet dictionary directory, or a compiled dictionary file (`.zst` for compressed).
    #[clap(short = 'i', long)]
    input: PathBuf,
}

/// 検査中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// 辞書の読み込みエラー
    #[error("Verification failed: {0}")]
    WordNet(#[from] WordNetError),
}

fn load(input: &Path) -> Result<Dictionary, WordNetError> {
    if input.is_dir() {
        Dictionary::from_dir(input)
    } else if input.extension().is_some_and(|ext| ext == "zst") {
        Dictionary::from_zstd(input)
    } else {
        Dictionary::from_path(input)
    }
}

/// 検査コマンドを実行する
///
/// # エラー
///
/// 辞書の読み込みに失敗した場合、`VerifyError`を返します。
pub fn run(args: Args) -> Result<(), VerifyError> {
    let dict = load(&args.input)?;

    println!("{}: OK", args.input.display());
    println!("synsets\t{}", dict.num_synsets());
    println!("senses\t{}", dict.num_senses());
    for pos in PartOfSpeech::TABLES {
        let synsets = dict.synsets().filter(|s| s.pos().table_pos() == pos).count();
        println!(
            "{}\t{} lemmas\t{} synsets",
            pos.name(),
            dict.num_index_entries(pos),
            synsets
        );
    }
    Ok(())
}
