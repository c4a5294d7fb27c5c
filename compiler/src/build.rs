//! コンパイル済み辞書のビルドモジュール
//!
//! このモジュールは、WordNetの辞書ディレクトリ(`index.<pos>`、`data.<pos>`、`index.sense`)から
//! rkyv形式のコンパイル済み辞書を構築する機能を提供します。

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use wordnet_rkyv::discovery;
use wordnet_rkyv::errors::WordNetError;
use wordnet_rkyv::{Dictionary, PartOfSpeech};

/// Zstandardの圧縮レベル
const ZSTD_LEVEL: i32 = 19;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to compile a WordNet dictionary directory."
)]
pub struct Args {
    /// WordNet dictionary directory containing index.* and data.* files.
    ///
    /// If this argument is not specified, $WNHOME/dict, $WNSEARCHDIR and the
    /// default installation paths are searched.
    #[clap(short = 'd', long)]
    dict_dir: Option<PathBuf>,

    /// File to which the compiled dictionary is output.
    ///
    /// The output is compressed with zstd when the file name ends with `.zst`.
    #[clap(short = 'o', long)]
    dict_out: PathBuf,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書の読み込みまたは書き出しのエラー
    #[error("Dictionary building failed: {0}")]
    WordNet(#[from] WordNetError),
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    let dict_dir = match args.dict_dir {
        Some(dir) => dir,
        None => discovery::find_dict_dir()?,
    };

    println!("Loading the dictionary from {}...", dict_dir.display());
    let dict = Dictionary::from_dir(&dict_dir)?;
    for pos in PartOfSpeech::TABLES {
        info!("{pos}: {} index entries", dict.num_index_entries(pos));
    }

    println!("Writing the compiled dictionary...");
    write_dictionary(&dict, &args.dict_out)?;

    println!(
        "Successfully compiled {} synsets and {} senses to {}",
        dict.num_synsets(),
        dict.num_senses(),
        args.dict_out.display()
    );
    Ok(())
}

/// 出力ファイル名に応じて、辞書をそのまま、またはzstd圧縮して書き出す
pub fn write_dictionary(dict: &Dictionary, path: &Path) -> Result<(), BuildError> {
    let file = File::create(path)?;
    if path.extension().is_some_and(|ext| ext == "zst") {
        let mut encoder = zstd::Encoder::new(file, ZSTD_LEVEL)?;
        dict.write(&mut encoder)?;
        encoder.finish()?;
    } else {
        dict.write(BufWriter::new(file))?;
    }
    Ok(())
}
