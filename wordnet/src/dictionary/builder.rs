//! 辞書構築のためのビルダー
//!
//! このモジュールは、WordNetのソースファイル(`index.<pos>`、`data.<pos>`、`index.sense`)から
//! [`DictionaryInner`] を構築するためのビルダーを提供します。
//!
//! 読み込み順序は固定です。4つのインデックスファイル、4つのデータファイル、
//! ポインタの整合性検査、最後にセンスインデックス(シンセットへの参照を解決するため、
//! データが読み込まれている必要があります)の順に処理します。

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::dictionary::DictionaryInner;
use crate::dictionary::data::{DataTable, DataTables};
use crate::dictionary::index::IndexTable;
use crate::dictionary::sense::{SENSE_INDEX_FILE_NAME, SenseIndex};
use crate::dictionary::symbol::PartOfSpeech;
use crate::errors::{Result, WordNetError};

/// 辞書を構成するソースファイルのリーダー
///
/// `index`と`data`は[`PartOfSpeech::TABLES`]の順序(名詞、動詞、形容詞、副詞)で並べます。
pub struct DictionarySources<R> {
    /// `index.noun`、`index.verb`、`index.adj`、`index.adv`のリーダー
    pub index: [R; 4],

    /// `data.noun`、`data.verb`、`data.adj`、`data.adv`のリーダー
    pub data: [R; 4],

    /// `index.sense`のリーダー
    pub sense: R,
}

/// WordNetのソースファイルから [`DictionaryInner`] を構築するビルダー
pub struct DictionaryBuilder {}

impl DictionaryBuilder {
    /// リーダーから新しい [`DictionaryInner`] を作成します。
    ///
    /// # 引数
    ///
    /// * `sources` - 9つのソースファイルのリーダー
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合、または参照が解決できない場合に
    /// [`WordNetError`] を返します。部分的に構築された辞書が返されることはありません。
    pub fn from_readers<R>(sources: DictionarySources<R>) -> Result<DictionaryInner>
    where
        R: Read,
    {
        let DictionarySources { index, data, sense } = sources;

        info!("Loading index files...");
        let mut index_tables = Vec::with_capacity(PartOfSpeech::TABLES.len());
        for (rdr, pos) in index.into_iter().zip(PartOfSpeech::TABLES) {
            index_tables.push(IndexTable::from_reader(rdr, pos)?);
        }

        info!("Loading data files...");
        let mut data_tables = Vec::with_capacity(PartOfSpeech::TABLES.len());
        for (rdr, pos) in data.into_iter().zip(PartOfSpeech::TABLES) {
            data_tables.push(DataTable::from_reader(rdr, pos)?);
        }
        let data_tables = DataTables::new(data_tables)?;

        info!("Verifying pointers...");
        data_tables.verify_pointers()?;

        info!("Loading sense index...");
        let sense_index = SenseIndex::from_reader(sense, Some(&data_tables))?;

        info!(
            "Loaded {} synsets, {} senses, {} index entries",
            data_tables.num_synsets(),
            sense_index.len(),
            index_tables.iter().map(IndexTable::len).sum::<usize>()
        );

        Ok(DictionaryInner {
            index_tables,
            data_tables,
            sense_index,
        })
    }

    /// 辞書ディレクトリから新しい [`DictionaryInner`] を作成します。
    ///
    /// # 引数
    ///
    /// * `dir` - `index.noun`などのファイルを含むディレクトリ(通常は`.../WordNet-3.0/dict`)
    ///
    /// # エラー
    ///
    /// ファイルを開けない、または読み込めない場合は、そのパスを含む
    /// [`WordNetError::Io`] を返します。その他は [`from_readers()`](Self::from_readers) と同じです。
    pub fn from_dir<P>(dir: P) -> Result<DictionaryInner>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        info!("Reading WordNet files from {}", dir.display());

        let read = |name: &str| -> Result<Vec<u8>> {
            let path = dir.join(name);
            debug!("Reading {}", path.display());
            fs::read(&path).map_err(|e| WordNetError::io(path, e))
        };

        let index = [
            read(PartOfSpeech::Noun.index_file_name())?,
            read(PartOfSpeech::Verb.index_file_name())?,
            read(PartOfSpeech::Adjective.index_file_name())?,
            read(PartOfSpeech::Adverb.index_file_name())?,
        ];
        let data = [
            read(PartOfSpeech::Noun.data_file_name())?,
            read(PartOfSpeech::Verb.data_file_name())?,
            read(PartOfSpeech::Adjective.data_file_name())?,
            read(PartOfSpeech::Adverb.data_file_name())?,
        ];
        let sense = read(SENSE_INDEX_FILE_NAME)?;

        Self::from_readers(DictionarySources {
            index: index.each_ref().map(Vec::as_slice),
            data: data.each_ref().map(Vec::as_slice),
            sense: sense.as_slice(),
        })
    }
}
