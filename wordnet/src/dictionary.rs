//! WordNetデータベースの辞書モジュール。
//!
//! このモジュールは、WordNetのソースファイルの読み込みと、読み込まれた辞書の参照を行います。
//! 主な機能として以下を提供します:
//!
//! - `index.<pos>`、`data.<pos>`、`index.sense`の読み込みと整合性検査
//! - レンマ、品詞、語義番号による参照とシンセット間の関係のたどり
//! - `rkyv`によるコンパイル済み辞書の書き出しと読み込み
//! - Zstandard圧縮されたコンパイル済み辞書の透過的な展開
//!
//! # 辞書の読み込み方法
//!
//! 辞書は複数の方法で読み込むことができます:
//!
//! - [`Dictionary::from_dir`]: WordNetの辞書ディレクトリから読み込む
//! - [`Dictionary::from_path`]: コンパイル済みの辞書ファイルから読み込む
//! - [`Dictionary::read`]: リーダーからコンパイル済みの辞書を読み込む
//! - [`Dictionary::from_zstd`]: Zstandard圧縮されたコンパイル済みの辞書を読み込む
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、任意のリーダーから辞書を構築できます。

pub mod builder;
pub mod data;
pub(crate) mod fields;
pub mod index;
pub mod sense;
pub mod symbol;
pub mod synset;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::info;
use memmap2::Mmap;
use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{
    Archive, Deserialize, Serialize, access, api::serialize_using, ser::Serializer,
    ser::allocator::Arena, ser::sharing::Share, ser::writer::IoWriter, util::with_arena,
};

use crate::dictionary::data::DataTables;
use crate::dictionary::index::{IndexEntry, IndexTable};
use crate::dictionary::sense::{SenseEntry, SenseIndex};
use crate::dictionary::symbol::PartOfSpeech;
use crate::dictionary::synset::{Pointer, Synset, SynsetId};
use crate::errors::{Result, WordNetError};
use crate::utils::normalize_query;

pub use crate::dictionary::builder::{DictionaryBuilder, DictionarySources};

/// コンパイル済み辞書を識別するマジックバイト。
///
/// この定数の"0.1"というバージョンは、辞書フォーマットのバージョンを示しており、
/// クレートのセマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"WordNetRkyv 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;
const DATA_START: usize = MODEL_MAGIC_LEN + PADDING_LEN;

/// [`Dictionary`]の内部データ。
///
/// 品詞ごとのインデックスとシンセット表、およびセンスインデックスを保持します。
#[derive(Archive, Serialize, Deserialize)]
pub struct DictionaryInner {
    pub(crate) index_tables: Vec<IndexTable>,
    pub(crate) data_tables: DataTables,
    pub(crate) sense_index: SenseIndex,
}

impl DictionaryInner {
    /// 辞書データを`rkyv`フォーマットでライターにシリアライズします。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 基礎となる`writer`への書き込みに失敗した場合(例: I/Oエラー)。
    /// - `rkyv`シリアライゼーションプロセスでエラーが発生した場合。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        with_arena(|arena: &mut Arena| {
            let writer = IoWriter::new(&mut wtr);
            let mut serializer = Serializer::new(writer, arena.acquire(), Share::new());
            serialize_using::<_, Error>(self, &mut serializer)
        })
        .map_err(|e| WordNetError::invalid_state("rkyv serialization failed", e.to_string()))?;

        Ok(())
    }

    /// 表が品詞ごとに1つずつ、所定の順序で並んでいることを確認します。
    fn check_layout(&self) -> Result<()> {
        let in_order = self.index_tables.len() == PartOfSpeech::TABLES.len()
            && self
                .index_tables
                .iter()
                .zip(PartOfSpeech::TABLES)
                .all(|(t, pos)| t.pos() == pos);
        if !in_order {
            return Err(WordNetError::invalid_argument(
                "index_tables",
                "one index table per part of speech is required, in noun, verb, adj, adv order",
            ));
        }
        self.data_tables.check_layout()
    }
}

/// WordNetの読み取り専用辞書。
///
/// 読み込み完了後は変更されません。内部データは[`Arc`]で共有されるため、
/// クローンは安価で、複数のスレッドからロックなしで同時に参照できます。
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<DictionaryInner>,
}

impl Dictionary {
    /// `DictionaryInner`から辞書を作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 辞書の内部データ。
    pub fn from_inner(dict: DictionaryInner) -> Self {
        Self {
            inner: Arc::new(dict),
        }
    }

    /// WordNetの辞書ディレクトリから辞書を読み込みます。
    ///
    /// [`DictionaryBuilder::from_dir`]の簡易版です。
    ///
    /// # エラー
    ///
    /// ファイルが存在しない、読み込めない、フォーマットが不正、または参照が解決できない場合に
    /// エラーを返します。
    pub fn from_dir<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        DictionaryBuilder::from_dir(dir).map(Self::from_inner)
    }

    /// 辞書データを`rkyv`フォーマットを使用してライターにシリアライズします。
    ///
    /// この関数の出力バイナリは、[`Dictionary::read`]や[`Dictionary::from_path`]が
    /// 期待する形式です。
    ///
    /// # エラー
    ///
    /// 書き込みまたはシリアライゼーションに失敗した場合にエラーを返します。
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        self.inner.write(wtr)
    }

    /// リーダーからコンパイル済みの辞書を読み込みます。
    ///
    /// アーカイブは検証された後、所有されたデータにデシリアライズされます。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - データを読み込めない場合。
    /// - マジックナンバーが一致しない場合。
    /// - アーカイブが破損している、または互換性がない場合。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if magic.as_slice() != MODEL_MAGIC {
            return Err(WordNetError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        Self::from_archive_bytes(&buffer)
    }

    /// メモリマッピングを使用してファイルパスからコンパイル済みの辞書を読み込みます。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - ファイルを開けない、または読み込めない場合。
    /// - ファイルが破損している、またはマジックナンバーが一致しない場合。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| WordNetError::io(path, e))?;

        // SAFETY: the mapping is read-only and dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| WordNetError::io(path, e))?;

        if !mmap.starts_with(MODEL_MAGIC) {
            return Err(WordNetError::invalid_argument(
                "path",
                "The magic number of the input model mismatches.",
            ));
        }
        let Some(data_bytes) = mmap.get(DATA_START..) else {
            return Err(WordNetError::invalid_argument(
                "path",
                "Dictionary file too small or corrupted.",
            ));
        };

        info!("Loading compiled dictionary from {}", path.display());
        Self::from_archive_bytes(data_bytes)
    }

    /// Zstandard圧縮されたコンパイル済みの辞書を読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、展開に失敗した場合、または展開結果が
    /// 有効な辞書でない場合にエラーを返します。
    pub fn from_zstd<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| WordNetError::io(path, e))?;
        let decoder = zstd::Decoder::new(file)?;

        info!("Loading compressed dictionary from {}", path.display());
        Self::read(decoder)
    }

    fn from_archive_bytes(bytes: &[u8]) -> Result<Self> {
        let mut aligned_bytes = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(bytes.len());
        aligned_bytes.extend_from_slice(bytes);

        let archived = access::<ArchivedDictionaryInner, Error>(&aligned_bytes).map_err(|e| {
            WordNetError::invalid_state(
                "rkyv validation failed. The dictionary file may be corrupted or incompatible.",
                e.to_string(),
            )
        })?;
        let inner = rkyv::deserialize::<DictionaryInner, Error>(archived)
            .map_err(|e| WordNetError::invalid_state("rkyv deserialization failed", e.to_string()))?;
        inner.check_layout()?;

        Ok(Self::from_inner(inner))
    }

    /// レンマと品詞でインデックスのエントリを取得します。
    ///
    /// レンマは大文字小文字を区別せず、アンダースコアは空白として扱われます。
    /// 衛星形容詞は形容詞のインデックスで検索されます。
    ///
    /// # 戻り値
    ///
    /// その品詞の語義を持たない場合は`None`
    pub fn lookup_index(&self, lemma: &str, pos: PartOfSpeech) -> Option<&IndexEntry> {
        self.index_table(pos).get(&normalize_query(lemma))
    }

    /// レンマのすべての語義を、品詞を問わずファイルの順序で返します。
    ///
    /// 未知のレンマの場合は空のスライスを返します。
    pub fn lookup(&self, lemma: &str) -> &[SenseEntry] {
        self.inner.sense_index.get(lemma)
    }

    /// レンマの語義のうち、指定した品詞のものを順序を保って返します。
    ///
    /// `Adjective`を指定すると衛星形容詞の語義も含まれます。
    pub fn lookup_senses(&self, lemma: &str, pos: PartOfSpeech) -> Vec<&SenseEntry> {
        self.lookup(lemma)
            .iter()
            .filter(|e| pos.matches(e.pos))
            .collect()
    }

    /// レンマ、品詞、語義番号で1つの語義を取得します。
    pub fn lookup_sense(
        &self,
        lemma: &str,
        pos: PartOfSpeech,
        sense_number: u32,
    ) -> Option<&SenseEntry> {
        self.lookup(lemma)
            .iter()
            .find(|e| pos.matches(e.pos) && e.sense_number == sense_number)
    }

    /// 品詞とオフセットでシンセットを取得します。
    ///
    /// 衛星形容詞は形容詞の表に読み替えられます。未知のオフセットの場合は`None`を返します。
    pub fn synset(&self, pos: PartOfSpeech, offset: u32) -> Option<&Synset> {
        self.synset_by_id(SynsetId::new(pos, offset))
    }

    /// 識別子でシンセットを取得します。
    #[inline(always)]
    pub fn synset_by_id(&self, id: SynsetId) -> Option<&Synset> {
        self.inner.data_tables.synset(id)
    }

    /// 語義が属するシンセットを取得します。
    pub fn synset_of(&self, sense: &SenseEntry) -> Option<&Synset> {
        let id = sense
            .synset
            .unwrap_or_else(|| SynsetId::new(sense.pos, sense.synset_offset));
        self.synset_by_id(id)
    }

    /// シンセットの関係ポインタと、その参照先のシンセットの組を返します。
    pub fn pointer_targets<'a>(
        &'a self,
        synset: &'a Synset,
    ) -> impl Iterator<Item = (&'a Pointer, &'a Synset)> + 'a {
        synset
            .pointers()
            .iter()
            .filter_map(|p| self.synset_by_id(p.target).map(|t| (p, t)))
    }

    /// すべてのシンセットを返します。
    ///
    /// 呼び出すたびに独立したイテレータを返します。品詞間の順序は名詞、動詞、形容詞、副詞です。
    pub fn synsets(&self) -> impl Iterator<Item = &Synset> + '_ {
        self.inner
            .data_tables
            .tables()
            .flat_map(|t| t.synsets())
    }

    /// すべての語義を返します。
    ///
    /// 呼び出すたびに独立したイテレータを返します。
    pub fn senses(&self) -> impl Iterator<Item = &SenseEntry> + '_ {
        self.inner.sense_index.entries()
    }

    /// 品詞のインデックスのすべてのエントリを返します。
    pub fn index_entries(&self, pos: PartOfSpeech) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.index_table(pos).entries()
    }

    /// シンセットの総数を返します。
    pub fn num_synsets(&self) -> usize {
        self.inner.data_tables.num_synsets()
    }

    /// 語義の総数を返します。
    pub fn num_senses(&self) -> usize {
        self.inner.sense_index.len()
    }

    /// 品詞のインデックスのエントリ数を返します。
    pub fn num_index_entries(&self, pos: PartOfSpeech) -> usize {
        self.index_table(pos).len()
    }

    #[inline(always)]
    fn index_table(&self, pos: PartOfSpeech) -> &IndexTable {
        &self.inner.index_tables[pos.table_index()]
    }
}
