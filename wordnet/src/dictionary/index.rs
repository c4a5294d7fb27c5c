//! インデックスファイル(`index.<pos>`)のデコーダ
//!
//! 各行は1つのレンマに対応し、そのレンマが属するシンセットのオフセットを
//! 頻度の高い順に並べたものです。

use std::io::Read;

use hashbrown::HashMap;
use log::debug;
use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::fields::{Fields, Records, read_text};
use crate::dictionary::symbol::{PartOfSpeech, Relation};
use crate::errors::{Result, WordNetError};
use crate::utils::normalize_query;

/// 品詞ごとのレンマのエントリ
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct IndexEntry {
    pub(crate) lemma: String,
    pub(crate) pos: PartOfSpeech,
    pub(crate) pointer_symbols: Vec<Relation>,
    pub(crate) sense_count: u32,
    pub(crate) tagsense_count: u32,
    pub(crate) synset_offsets: Vec<u32>,
}

impl IndexEntry {
    /// 小文字化されたレンマを返します。
    #[inline(always)]
    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// 品詞を返します。
    #[inline(always)]
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    /// このレンマのいずれかの語義に現れる関係の種類を返します。
    #[inline(always)]
    pub fn pointer_symbols(&self) -> &[Relation] {
        &self.pointer_symbols
    }

    /// 語義数を返します。
    #[inline(always)]
    pub fn sense_count(&self) -> u32 {
        self.sense_count
    }

    /// 意味タグ付きコーパスに出現する語義の数を返します。
    #[inline(always)]
    pub fn tagsense_count(&self) -> u32 {
        self.tagsense_count
    }

    /// シンセットのオフセットをファイルの順序(頻度の高い順)で返します。
    #[inline(always)]
    pub fn synset_offsets(&self) -> &[u32] {
        &self.synset_offsets
    }

    /// シンセットの数を返します。
    #[inline(always)]
    pub fn synset_count(&self) -> usize {
        self.synset_offsets.len()
    }
}

/// 1つの品詞のインデックス
#[derive(Archive, Serialize, Deserialize)]
pub struct IndexTable {
    pos: PartOfSpeech,
    entries: HashMap<String, IndexEntry>,
}

impl IndexTable {
    /// インデックスファイルを読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - `index.<pos>`のリーダー
    /// * `pos` - ファイルの品詞
    ///
    /// # エラー
    ///
    /// 行の文法違反、品詞タグの不一致、未知のポインタ記号、宣言されたシンセット数と
    /// オフセット数の不一致、レンマの重複、ヘッダ以降の空白で始まる行は[`WordNetError::InvalidFormat`]になります。
    /// 読み込みの失敗は、ファイル名を含む[`WordNetError::Io`]になります。
    pub fn from_reader<R>(rdr: R, pos: PartOfSpeech) -> Result<Self>
    where
        R: Read,
    {
        let pos = pos.table_pos();
        let name = pos.index_file_name();

        let text = read_text(rdr, name)?;

        let mut entries = HashMap::new();
        for record in Records::new(name, &text, true) {
            let (line_no, line) = record?;
            let entry = Self::parse_line(name, line_no, line, pos)?;
            let lemma = entry.lemma.clone();
            if entries.insert(lemma, entry).is_some() {
                return Err(WordNetError::invalid_format(
                    name,
                    line_no,
                    "duplicate lemma",
                ));
            }
        }
        debug!("{name}: {} lemmas", entries.len());

        Ok(Self { pos, entries })
    }

    fn parse_line(
        name: &'static str,
        line_no: usize,
        line: &str,
        pos: PartOfSpeech,
    ) -> Result<IndexEntry> {
        let mut fields = Fields::new(name, line_no, line);

        let lemma = normalize_query(fields.next_str("lemma")?);
        let tag = fields.next_str("pos")?;
        match PartOfSpeech::from_tag(tag) {
            Some(p) if p.table_pos() == pos => (),
            Some(_) => {
                return Err(fields.error(format!("part of speech {tag:?} does not belong in {name}")));
            }
            None => return Err(fields.error(format!("unknown part of speech {tag:?}"))),
        }

        let synset_cnt: usize = fields.next_dec("synset_cnt")?;
        let p_cnt: usize = fields.next_dec("p_cnt")?;
        let mut pointer_symbols = Vec::with_capacity(p_cnt.min(fields.remaining()));
        for _ in 0..p_cnt {
            let symbol = fields.next_str("ptr_symbol")?;
            let relation = Relation::from_symbol(symbol)
                .ok_or_else(|| fields.error(format!("unknown pointer symbol {symbol:?}")))?;
            pointer_symbols.push(relation);
        }
        let sense_count = fields.next_dec("sense_cnt")?;
        let tagsense_count = fields.next_dec("tagsense_cnt")?;

        let found = fields.remaining();
        if found != synset_cnt {
            return Err(fields.error(format!(
                "synset_cnt is {synset_cnt}, but {found} synset offsets follow"
            )));
        }
        let mut synset_offsets = Vec::with_capacity(synset_cnt);
        for _ in 0..synset_cnt {
            synset_offsets.push(fields.next_dec("synset_offset")?);
        }
        fields.finish()?;

        Ok(IndexEntry {
            lemma,
            pos,
            pointer_symbols,
            sense_count,
            tagsense_count,
            synset_offsets,
        })
    }

    /// 品詞を返します。
    #[inline(always)]
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    /// 正規化済みのレンマでエントリを取得します。
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    /// すべてのエントリを順不同で返します。
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.entries.values()
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// エントリが空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
