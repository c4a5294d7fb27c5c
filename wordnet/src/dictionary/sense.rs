//! センスインデックス(`index.sense`)のデコーダ
//!
//! 各行はセンスキー、シンセットのオフセット、語義番号、タグ頻度からなります。
//! センスキーは`lemma%ss_type:lex_filenum:lex_id:head_word:head_id`の形式です。

use std::io::Read;

use hashbrown::{HashMap, HashSet};
use log::debug;
use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::data::DataTables;
use crate::dictionary::fields::{Fields, Records, read_text};
use crate::dictionary::symbol::{PartOfSpeech, lex_file_name};
use crate::dictionary::synset::SynsetId;
use crate::errors::{Result, WordNetError};
use crate::utils::{normalize_query, read_stored_lemma, write_stored_lemma};

/// センスインデックスのファイル名
pub const SENSE_INDEX_FILE_NAME: &str = "index.sense";

/// センスインデックスの1エントリ
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct SenseEntry {
    pub(crate) lemma: String,
    pub(crate) pos: PartOfSpeech,
    pub(crate) lex_filenum: u8,
    pub(crate) lex_id: u8,
    pub(crate) head_word: Option<String>,
    pub(crate) head_id: Option<u8>,
    pub(crate) synset_offset: u32,
    pub(crate) sense_number: u32,
    pub(crate) tag_count: u32,
    pub(crate) synset: Option<SynsetId>,
}

impl SenseEntry {
    /// レンマを返します。
    #[inline(always)]
    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// 品詞を返します。衛星形容詞の語義では`AdjectiveSatellite`です。
    #[inline(always)]
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    /// 語彙ファイル番号を返します。
    #[inline(always)]
    pub fn lex_filenum(&self) -> u8 {
        self.lex_filenum
    }

    /// 語彙ファイル名(例: `noun.animal`)を返します。
    pub fn lex_file_name(&self) -> Option<&'static str> {
        lex_file_name(self.lex_filenum)
    }

    /// 語彙IDを返します。
    #[inline(always)]
    pub fn lex_id(&self) -> u8 {
        self.lex_id
    }

    /// 衛星形容詞の中心となる形容詞のレンマを返します。
    #[inline(always)]
    pub fn head_word(&self) -> Option<&str> {
        self.head_word.as_deref()
    }

    /// 中心となる形容詞の語彙IDを返します。
    #[inline(always)]
    pub fn head_id(&self) -> Option<u8> {
        self.head_id
    }

    /// シンセットのオフセットを返します。
    #[inline(always)]
    pub fn synset_offset(&self) -> u32 {
        self.synset_offset
    }

    /// 1始まりの語義番号を返します。
    #[inline(always)]
    pub fn sense_number(&self) -> u32 {
        self.sense_number
    }

    /// 意味タグ付きコーパスでの出現回数を返します。
    #[inline(always)]
    pub fn tag_count(&self) -> u32 {
        self.tag_count
    }

    /// 解決済みのシンセット識別子を返します。
    ///
    /// データを与えずにデコードした場合は`None`です。
    #[inline(always)]
    pub fn synset(&self) -> Option<SynsetId> {
        self.synset
    }

    /// センスキーを組み立て直します。
    ///
    /// # 例
    ///
    /// ```
    /// use wordnet_rkyv::SenseIndex;
    ///
    /// let index = SenseIndex::from_reader("hot_dog%1:13:01:: 07697100 1 5\n".as_bytes(), None)?;
    /// let entry = &index.get("hot dog")[0];
    /// assert_eq!(entry.sense_key(), "hot_dog%1:13:01::");
    /// # Ok::<(), wordnet_rkyv::errors::WordNetError>(())
    /// ```
    pub fn sense_key(&self) -> String {
        let head_word = self
            .head_word
            .as_deref()
            .map(write_stored_lemma)
            .unwrap_or_default();
        let head_id = self
            .head_id
            .map(|id| format!("{id:02}"))
            .unwrap_or_default();
        format!(
            "{}%{}:{:02}:{:02}:{head_word}:{head_id}",
            write_stored_lemma(&self.lemma).to_lowercase(),
            self.pos.code(),
            self.lex_filenum,
            self.lex_id,
        )
    }
}

/// レンマから語義の列への対応表
#[derive(Archive, Serialize, Deserialize)]
pub struct SenseIndex {
    lemmas: HashMap<String, Vec<SenseEntry>>,
    len: usize,
}

impl SenseIndex {
    /// センスインデックスを読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - `index.sense`のリーダー
    /// * `data` - 参照を解決するシンセット表。`None`の場合は解決しません。
    ///
    /// # エラー
    ///
    /// 行の文法違反、`(lemma, pos, sense_number)`の重複は[`WordNetError::InvalidFormat`]、
    /// 存在しないシンセットやレンマを含まないシンセットへの参照は
    /// [`WordNetError::Integrity`]になります。このファイルにはヘッダがないため、空白で始まる行は
    /// すべてフォーマットエラーです。読み込みの失敗は[`WordNetError::Io`]になります。
    pub fn from_reader<R>(rdr: R, data: Option<&DataTables>) -> Result<Self>
    where
        R: Read,
    {
        let text = read_text(rdr, SENSE_INDEX_FILE_NAME)?;

        let mut lemmas: HashMap<String, Vec<SenseEntry>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut len = 0;
        for record in Records::new(SENSE_INDEX_FILE_NAME, &text, false) {
            let (line_no, line) = record?;
            let mut entry = Self::parse_line(line_no, line)?;

            let key = normalize_query(&entry.lemma);
            if !seen.insert((key.clone(), entry.pos.table_pos(), entry.sense_number)) {
                return Err(WordNetError::invalid_format(
                    SENSE_INDEX_FILE_NAME,
                    line_no,
                    format!(
                        "duplicate sense number {} for {:?} ({})",
                        entry.sense_number, entry.lemma, entry.pos
                    ),
                ));
            }

            if let Some(data) = data {
                entry.synset = Some(Self::resolve(data, &entry, line_no)?);
            }
            lemmas.entry(key).or_default().push(entry);
            len += 1;
        }
        debug!("{SENSE_INDEX_FILE_NAME}: {len} senses of {} lemmas", lemmas.len());

        Ok(Self { lemmas, len })
    }

    fn parse_line(line_no: usize, line: &str) -> Result<SenseEntry> {
        let mut fields = Fields::new(SENSE_INDEX_FILE_NAME, line_no, line);

        let sense_key = fields.next_str("sense_key")?;
        let invalid_key = || fields.error(format!("malformed sense key {sense_key:?}"));
        let (lemma, lex_sense) = sense_key.split_once('%').ok_or_else(invalid_key)?;
        let mut parts = lex_sense.split(':');
        let (Some(ss_type), Some(lex_filenum), Some(lex_id), Some(head_word), Some(head_id), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(invalid_key());
        };
        let pos = ss_type
            .parse()
            .ok()
            .and_then(PartOfSpeech::from_code)
            .ok_or_else(invalid_key)?;
        let lex_filenum = lex_filenum.parse().map_err(|_| invalid_key())?;
        if lex_file_name(lex_filenum).is_none() {
            return Err(fields.error(format!("unknown lex_filenum {lex_filenum} in {sense_key:?}")));
        }
        let lex_id = lex_id.parse().map_err(|_| invalid_key())?;
        let head_word = (!head_word.is_empty()).then(|| read_stored_lemma(head_word));
        let head_id = if head_id.is_empty() {
            None
        } else {
            Some(head_id.parse().map_err(|_| invalid_key())?)
        };
        let lemma = read_stored_lemma(lemma);

        let synset_offset = fields.next_dec("synset_offset")?;
        let sense_number = fields.next_dec("sense_number")?;
        let tag_count = fields.next_dec("tag_cnt")?;
        fields.finish()?;

        Ok(SenseEntry {
            lemma,
            pos,
            lex_filenum,
            lex_id,
            head_word,
            head_id,
            synset_offset,
            sense_number,
            tag_count,
            synset: None,
        })
    }

    fn resolve(data: &DataTables, entry: &SenseEntry, line_no: usize) -> Result<SynsetId> {
        let id = SynsetId::new(entry.pos, entry.synset_offset);
        let synset = data.synset(id).ok_or_else(|| {
            WordNetError::integrity(
                SENSE_INDEX_FILE_NAME,
                format!(
                    "line {line_no}: sense of {:?} refers to missing {} synset {:08}",
                    entry.lemma, id.pos, id.offset
                ),
            )
        })?;
        if !synset.contains_lemma(&entry.lemma) {
            return Err(WordNetError::integrity(
                SENSE_INDEX_FILE_NAME,
                format!(
                    "line {line_no}: {} synset {:08} does not contain {:?}",
                    id.pos, id.offset, entry.lemma
                ),
            ));
        }
        Ok(id)
    }

    /// レンマのすべての語義をファイルの順序で返します。
    ///
    /// レンマは大文字小文字を区別せず、アンダースコアは空白として扱われます。
    /// 未知のレンマの場合は空のスライスを返します。
    pub fn get(&self, lemma: &str) -> &[SenseEntry] {
        self.lemmas
            .get(&normalize_query(lemma))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// すべての語義を返します。
    ///
    /// レンマ間の順序は不定ですが、同じレンマの語義はファイルの順序で続きます。
    pub fn entries(&self) -> impl Iterator<Item = &SenseEntry> + '_ {
        self.lemmas.values().flatten()
    }

    /// レンマの数を返します。
    #[inline(always)]
    pub fn num_lemmas(&self) -> usize {
        self.lemmas.len()
    }

    /// 語義の総数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 語義が空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use crate::dictionary::data::DataTable;
    use crate::tests::BrokenReader;

    fn tables(noun: &str) -> DataTables {
        DataTables::new(vec![
            DataTable::from_reader(noun.as_bytes(), PartOfSpeech::Noun).unwrap(),
            DataTable::from_reader("".as_bytes(), PartOfSpeech::Verb).unwrap(),
            DataTable::from_reader("".as_bytes(), PartOfSpeech::Adjective).unwrap(),
            DataTable::from_reader("".as_bytes(), PartOfSpeech::Adverb).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_unresolved() {
        let data = "dog%1:05:00::  12345678 1 3\ndog%1:18:01:: 10114209 2 0\n";
        let index = SenseIndex::from_reader(data.as_bytes(), None).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.num_lemmas(), 1);

        let senses = index.get("Dog");
        assert_eq!(senses.len(), 2);
        assert_eq!(senses[0].lemma(), "dog");
        assert_eq!(senses[0].pos(), PartOfSpeech::Noun);
        assert_eq!(senses[0].lex_filenum(), 5);
        assert_eq!(senses[0].lex_file_name(), Some("noun.animal"));
        assert_eq!(senses[0].lex_id(), 0);
        assert_eq!(senses[0].head_word(), None);
        assert_eq!(senses[0].head_id(), None);
        assert_eq!(senses[0].synset_offset(), 12345678);
        assert_eq!(senses[0].sense_number(), 1);
        assert_eq!(senses[0].tag_count(), 3);
        assert_eq!(senses[0].synset(), None);
        assert_eq!(senses[1].lex_id(), 1);
        assert_eq!(senses[1].sense_number(), 2);

        assert!(index.get("cat").is_empty());
    }

    #[test]
    fn test_satellite_head() {
        let data = "good_enough%5:00:00:good:00 01123879 2 0\n";
        let index = SenseIndex::from_reader(data.as_bytes(), None).unwrap();
        let entry = &index.get("good_enough")[0];
        assert_eq!(entry.lemma(), "good enough");
        assert_eq!(entry.pos(), PartOfSpeech::AdjectiveSatellite);
        assert_eq!(entry.head_word(), Some("good"));
        assert_eq!(entry.head_id(), Some(0));
        assert_eq!(entry.sense_key(), "good_enough%5:00:00:good:00");
    }

    #[test]
    fn test_resolved() {
        let noun = "12345678 05 n 02 Dog 0 domestic_dog 0 000 | a domesticated canid\n";
        let data = "dog%1:05:00:: 12345678 1 3\ndomestic_dog%1:05:00:: 12345678 1 0\n";
        let index = SenseIndex::from_reader(data.as_bytes(), Some(&tables(noun))).unwrap();
        assert_eq!(
            index.get("dog")[0].synset(),
            Some(SynsetId::new(PartOfSpeech::Noun, 12345678))
        );
        assert_eq!(index.entries().count(), 2);
    }

    #[test]
    fn test_missing_synset() {
        let data = "dog%1:05:00:: 12345678 1 3\n";
        let err = SenseIndex::from_reader(data.as_bytes(), Some(&tables(""))).err();
        assert!(matches!(err, Some(WordNetError::Integrity(ref e)) if e.file() == "index.sense"));
    }

    #[test]
    fn test_synset_without_lemma() {
        let noun = "12345678 05 n 01 cat 0 000 | a feline\n";
        let data = "dog%1:05:00:: 12345678 1 3\n";
        let err = SenseIndex::from_reader(data.as_bytes(), Some(&tables(noun))).err();
        assert!(matches!(err, Some(WordNetError::Integrity(_))));
    }

    #[test]
    fn test_duplicate_sense_number() {
        let data = "dog%1:05:00:: 12345678 1 3\ndog%1:18:01:: 10114209 1 0\n";
        let err = SenseIndex::from_reader(data.as_bytes(), None).err();
        assert!(matches!(err, Some(WordNetError::InvalidFormat(ref e)) if e.line() == 2));

        // Same number in different parts of speech is fine.
        let data = "dog%1:05:00:: 12345678 1 3\ndog%2:38:00:: 02001858 1 0\n";
        assert!(SenseIndex::from_reader(data.as_bytes(), None).is_ok());
    }

    #[test]
    fn test_malformed_lines() {
        let cases = [
            "dog 12345678 1 3\n",
            "dog%1:05:00: 12345678 1 3\n",
            "dog%1:05:00::::: 12345678 1 3\n",
            "dog%9:05:00:: 12345678 1 3\n",
            "dog%1:xx:00:: 12345678 1 3\n",
            "dog%1:05:00::x 12345678 1 3\n",
            "dog%1:05:00:: 12345678 1\n",
            "dog%1:05:00:: 12345678 1 3 4\n",
            "dog%1:05:00:: offset 1 3\n",
            "dog%1:45:00:: 12345678 1 3\n",
        ];
        for case in cases {
            let err = SenseIndex::from_reader(case.as_bytes(), None).err();
            assert!(
                matches!(err, Some(WordNetError::InvalidFormat(ref e)) if e.line() == 1),
                "{case}"
            );
        }
    }

    #[test]
    fn test_leading_space_is_an_error() {
        let data = "dog%1:05:00:: 12345678 1 3\n dog%1:18:01:: 10114209 2 0\n";
        let err = SenseIndex::from_reader(data.as_bytes(), None).err();
        assert!(matches!(
            err,
            Some(WordNetError::InvalidFormat(ref e)) if e.file() == "index.sense" && e.line() == 2
        ));

        // index.sense has no license header.
        let data = "  1 This software and database is being provided\ndog%1:05:00:: 12345678 1 3\n";
        assert!(SenseIndex::from_reader(data.as_bytes(), None).is_err());
    }

    #[test]
    fn test_read_failure_names_file() {
        let rdr = BrokenReader {
            head: b"dog%1:05:00:: 12345678 1 3\n",
        };
        match SenseIndex::from_reader(rdr, None) {
            Err(WordNetError::Io { path, .. }) => assert_eq!(path, Path::new("index.sense")),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("reading succeeded"),
        }
    }
}
