//! データファイル(`data.<pos>`)のデコーダ
//!
//! 各行は1つのシンセットです。フィールドごとに基数が異なる点に注意してください。
//! 単語数・語彙ID・ポインタの単語番号・フレームの単語番号は16進数、
//! それ以外の数値は10進数です。

use std::io::Read;

use hashbrown::HashMap;
use log::debug;
use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::fields::{Fields, Records, read_text};
use crate::dictionary::symbol::{PartOfSpeech, Relation, SyntacticMarker, lex_file_name};
use crate::dictionary::synset::{Frame, Pointer, Synset, SynsetId, Word};
use crate::errors::{Result, WordNetError};

/// 1つの品詞のシンセット表
#[derive(Archive, Serialize, Deserialize)]
pub struct DataTable {
    pos: PartOfSpeech,
    synsets: HashMap<u32, Synset>,
}

impl DataTable {
    /// データファイルを読み込みます。
    ///
    /// 衛星形容詞のシンセットは形容詞の表に格納されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - `data.<pos>`のリーダー
    /// * `pos` - ファイルの品詞
    ///
    /// # エラー
    ///
    /// 行の文法違反、未知のポインタ記号や品詞、範囲外の語彙ファイル番号、
    /// オフセットの重複、ヘッダ以降の空白で始まる行は[`WordNetError::InvalidFormat`]になります。
    /// 読み込みの失敗は、ファイル名を含む[`WordNetError::Io`]になります。
    /// ポインタの参照先はここでは検査されません。[`DataTables::verify_pointers`]を参照してください。
    pub fn from_reader<R>(rdr: R, pos: PartOfSpeech) -> Result<Self>
    where
        R: Read,
    {
        let pos = pos.table_pos();
        let name = pos.data_file_name();

        let text = read_text(rdr, name)?;

        let mut synsets = HashMap::new();
        for record in Records::new(name, &text, true) {
            let (line_no, line) = record?;
            let synset = Self::parse_line(name, line_no, line, pos)?;
            if synsets.insert(synset.offset, synset).is_some() {
                return Err(WordNetError::invalid_format(
                    name,
                    line_no,
                    "duplicate synset offset",
                ));
            }
        }
        debug!("{name}: {} synsets", synsets.len());

        Ok(Self { pos, synsets })
    }

    fn parse_line(
        name: &'static str,
        line_no: usize,
        line: &str,
        pos: PartOfSpeech,
    ) -> Result<Synset> {
        let Some((record, gloss)) = line.split_once('|') else {
            return Err(WordNetError::invalid_format(
                name,
                line_no,
                "missing gloss separator '|'",
            ));
        };
        let mut fields = Fields::new(name, line_no, record);

        let offset = fields.next_dec("synset_offset")?;
        let lex_filenum = fields.next_dec("lex_filenum")?;
        if lex_file_name(lex_filenum).is_none() {
            return Err(fields.error(format!("unknown lex_filenum {lex_filenum}")));
        }
        let ss_type = fields.next_str("ss_type")?;
        let synset_pos = match PartOfSpeech::from_tag(ss_type) {
            Some(p) if p.table_pos() == pos => p,
            Some(_) => {
                return Err(fields.error(format!("ss_type {ss_type:?} does not belong in {name}")));
            }
            None => return Err(fields.error(format!("unknown ss_type {ss_type:?}"))),
        };

        let w_cnt: u8 = fields.next_hex("w_cnt")?;
        if w_cnt == 0 {
            return Err(fields.error("synset has no words"));
        }
        let mut words = Vec::with_capacity(usize::from(w_cnt));
        for _ in 0..w_cnt {
            let word = fields.next_str("word")?;
            let lex_id = fields.next_hex("lex_id")?;
            let (word, marker) = SyntacticMarker::split(word);
            words.push(Word {
                lemma: word.replace('_', " "),
                lex_id,
                marker,
            });
        }

        let p_cnt: usize = fields.next_dec("p_cnt")?;
        let mut pointers = Vec::with_capacity(p_cnt.min(fields.remaining()));
        for _ in 0..p_cnt {
            let pointer = Self::parse_pointer(&mut fields)?;
            if let Some(n) = pointer.source_word
                && n > w_cnt
            {
                return Err(fields.error(format!(
                    "source word {n} is out of range for {w_cnt} words"
                )));
            }
            pointers.push(pointer);
        }

        let mut frames = vec![];
        if fields.remaining() != 0 && synset_pos == PartOfSpeech::Verb {
            let f_cnt: usize = fields.next_dec("f_cnt")?;
            frames.reserve(f_cnt.min(fields.remaining()));
            for _ in 0..f_cnt {
                let plus = fields.next_str("frame marker")?;
                if plus != "+" {
                    return Err(fields.error(format!("expected '+' before a frame, found {plus:?}")));
                }
                let frame_number = fields.next_dec("f_num")?;
                let word_number: u8 = fields.next_hex("w_num")?;
                frames.push(Frame {
                    frame_number,
                    word_number: (word_number != 0).then_some(word_number),
                });
            }
        }
        fields.finish()?;

        Ok(Synset {
            offset,
            lex_filenum,
            pos: synset_pos,
            words,
            pointers,
            frames,
            gloss: gloss.trim().to_string(),
        })
    }

    fn parse_pointer(fields: &mut Fields<'_>) -> Result<Pointer> {
        let symbol = fields.next_str("pointer_symbol")?;
        let relation = Relation::from_symbol(symbol)
            .ok_or_else(|| fields.error(format!("unknown pointer symbol {symbol:?}")))?;
        let target_offset = fields.next_dec("target synset_offset")?;
        let tag = fields.next_str("target pos")?;
        let target_pos = PartOfSpeech::from_tag(tag)
            .ok_or_else(|| fields.error(format!("unknown target pos {tag:?}")))?;
        let st = fields.next_str("source/target")?;
        let words = (st.len() == 4)
            .then(|| u16::from_str_radix(st, 16).ok())
            .flatten()
            .ok_or_else(|| fields.error(format!("source/target must be 4 hexadecimal digits, {st:?}")))?;
        let [source, target] = words.to_be_bytes();

        Ok(Pointer {
            relation,
            target: SynsetId::new(target_pos, target_offset),
            source_word: (source != 0).then_some(source),
            target_word: (target != 0).then_some(target),
        })
    }

    /// 品詞を返します。
    #[inline(always)]
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    /// オフセットでシンセットを取得します。
    #[inline(always)]
    pub fn get(&self, offset: u32) -> Option<&Synset> {
        self.synsets.get(&offset)
    }

    /// すべてのシンセットを順不同で返します。
    pub fn synsets(&self) -> impl Iterator<Item = &Synset> + '_ {
        self.synsets.values()
    }

    /// シンセット数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    /// シンセットが空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }
}

/// 4つの品詞のシンセット表の集合
///
/// [`PartOfSpeech::TABLES`]の順序で格納されます。
#[derive(Archive, Serialize, Deserialize)]
pub struct DataTables {
    tables: Vec<DataTable>,
}

impl DataTables {
    /// 品詞ごとの表から作成します。
    ///
    /// # エラー
    ///
    /// 表の品詞が[`PartOfSpeech::TABLES`]の順序と一致しない場合にエラーを返します。
    pub fn new(tables: Vec<DataTable>) -> Result<Self> {
        let tables = Self { tables };
        tables.check_layout()?;
        Ok(tables)
    }

    /// 表が品詞ごとに1つずつ、所定の順序で並んでいることを確認します。
    pub(crate) fn check_layout(&self) -> Result<()> {
        let in_order = self.tables.len() == PartOfSpeech::TABLES.len()
            && self
                .tables
                .iter()
                .zip(PartOfSpeech::TABLES)
                .all(|(t, pos)| t.pos == pos);
        if !in_order {
            return Err(WordNetError::invalid_argument(
                "tables",
                "one data table per part of speech is required, in noun, verb, adj, adv order",
            ));
        }
        Ok(())
    }

    /// 品詞の表を返します。
    ///
    /// 衛星形容詞は形容詞の表に読み替えられます。
    #[inline(always)]
    pub fn table(&self, pos: PartOfSpeech) -> &DataTable {
        &self.tables[pos.table_index()]
    }

    /// 識別子でシンセットを取得します。
    #[inline(always)]
    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.table(id.pos).get(id.offset)
    }

    /// すべての表を[`PartOfSpeech::TABLES`]の順序で返します。
    pub fn tables(&self) -> impl Iterator<Item = &DataTable> + '_ {
        self.tables.iter()
    }

    /// すべての関係ポインタの参照先が存在することを検査します。
    ///
    /// # エラー
    ///
    /// 参照先のシンセットが存在しない場合、または参照先の単語番号が
    /// 参照先シンセットの単語数を超える場合に[`WordNetError::Integrity`]を返します。
    pub fn verify_pointers(&self) -> Result<()> {
        for table in &self.tables {
            let name = table.pos.data_file_name();
            for synset in table.synsets() {
                for pointer in synset.pointers() {
                    let target = pointer.target;
                    let Some(dest) = self.synset(target) else {
                        return Err(WordNetError::integrity(
                            name,
                            format!(
                                "{} pointer of synset {:08} refers to missing {} synset {:08}",
                                pointer.relation,
                                synset.offset,
                                target.pos,
                                target.offset
                            ),
                        ));
                    };
                    if let Some(n) = pointer.target_word
                        && usize::from(n) > dest.words.len()
                    {
                        return Err(WordNetError::integrity(
                            name,
                            format!(
                                "{} pointer of synset {:08} refers to word {n} of synset {:08}, which has {} words",
                                pointer.relation,
                                synset.offset,
                                dest.offset,
                                dest.words.len()
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// シンセットの総数を返します。
    pub fn num_synsets(&self) -> usize {
        self.tables.iter().map(DataTable::len).sum()
    }
}
