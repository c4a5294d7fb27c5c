//! シンセットとその構成要素
//!
//! このモジュールは、データファイルから読み込まれるシンセット、単語、
//! 関係ポインタ、動詞の文型フレームを定義します。

use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::symbol::{PartOfSpeech, Relation, SyntacticMarker, lex_file_name};

/// シンセットの識別子
///
/// 品詞とオフセットの組です。品詞は常にテーブルの品詞に正規化されるため、
/// 衛星形容詞のシンセットも形容詞の識別子で表されます。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct SynsetId {
    /// テーブルの品詞
    pub pos: PartOfSpeech,

    /// 品詞内で一意なオフセット
    pub offset: u32,
}

impl SynsetId {
    /// 新しい識別子を作成します。
    #[inline(always)]
    pub const fn new(pos: PartOfSpeech, offset: u32) -> Self {
        Self {
            pos: pos.table_pos(),
            offset,
        }
    }
}

/// シンセットに含まれる単語
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Word {
    pub(crate) lemma: String,
    pub(crate) lex_id: u8,
    pub(crate) marker: Option<SyntacticMarker>,
}

impl Word {
    /// レンマを返します。
    ///
    /// アンダースコアは空白に変換済みで、大文字小文字はファイルの表記のままです。
    #[inline(always)]
    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// シンセット内で同じレンマを区別する語彙IDを返します。
    #[inline(always)]
    pub fn lex_id(&self) -> u8 {
        self.lex_id
    }

    /// 形容詞の統語マーカーを返します。
    #[inline(always)]
    pub fn marker(&self) -> Option<SyntacticMarker> {
        self.marker
    }
}

/// シンセットから出る関係ポインタ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Pointer {
    pub(crate) relation: Relation,
    pub(crate) target: SynsetId,
    pub(crate) source_word: Option<u8>,
    pub(crate) target_word: Option<u8>,
}

impl Pointer {
    /// 関係の種類を返します。
    #[inline(always)]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// 参照先のシンセットを返します。
    #[inline(always)]
    pub fn target(&self) -> SynsetId {
        self.target
    }

    /// 参照元の単語番号(1始まり)を返します。
    ///
    /// シンセット全体の関係(意味的ポインタ)の場合は`None`です。
    #[inline(always)]
    pub fn source_word(&self) -> Option<u8> {
        self.source_word
    }

    /// 参照先の単語番号(1始まり)を返します。
    #[inline(always)]
    pub fn target_word(&self) -> Option<u8> {
        self.target_word
    }

    /// 特定の単語間の関係(語彙的ポインタ)かどうかを返します。
    #[inline(always)]
    pub fn is_lexical(&self) -> bool {
        self.source_word.is_some() || self.target_word.is_some()
    }
}

/// 動詞シンセットの文型フレーム
#[derive(Clone, Copy, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Frame {
    pub(crate) frame_number: u8,
    pub(crate) word_number: Option<u8>,
}

impl Frame {
    /// 文型フレーム番号を返します。
    #[inline(always)]
    pub fn frame_number(&self) -> u8 {
        self.frame_number
    }

    /// フレームが適用される単語番号(1始まり)を返します。
    ///
    /// シンセット内のすべての単語に適用される場合は`None`です。
    #[inline(always)]
    pub fn word_number(&self) -> Option<u8> {
        self.word_number
    }
}

/// 同義語の集合(シンセット)
///
/// 読み込み時に一度だけ作成され、以降は変更されません。
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Synset {
    pub(crate) offset: u32,
    pub(crate) lex_filenum: u8,
    pub(crate) pos: PartOfSpeech,
    pub(crate) words: Vec<Word>,
    pub(crate) pointers: Vec<Pointer>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) gloss: String,
}

impl Synset {
    /// 識別子を返します。
    #[inline(always)]
    pub fn id(&self) -> SynsetId {
        SynsetId::new(self.pos, self.offset)
    }

    /// オフセットを返します。
    #[inline(always)]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// ファイルに記載された品詞(`ss_type`)を返します。
    ///
    /// 衛星形容詞の場合は`AdjectiveSatellite`です。
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
    pub fn lex_file_name(&self) -> &'static str {
        // The number is validated by the decoder.
        lex_file_name(self.lex_filenum).unwrap_or_default()
    }

    /// 構成単語をファイルの順序で返します。
    #[inline(always)]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// 1始まりの単語番号で単語を取得します。
    pub fn word(&self, number: u8) -> Option<&Word> {
        usize::from(number)
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
    }

    /// 関係ポインタをファイルの順序で返します。
    #[inline(always)]
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    /// 指定した関係のポインタのみを返します。
    pub fn pointers_of(&self, relation: Relation) -> impl Iterator<Item = &Pointer> + '_ {
        self.pointers.iter().filter(move |p| p.relation == relation)
    }

    /// 動詞の文型フレームを返します。
    #[inline(always)]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// 語釈(定義と用例)をファイルの表記のまま返します。
    #[inline(always)]
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    /// 語釈のうち定義部分を返します。
    ///
    /// 最初の引用符で始まる用例より前の部分です。
    pub fn definition(&self) -> &str {
        let end = self
            .gloss
            .match_indices("; \"")
            .map(|(i, _)| i)
            .next()
            .unwrap_or(self.gloss.len());
        let def = &self.gloss[..end];
        if def.starts_with('"') { "" } else { def.trim() }
    }

    /// 語釈に含まれる用例を引用符を除いて返します。
    pub fn examples(&self) -> impl Iterator<Item = &str> + '_ {
        self.gloss
            .split("; ")
            .map(str::trim)
            .filter(|s| s.starts_with('"'))
            .map(|s| s.trim_matches('"'))
    }

    /// レンマがこのシンセットの単語に含まれるかどうかを、大文字小文字を区別せずに判定します。
    pub fn contains_lemma(&self, lemma: &str) -> bool {
        let lemma = lemma.to_lowercase();
        self.words.iter().any(|w| w.lemma.to_lowercase() == lemma)
    }
}
