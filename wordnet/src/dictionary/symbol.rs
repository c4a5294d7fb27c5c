//! 品詞・関係ポインタ・辞書ファイルの記号表
//!
//! このモジュールは、WordNetのソースファイルに現れる記号(品詞タグ、ポインタ記号、
//! 語彙ファイル番号、形容詞の統語マーカー)と、それらに対応する型付きの値との
//! 静的な対応表を提供します。

use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

/// 品詞(シンタクティックカテゴリ)
///
/// 衛星形容詞(`AdjectiveSatellite`)は意味的には独立していますが、
/// データは形容詞のファイル(`data.adj`)に格納されます。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
#[repr(u8)]
pub enum PartOfSpeech {
    /// 名詞 (`n`)
    Noun,
    /// 動詞 (`v`)
    Verb,
    /// 形容詞 (`a`)
    Adjective,
    /// 副詞 (`r`)
    Adverb,
    /// 衛星形容詞 (`s`)
    AdjectiveSatellite,
}

impl PartOfSpeech {
    /// データファイルとインデックスファイルを持つ品詞の一覧。
    ///
    /// 辞書の読み込み順序でもあります。
    pub const TABLES: [Self; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// 1文字の品詞タグ(`n`, `v`, `a`, `r`, `s`)から品詞を取得します。
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" => Some(Self::Adjective),
            "r" => Some(Self::Adverb),
            "s" => Some(Self::AdjectiveSatellite),
            _ => None,
        }
    }

    /// センスキーで使われる数値コード(`1`〜`5`)から品詞を取得します。
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Noun),
            2 => Some(Self::Verb),
            3 => Some(Self::Adjective),
            4 => Some(Self::Adverb),
            5 => Some(Self::AdjectiveSatellite),
            _ => None,
        }
    }

    /// 1文字の品詞タグを返します。
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::Adverb => "r",
            Self::AdjectiveSatellite => "s",
        }
    }

    /// センスキーで使われる数値コードを返します。
    pub const fn code(self) -> u8 {
        match self {
            Self::Noun => 1,
            Self::Verb => 2,
            Self::Adjective => 3,
            Self::Adverb => 4,
            Self::AdjectiveSatellite => 5,
        }
    }

    /// 品詞の名前を返します。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
            Self::AdjectiveSatellite => "adj_sat",
        }
    }

    /// データを格納するテーブルの品詞を返します。
    ///
    /// 衛星形容詞は形容詞のテーブルに格納されるため、`Adjective`に読み替えます。
    #[inline(always)]
    pub const fn table_pos(self) -> Self {
        match self {
            Self::AdjectiveSatellite => Self::Adjective,
            pos => pos,
        }
    }

    /// [`TABLES`](Self::TABLES)内での位置を返します。
    #[inline(always)]
    pub(crate) const fn table_index(self) -> usize {
        match self.table_pos() {
            Self::Noun => 0,
            Self::Verb => 1,
            Self::Adverb => 3,
            _ => 2,
        }
    }

    /// 検索条件としての品詞が、エントリの品詞に一致するかどうかを判定します。
    ///
    /// `Adjective`は衛星形容詞にも一致しますが、`AdjectiveSatellite`は衛星形容詞にのみ一致します。
    #[inline(always)]
    pub fn matches(self, entry_pos: Self) -> bool {
        match self {
            Self::Adjective => entry_pos.table_pos() == Self::Adjective,
            pos => pos == entry_pos,
        }
    }

    /// インデックスファイル名(`index.noun`など)を返します。
    pub const fn index_file_name(self) -> &'static str {
        match self.table_pos() {
            Self::Noun => "index.noun",
            Self::Verb => "index.verb",
            Self::Adverb => "index.adv",
            _ => "index.adj",
        }
    }

    /// データファイル名(`data.noun`など)を返します。
    pub const fn data_file_name(self) -> &'static str {
        match self.table_pos() {
            Self::Noun => "data.noun",
            Self::Verb => "data.verb",
            Self::Adverb => "data.adv",
            _ => "data.adj",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// シンセット間、または語義間の関係の種類
///
/// データファイル中のポインタ記号(`@`, `~i`, `%p`など)に対応します。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
#[repr(u8)]
pub enum Relation {
    /// 反義語 (`!`)
    Antonym,
    /// 上位語 (`@`)
    Hypernym,
    /// インスタンス上位語 (`@i`)
    InstanceHypernym,
    /// 下位語 (`~`)
    Hyponym,
    /// インスタンス下位語 (`~i`)
    InstanceHyponym,
    /// メンバー全体語 (`#m`)
    MemberHolonym,
    /// 物質全体語 (`#s`)
    SubstanceHolonym,
    /// 部分全体語 (`#p`)
    PartHolonym,
    /// メンバー部分語 (`%m`)
    MemberMeronym,
    /// 物質部分語 (`%s`)
    SubstanceMeronym,
    /// 部分部分語 (`%p`)
    PartMeronym,
    /// 属性 (`=`)
    Attribute,
    /// 派生関係 (`+`)
    DerivationallyRelatedForm,
    /// ドメイン (`;`)
    Domain,
    /// トピックドメイン (`;c`)
    DomainTopic,
    /// トピックドメインのメンバー (`-c`)
    DomainMemberTopic,
    /// 地域ドメイン (`;r`)
    DomainRegion,
    /// 地域ドメインのメンバー (`-r`)
    DomainMemberRegion,
    /// 用法ドメイン (`;u`)
    DomainUsage,
    /// 用法ドメインのメンバー (`-u`)
    DomainMemberUsage,
    /// 含意 (`*`)
    Entailment,
    /// 原因 (`>`)
    Cause,
    /// 参照 (`^`)
    AlsoSee,
    /// 動詞グループ (`$`)
    VerbGroup,
    /// 類似 (`&`)
    SimilarTo,
    /// 動詞の分詞 (`<`)
    ParticipleOfVerb,
    /// 関連形容詞・派生元 (`\`)
    Pertainym,
}

impl Relation {
    /// すべての関係の一覧。
    pub const ALL: [Self; 27] = [
        Self::Antonym,
        Self::Hypernym,
        Self::InstanceHypernym,
        Self::Hyponym,
        Self::InstanceHyponym,
        Self::MemberHolonym,
        Self::SubstanceHolonym,
        Self::PartHolonym,
        Self::MemberMeronym,
        Self::SubstanceMeronym,
        Self::PartMeronym,
        Self::Attribute,
        Self::DerivationallyRelatedForm,
        Self::Domain,
        Self::DomainTopic,
        Self::DomainMemberTopic,
        Self::DomainRegion,
        Self::DomainMemberRegion,
        Self::DomainUsage,
        Self::DomainMemberUsage,
        Self::Entailment,
        Self::Cause,
        Self::AlsoSee,
        Self::VerbGroup,
        Self::SimilarTo,
        Self::ParticipleOfVerb,
        Self::Pertainym,
    ];

    /// ポインタ記号から関係を取得します。
    ///
    /// # 引数
    ///
    /// * `symbol` - ポインタ記号(例: `@`, `~i`, `%p`)
    ///
    /// # 戻り値
    ///
    /// 未知の記号の場合は`None`
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let rel = match symbol {
            "!" => Self::Antonym,
            "@" => Self::Hypernym,
            "@i" => Self::InstanceHypernym,
            "~" => Self::Hyponym,
            "~i" => Self::InstanceHyponym,
            "#m" => Self::MemberHolonym,
            "#s" => Self::SubstanceHolonym,
            "#p" => Self::PartHolonym,
            "%m" => Self::MemberMeronym,
            "%s" => Self::SubstanceMeronym,
            "%p" => Self::PartMeronym,
            "=" => Self::Attribute,
            "+" => Self::DerivationallyRelatedForm,
            ";" => Self::Domain,
            ";c" => Self::DomainTopic,
            "-c" => Self::DomainMemberTopic,
            ";r" => Self::DomainRegion,
            "-r" => Self::DomainMemberRegion,
            ";u" => Self::DomainUsage,
            "-u" => Self::DomainMemberUsage,
            "*" => Self::Entailment,
            ">" => Self::Cause,
            "^" => Self::AlsoSee,
            "$" => Self::VerbGroup,
            "&" => Self::SimilarTo,
            "<" => Self::ParticipleOfVerb,
            "\\" => Self::Pertainym,
            _ => return None,
        };
        Some(rel)
    }

    /// ポインタ記号を返します。
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Antonym => "!",
            Self::Hypernym => "@",
            Self::InstanceHypernym => "@i",
            Self::Hyponym => "~",
            Self::InstanceHyponym => "~i",
            Self::MemberHolonym => "#m",
            Self::SubstanceHolonym => "#s",
            Self::PartHolonym => "#p",
            Self::MemberMeronym => "%m",
            Self::SubstanceMeronym => "%s",
            Self::PartMeronym => "%p",
            Self::Attribute => "=",
            Self::DerivationallyRelatedForm => "+",
            Self::Domain => ";",
            Self::DomainTopic => ";c",
            Self::DomainMemberTopic => "-c",
            Self::DomainRegion => ";r",
            Self::DomainMemberRegion => "-r",
            Self::DomainUsage => ";u",
            Self::DomainMemberUsage => "-u",
            Self::Entailment => "*",
            Self::Cause => ">",
            Self::AlsoSee => "^",
            Self::VerbGroup => "$",
            Self::SimilarTo => "&",
            Self::ParticipleOfVerb => "<",
            Self::Pertainym => "\\",
        }
    }

    /// シリアライズやデバッグ出力に使う安定した名前を返します。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Antonym => "antonym",
            Self::Hypernym => "hypernym",
            Self::InstanceHypernym => "hypernym-instance",
            Self::Hyponym => "hyponym",
            Self::InstanceHyponym => "hyponym-instance",
            Self::MemberHolonym => "holonym-member",
            Self::SubstanceHolonym => "holonym-substance",
            Self::PartHolonym => "holonym-part",
            Self::MemberMeronym => "meronym-member",
            Self::SubstanceMeronym => "meronym-substance",
            Self::PartMeronym => "meronym-part",
            Self::Attribute => "meronym-attribute",
            Self::DerivationallyRelatedForm => "derived-from",
            Self::Domain => "domain",
            Self::DomainTopic => "domain-topic",
            Self::DomainMemberTopic => "domain-topic-member",
            Self::DomainRegion => "domain-region",
            Self::DomainMemberRegion => "domain-region-member",
            Self::DomainUsage => "domain-usage",
            Self::DomainMemberUsage => "domain-usage-member",
            Self::Entailment => "entailment",
            Self::Cause => "causal",
            Self::AlsoSee => "also-see",
            Self::VerbGroup => "verb-group",
            Self::SimilarTo => "similar-to",
            Self::ParticipleOfVerb => "verb-participle",
            Self::Pertainym => "pertainym",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 形容詞の統語マーカー
///
/// `data.adj`の単語に付く`(p)`、`(a)`、`(ip)`を表します。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
#[repr(u8)]
pub enum SyntacticMarker {
    /// 叙述位置 (`p`)
    Predicate,
    /// 名詞前位置 (`a`)
    Prenominal,
    /// 名詞直後位置 (`ip`)
    ImmediatelyPostnominal,
}

impl SyntacticMarker {
    /// 単語の末尾からマーカーを切り離します。
    ///
    /// # 戻り値
    ///
    /// マーカーを除いた単語と、マーカー(存在する場合)の組
    pub fn split(word: &str) -> (&str, Option<Self>) {
        let Some(inner) = word.strip_suffix(')') else {
            return (word, None);
        };
        for marker in [Self::ImmediatelyPostnominal, Self::Predicate, Self::Prenominal] {
            if let Some(stripped) = inner
                .strip_suffix(marker.symbol())
                .and_then(|w| w.strip_suffix('('))
            {
                return (stripped, Some(marker));
            }
        }
        (word, None)
    }

    /// マーカーの記号(`p`, `a`, `ip`)を返します。
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Predicate => "p",
            Self::Prenominal => "a",
            Self::ImmediatelyPostnominal => "ip",
        }
    }
}

/// 語彙ファイル番号に対応する語彙ファイル名
///
/// インデックスはデータファイルの`lex_filenum`フィールド、およびセンスキーの
/// `lex_filenum`フィールドです。
pub const LEX_FILE_NAMES: [&str; 45] = [
    "adj.all",
    "adj.pert",
    "adv.all",
    "noun.Tops",
    "noun.act",
    "noun.animal",
    "noun.artifact",
    "noun.attribute",
    "noun.body",
    "noun.cognition",
    "noun.communication",
    "noun.event",
    "noun.feeling",
    "noun.food",
    "noun.group",
    "noun.location",
    "noun.motive",
    "noun.object",
    "noun.person",
    "noun.phenomenon",
    "noun.plant",
    "noun.possession",
    "noun.process",
    "noun.quantity",
    "noun.relation",
    "noun.shape",
    "noun.state",
    "noun.substance",
    "noun.time",
    "verb.body",
    "verb.change",
    "verb.cognition",
    "verb.communication",
    "verb.competition",
    "verb.consumption",
    "verb.contact",
    "verb.creation",
    "verb.emotion",
    "verb.motion",
    "verb.perception",
    "verb.possession",
    "verb.social",
    "verb.stative",
    "verb.weather",
    "adj.ppl",
];

/// 語彙ファイル番号から語彙ファイル名を取得します。
///
/// # 戻り値
///
/// 範囲外の番号の場合は`None`
#[inline(always)]
pub fn lex_file_name(lex_filenum: u8) -> Option<&'static str> {
    LEX_FILE_NAMES.get(usize::from(lex_filenum)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_symbols_roundtrip() {
        for rel in Relation::ALL {
            assert_eq!(Relation::from_symbol(rel.symbol()), Some(rel));
        }
        assert_eq!(Relation::from_symbol("?"), None);
        assert_eq!(Relation::from_symbol("@@"), None);
    }

    #[test]
    fn test_relation_names() {
        assert_eq!(Relation::InstanceHypernym.to_string(), "hypernym-instance");
        assert_eq!(Relation::Pertainym.name(), "pertainym");
        assert_eq!(Relation::from_symbol("\\"), Some(Relation::Pertainym));
    }

    #[test]
    fn test_pos_table() {
        assert_eq!(PartOfSpeech::from_tag("s"), Some(PartOfSpeech::AdjectiveSatellite));
        assert_eq!(PartOfSpeech::from_tag("x"), None);
        assert_eq!(PartOfSpeech::from_code(5), Some(PartOfSpeech::AdjectiveSatellite));
        assert_eq!(PartOfSpeech::from_code(0), None);
        assert_eq!(
            PartOfSpeech::AdjectiveSatellite.table_pos(),
            PartOfSpeech::Adjective
        );
        assert_eq!(PartOfSpeech::AdjectiveSatellite.data_file_name(), "data.adj");
        assert_eq!(PartOfSpeech::Adverb.index_file_name(), "index.adv");
        for (i, pos) in PartOfSpeech::TABLES.into_iter().enumerate() {
            assert_eq!(pos.table_index(), i);
        }
    }

    #[test]
    fn test_pos_matches() {
        use PartOfSpeech::*;
        assert!(Adjective.matches(Adjective));
        assert!(Adjective.matches(AdjectiveSatellite));
        assert!(AdjectiveSatellite.matches(AdjectiveSatellite));
        assert!(!AdjectiveSatellite.matches(Adjective));
        assert!(!Noun.matches(Verb));
    }

    #[test]
    fn test_syntactic_marker() {
        assert_eq!(
            SyntacticMarker::split("galore(ip)"),
            ("galore", Some(SyntacticMarker::ImmediatelyPostnominal))
        );
        assert_eq!(
            SyntacticMarker::split("good_enough(p)"),
            ("good_enough", Some(SyntacticMarker::Predicate))
        );
        assert_eq!(
            SyntacticMarker::split("bang-up(a)"),
            ("bang-up", Some(SyntacticMarker::Prenominal))
        );
        assert_eq!(SyntacticMarker::split("dog"), ("dog", None));
        assert_eq!(SyntacticMarker::split("dog(x)"), ("dog(x)", None));
        assert_eq!(SyntacticMarker::split("ship(p"), ("ship(p", None));
        assert_eq!(SyntacticMarker::Predicate.symbol(), "p");
        assert_eq!(SyntacticMarker::ImmediatelyPostnominal.symbol(), "ip");
    }

    #[test]
    fn test_lex_file_name() {
        assert_eq!(lex_file_name(5), Some("noun.animal"));
        assert_eq!(lex_file_name(44), Some("adj.ppl"));
        assert_eq!(lex_file_name(45), None);
    }
}
