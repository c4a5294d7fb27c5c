//! # WordNet-rkyv
//!
//! WordNet-rkyvは、Princeton WordNet 3.xのデータベースファイルを読み込み、
//! 参照するための読み取り専用ライブラリです。
//!
//! ## 概要
//!
//! WordNetの辞書ディレクトリ(`index.<pos>`、`data.<pos>`、`index.sense`)を一度に読み込み、
//! 型付きのレコードとしてメモリ上に保持します。読み込み時にすべてのポインタと語義の参照を
//! 検査するため、読み込みに成功した辞書では参照が必ず解決できます。
//! rkyvシリアライゼーションフォーマットでコンパイル済みの辞書を書き出すことで、
//! 2回目以降の読み込みではテキストの解析を省略できます。
//!
//! ## 主な機能
//!
//! - **レンマによる参照**: 大文字小文字を区別しない、品詞と語義番号による検索
//! - **関係のたどり**: 上位語、部分語、反義語などの27種類の関係ポインタ
//! - **整合性検査**: 存在しないシンセットへの参照を読み込み時に検出
//! - **コンパイル済み辞書**: rkyvとZstandardによる辞書の保存と読み込み
//! - **辞書の探索**: `WNHOME`などの環境変数と既定のインストール先からの探索
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wordnet_rkyv::{Dictionary, DictionaryBuilder, DictionarySources, PartOfSpeech, Relation};
//!
//! let index_noun = "canine n 1 1 @ 1 0 02083346\n\
//!                   dog n 1 1 @ 1 0 02084071\n";
//! let data_noun = "02083346 05 n 01 canine 0 000 | any of various fissiped mammals\n\
//!                  02084071 05 n 01 dog 0 001 @ 02083346 n 0000 | a member of the genus Canis\n";
//! let index_sense = "canine%1:05:00:: 02083346 1 0\n\
//!                    dog%1:05:00:: 02084071 1 42\n";
//! let empty = "";
//!
//! let dict = DictionaryBuilder::from_readers(DictionarySources {
//!     index: [index_noun.as_bytes(), empty.as_bytes(), empty.as_bytes(), empty.as_bytes()],
//!     data: [data_noun.as_bytes(), empty.as_bytes(), empty.as_bytes(), empty.as_bytes()],
//!     sense: index_sense.as_bytes(),
//! })?;
//! let dict = Dictionary::from_inner(dict);
//!
//! let sense = dict.lookup_sense("Dog", PartOfSpeech::Noun, 1).unwrap();
//! assert_eq!(sense.tag_count(), 42);
//!
//! let synset = dict.synset_of(sense).unwrap();
//! assert_eq!(synset.gloss(), "a member of the genus Canis");
//!
//! let (pointer, hypernym) = dict.pointer_targets(synset).next().unwrap();
//! assert_eq!(pointer.relation(), Relation::Hypernym);
//! assert_eq!(hypernym.words()[0].lemma(), "canine");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// 辞書データ構造とビルダー
pub mod dictionary;

/// 辞書ディレクトリの探索
pub mod discovery;

/// エラー型の定義
pub mod errors;

/// レンマ表記の変換
pub mod utils;


// Re-exports
pub use dictionary::index::IndexEntry;
pub use dictionary::sense::{SenseEntry, SenseIndex};
pub use dictionary::symbol::{PartOfSpeech, Relation, SyntacticMarker};
pub use dictionary::synset::{Frame, Pointer, Synset, SynsetId, Word};
pub use dictionary::{Dictionary, DictionaryBuilder, DictionarySources};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
