//! WordNetを参照するユーティリティ
//!
//! このバイナリは、標準入力から1行に1つずつレンマを読み込み、
//! 指定された出力形式(senses、index、detail)で語義やシンセットを出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use wordnet_rkyv::discovery;
use wordnet_rkyv::{Dictionary, PartOfSpeech, SenseEntry, Word};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Senses,
    Index,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列("senses"、"index"、"detail"のいずれか)
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "senses" => Ok(Self::Senses),
            "index" => Ok(Self::Index),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

fn parse_pos(tag: &str) -> Result<PartOfSpeech, String> {
    PartOfSpeech::from_tag(tag).ok_or_else(|| format!("unknown part of speech {tag:?}"))
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "lookup", about = "Looks up lemmas in WordNet")]
struct Args {
    /// WordNet dictionary directory.
    ///
    /// If neither this nor `--compiled` is specified, $WNHOME/dict, $WNSEARCHDIR and the
    /// default installation paths are searched.
    #[clap(short = 'd', long, conflicts_with = "compiled")]
    dict: Option<PathBuf>,

    /// Compiled dictionary (`.zst` for compressed).
    #[clap(short = 'i', long)]
    compiled: Option<PathBuf>,

    /// Output mode. Choices are senses, index, and detail.
    #[clap(short = 'O', long, default_value = "senses")]
    output_mode: OutputMode,

    /// Restricts the output to a part of speech (n, v, a, r, or s).
    #[clap(short = 'p', long, value_parser = parse_pos)]
    pos: Option<PartOfSpeech>,
}

fn load(args: &Args) -> Result<Dictionary, Box<dyn Error>> {
    let dict = match (&args.compiled, &args.dict) {
        (Some(path), _) if path.extension().is_some_and(|ext| ext == "zst") => {
            Dictionary::from_zstd(path)?
        }
        (Some(path), _) => Dictionary::from_path(path)?,
        (None, Some(dir)) => Dictionary::from_dir(dir)?,
        (None, None) => Dictionary::from_dir(discovery::find_dict_dir()?)?,
    };
    Ok(dict)
}

fn senses_of<'a>(dict: &'a Dictionary, lemma: &str, pos: Option<PartOfSpeech>) -> Vec<&'a SenseEntry> {
    match pos {
        Some(pos) => dict.lookup_senses(lemma, pos),
        None => dict.lookup(lemma).iter().collect(),
    }
}

/// 統語マーカーがあれば`(p)`のように付けて単語を表示する
fn word_label(word: &Word) -> String {
    match word.marker() {
        Some(marker) => format!("{}({})", word.lemma(), marker.symbol()),
        None => word.lemma().to_string(),
    }
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだレンマを参照して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = load(&args)?;
    eprintln!("Ready to look up");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let lemma = line.trim();
        if lemma.is_empty() {
            continue;
        }
        match args.output_mode {
            OutputMode::Senses => {
                for sense in senses_of(&dict, lemma, args.pos) {
                    let gloss = dict.synset_of(sense).map_or("", |s| s.definition());
                    writeln!(
                        &mut out,
                        "{}\t{:08}\t{}\t{}\t{}",
                        sense.sense_key(),
                        sense.synset_offset(),
                        sense.sense_number(),
                        sense.tag_count(),
                        gloss,
                    )?;
                }
            }
            OutputMode::Index => {
                let tables = match args.pos {
                    Some(pos) => vec![pos.table_pos()],
                    None => PartOfSpeech::TABLES.to_vec(),
                };
                for pos in tables {
                    let Some(entry) = dict.lookup_index(lemma, pos) else {
                        continue;
                    };
                    let symbols: Vec<_> = entry.pointer_symbols().iter().map(|r| r.symbol()).collect();
                    let offsets: Vec<_> = entry
                        .synset_offsets()
                        .iter()
                        .map(|o| format!("{o:08}"))
                        .collect();
                    writeln!(
                        &mut out,
                        "{}\t{}\tsenses={}\ttagged={}\tpointers={}\tsynsets={}",
                        entry.lemma(),
                        entry.pos().tag(),
                        entry.sense_count(),
                        entry.tagsense_count(),
                        symbols.join(" "),
                        offsets.join(" "),
                    )?;
                }
            }
            OutputMode::Detail => {
                for sense in senses_of(&dict, lemma, args.pos) {
                    let Some(synset) = dict.synset_of(sense) else {
                        continue;
                    };
                    let words: Vec<_> = synset.words().iter().map(word_label).collect();
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}\t{}",
                        sense.sense_key(),
                        synset.lex_file_name(),
                        words.join(", "),
                        synset.gloss(),
                    )?;
                    for (pointer, target) in dict.pointer_targets(synset) {
                        let words: Vec<_> = target.words().iter().map(|w| w.lemma()).collect();
                        writeln!(
                            &mut out,
                            "\t{}\t{:08}{}\t{}",
                            pointer.relation().name(),
                            target.offset(),
                            target.pos().tag(),
                            words.join(", "),
                        )?;
                    }
                }
            }
        }
        out.write_all(b"EOS\n")?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
