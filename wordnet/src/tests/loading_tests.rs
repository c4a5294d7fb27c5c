//! 辞書の読み込み機能に関するテスト
//!
//! 辞書ディレクトリ、コンパイル済み辞書(rkyv)、zstd圧縮された辞書の読み込みを検証します。

use std::fs::{self, File};
use std::io::{BufWriter, Cursor};
use std::path::Path;

use tempfile::tempdir;

use crate::dictionary::symbol::PartOfSpeech;
use crate::dictionary::{Dictionary, DictionaryBuilder, DictionarySources, MODEL_MAGIC};
use crate::errors::WordNetError;
use crate::tests::{BrokenReader, Fixture, init_logger};

fn assert_same_contents(a: &Dictionary, b: &Dictionary) {
    assert_eq!(a.num_synsets(), b.num_synsets());
    assert_eq!(a.num_senses(), b.num_senses());
    for pos in PartOfSpeech::TABLES {
        assert_eq!(a.num_index_entries(pos), b.num_index_entries(pos));
    }
    for synset in a.synsets() {
        let other = b.synset_by_id(synset.id()).unwrap();
        assert_eq!(synset.gloss(), other.gloss());
        assert_eq!(synset.words().len(), other.words().len());
        assert_eq!(synset.pointers().len(), other.pointers().len());
    }
    for sense in a.senses() {
        let other = b
            .lookup_sense(sense.lemma(), sense.pos(), sense.sense_number())
            .unwrap();
        assert_eq!(sense.sense_key(), other.sense_key());
        assert_eq!(sense.synset(), other.synset());
    }
}

#[test]
fn test_from_dir() {
    init_logger();
    let dir = tempdir().unwrap();
    let fixture = Fixture::new();
    fixture.write_dir(dir.path());

    let from_dir = Dictionary::from_dir(dir.path()).unwrap();
    assert_same_contents(&fixture.load(), &from_dir);
}

#[test]
fn test_from_dir_missing_file() {
    let dir = tempdir().unwrap();
    Fixture::new().write_dir(dir.path());
    let missing = dir.path().join("data.verb");
    fs::remove_file(&missing).unwrap();

    match Dictionary::from_dir(dir.path()) {
        Err(WordNetError::Io { path, .. }) => assert_eq!(path, missing),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("loading succeeded without data.verb"),
    }
}

#[test]
fn test_from_dir_not_a_dir() {
    let dir = tempdir().unwrap();
    assert!(Dictionary::from_dir(dir.path().join("nowhere")).is_err());
}

#[test]
fn test_write_and_read() {
    let dict = Fixture::new().load();

    let mut buffer = vec![];
    dict.write(&mut buffer).unwrap();
    assert!(buffer.starts_with(MODEL_MAGIC));

    let loaded = Dictionary::read(Cursor::new(buffer)).unwrap();
    assert_same_contents(&dict, &loaded);

    let dog = loaded.lookup_sense("dog", PartOfSpeech::Noun, 1).unwrap();
    let synset = loaded.synset_of(dog).unwrap();
    assert_eq!(synset.offset(), 2084071);
}

#[test]
fn test_from_path() {
    init_logger();
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.dic");
    let dict = Fixture::new().load();
    dict.write(BufWriter::new(File::create(&path).unwrap()))
        .unwrap();

    let loaded = Dictionary::from_path(&path).unwrap();
    assert_same_contents(&dict, &loaded);
}

#[test]
fn test_from_zstd() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wordnet.dic.zst");
    let dict = Fixture::new().load();
    {
        let file = File::create(&path).unwrap();
        let mut encoder = zstd::Encoder::new(file, 3).unwrap();
        dict.write(&mut encoder).unwrap();
        encoder.finish().unwrap();
    }

    let loaded = Dictionary::from_zstd(&path).unwrap();
    assert_same_contents(&dict, &loaded);
}

#[test]
fn test_bad_magic() {
    let mut buffer = vec![];
    Fixture::new().load().write(&mut buffer).unwrap();
    buffer[0] = b'X';

    assert!(matches!(
        Dictionary::read(buffer.as_slice()),
        Err(WordNetError::InvalidArgument(_))
    ));

    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.dic");
    fs::write(&path, &buffer).unwrap();
    assert!(matches!(
        Dictionary::from_path(&path),
        Err(WordNetError::InvalidArgument(_))
    ));
}

#[test]
fn test_truncated_archive() {
    let mut buffer = vec![];
    Fixture::new().load().write(&mut buffer).unwrap();
    buffer.truncate(buffer.len() / 2);

    assert!(Dictionary::read(buffer.as_slice()).is_err());

    let short = &MODEL_MAGIC[..4];
    assert!(Dictionary::read(short).is_err());
}

#[test]
fn test_from_path_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.dic");
    match Dictionary::from_path(&path) {
        Err(WordNetError::Io { path: p, .. }) => assert_eq!(p, path),
        _ => panic!("expected an I/O error"),
    }
}

#[test]
fn test_from_readers_read_failure() {
    fn broken(text: &String) -> BrokenReader<'_> {
        BrokenReader {
            head: text.as_bytes(),
        }
    }
    let fixture = Fixture::new();

    // Each reader fails after its content. index.noun is read first.
    let result = DictionaryBuilder::from_readers(DictionarySources {
        index: fixture.index.each_ref().map(broken),
        data: fixture.data.each_ref().map(broken),
        sense: broken(&fixture.sense),
    });
    match result {
        Err(WordNetError::Io { path, .. }) => assert_eq!(path, Path::new("index.noun")),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("loading succeeded"),
    }
}
