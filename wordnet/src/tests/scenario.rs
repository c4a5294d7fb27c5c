use crate::dictionary::symbol::{PartOfSpeech, Relation};
use crate::errors::WordNetError;
use crate::tests::Fixture;

fn minimal() -> Fixture {
    Fixture {
        index: [
            "dog n 2 1 @ 1 0 12345678 23456789\n".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ],
        data: [
            "12345678 05 n 01 dog 0 000 | a domesticated canid\n".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ],
        sense: "dog%1:05:00::  12345678 1 3\n".to_string(),
    }
}

#[test]
fn test_minimal_dictionary() {
    let dict = minimal().load();

    let entry = dict.lookup_index("dog", PartOfSpeech::Noun).unwrap();
    assert_eq!(entry.synset_offsets(), &[12345678, 23456789]);
    assert_eq!(entry.synset_count(), 2);
    assert_eq!(entry.pointer_symbols(), &[Relation::Hypernym]);

    let sense = dict.lookup_sense("dog", PartOfSpeech::Noun, 1).unwrap();
    assert_eq!(sense.tag_count(), 3);
    let synset = dict.synset_of(sense).unwrap();
    assert_eq!(synset.offset(), 12345678);
    assert_eq!(synset.gloss(), "a domesticated canid");
    assert_eq!(synset.definition(), "a domesticated canid");

    // Offsets listed only in the index file are not an error, they just don't resolve.
    assert!(dict.synset(PartOfSpeech::Noun, 23456789).is_none());
}

#[test]
fn test_synset_count_mismatch() {
    let mut fixture = minimal();
    fixture.index[0] = "dog n 3 1 @ 1 0 12345678 23456789\n".to_string();
    let err = fixture.build().err();
    assert!(matches!(
        err,
        Some(WordNetError::InvalidFormat(ref e)) if e.file() == "index.noun" && e.line() == 1
    ));

    fixture.index[0] = "dog n 1 1 @ 1 0 12345678 23456789\n".to_string();
    assert!(fixture.build().is_err());
}

#[test]
fn test_empty_sources() {
    let empty = Fixture {
        index: Default::default(),
        data: Default::default(),
        sense: String::new(),
    };
    let dict = empty.load();
    assert_eq!(dict.num_synsets(), 0);
    assert_eq!(dict.num_senses(), 0);
    assert!(dict.lookup("dog").is_empty());
    assert!(dict.synsets().next().is_none());
}
