use std::fs;

use poem_rhyme_rs::{
    PoemAugmenter, Scheme, TextProcessor, corpus,
    stats::calculate_rhyme_stats,
    text::zh::{jyutping_list::JyutpingDict, mandarin::PinyinLookup, tupa::TupaDict},
};

const JYUTPING: &str = r#"{
    "56FD": "gwok3", "7834": "po3", "5C71": "saan1", "6CB3": "ho4", "5728": "zoi6",
    "57CE": "sing4", "6625": "ceon1", "8349": "cou2", "6728": "muk6", "6DF1": "sam1"
}"#;

const TUPA: &str = "国\tkuek\n破\tphah\n山\tsrean\n河\thaa\n在\tdzojq\n城\tdzjeng\n春\ttsjuin\n草\ttshawq\n木\tmuk\n深\tsyim\n";

fn augmenter() -> PoemAugmenter {
    PoemAugmenter::new(TextProcessor::new(vec![
        Box::new(PinyinLookup),
        Box::new(JyutpingDict::from_json(JYUTPING).unwrap()),
        Box::new(TupaDict::parse(TUPA)),
    ]))
}

#[test]
fn test_augment_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("poems.json");
    let output = dir.path().join("poems_augmented.json");
    fs::write(
        &input,
        r#"[
  {"title": "春望", "author": "杜甫", "type": "五言律詩", "content": "国破山河在，城春草木深。"},
  {"title": "注", "author": "佚名", "content": ["国破山河在，城春草木深。（注：至德二载。）", "山河"]}
]"#,
    )
    .unwrap();

    let count = augmenter().augment_file(&input, &output).unwrap();
    assert_eq!(count, 2);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("[\n  {\"id\":1,"));
    assert!(text.contains(",\n  {\"id\":2,"));
    assert!(text.ends_with("\n]"));

    let poems = corpus::read_augmented(&output).unwrap();
    let first = &poems[0];
    assert_eq!(first.content.len(), 1);
    let line = &first.content[0];
    assert_eq!(line.text, "国破山河在，城春草木深。");
    assert_eq!(line.data.len(), line.text.chars().count());

    let guo = &line.data[0];
    assert_eq!(
        (guo.cmn.as_str(), guo.yue.as_str(), guo.lzt.as_str()),
        ("guo2", "gwok3", "kuek")
    );
    assert_eq!(
        (guo.cmn_rhyme.as_str(), guo.yue_rhyme.as_str(), guo.lzt_rhyme.as_str()),
        ("uo", "ok", "ek")
    );

    let comma = &line.data[5];
    assert_eq!(comma.ch, "，");
    assert!(!comma.is_note);
    assert_eq!(comma.cmn, "");
    assert_eq!(comma.yue_rhyme, "");

    let shen = &line.data[10];
    assert_eq!(shen.ch, "深");
    assert_eq!(shen.lzt_rhyme, "im");

    let second = &poems[1];
    assert_eq!(second.poem_type, None);
    let texts: Vec<_> = second.content.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["国破山河在，城春草木深。（注：至德二载。）", "山河"]
    );
    let note_flags: Vec<bool> = second.content[0].data.iter().map(|r| r.is_note).collect();
    assert_eq!(note_flags.iter().filter(|&&n| n).count(), 9);
    assert!(second.content[0].data[12..].iter().all(|r| r.cmn.is_empty()));
}

#[test]
fn test_unreadable_corpus_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let output = dir.path().join("out.json");
    assert!(augmenter().augment_file(&missing, &output).is_err());
    assert!(!output.exists());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json").unwrap();
    assert!(augmenter().augment_file(&broken, &output).is_err());
}

#[test]
fn test_regulated_stats_from_augmented_poem() {
    let poem = poem_rhyme_rs::Poem {
        title: Some("t".into()),
        author: Some("a".into()),
        poem_type: Some("五言絕句".into()),
        content: poem_rhyme_rs::Content::Lines(vec![
            "国破山河在，".into(),
            "城春草木深。".into(),
            "国破山河在，".into(),
            "城春草木深。".into(),
        ]),
    };
    let augmented = augmenter().augment_poem(1, &poem);
    let stats = calculate_rhyme_stats(&augmented, Scheme::Cantonese).unwrap();
    // target is 深 (am); both even lines end in 深
    assert_eq!(stats.matched, 2);
    assert_eq!(stats.required_rhymed, 2);
    assert_eq!(stats.total, 4);
    assert!(stats.passed);
}
