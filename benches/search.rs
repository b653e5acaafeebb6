//! This bench measures searching a large registry of trees by name, tag and
//! notes.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use tree_map::{Document, RecordDraft, TreeDraft};

const LOCATIONS: [&str; 4] = ["운동장", "정문", "급식실 옆", "후문"];

/// Builds a document with many trees, each with a few records.
fn preseed_document() -> Document {
    let mut document = Document::new();
    for i in 0..2_000 {
        let draft = TreeDraft {
            species: Some("은행나무".to_string()),
            tags: Some(format!("그늘, 열매, 반{}", i % 30)),
            notes: Some(format!("{i}번째로 등록한 나무")),
            ..TreeDraft::new(format!("나무 {i}"), LOCATIONS[i % LOCATIONS.len()])
        };
        let id = document.create(draft).unwrap().id().clone();
        let tree = document.find_mut(&id).unwrap();
        for day in 0..3 {
            tree.append(RecordDraft::new(format!("관찰 {day}"))).unwrap();
        }
    }
    document
}

fn search(c: &mut Criterion) {
    let document = preseed_document();

    c.bench_function("search by tag", |b| {
        b.iter(|| document.search(std::hint::black_box("반7")));
    });

    c.bench_function("search with no match", |b| {
        b.iter(|| document.search(std::hint::black_box("소나무")));
    });
}

criterion_group!(benches, search);
criterion_main!(benches);
