// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use trellis_editor::document::PageRecord;
use trellis_editor::drop::{DragItem, DropEvent};
use trellis_editor::schema::{ChildDescriptor, SchemaPayload, SchemaRegistry};
use trellis_editor::{Editor, SharedEditor};

fn registry(columns: usize) -> SchemaRegistry {
    let mut row = SchemaPayload::default();
    for i in 0..columns {
        row = row.with_child(ChildDescriptor::new("Col", format!("Col {i}")));
    }
    SchemaRegistry::new()
        .with("Button", SchemaPayload::default())
        .with("Text", SchemaPayload::default())
        .with(
            "Col",
            SchemaPayload::default().with_child(ChildDescriptor::new("Text", "")),
        )
        .with("Row", row)
}

fn fresh(columns: usize) -> SharedEditor<SchemaRegistry> {
    let shared = SharedEditor::new(Editor::default(), registry(columns));
    let _ = shared.with(|ed| ed.load(PageRecord::default()));
    shared
}

fn bench_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_item");
    group.bench_function("leaf", |b| {
        b.iter_batched(
            || fresh(0),
            |shared| {
                let event = DropEvent::new(DragItem::new("Button", ""), None);
                black_box(pollster::block_on(shared.drop_item(event)).unwrap());
            },
            BatchSize::SmallInput,
        );
    });
    for &columns in &[2_usize, 12, 48] {
        group.bench_function(format!("row_with_defaults_c{columns}"), |b| {
            b.iter_batched(
                || fresh(columns),
                |shared| {
                    let event = DropEvent::new(DragItem::new("Row", ""), None);
                    black_box(pollster::block_on(shared.drop_item(event)).unwrap());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("paste");
    for &columns in &[2_usize, 12, 48] {
        let shared = fresh(columns);
        let event = DropEvent::new(DragItem::new("Row", "").with_id("Row_src"), None);
        let _ = pollster::block_on(shared.drop_item(event)).unwrap();
        group.bench_function(format!("row_c{columns}"), |b| {
            b.iter(|| {
                shared.with(|ed| {
                    let _ = ed.click(Some("Row_src"));
                    let _ = ed.copy();
                    let id = ed.paste().unwrap();
                    black_box(ed.delete(id.as_str()).len())
                })
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_drop, bench_paste);
criterion_main!(benches);
