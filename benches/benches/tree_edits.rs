// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_tree::{Element, ElementTree, IdGenerator};

/// `width` sections, each a container holding `depth` nested rows of `width` leaves.
fn gen_page(width: usize, depth: usize) -> Vec<Element> {
    let mut n = 0_usize;
    let mut next = |kind: &str| {
        n += 1;
        format!("{kind}_{n}")
    };
    let mut roots = Vec::with_capacity(width);
    for _ in 0..width {
        let mut section = Element::new(next("Card"), "Card", "");
        for _ in 0..depth {
            let mut row = Element::new(next("Row"), "Row", "");
            for _ in 0..width {
                row = row.with_child(Element::new(next("Text"), "Text", ""));
            }
            section = section.with_child(row);
        }
        roots.push(section);
    }
    roots
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for &width in &[8_usize, 16, 32] {
        let page = gen_page(width, 4);
        let count: usize = page.iter().map(Element::count).sum();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("from_elements_w{width}"), |b| {
            b.iter_batched(
                || page.clone(),
                |elements| {
                    let tree = ElementTree::from_elements(elements).unwrap();
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_subtree");
    let ids = IdGenerator::with_seed("bench");
    for &width in &[8_usize, 16, 32] {
        let tree = ElementTree::from_elements(gen_page(width, 4)).unwrap();
        let source = tree.roots().next().unwrap().id().clone();
        group.bench_function(format!("section_w{width}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    let id = tree.clone_subtree(source.as_str(), None, &ids).unwrap();
                    black_box(id);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for &width in &[8_usize, 16, 32] {
        let tree = ElementTree::from_elements(gen_page(width, 4)).unwrap();
        let target = tree.roots().last().unwrap().id().clone();
        group.bench_function(format!("section_w{width}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    black_box(tree.remove(target.as_str()).len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let tree = ElementTree::from_elements(gen_page(32, 4)).unwrap();
    let deepest = tree.iter().last().unwrap().id().clone();
    group.bench_function("path_to_root", |b| {
        b.iter(|| black_box(tree.path_to_root(deepest.as_str())));
    });
    group.bench_function("preorder_ids", |b| {
        b.iter(|| black_box(tree.ids().len()));
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(tree.validate().is_ok()));
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_clone, bench_remove, bench_queries);
criterion_main!(benches);
