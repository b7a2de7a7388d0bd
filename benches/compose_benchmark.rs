//! Compose benchmark: cost of building one full frame.
//!
//! Target: well under a millisecond for an 80x24 screen.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kilo::{Composer, Editor, EditorConfig, RowBuffer, WindowSize};
use std::time::Instant;

fn editor(rows: usize, cols: usize, lines: usize) -> Editor {
    let mut editor = Editor::new(EditorConfig::default(), WindowSize { rows, cols });
    let text: Vec<u8> = (0..lines)
        .flat_map(|i| format!("{i}:\tsome text that is fairly long\tand tabbed\n").into_bytes())
        .collect();
    editor.set_buffer(RowBuffer::from_bytes(&text));
    editor.scroll();
    editor
}

fn compose_full_frame(c: &mut Criterion) {
    let mut composer = Composer::new();

    let small = editor(24, 80, 1000);
    c.bench_function("compose_80x24", |b| {
        b.iter(|| composer.compose(black_box(&small.frame(Instant::now()))).len());
    });

    let large = editor(60, 200, 1000);
    c.bench_function("compose_200x60", |b| {
        b.iter(|| composer.compose(black_box(&large.frame(Instant::now()))).len());
    });
}

fn compose_empty_buffer(c: &mut Criterion) {
    let mut composer = Composer::new();
    let empty = Editor::new(EditorConfig::default(), WindowSize { rows: 24, cols: 80 });

    c.bench_function("compose_welcome", |b| {
        b.iter(|| composer.compose(black_box(&empty.frame(Instant::now()))).len());
    });
}

criterion_group!(benches, compose_full_frame, compose_empty_buffer);
criterion_main!(benches);
