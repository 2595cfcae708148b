use criterion::{criterion_group, criterion_main, Criterion};

// Consolidated benchmark suite for codeshot. Run with:
//    cargo bench

/// Bench: tokenize a medium snippet
fn bench_tokenize(c: &mut Criterion) {
    use codeshot::syntax::GrammarRegistry;

    let code = include_str!("../tests/goldens/snippets/hello.js");
    let mut registry = GrammarRegistry::new();
    // Warm the grammar cache so the bench measures tokenization alone
    registry.tokenize(code, "javascript").expect("tokenize");

    c.bench_function("tokenize_javascript", |b| {
        b.iter(|| registry.tokenize(code, "javascript").unwrap())
    });
}

/// Bench: full pipeline to PNG bytes
fn bench_render_png(c: &mut Criterion) {
    if !cfg!(feature = "raster") {
        return;
    }

    use codeshot::{new_studio, ExportOptions, RenderConfig};

    let code = include_str!("../tests/goldens/snippets/hello.js");
    let mut studio = new_studio(RenderConfig::default()).expect("failed to create studio");
    studio.set_code(code);
    let options = ExportOptions::default();

    c.bench_function("render_png", |b| {
        b.iter(|| {
            #[cfg(feature = "raster")]
            studio.to_png(&options).unwrap();
        })
    });
}

/// Bench: display-list construction without encoding
fn bench_scene(c: &mut Criterion) {
    use codeshot::{new_studio, ExportOptions, RenderConfig};

    let code = include_str!("../tests/goldens/snippets/hello.js");
    let mut studio = new_studio(RenderConfig::default()).expect("failed to create studio");
    studio.set_code(code);
    let options = ExportOptions::default();

    c.bench_function("build_scene", |b| b.iter(|| studio.scene(&options).unwrap()));
}

criterion_group!(benches, bench_tokenize, bench_scene, bench_render_png);
criterion_main!(benches);
