use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pydeps::extract::ImportExtractor;

fn synthetic_module(modules: usize) -> String {
    let mut source = String::from("from __future__ import annotations\n");
    for i in 0..modules {
        source.push_str(&format!("import pkg{i}.sub{i}.mod{i}\n"));
        source.push_str(&format!("from pkg{i}.sub{i} import a{i}, b{i}, c{i}\n"));
    }
    source.push_str("\ndef main():\n    import json\n    return json\n");
    source
}

fn bench_extract(c: &mut Criterion) {
    let source = synthetic_module(200);
    let mut extractor = ImportExtractor::new().unwrap();

    c.bench_function("extract_imports_200_modules", |b| {
        b.iter(|| {
            let imports = extractor.extract_source(black_box(&source)).unwrap();
            black_box(imports.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
