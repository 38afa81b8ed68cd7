use criterion::{criterion_group, criterion_main, Criterion};
use pdg_align::{
    DegreeSignatures, DependenceKind, GraalAligner, PdGraph, PdGraphBuilder, VertexType,
};

/// A chain of guarded basic blocks, the PDG shape of straight-line code.
fn block_chain(blocks: usize) -> PdGraph {
    let mut builder = PdGraphBuilder::new();
    let mut previous_ctrl = None;
    for _ in 0..blocks {
        let decl = builder.add_vertex(VertexType::Decl);
        let assign = builder.add_vertex(VertexType::Assign);
        let ctrl = builder.add_vertex(VertexType::Ctrl);
        builder.add_edge(decl, assign, DependenceKind::Data);
        builder.add_edge(ctrl, assign, DependenceKind::Control);
        if let Some(previous) = previous_ctrl {
            builder.add_edge(previous, ctrl, DependenceKind::Control);
        }
        previous_ctrl = Some(ctrl);
    }
    builder.build()
}

fn bench_align(c: &mut Criterion) {
    c.bench_function("align(block_chain_4, twin)", |b| {
        let original = block_chain(4);
        let suspect = block_chain(4);
        let aligner = GraalAligner::new(DegreeSignatures);

        b.iter(|| {
            let result = aligner.execute(&original, &suspect).unwrap();
            assert!(!result.is_empty());
        })
    });

    c.bench_function("align(block_chain_4, shortened)", |b| {
        let original = block_chain(4);
        let suspect = block_chain(3);
        let aligner = GraalAligner::new(DegreeSignatures);

        b.iter(|| {
            let result = aligner.execute(&original, &suspect).unwrap();
            assert!(!result.is_empty());
        })
    });
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
