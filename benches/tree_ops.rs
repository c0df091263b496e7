use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mentor::tree::node::{FileNode, FolderNode, Node};
use mentor::tree::ops::{find_node, move_node, unique_name};

/// Build a forest of `folders` root folders with `files` files each.
fn build_tree(folders: usize, files: usize) -> Vec<Node> {
    (0..folders)
        .map(|d| {
            let folder_id = format!("d{}", d);
            let children = (0..files)
                .map(|f| {
                    Node::File(FileNode {
                        id: format!("d{}f{}", d, f),
                        name: format!("file{}.txt", f),
                        parent_id: Some(folder_id.clone()),
                        content: String::new(),
                    })
                })
                .collect();
            Node::Folder(FolderNode {
                id: folder_id.clone(),
                name: format!("dir{}", d),
                parent_id: None,
                children,
            })
        })
        .collect()
}

fn bench_find_node(c: &mut Criterion) {
    let tree = build_tree(20, 20);
    c.bench_function("find_node deep", |b| {
        b.iter(|| find_node(black_box(&tree), black_box("d19f19")))
    });
}

fn bench_unique_name(c: &mut Criterion) {
    let tree = build_tree(1, 200);
    c.bench_function("unique_name crowded siblings", |b| {
        b.iter(|| unique_name(black_box(&tree), black_box("file0.txt"), false, Some("d0")))
    });
}

fn bench_move_node(c: &mut Criterion) {
    let tree = build_tree(20, 20);
    c.bench_function("move_node across folders", |b| {
        b.iter(|| move_node(black_box(tree.clone()), black_box("d0f0"), Some("d19")).unwrap())
    });
}

criterion_group!(benches, bench_find_node, bench_unique_name, bench_move_node);
criterion_main!(benches);
