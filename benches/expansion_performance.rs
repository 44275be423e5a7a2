use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use html_sitegen::registry::TemplateRegistry;
use html_sitegen::{PageTree, RenderContext, Site, SiteBuilder, Warnings};

const TEMPLATES: &str = r#"
# $SimplePage(title,body)
<h1>$$title$$</h1>
<p>$$body$$</p>

# $Link(href,text)
<a href="$$href$$">$$text$$</a>

# $Card(title,href)
<div class="card"><h3>$$title$$</h3>$Link($$href$$,more)$</div>

# $Tab(name,href,state)
<li class="$$state$$"><a href="$$href$$">$$name$$</a></li>

# $Frame(title)
<ul class="nav">$NavList(Tab)$</ul><main><h1>$$title$$</h1>$ChildList(Card)$</main>
"#;

/// A tree with `width` sections of `width` pages each
fn generate_tree(width: usize) -> PageTree {
    let mut tree = PageTree::from_root("index");
    let root = tree.root();
    for s in 0..width {
        let section = tree.add_child(root, format!("section-{}", s)).unwrap();
        for p in 0..width {
            tree.add_child(section, format!("page-{}-{}", s, p)).unwrap();
        }
    }
    tree
}

fn generate_site(width: usize) -> Site {
    SiteBuilder::new()
        .with_tree(generate_tree(width))
        .templates_str(TEMPLATES)
        .build()
        .unwrap()
}

fn bench_template_loading(c: &mut Criterion) {
    c.bench_function("load_templates", |b| {
        b.iter(|| {
            let mut warnings = Warnings::new();
            TemplateRegistry::parse(black_box(TEMPLATES), &mut warnings)
        })
    });
}

fn bench_simple_expansion(c: &mut Criterion) {
    let site = generate_site(2);
    let ctx = RenderContext::new(site.tree(), site.tree().root());

    c.bench_function("expand_simple_page", |b| {
        b.iter(|| {
            let mut warnings = Warnings::new();
            site.interpret_line(
                black_box("$SimplePage(Title,Some **bold** body text)$"),
                ctx,
                &mut warnings,
            )
        })
    });
}

fn bench_nested_expansion(c: &mut Criterion) {
    let site = generate_site(2);
    let ctx = RenderContext::new(site.tree(), site.tree().root());
    let line = "$Card($Link(a.html,$Link(b.html,c)$)$,d.html)$";

    c.bench_function("expand_nested_invocations", |b| {
        b.iter(|| {
            let mut warnings = Warnings::new();
            site.engine().resolve_line(black_box(line), ctx, &mut warnings)
        })
    });
}

fn bench_tree_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_functions");

    for width in [5, 20, 50] {
        let site = generate_site(width);
        let section = site.tree().find("section-0").unwrap();
        let ctx = RenderContext::new(site.tree(), section);

        group.bench_with_input(BenchmarkId::new("frame", width), &width, |b, _| {
            b.iter(|| {
                let mut warnings = Warnings::new();
                site.interpret_line(black_box("$Frame(Section)$"), ctx, &mut warnings)
            })
        });

        let root_ctx = RenderContext::new(site.tree(), site.tree().root());
        group.bench_with_input(BenchmarkId::new("site_map", width), &width, |b, _| {
            b.iter(|| {
                let mut warnings = Warnings::new();
                site.engine()
                    .resolve_line(black_box("$SiteMap()$"), root_ctx, &mut warnings)
            })
        });
    }

    group.finish();
}

fn bench_plain_lines(c: &mut Criterion) {
    let site = generate_site(2);
    let ctx = RenderContext::new(site.tree(), site.tree().root());
    let line = "A plain paragraph with $5 prices, *emphasis* and no invocations at all.";

    c.bench_function("interpret_plain_line", |b| {
        b.iter(|| {
            let mut warnings = Warnings::new();
            site.interpret_line(black_box(line), ctx, &mut warnings)
        })
    });
}

criterion_group!(
    expansion_benches,
    bench_template_loading,
    bench_simple_expansion,
    bench_nested_expansion,
    bench_tree_functions,
    bench_plain_lines
);

criterion_main!(expansion_benches);
