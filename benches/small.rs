use criterion::{Criterion, criterion_group, criterion_main};

fn synthetic_input(entries: usize) -> String {
    let mut input = String::from("% Encoding: UTF-8\n\n@string(acme = \"Acme Journal\")\n");
    for i in 0..entries {
        input.push_str(&format!(
            "\n@article{{key{i},\n  \
               author = {{Last{i}, First and Other, Author}},\n  \
               title = \"A {{Title}} number {i}\",\n  \
               journal = acme,\n  \
               year = {},\n  \
               pages = \"1--\" # \"{i}\",\n\
             }}\n",
            1950 + i % 70
        ));
    }
    input
}

pub fn criterion_benchmark(c: &mut Criterion) {
    use bibdom::{Bibliography, Parser, SortBy, WriteSettings};

    let input_str = synthetic_input(1000);
    let input_bytes = input_str.as_bytes();

    c.bench_function("parse str", |b| {
        b.iter(|| Parser::new().parse_str(&input_str))
    });

    c.bench_function("parse reader", |b| {
        b.iter(|| Parser::new().parse_reader(input_bytes))
    });

    let bib = Bibliography::parse(&input_str).unwrap();
    let settings = WriteSettings::default();

    c.bench_function("write", |b| b.iter(|| bibdom::to_string(&bib, &settings)));

    c.bench_function("sort by author", |b| {
        b.iter(|| {
            let mut bib = bib.clone();
            bib.sort_entries(SortBy::Author);
            bib
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
