//! Benchmarks for the table format and the merge phases.
//!
//! Tests performance for:
//! - Escaping and unescaping names
//! - Parsing a generated table
//! - Remapping descriptors
//! - Building, deriving and rendering a merged table in memory

extern crate tinymerge;

use criterion::{criterion_group, criterion_main, Criterion};
use std::{fmt::Write, hint::black_box};
use tinymerge::{
    auxiliary::Auxiliary,
    builder::{SourceSpec, TableBuilder, TargetSlot},
    descriptor::{remap, MethodDescriptor},
    params::ParameterDeriver,
    tiny::{codec, TinyFile},
    writer::TableWriter,
    MergeConfig,
};

/// A `named`, `intermediary`, `official` table with `classes` classes of four methods each.
fn named_table(classes: usize) -> String {
    let mut out = String::from("tiny\t2\t0\tnamed\tintermediary\tofficial\n");
    for class in 0..classes {
        let _ = writeln!(out, "c\tnet/example/Class{class}\tclass_{class}\tc{class}");
        for method in 0..4 {
            let _ = writeln!(
                out,
                "\tm\t(ILnet/example/Class{class};J)V\tmethod{method}\tmethod_{class}_{method}\tm{method}"
            );
            let _ = writeln!(out, "\t\tp\t1\tcount\t\t");
        }
        let _ = writeln!(out, "\tf\tI\tsize\tfield_{class}\tf");
    }
    out
}

/// The matching `named`, `srg` table.
fn srg_table(classes: usize) -> String {
    let mut out = String::from("tiny\t2\t0\tnamed\tsrg\n");
    for class in 0..classes {
        let _ = writeln!(out, "c\tnet/example/Class{class}\tnet/minecraft/C{class}");
        for method in 0..4 {
            let _ = writeln!(
                out,
                "\tm\t(ILnet/example/Class{class};J)V\tmethod{method}\tfunc_{}_a",
                class * 4 + method + 1000
            );
        }
        let _ = writeln!(out, "\tf\tI\tsize\tfield_{}_b", class + 1000);
    }
    out
}

/// The matching `named`, `mcp` table, all class names blank.
fn mcp_table(classes: usize) -> String {
    let mut out = String::from("tiny\t2\t0\tnamed\tmcp\n");
    for class in 0..classes {
        let _ = writeln!(out, "c\tnet/example/Class{class}\t");
        let _ = writeln!(out, "\tf\tI\tsize\tsize");
    }
    out
}

fn bench_escape(c: &mut Criterion) {
    let plain = "net/example/SomeFairlyLongClassName$Inner";
    let special = "name\twith\\separators\nand\0nul";
    let escaped = codec::escape(special).into_owned();

    c.bench_function("escape_plain", |b| {
        b.iter(|| black_box(codec::escape(black_box(plain))));
    });

    c.bench_function("escape_special", |b| {
        b.iter(|| black_box(codec::escape(black_box(special))));
    });

    c.bench_function("unescape_special", |b| {
        b.iter(|| black_box(codec::unescape(black_box(&escaped)).unwrap()));
    });
}

fn bench_parse(c: &mut Criterion) {
    let text = named_table(1000);

    c.bench_function("parse_table_1000_classes", |b| {
        b.iter(|| {
            let tiny = TinyFile::parse(black_box(&text)).unwrap();
            black_box(tiny)
        });
    });
}

fn bench_descriptor(c: &mut Criterion) {
    let descriptor = "(ILa;[[Lb;JLjava/lang/String;D)Lc;";

    c.bench_function("descriptor_parse", |b| {
        b.iter(|| black_box(MethodDescriptor::parse(black_box(descriptor)).unwrap()));
    });

    c.bench_function("descriptor_remap", |b| {
        b.iter(|| {
            let remapped = remap(black_box(descriptor), |name| match name {
                "a" => Some("net/example/Alpha"),
                "b" => Some("net/example/Beta"),
                "c" => Some("net/example/Gamma"),
                _ => None,
            })
            .unwrap();
            black_box(remapped)
        });
    });
}

fn bench_merge(c: &mut Criterion) {
    let named = named_table(250);
    let srg = srg_table(250);
    let mcp = mcp_table(250);
    let config = MergeConfig::default();
    let auxiliary = Auxiliary::default();

    c.bench_function("merge_250_classes", |b| {
        b.iter(|| {
            let mut builder = TableBuilder::new();
            for slot in [
                TargetSlot::SetOfficial,
                TargetSlot::SetIntermediary,
                TargetSlot::SetNamedParameters,
            ] {
                builder.load_str(&named, &SourceSpec::new(slot)).unwrap();
            }
            builder
                .load_str(&mcp, &SourceSpec::new(TargetSlot::SetMcp).fill_blank_classes(true))
                .unwrap();
            builder
                .load_str(&srg, &SourceSpec::new(TargetSlot::SetSrg))
                .unwrap();

            let mut table = builder.finish();
            ParameterDeriver::new(&config, &auxiliary)
                .derive_table(&mut table)
                .unwrap();
            black_box(TableWriter::new(false).render(&table).unwrap())
        });
    });
}

criterion_group!(benches, bench_escape, bench_parse, bench_descriptor, bench_merge);
criterion_main!(benches);
