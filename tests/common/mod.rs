#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use lopdf::{Document, Object, Stream, dictionary};

const LEFT: f64 = 72.0;
const TOP: f64 = 722.0;
const COL_WIDTH: f64 = 100.0;
const ROW_HEIGHT: f64 = 30.0;

/// Content stream for one ruled grid with one text run per cell.
fn grid_content(rows: &[&[&str]]) -> Vec<u8> {
    let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let right = LEFT + COL_WIDTH * cols as f64;
    let bottom = TOP - ROW_HEIGHT * rows.len() as f64;

    let mut cs = String::from("1 w\n");
    for r in 0..=rows.len() {
        let y = TOP - ROW_HEIGHT * r as f64;
        writeln!(cs, "{LEFT} {y} m {right} {y} l S").expect("write to string");
    }
    for c in 0..=cols {
        let x = LEFT + COL_WIDTH * c as f64;
        writeln!(cs, "{x} {TOP} m {x} {bottom} l S").expect("write to string");
    }

    for (r, row) in rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            let tx = LEFT + COL_WIDTH * c as f64 + 5.0;
            let ty = TOP - ROW_HEIGHT * r as f64 - 20.0;
            writeln!(cs, "BT /F1 10 Tf {tx} {ty} Td ({text}) Tj ET").expect("write to string");
        }
    }

    cs.into_bytes()
}

fn text_content(text: &str) -> Vec<u8> {
    format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET").into_bytes()
}

fn build_pdf(contents: Vec<Vec<u8>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::new();
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            },
        });
        page_ids.push(page_id);
    }

    let count = i64::try_from(page_ids.len()).expect("page count fits i64");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<_>>(),
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// One bordered table per page; each page is given as its rows of cell text.
pub fn table_pdf(pages: &[&[&[&str]]]) -> Vec<u8> {
    build_pdf(pages.iter().map(|rows| grid_content(rows)).collect())
}

/// Pages holding a single line of text and no ruling lines.
pub fn text_pdf(pages: &[&str]) -> Vec<u8> {
    build_pdf(pages.iter().map(|text| text_content(text)).collect())
}

pub fn write_pdf(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).expect("PDF fixture should be written");
}
