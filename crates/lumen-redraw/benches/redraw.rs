//! Benchmarks for the redraw pass.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lumen_redraw::boxes::{BoxNode, BoxTree, BoxType, Document, EdgeSizes, TextRun};
use lumen_redraw::collab::{FixedWidthFonts, NoContent};
use lumen_redraw::record::RecordingPlotter;
use lumen_redraw::style::{BorderSide, BorderStyle, BoxStyle, Overflow};
use lumen_redraw::{RedrawContext, redraw};
use lumen_types::color::Color;
use lumen_types::error::Result;
use lumen_types::geom::{Point, Rect};
use lumen_types::plotter::{FontStyle, PlotStyle, Plotter};

/// A plotter that does nothing -- isolates walker cost from rendering.
struct NullPlotter;

impl Plotter for NullPlotter {
    fn clip(&mut self, _clip: &Rect) -> Result<()> {
        Ok(())
    }
    fn rectangle(&mut self, _rect: &Rect, _style: &PlotStyle) -> Result<()> {
        Ok(())
    }
    fn line(&mut self, _from: Point, _to: Point, _style: &PlotStyle) -> Result<()> {
        Ok(())
    }
    fn polygon(&mut self, _points: &[Point], _style: &PlotStyle) -> Result<()> {
        Ok(())
    }
    fn text(
        &mut self,
        _x: i32,
        _y: i32,
        _font: &FontStyle,
        _text: &str,
        _background: Color,
        _foreground: Color,
    ) -> Result<()> {
        Ok(())
    }
}

/// A page of `n` bordered sections, each holding a line of text, with
/// every fourth one scrolling.
fn generate_page(n: usize) -> Document {
    let mut tree = BoxTree::new();
    let root = tree.add(
        BoxNode::new(BoxType::Block)
            .with_rect(0, 0, 480, 40 * n as i32)
            .with_style(BoxStyle::initial().with_background(Color::WHITE)),
    );
    for i in 0..n {
        let shade = (i * 37 % 256) as u8;
        let mut style = BoxStyle::initial()
            .with_background(Color::rgb(shade, 255 - shade, 128))
            .with_border(BorderSide::new(Color::BLACK, BorderStyle::Solid));
        if i % 4 == 3 {
            style.overflow = Overflow::Auto;
        }
        let section = tree.push(
            root,
            BoxNode::new(BoxType::Block)
                .with_rect(4, 40 * i as i32 + 2, 460, 30)
                .with_border(EdgeSizes::uniform(1))
                .with_style(style),
        );
        let line = tree.push(
            section,
            BoxNode::new(BoxType::InlineContainer).with_rect(0, 0, 460, 20),
        );
        tree.push(
            line,
            BoxNode::new(BoxType::Text)
                .with_rect(2, 0, 200, 20)
                .with_text(TextRun::new(format!("Section {i} with some text"))),
        );
        if i % 4 == 3 {
            tree.push(
                line,
                BoxNode::new(BoxType::Text)
                    .with_rect(2, 60, 200, 20)
                    .with_text(TextRun::new("overflowing line")),
            );
        }
    }
    tree.update_descendant_extents(root);
    Document::new(tree, root)
}

fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw");
    let fonts = FixedWidthFonts::default();

    for n_sections in [50, 200, 1000] {
        let doc = generate_page(n_sections);
        let label = format!("{n_sections}_sections");

        // Viewport over the first screenful only; most of the tree is
        // rejected by the clip.
        group.bench_with_input(BenchmarkId::new("viewport", &label), &doc, |b, doc| {
            let clip = Rect::new(0, 0, 480, 272);
            b.iter(|| {
                let mut plotter = NullPlotter;
                let mut content = NoContent;
                let mut ctx = RedrawContext::new(&mut plotter, &fonts, &mut content);
                redraw(doc, &mut ctx, 0, 0, &clip, 1.0, Color::WHITE)
            });
        });

        group.bench_with_input(BenchmarkId::new("whole_page", &label), &doc, |b, doc| {
            let clip = Rect::new(0, 0, 480, 40 * n_sections as i32);
            b.iter(|| {
                let mut plotter = NullPlotter;
                let mut content = NoContent;
                let mut ctx = RedrawContext::new(&mut plotter, &fonts, &mut content);
                redraw(doc, &mut ctx, 0, 0, &clip, 1.5, Color::WHITE)
            });
        });
    }

    group.finish();
}

fn bench_recording(c: &mut Criterion) {
    let doc = generate_page(200);
    let fonts = FixedWidthFonts::default();
    let clip = Rect::new(0, 0, 480, 8000);

    c.bench_function("redraw/recording_200_sections", |b| {
        b.iter(|| {
            let mut plotter = RecordingPlotter::new();
            let mut content = NoContent;
            let mut ctx = RedrawContext::new(&mut plotter, &fonts, &mut content);
            redraw(&doc, &mut ctx, 0, 0, &clip, 1.0, Color::WHITE).map(|()| plotter.calls.len())
        });
    });
}

criterion_group!(benches, bench_redraw, bench_recording);
criterion_main!(benches);
