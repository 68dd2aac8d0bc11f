//! `lumen-dump`: replay a scene file through the redraw pass and print the
//! recorded plot calls as JSON.
//!
//! ```text
//! lumen-dump <scene.toml> [--theme theme.toml] [--options options.toml]
//!            [--scale f] [--pretty]
//! ```
//!
//! A scene whose viewport sets `page-bottom` is printed page by page; each
//! page is one pass and boxes cut by the page edge move to the next page.

mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use lumen_redraw::collab::{FixedWidthFonts, RangeHighlight};
use lumen_redraw::print::PrintSession;
use lumen_redraw::record::{ObjectCall, PlotCall, RecordingContent, RecordingPlotter, TileCall};
use lumen_redraw::{RedrawContext, redraw};
use lumen_types::config::{RedrawOptions, RedrawTheme};
use lumen_types::geom::Rect;

use scene::{BuiltScene, Scene};

/// Upper bound on pages for one print job.
const MAX_PAGES: usize = 256;

#[derive(Debug, Default, PartialEq)]
struct Args {
    scene: PathBuf,
    theme: Option<PathBuf>,
    options: Option<PathBuf>,
    scale: Option<f32>,
    pretty: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut scene = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--theme" => parsed.theme = Some(value(&mut args, &arg)?.into()),
            "--options" => parsed.options = Some(value(&mut args, &arg)?.into()),
            "--scale" => {
                let v = value(&mut args, &arg)?;
                let scale: f32 = v.parse().with_context(|| format!("bad scale {v:?}"))?;
                if scale.is_nan() || scale <= 0.0 {
                    bail!("scale must be positive, got {scale}");
                }
                parsed.scale = Some(scale);
            },
            "--pretty" => parsed.pretty = true,
            s if s.starts_with("--") => bail!("unknown option {s}"),
            _ if scene.is_some() => bail!("more than one scene given"),
            _ => scene = Some(PathBuf::from(arg)),
        }
    }
    parsed.scene = scene.context(
        "usage: lumen-dump <scene.toml> [--theme path] [--options path] [--scale f] [--pretty]",
    )?;
    Ok(parsed)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{flag} needs a value"))
}

/// What one redraw pass produced.
#[derive(Debug, Serialize)]
struct Page {
    /// Document y (unscaled) at the top of this page.
    top: i32,
    calls: Vec<PlotCall>,
    objects: Vec<ObjectCall>,
    tiles: Vec<TileCall>,
}

#[derive(Debug, Serialize)]
struct Dump {
    scale: f32,
    pages: Vec<Page>,
}

fn replay(
    scene: &Scene,
    built: &BuiltScene,
    theme: &RedrawTheme,
    options: &RedrawOptions,
    scale: f32,
) -> Result<Dump> {
    let vp = &scene.viewport;
    let fonts = FixedWidthFonts::default();
    let selection = scene.selection.map(|[s, e]| RangeHighlight::new(s, e));
    let search = scene.search.map(|[s, e]| RangeHighlight::new(s, e));

    let pass = |top: i32, clip: Rect, print: Option<&mut PrintSession>| -> Result<Page> {
        let mut plotter = RecordingPlotter::new();
        let mut content = RecordingContent::default();
        let mut ctx = RedrawContext::new(&mut plotter, &fonts, &mut content)
            .with_theme(theme.clone())
            .with_options(options.clone());
        if let Some(h) = &selection {
            ctx = ctx.with_selection(h);
        }
        if let Some(h) = &search {
            ctx = ctx.with_search(h);
        }
        if let Some(caret) = built.caret {
            ctx = ctx.with_caret(caret);
        }
        if let Some(session) = print {
            ctx = ctx.with_print(session);
        }
        redraw(
            &built.document,
            &mut ctx,
            vp.x,
            vp.y - top,
            &clip,
            scale,
            vp.background,
        )?;
        Ok(Page {
            top,
            calls: plotter.calls,
            objects: content.objects,
            tiles: content.tiles,
        })
    };

    let Some(page_height) = vp.page_bottom else {
        let clip = Rect::from_size(0, 0, vp.width, vp.height);
        return Ok(Dump {
            scale,
            pages: vec![pass(0, clip, None)?],
        });
    };
    if page_height <= 0 {
        bail!("page-bottom must be positive, got {page_height}");
    }

    // The print session works in device pixels; page tops are kept in
    // document units so the redraw origin stays unscaled.
    let to_doc = |device: i32| (device as f32 / scale) as i32;
    let page_step = to_doc(page_height).max(1);
    let root = &built.document.tree[built.document.root];
    let doc_bottom = vp.y + root.y + root.descendant.y1;
    let clip = Rect::from_size(0, 0, vp.width, page_height);
    let mut session = PrintSession::new(page_height);
    let mut pages = Vec::new();
    let mut top = 0;
    while top < doc_bottom {
        if pages.len() == MAX_PAGES {
            log::warn!("stopping after {MAX_PAGES} pages");
            break;
        }
        session.begin_page(page_height);
        pages.push(pass(top, clip, Some(&mut session))?);
        let next = session.top_cropped().map_or(top + page_step, |t| top + to_doc(t));
        // a deferred box taller than a page would never fit
        top = if next > top { next } else { top + page_step };
    }
    log::info!(
        "printed {} page(s), {} box(es)",
        pages.len(),
        session.printed_count()
    );
    Ok(Dump { scale, pages })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let scene = Scene::load(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;
    let theme = match &args.theme {
        Some(path) => RedrawTheme::load(path)
            .with_context(|| format!("loading theme {}", path.display()))?,
        None => RedrawTheme::default(),
    };
    let options = match &args.options {
        Some(path) => RedrawOptions::load(path)
            .with_context(|| format!("loading options {}", path.display()))?,
        None => RedrawOptions::default(),
    };
    let scale = args.scale.unwrap_or(scene.viewport.scale);

    let built = scene.build().context("building box tree")?;
    let dump = replay(&scene, &built, &theme, &options, scale)?;
    log::info!(
        "{}: {} plot call(s) over {} page(s)",
        args.scene.display(),
        dump.pages.iter().map(|p| p.calls.len()).sum::<usize>(),
        dump.pages.len()
    );

    let stdout = std::io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(stdout, &dump)?;
    } else {
        serde_json::to_writer(stdout, &dump)?;
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_in_any_order() {
        let a = args(&["--scale", "2", "page.toml", "--pretty", "--theme", "t.toml"]).unwrap();
        assert_eq!(a.scene, PathBuf::from("page.toml"));
        assert_eq!(a.theme, Some(PathBuf::from("t.toml")));
        assert_eq!(a.scale, Some(2.0));
        assert!(a.pretty);
        assert!(a.options.is_none());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
        assert!(args(&["a.toml", "--scale"]).is_err());
        assert!(args(&["a.toml", "--scale", "0"]).is_err());
        assert!(args(&["a.toml", "--frobnicate"]).is_err());
    }

    fn replay_str(toml: &str) -> Dump {
        let scene = Scene::from_toml_str(toml).unwrap();
        let built = scene.build().unwrap();
        let scale = scene.viewport.scale;
        replay(
            &scene,
            &built,
            &RedrawTheme::default(),
            &RedrawOptions::default(),
            scale,
        )
        .unwrap()
    }

    #[test]
    fn screen_replay_is_one_page() {
        let dump = replay_str(
            r##"
            [viewport]
            width = 100
            height = 50

            [root]
            type = "block"
            width = 100
            height = 50
            style = { background_color = "#ff0000" }
            "##,
        );
        assert_eq!(dump.pages.len(), 1);
        let page = &dump.pages[0];
        assert_eq!(page.calls[0], PlotCall::Clip(Rect::new(0, 0, 100, 50)));
        assert!(page.calls.iter().any(|c| matches!(
            c,
            PlotCall::Rectangle { rect, .. } if *rect == Rect::new(0, 0, 100, 50)
        )));
    }

    #[test]
    fn print_replay_moves_cut_text_to_next_page() {
        let dump = replay_str(
            r#"
            [viewport]
            width = 100
            height = 150
            page-bottom = 100

            [root]
            type = "block"
            width = 100
            height = 150

            [[root.children]]
            type = "text"
            y = 10
            width = 24
            height = 20
            text = "top"

            [[root.children]]
            type = "text"
            y = 90
            width = 24
            height = 20
            text = "cut"
            "#,
        );
        let texts = |page: &Page| -> Vec<String> {
            page.calls
                .iter()
                .filter_map(|c| match c {
                    PlotCall::Text { text, .. } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(dump.pages.len(), 2);
        assert_eq!(texts(&dump.pages[0]), vec!["top"]);
        assert_eq!(dump.pages[1].top, 90);
        assert_eq!(texts(&dump.pages[1]), vec!["cut"]);
    }

    #[test]
    fn dump_serializes_with_tagged_calls() {
        let dump = replay_str(
            r#"
            [root]
            type = "block"
            width = 10
            height = 10
            "#,
        );
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["pages"][0]["calls"][0]["op"], "clip");
    }

    #[test]
    fn demo_scene_reaches_content_delegate() {
        let dump = replay_str(include_str!("../scenes/demo.toml"));
        let page = &dump.pages[0];
        assert_eq!(page.objects.len(), 1);
        assert_eq!(page.objects[0].object.0, 7);
        assert!(page.tiles.iter().all(|t| t.image.0 == 3 && t.repeat_x && !t.repeat_y));
        assert!(!page.tiles.is_empty());
        assert!(page.calls.iter().any(|c| matches!(c, PlotCall::Text { text, .. } if text == "world")));
    }

    /// Indices of the pages that draw `line`.
    fn pages_with(dump: &Dump, line: &str) -> Vec<usize> {
        dump.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.calls
                    .iter()
                    .any(|c| matches!(c, PlotCall::Text { text, .. } if text == line))
            })
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn print_scene_pages_each_line_once() {
        let dump = replay_str(include_str!("../scenes/print.toml"));
        assert_eq!(pages_with(&dump, "line one"), vec![0]);
        assert_eq!(pages_with(&dump, "line two"), vec![0]);
        assert_eq!(pages_with(&dump, "line three"), vec![1]);
        assert_eq!(pages_with(&dump, "last line"), vec![2]);
        assert_eq!(dump.pages[1].top, 110);
    }

    #[test]
    fn scaled_print_keeps_every_line() {
        let scene = Scene::from_toml_str(include_str!("../scenes/print.toml")).unwrap();
        let built = scene.build().unwrap();
        let dump = replay(
            &scene,
            &built,
            &RedrawTheme::default(),
            &RedrawOptions::default(),
            2.0,
        )
        .unwrap();

        // 120 device pixels is 60 document pixels per page at this scale
        assert_eq!(pages_with(&dump, "line one"), vec![0]);
        assert_eq!(pages_with(&dump, "line two"), vec![1]);
        assert_eq!(pages_with(&dump, "line three"), vec![2]);
        assert_eq!(pages_with(&dump, "last line"), vec![4]);
        assert_eq!(dump.pages[1].top, 50);
        assert_eq!(dump.pages[2].top, 110);
    }

    #[test]
    fn bundled_theme_and_options_load() {
        let theme = RedrawTheme::from_toml_str(include_str!("../scenes/theme.toml")).unwrap();
        assert_eq!(theme.scrollbar_width, 12);
        let options =
            RedrawOptions::from_toml_str(include_str!("../scenes/debug.toml")).unwrap();
        assert!(options.debug_outlines);
    }
}
