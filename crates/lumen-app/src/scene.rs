//! Scene files: a laid-out box tree written by hand in TOML.
//!
//! A scene gives the viewport and a root box. Each box lists its
//! `children` in document order; an `inline` child opens a run that the
//! next unmatched `inline-end` sibling closes. Floats and list markers are
//! attached to the block that positions them.
//!
//! ```toml
//! [viewport]
//! width = 480
//! height = 272
//!
//! [root]
//! type = "block"
//! width = 480
//! height = 272
//! style = { background_color = "#ffffff" }
//!
//! [[root.children]]
//! type = "text"
//! y = 8
//! width = 88
//! height = 20
//! text = "hello world"
//! ```

use std::path::Path;

use serde::Deserialize;

use lumen_redraw::boxes::{
    BackgroundImage, BoxId, BoxNode, BoxTree, BoxType, Document, EdgeSizes, Gadget, TextRun,
};
use lumen_redraw::collab::{Caret, ObjectId};
use lumen_redraw::style::BoxStyle;
use lumen_types::color::Color;
use lumen_types::error::{RedrawError, Result};

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub viewport: Viewport,
    /// Byte range of the document text to show as selected.
    pub selection: Option<[usize; 2]>,
    /// Byte range of the current search match.
    pub search: Option<[usize; 2]>,
    pub root: SceneBox,
}

/// Where and how to redraw.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Viewport {
    /// Position of the root's parent origin.
    pub x: i32,
    pub y: i32,
    /// Clip rectangle size, from the origin.
    pub width: i32,
    pub height: i32,
    pub scale: f32,
    /// Colour behind the document.
    pub background: Color,
    /// The document's own canvas colour.
    pub canvas: Color,
    /// Redraw as a print page ending at this device y.
    pub page_bottom: Option<i32>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 480,
            height: 272,
            scale: 1.0,
            background: Color::WHITE,
            canvas: Color::TRANSPARENT,
            page_bottom: None,
        }
    }
}

/// One box of the scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneBox {
    #[serde(rename = "type")]
    pub box_type: BoxType,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub padding: EdgeSizes,
    #[serde(default)]
    pub border: EdgeSizes,
    #[serde(default)]
    pub margin: EdgeSizes,
    #[serde(default)]
    pub scroll_x: i32,
    #[serde(default)]
    pub scroll_y: i32,
    pub style: Option<BoxStyle>,
    pub text: Option<String>,
    /// A collapsed space follows the text.
    #[serde(default)]
    pub space: bool,
    /// Layout put this box at the start of a line.
    #[serde(default)]
    pub new_line: bool,
    pub object: Option<u64>,
    pub gadget: Option<Gadget>,
    pub background_image: Option<BackgroundImage>,
    /// Caret inside this text box, in unscaled document coordinates.
    pub caret: Option<SceneCaret>,
    pub marker: Option<Box<SceneBox>>,
    #[serde(default)]
    pub floats: Vec<SceneBox>,
    #[serde(default)]
    pub children: Vec<SceneBox>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SceneCaret {
    pub x: i32,
    pub y: i32,
    pub height: i32,
}

/// A scene turned into a document, plus what the redraw needs from it.
#[derive(Debug)]
pub struct BuiltScene {
    pub document: Document,
    pub caret: Option<Caret>,
}

impl Scene {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading scene from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Build the box tree and compute descendant extents.
    pub fn build(&self) -> Result<BuiltScene> {
        let mut builder = Builder::default();
        let root = builder.add(&self.root)?;
        builder.tree.update_descendant_extents(root);
        log::debug!("scene has {} boxes", builder.tree.len());

        let mut document = Document::new(builder.tree, root);
        document.background_color = self.viewport.canvas;
        Ok(BuiltScene {
            document,
            caret: builder.caret,
        })
    }
}

#[derive(Default)]
struct Builder {
    tree: BoxTree,
    text_offset: usize,
    caret: Option<Caret>,
}

impl Builder {
    fn node(&mut self, b: &SceneBox) -> BoxNode {
        let mut node = BoxNode::new(b.box_type)
            .with_rect(b.x, b.y, b.width, b.height)
            .with_padding(b.padding)
            .with_border(b.border)
            .with_margin(b.margin);
        node.scroll_x = b.scroll_x;
        node.scroll_y = b.scroll_y;
        node.style = b.style.clone();
        node.inline_new_line = b.new_line;
        node.object = b.object.map(ObjectId);
        node.gadget = b.gadget.clone();
        node.background = b.background_image;
        if let Some(text) = &b.text {
            node.text = Some(TextRun {
                text: text.clone(),
                byte_offset: self.text_offset,
                trailing_space: b.space,
            });
            self.text_offset += text.len() + usize::from(b.space);
        }
        node
    }

    fn add(&mut self, b: &SceneBox) -> Result<BoxId> {
        let node = self.node(b);
        let id = self.tree.add(node);
        if let Some(c) = b.caret {
            if self.caret.is_some() {
                return Err(RedrawError::Config("scene has more than one caret".into()));
            }
            self.caret = Some(Caret {
                text_box: id,
                x: c.x,
                y: c.y,
                height: c.height,
            });
        }

        let mut open_runs = Vec::new();
        for child in &b.children {
            let c = self.add(child)?;
            self.tree.append_child(id, c);
            match child.box_type {
                BoxType::Inline => open_runs.push(c),
                BoxType::InlineEnd => {
                    let start = open_runs.pop().ok_or_else(|| {
                        RedrawError::Config("inline-end without a matching inline".into())
                    })?;
                    self.tree.set_inline_end(start, c);
                },
                _ => {},
            }
        }
        if !open_runs.is_empty() {
            return Err(RedrawError::Config(format!(
                "{} inline run(s) not closed",
                open_runs.len()
            )));
        }

        for float in &b.floats {
            let f = self.add(float)?;
            self.tree.add_float(id, f);
        }
        if let Some(marker) = &b.marker {
            let m = self.add(marker)?;
            self.tree.set_list_marker(id, m);
        }
        Ok(id)
    }
}
