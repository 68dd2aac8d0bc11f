//! Arena-based box tree consumed by the redraw pass.
//!
//! Boxes are stored in a flat `Vec` arena and linked by [`BoxId`]. Each
//! box keeps parent, first-child and sibling links so that inline runs
//! can be walked forward with [`BoxTree::next`] up to their matching
//! inline-end marker. Layout fills the tree in; redraw only reads it.
//!
//! Geometry is in unscaled CSS pixels. A box's `x`/`y` is the top-left
//! of its padding box relative to its parent's padding box; `width` and
//! `height` are the content size.

use serde::{Deserialize, Serialize};

use lumen_types::color::Color;
use lumen_types::geom::Rect;

use crate::collab::{ImageId, ObjectId};
use crate::style::BoxStyle;

/// Index into the [`BoxTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub usize);

/// Kind of box produced by layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxType {
    Block,
    InlineBlock,
    /// Start of an inline run. Paired with an [`BoxType::InlineEnd`].
    Inline,
    InlineEnd,
    /// Holds the line boxes of a block.
    InlineContainer,
    Text,
    TableCell,
    TableRow,
    Table,
    Br,
    FloatLeft,
    FloatRight,
}

impl BoxType {
    pub const fn is_float(self) -> bool {
        matches!(self, Self::FloatLeft | Self::FloatRight)
    }
}

/// Border edge, in the order used to index border arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Edge sizes (top, right, bottom, left) used for margin, padding, border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSizes {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl EdgeSizes {
    pub const ZERO: Self = Self::uniform(0);

    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on all sides.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn get(&self, side: Side) -> i32 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

/// A text fragment owned by a text box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    /// Offset of this fragment in the document's text, used to look up
    /// selection and search highlights.
    pub byte_offset: usize,
    /// The fragment is followed by a collapsed space that layout did not
    /// include in `text`.
    pub trailing_space: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            byte_offset: 0,
            trailing_space: false,
        }
    }
}

/// Form control state for boxes that stand in for an input element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gadget {
    Checkbox { selected: bool },
    Radio { selected: bool },
    File { value: Option<String> },
}

/// Background image attached to a box. Pixel access goes through the
/// content delegate; only the intrinsic size is needed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub image: ImageId,
    pub width: i32,
    pub height: i32,
}

/// A single box in the tree.
#[derive(Debug, Clone)]
pub struct BoxNode {
    pub box_type: BoxType,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
    pub scroll_x: i32,
    pub scroll_y: i32,
    /// Bounding box of this box and all its descendants, relative to the
    /// top-left of this box's padding box.
    pub descendant: Rect,
    pub style: Option<BoxStyle>,
    pub text: Option<TextRun>,
    pub object: Option<ObjectId>,
    pub gadget: Option<Gadget>,
    pub background: Option<BackgroundImage>,
    /// Marker box of a list item. Not a child; positioned relative to the
    /// item itself.
    pub list_marker: Option<BoxId>,
    /// For [`BoxType::Inline`], the matching end marker.
    pub inline_end: Option<BoxId>,
    /// Layout placed this box at the start of a new line.
    pub inline_new_line: bool,

    parent: Option<BoxId>,
    first_child: Option<BoxId>,
    last_child: Option<BoxId>,
    next: Option<BoxId>,
    prev: Option<BoxId>,
    float_children: Vec<BoxId>,
}

impl BoxNode {
    /// A detached, unstyled box with zero geometry.
    pub fn new(box_type: BoxType) -> Self {
        Self {
            box_type,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            padding: EdgeSizes::ZERO,
            border: EdgeSizes::ZERO,
            margin: EdgeSizes::ZERO,
            scroll_x: 0,
            scroll_y: 0,
            descendant: Rect::default(),
            style: None,
            text: None,
            object: None,
            gadget: None,
            background: None,
            list_marker: None,
            inline_end: None,
            inline_new_line: false,
            parent: None,
            first_child: None,
            last_child: None,
            next: None,
            prev: None,
            float_children: Vec::new(),
        }
    }

    /// Set position and content size. The descendant extent is reset to
    /// the border box; call [`BoxTree::update_descendant_extents`] once the
    /// subtree is built.
    pub fn with_rect(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self.descendant = self.own_extent();
        self
    }

    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self.descendant = self.own_extent();
        self
    }

    pub fn with_border(mut self, border: EdgeSizes) -> Self {
        self.border = border;
        self.descendant = self.own_extent();
        self
    }

    pub fn with_margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_text(mut self, text: TextRun) -> Self {
        self.text = Some(text);
        self
    }

    pub fn padding_width(&self) -> i32 {
        self.padding.left + self.width + self.padding.right
    }

    pub fn padding_height(&self) -> i32 {
        self.padding.top + self.height + self.padding.bottom
    }

    /// Border box relative to this box's padding-box origin.
    pub fn own_extent(&self) -> Rect {
        Rect::new(
            -self.border.left,
            -self.border.top,
            self.padding_width() + self.border.right,
            self.padding_height() + self.border.bottom,
        )
    }

    pub fn has_border(&self) -> bool {
        !self.border.is_zero()
    }

    pub fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    pub fn next(&self) -> Option<BoxId> {
        self.next
    }

    pub fn prev(&self) -> Option<BoxId> {
        self.prev
    }

    pub fn first_child(&self) -> Option<BoxId> {
        self.first_child
    }

    pub fn float_children(&self) -> &[BoxId] {
        &self.float_children
    }
}

// ------------------------------------------------------------------
// Tree
// ------------------------------------------------------------------

/// Arena holding every box of a laid-out document.
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    nodes: Vec<BoxNode>,
}

impl BoxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached box and return its id.
    pub fn add(&mut self, node: BoxNode) -> BoxId {
        let id = BoxId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: BoxId) -> Option<&BoxNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut BoxNode> {
        self.nodes.get_mut(id.0)
    }

    /// Append `child` as the last child of `parent`, linking siblings.
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        let prev = self.nodes[parent.0].last_child;
        if let Some(prev) = prev {
            self.nodes[prev.0].next = Some(child);
        } else {
            self.nodes[parent.0].first_child = Some(child);
        }
        let c = &mut self.nodes[child.0];
        c.parent = Some(parent);
        c.prev = prev;
        c.next = None;
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Add `child` and append it to `parent` in one step.
    pub fn push(&mut self, parent: BoxId, node: BoxNode) -> BoxId {
        let id = self.add(node);
        self.append_child(parent, id);
        id
    }

    /// Register a float with the block that positions it. The float's
    /// `x`/`y` are relative to `owner`. A float not yet placed in the
    /// tree gets `owner` as its parent.
    pub fn add_float(&mut self, owner: BoxId, float: BoxId) {
        self.nodes[owner.0].float_children.push(float);
        if self.nodes[float.0].parent.is_none() {
            self.nodes[float.0].parent = Some(owner);
        }
    }

    /// Attach a list marker to a list item.
    pub fn set_list_marker(&mut self, item: BoxId, marker: BoxId) {
        self.nodes[item.0].list_marker = Some(marker);
        self.nodes[marker.0].parent = Some(item);
    }

    /// Pair an inline box with its end marker.
    pub fn set_inline_end(&mut self, inline: BoxId, end: BoxId) {
        self.nodes[inline.0].inline_end = Some(end);
    }

    pub fn set_scroll(&mut self, id: BoxId, scroll_x: i32, scroll_y: i32) {
        let n = &mut self.nodes[id.0];
        n.scroll_x = scroll_x;
        n.scroll_y = scroll_y;
    }

    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.nodes[id.0].parent
    }

    /// Next sibling.
    pub fn next(&self, id: BoxId) -> Option<BoxId> {
        self.nodes[id.0].next
    }

    /// Iterate the direct children of `id` in document order.
    pub fn children(&self, id: BoxId) -> Children<'_> {
        Children {
            tree: self,
            cursor: self.nodes[id.0].first_child,
        }
    }

    /// Nearest ancestor of the given type.
    pub fn ancestor_of_type(&self, id: BoxId, box_type: BoxType) -> Option<BoxId> {
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            if self.nodes[p.0].box_type == box_type {
                return Some(p);
            }
            cur = self.nodes[p.0].parent;
        }
        None
    }

    /// Recompute every box's descendant extent below `root`.
    ///
    /// Each extent is the union of the box's own border box and the
    /// extents of its children and floats, offset by their positions.
    pub fn update_descendant_extents(&mut self, root: BoxId) {
        // Post-order with an explicit stack: (id, children_done).
        let mut stack = vec![(root, false)];
        while let Some((id, done)) = stack.pop() {
            if !done {
                stack.push((id, true));
                let kids: Vec<BoxId> = self
                    .children(id)
                    .chain(self.nodes[id.0].float_children.iter().copied())
                    .collect();
                stack.extend(kids.into_iter().map(|k| (k, false)));
                continue;
            }
            let mut extent = self.nodes[id.0].own_extent();
            let kids: Vec<BoxId> = self
                .children(id)
                .chain(self.nodes[id.0].float_children.iter().copied())
                .collect();
            for k in kids {
                let c = &self.nodes[k.0];
                let d = c.descendant;
                extent = extent.union(&Rect::new(
                    c.x + d.x0,
                    c.y + d.y0,
                    c.x + d.x1,
                    c.y + d.y1,
                ));
            }
            self.nodes[id.0].descendant = extent;
        }
    }
}

impl std::ops::Index<BoxId> for BoxTree {
    type Output = BoxNode;

    fn index(&self, id: BoxId) -> &BoxNode {
        &self.nodes[id.0]
    }
}

impl std::ops::IndexMut<BoxId> for BoxTree {
    fn index_mut(&mut self, id: BoxId) -> &mut BoxNode {
        &mut self.nodes[id.0]
    }
}

/// Iterator over a box's children, following sibling links.
pub struct Children<'a> {
    tree: &'a BoxTree,
    cursor: Option<BoxId>,
}

impl Iterator for Children<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let id = self.cursor?;
        self.cursor = self.tree.nodes[id.0].next;
        Some(id)
    }
}

/// A laid-out document ready to redraw.
#[derive(Debug, Clone)]
pub struct Document {
    pub tree: BoxTree,
    pub root: BoxId,
    /// Canvas colour. Transparent means "use the caller's colour".
    pub background_color: Color,
}

impl Document {
    pub fn new(tree: BoxTree, root: BoxId) -> Self {
        Self {
            tree,
            root,
            background_color: Color::TRANSPARENT,
        }
    }
}
