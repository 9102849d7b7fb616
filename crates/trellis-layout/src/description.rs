//! JSON box descriptions.
//!
//! A [`BoxDescription`] is the serialisable form of a box and its subtree,
//! with property names and keywords the way a host writes them:
//!
//! ```json
//! {
//!   "name": "toolbar",
//!   "layout": "horizontal",
//!   "width": "fill",
//!   "height": 44,
//!   "children": [
//!     { "name": "back", "left": 8, "content": [32, 32] },
//!     { "name": "title", "flex": 1, "content": [120, 20] }
//!   ]
//! }
//! ```
//!
//! A description with `content` is a leaf; anything else is a container.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_common::warning::warn_once;

use crate::container::LayoutContainer;
use crate::dimension::Dimension;
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Insets, Size};
use crate::spec::{BoxSpec, UnresolvedEdges, ZIndex};
use crate::tree::{Arrangement, BoxId, BoxTree};

/// Width or height as written in a description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtentRepr", into = "String")]
pub enum Extent {
    /// `"fill"`: take all the space the parent offers.
    Fill,
    /// `"size"` (or `"auto"`): size to content.
    Size,
    /// An explicit dimension.
    Fixed(Dimension),
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill => f.write_str("fill"),
            Self::Size => f.write_str("size"),
            Self::Fixed(d) => write!(f, "{d}"),
        }
    }
}

impl From<Extent> for String {
    fn from(extent: Extent) -> Self {
        extent.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtentRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<ExtentRepr> for Extent {
    type Error = LayoutError;

    fn try_from(repr: ExtentRepr) -> Result<Self, Self::Error> {
        match repr {
            ExtentRepr::Number(n) if n.is_finite() => Ok(Self::Fixed(Dimension::px(n))),
            ExtentRepr::Number(n) => Err(LayoutError::InvalidDimension(n.to_string())),
            ExtentRepr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "fill" => Ok(Self::Fill),
                "size" | "auto" => Ok(Self::Size),
                _ => s.parse().map(Self::Fixed),
            },
        }
    }
}

/// Serialisable description of a box and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct BoxDescription {
    /// Name used by diagnostics and the CLI.
    pub name: Option<String>,
    /// Arrangement property: `"vertical"`, `"horizontal"`, or anything
    /// else for the default.
    pub layout: Option<String>,
    /// Line wrapping for horizontal containers.
    pub horizontal_wrap: bool,
    /// Left pin.
    pub left: Option<Dimension>,
    /// Top pin.
    pub top: Option<Dimension>,
    /// Right pin.
    pub right: Option<Dimension>,
    /// Bottom pin.
    pub bottom: Option<Dimension>,
    /// Horizontal center pin.
    pub center_x: Option<Dimension>,
    /// Vertical center pin.
    pub center_y: Option<Dimension>,
    /// Width: a dimension, `"fill"` or `"size"`.
    pub width: Option<Extent>,
    /// Height: a dimension, `"fill"` or `"size"`.
    pub height: Option<Extent>,
    /// Stack level among siblings.
    pub z_index: Option<i32>,
    /// Flex weight.
    pub flex: Option<f64>,
    /// Fill behaviour on the width axis when `width` is absent.
    pub auto_fills_width: bool,
    /// Fill behaviour on the height axis when `height` is absent.
    pub auto_fills_height: bool,
    /// Cleared to make an absent width pin-defined.
    pub size_or_fill_width_enabled: bool,
    /// Cleared to make an absent height pin-defined.
    pub size_or_fill_height_enabled: bool,
    /// Reserved edge values.
    pub margins: UnresolvedEdges,
    /// Reserved edge values.
    pub paddings: UnresolvedEdges,
    /// Intrinsic content size `[width, height]`; its presence makes a leaf.
    pub content: Option<[i32; 2]>,
    /// Container content padding.
    pub padding: Option<Insets>,
    /// Suggested minimum size `[width, height]` for a container.
    pub min_size: Option<[i32; 2]>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f32>,
    /// Children, in attachment order.
    pub children: Vec<BoxDescription>,
}

impl Default for BoxDescription {
    fn default() -> Self {
        Self {
            name: None,
            layout: None,
            horizontal_wrap: true,
            left: None,
            top: None,
            right: None,
            bottom: None,
            center_x: None,
            center_y: None,
            width: None,
            height: None,
            z_index: None,
            flex: None,
            auto_fills_width: false,
            auto_fills_height: false,
            size_or_fill_width_enabled: true,
            size_or_fill_height_enabled: true,
            margins: UnresolvedEdges::default(),
            paddings: UnresolvedEdges::default(),
            content: None,
            padding: None,
            min_size: None,
            opacity: None,
            children: Vec::new(),
        }
    }
}

impl BoxDescription {
    /// Whether this description builds a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.content.is_some()
    }

    /// The [`BoxSpec`] this description asks for.
    ///
    /// `"fill"` and `"size"` switch `auto_fills_*` on or off and keep
    /// size-or-fill enabled; an explicit dimension becomes the spec's size.
    #[must_use]
    pub fn to_spec(&self) -> BoxSpec {
        let (width, auto_fills_width, size_or_fill_width_enabled) = extent_parts(
            self.width,
            self.auto_fills_width,
            self.size_or_fill_width_enabled,
        );
        let (height, auto_fills_height, size_or_fill_height_enabled) = extent_parts(
            self.height,
            self.auto_fills_height,
            self.size_or_fill_height_enabled,
        );
        BoxSpec {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
            center_x: self.center_x,
            center_y: self.center_y,
            width,
            height,
            z_index: ZIndex::from(self.z_index),
            flex: self.flex,
            auto_fills_width,
            auto_fills_height,
            size_or_fill_width_enabled,
            size_or_fill_height_enabled,
            margins: self.margins,
            paddings: self.paddings,
            ..BoxSpec::default()
        }
    }
}

fn extent_parts(
    extent: Option<Extent>,
    auto_fills: bool,
    size_or_fill: bool,
) -> (Option<Dimension>, bool, bool) {
    match extent {
        Some(Extent::Fixed(d)) => (Some(d), auto_fills, size_or_fill),
        Some(Extent::Fill) => (None, true, true),
        Some(Extent::Size) => (None, false, true),
        None => (None, auto_fills, size_or_fill),
    }
}

/// A tree built from a description, with the names it carried.
#[derive(Debug, Clone)]
pub struct DescribedTree {
    /// The built container.
    pub container: LayoutContainer,
    /// `name` of every described box that had one.
    pub names: BTreeMap<BoxId, String>,
}

impl DescribedTree {
    /// Name of `id`, or its id when it has none.
    #[must_use]
    pub fn display_name(&self, id: BoxId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}

impl BoxTree {
    /// Build a tree from a description whose root is a container.
    pub fn from_description(description: &BoxDescription) -> LayoutResult<DescribedTree> {
        let mut tree = Self::new();
        let mut names = BTreeMap::new();
        let root = build(&mut tree, &mut names, description)?;
        let container = LayoutContainer::from_tree(tree, root)?;
        Ok(DescribedTree { container, names })
    }
}

fn build(
    tree: &mut BoxTree,
    names: &mut BTreeMap<BoxId, String>,
    description: &BoxDescription,
) -> LayoutResult<BoxId> {
    let spec = description.to_spec();
    let id = if let Some([width, height]) = description.content {
        let id = tree.add_leaf(spec, Size::new(width, height));
        if !description.children.is_empty() {
            return Err(LayoutError::NotAContainer(id));
        }
        id
    } else {
        let arrangement = Arrangement::from_property(description.layout.as_deref());
        if let Some(layout) = description.layout.as_deref()
            && layout.parse::<Arrangement>().is_err()
        {
            let _ = warn_once(
                "Description",
                &format!("unknown layout {layout:?}; using the default arrangement"),
            );
        }
        let id = tree.add_container(spec, arrangement);
        tree.set_wrap_enabled(id, description.horizontal_wrap)?;
        if let Some(padding) = description.padding {
            tree.set_padding(id, padding)?;
        }
        if let Some([width, height]) = description.min_size {
            tree.set_min_size(id, Size::new(width, height))?;
        }
        id
    };
    if let Some(opacity) = description.opacity {
        tree.set_opacity(id, opacity)?;
    }
    if let Some(name) = &description.name {
        let _ = names.insert(id, name.clone());
    }
    for child in &description.children {
        let child_id = build(tree, names, child)?;
        tree.attach_child(id, child_id)?;
    }
    Ok(id)
}
