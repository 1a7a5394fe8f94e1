use super::{LayoutBox, LayoutItem, NodeSize, Primitive};

use crate::dimensions::{units::Px, Unit};
use crate::font::FontDescriptor;
use crate::parser::color::RGBA;
use crate::parser::nodes::NodeKind;
use crate::render::{Brush, Path, Pen};

impl LayoutBox {
    /// An empty box of size `size`
    pub fn new(kind : Option<NodeKind>, size : NodeSize) -> Self {
        Self { kind, size, contents : Vec::new() }
    }

    /// A box of size `size` containing `inner` at its origin
    pub fn wrap(kind : NodeKind, size : NodeSize, inner : LayoutBox) -> Self {
        let mut layout = Self::new(Some(kind), size);
        layout.place(Unit::ZERO, Unit::ZERO, inner);
        layout
    }

    /// Appends `primitive` at (`x`, `y`)
    pub fn push(&mut self, x : Unit<Px>, y : Unit<Px>, primitive : Primitive) {
        self.contents.push(LayoutItem { x, y, primitive });
    }

    /// Appends a run of text whose baseline starts at (`x`, `y`)
    pub fn text(&mut self, x : Unit<Px>, y : Unit<Px>, text : impl Into<String>, font : FontDescriptor, color : RGBA) {
        self.push(x, y, Primitive::Text { text : text.into(), font, color });
    }

    /// Appends a line from (`x`, `y`) to (`x + dx`, `y + dy`)
    pub fn line(&mut self, x : Unit<Px>, y : Unit<Px>, dx : Unit<Px>, dy : Unit<Px>, pen : Pen) {
        self.push(x, y, Primitive::Line { dx, dy, pen });
    }

    /// Appends a horizontal line of length `width`
    pub fn hline(&mut self, x : Unit<Px>, y : Unit<Px>, width : Unit<Px>, pen : Pen) {
        self.line(x, y, width, Unit::ZERO, pen);
    }

    /// Appends a rectangle whose top-left corner is at (`x`, `y`)
    pub fn rect(&mut self, x : Unit<Px>, y : Unit<Px>, width : Unit<Px>, height : Unit<Px>, pen : Option<Pen>, brush : Option<Brush>, rounding : Unit<Px>) {
        self.push(x, y, Primitive::Rect { width, height, pen, brush, rounding });
    }

    /// Appends a path, whose coordinates are relative to (`x`, `y`)
    pub fn path(&mut self, x : Unit<Px>, y : Unit<Px>, path : Path, pen : Option<Pen>, brush : Option<Brush>) {
        if !path.is_empty() {
            self.push(x, y, Primitive::Path { path, pen, brush });
        }
    }

    /// Places `inner` with the start of its baseline at (`x`, `y`)
    pub fn place(&mut self, x : Unit<Px>, y : Unit<Px>, inner : LayoutBox) {
        if inner.kind.is_some() || !inner.contents.is_empty() {
            self.push(x, y, Primitive::Box(inner));
        }
    }

    /// Whether the box draws nothing, nested boxes included
    pub fn is_blank(&self) -> bool {
        self.contents.iter().all(|item| match item.primitive {
            Primitive::Box(ref inner) => inner.is_blank(),
            _ => false,
        })
    }

    /// Every primitive drawn by the box and the boxes it contains, with its position relative to the origin of `self`
    pub fn flatten(&self) -> Vec<Placed<'_>> {
        let mut placed = Vec::new();
        self.flatten_into(Unit::ZERO, Unit::ZERO, &mut placed);
        placed
    }

    fn flatten_into<'a>(&'a self, x : Unit<Px>, y : Unit<Px>, out : &mut Vec<Placed<'a>>) {
        for item in &self.contents {
            let (x, y) = (x + item.x, y + item.y);
            match item.primitive {
                Primitive::Box(ref inner) => inner.flatten_into(x, y, out),
                ref primitive => out.push(Placed { x, y, primitive }),
            }
        }
    }

    /// The text drawn by the box, in drawing order
    pub fn text_content(&self) -> String {
        self.flatten().into_iter()
            .filter_map(|placed| match placed.primitive {
                Primitive::Text { ref text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A primitive with its absolute position, see [`LayoutBox::flatten`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed<'a> {
    /// x-coordinate of the primitive origin
    pub x : Unit<Px>,
    /// y-coordinate of the primitive origin
    pub y : Unit<Px>,
    /// the primitive, never a [`Primitive::Box`]
    pub primitive : &'a Primitive,
}

/// Accumulates boxes side by side on a common baseline
#[derive(Debug, Default)]
pub(super) struct HBox {
    layout : LayoutBox,
    ascent : Unit<Px>,
    descent : Unit<Px>,
    strikeout_pos : Option<Unit<Px>>,
    x : Unit<Px>,
}

impl HBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dx : Unit<Px>) {
        self.x += dx;
    }

    /// Grows the box to hold something of ascent `ascent` and descent `descent`
    pub fn extend(&mut self, ascent : Unit<Px>, descent : Unit<Px>) {
        self.ascent = self.ascent.max(ascent);
        self.descent = self.descent.max(descent);
    }

    /// Places `inner` at the cursor, raised by `-dy`, without moving the cursor
    pub fn put(&mut self, dx : Unit<Px>, dy : Unit<Px>, inner : LayoutBox) {
        let size = inner.size;
        self.extend(size.baseline_height - dy, size.descent() + dy);
        self.layout.place(self.x + dx, dy, inner);
    }

    /// The strikeout line of the list is the one of its first item
    pub fn mark_strikeout(&mut self, strikeout_pos : Unit<Px>) {
        if self.strikeout_pos.is_none() {
            self.strikeout_pos = Some(strikeout_pos);
        }
    }

    /// Places `inner` at the cursor on the baseline and moves the cursor past it
    pub fn add(&mut self, inner : LayoutBox) {
        let size = inner.size;
        self.mark_strikeout(size.strikeout_pos);
        self.put(Unit::ZERO, Unit::ZERO, inner);
        self.advance(size.width);
    }

    /// The list, sized from what was placed in it
    pub fn build(self, kind : Option<NodeKind>, default_strikeout : Unit<Px>) -> LayoutBox {
        let mut layout = self.layout;
        layout.kind = kind;
        layout.size = NodeSize {
            width : self.x,
            baseline_height : self.ascent,
            overall_height : self.ascent + self.descent,
            strikeout_pos : self.strikeout_pos.unwrap_or(default_strikeout),
            ..NodeSize::default()
        };
        layout
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::font::FontSet;

    fn sized(width : f64, ascent : f64, descent : f64) -> LayoutBox {
        let size = NodeSize {
            width : Unit::new(width),
            baseline_height : Unit::new(ascent),
            overall_height : Unit::new(ascent + descent),
            ..NodeSize::default()
        };
        let mut layout = LayoutBox::new(Some(NodeKind::EmptyBox), size);
        layout.rect(Unit::ZERO, Unit::new(-ascent), Unit::new(width), Unit::new(ascent + descent), None, Some(Brush::solid(RGBA::BLACK)), Unit::ZERO);
        layout
    }

    #[test]
    fn hbox_aligns_baselines() {
        let mut hbox = HBox::new();
        hbox.add(sized(2., 5., 1.));
        hbox.add(sized(3., 2., 4.));
        let layout = hbox.build(Some(NodeKind::List), Unit::ZERO);
        assert_eq!(layout.size.width, Unit::new(5.));
        assert_eq!(layout.size.baseline_height, Unit::new(5.));
        assert_eq!(layout.size.overall_height, Unit::new(9.));

        let placed = layout.flatten();
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[1].x, placed[1].y), (Unit::new(2.), Unit::new(-2.)));
    }

    #[test]
    fn raised_content() {
        let mut hbox = HBox::new();
        hbox.add(sized(2., 5., 1.));
        hbox.put(Unit::ZERO, Unit::new(-10.), sized(1., 1., 1.));
        let layout = hbox.build(None, Unit::ZERO);
        assert_eq!(layout.size.baseline_height, Unit::new(11.));
        assert_eq!(layout.size.descent(), Unit::new(1.));
        assert_eq!(layout.size.width, Unit::new(2.));
    }

    #[test]
    fn blank_boxes() {
        let mut outer = LayoutBox::new(Some(NodeKind::List), NodeSize::default());
        outer.place(Unit::ZERO, Unit::ZERO, LayoutBox::new(Some(NodeKind::Whitespace), NodeSize::default()));
        assert!(outer.is_blank());
        outer.text(Unit::ZERO, Unit::ZERO, "x", Environment::default().font(&FontSet::default()), RGBA::BLACK);
        assert!(!outer.is_blank());
        assert_eq!(outer.text_content(), "x");
    }
}
