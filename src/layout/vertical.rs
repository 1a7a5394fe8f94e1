//! Layout of nodes stacking their children vertically: lines of text, fractions and matrices.

use super::builders::HBox;
use super::decorations::hbrace_path;
use super::engine::{self, layout_node};
use super::{Ancestors, LayoutBox, LayoutContext, NodeSize};

use crate::dimensions::{units::Px, Unit};
use crate::environment::{Capitalization, Environment, FontFamily};
use crate::parser::environments::{HorizontalAlignment, LineType, SpacingMode, VerticalOrientation};
use crate::parser::nodes::{FracMode, Matrix, Node, NodeKind, VerticalList};
use crate::render::{LineStyle, Pen};

fn aligned(alignment : HorizontalAlignment, available : Unit<Px>, width : Unit<Px>) -> Unit<Px> {
    match alignment {
        HorizontalAlignment::Left => Unit::ZERO,
        HorizontalAlignment::Centered => (available - width).scale(0.5),
        HorizontalAlignment::Right => available - width,
    }
}

/// How laid out lines are stacked
struct Stacking {
    alignment : HorizontalAlignment,
    spacing : SpacingMode,
    spacing_factor : f64,
    orientation : VerticalOrientation,
}

fn stack(kind : NodeKind, lines : Vec<LayoutBox>, how : &Stacking, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let font = ctx.font(env);
    let (first, last) = match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => (first.size, last.size),
        _ => return LayoutBox::new(Some(kind), NodeSize {
            strikeout_pos : ctx.metrics.strikeout_pos(&font),
            ..NodeSize::default()
        }),
    };

    let line_spacing = ctx.metrics.line_spacing(&font).scale(how.spacing_factor);
    let mut leading = ctx.metrics.leading(&font);
    if leading <= Unit::ZERO {
        leading = ctx.metrics.line_width(&font);
    }
    let leading = leading.scale(how.spacing_factor);

    // distance from the baseline of the first line to the baseline of each line
    let mut baselines = Vec::with_capacity(lines.len());
    let mut y = Unit::ZERO;
    let mut previous : Option<NodeSize> = None;
    for line in &lines {
        if let Some(previous) = previous {
            let minimal = previous.descent() + leading + line.size.baseline_height;
            y += match how.spacing {
                SpacingMode::Minimal => minimal,
                SpacingMode::Default => minimal.max(line_spacing),
            };
        }
        baselines.push(y);
        previous = Some(line.size);
    }

    let first_ascent = first.baseline_height;
    let last_descent = last.descent();
    let height = first_ascent + y + last_descent;
    let (baseline_height, strikeout_pos, y0) = match how.orientation {
        VerticalOrientation::Top => (Unit::ZERO, Unit::ZERO, first_ascent),
        VerticalOrientation::FirstLine => (first_ascent, first.strikeout_pos, Unit::ZERO),
        VerticalOrientation::Centered => (height.scale(0.5), height.scale(0.25), first_ascent - height.scale(0.5)),
        VerticalOrientation::LastLine => (height - last_descent, last.strikeout_pos, -(height - first_ascent - last_descent)),
        VerticalOrientation::Bottom => (height, Unit::ZERO, -(height - first_ascent)),
    };

    let width = lines.iter().map(|line| line.size.width).fold(Unit::ZERO, Unit::max);
    let mut layout = LayoutBox::new(Some(kind), NodeSize {
        width,
        baseline_height,
        overall_height : height,
        strikeout_pos,
        ..NodeSize::default()
    });
    for (line, dy) in lines.into_iter().zip(baselines) {
        let x = aligned(how.alignment, width, line.size.width);
        layout.place(x, y0 + dy, line);
    }
    layout
}

pub(super) fn vertical_list(list : &VerticalList, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let lines = list.lines.iter()
        .map(|line| layout_node(line, env, ctx, ancestors, None))
        .collect();
    let how = Stacking {
        alignment : list.alignment,
        spacing : list.spacing,
        spacing_factor : list.spacing_factor,
        orientation : list.orientation,
    };
    stack(NodeKind::VerticalList, lines, &how, env, ctx)
}

/// Raw text in the typewriter font, one line per `\n`
pub(super) fn verbatim(text : &str, visible_space : bool, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let mut tt = env.exchanged_font_for(FontFamily::Typewriter);
    tt.inside_math = false;
    tt.capitalization = Capitalization::Mixed;
    let font = ctx.font(&tt);

    let lines = text.split('\n')
        .map(|line| {
            let line = if visible_space { line.replace(' ', "\u{2423}") } else { line.to_string() };
            let mut layout = engine::text(&line, &tt, ctx);
            if line.is_empty() {
                let ascent = ctx.metrics.ascent(&font);
                layout.size.baseline_height = ascent;
                layout.size.overall_height = ascent + ctx.metrics.descent(&font);
            }
            layout
        })
        .collect();
    let how = Stacking {
        alignment : HorizontalAlignment::Left,
        spacing : SpacingMode::Minimal,
        spacing_factor : 1.,
        orientation : VerticalOrientation::FirstLine,
    };
    stack(NodeKind::Verbatim, lines, &how, &tt, ctx)
}

/// Font size factors of the (top, bottom) children of a fraction
fn fraction_scales(mode : FracMode, nested : bool, ctx : LayoutContext<'_>) -> (f64, f64) {
    let settings = ctx.settings;
    let frac = if nested { settings.frac_nested_factor } else { settings.frac_factor };
    match mode {
        FracMode::Frac | FracMode::SFrac => (frac, frac),
        FracMode::DFrac => (1., 1.),
        FracMode::TFrac | FracMode::STFrac => (settings.frac_factor * 0.7, settings.frac_factor * 0.7),
        FracMode::StackRel => (settings.frac_factor, settings.frac_factor),
        FracMode::UnderBrace | FracMode::OverBrace => (1., settings.underbrace_factor),
        FracMode::UnderSet | FracMode::OverSet => (settings.underset_factor, 1.),
    }
}

pub(super) fn fraction(mode : FracMode, top : &Node, bottom : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let font = ctx.font(env);
    let metrics = ctx.metrics;
    let x_height = metrics.tight_bounding_box(&font, "x").total_height();
    let x_width = metrics.bounding_box(&font, "x").width();
    let lw = metrics.line_width(&font);
    let pen = Pen::new(env.color, lw.to_unitless());

    // `ancestors` starts with this fraction
    let nested = ancestors.iter().skip(1).any(|kind| kind == NodeKind::Fraction);
    let (top_scale, bottom_scale) = fraction_scales(mode, nested, ctx);
    let top = layout_node(top, &env.scaled(top_scale), ctx, ancestors, None);
    let bottom = layout_node(bottom, &env.scaled(bottom_scale), ctx, ancestors, None);
    let (ts, bs) = (top.size, bottom.size);
    let widest = ts.width.max(bs.width);
    let y_line = -x_height.scale(0.5);
    let shift = x_height.scale(ctx.settings.frac_shift_factor);

    let mut hbox = HBox::new();
    let mut strikeout_pos = x_height.scale(0.5);
    let mut lines = Vec::new();
    let mut brace = None;

    match mode {
        FracMode::Frac | FracMode::DFrac | FracMode::TFrac | FracMode::StackRel => {
            hbox.put(x_width.scale(0.5) + (widest - ts.width).scale(0.5), y_line - shift - ts.descent(), top);
            hbox.put(x_width.scale(0.5) + (widest - bs.width).scale(0.5), y_line + shift + bs.baseline_height, bottom);
            hbox.advance(widest + x_width);
            if mode != FracMode::StackRel {
                lines.push((x_width.scale(0.25), y_line, widest + x_width.scale(0.5), Unit::ZERO));
            }
        },
        FracMode::SFrac | FracMode::STFrac => {
            hbox.put(Unit::ZERO, y_line - ts.descent(), top);
            hbox.put(ts.width + x_width, y_line + bs.baseline_height, bottom);
            hbox.advance(ts.width + bs.width + x_width);
            lines.push((ts.width + x_width, y_line - ts.overall_height, -x_width, ts.overall_height + bs.overall_height));
        },
        FracMode::UnderSet | FracMode::OverSet => {
            // \underset{annotation}{base}
            let (annotation, base) = (top, bottom);
            let (annotation_size, base_size) = (ts, bs);
            let dy = if mode == FracMode::UnderSet {
                base_size.descent() + x_height.scale(1. / 6.) + annotation_size.baseline_height
            } else {
                -(base_size.baseline_height + x_height.scale(1. / 6.) + annotation_size.descent())
            };
            strikeout_pos = base_size.strikeout_pos;
            hbox.put(x_width.scale(0.5) + (widest - base_size.width).scale(0.5), Unit::ZERO, base);
            hbox.put(x_width.scale(0.5) + (widest - annotation_size.width).scale(0.5), dy, annotation);
            hbox.advance(widest + x_width);
        },
        FracMode::UnderBrace | FracMode::OverBrace => {
            let brace_width = metrics.tight_bounding_box(&font, "M").total_height().scale(0.5);
            let center = x_width.scale(0.5) + widest.scale(0.5);
            let (main, annotation) = (top, bottom);
            let (main_size, annotation_size) = (ts, bs);
            strikeout_pos = main_size.strikeout_pos;

            if mode == FracMode::UnderBrace {
                let y_brace = main_size.descent() + brace_width.scale(0.5);
                brace = Some(hbrace_path(center.to_unitless(), y_brace.to_unitless(), widest.to_unitless(), brace_width.to_unitless()));
                hbox.extend(Unit::ZERO, main_size.descent() + brace_width);
                hbox.put(x_width.scale(0.5) + (widest - annotation_size.width).scale(0.5), main_size.descent() + brace_width + annotation_size.baseline_height, annotation);
            } else {
                let y_brace = -(main_size.baseline_height + brace_width.scale(0.5));
                let (cx, cy) = (center.to_unitless(), y_brace.to_unitless());
                brace = Some(hbrace_path(cx, cy, widest.to_unitless(), brace_width.to_unitless())
                    .map(|x, y| (2. * cx - x, 2. * cy - y)));
                hbox.extend(main_size.baseline_height + brace_width, Unit::ZERO);
                hbox.put(x_width.scale(0.5) + (widest - annotation_size.width).scale(0.5), -(main_size.baseline_height + brace_width + annotation_size.descent()), annotation);
            }
            hbox.put(x_width.scale(0.5) + (widest - main_size.width).scale(0.5), Unit::ZERO, main);
            hbox.advance(widest + x_width);
        },
    }

    let mut layout = hbox.build(Some(NodeKind::Fraction), strikeout_pos);
    layout.size.strikeout_pos = strikeout_pos;
    for (x, y, dx, dy) in lines {
        layout.line(x, y, dx, dy, pen);
    }
    if let Some(brace) = brace {
        layout.path(Unit::ZERO, Unit::ZERO, brace, Some(pen), None);
    }
    layout
}

/// Draws a horizontal or vertical table rule of type `line` centered on `pos`
fn rule(layout : &mut LayoutBox, vertical : bool, pos : Unit<Px>, start : Unit<Px>, length : Unit<Px>, line : LineType, pens : &RulePens) {
    let (pen, offsets) : (Pen, &[f64]) = match line {
        LineType::None => return,
        LineType::Single => (pens.thin, &[0.]),
        LineType::Heavy => (pens.heavy, &[0.]),
        LineType::Dashed => (pens.thin.with_style(LineStyle::Dashed), &[0.]),
        LineType::Double => (pens.thin, &[-0.5, 0.5]),
        LineType::DoubleDashed => (pens.thin.with_style(LineStyle::Dashed), &[-0.5, 0.5]),
    };
    for offset in offsets {
        let pos = pos + pens.separation.scale(*offset);
        if vertical {
            layout.line(pos, start, Unit::ZERO, length, pen);
        } else {
            layout.line(start, pos, length, Unit::ZERO, pen);
        }
    }
}

struct RulePens {
    thin : Pen,
    heavy : Pen,
    separation : Unit<Px>,
}

pub(super) fn matrix(matrix : &Matrix, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let settings = ctx.settings;
    let font = ctx.font(env);
    let x_width = ctx.metrics.bounding_box(&font, "x").width();
    let lw = ctx.metrics.line_width(&font).to_unitless();
    let thin = lw * settings.matrix_line_width_thin_factor;
    let pens = RulePens {
        thin : Pen::new(env.color, thin),
        heavy : Pen::new(env.color, lw * settings.matrix_line_width_heavy_factor),
        separation : Unit::new(thin * settings.matrix_line_separation_factor),
    };
    let x_padding = x_width.scale(settings.matrix_x_padding_factor);
    let y_padding = x_width.scale(settings.matrix_y_padding_factor);
    let x_separation = x_width.scale(settings.matrix_x_separation_factor);
    let y_separation = x_width.scale(settings.matrix_y_separation_factor);

    let columns = matrix.column_count();
    let cells : Vec<Vec<LayoutBox>> = matrix.rows.iter()
        .map(|row| row.iter().map(|cell| layout_node(cell, env, ctx, ancestors, None)).collect())
        .collect();

    let mut column_widths = vec![Unit::<Px>::ZERO; columns];
    let mut row_heights = Vec::with_capacity(cells.len());
    for row in &cells {
        let mut ascent = Unit::ZERO;
        let mut descent = Unit::ZERO;
        for (col, cell) in row.iter().enumerate() {
            column_widths[col] = column_widths[col].max(cell.size.width);
            ascent = ascent.max(cell.size.baseline_height);
            descent = descent.max(cell.size.descent());
        }
        row_heights.push((ascent, descent));
    }

    let gaps = |count : usize, separation : Unit<Px>| separation.scale(count.saturating_sub(1) as f64);
    let width = x_padding.scale(2.) + column_widths.iter().copied().sum::<Unit<Px>>() + gaps(columns, x_separation);
    let height = y_padding.scale(2.)
        + row_heights.iter().map(|&(a, d)| a + d).sum::<Unit<Px>>()
        + gaps(row_heights.len(), y_separation);
    let strikeout_pos = ctx.metrics.strikeout_pos(&font);
    let baseline_height = height.scale(0.5) + strikeout_pos;
    let top = -baseline_height;

    let mut layout = LayoutBox::new(Some(NodeKind::Matrix), NodeSize {
        width,
        baseline_height,
        overall_height : height,
        strikeout_pos,
        ..NodeSize::default()
    });

    // column and row boundaries, in the middle of the separations
    let mut column_lines = vec![Unit::ZERO];
    let mut row_lines = vec![top];

    let mut y = top + y_padding;
    for (row, &(ascent, descent)) in cells.into_iter().zip(&row_heights) {
        let mut x = x_padding;
        for (col, cell) in row.into_iter().enumerate() {
            let dx = aligned(matrix.columns.alignment(col), column_widths[col], cell.size.width);
            layout.place(x + dx, y + ascent, cell);
            x += column_widths[col] + x_separation;
        }
        y += ascent + descent + y_separation;
        row_lines.push(y - y_separation.scale(0.5));
    }
    let mut x = x_padding;
    for column_width in &column_widths {
        x += *column_width + x_separation;
        column_lines.push(x - x_separation.scale(0.5));
    }
    if columns > 0 {
        if let Some(last) = column_lines.last_mut() {
            *last = width;
        }
    }
    if !row_heights.is_empty() {
        if let Some(last) = row_lines.last_mut() {
            *last = top + height;
        }
    }

    for (col, &x) in column_lines.iter().enumerate() {
        rule(&mut layout, true, x, top, height, matrix.columns.line_before(col), &pens);
    }
    rule(&mut layout, false, top, Unit::ZERO, width, matrix.top_line, &pens);
    for (row, &y) in row_lines.iter().skip(1).enumerate() {
        let line = matrix.row_lines.get(row).copied().unwrap_or_default();
        rule(&mut layout, false, y, Unit::ZERO, width, line, &pens);
    }
    layout
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::fixed::FixedMetrics;
    use crate::font::FontMetrics;
    use crate::layout::tests::{layout_math, parse_math, ERROR_TOLERANCE};
    use crate::layout::{LayoutSettings, Primitive};

    fn close(a : Unit<Px>, b : Unit<Px>) -> bool {
        (a.to_unitless() - b.to_unitless()).abs() < ERROR_TOLERANCE
    }

    fn lines(layout : &LayoutBox) -> Vec<(Unit<Px>, Unit<Px>, Unit<Px>, Unit<Px>, Pen)> {
        layout.flatten().into_iter()
            .filter_map(|p| match *p.primitive {
                Primitive::Line { dx, dy, pen } => Some((p.x, p.y, dx, dy, pen)),
                _ => None,
            })
            .collect()
    }

    fn text_y(layout : &LayoutBox, text : &str) -> Unit<Px> {
        layout.flatten().into_iter()
            .find_map(|p| match *p.primitive {
                Primitive::Text { text : ref t, .. } if t == text => Some(p.y),
                _ => None,
            })
            .unwrap()
    }

    fn block(orientation : VerticalOrientation, spacing : SpacingMode) -> LayoutBox {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let mut list = VerticalList::new(vec![Node::text("A"), Node::text("B"), Node::text("C")], HorizontalAlignment::Left);
        list.orientation = orientation;
        list.spacing = spacing;
        vertical_list(&list, &settings.root_environment(), ctx, &Ancestors::ROOT)
    }

    #[test]
    fn lines_are_stacked() {
        let layout = block(VerticalOrientation::FirstLine, SpacingMode::Default);
        assert_eq!(text_y(&layout, "A"), Unit::ZERO);
        assert!(text_y(&layout, "B") > Unit::ZERO);
        assert!(text_y(&layout, "C") > text_y(&layout, "B"));

        let minimal = block(VerticalOrientation::FirstLine, SpacingMode::Minimal);
        assert!(minimal.size.overall_height < layout.size.overall_height);
    }

    #[test]
    fn orientation_selects_the_baseline() {
        let first = block(VerticalOrientation::FirstLine, SpacingMode::Default);
        let last = block(VerticalOrientation::LastLine, SpacingMode::Default);
        let top = block(VerticalOrientation::Top, SpacingMode::Default);
        let bottom = block(VerticalOrientation::Bottom, SpacingMode::Default);
        let centered = block(VerticalOrientation::Centered, SpacingMode::Default);

        assert!(close(text_y(&last, "C"), Unit::ZERO));
        assert_eq!(top.size.baseline_height, Unit::ZERO);
        assert!(close(bottom.size.baseline_height, bottom.size.overall_height));
        assert!(close(centered.size.baseline_height, centered.size.overall_height.scale(0.5)));
        for layout in [&first, &last, &top, &bottom, &centered] {
            assert!(close(layout.size.overall_height, first.size.overall_height));
            // the relative placement of the lines does not change
            assert!(close(text_y(layout, "B") - text_y(layout, "A"), text_y(&first, "B")));
        }
    }

    #[test]
    fn verbatim_keeps_spaces_visible() {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let layout = verbatim("a b\n\nc", true, &settings.root_environment(), ctx);
        assert_eq!(layout.text_content(), "a\u{2423}bc");
        let fonts : Vec<_> = layout.flatten().into_iter().filter_map(|p| match *p.primitive {
            Primitive::Text { ref font, .. } => Some(font.family.clone()),
            _ => None,
        }).collect();
        assert!(fonts.iter().all(|family| family == &settings.fonts.typewriter));
        assert!(text_y(&layout, "c") > text_y(&layout, "a\u{2423}b"));
    }

    #[test]
    fn fraction_puts_numerator_above_the_line() {
        let layout = layout_math("\\frac{a}{b}");
        let rules = lines(&layout);
        assert_eq!(rules.len(), 1);
        let line_y = rules[0].1;
        assert!(text_y(&layout, "a") < line_y);
        assert!(text_y(&layout, "b") > line_y);
        assert!(layout.size.width > layout_math("a").size.width);
        assert!(close(layout.size.strikeout_pos, -line_y));
    }

    #[test]
    fn stackrel_has_no_line() {
        let layout = layout_math("\\stackrel{a}{b}");
        assert!(lines(&layout).is_empty());
        assert!(text_y(&layout, "a") < text_y(&layout, "b"));
    }

    #[test]
    fn nested_fractions_are_smaller() {
        let settings = LayoutSettings::default();
        let font_size = |layout : &LayoutBox, text : &str| layout.flatten().into_iter()
            .find_map(|p| match *p.primitive {
                Primitive::Text { text : ref t, ref font, .. } if t == text => Some(font.size),
                _ => None,
            })
            .unwrap();
        let layout = layout_math("\\frac{\\frac{a}{b}}{c}");
        let root = settings.root_environment().font_size_px();
        assert!(close(font_size(&layout, "c"), root.scale(settings.frac_factor)));
        assert!(close(font_size(&layout, "a"), root.scale(settings.frac_factor * settings.frac_nested_factor)));
    }

    #[test]
    fn slanted_fraction_is_side_by_side() {
        let layout = layout_math("\\sfrac{a}{b}");
        let placed = layout.flatten();
        let x = |text : &str| placed.iter().find_map(|p| match *p.primitive {
            Primitive::Text { text : ref t, .. } if t == text => Some(p.x),
            _ => None,
        }).unwrap();
        assert!(x("b") > x("a"));
        let rules = lines(&layout);
        assert_eq!(rules.len(), 1);
        assert!(rules[0].2 < Unit::ZERO && rules[0].3 > Unit::ZERO);
    }

    #[test]
    fn underset_and_overset() {
        let under = layout_math("\\underset{a}{X}");
        assert_eq!(text_y(&under, "X"), Unit::ZERO);
        assert!(text_y(&under, "a") > Unit::ZERO);
        let over = layout_math("\\overset{a}{X}");
        assert!(text_y(&over, "a") < Unit::ZERO);
    }

    #[test]
    fn braces_extend_the_box() {
        let plain = layout_math("X");
        let under = layout_math("\\underbrace{X}{a}");
        assert!(under.size.descent() > plain.size.descent());
        assert!(text_y(&under, "a") > Unit::ZERO);
        let paths = under.flatten().into_iter().filter(|p| matches!(p.primitive, Primitive::Path { .. })).count();
        assert_eq!(paths, 1);

        let over = layout_math("\\overbrace{X}{a}");
        assert!(over.size.baseline_height > plain.size.baseline_height);
        assert!(text_y(&over, "a") < Unit::ZERO);
    }

    #[test]
    fn matrix_grid() {
        let layout = layout_math("\\begin{matrix}a & b\\\\ c & d\\end{matrix}");
        let placed = layout.flatten();
        let pos = |text : &str| placed.iter().find_map(|p| match *p.primitive {
            Primitive::Text { text : ref t, .. } if t == text => Some((p.x, p.y)),
            _ => None,
        }).unwrap();
        assert!(pos("b").0 > pos("a").0);
        assert!(close(pos("a").1, pos("b").1));
        assert!(pos("c").1 > pos("a").1);
        assert!(close(pos("a").0, pos("c").0));
        assert!(lines(&layout).is_empty());
    }

    #[test]
    fn matrix_rules() {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let node = parse_math("\\begin{array}{|c||c:}\\hline a & b\\\\ \\hline\\hline c & d\\end{array}");
        let matrix = match node {
            Node::Matrix(ref matrix) => matrix.clone(),
            ref other => other.children().into_iter()
                .find_map(|child| match *child {
                    Node::Matrix(ref matrix) => Some(matrix.clone()),
                    _ => None,
                })
                .unwrap(),
        };
        let mut env = settings.root_environment();
        env.begin_math_mode();
        let layout = self::matrix(&matrix, &env, ctx, &Ancestors::ROOT);
        let rules = lines(&layout);
        let vertical = rules.iter().filter(|r| r.2 == Unit::ZERO).count();
        let horizontal = rules.iter().filter(|r| r.3 == Unit::ZERO).count();
        // |, ||, : on the columns
        assert_eq!(vertical, 4);
        // \hline on top, \hline\hline after the first row
        assert_eq!(horizontal, 3);
        assert!(rules.iter().any(|r| r.4.style == LineStyle::Dashed));
        let font = env.font(&settings.fonts);
        assert!(close(layout.size.baseline_height - layout.size.overall_height.scale(0.5), metrics.strikeout_pos(&font)));
    }
}
