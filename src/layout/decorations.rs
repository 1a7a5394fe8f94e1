//! Layout of nodes drawing shapes around their child: delimiters, roots and accents.

use super::engine::layout_node;
use super::{Ancestors, LayoutBox, LayoutContext, NodeSize, Primitive};

use crate::dimensions::{units::Px, Unit};
use crate::environment::Environment;
use crate::parser::color::RGBA;
use crate::parser::environments::BraceType;
use crate::parser::nodes::{Decoration, Node, NodeKind};
use crate::render::{Brush, Path, Pen};

/// A horizontal curly brace of width `width` centered on `x`, its tip pointing down.
///
/// `bw` is the height of the brace, `ybrace` the height of its arms.
pub(super) fn hbrace_path(x : f64, ybrace : f64, width : f64, bw : f64) -> Path {
    const SHRINK : f64 = 0.5;
    const CONTROL : f64 = 0.3;
    let left_arm = x - width * SHRINK + bw * SHRINK;
    let right_arm = x + width * SHRINK - bw * SHRINK;
    let left_tip = x - bw * SHRINK;
    let right_tip = x + bw * SHRINK;
    let middle = (left_tip + right_tip) / 2.;

    let mut path = Path::new();
    path.move_to(left_arm - bw * SHRINK, ybrace - bw * SHRINK)
        .cubic_to(left_arm - bw * SHRINK, ybrace - bw * SHRINK + bw * CONTROL, left_arm - bw * CONTROL, ybrace, left_arm, ybrace)
        .line_to(left_tip, ybrace)
        .cubic_to(left_tip + bw * CONTROL, ybrace, middle, ybrace + bw * SHRINK - bw * CONTROL, middle, ybrace + bw * SHRINK)
        .cubic_to(middle, ybrace + bw * SHRINK - bw * CONTROL, right_tip - bw * CONTROL, ybrace, right_tip, ybrace)
        .line_to(right_arm, ybrace)
        .cubic_to(right_arm + bw * CONTROL, ybrace, right_arm + bw * SHRINK, ybrace - bw * SHRINK + bw * CONTROL, right_arm + bw * SHRINK, ybrace - bw * SHRINK);
    path
}

/// Horizontal arrow from `x0` to `x1` on `y`, with heads of size `head`
fn arrow_path(x0 : f64, x1 : f64, y : f64, head : f64, left : bool, right : bool) -> Path {
    let mut path = Path::new();
    path.move_to(x0, y).line_to(x1, y);
    if right {
        path.polyline(&[(x1 - head, y - head / 2.), (x1, y), (x1 - head, y + head / 2.)]);
    }
    if left {
        path.polyline(&[(x0 + head, y - head / 2.), (x0, y), (x0 + head, y + head / 2.)]);
    }
    path
}

/// Width of a delimiter drawn next to content of height `height`
fn delimiter_width(kind : BraceType, height : Unit<Px>, env : &Environment, ctx : LayoutContext<'_>) -> Unit<Px> {
    let font = ctx.font(env);
    let lw = ctx.metrics.line_width(&font);
    let width = match kind {
        BraceType::None | BraceType::Any | BraceType::Unknown => return Unit::ZERO,
        BraceType::Curly => lw.scale(6.5),
        BraceType::Paren => lw.scale(6.),
        BraceType::DoubleLine => lw.scale(5.),
        BraceType::SingleLine => lw.scale(3.),
        BraceType::Square | BraceType::Ceil | BraceType::Floor => lw.scale(7.),
        BraceType::Angle | BraceType::TopCorner | BraceType::BottomCorner => lw.scale(5.),
    };
    let font_height = ctx.metrics.height(&font);
    let oversize = if font_height > Unit::ZERO { (height / font_height).to_unitless() } else { 1. };
    if oversize > 1.2 { width.scale(oversize.sqrt()) } else { width }
}

/// Draws the opening version of delimiter `kind` in `0..width`, between `top` and `bottom`,
/// mirrored for the closing one.
#[allow(clippy::too_many_arguments)]
fn draw_delimiter(layout : &mut LayoutBox, kind : BraceType, x0 : Unit<Px>, width : Unit<Px>, top : f64, bottom : f64, lw : f64, color : RGBA, closing : bool) {
    let w = width.to_unitless();
    let inner = lw * 2.;
    let outer = (0.75 * w).min(w - lw);
    let top_width = lw * 0.75;
    let middle = (top + bottom) / 2.;
    let bulge = (bottom - top).abs() / 6.;
    let pen = Pen::new(color, lw);

    let mut path = Path::new();
    let mut filled = false;
    let mut line_pen = pen;
    match kind {
        BraceType::Paren => {
            let center_width = lw * 1.75;
            path.move_to(outer - top_width / 2., bottom)
                .cubic_to(inner - center_width / 2., middle + bulge, inner - center_width / 2., middle - bulge, outer - top_width / 2., top)
                .line_to(outer + top_width / 2., top)
                .cubic_to(inner + center_width / 2., middle - bulge, inner + center_width / 2., middle + bulge, outer + top_width / 2., bottom)
                .close();
            filled = true;
        },
        BraceType::Angle => {
            let center_width = lw * 1.55;
            path.polyline(&[
                (outer - top_width / 2., bottom), (inner - center_width / 2., middle), (outer - top_width / 2., top),
                (outer + top_width / 2., top), (inner + center_width / 2., middle), (outer + top_width / 2., bottom),
            ]).close();
            filled = true;
        },
        BraceType::Square => {
            let (bottom, top) = (bottom - lw / 2., top + lw / 2.);
            path.polyline(&[(outer, bottom), (inner, bottom), (inner, top), (outer, top)]);
        },
        BraceType::TopCorner => {
            let top = top + lw / 2.;
            path.polyline(&[(outer, top), (inner, top), (inner, top + (outer - inner).abs())]);
        },
        BraceType::BottomCorner => {
            let bottom = bottom - lw / 2.;
            path.polyline(&[(outer, bottom), (inner, bottom), (inner, bottom - (outer - inner).abs())]);
        },
        BraceType::Floor => {
            path.polyline(&[(outer, bottom - lw / 2.), (inner, bottom - lw / 2.), (inner, top)]);
        },
        BraceType::Ceil => {
            path.polyline(&[(inner, bottom), (inner, top + lw / 2.), (outer, top + lw / 2.)]);
        },
        BraceType::Curly => {
            let center = w / 2.;
            path = hbrace_path(0., 0., bottom - top, w * 0.75).map(|x, y| (center - y, middle + x));
        },
        BraceType::SingleLine => {
            line_pen = pen.scaled(0.75);
            path.move_to(w / 2., bottom).line_to(w / 2., top);
        },
        BraceType::DoubleLine => {
            line_pen = pen.scaled(0.75);
            path.move_to(w / 2. - lw, bottom).line_to(w / 2. - lw, top)
                .move_to(w / 2. + lw, bottom).line_to(w / 2. + lw, top);
        },
        BraceType::None | BraceType::Any | BraceType::Unknown => return,
    }

    let x0 = x0.to_unitless();
    let path = path.map(|x, y| if closing { (x0 + w - x, y) } else { (x0 + x, y) });
    if filled {
        layout.path(Unit::ZERO, Unit::ZERO, path, None, Some(Brush::solid(color)));
    } else {
        layout.path(Unit::ZERO, Unit::ZERO, path, Some(line_pen), None);
    }
}

/// Delimiters around `child`, centered on its strikeout line and as high as its ascent or descent demands
pub(super) fn brace(open : BraceType, close : BraceType, child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let font = ctx.font(env);
    let lw = ctx.metrics.line_width(&font);
    let child = layout_node(child, env, ctx, ancestors, None);
    let cs = child.size;

    let min_height = ctx.metrics.tight_bounding_box(&font, "l").total_height();
    let above = (min_height - cs.strikeout_pos).max(cs.baseline_height - cs.strikeout_pos);
    let below = cs.strikeout_pos.max(cs.descent() + cs.strikeout_pos);
    let half = above.max(below).scale(ctx.settings.brace_factor);
    let baseline_height = cs.strikeout_pos + half;
    let overall_height = half.scale(2.);

    let open_width = delimiter_width(open, overall_height, env, ctx);
    let close_width = delimiter_width(close, overall_height, env, ctx);

    let mut layout = LayoutBox::new(Some(NodeKind::Brace), NodeSize {
        width : open_width + cs.width + close_width,
        baseline_height,
        overall_height,
        strikeout_pos : cs.strikeout_pos,
        baseline_x_correction : Unit::ZERO,
        top_x_correction : Unit::ZERO,
    });
    let top = -baseline_height.to_unitless();
    let bottom = (overall_height - baseline_height).to_unitless();
    draw_delimiter(&mut layout, open, Unit::ZERO, open_width, top, bottom, lw.to_unitless(), env.color, false);
    layout.place(open_width, Unit::ZERO, child);
    draw_delimiter(&mut layout, close, open_width + cs.width, close_width, top, bottom, lw.to_unitless(), env.color, true);
    layout
}

pub(super) fn sqrt(degree : Option<&Node>, child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let settings = ctx.settings;
    let font = ctx.font(env);
    let metrics = ctx.metrics;

    let child = layout_node(child, env, ctx, ancestors, None);
    let cs = child.size;
    let sqrt_width = metrics.bounding_box(&font, "X").width().scale(settings.sqrt_width_factor);
    let ascent = cs.baseline_height.scale(settings.sqrt_height_factor).max(metrics.ascent(&font));
    let descent = cs.descent().scale(settings.sqrt_height_factor).max(metrics.descent(&font));
    let lw = metrics.line_width(&font).to_unitless();

    let mut small_env = env.scaled(settings.sqrt_small_font_factor);
    small_env.italic = false;
    let degree = degree.map(|degree| layout_node(degree, &small_env, ctx, ancestors, None));
    let indent = sqrt_width.scale(0.6);
    let overwidth = degree.as_ref().map_or(Unit::ZERO, |degree| (degree.size.width - indent).max(Unit::ZERO));

    let mut layout = LayoutBox::new(Some(NodeKind::Sqrt), NodeSize {
        width : cs.width + sqrt_width + overwidth,
        baseline_height : ascent,
        overall_height : ascent + descent,
        strikeout_pos : cs.strikeout_pos,
        ..NodeSize::default()
    });

    let sw = sqrt_width.to_unitless();
    let hook = sw * 0.1;
    let alternative = cs.overall_height > sqrt_width.scale(4.);
    let y_hook_top = -cs.strikeout_pos.to_unitless();
    let y_bottom = descent.to_unitless() - lw / 2.;
    let y_top = -ascent.to_unitless() + lw / 2.;
    let x_start = overwidth.to_unitless() + lw / 2.;
    let x_hook_top = x_start + hook;
    let x_hook_bottom = if alternative { x_start + 0.66 * sw } else { x_start + 0.33 * sw };
    let x_top = if alternative { x_hook_bottom } else { x_start + sw };
    let x_end = layout.size.width.to_unitless() - lw / 2.;

    if sw > 0. {
        let mut path = Path::new();
        path.polyline(&[(x_start, y_hook_top + hook), (x_hook_top, y_hook_top), (x_hook_bottom, y_bottom), (x_top, y_top), (x_end, y_top)])
            .polyline(&[(x_hook_top, y_hook_top), (x_hook_top + lw * 0.8, y_hook_top - lw * 0.8), (x_hook_bottom, y_bottom - 2. * lw)]);
        layout.path(Unit::ZERO, Unit::ZERO, path, Some(Pen::new(env.color, lw)), None);
    }
    if let Some(degree) = degree {
        let ds = degree.size;
        let room = (y_top - (y_hook_top - lw)).abs();
        let y = y_top + ds.baseline_height.to_unitless() + (room - ds.overall_height.to_unitless()) / 2.;
        let x = x_start + indent.to_unitless() - ds.width.to_unitless();
        layout.place(Unit::new(x), Unit::new(y), degree);
    }
    layout.place(sqrt_width + overwidth, Unit::ZERO, child);
    layout
}

/// Vertical extent (top, bottom) of what `layout` draws itself, nested boxes excluded
fn drawn_extent(layout : &LayoutBox) -> Option<(f64, f64)> {
    layout.contents.iter()
        .filter_map(|item| {
            let y = item.y.to_unitless();
            match item.primitive {
                Primitive::Line { dy, ref pen, .. } => {
                    let (a, b) = (y, y + dy.to_unitless());
                    Some((a.min(b) - pen.width / 2., a.max(b) + pen.width / 2.))
                },
                Primitive::Path { ref path, ref pen, .. } => {
                    let half = pen.as_ref().map_or(0., |pen| pen.width / 2.);
                    path.bounds().map(|(_, y0, _, y1)| (y + y0 - half, y + y1 + half))
                },
                _ => None,
            }
        })
        .reduce(|(t0, b0), (t1, b1)| (t0.min(t1), b0.max(b1)))
}

pub(super) fn decorated(decoration : Decoration, child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let settings = ctx.settings;
    let font = ctx.font(env);
    let metrics = ctx.metrics;

    let child_layout = layout_node(child, env, ctx, ancestors, None);
    let cs = child_layout.size;
    // italic content leans right: accents above it move right too
    let italic_correction = if env.italic {
        let upright = Environment { italic : false, ..env.clone() };
        (cs.width - layout_node(child, &upright, ctx, ancestors, None).size.width).to_unitless()
    } else {
        0.
    };

    let factor = settings.decoration_height_factor;
    let width = cs.width.to_unitless();
    let ascent = cs.baseline_height.to_unitless();
    let descent = cs.descent().to_unitless();
    let lw = metrics.line_width(&font).to_unitless();
    let width_big_x = metrics.bounding_box(&font, "X").width().to_unitless();
    let width_x = metrics.bounding_box(&font, "x").width().to_unitless();
    let width_dot = metrics.bounding_box(&font, ".").width().to_unitless() / 2.;
    let mini_text = if matches!(decoration, Decoration::Tilde | Decoration::Breve) { "~" } else { "^" };
    let mini_width = metrics.bounding_box(&font, mini_text).width().to_unitless() - italic_correction;

    let deco_y = -ascent * (1. + factor);
    let above_ascent_y = -metrics.ascent(&font).to_unitless() * (1. + factor);
    let below_y = (descent * (1. + factor)).max(metrics.x_height(&font).to_unitless() * factor);
    let height = factor * ascent.max(metrics.x_height(&font).to_unitless());
    let x_offset = settings.decoration_width_reduction_factor * width_big_x / 2.;
    let deco_width = (width_x * 0.5).max(width - 2. * x_offset - italic_correction);
    let head = width_x * 0.33;

    let top_center = italic_correction + (width - italic_correction) / 2.;
    let (top_start, top_end) = (top_center - deco_width / 2., top_center + deco_width / 2.);
    let (bottom_start, bottom_end) = (0., width - italic_correction);

    let pen = Pen::new(env.color, lw);
    let mut shapes = LayoutBox::new(None, NodeSize::default());
    let mut stroke = |path : &mut Path| {
        shapes.path(Unit::ZERO, Unit::ZERO, std::mem::take(path), Some(pen), None);
    };
    let mut path = Path::new();
    let mut dots = Path::new();

    match decoration {
        Decoration::Vec => {
            path.polyline(&[(top_start, deco_y), (top_end, deco_y), (top_end - head, deco_y - height * 2. / 3.)]);
        },
        Decoration::Overline => {
            path.polyline(&[(top_start, deco_y), (top_end, deco_y)]);
        },
        Decoration::Bar => {
            path.polyline(&[(top_start, above_ascent_y), (top_end, above_ascent_y)]);
        },
        Decoration::DoubleOverline => {
            path.polyline(&[(top_start, deco_y), (top_end, deco_y)])
                .polyline(&[(top_start, deco_y - 2. * lw), (top_end, deco_y - 2. * lw)]);
        },
        Decoration::Underline => {
            path.polyline(&[(bottom_start, below_y), (bottom_end, below_y)]);
        },
        Decoration::DoubleUnderline => {
            path.polyline(&[(bottom_start, below_y), (bottom_end, below_y)])
                .polyline(&[(bottom_start, below_y + 2. * lw), (bottom_end, below_y + 2. * lw)]);
        },
        Decoration::RightArrow | Decoration::LeftArrow | Decoration::LeftRightArrow => {
            let left = decoration != Decoration::RightArrow;
            let right = decoration != Decoration::LeftArrow;
            path = arrow_path(top_start, top_end, deco_y + height / 2., head, left, right);
        },
        Decoration::UnderRightArrow | Decoration::UnderLeftArrow | Decoration::UnderLeftRightArrow => {
            let left = decoration != Decoration::UnderRightArrow;
            let right = decoration != Decoration::UnderLeftArrow;
            path = arrow_path(bottom_start, bottom_end, below_y + height / 2., head, left, right);
        },
        Decoration::Hat => {
            path.polyline(&[(top_center - mini_width / 2., deco_y + height / 3.), (top_center, deco_y), (top_center + mini_width / 2., deco_y + height / 3.)]);
        },
        Decoration::WideHat => {
            path.polyline(&[(top_start, deco_y + height / 2.), (top_center, deco_y - height / 2.), (top_end, deco_y + height / 2.)]);
        },
        Decoration::Check => {
            path.polyline(&[(top_center - mini_width / 2., deco_y), (top_center, deco_y + height / 3.), (top_center + mini_width / 2., deco_y)]);
        },
        Decoration::WideCheck => {
            path.polyline(&[(top_start, deco_y - height / 2.), (top_center, deco_y + height / 2.), (top_end, deco_y - height / 2.)]);
        },
        Decoration::Breve => {
            let (x0, x1) = (top_center - mini_width / 2., top_center + mini_width / 2.);
            path.move_to(x0, deco_y).cubic_to(x0, deco_y + height, x1, deco_y + height, x1, deco_y);
        },
        Decoration::Tilde | Decoration::WideTilde => {
            let (x0, x1) = if decoration == Decoration::Tilde {
                (top_center - mini_width / 2., top_center + mini_width / 2.)
            } else {
                (top_start, top_end)
            };
            let middle = (x0 + x1) / 2.;
            path.move_to(x0, deco_y).cubic_to(middle, deco_y + height, middle, deco_y - height, x1, deco_y);
        },
        Decoration::Acute => {
            path.polyline(&[(top_center - mini_width / 4., deco_y + height / 2.), (top_center + mini_width / 4., deco_y - height / 2.)]);
        },
        Decoration::Grave => {
            path.polyline(&[(top_center - mini_width / 4., deco_y - height / 2.), (top_center + mini_width / 4., deco_y + height / 2.)]);
        },
        Decoration::Circle => {
            path.ellipse(top_center, deco_y, width_dot / 1.5, width_dot / 1.5);
        },
        Decoration::Dot => {
            dots.ellipse(top_center, deco_y, width_dot / 2., width_dot / 2.);
        },
        Decoration::DoubleDot => {
            dots.ellipse(top_center - width_dot, deco_y, width_dot / 2., width_dot / 2.)
                .ellipse(top_center + width_dot, deco_y, width_dot / 2., width_dot / 2.);
        },
        Decoration::Cancel => {
            path.polyline(&[(bottom_start, below_y), (top_end, deco_y)]);
        },
        Decoration::BackCancel => {
            path.polyline(&[(bottom_start, deco_y), (top_end, below_y)]);
        },
        Decoration::CrossCancel => {
            path.polyline(&[(bottom_start, below_y), (top_end, deco_y)])
                .polyline(&[(bottom_start, deco_y), (top_end, below_y)]);
        },
    }
    stroke(&mut path);
    shapes.path(Unit::ZERO, Unit::ZERO, dots, None, Some(Brush::solid(env.color)));

    let (top, bottom) = drawn_extent(&shapes).unwrap_or((-ascent, descent));
    let baseline_height = Unit::new(ascent.max(-top));
    let overall_height = baseline_height + Unit::new(descent.max(bottom));
    let mut layout = LayoutBox::new(Some(NodeKind::Decorated), NodeSize {
        width : Unit::new(mini_width.max(width)),
        baseline_height,
        overall_height,
        strikeout_pos : cs.strikeout_pos,
        baseline_x_correction : cs.baseline_x_correction,
        top_x_correction : cs.top_x_correction,
    });
    layout.place(Unit::ZERO, Unit::ZERO, child_layout);
    layout.contents.append(&mut shapes.contents);
    layout
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::{layout_math, ERROR_TOLERANCE};

    fn count(layout : &LayoutBox, f : impl Fn(&Primitive) -> bool) -> usize {
        layout.flatten().into_iter().filter(|p| f(p.primitive)).count()
    }

    #[test]
    fn hbrace_is_centered() {
        let path = hbrace_path(10., 0., 8., 2.);
        let (x0, y0, x1, y1) = path.bounds().unwrap();
        assert!((x0 - 6.).abs() < ERROR_TOLERANCE);
        assert!((x1 - 14.).abs() < ERROR_TOLERANCE);
        assert!(y0 < 0. && y1 > 0.);
    }

    #[test]
    fn arrows() {
        let both = arrow_path(0., 10., 0., 2., true, true);
        let right = arrow_path(0., 10., 0., 2., false, true);
        assert!(both.segments.len() > right.segments.len());
        assert_eq!(right.bounds(), Some((0., -1., 10., 1.)));
    }

    #[test]
    fn braces_surround_their_content() {
        let layout = layout_math("\\left(x\\right)");
        let plain = layout_math("x");
        assert!(layout.size.width > plain.size.width);
        assert!(layout.size.overall_height >= plain.size.overall_height);
        assert_eq!(count(&layout, |p| matches!(p, Primitive::Path { brush : Some(_), .. })), 2);

        let text = layout.flatten().into_iter().find_map(|p| match *p.primitive {
            Primitive::Text { .. } => Some(p.x),
            _ => None,
        }).unwrap();
        assert!(text > Unit::ZERO);
    }

    #[test]
    fn invisible_brace_takes_no_room() {
        let open_only = layout_math("\\left(x\\right.");
        let both = layout_math("\\left(x\\right)");
        assert!(open_only.size.width < both.size.width);
        assert_eq!(count(&open_only, |p| matches!(p, Primitive::Path { .. })), 1);
    }

    #[test]
    fn braces_grow_with_content() {
        let small = layout_math("\\left[x\\right]");
        let tall = layout_math("\\left[\\frac{a}{\\frac{b}{c}}\\right]");
        assert!(tall.size.overall_height > small.size.overall_height);
        // and get wider when much higher than the font
        let widths = |layout : &LayoutBox| layout.flatten().into_iter().filter_map(|p| match *p.primitive {
            Primitive::Path { ref path, .. } => path.bounds().map(|(x0, _, x1, _)| x1 - x0),
            _ => None,
        }).fold(0., f64::max);
        assert!(widths(&tall) >= widths(&small));
    }

    #[test]
    fn curly_braces_point_outwards() {
        let layout = layout_math("\\left\\{x\\right\\}");
        let paths : Vec<_> = layout.flatten().into_iter().filter_map(|p| match *p.primitive {
            Primitive::Path { ref path, .. } => path.bounds(),
            _ => None,
        }).collect();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].2 <= paths[1].0);
    }

    #[test]
    fn root_sign() {
        let layout = layout_math("\\sqrt{x}");
        let plain = layout_math("x");
        assert!(layout.size.width > plain.size.width);
        assert!(layout.size.baseline_height >= plain.size.baseline_height);
        assert_eq!(count(&layout, |p| matches!(p, Primitive::Path { pen : Some(_), .. })), 1);

        let with_degree = layout_math("\\sqrt[3]{x}");
        assert!(with_degree.text_content().contains('3'));
        assert!(with_degree.size.width >= layout.size.width);
    }

    #[test]
    fn accents_raise_the_box() {
        let plain = layout_math("x");
        for input in ["\\hat{x}", "\\vec{x}", "\\tilde{x}", "\\dot{x}", "\\bar{x}", "\\overline{x}"] {
            let layout = layout_math(input);
            assert!(layout.size.baseline_height > plain.size.baseline_height, "{}", input);
            assert!((layout.size.descent() - plain.size.descent()).abs().to_unitless() < ERROR_TOLERANCE, "{}", input);
        }
    }

    #[test]
    fn underlines_lower_the_box() {
        let plain = layout_math("x");
        let layout = layout_math("\\underline{x}");
        assert!(layout.size.descent() > plain.size.descent());
        let double = layout_math("\\underline{\\underline{x}}");
        assert!(double.size.descent() > layout.size.descent());
    }

    #[test]
    fn cancel_crosses_the_content() {
        let layout = layout_math("\\xcancel{x}");
        let lines = layout.flatten().into_iter().filter_map(|p| match *p.primitive {
            Primitive::Path { ref path, pen : Some(_), .. } => Some(path.segments.len()),
            _ => None,
        }).collect::<Vec<_>>();
        assert_eq!(lines, vec![4]);
    }
}
