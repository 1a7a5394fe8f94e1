//! Dispatch over the node kinds, and layout of the leaf and single-child nodes.

use super::{decorations, horizontal, vertical};
use super::{Ancestors, LayoutBox, LayoutContext, NodeSize};

use crate::dimensions::{units::Px, Unit};
use crate::environment::{Capitalization, Environment, FontFamily};
use crate::font::FontDescriptor;
use crate::parser::instructions::BoxStyle;
use crate::parser::nodes::{Node, NodeKind, PhantomKind, WhitespaceKind};
use crate::parser::symbols::Symbol;
use crate::render::Pen;

/// Lays out `node`.
///
/// `prev` is the size of the node preceding a sub- or superscript, when the script has to be placed
/// relative to it rather than relative to the font.
pub(super) fn layout_node(node : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>, prev : Option<&NodeSize>) -> LayoutBox {
    let kind = node.kind();
    let inner = ancestors.push(kind);
    let layout = match *node {
        Node::Text(ref text) => self::text(text, env, ctx),
        Node::Symbol { ref symbol, .. } => self::symbol(symbol, env, ctx),
        Node::Whitespace(whitespace) => self::whitespace(whitespace, env, ctx),
        Node::Verbatim { ref text, visible_space } => vertical::verbatim(text, visible_space, env, ctx),
        Node::List(ref nodes) => horizontal::list(nodes, env, ctx, &inner),
        Node::VerticalList(ref list) => vertical::vertical_list(list, env, ctx, &inner),
        Node::Block(ref child) => {
            let child = layout_node(child, env, ctx, &inner, None);
            LayoutBox::wrap(kind, child.size, child)
        },
        Node::Subscript(ref child) => subscript(child, env, ctx, &inner, prev),
        Node::Superscript(ref child) => superscript(child, env, ctx, &inner, prev),
        Node::Fraction { mode, ref top, ref bottom } => vertical::fraction(mode, top, bottom, env, ctx, &inner),
        Node::Sqrt { ref degree, ref child } => decorations::sqrt(degree.as_deref(), child, env, ctx, &inner),
        Node::Brace { open, close, ref child } => decorations::brace(open, close, child, env, ctx, &inner),
        Node::Matrix(ref matrix) => vertical::matrix(matrix, env, ctx, &inner),
        Node::Decorated { decoration, ref child } => decorations::decorated(decoration, child, env, ctx, &inner),
        Node::TextProps { ref params, modifier, ref child, .. } => {
            let child_env = modifier(env.clone(), params, &ctx.engine_context(env));
            let child = layout_node(child, &child_env, ctx, &inner, None);
            LayoutBox::wrap(kind, child.size, child)
        },
        Node::BoxInstruction { ref params, ref style, ref child, .. } => boxed(params, style, child, env, ctx, &inner),
        Node::ModifyEnvironment { .. } => LayoutBox::new(Some(kind), NodeSize::default()),
        Node::Phantom { kind : phantom, ref child } => self::phantom(phantom, child, env, ctx, &inner),
        Node::EmptyBox { width, height } => empty_box(width, height, env, ctx),
    };
    trace!("{:?}: width {}, ascent {}, descent {}", kind, layout.size.width, layout.size.baseline_height, layout.size.descent());
    layout
}

/// How a run of text selects its font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunFont {
    AsDefined,
    Upright,
    Roman,
}

fn forced_upright(c : char) -> bool {
    c.is_ascii_digit() || matches!(c,
        '(' | '[' | '|' | ']' | ')' | '<' | '>' | '{' | '}'
        | '\u{2329}' | '\u{232A}' | '\u{2308}' | '\u{2309}' | '\u{230A}' | '\u{230B}')
}

/// Double-struck version of `c`, if there is one
fn blackboard(c : char) -> Option<char> {
    let code = match c {
        'C' => 0x2102,
        'H' => 0x210D,
        'N' => 0x2115,
        'P' => 0x2119,
        'Q' => 0x211A,
        'R' => 0x211D,
        'Z' => 0x2124,
        'A'..='Z' => 0x1D538 + (c as u32 - 'A' as u32),
        'a'..='z' => 0x1D552 + (c as u32 - 'a' as u32),
        '0'..='9' => 0x1D7D8 + (c as u32 - '0' as u32),
        _ => return None,
    };
    char::from_u32(code)
}

/// Splits `text` in runs drawn with the same font
fn split_runs(text : &str, env : &Environment) -> Vec<(String, RunFont)> {
    let force_upright = env.inside_math && env.force_digits_upright
        && matches!(env.family, FontFamily::Roman | FontFamily::MathRoman);

    let mut runs : Vec<(String, RunFont)> = Vec::new();
    for c in text.chars() {
        let started = !runs.is_empty();
        let (c, mode) = if force_upright {
            if forced_upright(c) || (started && (c == '.' || c == ',')) {
                (c, RunFont::Upright)
            } else {
                (c, RunFont::AsDefined)
            }
        } else if env.family == FontFamily::Blackboard {
            match blackboard(c) {
                Some(bb) => (bb, RunFont::Roman),
                None => (c, RunFont::AsDefined),
            }
        } else {
            (c, RunFont::AsDefined)
        };

        match runs.last_mut() {
            Some((run, run_mode)) if *run_mode == mode => run.push(c),
            _ => runs.push((c.to_string(), mode)),
        }
    }
    runs
}

/// Spacing around signs and punctuation inside math
fn math_spacing(text : &str) -> String {
    let mut spaced = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '-' => spaced.push_str(" \u{2212}"),
            '+' | '<' | '>' | '=' => {
                spaced.push(' ');
                spaced.push(c);
            },
            ';' | ',' => {
                spaced.push(c);
                spaced.push(' ');
            },
            c => spaced.push(c),
        }
    }
    while spaced.contains("  ") {
        spaced = spaced.replace("  ", " ");
    }
    spaced
}

fn capitalize(text : &str, capitalization : Capitalization) -> String {
    match capitalization {
        Capitalization::AllUppercase => text.to_uppercase(),
        Capitalization::AllLowercase => text.to_lowercase(),
        Capitalization::Mixed | Capitalization::SmallCaps => text.to_string(),
    }
}

/// Draws the underline, overline and strikeout lines required by `env` over `width`
fn text_decorations(layout : &mut LayoutBox, width : Unit<Px>, font : &FontDescriptor, env : &Environment, ctx : LayoutContext<'_>) {
    if !(env.underlined || env.overline || env.strike) {
        return;
    }
    let lw = ctx.metrics.line_width(font);
    let pen = Pen::new(env.color, lw.to_unitless());
    if env.underlined {
        layout.hline(Unit::ZERO, lw.scale(2.), width, pen);
    }
    if env.overline {
        layout.hline(Unit::ZERO, -(ctx.metrics.ascent(font) + lw), width, pen);
    }
    if env.strike {
        layout.hline(Unit::ZERO, -ctx.metrics.strikeout_pos(font), width, pen);
    }
}

pub(super) fn text(text : &str, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let mut text = capitalize(text, env.capitalization);
    if env.inside_math {
        text = math_spacing(&text);
    }

    let font = ctx.font(env);
    let mut layout = LayoutBox::new(Some(NodeKind::Text), NodeSize::default());
    let mut x = Unit::ZERO;
    let mut ascent = Unit::ZERO;
    let mut descent = Unit::ZERO;
    let mut x_correction = Unit::ZERO;

    for (run, mode) in split_runs(&text, env) {
        let run_font = match mode {
            RunFont::AsDefined => font.clone(),
            RunFont::Upright => font.upright(),
            RunFont::Roman => ctx.font(&env.exchanged_font_for_roman()),
        };
        let tight = ctx.metrics.tight_bounding_box(&run_font, &run);
        let width = ctx.metrics.width(&run_font, &run);
        x_correction = match run.chars().last() {
            Some(last) if run_font.italic => ctx.metrics.right_bearing(&run_font, last),
            _ => Unit::ZERO,
        };
        ascent = ascent.max(-tight.y_min);
        descent = descent.max(tight.y_max);
        layout.text(x, Unit::ZERO, run, run_font, env.color);
        x += width;
    }
    text_decorations(&mut layout, x, &font, env, ctx);

    layout.size = NodeSize {
        width : x,
        baseline_height : ascent,
        overall_height : ascent + descent,
        strikeout_pos : ctx.metrics.strikeout_pos(&font),
        baseline_x_correction : x_correction,
        top_x_correction : Unit::ZERO,
    };
    layout
}

/// The font a symbol is drawn with
pub(super) fn symbol_font(symbol : &Symbol, env : &Environment, ctx : LayoutContext<'_>) -> FontDescriptor {
    let mut font = ctx.font(env);
    if let Some(italic) = symbol.italic {
        font.italic = italic;
    }
    if let Some(bold) = symbol.bold {
        font.bold = bold;
    }
    if symbol.big && env.inside_math && !env.text_style {
        font = font.scaled(ctx.settings.big_operator_font_factor);
    }
    font
}

fn symbol(symbol : &Symbol, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let font = symbol_font(symbol, env, ctx);
    let tight = ctx.metrics.tight_bounding_box(&font, symbol.text);

    let (width, x) = if env.inside_math {
        let paren = ctx.metrics.tight_bounding_box(&font, "(");
        let mut width = tight.width().max(paren.width());
        if symbol.operator {
            width = width.scale(ctx.settings.mathoperator_width_factor);
        }
        (width, (width - tight.width()).scale(0.5) - tight.x_min)
    } else {
        (ctx.metrics.width(&font, symbol.text), Unit::ZERO)
    };

    let ascent = (-tight.y_min).max(Unit::ZERO);
    // named functions (`\lim`, `\sup`) keep a fixed small descent, whatever their letters
    let descent = if symbol.height_is_ascent && !symbol.big {
        ascent.scale(0.1)
    } else {
        tight.y_max.max(Unit::ZERO)
    };
    let top_x_correction = if font.italic {
        ctx.metrics.width(&font, "x").scale(ctx.settings.italic_correction_factor)
    } else {
        Unit::ZERO
    };

    let mut layout = LayoutBox::new(Some(NodeKind::Symbol), NodeSize {
        width,
        baseline_height : ascent,
        overall_height : ascent + descent,
        strikeout_pos : ctx.metrics.strikeout_pos(&font),
        baseline_x_correction : Unit::ZERO,
        top_x_correction,
    });
    layout.text(x, Unit::ZERO, symbol.text, font.clone(), env.color);
    text_decorations(&mut layout, width, &font, env, ctx);
    layout
}

fn whitespace(whitespace : WhitespaceKind, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let font = ctx.font(env);
    let width = match whitespace.em() {
        Some(em) => font.size.scale(em),
        None => ctx.metrics.width(&font, " "),
    };
    LayoutBox::new(Some(NodeKind::Whitespace), NodeSize {
        width,
        strikeout_pos : ctx.metrics.strikeout_pos(&font),
        ..NodeSize::default()
    })
}

fn empty_box(width : f64, height : f64, env : &Environment, ctx : LayoutContext<'_>) -> LayoutBox {
    let font = ctx.font(env);
    let strikeout_pos = ctx.metrics.strikeout_pos(&font);
    let height = font.size.scale(height);
    LayoutBox::new(Some(NodeKind::EmptyBox), NodeSize {
        width : font.size.scale(width),
        baseline_height : strikeout_pos + height.scale(0.5),
        overall_height : height,
        strikeout_pos,
        ..NodeSize::default()
    })
}

fn phantom(kind : PhantomKind, child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let mut size = layout_node(child, env, ctx, ancestors, None).size;
    match kind {
        PhantomKind::Both => (),
        PhantomKind::Horizontal => {
            size.baseline_height = Unit::ZERO;
            size.overall_height = Unit::ZERO;
        },
        PhantomKind::Vertical => size.width = Unit::ZERO,
    }
    LayoutBox::new(Some(NodeKind::Phantom), size)
}

fn boxed(params : &[String], style : &BoxStyle, child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let engine = ctx.engine_context(env);
    let pen = (style.pen)(env, params, &engine);
    let brush = (style.brush)(env, params, &engine);

    let upright = ctx.font(env).upright();
    let x_width = ctx.metrics.tight_bounding_box(&upright, "x").width();
    let padding = x_width.scale(style.padding_factor);
    let rounding = x_width.scale(style.rounding_factor);
    let lw = Unit::<Px>::new(pen.map_or(0., |pen| pen.width));
    let half = lw.scale(0.5);

    let child = layout_node(child, env, ctx, ancestors, None);
    let cs = child.size;
    let frame_width = cs.width + padding.scale(2.);
    let frame_height = cs.overall_height + padding.scale(2.);

    let mut layout = LayoutBox::new(Some(NodeKind::BoxInstruction), NodeSize {
        width : frame_width + lw,
        baseline_height : cs.baseline_height + padding + half,
        overall_height : frame_height + lw,
        strikeout_pos : cs.strikeout_pos,
        ..NodeSize::default()
    });
    let top = -(cs.baseline_height + padding);
    layout.rect(half, top, frame_width, frame_height, pen, brush, rounding);
    if style.double_line {
        if let Some(pen) = pen {
            let inset = lw.scale(2.);
            let (w, h) = (frame_width - inset.scale(2.), frame_height - inset.scale(2.));
            if w > Unit::ZERO && h > Unit::ZERO {
                layout.rect(half + inset, top + inset, w, h, Some(pen.scaled(0.6)), None, rounding);
            }
        }
    }
    layout.place(half + padding, Unit::ZERO, child);
    layout
}

/// Height of "x" in the font of `env`
pub(super) fn x_height(env : &Environment, ctx : LayoutContext<'_>) -> Unit<Px> {
    ctx.metrics.tight_bounding_box(&ctx.font(env), "x").total_height()
}

pub(super) fn superscript(child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>, prev : Option<&NodeSize>) -> LayoutBox {
    let settings = ctx.settings;
    let child_env = env.scaled(settings.subsuper_size_factor);
    let child = layout_node(child, &child_env, ctx, ancestors, None);
    let cs = child.size;
    let child_descent = cs.descent();

    let mut shift = x_height(env, ctx).scale(settings.super_shift_factor);
    if let Some(prev) = prev {
        let special = prev.baseline_height - child_descent
            - cs.baseline_height.scale(settings.special_super_shift_factor) - child_descent;
        shift = shift.max(special);
    }

    let height = cs.overall_height + shift;
    let mut layout = LayoutBox::new(Some(NodeKind::Superscript), NodeSize {
        width : cs.width,
        baseline_height : height,
        overall_height : height,
        strikeout_pos : prev.map_or_else(|| ctx.metrics.strikeout_pos(&ctx.font(env)), |prev| prev.strikeout_pos),
        ..NodeSize::default()
    });
    layout.place(Unit::ZERO, -(shift + child_descent), child);
    layout
}

pub(super) fn subscript(child : &Node, env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>, prev : Option<&NodeSize>) -> LayoutBox {
    let settings = ctx.settings;
    let child_env = env.scaled(settings.subsuper_size_factor);
    let child = layout_node(child, &child_env, ctx, ancestors, None);
    let cs = child.size;

    let mut shift = cs.baseline_height - x_height(&child_env, ctx).scale(settings.sub_shift_factor);
    if let Some(prev) = prev {
        shift = shift.max(prev.descent() + cs.baseline_height.scale(settings.special_sub_shift_factor));
    }

    let mut layout = LayoutBox::new(Some(NodeKind::Subscript), NodeSize {
        width : cs.width,
        baseline_height : cs.baseline_height - shift,
        overall_height : cs.overall_height,
        strikeout_pos : prev.map_or_else(|| ctx.metrics.strikeout_pos(&ctx.font(&child_env)), |prev| prev.strikeout_pos),
        ..NodeSize::default()
    });
    layout.place(Unit::ZERO, shift, child);
    layout
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::fixed::FixedMetrics;
    use crate::font::FontMetrics;
    use crate::layout::tests::{layout_math, parse_math, ERROR_TOLERANCE};
    use crate::layout::{layout, LayoutSettings, Primitive};
    use crate::parser::{parse, Parser};

    fn close(a : Unit<Px>, b : Unit<Px>) -> bool {
        (a.to_unitless() - b.to_unitless()).abs() < ERROR_TOLERANCE
    }

    fn layout_text(input : &str) -> LayoutBox {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        layout(&parse(input).root, &settings.root_environment(), ctx)
    }

    #[test]
    fn math_spacing_of_signs() {
        assert_eq!(math_spacing("a-b"), "a \u{2212}b");
        assert_eq!(math_spacing("a+b=c"), "a +b =c");
        assert_eq!(math_spacing("a, b"), "a, b");
        assert_eq!(math_spacing("a;b"), "a; b");
    }

    #[test]
    fn digits_are_upright_in_math() {
        let mut env = Environment::default();
        env.begin_math_mode();
        let runs = split_runs("x2.5y", &env);
        assert_eq!(runs, vec![
            ("x".to_string(), RunFont::AsDefined),
            ("2.5".to_string(), RunFont::Upright),
            ("y".to_string(), RunFont::AsDefined),
        ]);
        // a leading dot starts an italic run
        assert_eq!(split_runs(".5", &env)[0], (".".to_string(), RunFont::AsDefined));

        let text_env = Environment::default();
        assert_eq!(split_runs("x2", &text_env), vec![("x2".to_string(), RunFont::AsDefined)]);
    }

    #[test]
    fn blackboard_letters() {
        let env = Environment::default().exchanged_font_for(FontFamily::Blackboard);
        let runs = split_runs("R1!", &env);
        assert_eq!(runs, vec![
            ("\u{211D}\u{1D7D9}".to_string(), RunFont::Roman),
            ("!".to_string(), RunFont::AsDefined),
        ]);
    }

    #[test]
    fn text_size_is_sum_of_advances() {
        let metrics = FixedMetrics::default();
        let env = Environment::default();
        let font = env.font(&Default::default());
        let layout = layout_text("Ag");
        assert!(close(layout.size.width, metrics.width(&font, "Ag")));
        // A: cap height, g: descender
        assert!(close(layout.size.baseline_height, font.size.scale(0.7)));
        assert!(close(layout.size.descent(), font.size.scale(0.2)));
        assert_eq!(layout.text_content(), "Ag");
    }

    #[test]
    fn capitalization() {
        let env = Environment { capitalization : Capitalization::AllUppercase, ..Environment::default() };
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let layout = text("abc", &env, LayoutContext::new(&settings, &metrics));
        assert_eq!(layout.text_content(), "ABC");
    }

    #[test]
    fn decorations_of_environment() {
        let layout = layout_text("\\ul{ab}");
        let lines = layout.flatten().into_iter()
            .filter(|placed| matches!(placed.primitive, Primitive::Line { .. }))
            .count();
        assert_eq!(lines, 1);
    }

    #[test]
    fn superscript_keeps_base_on_baseline() {
        let layout = layout_math("x^2");
        let placed = layout.flatten();
        let texts : Vec<_> = placed.iter()
            .filter_map(|p| match p.primitive {
                Primitive::Text { ref text, .. } => Some((text.as_str(), p.y)),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0], ("x", Unit::ZERO));
        assert_eq!(texts[1].0, "2");
        assert!(texts[1].1 < Unit::ZERO);

        let x = layout_math("x");
        assert!(layout.size.baseline_height > x.size.baseline_height);
        assert!(close(layout.size.descent(), x.size.descent()));
    }

    #[test]
    fn subscript_goes_down() {
        let layout = layout_math("x_2");
        let y = layout.flatten().iter()
            .filter_map(|p| match p.primitive {
                Primitive::Text { ref text, .. } if text == "2" => Some(p.y),
                _ => None,
            })
            .next()
            .unwrap();
        assert!(y > Unit::ZERO);
        assert!(layout.size.descent() > layout_math("x").size.descent());
    }

    #[test]
    fn whitespace_widths() {
        let quad = layout_math("\\quad");
        let env = LayoutSettings::default().root_environment();
        assert!(close(quad.size.width, env.font_size_px()));
        let negative = layout_math("\\!");
        assert!(negative.size.width < Unit::ZERO);
    }

    #[test]
    fn phantoms_draw_nothing() {
        let full = layout_math("\\phantom{xyz}");
        let text = layout_math("xyz");
        assert!(full.is_blank());
        assert!(close(full.size.width, text.size.width));
        assert!(close(full.size.overall_height, text.size.overall_height));

        let horizontal = layout_math("\\hphantom{xyz}");
        assert!(close(horizontal.size.width, text.size.width));
        assert_eq!(horizontal.size.overall_height, Unit::ZERO);

        let vertical = layout_math("\\vphantom{xyz}");
        assert_eq!(vertical.size.width, Unit::ZERO);
        assert!(close(vertical.size.overall_height, text.size.overall_height));
    }

    #[test]
    fn box_is_larger_than_its_content() {
        let boxed = layout_text("\\fbox{X}");
        let plain = layout_text("X");
        assert!(boxed.size.width > plain.size.width);
        assert!(boxed.size.baseline_height > plain.size.baseline_height);
        assert!(boxed.size.descent() > plain.size.descent());
        let rects = boxed.flatten().into_iter().filter(|p| matches!(p.primitive, Primitive::Rect { .. })).count();
        assert_eq!(rects, 1);

        let double = layout_text("\\doublebox{X}");
        let rects = double.flatten().into_iter().filter(|p| matches!(p.primitive, Primitive::Rect { .. })).count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn colorbox_fills() {
        let boxed = layout_text("\\colorbox{red}{X}");
        let brush = boxed.flatten().into_iter().find_map(|p| match *p.primitive {
            Primitive::Rect { brush, .. } => brush,
            _ => None,
        });
        assert_eq!(brush.map(|b| b.color), Some(crate::parser::color::RGBA(255, 0, 0, 255)));
        assert!(boxed.size.width > layout_text("X").size.width);
    }

    #[test]
    fn text_props_change_the_child_only() {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let root = Parser::new("\\textbf{bold} normal").parse().root;
        let layout = layout(&root, &settings.root_environment(), ctx);
        let fonts : Vec<_> = layout.flatten().into_iter().filter_map(|p| match *p.primitive {
            Primitive::Text { ref text, ref font, .. } => Some((text.clone(), font.bold)),
            _ => None,
        }).collect();
        assert_eq!(fonts.first(), Some(&("bold".to_string(), true)));
        assert!(fonts.iter().skip(1).all(|(_, bold)| !bold));
    }

    #[test]
    fn big_operators_are_larger_in_display_style() {
        let display = layout_math("\\sum");
        let text = layout_math("\\textstyle\\sum");
        assert!(display.size.overall_height > text.size.overall_height);
    }

    #[test]
    fn operator_symbols_get_room() {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let mut env = settings.root_environment();
        env.begin_math_mode();
        let plus = layout_node(&parse_math("\\times"), &env, ctx, &Ancestors::ROOT, None);
        let font = symbol_font(&Symbol::from_name("times").unwrap(), &env, ctx);
        let ink = metrics.tight_bounding_box(&font, "\u{D7}").width().max(metrics.tight_bounding_box(&font, "(").width());
        assert!(close(plus.size.width, ink.scale(settings.mathoperator_width_factor)));
    }

    #[test]
    fn empty_box_is_centered_on_strikeout() {
        let settings = LayoutSettings::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutContext::new(&settings, &metrics);
        let env = settings.root_environment();
        let layout = empty_box(1., 2., &env, ctx);
        let font = ctx.font(&env);
        assert!(close(layout.size.width, font.size));
        assert!(close(layout.size.overall_height, font.size.scale(2.)));
        assert!(close(layout.size.baseline_height - font.size, metrics.strikeout_pos(&font)));
    }
}
