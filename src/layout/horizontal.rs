//! Layout of horizontal lists: nodes side by side on a common baseline, with their scripts.

use super::builders::HBox;
use super::engine::{layout_node, subscript, superscript};
use super::{Ancestors, LayoutBox, LayoutContext, NodeSize};

use crate::dimensions::{units::Px, Unit};
use crate::environment::Environment;
use crate::parser::nodes::{Node, NodeKind};

/// Measurements of the current font which script placement depends on
struct ScriptMetrics {
    /// distance between an operator and its limits
    limits_shift : Unit<Px>,
    /// extra room on the sides of an operator with limits
    limits_extra : Unit<Px>,
    /// previous nodes with at least this ascent get special subscripts
    special_ascent : Unit<Px>,
    /// previous nodes with at least this descent get special superscripts
    special_descent : Unit<Px>,
    /// space after a superscript next to a subscript
    space : Unit<Px>,
    half_line_width : Unit<Px>,
}

impl ScriptMetrics {
    fn new(env : &Environment, ctx : LayoutContext<'_>) -> Self {
        let settings = ctx.settings;
        let font = ctx.font(env);
        let metrics = ctx.metrics;
        let mode = settings.subsuper_mode_selection_by_size_factor;
        Self {
            limits_shift : metrics.x_height(&font).scale(settings.operatorsubsuper_distance_factor),
            limits_extra : metrics.bounding_box(&font, "x").width().scale(settings.operatorsubsuper_extra_space_factor),
            special_ascent : metrics.ascent(&font).scale(mode),
            special_descent : metrics.descent(&font).scale(mode),
            space : metrics.bounding_box(&font, " ").width(),
            half_line_width : metrics.line_width(&font).scale(0.5),
        }
    }
}

fn script_child(node : &Node) -> Option<&Node> {
    match *node {
        Node::Subscript(ref child) | Node::Superscript(ref child) => Some(child),
        _ => None,
    }
}

/// Lays out `nodes` one after the other.
///
/// `ModifyEnvironment` nodes change the environment of the nodes following them. Sub- and superscripts
/// are placed after the node preceding them, or above and below it when it takes limits.
pub(super) fn list(nodes : &[Node], env : &Environment, ctx : LayoutContext<'_>, ancestors : &Ancestors<'_>) -> LayoutBox {
    let mut env = env.clone();
    let mut hbox = HBox::new();
    let mut prev : Option<NodeSize> = None;
    let mut last_normal : Option<NodeSize> = None;

    let mut i = 0;
    while i < nodes.len() {
        let node = &nodes[i];
        if let Node::ModifyEnvironment { ref params, modifier, .. } = *node {
            let engine = ctx.engine_context(&env);
            env = modifier(env, params, &engine);
            i += 1;
            continue;
        }

        let script = ScriptMetrics::new(&env, ctx);
        let special_sub = prev.filter(|p| p.baseline_height >= script.special_ascent);
        let special_sup = prev.filter(|p| p.descent() >= script.special_descent);
        let sub_x_correction = prev.map_or(Unit::ZERO, |p| p.baseline_x_correction) + script.half_line_width;
        let next = nodes.get(i + 1);
        let after_next = nodes.get(i + 2);

        match *node {
            Node::Superscript(ref child) => {
                let sup = superscript(child, &env, ctx, ancestors, special_sup.as_ref());
                let sup_size = sup.size;
                hbox.mark_strikeout(sup_size.strikeout_pos);
                hbox.put(Unit::ZERO, Unit::ZERO, sup);
                prev = Some(sup_size);
                if let Some(Node::Subscript(child)) = next {
                    let sub = subscript(child, &env, ctx, ancestors, special_sub.as_ref());
                    let sub_size = sub.size;
                    hbox.put(sub_x_correction, Unit::ZERO, sub);
                    hbox.advance((sup_size.width + script.space).max(sub_size.width + sub_x_correction));
                    prev = Some(sub_size);
                    i += 1;
                } else {
                    hbox.advance(sup_size.width);
                }
            },
            Node::Subscript(ref child) => {
                let sub = subscript(child, &env, ctx, ancestors, special_sub.as_ref());
                let sub_size = sub.size;
                hbox.mark_strikeout(sub_size.strikeout_pos);
                hbox.put(sub_x_correction, Unit::ZERO, sub);
                prev = Some(sub_size);
                if let Some(Node::Superscript(child)) = next {
                    let sup = superscript(child, &env, ctx, ancestors, special_sup.as_ref());
                    let sup_size = sup.size;
                    hbox.put(Unit::ZERO, Unit::ZERO, sup);
                    hbox.advance((sub_size.width + sub_x_correction).max(sup_size.width + script.space));
                    prev = Some(sup_size);
                    i += 1;
                } else {
                    hbox.advance(sub_size.width + sub_x_correction);
                }
            },
            _ if node.has_limits() && !env.text_style && next.and_then(script_child).is_some() => {
                let (sub, sup) = match (next, after_next) {
                    (Some(Node::Subscript(sub)), Some(Node::Superscript(sup))) => (Some(&**sub), Some(&**sup)),
                    (Some(Node::Superscript(sup)), Some(Node::Subscript(sub))) => (Some(&**sub), Some(&**sup)),
                    (Some(Node::Subscript(sub)), _) => (Some(&**sub), None),
                    (Some(Node::Superscript(sup)), _) => (None, Some(&**sup)),
                    _ => (None, None),
                };
                let consumed = 1 + sub.is_some() as usize + sup.is_some() as usize;

                let base = layout_node(node, &env, ctx, ancestors, None);
                let base_size = base.size;
                let script_env = env.scaled(ctx.settings.operatorsubsuper_size_factor);
                let sub = sub.map(|child| layout_node(child, &script_env, ctx, &ancestors.push(NodeKind::Subscript), None));
                let sup = sup.map(|child| layout_node(child, &script_env, ctx, &ancestors.push(NodeKind::Superscript), None));

                let width = sub.iter().chain(sup.iter())
                    .map(|script| script.size.width)
                    .fold(base_size.width, Unit::max)
                    + script.limits_extra;
                let correction = base_size.top_x_correction;

                hbox.mark_strikeout(base_size.strikeout_pos);
                hbox.put((width - base_size.width).scale(0.5), Unit::ZERO, base);
                if let Some(sub) = sub {
                    let dx = (width - sub.size.width).scale(0.5) - correction;
                    let dy = sub.size.baseline_height + base_size.descent() + script.limits_shift;
                    hbox.put(dx, dy, sub);
                }
                if let Some(sup) = sup {
                    let dx = (width - sup.size.width).scale(0.5) + correction;
                    let dy = -(base_size.baseline_height + sup.size.descent() + script.limits_shift);
                    hbox.put(dx, dy, sup);
                }
                hbox.advance(width);

                prev = Some(base_size);
                last_normal = Some(base_size);
                i += consumed - 1;
            },
            _ => {
                let layout = layout_node(node, &env, ctx, ancestors, None);
                prev = Some(layout.size);
                last_normal = Some(layout.size);
                hbox.add(layout);
            },
        }
        i += 1;
    }

    let default_strikeout = ctx.metrics.strikeout_pos(&ctx.font(&env));
    let mut layout = hbox.build(Some(NodeKind::List), default_strikeout);
    if let Some(last) = last_normal {
        layout.size.baseline_x_correction = last.baseline_x_correction;
        layout.size.top_x_correction = last.top_x_correction;
    }
    layout
}


#[cfg(test)]
mod tests {
    use crate::dimensions::Unit;
    use crate::layout::tests::{layout_math, ERROR_TOLERANCE};
    use crate::layout::Primitive;

    fn positions(input : &str) -> Vec<(String, f64, f64)> {
        layout_math(input).flatten().into_iter()
            .filter_map(|p| match *p.primitive {
                Primitive::Text { ref text, .. } => Some((text.clone(), p.x.to_unitless(), p.y.to_unitless())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn nodes_follow_each_other() {
        let ab = layout_math("a\\alpha");
        let a = layout_math("a");
        let alpha = layout_math("\\alpha");
        assert!((ab.size.width - a.size.width - alpha.size.width).abs().to_unitless() < ERROR_TOLERANCE);
        let placed = positions("a\\alpha");
        assert!(placed[1].1 > placed[0].1);
    }

    #[test]
    fn sub_and_superscript_share_their_position() {
        let placed = positions("x_1^2");
        let one = placed.iter().find(|p| p.0 == "1").unwrap();
        let two = placed.iter().find(|p| p.0 == "2").unwrap();
        assert!(one.2 > 0.);
        assert!(two.2 < 0.);
        // the superscript starts right after the base, the subscript slightly further
        assert!(one.1 >= two.1);

        let reversed = layout_math("x^2_1");
        let both = layout_math("x_1^2");
        assert!((reversed.size.overall_height - both.size.overall_height).abs().to_unitless() < ERROR_TOLERANCE);
    }

    #[test]
    fn limits_go_above_and_below() {
        let placed = positions("\\sum_{i}^{n}");
        let sum = placed.iter().find(|p| p.0 == "\u{2211}").unwrap();
        let lower = placed.iter().find(|p| p.0 == "i").unwrap();
        let upper = placed.iter().find(|p| p.0 == "n").unwrap();
        assert!(lower.2 > sum.2);
        assert!(upper.2 < sum.2);

        let layout = layout_math("\\sum_{i}^{n}");
        let sum_alone = layout_math("\\sum");
        assert!(layout.size.baseline_height > sum_alone.size.baseline_height);
        assert!(layout.size.descent() > sum_alone.size.descent());
    }

    #[test]
    fn limits_become_scripts_in_text_style() {
        let placed = positions("\\textstyle\\sum_{i}");
        let sum = placed.iter().find(|p| p.0 == "\u{2211}").unwrap();
        let lower = placed.iter().find(|p| p.0 == "i").unwrap();
        assert!(lower.1 > sum.1);
    }

    #[test]
    fn integrals_take_scripts() {
        let placed = positions("\\int_0^1");
        let int = placed.iter().find(|p| p.0 == "\u{222B}").unwrap();
        let zero = placed.iter().find(|p| p.0 == "0").unwrap();
        assert!(zero.1 > int.1);
    }

    #[test]
    fn environment_changes_apply_to_the_rest_of_the_list() {
        let layout = layout_math("a\\bf b");
        let bold : Vec<_> = layout.flatten().into_iter()
            .filter_map(|p| match *p.primitive {
                Primitive::Text { ref text, ref font, .. } => Some((text.clone(), font.bold)),
                _ => None,
            })
            .collect();
        assert_eq!(bold.first().map(|b| b.1), Some(false));
        assert_eq!(bold.last().map(|b| b.1), Some(true));
    }

    #[test]
    fn scripts_after_tall_nodes_move_outwards() {
        let small = layout_math("x^2");
        let tall = layout_math("\\frac{a}{b}^2");
        let raised = |layout : &crate::layout::LayoutBox| layout.flatten().into_iter()
            .filter_map(|p| match *p.primitive {
                Primitive::Text { ref text, .. } if text == "2" => Some(p.y),
                _ => None,
            })
            .next()
            .unwrap_or(Unit::ZERO);
        assert!(raised(&tall) < raised(&small));
    }

    #[test]
    fn groups_stay_the_base_of_their_scripts() {
        let raised = |input : &str| positions(input).into_iter()
            .find(|p| p.0 == "2")
            .map(|p| p.2)
            .unwrap();
        assert!(raised("{\\frac{a}{b}c}^2") < raised("c^2") - ERROR_TOLERANCE);
        assert!((raised("{c}^2") - raised("c^2")).abs() < ERROR_TOLERANCE);
    }
}
