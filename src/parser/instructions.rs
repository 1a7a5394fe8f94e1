//! The instruction registry: what `\textbf`, `\bf`, `\fbox` or `\unicode` do.
//!
//! Every named instruction maps to an [`Instruction`]: a number of `{..}` parameters and a [`Behavior`].
//! Behaviors are plain function pointers sharing the shape `(Environment, parameters, context) -> Environment`,
//! box instructions additionally carry generators for the frame pen and fill brush.
//!
//! The parser receives the registry by reference. [`InstructionRegistry::standard`] builds the default table once
//! and shares it for the lifetime of the process; tests and embedders may build reduced or extended registries.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::dimensions::{Unit, units::Px};
use crate::environment::{Capitalization, Environment, FontFamily, FontSizeUnit};
use crate::parser::color::RGBA;
use crate::render::{Brush, LineStyle, Pen};

/// What the engine knows when it evaluates an instruction, besides the current environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineContext {
    /// font size of the root environment
    pub font_size : f64,
    /// unit of `font_size`
    pub font_size_unit : FontSizeUnit,
    /// font color of the root environment
    pub color : RGBA,
    /// thickness of lines in the current font, zero while parsing
    pub line_width : Unit<Px>,
}

impl Default for EngineContext {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            font_size : env.font_size,
            font_size_unit : env.font_size_unit,
            color : env.color,
            line_width : Unit::ZERO,
        }
    }
}

/// Changes an environment, given the instruction parameters
pub type Modifier = fn(Environment, &[String], &EngineContext) -> Environment;
/// Pen for the frame of a box, `None` for no frame
pub type PenGenerator = fn(&Environment, &[String], &EngineContext) -> Option<Pen>;
/// Brush filling a box, `None` for no fill
pub type BrushGenerator = fn(&Environment, &[String], &EngineContext) -> Option<Brush>;
/// Text replacing the instruction
pub type Substitution = fn(&[String]) -> String;

/// How a box instruction frames its argument
#[derive(Clone, Copy)]
pub struct BoxStyle {
    /// frame pen
    pub pen : PenGenerator,
    /// background brush
    pub brush : BrushGenerator,
    /// space between the frame and the content, as a fraction of the width of "x"
    pub padding_factor : f64,
    /// radius of rounded corners, as a fraction of the width of "x"
    pub rounding_factor : f64,
    /// draw a second, thinner frame inside the first one
    pub double_line : bool,
}

impl std::fmt::Debug for BoxStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxStyle")
            .field("padding_factor", &self.padding_factor)
            .field("rounding_factor", &self.rounding_factor)
            .field("double_line", &self.double_line)
            .finish()
    }
}

/// Padding of most boxes
pub const DEFAULT_PADDING : f64 = 0.5;

fn default_pen(env : &Environment, _ : &[String], ctx : &EngineContext) -> Option<Pen> {
    Some(Pen::new(env.color, ctx.line_width.to_unitless()))
}

fn no_pen(_ : &Environment, _ : &[String], _ : &EngineContext) -> Option<Pen> {
    None
}

fn no_brush(_ : &Environment, _ : &[String], _ : &EngineContext) -> Option<Brush> {
    None
}

/// Color named by `params[index]`, `default` if missing or invalid
fn color_param(params : &[String], index : usize, default : RGBA) -> RGBA {
    match params.get(index) {
        Some(name) => name.parse().unwrap_or_else(|e| {
            warn!("{}, using {}", e, default.to_css());
            default
        }),
        None => default,
    }
}

impl BoxStyle {
    const FRAME : BoxStyle = BoxStyle {
        pen : default_pen,
        brush : no_brush,
        padding_factor : DEFAULT_PADDING,
        rounding_factor : 0.,
        double_line : false,
    };
}

/// Kind of an instruction
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// modifies the environment of exactly one following `{..}` argument (`\textbf{..}`)
    TextProps(Modifier),
    /// modifies the environment of the rest of the enclosing group (`\bf`)
    ModifyEnvironment(Modifier),
    /// draws a frame and/or background around one following `{..}` argument
    Box(BoxStyle),
    /// replaced by a piece of text
    Substitute(Substitution),
}

/// A registered instruction
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    /// number of `{..}` parameters read as plain strings, before any argument
    pub params : usize,
    /// what the instruction does
    pub behavior : Behavior,
}

impl Instruction {
    /// Environment for the content affected by the instruction. Substitutions leave it unchanged.
    pub fn apply(&self, env : Environment, params : &[String], ctx : &EngineContext) -> Environment {
        match self.behavior {
            Behavior::TextProps(modify) | Behavior::ModifyEnvironment(modify) => modify(env, params, ctx),
            Behavior::Box(_) | Behavior::Substitute(_) => env,
        }
    }
}

/// Maps instruction names to their behavior
#[derive(Debug, Clone, Default)]
pub struct InstructionRegistry {
    table : HashMap<String, Instruction>,
}

impl InstructionRegistry {
    /// A registry without any instruction
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry of every built-in instruction, built on first use
    pub fn standard() -> &'static InstructionRegistry {
        static STANDARD : OnceLock<InstructionRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut registry = InstructionRegistry::empty();
            registry.register_text_props();
            registry.register_modify_environment();
            registry.register_boxes();
            registry.register_substitutions();
            debug!("built instruction registry with {} entries", registry.len());
            registry
        })
    }

    /// Registers `instruction` under `name`, replacing any previous entry
    pub fn insert(&mut self, name : &str, instruction : Instruction) {
        self.table.insert(name.to_string(), instruction);
    }

    /// Removes the instruction `name`
    pub fn remove(&mut self, name : &str) -> Option<Instruction> {
        self.table.remove(name)
    }

    /// Looks up an instruction
    pub fn get(&self, name : &str) -> Option<&Instruction> {
        self.table.get(name)
    }

    /// Is `name` registered?
    pub fn contains(&self, name : &str) -> bool {
        self.table.contains_key(name)
    }

    /// Number of registered instructions
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Names of the registered instructions, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    fn add(&mut self, names : &[&str], params : usize, behavior : Behavior) {
        for name in names {
            self.insert(name, Instruction { params, behavior });
        }
    }

    fn text_props(&mut self, names : &[&str], params : usize, modify : Modifier) {
        self.add(names, params, Behavior::TextProps(modify));
    }

    fn modify_env(&mut self, names : &[&str], params : usize, modify : Modifier) {
        self.add(names, params, Behavior::ModifyEnvironment(modify));
    }

    fn register_text_props(&mut self) {
        self.text_props(&["textnormal"], 0, |mut env, _, _| {
            env.bold = false;
            env.italic = false;
            env.underlined = false;
            env.overline = false;
            env.strike = false;
            env.force_digits_upright = true;
            env.family = FontFamily::Roman;
            env
        });
        self.text_props(&["textbf"], 0, |env, _, _| Environment { bold : true, force_digits_upright : false, ..env });
        self.text_props(&["mathbf"], 0, |env, _, _| Environment { bold : true, italic : false, force_digits_upright : false, ..env });
        self.text_props(&["textit", "mathit"], 0, |env, _, _| Environment { italic : true, force_digits_upright : false, ..env });
        self.text_props(&["emph"], 0, |env, _, _| Environment { italic : !env.italic, ..env });
        self.text_props(&["textup"], 0, |env, _, _| Environment { italic : false, ..env });
        self.text_props(&["textcolor", "mathcolor"], 1, |env, params, _| Environment { color : color_param(params, 0, env.color), ..env });
        self.text_props(&["userfont"], 1, |env, params, _| Environment {
            family : FontFamily::Custom,
            custom_font_name : params.first().cloned().unwrap_or_default(),
            ..env
        });
        self.text_props(&["ensuremath", "equation"], 0, |mut env, _, _| {
            env.begin_math_mode();
            env
        });
        self.text_props(&["textsc", "mathsc"], 0, |env, _, _| Environment { capitalization : Capitalization::SmallCaps, force_digits_upright : false, ..env });
        self.text_props(&["uppercase"], 0, |env, _, _| Environment { capitalization : Capitalization::AllUppercase, force_digits_upright : false, ..env });
        self.text_props(&["lowercase"], 0, |env, _, _| Environment { capitalization : Capitalization::AllLowercase, force_digits_upright : false, ..env });
        self.text_props(&["ul", "underlined"], 0, |env, _, _| Environment { underlined : true, ..env });
        self.text_props(&["ol", "overlined"], 0, |env, _, _| Environment { overline : true, ..env });
        self.text_props(&["strike", "st", "sout"], 0, |env, _, _| Environment { strike : true, ..env });
        self.text_props(&["textrm"], 0, |env, _, _| Environment { family : FontFamily::Roman, italic : false, ..env });
        self.text_props(&["mathrm", "unit", "operatorname"], 0, |env, _, _| Environment {
            family : FontFamily::Roman, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["mathbfit", "textbfit"], 0, |env, _, _| Environment { bold : true, italic : true, force_digits_upright : false, ..env });
        self.text_props(&["text", "mbox", "ensuretext"], 0, |mut env, _, _| {
            env.end_math_mode();
            env.family = FontFamily::Roman;
            env
        });
        self.text_props(&["mat"], 0, |env, _, _| Environment { family : FontFamily::Roman, italic : false, bold : true, ..env });
        self.text_props(&["mathcal"], 0, |env, _, _| Environment {
            family : FontFamily::Caligraphic, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["textcal"], 0, |env, _, _| Environment { family : FontFamily::Caligraphic, ..env });
        self.text_props(&["mathbfcal"], 0, |env, _, _| Environment {
            family : FontFamily::Caligraphic, italic : false, bold : true, force_digits_upright : false, ..env
        });
        self.text_props(&["textfcal"], 0, |env, _, _| Environment {
            family : FontFamily::Caligraphic, bold : true, force_digits_upright : false, ..env
        });
        self.text_props(&["textfrak"], 0, |env, _, _| Environment { family : FontFamily::Fraktur, ..env });
        self.text_props(&["mathfrak"], 0, |env, _, _| Environment {
            family : FontFamily::Fraktur, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["mathbffrak"], 0, |env, _, _| Environment {
            family : FontFamily::Fraktur, bold : true, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["textbffrak"], 0, |env, _, _| Environment { family : FontFamily::Fraktur, bold : true, ..env });
        self.text_props(&["textbb", "mathbb"], 0, |env, _, _| Environment {
            family : FontFamily::Blackboard, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["texttt"], 0, |env, _, _| Environment { family : FontFamily::Typewriter, ..env });
        self.text_props(&["mathtt"], 0, |env, _, _| Environment {
            family : FontFamily::Typewriter, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["textbftt"], 0, |env, _, _| Environment { family : FontFamily::Typewriter, bold : true, ..env });
        self.text_props(&["mathbftt"], 0, |env, _, _| Environment {
            family : FontFamily::Typewriter, italic : false, bold : true, force_digits_upright : false, ..env
        });
        self.text_props(&["textsf"], 0, |env, _, _| Environment { family : FontFamily::Sans, ..env });
        self.text_props(&["mathsf"], 0, |env, _, _| Environment {
            family : FontFamily::Sans, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["textitsf", "mathitsf"], 0, |env, _, _| Environment {
            family : FontFamily::Sans, italic : true, force_digits_upright : false, ..env
        });
        self.text_props(&["textscript", "textscr"], 0, |env, _, _| Environment { family : FontFamily::Script, ..env });
        self.text_props(&["mathscript", "mathscr"], 0, |env, _, _| Environment {
            family : FontFamily::Script, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["textbfscript", "textbfscr"], 0, |env, _, _| Environment { family : FontFamily::Script, bold : true, ..env });
        self.text_props(&["mathbfscript", "mathbfscr"], 0, |env, _, _| Environment {
            family : FontFamily::Script, bold : true, italic : false, force_digits_upright : false, ..env
        });
        self.text_props(&["bigsize"], 0, |env, _, _| env.scaled(1.2));
        self.text_props(&["Bigsize"], 0, |env, _, _| env.scaled(1.85));
        self.text_props(&["biggsize"], 0, |env, _, _| env.scaled(2.4));
        self.text_props(&["Biggsize"], 0, |env, _, _| env.scaled(3.1));
    }

    fn register_modify_environment(&mut self) {
        self.modify_env(&["normalfont"], 0, |mut env, _, ctx| {
            env.bold = false;
            env.italic = false;
            env.underlined = false;
            env.overline = false;
            env.strike = false;
            env.force_digits_upright = true;
            env.family = FontFamily::Roman;
            env.font_size = ctx.font_size;
            env.capitalization = Capitalization::Mixed;
            env.color = ctx.color;
            env
        });
        self.modify_env(&["md", "mdseries"], 0, |env, _, _| Environment { bold : false, italic : false, force_digits_upright : false, ..env });
        self.modify_env(&["bf", "bfseries"], 0, |env, _, _| Environment { bold : true, force_digits_upright : false, ..env });
        self.modify_env(&["it", "itshape"], 0, |env, _, _| Environment { italic : true, force_digits_upright : false, ..env });
        self.modify_env(&["up", "upshape"], 0, |env, _, _| Environment { italic : false, force_digits_upright : false, ..env });
        self.modify_env(&["em"], 0, |env, _, _| Environment { italic : !env.italic, ..env });
        self.modify_env(&["color"], 1, |env, params, _| Environment { color : color_param(params, 0, env.color), ..env });
        self.modify_env(&["setfont"], 1, |env, params, _| Environment {
            family : FontFamily::Custom,
            custom_font_name : params.first().cloned().unwrap_or_default(),
            ..env
        });
        self.modify_env(&["sc", "scshape"], 0, |env, _, _| Environment { capitalization : Capitalization::SmallCaps, force_digits_upright : false, ..env });
        self.modify_env(&["rm", "rmfamily"], 0, |env, _, _| Environment { family : FontFamily::Roman, italic : false, ..env });
        self.modify_env(&["bfit"], 0, |env, _, _| Environment { bold : true, italic : true, force_digits_upright : false, ..env });
        self.modify_env(&["cal", "calfamily"], 0, |env, _, _| Environment { family : FontFamily::Caligraphic, ..env });
        self.modify_env(&["bbfcal"], 0, |env, _, _| Environment {
            family : FontFamily::Caligraphic, bold : true, force_digits_upright : false, ..env
        });
        self.modify_env(&["frak", "frakfamily"], 0, |env, _, _| Environment { family : FontFamily::Fraktur, ..env });
        self.modify_env(&["bffrak"], 0, |env, _, _| Environment { family : FontFamily::Fraktur, bold : true, ..env });
        self.modify_env(&["bb", "bbfamily"], 0, |env, _, _| Environment {
            family : FontFamily::Blackboard, italic : false, force_digits_upright : false, ..env
        });
        self.modify_env(&["tt", "ttfamily"], 0, |env, _, _| Environment { family : FontFamily::Typewriter, ..env });
        self.modify_env(&["bftt"], 0, |env, _, _| Environment { family : FontFamily::Typewriter, bold : true, ..env });
        self.modify_env(&["sf", "sffamily"], 0, |env, _, _| Environment { family : FontFamily::Sans, ..env });
        self.modify_env(&["itsf"], 0, |env, _, _| Environment {
            family : FontFamily::Sans, italic : true, force_digits_upright : false, ..env
        });
        self.modify_env(&["script", "scr", "scriptseries", "scrseries"], 0, |env, _, _| Environment { family : FontFamily::Script, ..env });
        self.modify_env(&["bfscript", "bfscr"], 0, |env, _, _| Environment { family : FontFamily::Script, bold : true, ..env });
        self.modify_env(&["displaystyle"], 0, |env, _, ctx| Environment { font_size : ctx.font_size, text_style : false, ..env });
        self.modify_env(&["textstyle"], 0, |env, _, ctx| Environment { font_size : ctx.font_size, text_style : true, ..env });
        self.modify_env(&["scriptstyle"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 0.75, text_style : true, ..env });
        self.modify_env(&["scriptscriptstyle"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 0.5, text_style : true, ..env });

        self.modify_env(&["tiny"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 6. / 11., ..env });
        self.modify_env(&["ssmall"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 7. / 11., ..env });
        self.modify_env(&["scriptsize"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 8. / 11., ..env });
        self.modify_env(&["footnotesize"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 9. / 11., ..env });
        self.modify_env(&["small"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 10. / 11., ..env });
        self.modify_env(&["normalsize"], 0, |env, _, ctx| Environment { font_size : ctx.font_size, ..env });
        self.modify_env(&["large"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 12. / 11., ..env });
        self.modify_env(&["Large"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 14.4 / 11., ..env });
        self.modify_env(&["LARGE"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 17.28 / 11., ..env });
        self.modify_env(&["huge"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 20.74 / 11., ..env });
        self.modify_env(&["Huge"], 0, |env, _, ctx| Environment { font_size : ctx.font_size * 24.88 / 11., ..env });
        self.modify_env(&["userfontsize", "fontsize"], 1, |env, params, _| {
            let font_size = params.first()
                .and_then(|p| p.trim().parse::<f64>().ok())
                .unwrap_or(env.font_size);
            Environment { font_size, font_size_unit : FontSizeUnit::Points, ..env }
        });
    }

    fn register_boxes(&mut self) {
        let frame = BoxStyle::FRAME;
        self.add(&["fbox", "framebox", "boxed", "framed"], 0, Behavior::Box(frame));
        self.add(&["doublebox"], 0, Behavior::Box(BoxStyle { double_line : true, ..frame }));
        self.add(&["ovalbox"], 0, Behavior::Box(BoxStyle { rounding_factor : 0.7, ..frame }));
        self.add(&["Ovalbox"], 0, Behavior::Box(BoxStyle {
            pen : |env, params, ctx| default_pen(env, params, ctx).map(|p| p.scaled(1.5)),
            rounding_factor : 0.8,
            ..frame
        }));
        self.add(&["ovaldoublebox"], 0, Behavior::Box(BoxStyle { rounding_factor : 0.7, double_line : true, ..frame }));
        self.add(&["colorbox"], 1, Behavior::Box(BoxStyle {
            pen : no_pen,
            brush : |_, params, _| Some(Brush::solid(color_param(params, 0, RGBA::TRANSPARENT))),
            ..frame
        }));
        self.add(&["fcolorbox"], 2, Behavior::Box(BoxStyle {
            pen : |env, params, ctx| default_pen(env, params, ctx).map(|p| Pen { color : color_param(params, 0, env.color), ..p }),
            brush : |_, params, _| Some(Brush::solid(color_param(params, 1, RGBA::TRANSPARENT))),
            ..frame
        }));
        self.add(&["dashbox", "dashedbox", "dbox"], 0, Behavior::Box(BoxStyle {
            pen : |env, params, ctx| default_pen(env, params, ctx).map(|p| p.with_style(LineStyle::Dashed)),
            ..frame
        }));
        self.add(&["dottedbox", "dotbox"], 0, Behavior::Box(BoxStyle {
            pen : |env, params, ctx| default_pen(env, params, ctx).map(|p| p.with_style(LineStyle::Dotted)),
            ..frame
        }));
        self.add(&["shaded"], 1, Behavior::Box(BoxStyle {
            pen : no_pen,
            brush : |_, params, _| Some(Brush::solid(color_param(params, 0, RGBA::TRANSPARENT))),
            ..frame
        }));
        self.add(&["snugshade"], 1, Behavior::Box(BoxStyle {
            pen : no_pen,
            brush : |_, params, _| Some(Brush::solid(color_param(params, 0, RGBA::TRANSPARENT))),
            padding_factor : 0.,
            ..frame
        }));
        self.add(&["snugbox"], 0, Behavior::Box(BoxStyle { padding_factor : 0., ..frame }));
    }

    fn register_substitutions(&mut self) {
        self.add(&["unicode", "usym"], 1, Behavior::Substitute(|params| {
            params.first()
                .and_then(|p| u32::from_str_radix(p.trim(), 16).ok())
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default()
        }));
        self.add(&["utfeight"], 1, Behavior::Substitute(|params| {
            let code = match params.first().and_then(|p| u64::from_str_radix(p.trim(), 16).ok()) {
                Some(code) => code,
                None => return String::new(),
            };
            let bytes : Vec<u8> = code.to_be_bytes().iter().copied().skip_while(|&b| b == 0).collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name : &str, env : Environment, params : &[&str]) -> Environment {
        let params : Vec<String> = params.iter().map(|p| p.to_string()).collect();
        let instruction = InstructionRegistry::standard().get(name).unwrap();
        assert_eq!(instruction.params, params.len(), "{}", name);
        instruction.apply(env, &params, &EngineContext::default())
    }

    #[test]
    fn categories() {
        let registry = InstructionRegistry::standard();
        assert!(matches!(registry.get("textbf").unwrap().behavior, Behavior::TextProps(_)));
        assert!(matches!(registry.get("bf").unwrap().behavior, Behavior::ModifyEnvironment(_)));
        assert!(matches!(registry.get("fbox").unwrap().behavior, Behavior::Box(_)));
        assert!(matches!(registry.get("unicode").unwrap().behavior, Behavior::Substitute(_)));
        assert!(registry.get("notacommand").is_none());
        assert_eq!(registry.get("fcolorbox").unwrap().params, 2);
    }

    #[test]
    fn modifiers_return_copies() {
        let env = Environment::default();
        let bold = apply("textbf", env.clone(), &[]);
        assert!(bold.bold);
        assert!(!env.bold);

        let red = apply("textcolor", env.clone(), &["red"]);
        assert_eq!(red.color, RGBA(0xff, 0, 0, 0xff));
        let unknown = apply("color", env.clone(), &["nocolor"]);
        assert_eq!(unknown.color, env.color);

        let math = apply("ensuremath", env.clone(), &[]);
        assert!(math.inside_math && math.italic);
        let text = apply("text", math, &[]);
        assert!(!text.inside_math && !text.italic);

        let emph = apply("emph", apply("emph", env.clone(), &[]), &[]);
        assert_eq!(emph.italic, env.italic);
    }

    #[test]
    fn sizes_are_relative_to_the_root() {
        let env = Environment { font_size : 20., ..Environment::default() };
        assert_eq!(apply("normalsize", env.clone(), &[]).font_size, 10.);
        assert!((apply("large", env.clone(), &[]).font_size - 120. / 11.).abs() < 1e-9);
        assert_eq!(apply("bigsize", env.clone(), &[]).font_size, 24.);
        assert_eq!(apply("fontsize", env.clone(), &["7.5"]).font_size, 7.5);
        assert_eq!(apply("fontsize", env, &["big"]).font_size, 20.);

        let style = apply("textstyle", Environment::default(), &[]);
        assert!(style.text_style);
        assert!(!apply("displaystyle", style, &[]).text_style);
    }

    #[test]
    fn boxes() {
        let env = Environment::default();
        let ctx = EngineContext { line_width : Unit::new(1.5), ..EngineContext::default() };
        let registry = InstructionRegistry::standard();
        let style = |name| match registry.get(name).unwrap().behavior {
            Behavior::Box(style) => style,
            _ => panic!("{} is not a box", name),
        };

        let colorbox = style("colorbox");
        let red = vec!["red".to_string()];
        assert_eq!((colorbox.brush)(&env, &red, &ctx), Some(Brush::solid(RGBA(0xff, 0, 0, 0xff))));
        assert!((colorbox.pen)(&env, &red, &ctx).is_none());
        assert!(colorbox.padding_factor > 0.);

        let fbox = style("fbox");
        let pen = (fbox.pen)(&env, &[], &ctx).unwrap();
        assert_eq!(pen.width, 1.5);
        assert_eq!(pen.color, env.color);
        assert!((fbox.brush)(&env, &[], &ctx).is_none());

        let oval = style("Ovalbox");
        assert_eq!((oval.pen)(&env, &[], &ctx).unwrap().width, 2.25);
        assert_eq!(oval.rounding_factor, 0.8);

        let frame = vec!["blue".to_string(), "yellow".to_string()];
        let fcolorbox = style("fcolorbox");
        assert_eq!((fcolorbox.pen)(&env, &frame, &ctx).unwrap().color, RGBA(0, 0, 0xff, 0xff));
        assert_eq!((fcolorbox.brush)(&env, &frame, &ctx), Some(Brush::solid(RGBA(0xff, 0xff, 0, 0xff))));

        assert_eq!(style("snugshade").padding_factor, 0.);
        assert!(style("doublebox").double_line);
    }

    #[test]
    fn substitutions() {
        let registry = InstructionRegistry::standard();
        let substitute = |name : &str, param : &str| match registry.get(name).unwrap().behavior {
            Behavior::Substitute(f) => f(&[param.to_string()]),
            _ => panic!("{} is not a substitution", name),
        };
        assert_eq!(substitute("unicode", "3B1"), "\u{3B1}");
        assert_eq!(substitute("usym", "1F600"), "\u{1F600}");
        assert_eq!(substitute("unicode", "zz"), "");
        assert_eq!(substitute("utfeight", "C3A4"), "ä");
        assert_eq!(substitute("utfeight", "41"), "A");
    }

    #[test]
    fn custom_registry() {
        let mut registry = InstructionRegistry::empty();
        assert!(registry.is_empty());
        registry.insert("loud", Instruction {
            params : 0,
            behavior : Behavior::TextProps(|env, _, _| Environment { capitalization : Capitalization::AllUppercase, ..env }),
        });
        assert!(registry.contains("loud"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["loud"]);
        assert!(registry.remove("loud").is_some());
        assert!(registry.is_empty());
    }
}
