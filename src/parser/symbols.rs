//! Named symbols, e.g. `\alpha`, `\rightarrow`, `\sum` or `\sin`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// How a symbol is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    /// the text drawn for the symbol
    pub text : &'static str,
    /// forces italic on or off, `None` inherits it from the environment
    pub italic : Option<bool>,
    /// forces bold on or off, `None` inherits it from the environment
    pub bold : Option<bool>,
    /// a big operator (`\sum`, `\int`), drawn with a larger font
    pub big : bool,
    /// an operator or relation, given extra room on both sides inside math
    pub operator : bool,
    /// scripts go above and below (rather than beside) the symbol in display style
    pub limits : bool,
    /// the height of the symbol is its ascent only (e.g. `\lim`, `\max`)
    pub height_is_ascent : bool,
}

impl Symbol {
    const fn new(text : &'static str) -> Self {
        Self { text, italic : None, bold : None, big : false, operator : false, limits : false, height_is_ascent : false }
    }

    const fn upright(self) -> Self {
        Self { italic : Some(false), ..self }
    }

    const fn not_bold(self) -> Self {
        Self { bold : Some(false), ..self }
    }

    const fn operator(self) -> Self {
        Self { operator : true, ..self }
    }

    const fn limits(self) -> Self {
        Self { limits : true, height_is_ascent : true, ..self }
    }

    const fn big(self) -> Self {
        Self { big : true, height_is_ascent : true, ..self }
    }

    /// Given a name (e.g. "alpha"), returns the corresponding symbol
    pub fn from_name(name : &str) -> Option<Self> {
        table().get(name).copied()
    }

    /// Whether a symbol of that name exists
    pub fn exists(name : &str) -> bool {
        table().contains_key(name)
    }
}

const GREEK : &[(&str, &str)] = &[
    ("alpha", "\u{3B1}"), ("beta", "\u{3B2}"), ("gamma", "\u{3B3}"), ("delta", "\u{3B4}"),
    ("epsilon", "\u{3F5}"), ("varepsilon", "\u{3B5}"), ("zeta", "\u{3B6}"), ("eta", "\u{3B7}"),
    ("theta", "\u{3B8}"), ("vartheta", "\u{3D1}"), ("iota", "\u{3B9}"), ("kappa", "\u{3BA}"),
    ("varkappa", "\u{3F0}"), ("lambda", "\u{3BB}"), ("mu", "\u{3BC}"), ("nu", "\u{3BD}"),
    ("xi", "\u{3BE}"), ("omicron", "\u{3BF}"), ("pi", "\u{3C0}"), ("varpi", "\u{3D6}"),
    ("rho", "\u{3C1}"), ("varrho", "\u{3F1}"), ("sigma", "\u{3C3}"), ("varsigma", "\u{3C2}"),
    ("tau", "\u{3C4}"), ("upsilon", "\u{3C5}"), ("phi", "\u{3D5}"), ("varphi", "\u{3C6}"),
    ("chi", "\u{3C7}"), ("psi", "\u{3C8}"), ("omega", "\u{3C9}"),
    ("Alpha", "\u{391}"), ("Beta", "\u{392}"), ("Gamma", "\u{393}"), ("Delta", "\u{394}"),
    ("Epsilon", "\u{395}"), ("Zeta", "\u{396}"), ("Eta", "\u{397}"), ("Theta", "\u{398}"),
    ("Iota", "\u{399}"), ("Kappa", "\u{39A}"), ("Lambda", "\u{39B}"), ("Mu", "\u{39C}"),
    ("Nu", "\u{39D}"), ("Xi", "\u{39E}"), ("Omicron", "\u{39F}"), ("Pi", "\u{3A0}"),
    ("Rho", "\u{3A1}"), ("Sigma", "\u{3A3}"), ("Tau", "\u{3A4}"), ("Upsilon", "\u{3A5}"),
    ("Phi", "\u{3A6}"), ("Chi", "\u{3A7}"), ("Psi", "\u{3A8}"), ("Omega", "\u{3A9}"),
];

/// Characters which may be written with a backslash, drawn as themselves
const ESCAPED : &[(&str, &str)] = &[
    ("_", "_"), ("{", "{"), ("}", "}"), ("[", "["), ("]", "]"), ("$", "$"), ("%", "%"),
    ("&", "&"), ("#", "#"), ("|", "\u{2016}"),
    ("backslash", "\\"), ("textbackslash", "\\"), ("lbrace", "{"), ("rbrace", "}"),
    ("lbrack", "["), ("rbrack", "]"), ("colon", ":"), ("vert", "|"), ("lvert", "|"), ("rvert", "|"),
    ("Vert", "\u{2016}"), ("lVert", "\u{2016}"), ("rVert", "\u{2016}"),
];

const TEXT_SYMBOLS : &[(&str, &str)] = &[
    ("copyright", "\u{A9}"), ("textcopyright", "\u{A9}"), ("registered", "\u{AE}"), ("circledR", "\u{AE}"),
    ("textregistered", "\u{AE}"), ("trademark", "\u{2122}"), ("texttrademark", "\u{2122}"),
    ("EUR", "\u{20AC}"), ("euro", "\u{20AC}"), ("cent", "\u{A2}"), ("pound", "\u{A3}"), ("pounds", "\u{A3}"),
    ("yen", "\u{A5}"), ("dollar", "$"), ("Angstrom", "\u{212B}"), ("Angstroem", "\u{212B}"),
    ("co", "\u{2105}"), ("No", "\u{2116}"), ("Ohm", "\u{2126}"), ("ohm", "\u{2126}"), ("tcohm", "\u{2126}"),
    ("celsius", "\u{2103}"), ("degree", "\u{B0}"), ("textdegree", "\u{B0}"), ("perthousand", "\u{2030}"),
    ("dag", "\u{2020}"), ("dagger", "\u{2020}"), ("ddag", "\u{2021}"), ("ddagger", "\u{2021}"),
    ("P", "\u{B6}"), ("S", "\u{A7}"), ("female", "\u{2640}"), ("male", "\u{2642}"),
    ("endash", "\u{2013}"), ("textendash", "\u{2013}"), ("emdash", "\u{2014}"), ("textemdash", "\u{2014}"),
    ("hyphen", "-"), ("dots", "\u{2026}"), ("ldots", "\u{2026}"), ("ellipsis", "\u{2026}"),
    ("glq", "\u{2018}"), ("grq", "\u{2019}"), ("glqq", "\u{201C}"), ("grqq", "\u{201D}"),
    ("flq", "\u{2039}"), ("frq", "\u{203A}"), ("flqq", "\u{AB}"), ("frqq", "\u{BB}"),
    ("prime", "\u{2032}"), ("dprime", "\u{2033}"), ("trprime", "\u{2034}"),
];

/// Math symbols drawn in the current style
const MATH_SYMBOLS : &[(&str, &str)] = &[
    ("infty", "\u{221E}"), ("partial", "\u{2202}"), ("hbar", "\u{210F}"), ("nabla", "\u{2207}"),
    ("aleph", "\u{2135}"), ("alef", "\u{2135}"), ("Aleph", "\u{2135}"), ("beth", "\u{2136}"), ("bet", "\u{2136}"),
    ("gimel", "\u{2137}"), ("dalet", "\u{2138}"), ("emptyset", "\u{2205}"), ("varnothing", "\u{2205}"),
    ("Im", "\u{2111}"), ("Re", "\u{211C}"), ("wp", "\u{2118}"), ("ell", "\u{2113}"),
    ("forall", "\u{2200}"), ("exists", "\u{2203}"), ("nexists", "\u{2204}"), ("neg", "\u{AC}"), ("lnot", "\u{AC}"),
    ("angle", "\u{2220}"), ("measuredangle", "\u{2221}"), ("sphericalangle", "\u{2222}"), ("rightangle", "\u{221F}"),
    ("triangle", "\u{2206}"), ("square", "\u{25A1}"), ("Box", "\u{25A1}"), ("blacksquare", "\u{220E}"),
    ("therefore", "\u{2234}"), ("because", "\u{2235}"), ("lightning", "\u{21AF}"),
    ("frown", "\u{2322}"), ("smile", "\u{2323}"), ("top", "\u{22A4}"), ("bot", "\u{22A5}"),
    ("cdots", "\u{22EF}"), ("vdots", "\u{22EE}"), ("iddots", "\u{22F0}"), ("ddots", "\u{22F1}"),
    ("lceil", "\u{2308}"), ("rceil", "\u{2309}"), ("lfloor", "\u{230A}"), ("rfloor", "\u{230B}"),
    ("ulcorner", "\u{231C}"), ("urcorner", "\u{231D}"), ("llcorner", "\u{231E}"), ("lrcorner", "\u{231F}"),
    ("tlcorner", "\u{231C}"), ("trcorner", "\u{231D}"), ("blcorner", "\u{231E}"), ("brcorner", "\u{231F}"),
    ("langle", "\u{27E8}"), ("rangle", "\u{27E9}"),
    ("bbC", "\u{2102}"), ("bbH", "\u{210D}"), ("bbN", "\u{2115}"), ("bbP", "\u{2119}"),
    ("bbQ", "\u{211A}"), ("bbR", "\u{211D}"), ("bbZ", "\u{2124}"),
];

/// Binary operators, relations and arrows
const OPERATORS : &[(&str, &str)] = &[
    ("+", "+"), ("-", "\u{2212}"), ("=", "="), ("*", "\u{2217}"), ("<", "<"), (">", ">"), ("/", "/"),
    ("ast", "\u{2217}"), ("asterisk", "\u{2217}"), ("star", "\u{22C6}"), ("bullet", "\u{2219}"),
    ("cdot", "\u{B7}"), ("circ", "\u{2218}"), ("diamond", "\u{22C4}"),
    ("times", "\u{D7}"), ("div", "\u{F7}"), ("pm", "\u{B1}"), ("mp", "\u{2213}"),
    ("leq", "\u{2264}"), ("le", "\u{2264}"), ("geq", "\u{2265}"), ("ge", "\u{2265}"),
    ("leqq", "\u{2266}"), ("geqq", "\u{2267}"), ("ll", "\u{226A}"), ("gg", "\u{226B}"),
    ("neq", "\u{2260}"), ("ne", "\u{2260}"), ("equiv", "\u{2261}"), ("approx", "\u{2248}"),
    ("sim", "\u{223C}"), ("simeq", "\u{2243}"), ("cong", "\u{2245}"),
    ("propto", "\u{221D}"), ("prec", "\u{227A}"), ("succ", "\u{227B}"),
    ("in", "\u{2208}"), ("notin", "\u{2209}"), ("ni", "\u{220B}"), ("notni", "\u{220C}"),
    ("subset", "\u{2282}"), ("supset", "\u{2283}"), ("subseteq", "\u{2286}"), ("supseteq", "\u{2287}"),
    ("subsetnot", "\u{2284}"), ("supsetnot", "\u{2285}"),
    ("cap", "\u{2229}"), ("land", "\u{2229}"), ("cup", "\u{222A}"), ("lor", "\u{222A}"),
    ("wedge", "\u{2227}"), ("vee", "\u{2228}"), ("sqcap", "\u{2293}"), ("sqcup", "\u{2294}"),
    ("setminus", "\u{2216}"), ("mid", "\u{2223}"), ("nmid", "\u{2224}"),
    ("parallel", "\u{2225}"), ("nparallel", "\u{2226}"), ("perp", "\u{22A5}"),
    ("odot", "\u{2299}"), ("ominus", "\u{2296}"), ("oplus", "\u{2295}"), ("otimes", "\u{2297}"), ("oslash", "\u{2298}"),
    ("multimap", "\u{22B8}"),
    ("leftarrow", "\u{2190}"), ("gets", "\u{2190}"), ("rightarrow", "\u{2192}"), ("to", "\u{2192}"),
    ("uparrow", "\u{2191}"), ("downarrow", "\u{2193}"), ("leftrightarrow", "\u{2194}"), ("updownarrow", "\u{2195}"),
    ("Leftarrow", "\u{21D0}"), ("Rightarrow", "\u{21D2}"), ("Uparrow", "\u{21D1}"), ("Downarrow", "\u{21D3}"),
    ("Leftrightarrow", "\u{21D4}"), ("iff", "\u{21D4}"), ("Updownarrow", "\u{21D5}"),
    ("longleftarrow", "\u{27F5}"), ("longrightarrow", "\u{27F6}"), ("longleftrightarrow", "\u{27F7}"),
    ("Longleftarrow", "\u{27F8}"), ("Longrightarrow", "\u{27F9}"), ("Longleftrightarrow", "\u{27FA}"),
    ("nwarrow", "\u{2196}"), ("nearrow", "\u{2197}"), ("searrow", "\u{2198}"), ("swarrow", "\u{2199}"),
    ("mapsto", "\u{21A6}"),
    ("leftharpoonup", "\u{21BC}"), ("rightharpoonup", "\u{21C0}"), ("upharpoonleft", "\u{21BF}"),
    ("downharpoonleft", "\u{21C3}"), ("leftrightharpoon", "\u{21CB}"), ("rightleftharpoon", "\u{21CC}"),
    ("leftharpoondown", "\u{21BD}"), ("rightharpoondown", "\u{21C1}"), ("upharpoonright", "\u{21BE}"),
    ("downharpoonright", "\u{21C2}"),
];

/// Big operators taking their scripts above and below
const BIG_OPERATORS : &[(&str, &str)] = &[
    ("sum", "\u{2211}"), ("prod", "\u{220F}"), ("coprod", "\u{2210}"),
    ("bigcap", "\u{22C2}"), ("bigcup", "\u{22C3}"), ("bigvee", "\u{22C1}"), ("bigwedge", "\u{22C0}"),
    ("bigodot", "\u{2A00}"), ("bigoplus", "\u{2A01}"), ("bigotimes", "\u{2A02}"),
    ("biguplus", "\u{2A04}"), ("bigsqcup", "\u{2A06}"),
];

const INTEGRALS : &[(&str, &str)] = &[
    ("int", "\u{222B}"), ("iint", "\u{222C}"), ("iiint", "\u{222D}"),
    ("oint", "\u{222E}"), ("oiint", "\u{222F}"), ("oiiint", "\u{2230}"),
];

const FUNCTIONS : &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "sinh", "cosh", "tanh", "coth",
    "arcsin", "arccos", "arctan", "asin", "acos", "atan",
    "exp", "log", "ln", "ld", "lb", "lg", "erf", "arg", "dim", "deg", "hom", "ker", "mod",
    "sign", "sgn", "median",
];

const LIMIT_FUNCTIONS : &[&str] = &[
    "lim", "liminf", "limsup", "max", "min", "sup", "inf", "det", "Pr", "gcd", "argmin", "argmax",
];

fn table() -> &'static HashMap<String, Symbol> {
    static TABLE : OnceLock<HashMap<String, Symbol>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();

        for &(name, text) in GREEK {
            table.insert(name.to_string(), Symbol::new(text));
        }
        // \upalpha, \upGamma, ...
        for &(name, text) in GREEK {
            table.insert(format!("up{}", name), Symbol::new(text).upright());
        }
        for &(name, text) in ESCAPED {
            table.insert(name.to_string(), Symbol::new(text).upright().not_bold());
        }
        for &(name, text) in TEXT_SYMBOLS {
            table.insert(name.to_string(), Symbol::new(text).upright());
        }
        for &(name, text) in MATH_SYMBOLS {
            table.insert(name.to_string(), Symbol::new(text));
        }
        for &(name, text) in OPERATORS {
            table.insert(name.to_string(), Symbol::new(text).upright().operator());
        }
        for &(name, text) in BIG_OPERATORS {
            table.insert(name.to_string(), Symbol::new(text).upright().big().limits());
        }
        for &(name, text) in INTEGRALS {
            table.insert(name.to_string(), Symbol::new(text).upright().big());
        }
        for &name in FUNCTIONS {
            table.insert(name.to_string(), Symbol::new(name).upright());
        }
        for &name in LIMIT_FUNCTIONS {
            table.insert(name.to_string(), Symbol::new(name).upright().limits());
        }
        table.insert("ii".to_string(), Symbol::new("i").upright());
        table.insert("dd".to_string(), Symbol::new("d").upright());
        table
    })
}


#[cfg(test)]
mod tests {
    use super::Symbol;

    #[test]
    fn lookup() {
        assert_eq!(Symbol::from_name("alpha").map(|s| s.text), Some("α"));
        assert_eq!(Symbol::from_name("upalpha").and_then(|s| s.italic), Some(false));
        assert_eq!(Symbol::from_name("emptyset").map(|s| s.text), Some("\u{2205}"));
        assert_eq!(Symbol::from_name("-").map(|s| s.text), Some("\u{2212}"));
        assert!(Symbol::from_name("notasymbol").is_none());
        assert!(Symbol::exists("%"));
    }

    #[test]
    fn operator_flags() {
        let sum = Symbol::from_name("sum").unwrap();
        assert!(sum.big && sum.limits);

        let int = Symbol::from_name("int").unwrap();
        assert!(int.big && !int.limits);

        let lim = Symbol::from_name("lim").unwrap();
        assert!(lim.limits && !lim.big);
        assert_eq!(lim.text, "lim");

        let sin = Symbol::from_name("sin").unwrap();
        assert!(!sin.limits && sin.italic == Some(false));

        assert!(Symbol::from_name("leq").unwrap().operator);
        assert!(!Symbol::from_name("alpha").unwrap().operator);
    }
}
