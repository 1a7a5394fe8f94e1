//! Feeds random markup to the whole pipeline: whatever the input, parsing, layout, drawing and
//! HTML export must terminate without panicking.

mod common;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use mathtext::font::fixed::FixedMetrics;
use mathtext::parser::{ParseOptions, Parser};
use mathtext::render::bbox::BBoxBackend;
use mathtext::MathText;

const PIECES : &[&str] = &[
    "x", "12", " ", "$", "{", "}", "^", "_", "&", "\\\\", "[", "]", "(", ")", "|", "!",
    "\\frac", "\\sqrt", "\\left", "\\right", "\\left(", "\\right)", "\\right.", "\\alpha", "\\sum",
    "\\int", "\\hat", "\\overline", "\\underbrace", "\\begin{matrix}", "\\end{matrix}",
    "\\begin{pmatrix}", "\\end{pmatrix}", "\\begin{tabular}{lc}", "\\end{tabular}", "\\hline",
    "\\textbf", "\\color{red}", "\\colorbox{blue}", "\\fbox", "\\verb!", "\\notacommand", "\\",
    "\\quad", "\\bigl(", "\\phantom", "\\binom", "\\stackrel", "\\cancel", "\\mathrm", "\\text",
];

fn random_markup(rng : &mut StdRng) -> String {
    let len = rng.gen_range(1..24);
    (0..len).map(|_| *PIECES.choose(rng).unwrap_or(&"x")).collect()
}

#[test]
fn random_markup_never_panics() {
    common::init_logging();
    let mut rng = StdRng::seed_from_u64(0x6d61_7468);
    let metrics = FixedMetrics::default();

    for _ in 0..2000 {
        let markup = random_markup(&mut rng);
        let mut math = MathText::new();
        math.parse(&markup);
        let size = math.size(&metrics);
        assert!(size.width.to_unitless().is_finite(), "{}", markup);

        let mut backend = BBoxBackend::new(FixedMetrics::default());
        let end = math.draw(&mut backend, 0., 0.);
        assert!((end - size.width.to_unitless()).abs() < 1e-6, "{}", markup);
        math.to_html();
    }
}

#[test]
fn deep_nesting_is_bounded() {
    let markup = format!("${}x{}$", "{".repeat(1000), "}".repeat(1000));
    let output = Parser::new(&markup)
        .with_options(ParseOptions { max_depth : 64, ..ParseOptions::default() })
        .parse();
    assert!(!output.is_ok());

    let nested_fracs = format!("${}x{}$", "\\frac{".repeat(40), "}{y}".repeat(40));
    let mut math = MathText::new();
    assert!(math.parse(&nested_fracs));
    assert!(math.size(&FixedMetrics::default()).overall_height.to_unitless().is_finite());
}
