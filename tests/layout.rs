#[macro_use]
extern crate serde_derive;

use std::collections::BTreeMap;

mod common;

use mathtext::font::fixed::FixedMetrics;
use mathtext::parser::parse;
use mathtext::MathText;

const LAYOUT_YAML : &str = "tests/data/layout.yaml";
const EPSILON : f64 = 1e-6;

#[derive(Debug, Serialize, Deserialize)]
struct Tests(BTreeMap<String, Vec<Category>>);

#[derive(Debug, Serialize, Deserialize)]
struct Category {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Snippets")]
    snippets: Vec<String>,
}

fn size_of(markup : &str) -> mathtext::layout::NodeSize {
    let mut math = MathText::new();
    assert!(math.parse(markup), "{}: {:?}", markup, math.diagnostics());
    math.size(&FixedMetrics::default())
}

#[test]
fn layout_collection() {
    common::init_logging();
    let tests : Tests = common::load_yaml(LAYOUT_YAML);
    let metrics = FixedMetrics::default();
    let mut fail = 0;

    for (category, collection) in tests.0.iter() {
        for snippets in collection {
            for equation in &snippets.snippets {
                let output = parse(equation);
                if !output.is_ok() {
                    println!("{} - {}: {}", category, snippets.description, equation);
                    println!("Parse diagnostics: {:?}", output.diagnostics);
                    fail += 1;
                    continue;
                }

                let layout = common::layout_node(&output.root, &metrics);
                let size = layout.size;
                let width = size.width.to_unitless();
                let (end, bbox) = common::draw(&layout);

                let mut problems = Vec::new();
                if !(width > 0.) {
                    problems.push(format!("width {}", width));
                }
                if size.baseline_height.to_unitless() < 0. || size.overall_height < size.baseline_height {
                    problems.push(format!("heights {:?} / {:?}", size.baseline_height, size.overall_height));
                }
                if (end - width).abs() > EPSILON {
                    problems.push(format!("drawing ended at {} for a width of {}", end, width));
                }
                if bbox.is_none() {
                    problems.push("nothing drawn".to_string());
                }

                if !problems.is_empty() {
                    println!("{} - {}: {}", category, snippets.description, equation);
                    for problem in problems {
                        println!("  {}", problem);
                    }
                    fail += 1;
                }
            }
        }
    }

    if fail > 0 {
        panic!("{} layout tests failed.", fail);
    }
}

#[test]
fn superscripts_raise_the_top() {
    let base = size_of("$x$");
    let sup = size_of("$x^2$");
    assert!(sup.baseline_height > base.baseline_height);
    assert!(sup.width > base.width);
}

#[test]
fn subscripts_lower_the_bottom() {
    let base = size_of("$x$");
    let sub = size_of("$x_2$");
    assert!(sub.descent() > base.descent());
}

#[test]
fn fractions_stack_vertically() {
    let one = size_of("$1$");
    let frac = size_of("$\\frac{1}{2}$");
    assert!(frac.overall_height > one.overall_height);
    let nested = size_of("$\\frac{\\frac{1}{2}}{3}$");
    assert!(nested.overall_height > frac.overall_height);
}

#[test]
fn roots_cover_their_content() {
    let content = size_of("$x$");
    let root = size_of("$\\sqrt{x}$");
    assert!(root.width > content.width);
    assert!(root.baseline_height > content.baseline_height);
    let with_degree = size_of("$\\sqrt[3]{x}$");
    assert!(with_degree.width >= root.width);
}

#[test]
fn matrices_grow_with_rows() {
    let two = size_of("$\\begin{matrix} a \\\\ b \\end{matrix}$");
    let three = size_of("$\\begin{matrix} a \\\\ b \\\\ c \\end{matrix}$");
    assert!(three.overall_height > two.overall_height);
    let wide = size_of("$\\begin{matrix} a & b & c \\\\ d & e & f \\end{matrix}$");
    assert!(wide.width > two.width);
}

#[test]
fn font_size_scales_the_layout() {
    let metrics = FixedMetrics::default();
    let mut math = MathText::new();
    assert!(math.parse("$\\frac{a}{b} + \\sqrt{c}$"));
    let normal = math.size(&metrics);
    math.settings_mut().font_size *= 2.;
    let double = math.size(&metrics);
    assert!(double.width > normal.width);
    assert!(double.overall_height > normal.overall_height);
}

#[test]
fn drawing_matches_the_bounding_box_helper() {
    let metrics = FixedMetrics::default();
    let mut math = MathText::new();
    assert!(math.parse("$\\left( \\frac{a}{b} \\right)$"));
    let layout = math.layout(&metrics);
    let (_, drawn) = common::draw(&layout);
    let helper = math.bounding_box(&metrics);
    assert_eq!(drawn, helper);
}
