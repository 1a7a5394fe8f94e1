#[macro_use]
extern crate serde_derive;

mod common;

use mathtext::font::fixed::FixedMetrics;
use mathtext::parser::parse;

const PASS_FAIL_YAML : &str = "tests/data/passfail.yaml";

#[derive(Debug, Serialize, Deserialize)]
struct Tests {
    #[serde(rename="Pass")]
    pass: Vec<String>,
    #[serde(rename="Fail")]
    fail: Vec<String>,
}

#[test]
fn pass_fail() {
    common::init_logging();
    let tests : Tests = common::load_yaml(PASS_FAIL_YAML);
    let metrics = FixedMetrics::default();
    let mut fail = 0;

    for test in tests.pass {
        let output = parse(&test);
        if !output.is_ok() {
            println!("Tex: {}", test);
            for diagnostic in &output.diagnostics {
                println!("Should have passed, failed with: {}", diagnostic);
            }
            fail += 1;
        }
        let layout = common::layout_node(&output.root, &metrics);
        if !(layout.size.width.to_unitless() > 0.) {
            println!("Tex: {}", test);
            println!("Laid out with no width");
            fail += 1;
        }
    }

    for test in tests.fail {
        let output = parse(&test);
        if output.is_ok() {
            println!("Tex: {}", test);
            println!("Should have failed");
            fail += 1;
        }
        // the best-effort tree must still be usable
        let layout = common::layout_node(&output.root, &metrics);
        let (end, _) = common::draw(&layout);
        if !end.is_finite() {
            println!("Tex: {}", test);
            println!("Drawing ended at {}", end);
            fail += 1;
        }
    }

    if fail > 0 {
        panic!("{} Pass/Fail tests failed.", fail);
    }
}
